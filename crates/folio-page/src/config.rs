//! Page Configuration
//!
//! Every tunable the controller uses. All sections default to the values the
//! portfolio ships with, so an empty TOML file is a valid configuration.

use std::path::Path;

use serde::Deserialize;

use crate::animation_lib::AnimationLibraryOptions;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Page configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub selectors: SelectorConfig,
    pub classes: ClassConfig,
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub counter: CounterConfig,
    pub typewriter: TypewriterConfig,
    pub contact: ContactConfig,
    pub notification: NotificationConfig,
    pub effects: EffectsConfig,
    pub animation_library: AnimationLibraryOptions,
}

impl PageConfig {
    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Reject values the behaviors cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.counter.steps == 0 {
            return Err(ConfigError::Invalid {
                field: "counter.steps",
                reason: "must be at least 1".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::Invalid {
                field: "reveal.threshold",
                reason: format!("{} is outside [0, 1]", self.reveal.threshold),
            });
        }
        let typewriter = &self.typewriter;
        for (field, value) in [
            ("typewriter.type_ms", typewriter.type_ms),
            ("typewriter.delete_ms", typewriter.delete_ms),
            ("typewriter.hold_full_ms", typewriter.hold_full_ms),
            ("typewriter.hold_empty_ms", typewriter.hold_empty_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be at least 1".into(),
                });
            }
        }
        if self.scroll.hide_threshold < self.scroll.scrolled_threshold {
            return Err(ConfigError::Invalid {
                field: "scroll.hide_threshold",
                reason: "must not be below scroll.scrolled_threshold".into(),
            });
        }
        Ok(())
    }
}

/// Selectors that bind the controller to the page markup
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub navbar: String,
    pub hamburger: String,
    pub nav_menu: String,
    pub nav_links: String,
    pub anchors: String,
    pub sections: String,
    pub hero: String,
    pub hero_subtitle: String,
    pub hero_text_children: String,
    pub stat_numbers: String,
    pub project_cards: String,
    pub skill_items: String,
    pub tool_items: String,
    pub progress_bars: String,
    pub contact_form: String,
    pub submit_button: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            navbar: "#navbar".into(),
            hamburger: "#hamburger".into(),
            nav_menu: "#nav-menu".into(),
            nav_links: ".nav-link".into(),
            anchors: "a[href^=\"#\"]".into(),
            sections: "section".into(),
            hero: ".hero".into(),
            hero_subtitle: ".hero-subtitle".into(),
            hero_text_children: ".hero-text > *".into(),
            stat_numbers: ".stat-number".into(),
            project_cards: ".project-card".into(),
            skill_items: ".skill-item".into(),
            tool_items: ".tool-item".into(),
            progress_bars: ".progress-bar".into(),
            contact_form: "#contact-form".into(),
            submit_button: "button[type=\"submit\"]".into(),
        }
    }
}

/// Class names used as styling signals
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassConfig {
    pub active: String,
    pub scrolled: String,
    pub revealed: String,
    pub loaded: String,
    pub touch_device: String,
    /// Section whose reveal starts the counters
    pub stats_section: String,
    /// Section whose reveal fills the skill bars
    pub skills_section: String,
}

impl Default for ClassConfig {
    fn default() -> Self {
        Self {
            active: "active".into(),
            scrolled: "scrolled".into(),
            revealed: "animated".into(),
            loaded: "loaded".into(),
            touch_device: "touch-device".into(),
            stats_section: "about".into(),
            skills_section: "skills".into(),
        }
    }
}

/// Scroll-driven effects
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Quiet period of the scroll debounce
    pub debounce_ms: u64,
    /// Offset at which the navbar becomes "scrolled"
    pub scrolled_threshold: f64,
    /// Offset past which scrolling down hides the navbar
    pub hide_threshold: f64,
    /// Added to scrollY before matching sections (fixed navbar height)
    pub section_offset: f64,
    /// Subtracted from anchor targets when scrolling to them
    pub anchor_offset: f64,
    pub parallax_speed: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 10,
            scrolled_threshold: 50.0,
            hide_threshold: 200.0,
            section_offset: 100.0,
            anchor_offset: 70.0,
            parallax_speed: 0.5,
        }
    }
}

/// Reveal-on-scroll
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
    /// Delay before skill bars fill once the skills section shows
    pub progress_bar_delay_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".into(),
            progress_bar_delay_ms: 500,
        }
    }
}

/// Statistic counters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CounterConfig {
    pub duration_ms: u64,
    pub steps: u32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: 1500,
            steps: 30,
        }
    }
}

impl CounterConfig {
    /// Tick period
    pub fn interval_ms(&self) -> u64 {
        (self.duration_ms / u64::from(self.steps.max(1))).max(1)
    }
}

/// Hero typewriter
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TypewriterConfig {
    pub phrases: Vec<String>,
    pub start_delay_ms: u64,
    pub type_ms: u64,
    pub delete_ms: u64,
    /// Dwell on the fully typed phrase
    pub hold_full_ms: u64,
    /// Dwell on the empty line before the next phrase
    pub hold_empty_ms: u64,
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "Estudiante de Ciencias de la Computación".into(),
                "Desarrollador Aspirante".into(),
                "Entusiasta del Código Abierto".into(),
            ],
            start_delay_ms: 1000,
            type_ms: 100,
            delete_ms: 50,
            hold_full_ms: 2000,
            hold_empty_ms: 1200,
        }
    }
}

/// Contact form
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Simulated delivery time
    pub submit_delay_ms: u64,
    pub sending_label: String,
    pub missing_fields_message: String,
    pub invalid_email_message: String,
    pub success_message: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 2000,
            sending_label: "Enviando...".into(),
            missing_fields_message: "Por favor completa todos los campos".into(),
            invalid_email_message: "Por favor ingresa una dirección de email válida".into(),
            success_message: "¡Mensaje enviado exitosamente! Te responderé pronto.".into(),
        }
    }
}

/// Transient notifications
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub timeout_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { timeout_ms: 5000 }
    }
}

/// Page-load and hover effects
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Delay after `load` before the hero text staggers in
    pub load_delay_ms: u64,
    /// Gap between consecutive hero children
    pub stagger_ms: u64,
    pub card_hover_transform: String,
    pub card_rest_transform: String,
    pub item_hover_transform: String,
    pub bar_highlight_background: String,
    pub bar_rest_background: String,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            load_delay_ms: 300,
            stagger_ms: 200,
            card_hover_transform: "translateY(-10px) scale(1.02)".into(),
            card_rest_transform: "translateY(0) scale(1)".into(),
            item_hover_transform: "translateY(-5px)".into(),
            bar_highlight_background: "linear-gradient(135deg, #ff6b6b, #ff8e8e)".into(),
            bar_rest_background:
                "linear-gradient(135deg, var(--primary-color), var(--secondary-color))".into(),
        }
    }
}
