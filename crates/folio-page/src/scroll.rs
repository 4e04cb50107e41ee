//! Scroll-driven effects
//!
//! Everything here runs on the debounced scroll sample: navbar state,
//! active-link highlighting, the progress indicator and hero parallax.

use folio_dom::{DomTree, NodeId};

use crate::bindings::PageBindings;
use crate::config::{ClassConfig, ScrollConfig};
use crate::window::Window;

/// Navbar appearance for one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavbarState {
    pub scrolled: bool,
    pub hidden: bool,
}

/// Navbar state for `offset`, given the previous sample
pub fn navbar_state(offset: f64, previous: f64, config: &ScrollConfig) -> NavbarState {
    let scrolled = offset >= config.scrolled_threshold;
    let hidden = scrolled && offset - previous > 0.0 && offset > config.hide_threshold;
    NavbarState { scrolled, hidden }
}

/// Section containing `position`; the last one in document order wins
pub fn active_section<'a>(sections: &'a [(String, f64, f64)], position: f64) -> Option<&'a str> {
    sections
        .iter()
        .filter(|(_, top, height)| *top <= position && position < top + height)
        .map(|(id, _, _)| id.as_str())
        .last()
}

const PROGRESS_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "0%"),
    ("height", "3px"),
    ("background", "linear-gradient(135deg, #4a90e2, #7b68ee)"),
    ("z-index", "10000"),
    ("transition", "width 0.1s ease-out"),
];

#[derive(Debug, Clone)]
pub struct ScrollEffects {
    navbar: Option<NodeId>,
    nav_links: Vec<NodeId>,
    sections: Vec<NodeId>,
    hero: Option<NodeId>,
    progress: Option<NodeId>,
    last_offset: f64,
    config: ScrollConfig,
    active_class: String,
    scrolled_class: String,
}

impl ScrollEffects {
    /// Bind the effects and insert the progress indicator into `<body>`
    pub fn setup(tree: &mut DomTree, bindings: &PageBindings, config: &ScrollConfig, classes: &ClassConfig) -> Self {
        let progress = bindings.body.map(|body| {
            let bar = tree.create_element("div");
            tree.add_class(bar, "scroll-progress");
            for (property, value) in PROGRESS_STYLE {
                tree.set_style(bar, property, value);
            }
            tree.append_child(body, bar);
            bar
        });

        Self {
            navbar: bindings.navbar,
            nav_links: bindings.nav_links.clone(),
            sections: bindings.sections.clone(),
            hero: bindings.hero,
            progress,
            last_offset: 0.0,
            config: config.clone(),
            active_class: classes.active.clone(),
            scrolled_class: classes.scrolled.clone(),
        }
    }

    pub fn progress_bar(&self) -> Option<NodeId> {
        self.progress
    }

    pub fn last_offset(&self) -> f64 {
        self.last_offset
    }

    /// Apply one debounced sample
    pub fn apply(&mut self, tree: &mut DomTree, window: &Window) {
        let offset = window.scroll_y();
        tracing::trace!("Scroll sample at {}", offset);

        self.update_navbar(tree, offset);
        self.update_active_link(tree, offset);

        if let Some(bar) = self.progress {
            tree.set_style(bar, "width", &format!("{}%", window.scroll_percent()));
        }
        if let Some(hero) = self.hero {
            let shift = offset * self.config.parallax_speed;
            tree.set_style(hero, "transform", &format!("translateY({shift}px)"));
        }

        self.last_offset = offset;
    }

    fn update_navbar(&self, tree: &mut DomTree, offset: f64) {
        let Some(navbar) = self.navbar else {
            return;
        };
        let state = navbar_state(offset, self.last_offset, &self.config);
        if state.scrolled {
            tree.add_class(navbar, &self.scrolled_class);
        } else {
            tree.remove_class(navbar, &self.scrolled_class);
        }
        let transform = if state.hidden { "translateY(-100%)" } else { "translateY(0)" };
        tree.set_style(navbar, "transform", transform);
    }

    fn update_active_link(&self, tree: &mut DomTree, offset: f64) {
        let layout: Vec<(String, f64, f64)> = self
            .sections
            .iter()
            .filter_map(|&section| {
                let id = tree.attr(section, "id")?.to_string();
                let rect = tree.box_of(section)?;
                Some((id, rect.top(), rect.height))
            })
            .collect();

        let position = offset + self.config.section_offset;
        let Some(id) = active_section(&layout, position) else {
            return;
        };

        let href = format!("#{id}");
        for &link in &self.nav_links {
            let matches = tree.attr(link, "href") == Some(href.as_str());
            if matches {
                tree.add_class(link, &self.active_class);
            } else {
                tree.remove_class(link, &self.active_class);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::{DOMRect, Document};

    #[test]
    fn test_navbar_threshold() {
        let config = ScrollConfig::default();
        assert!(!navbar_state(49.0, 0.0, &config).scrolled);
        assert!(navbar_state(50.0, 0.0, &config).scrolled);
        assert!(navbar_state(51.0, 0.0, &config).scrolled);
    }

    #[test]
    fn test_navbar_hides_only_scrolling_down_past_threshold() {
        let config = ScrollConfig::default();
        assert!(!navbar_state(150.0, 100.0, &config).hidden);
        assert!(navbar_state(250.0, 240.0, &config).hidden);
        assert!(!navbar_state(250.0, 300.0, &config).hidden);
        assert!(!navbar_state(250.0, 250.0, &config).hidden);
    }

    #[test]
    fn test_active_section_last_wins() {
        let sections = vec![
            ("home".to_string(), 0.0, 800.0),
            ("about".to_string(), 800.0, 600.0),
            ("overlap".to_string(), 900.0, 100.0),
        ];
        assert_eq!(active_section(&sections, 100.0), Some("home"));
        assert_eq!(active_section(&sections, 800.0), Some("about"));
        assert_eq!(active_section(&sections, 950.0), Some("overlap"));
        assert_eq!(active_section(&sections, 5000.0), None);
    }

    #[test]
    fn test_apply_sets_styles() {
        let mut doc = Document::new("about:blank");
        let body = doc.body();
        let tree = doc.tree_mut();
        let nav = tree.create_element("nav");
        let hero = tree.create_element("section");
        tree.set_attr(hero, "id", "home");
        tree.set_box(hero, DOMRect::from_xywh(0.0, 0.0, 800.0, 1000.0));
        let link = tree.create_element("a");
        tree.set_attr(link, "href", "#home");
        tree.append_child(body, nav);
        tree.append_child(nav, link);
        tree.append_child(body, hero);

        let bindings = PageBindings {
            body: Some(body),
            navbar: Some(nav),
            nav_links: vec![link],
            sections: vec![hero],
            hero: Some(hero),
            ..PageBindings::default()
        };
        let mut effects = ScrollEffects::setup(tree, &bindings, &ScrollConfig::default(), &ClassConfig::default());
        let bar = effects.progress_bar().unwrap();
        assert_eq!(tree.parent(bar), Some(body));
        assert_eq!(tree.style(bar, "width"), Some("0%"));

        let mut window = Window::new(800.0, 600.0, 1000.0);
        window.set_scroll_y(200.0);
        effects.apply(tree, &window);

        assert!(tree.has_class(nav, "scrolled"));
        assert_eq!(tree.style(nav, "transform"), Some("translateY(0)"));
        assert!(tree.has_class(link, "active"));
        assert_eq!(tree.style(bar, "width"), Some("50%"));
        assert_eq!(tree.style(hero, "transform"), Some("translateY(100px)"));
        assert_eq!(effects.last_offset(), 200.0);
    }
}
