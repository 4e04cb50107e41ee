//! Decorative effects: hover feedback, touch detection and the page-load
//! stagger of the hero text.

use folio_dom::{DomTree, NodeId};
use folio_runtime::{EventLoop, TaskHandle};

use crate::bindings::PageBindings;
use crate::config::EffectsConfig;
use crate::error::SetupError;

/// Mark `<body>` on touch devices; returns whether the device is touch-capable
pub fn detect_touch(tree: &mut DomTree, body: Option<NodeId>, touch: bool, class: &str) -> bool {
    if touch {
        if let Some(body) = body {
            tree.add_class(body, class);
        }
        tracing::debug!("Touch device detected");
    }
    touch
}

#[derive(Debug, Clone)]
pub struct HoverEffects {
    cards: Vec<NodeId>,
    /// Skill/tool items with their inner progress bar
    items: Vec<(NodeId, Option<NodeId>)>,
    config: EffectsConfig,
}

impl HoverEffects {
    pub fn setup(tree: &DomTree, bindings: &PageBindings, touch: bool, config: &EffectsConfig) -> Result<Self, SetupError> {
        if touch {
            return Err(SetupError::TouchDevice("hover effects"));
        }
        let items = bindings
            .skill_items
            .iter()
            .chain(&bindings.tool_items)
            .map(|&item| {
                let bar = bindings.progress_bars.iter().copied().find(|&b| tree.contains(item, b));
                (item, bar)
            })
            .collect();

        Ok(Self {
            cards: bindings.project_cards.clone(),
            items,
            config: config.clone(),
        })
    }

    /// Mouse enter; returns true if the target has a hover effect
    pub fn enter(&self, tree: &mut DomTree, target: NodeId) -> bool {
        if self.cards.contains(&target) {
            tree.set_style(target, "transform", &self.config.card_hover_transform);
            return true;
        }
        if let Some(&(item, bar)) = self.items.iter().find(|(item, _)| *item == target) {
            tree.set_style(item, "transform", &self.config.item_hover_transform);
            if let Some(bar) = bar {
                tree.set_style(bar, "background", &self.config.bar_highlight_background);
            }
            return true;
        }
        false
    }

    /// Mouse leave
    pub fn leave(&self, tree: &mut DomTree, target: NodeId) -> bool {
        if self.cards.contains(&target) {
            tree.set_style(target, "transform", &self.config.card_rest_transform);
            return true;
        }
        if let Some(&(item, bar)) = self.items.iter().find(|(item, _)| *item == target) {
            tree.set_style(item, "transform", "translateY(0)");
            if let Some(bar) = bar {
                tree.set_style(bar, "background", &self.config.bar_rest_background);
            }
            return true;
        }
        false
    }
}

/// Page-load class and hero-text stagger
#[derive(Debug)]
pub struct PageLoad {
    body: Option<NodeId>,
    children: Vec<NodeId>,
    loaded_class: String,
    load_delay_ms: u64,
    stagger_ms: u64,
    loaded: bool,
    handle: TaskHandle,
}

impl PageLoad {
    pub fn new(bindings: &PageBindings, loaded_class: &str, config: &EffectsConfig) -> Self {
        Self {
            body: bindings.body,
            children: bindings.hero_text_children.clone(),
            loaded_class: loaded_class.to_string(),
            load_delay_ms: config.load_delay_ms,
            stagger_ms: config.stagger_ms,
            loaded: false,
            handle: TaskHandle::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Handle `load`; only the first one counts
    pub fn on_load<J: Clone>(&mut self, tree: &mut DomTree, event_loop: &mut EventLoop<J>, job: J) -> bool {
        if self.loaded || self.handle.is_stopped() {
            return false;
        }
        self.loaded = true;
        if let Some(body) = self.body {
            tree.add_class(body, &self.loaded_class);
        }
        event_loop.schedule(&self.handle, job, self.load_delay_ms);
        true
    }

    /// Schedule each hero child, `stagger_ms` apart
    pub fn stagger<J: Clone>(&self, event_loop: &mut EventLoop<J>, job: impl Fn(NodeId) -> J) {
        for (index, &child) in self.children.iter().enumerate() {
            event_loop.schedule(&self.handle, job(child), index as u64 * self.stagger_ms);
        }
    }

    pub fn reveal_child(&self, tree: &mut DomTree, child: NodeId) {
        tree.set_style(child, "opacity", "1");
        tree.set_style(child, "transform", "translateY(0)");
    }

    pub fn stop(&self) {
        self.handle.stop();
    }
}
