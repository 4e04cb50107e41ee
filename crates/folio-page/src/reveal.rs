//! Reveal-on-scroll
//!
//! Sections gain the revealed class the first time they intersect the
//! viewport. Two sections carry one-shot side effects: the stats section
//! starts the counters, the skills section fills the skill bars.

use folio_dom::{DomTree, NodeId};
use folio_runtime::{IntersectionObserver, IntersectionObserverOptions};

use crate::bindings::PageBindings;
use crate::config::{ClassConfig, RevealConfig};
use crate::error::SetupError;
use crate::window::Window;

/// One-shot triggers fired by a check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealTriggers {
    pub start_counters: bool,
    pub fill_progress_bars: bool,
}

#[derive(Debug)]
pub struct RevealController {
    observer: IntersectionObserver,
    classes: ClassConfig,
    counters_triggered: bool,
    bars_triggered: bool,
}

impl RevealController {
    pub fn setup(bindings: &PageBindings, config: &RevealConfig, classes: &ClassConfig) -> Result<Self, SetupError> {
        if bindings.sections.is_empty() {
            return Err(SetupError::MissingElement("sections"));
        }
        let options = IntersectionObserverOptions::new(&config.root_margin, vec![config.threshold])?;
        let mut observer = IntersectionObserver::new(options);
        for &section in &bindings.sections {
            observer.observe(section);
        }

        Ok(Self {
            observer,
            classes: classes.clone(),
            counters_triggered: false,
            bars_triggered: false,
        })
    }

    /// Run the observer against the current viewport
    pub fn check(&mut self, tree: &mut DomTree, window: &Window, time: u64) -> RevealTriggers {
        self.observer
            .check_intersections(window.viewport_rect(), |node| tree.box_of(node), time);

        let mut triggers = RevealTriggers::default();
        for entry in self.observer.take_entries() {
            if !entry.is_intersecting {
                continue;
            }
            let section = entry.target;
            if tree.add_class(section, &self.classes.revealed) {
                tracing::debug!("Revealed section {:?}", section);
            }

            if !self.counters_triggered && tree.has_class(section, &self.classes.stats_section) {
                self.counters_triggered = true;
                triggers.start_counters = true;
            }
            if !self.bars_triggered && tree.has_class(section, &self.classes.skills_section) {
                self.bars_triggered = true;
                triggers.fill_progress_bars = true;
            }
        }
        triggers
    }

    pub fn disconnect(&mut self) {
        self.observer.disconnect();
    }

    pub fn observed_count(&self) -> usize {
        self.observer.observed_count()
    }
}

/// Set each bar's width from its `data-width`
pub fn fill_progress_bars(tree: &mut DomTree, bars: &[NodeId]) {
    for &bar in bars {
        let Some(width) = tree.attr(bar, "data-width").map(str::to_string) else {
            continue;
        };
        tree.set_style(bar, "width", &format!("{width}%"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::{DOMRect, Document};

    fn stacked_sections(doc: &mut Document, classes: &[&str]) -> Vec<NodeId> {
        let body = doc.body();
        let tree = doc.tree_mut();
        classes
            .iter()
            .enumerate()
            .map(|(i, class)| {
                let section = tree.create_element("section");
                tree.set_attr(section, "class", class);
                tree.set_box(section, DOMRect::from_xywh(0.0, i as f64 * 1000.0, 800.0, 1000.0));
                tree.append_child(body, section);
                section
            })
            .collect()
    }

    #[test]
    fn test_reveals_and_triggers_once() {
        let mut doc = Document::new("about:blank");
        let sections = stacked_sections(&mut doc, &["hero", "about", "skills"]);
        let bindings = PageBindings { sections: sections.clone(), ..PageBindings::default() };
        let mut reveal =
            RevealController::setup(&bindings, &RevealConfig::default(), &ClassConfig::default()).unwrap();
        assert_eq!(reveal.observed_count(), 3);

        let mut window = Window::new(800.0, 800.0, 3000.0);
        let triggers = reveal.check(doc.tree_mut(), &window, 0);
        assert_eq!(triggers, RevealTriggers::default());
        assert!(doc.tree().has_class(sections[0], "animated"));
        assert!(!doc.tree().has_class(sections[1], "animated"));

        // 200px of about visible within the -50px bottom margin
        window.set_scroll_y(450.0);
        let triggers = reveal.check(doc.tree_mut(), &window, 1);
        assert!(triggers.start_counters);
        assert!(doc.tree().has_class(sections[1], "animated"));

        // Leave and come back: no second trigger
        window.set_scroll_y(0.0);
        reveal.check(doc.tree_mut(), &window, 2);
        window.set_scroll_y(450.0);
        assert!(!reveal.check(doc.tree_mut(), &window, 3).start_counters);
        assert!(doc.tree().has_class(sections[1], "animated"));

        window.set_scroll_y(2200.0);
        assert!(reveal.check(doc.tree_mut(), &window, 4).fill_progress_bars);
    }

    #[test]
    fn test_fill_progress_bars() {
        let mut doc = Document::new("about:blank");
        let tree = doc.tree_mut();
        let bar = tree.create_element("div");
        tree.set_attr(bar, "data-width", "85");
        let plain = tree.create_element("div");

        fill_progress_bars(tree, &[bar, plain]);
        assert_eq!(tree.style(bar, "width"), Some("85%"));
        assert_eq!(tree.style(plain, "width"), None);
    }

    #[test]
    fn test_no_sections() {
        let err = RevealController::setup(&PageBindings::default(), &RevealConfig::default(), &ClassConfig::default())
            .unwrap_err();
        assert_eq!(err, SetupError::MissingElement("sections"));
    }
}
