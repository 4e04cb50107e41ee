//! In-page anchor navigation

use folio_dom::{Document, NodeId, ScrollBehavior, ScrollOptions, UiEvent};

use crate::window::Window;

#[derive(Debug, Clone)]
pub struct AnchorScroller {
    anchors: Vec<NodeId>,
    /// Fixed header height kept clear above the target
    offset: f64,
}

impl AnchorScroller {
    pub fn new(anchors: Vec<NodeId>, offset: f64) -> Self {
        Self { anchors, offset }
    }

    /// Scroll position for a target whose top edge is at `target_top`
    pub fn scroll_target(&self, target_top: f64) -> f64 {
        (target_top - self.offset).max(0.0)
    }

    /// Handle a click; returns true if a scroll was requested
    ///
    /// A bare `#` or an unknown id leaves the event untouched.
    pub fn handle_click(&self, document: &Document, window: &mut Window, event: &mut UiEvent) -> bool {
        let tree = document.tree();
        let Some(anchor) = self.anchors.iter().copied().find(|&a| tree.contains(a, event.target)) else {
            return false;
        };
        let Some(id) = tree.attr(anchor, "href").and_then(|h| h.strip_prefix('#')) else {
            return false;
        };
        if id.is_empty() {
            return false;
        }
        let Some(target) = document.get_element_by_id(id) else {
            tracing::debug!("Anchor target #{} not found", id);
            return false;
        };

        event.prevent_default();
        let top = tree.box_of(target).map_or(0.0, |rect| rect.top());
        window.request_scroll(ScrollOptions {
            top: self.scroll_target(top),
            behavior: ScrollBehavior::Smooth,
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::DOMRect;

    fn page(href: &str) -> (Document, NodeId) {
        let mut doc = Document::new("about:blank");
        let body = doc.body();
        let tree = doc.tree_mut();
        let anchor = tree.create_element("a");
        tree.set_attr(anchor, "href", href);
        tree.append_child(body, anchor);
        let section = tree.create_element("section");
        tree.set_attr(section, "id", "about");
        tree.set_box(section, DOMRect::from_xywh(0.0, 900.0, 800.0, 600.0));
        tree.append_child(body, section);
        (doc, anchor)
    }

    #[test]
    fn test_scrolls_with_header_offset() {
        let (doc, anchor) = page("#about");
        let scroller = AnchorScroller::new(vec![anchor], 70.0);
        let mut window = Window::default();
        let mut event = UiEvent::click(anchor);

        assert!(scroller.handle_click(&doc, &mut window, &mut event));
        assert!(event.is_default_prevented());
        assert_eq!(
            window.take_scroll_requests(),
            vec![ScrollOptions { top: 830.0, behavior: ScrollBehavior::Smooth }]
        );
    }

    #[test]
    fn test_missing_target_keeps_default() {
        for href in ["#nowhere", "#"] {
            let (doc, anchor) = page(href);
            let scroller = AnchorScroller::new(vec![anchor], 70.0);
            let mut window = Window::default();
            let mut event = UiEvent::click(anchor);

            assert!(!scroller.handle_click(&doc, &mut window, &mut event));
            assert!(!event.is_default_prevented());
            assert!(window.take_scroll_requests().is_empty());
        }
    }

    #[test]
    fn test_target_near_top_clamps_to_zero() {
        let scroller = AnchorScroller::new(Vec::new(), 70.0);
        assert_eq!(scroller.scroll_target(30.0), 0.0);
        assert_eq!(scroller.scroll_target(100.0), 30.0);
    }
}
