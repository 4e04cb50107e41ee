//! Transient notifications
//!
//! At most one notification is on screen. Showing a new one evicts the old
//! one and cancels its auto-dismiss timer.

use folio_dom::{DomTree, NodeId};
use folio_runtime::{EventLoop, TaskHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    fn background(self) -> &'static str {
        match self {
            Self::Success => "#4caf50",
            Self::Error => "#f44336",
        }
    }
}

const NOTIFICATION_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "20px"),
    ("right", "20px"),
    ("color", "white"),
    ("padding", "1rem 1.5rem"),
    ("border-radius", "8px"),
    ("box-shadow", "0 4px 12px rgba(0, 0, 0, 0.3)"),
    ("z-index", "10000"),
    ("animation", "slideInRight 0.3s ease-out"),
    ("max-width", "300px"),
];

#[derive(Debug)]
struct Shown {
    node: NodeId,
    close: NodeId,
    handle: TaskHandle,
}

#[derive(Debug)]
pub struct Notifier {
    body: Option<NodeId>,
    timeout_ms: u64,
    current: Option<Shown>,
}

impl Notifier {
    pub fn new(body: Option<NodeId>, timeout_ms: u64) -> Self {
        Self {
            body,
            timeout_ms,
            current: None,
        }
    }

    /// The notification on screen, if any
    pub fn current(&self) -> Option<NodeId> {
        self.current.as_ref().map(|s| s.node)
    }

    /// Build and show a notification, scheduling `job(node)` for its expiry
    pub fn show<J: Clone>(
        &mut self,
        tree: &mut DomTree,
        event_loop: &mut EventLoop<J>,
        message: &str,
        kind: NotificationKind,
        job: impl FnOnce(NodeId) -> J,
    ) -> Option<NodeId> {
        let Some(body) = self.body else {
            tracing::warn!("No body to show notification: {}", message);
            return None;
        };
        self.clear(tree);

        let node = tree.create_element("div");
        tree.set_attr(node, "class", &format!("notification notification-{}", kind.as_str()));
        for (property, value) in NOTIFICATION_STYLE {
            tree.set_style(node, property, value);
        }
        tree.set_style(node, "background", kind.background());

        let content = tree.create_element("div");
        tree.add_class(content, "notification-content");
        let text = tree.create_element("span");
        tree.add_class(text, "notification-message");
        tree.set_text_content(text, message);
        let close = tree.create_element("button");
        tree.add_class(close, "notification-close");
        tree.set_text_content(close, "\u{d7}");

        tree.append_child(content, text);
        tree.append_child(content, close);
        tree.append_child(node, content);
        tree.append_child(body, node);

        let handle = event_loop.set_timeout(job(node), self.timeout_ms);
        self.current = Some(Shown { node, close, handle });
        tracing::debug!("Notification ({}): {}", kind.as_str(), message);
        Some(node)
    }

    /// Close-button clicks; returns true if one was handled
    pub fn handle_click(&mut self, tree: &mut DomTree, target: NodeId) -> bool {
        let Some(shown) = &self.current else {
            return false;
        };
        if !tree.contains(shown.close, target) {
            return false;
        }
        self.clear(tree);
        true
    }

    /// Auto-dismiss; a node already gone is left alone
    pub fn expire(&mut self, tree: &mut DomTree, node: NodeId) {
        if self.current() == Some(node) {
            self.current = None;
        }
        if tree.parent(node).is_some() {
            tree.detach(node);
            tracing::trace!("Notification {:?} expired", node);
        }
    }

    /// Remove the current notification and cancel its timer
    pub fn clear(&mut self, tree: &mut DomTree) {
        if let Some(shown) = self.current.take() {
            shown.handle.stop();
            tree.detach(shown.node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::{Document, Selector};

    fn setup() -> (Document, Notifier, EventLoop<NodeId>) {
        let doc = Document::new("about:blank");
        let notifier = Notifier::new(doc.body().to_option(), 5000);
        (doc, notifier, EventLoop::new())
    }

    fn count(doc: &Document) -> usize {
        doc.query_selector_all(".notification").unwrap().len()
    }

    #[test]
    fn test_show_builds_markup() {
        let (mut doc, mut notifier, mut loop_) = setup();
        let node = notifier
            .show(doc.tree_mut(), &mut loop_, "Hola", NotificationKind::Error, |n| n)
            .unwrap();

        let tree = doc.tree();
        assert!(tree.has_class(node, "notification-error"));
        assert_eq!(tree.style(node, "background"), Some("#f44336"));
        let message = Selector::parse(".notification-content > .notification-message").unwrap();
        let span = tree.query_selector(node, &message).unwrap();
        assert_eq!(tree.text_content(span), "Hola");
    }

    #[test]
    fn test_new_notification_evicts_old() {
        let (mut doc, mut notifier, mut loop_) = setup();
        let first = notifier
            .show(doc.tree_mut(), &mut loop_, "one", NotificationKind::Error, |n| n)
            .unwrap();
        let second = notifier
            .show(doc.tree_mut(), &mut loop_, "two", NotificationKind::Success, |n| n)
            .unwrap();

        assert_eq!(count(&doc), 1);
        assert!(!doc.tree().is_connected(first));
        assert_eq!(notifier.current(), Some(second));
        // Only the second timer is alive
        assert_eq!(loop_.pending(), 1);
    }

    #[test]
    fn test_auto_dismiss() {
        let (mut doc, mut notifier, mut loop_) = setup();
        notifier.show(doc.tree_mut(), &mut loop_, "bye", NotificationKind::Success, |n| n);

        assert!(loop_.tick(4999).is_empty());
        for node in loop_.tick(1) {
            notifier.expire(doc.tree_mut(), node);
        }
        assert_eq!(count(&doc), 0);
        assert_eq!(notifier.current(), None);
    }

    #[test]
    fn test_close_button() {
        let (mut doc, mut notifier, mut loop_) = setup();
        let node = notifier
            .show(doc.tree_mut(), &mut loop_, "x", NotificationKind::Error, |n| n)
            .unwrap();
        let close = doc.query_selector(".notification-close").unwrap().unwrap();

        assert!(!notifier.handle_click(doc.tree_mut(), node));
        assert!(notifier.handle_click(doc.tree_mut(), close));
        assert_eq!(count(&doc), 0);
        assert!(!loop_.has_pending_work());
    }
}
