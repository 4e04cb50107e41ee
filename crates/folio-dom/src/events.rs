//! UI Events
//!
//! Input events delivered by the host to page behaviors.

use crate::NodeId;

/// Event types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Click,
    KeyDown { key: String },
    Submit,
    MouseEnter,
    MouseLeave,
    /// Window `load`
    Load,
}

/// A dispatched event
#[derive(Debug, Clone)]
pub struct UiEvent {
    pub kind: EventKind,
    pub target: NodeId,
    pub cancelable: bool,
    default_prevented: bool,
}

impl UiEvent {
    fn new(kind: EventKind, target: NodeId, cancelable: bool) -> Self {
        Self {
            kind,
            target,
            cancelable,
            default_prevented: false,
        }
    }

    /// Create click event
    pub fn click(target: NodeId) -> Self {
        Self::new(EventKind::Click, target, true)
    }

    /// Create keydown event
    pub fn key_down(target: NodeId, key: &str) -> Self {
        Self::new(EventKind::KeyDown { key: key.to_string() }, target, true)
    }

    /// Create form submit event
    pub fn submit(form: NodeId) -> Self {
        Self::new(EventKind::Submit, form, true)
    }

    pub fn mouse_enter(target: NodeId) -> Self {
        Self::new(EventKind::MouseEnter, target, false)
    }

    pub fn mouse_leave(target: NodeId) -> Self {
        Self::new(EventKind::MouseLeave, target, false)
    }

    /// Window load event
    pub fn load() -> Self {
        Self::new(EventKind::Load, NodeId::ROOT, false)
    }

    /// Prevent default action
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
