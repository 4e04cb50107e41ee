//! folio DOM - Document Object Model
//!
//! Arena-backed DOM tree used by the page-interaction engine.
//! Nodes are addressed by [`NodeId`] and never move once created; detached
//! nodes stay in the arena until the document is dropped.

mod node;
mod tree;
mod document;
mod selector;
mod geometry;
mod events;

pub use node::{Node, NodeData, ElementData};
pub use tree::DomTree;
pub use document::Document;
pub use selector::{Selector, CompoundSelector, AttrMatcher, Combinator};
pub use geometry::{DOMRect, ScrollBehavior, ScrollOptions};
pub use events::{UiEvent, EventKind};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root (document) node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check if this refers to a node
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Non-sentinel id, or None
    #[inline]
    pub fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}

/// DOM errors
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("No such node: {0:?}")]
    NoSuchNode(NodeId),

    #[error("Node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("Invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}
