//! DOM Tree (arena-based allocation)

use std::collections::HashMap;

use crate::{DOMRect, DomError, ElementData, Node, NodeId, Selector};

/// Arena-based DOM tree
///
/// Slot 0 always holds the document node. Layout boxes are supplied by the
/// host (there is no layout engine here) and kept in a side table.
#[derive(Debug)]
pub struct DomTree {
    pub(crate) nodes: Vec<Node>,
    boxes: HashMap<NodeId, DOMRect>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            boxes: HashMap::new(),
        }
    }

    /// Document node
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Number of nodes in the arena (attached or not)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Node::text(text.to_string()))
    }

    /// Create a detached comment
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(Node::comment(text.to_string()))
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Append `child` as last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        // Refuse to create a cycle
        if self.contains(child, parent) {
            tracing::warn!("append_child would create a cycle: {:?} into {:?}", child, parent);
            return;
        }
        self.detach(child);

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
    }

    /// Unlink a node from its parent. Returns false if it had none.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(node) = self.get(id) else {
            return false;
        };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return false;
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        true
    }

    /// Remove all children of a node
    pub fn clear_children(&mut self, id: NodeId) {
        while let Some(child) = self.get(id).and_then(|n| n.first_child.to_option()) {
            self.detach(child);
        }
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent.to_option())
    }

    /// Iterate direct children
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        let mut next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        std::iter::from_fn(move || {
            let current = next.to_option()?;
            let node = self.get(current)?;
            next = node.next_sibling;
            Some((current, node))
        })
    }

    /// Element children only
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id).filter(|(_, n)| n.is_element()).map(|(id, _)| id)
    }

    /// Pre-order descendants (excluding `id` itself)
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).map(|(c, _)| c).collect();
        stack.reverse();
        while let Some(current) = stack.pop() {
            out.push(current);
            let mut kids: Vec<NodeId> = self.children(current).map(|(c, _)| c).collect();
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    /// Ancestors from parent up to the topmost node
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let mut current = self.parent(id);
        std::iter::from_fn(move || {
            let found = current?;
            current = self.parent(found);
            Some(found)
        })
    }

    /// Inclusive containment: is `node` equal to or inside `ancestor`?
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Whether the node is reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(NodeId::ROOT, id)
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Element data or a typed error
    pub fn try_element(&self, id: NodeId) -> Result<&ElementData, DomError> {
        let node = self.get(id).ok_or(DomError::NoSuchNode(id))?;
        node.as_element().ok_or(DomError::NotAnElement(id))
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(name))
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.set_attr(name, value);
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> bool {
        self.element_mut(id).is_some_and(|e| e.add_class(class))
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> bool {
        self.element_mut(id).is_some_and(|e| e.remove_class(class))
    }

    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        self.element_mut(id).is_some_and(|e| e.toggle_class(class, None))
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.style(property))
    }

    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.set_style(property, value);
        }
    }

    pub fn remove_style(&mut self, id: NodeId, property: &str) {
        if let Some(el) = self.element_mut(id) {
            el.remove_style(property);
        }
    }

    // ------------------------------------------------------------------
    // Text
    // ------------------------------------------------------------------

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.get(id).and_then(Node::as_text) {
            return text.to_string();
        }
        self.descendants(id)
            .into_iter()
            .filter_map(|d| self.get(d).and_then(Node::as_text))
            .collect()
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        if self.get(id).is_none() {
            return;
        }
        if let Some(crate::NodeData::Text(content)) = self.get_mut(id).map(|n| &mut n.data) {
            *content = text.to_string();
            return;
        }
        self.clear_children(id);
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append_child(id, node);
        }
    }

    // ------------------------------------------------------------------
    // Form controls
    // ------------------------------------------------------------------

    /// Current value of a form control
    pub fn control_value(&self, id: NodeId) -> String {
        let Some(el) = self.element(id) else {
            return String::new();
        };
        if let Some(value) = el.dirty_value() {
            return value.to_string();
        }
        self.default_control_value(id)
    }

    /// Value the control returns to on form reset
    pub fn default_control_value(&self, id: NodeId) -> String {
        match self.element(id) {
            Some(el) if el.tag() == "textarea" => self.text_content(id),
            Some(el) => el.attr("value").unwrap_or_default().to_string(),
            None => String::new(),
        }
    }

    pub fn set_control_value(&mut self, id: NodeId, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.set_dirty_value(Some(value.to_string()));
        }
    }

    /// Drop the dirty value so the default shows again
    pub fn reset_control(&mut self, id: NodeId) {
        if let Some(el) = self.element_mut(id) {
            el.set_dirty_value(None);
        }
    }

    // ------------------------------------------------------------------
    // Layout boxes
    // ------------------------------------------------------------------

    /// Record the layout box of a node (document coordinates)
    pub fn set_box(&mut self, id: NodeId, rect: DOMRect) {
        self.boxes.insert(id, rect);
    }

    /// Layout box of a node, if the host supplied one
    pub fn box_of(&self, id: NodeId) -> Option<DOMRect> {
        self.boxes.get(&id).copied()
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Check if element matches selector
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        selector.matches(self, id)
    }

    /// All matching descendants of `root`, in document order
    pub fn query_selector_all(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|&id| selector.matches(self, id))
            .collect()
    }

    /// First matching descendant of `root`
    pub fn query_selector(&self, root: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(root)
            .into_iter()
            .find(|&id| selector.matches(self, id))
    }

    /// Closest inclusive ancestor matching the selector
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&a| selector.matches(self, a))
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let ul = tree.create_element("ul");
        let a = tree.create_element("li");
        let b = tree.create_element("li");
        tree.append_child(tree.root(), ul);
        tree.append_child(ul, a);
        tree.append_child(ul, b);
        (tree, ul, a, b)
    }

    #[test]
    fn test_append_and_detach() {
        let (mut tree, ul, a, b) = sample();
        assert_eq!(tree.children(ul).count(), 2);
        assert!(tree.detach(a));
        assert!(!tree.detach(a));
        assert_eq!(tree.children(ul).map(|(id, _)| id).collect::<Vec<_>>(), vec![b]);
        assert!(!tree.is_connected(a));
        assert!(tree.is_connected(b));
    }

    #[test]
    fn test_reappend_moves_node() {
        let (mut tree, ul, a, b) = sample();
        tree.append_child(ul, a);
        assert_eq!(tree.children(ul).map(|(id, _)| id).collect::<Vec<_>>(), vec![b, a]);
    }

    #[test]
    fn test_no_cycles() {
        let (mut tree, ul, a, _) = sample();
        tree.append_child(a, ul);
        assert_eq!(tree.parent(ul), Some(NodeId::ROOT));
    }

    #[test]
    fn test_text_content_roundtrip() {
        let (mut tree, ul, a, b) = sample();
        tree.set_text_content(a, "one");
        tree.set_text_content(b, "two");
        assert_eq!(tree.text_content(ul), "onetwo");
        tree.set_text_content(a, "");
        assert_eq!(tree.text_content(a), "");
    }

    #[test]
    fn test_textarea_value_defaults_to_text() {
        let mut tree = DomTree::new();
        let area = tree.create_element("textarea");
        tree.set_text_content(area, "hello");
        assert_eq!(tree.control_value(area), "hello");
        tree.set_control_value(area, "edited");
        assert_eq!(tree.control_value(area), "edited");
        tree.reset_control(area);
        assert_eq!(tree.control_value(area), "hello");
    }
}
