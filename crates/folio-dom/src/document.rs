//! Document - High-level document API

use crate::{DomError, DomTree, NodeId, Selector};

/// HTML Document
#[derive(Debug)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Cached reference to <html> element
    html_element: NodeId,
    /// Cached reference to <head> element
    head_element: NodeId,
    /// Cached reference to <body> element
    body_element: NodeId,
}

impl Document {
    /// Create a new document with html/head/body
    pub fn new(url: &str) -> Self {
        let mut tree = DomTree::new();

        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let body = tree.create_element("body");

        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(html, body);

        Self {
            tree,
            url: url.to_string(),
            html_element: html,
            head_element: head,
            body_element: body,
        }
    }

    /// Create an empty document (no structure)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            html_element: NodeId::NONE,
            head_element: NodeId::NONE,
            body_element: NodeId::NONE,
        }
    }

    /// Locate html/head/body after the tree was built externally
    pub fn finalize(&mut self) {
        let find = |tree: &DomTree, parent: NodeId, tag: &str| {
            tree.element_children(parent)
                .find(|&c| tree.element(c).is_some_and(|e| e.tag() == tag))
                .unwrap_or(NodeId::NONE)
        };
        self.html_element = find(&self.tree, self.tree.root(), "html");
        if self.html_element.is_valid() {
            self.head_element = find(&self.tree, self.html_element, "head");
            self.body_element = find(&self.tree, self.html_element, "body");
        }
        tracing::trace!(
            "Document finalized: html={:?} head={:?} body={:?}",
            self.html_element,
            self.head_element,
            self.body_element
        );
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Text of the first <title> in <head>
    pub fn title(&self) -> String {
        if !self.head_element.is_valid() {
            return String::new();
        }
        self.tree
            .element_children(self.head_element)
            .find(|&c| self.tree.element(c).is_some_and(|e| e.tag() == "title"))
            .map(|t| self.tree.text_content(t).trim().to_string())
            .unwrap_or_default()
    }

    /// Get <html> element
    pub fn document_element(&self) -> NodeId {
        self.html_element
    }

    /// Get <head> element
    pub fn head(&self) -> NodeId {
        self.head_element
    }

    /// Get <body> element
    pub fn body(&self) -> NodeId {
        self.body_element
    }

    /// Get element by ID (connected elements only)
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.tree.root())
            .into_iter()
            .find(|&n| self.tree.element(n).and_then(|e| e.id()) == Some(id))
    }

    /// `document.querySelectorAll`
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        Ok(self.tree.query_selector_all(self.tree.root(), &selector))
    }

    /// `document.querySelector`
    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        Ok(self.tree.query_selector(self.tree.root(), &selector))
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new("about:blank")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_structure() {
        let doc = Document::new("test://page");
        assert!(doc.body().is_valid());
        assert_eq!(doc.tree().parent(doc.body()), Some(doc.document_element()));
    }

    #[test]
    fn test_finalize_and_lookup() {
        let mut doc = Document::empty("test://page");
        let tree = doc.tree_mut();
        let html = tree.create_element("html");
        let head = tree.create_element("head");
        let title = tree.create_element("title");
        let body = tree.create_element("body");
        let div = tree.create_element("div");
        tree.append_child(tree.root(), html);
        tree.append_child(html, head);
        tree.append_child(head, title);
        tree.set_text_content(title, " Portfolio ");
        tree.append_child(html, body);
        tree.append_child(body, div);
        tree.set_attr(div, "id", "main");
        doc.finalize();

        assert_eq!(doc.body(), body);
        assert_eq!(doc.title(), "Portfolio");
        assert_eq!(doc.get_element_by_id("main"), Some(div));
        assert_eq!(doc.get_element_by_id("missing"), None);
        assert_eq!(doc.query_selector("body > div").unwrap(), Some(div));
    }
}
