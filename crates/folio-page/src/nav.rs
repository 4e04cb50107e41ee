//! Mobile navigation menu
//!
//! The `active` class on the hamburger and the menu panel, and the body
//! scroll lock, all follow the `open` flag.

use folio_dom::{DomTree, NodeId};

use crate::bindings::PageBindings;
use crate::error::SetupError;

#[derive(Debug, Clone)]
pub struct MobileMenu {
    hamburger: NodeId,
    menu: NodeId,
    links: Vec<NodeId>,
    body: Option<NodeId>,
    active_class: String,
    open: bool,
}

impl MobileMenu {
    pub fn setup(bindings: &PageBindings, active_class: &str) -> Result<Self, SetupError> {
        let hamburger = bindings.hamburger.ok_or(SetupError::MissingElement("hamburger"))?;
        let menu = bindings.nav_menu.ok_or(SetupError::MissingElement("nav menu"))?;
        Ok(Self {
            hamburger,
            menu,
            links: bindings.nav_links.clone(),
            body: bindings.body,
            active_class: active_class.to_string(),
            open: false,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self, tree: &mut DomTree) {
        if self.open {
            self.close(tree);
        } else {
            self.open(tree);
        }
    }

    pub fn open(&mut self, tree: &mut DomTree) {
        self.open = true;
        tree.add_class(self.hamburger, &self.active_class);
        tree.add_class(self.menu, &self.active_class);
        if let Some(body) = self.body {
            tree.set_style(body, "overflow", "hidden");
        }
        tracing::debug!("Menu opened");
    }

    /// Close the menu; closing a closed menu changes nothing
    pub fn close(&mut self, tree: &mut DomTree) {
        let was_open = std::mem::replace(&mut self.open, false);
        tree.remove_class(self.hamburger, &self.active_class);
        tree.remove_class(self.menu, &self.active_class);
        if let Some(body) = self.body {
            tree.remove_style(body, "overflow");
        }
        if was_open {
            tracing::debug!("Menu closed");
        }
    }

    /// Route a click; returns true if it touched the menu
    pub fn handle_click(&mut self, tree: &mut DomTree, target: NodeId) -> bool {
        if tree.contains(self.hamburger, target) {
            self.toggle(tree);
            return true;
        }
        if self.links.iter().any(|&link| tree.contains(link, target)) {
            self.close(tree);
            return true;
        }
        if self.open && !tree.contains(self.menu, target) {
            self.close(tree);
            return true;
        }
        false
    }

    /// Escape closes an open menu
    pub fn handle_key(&mut self, tree: &mut DomTree, key: &str) -> bool {
        if key == "Escape" && self.open {
            self.close(tree);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::Document;

    struct Fixture {
        doc: Document,
        menu: MobileMenu,
        hamburger: NodeId,
        panel: NodeId,
        link: NodeId,
        outside: NodeId,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new("about:blank");
        let body = doc.body();
        let tree = doc.tree_mut();

        let hamburger = tree.create_element("div");
        let panel = tree.create_element("ul");
        let link = tree.create_element("a");
        let outside = tree.create_element("p");
        tree.append_child(body, hamburger);
        tree.append_child(body, panel);
        tree.append_child(panel, link);
        tree.append_child(body, outside);

        let bindings = PageBindings {
            body: Some(body),
            hamburger: Some(hamburger),
            nav_menu: Some(panel),
            nav_links: vec![link],
            ..PageBindings::default()
        };
        let menu = MobileMenu::setup(&bindings, "active").unwrap();
        Fixture { doc, menu, hamburger, panel, link, outside }
    }

    #[test]
    fn test_toggle_locks_body() {
        let mut f = fixture();
        let body = f.doc.body();
        let tree = f.doc.tree_mut();

        assert!(f.menu.handle_click(tree, f.hamburger));
        assert!(tree.has_class(f.hamburger, "active"));
        assert!(tree.has_class(f.panel, "active"));
        assert_eq!(tree.style(body, "overflow"), Some("hidden"));

        f.menu.handle_click(tree, f.hamburger);
        assert!(!f.menu.is_open());
        assert_eq!(tree.style(body, "overflow"), None);
    }

    #[test]
    fn test_close_paths() {
        let mut f = fixture();
        let tree = f.doc.tree_mut();

        f.menu.open(tree);
        f.menu.handle_click(tree, f.link);
        assert!(!f.menu.is_open());

        f.menu.open(tree);
        f.menu.handle_click(tree, f.outside);
        assert!(!f.menu.is_open());

        f.menu.open(tree);
        assert!(!f.menu.handle_key(tree, "Enter"));
        assert!(f.menu.handle_key(tree, "Escape"));
        assert!(!f.menu.is_open());
    }

    #[test]
    fn test_inside_click_keeps_open() {
        let mut f = fixture();
        let tree = f.doc.tree_mut();
        f.menu.open(tree);
        assert!(!f.menu.handle_click(tree, f.panel));
        assert!(f.menu.is_open());
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut f = fixture();
        let body = f.doc.body();
        let tree = f.doc.tree_mut();

        f.menu.close(tree);
        let first = (
            tree.element(f.panel).unwrap().attr("class").map(str::to_string),
            tree.element(body).unwrap().style_text(),
        );
        f.menu.close(tree);
        let second = (
            tree.element(f.panel).unwrap().attr("class").map(str::to_string),
            tree.element(body).unwrap().style_text(),
        );
        assert_eq!(first, second);
        assert!(!f.menu.handle_key(tree, "Escape"));
    }

    #[test]
    fn test_missing_hamburger() {
        let bindings = PageBindings::default();
        assert_eq!(
            MobileMenu::setup(&bindings, "active").unwrap_err(),
            SetupError::MissingElement("hamburger")
        );
    }
}
