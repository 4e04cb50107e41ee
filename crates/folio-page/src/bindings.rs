//! Element bindings
//!
//! The named page regions the controller works against. Bindings are
//! discovered from a document with the configured selectors, or built by
//! hand; anything absent simply disables the feature that needs it.

use folio_dom::{Document, NodeId, Selector};

use crate::config::SelectorConfig;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageBindings {
    pub body: Option<NodeId>,
    pub navbar: Option<NodeId>,
    pub hamburger: Option<NodeId>,
    pub nav_menu: Option<NodeId>,
    pub nav_links: Vec<NodeId>,
    pub anchors: Vec<NodeId>,
    pub sections: Vec<NodeId>,
    pub hero: Option<NodeId>,
    pub hero_subtitle: Option<NodeId>,
    pub hero_text_children: Vec<NodeId>,
    pub stat_numbers: Vec<NodeId>,
    pub project_cards: Vec<NodeId>,
    pub skill_items: Vec<NodeId>,
    pub tool_items: Vec<NodeId>,
    pub progress_bars: Vec<NodeId>,
    pub contact_form: Option<NodeId>,
    pub submit_button: Option<NodeId>,
}

impl PageBindings {
    /// Resolve every binding against `document`
    pub fn discover(document: &Document, selectors: &SelectorConfig) -> Self {
        let all = |name: &str, text: &str| -> Vec<NodeId> {
            match document.query_selector_all(text) {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!("Ignoring {} binding: {}", name, e);
                    Vec::new()
                }
            }
        };
        let first = |name: &str, text: &str| all(name, text).into_iter().next();

        let contact_form = first("contact_form", &selectors.contact_form);
        let submit_button = contact_form.and_then(|form| {
            let selector = Selector::parse(&selectors.submit_button)
                .map_err(|e| tracing::warn!("Ignoring submit_button binding: {}", e))
                .ok()?;
            document.tree().query_selector(form, &selector)
        });

        let body = document.body().to_option();

        let bindings = Self {
            body,
            navbar: first("navbar", &selectors.navbar),
            hamburger: first("hamburger", &selectors.hamburger),
            nav_menu: first("nav_menu", &selectors.nav_menu),
            nav_links: all("nav_links", &selectors.nav_links),
            anchors: all("anchors", &selectors.anchors),
            sections: all("sections", &selectors.sections),
            hero: first("hero", &selectors.hero),
            hero_subtitle: first("hero_subtitle", &selectors.hero_subtitle),
            hero_text_children: all("hero_text_children", &selectors.hero_text_children),
            stat_numbers: all("stat_numbers", &selectors.stat_numbers),
            project_cards: all("project_cards", &selectors.project_cards),
            skill_items: all("skill_items", &selectors.skill_items),
            tool_items: all("tool_items", &selectors.tool_items),
            progress_bars: all("progress_bars", &selectors.progress_bars),
            contact_form,
            submit_button,
        };

        tracing::debug!(
            "Bound {} sections, {} nav links, {} counters",
            bindings.sections.len(),
            bindings.nav_links.len(),
            bindings.stat_numbers.len()
        );
        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_with_missing_regions() {
        let mut doc = Document::new("about:blank");
        let body = doc.body();
        let tree = doc.tree_mut();
        let nav = tree.create_element("nav");
        tree.set_attr(nav, "id", "navbar");
        tree.append_child(body, nav);
        let section = tree.create_element("section");
        tree.set_attr(section, "id", "home");
        tree.append_child(body, section);

        let bindings = PageBindings::discover(&doc, &SelectorConfig::default());
        assert_eq!(bindings.navbar, Some(nav));
        assert_eq!(bindings.sections, vec![section]);
        assert_eq!(bindings.body, Some(body));
        assert!(bindings.hamburger.is_none());
        assert!(bindings.contact_form.is_none());
        assert!(bindings.submit_button.is_none());
    }

    #[test]
    fn test_invalid_selector_binds_nothing() {
        let doc = Document::new("about:blank");
        let selectors = SelectorConfig {
            navbar: "[".into(),
            ..SelectorConfig::default()
        };
        assert!(PageBindings::discover(&doc, &selectors).navbar.is_none());
    }
}
