//! Selectors
//!
//! The subset of CSS selectors the page engine needs: type, universal, `#id`,
//! `.class`, attribute presence / equality / prefix, joined by descendant
//! (whitespace) or child (`>`) combinators.

use crate::{DomError, DomTree, ElementData, NodeId};

/// Attribute condition inside `[...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrMatcher {
    /// `[name]`
    Exists(String),
    /// `[name=value]`
    Equals(String, String),
    /// `[name^=value]`
    Prefix(String, String),
}

impl AttrMatcher {
    fn matches(&self, el: &ElementData) -> bool {
        match self {
            Self::Exists(name) => el.has_attr(name),
            Self::Equals(name, value) => el.attr(name) == Some(value.as_str()),
            Self::Prefix(name, value) => el.attr(name).is_some_and(|v| v.starts_with(value.as_str())),
        }
    }
}

/// Compound selector: all parts must match the same element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrMatcher>,
}

impl CompoundSelector {
    pub fn matches(&self, el: &ElementData) -> bool {
        if let Some(tag) = &self.tag {
            if !el.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.id() != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| el.has_class(c)) && self.attrs.iter().all(|a| a.matches(el))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

/// Complex selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<CompoundSelector>,
    /// `combinators[i]` joins `compounds[i]` and `compounds[i + 1]`
    combinators: Vec<Combinator>,
}

impl Selector {
    /// Parse a selector string
    pub fn parse(input: &str) -> Result<Self, DomError> {
        let err = |reason: &str| DomError::InvalidSelector {
            selector: input.to_string(),
            reason: reason.to_string(),
        };

        let mut compounds = Vec::new();
        let mut combinators = Vec::new();
        let mut pending: Option<Combinator> = None;
        let mut chars = input.trim().chars().peekable();

        while let Some(&c) = chars.peek() {
            if c.is_whitespace() {
                chars.next();
                if pending.is_none() && !compounds.is_empty() {
                    pending = Some(Combinator::Descendant);
                }
                continue;
            }
            if c == '>' {
                chars.next();
                if compounds.is_empty() {
                    return Err(err("leading combinator"));
                }
                pending = Some(Combinator::Child);
                continue;
            }

            let compound = parse_compound(&mut chars).map_err(|r| err(r.as_str()))?;
            if !compounds.is_empty() {
                combinators.push(pending.take().ok_or_else(|| err("missing combinator"))?);
            }
            pending = None;
            compounds.push(compound);
        }

        if compounds.is_empty() {
            return Err(err("empty selector"));
        }
        if pending == Some(Combinator::Child) {
            return Err(err("trailing combinator"));
        }
        Ok(Self { compounds, combinators })
    }

    /// Check if the node matches
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.match_at(tree, id, self.compounds.len() - 1)
    }

    fn match_at(&self, tree: &DomTree, id: NodeId, index: usize) -> bool {
        let Some(el) = tree.element(id) else {
            return false;
        };
        if !self.compounds[index].matches(el) {
            return false;
        }
        if index == 0 {
            return true;
        }
        match self.combinators[index - 1] {
            Combinator::Child => tree
                .parent(id)
                .is_some_and(|p| self.match_at(tree, p, index - 1)),
            Combinator::Descendant => tree
                .ancestors(id)
                .any(|a| self.match_at(tree, a, index - 1)),
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut out = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        out.push(c);
        chars.next();
    }
    out
}

fn parse_compound(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<CompoundSelector, String> {
    let mut compound = CompoundSelector::default();
    let mut any = false;

    while let Some(&c) = chars.peek() {
        match c {
            '*' => {
                chars.next();
            }
            '#' => {
                chars.next();
                let id = take_ident(chars);
                if id.is_empty() {
                    return Err("empty id".into());
                }
                compound.id = Some(id);
            }
            '.' => {
                chars.next();
                let class = take_ident(chars);
                if class.is_empty() {
                    return Err("empty class".into());
                }
                compound.classes.push(class);
            }
            '[' => {
                chars.next();
                compound.attrs.push(parse_attr(chars)?);
            }
            c if is_ident_char(c) => {
                if compound.tag.is_some() || any {
                    return Err("type selector must come first".into());
                }
                compound.tag = Some(take_ident(chars).to_ascii_lowercase());
            }
            _ => break,
        }
        any = true;
    }

    if !any {
        return Err(format!("unexpected character {:?}", chars.peek()));
    }
    Ok(compound)
}

fn parse_attr(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<AttrMatcher, String> {
    let mut body = String::new();
    for c in chars.by_ref() {
        if c == ']' {
            return attr_from_body(&body);
        }
        body.push(c);
    }
    Err("unterminated attribute selector".into())
}

fn attr_from_body(body: &str) -> Result<AttrMatcher, String> {
    let unquote = |v: &str| v.trim().trim_matches(|q: char| q == '"' || q == '\'').to_string();

    if let Some((name, value)) = body.split_once("^=") {
        return Ok(AttrMatcher::Prefix(name.trim().to_ascii_lowercase(), unquote(value)));
    }
    if let Some((name, value)) = body.split_once('=') {
        return Ok(AttrMatcher::Equals(name.trim().to_ascii_lowercase(), unquote(value)));
    }
    let name = body.trim();
    if name.is_empty() {
        return Err("empty attribute selector".into());
    }
    Ok(AttrMatcher::Exists(name.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compound() {
        let sel = Selector::parse("button[type=\"submit\"].primary").unwrap();
        assert_eq!(sel.compounds.len(), 1);
        let c = &sel.compounds[0];
        assert_eq!(c.tag.as_deref(), Some("button"));
        assert_eq!(c.classes, vec!["primary".to_string()]);
        assert_eq!(c.attrs, vec![AttrMatcher::Equals("type".into(), "submit".into())]);
    }

    #[test]
    fn test_parse_combinators() {
        let sel = Selector::parse(".hero-text > *").unwrap();
        assert_eq!(sel.combinators, vec![Combinator::Child]);

        let sel = Selector::parse("section  .stat-number").unwrap();
        assert_eq!(sel.combinators, vec![Combinator::Descendant]);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Selector::parse("").is_err());
        assert!(Selector::parse("> a").is_err());
        assert!(Selector::parse("a >").is_err());
        assert!(Selector::parse("a[href").is_err());
        assert!(Selector::parse("#").is_err());
    }

    #[test]
    fn test_matching() {
        let mut tree = DomTree::new();
        let nav = tree.create_element("nav");
        tree.set_attr(nav, "id", "navbar");
        let link = tree.create_element("a");
        tree.set_attr(link, "class", "nav-link");
        tree.set_attr(link, "href", "#about");
        tree.append_child(tree.root(), nav);
        tree.append_child(nav, link);

        assert!(tree.matches(link, &Selector::parse("a[href^='#']").unwrap()));
        assert!(tree.matches(link, &Selector::parse("#navbar .nav-link").unwrap()));
        assert!(tree.matches(link, &Selector::parse("nav > a").unwrap()));
        assert!(!tree.matches(link, &Selector::parse("section a").unwrap()));
        assert!(!tree.matches(link, &Selector::parse("a[href='#home']").unwrap()));
        assert_eq!(tree.closest(link, &Selector::parse("#navbar").unwrap()), Some(nav));
    }
}
