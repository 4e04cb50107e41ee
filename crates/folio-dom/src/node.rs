//! DOM Node
//!
//! Nodes link to each other through [`NodeId`]s instead of pointers, so the
//! whole tree lives in one `Vec` and handles stay `Copy`.

use crate::NodeId;

/// DOM Node - Core structure
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if detached or root)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Node-specific data
    pub data: NodeData,
}

impl Node {
    fn with_data(data: NodeData) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            data,
        }
    }

    /// Create a new element node
    pub fn element(tag: &str) -> Self {
        Self::with_data(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a new text node
    pub fn text(content: String) -> Self {
        Self::with_data(NodeData::Text(content))
    }

    /// Create a comment node
    pub fn comment(content: String) -> Self {
        Self::with_data(NodeData::Comment(content))
    }

    /// Create a document node
    pub fn document() -> Self {
        Self::with_data(NodeData::Document)
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    /// Check if this is text
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    /// Get element data if this is an element
    #[inline]
    pub fn as_element(&self) -> Option<&ElementData> {
        match &self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get mutable element data
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get text content if this is a text node
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Node-specific data
#[derive(Debug)]
pub enum NodeData {
    /// Document root
    Document,
    /// Element
    Element(ElementData),
    /// Text content
    Text(String),
    /// Comment
    Comment(String),
}

/// Element-specific data
///
/// `class` and `style` are kept both as parsed lists and as attribute text;
/// every mutation goes through the methods below so the two never diverge.
#[derive(Debug, Clone)]
pub struct ElementData {
    tag: String,
    attrs: Vec<(String, String)>,
    classes: Vec<String>,
    style: Vec<(String, String)>,
    /// Dirty value of a form control (None = use the default value)
    value: Option<String>,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            classes: Vec::new(),
            style: Vec::new(),
            value: None,
        }
    }

    /// Lowercase tag name
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The `id` attribute
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Iterate attributes in insertion order
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Set an attribute
    pub fn set_attr(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        match name.as_str() {
            "class" => {
                self.classes = value.split_whitespace().map(str::to_string).collect();
                dedup_in_order(&mut self.classes);
            }
            "style" => self.style = parse_declarations(value),
            _ => {}
        }
        self.write_attr(name, value.to_string());
    }

    /// Remove an attribute, returning its old value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|(k, _)| k.eq_ignore_ascii_case(name))?;
        let (key, old) = self.attrs.remove(pos);
        match key.as_str() {
            "class" => self.classes.clear(),
            "style" => self.style.clear(),
            _ => {}
        }
        Some(old)
    }

    fn write_attr(&mut self, name: String, value: String) {
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    // ------------------------------------------------------------------
    // classList
    // ------------------------------------------------------------------

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. Returns true if the list changed.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        self.classes.push(class.to_string());
        self.sync_class_attr();
        true
    }

    /// Remove a class. Returns true if the list changed.
    pub fn remove_class(&mut self, class: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        if self.classes.len() == before {
            return false;
        }
        self.sync_class_attr();
        true
    }

    /// Toggle a class, returns whether it is now present
    pub fn toggle_class(&mut self, class: &str, force: Option<bool>) -> bool {
        let present = force.unwrap_or(!self.has_class(class));
        if present {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
        present
    }

    fn sync_class_attr(&mut self) {
        let text = self.classes.join(" ");
        self.write_attr("class".to_string(), text);
    }

    // ------------------------------------------------------------------
    // Inline style
    // ------------------------------------------------------------------

    /// Get an inline style property
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.as_str())
    }

    /// Set an inline style property
    pub fn set_style(&mut self, property: &str, value: &str) {
        if let Some(slot) = self.style.iter_mut().find(|(k, _)| k == property) {
            if slot.1 == value {
                return;
            }
            slot.1 = value.to_string();
        } else {
            self.style.push((property.to_string(), value.to_string()));
        }
        self.sync_style_attr();
    }

    /// Remove an inline style property
    pub fn remove_style(&mut self, property: &str) -> Option<String> {
        let pos = self.style.iter().position(|(k, _)| k == property)?;
        let (_, old) = self.style.remove(pos);
        self.sync_style_attr();
        Some(old)
    }

    /// Serialized inline style (`cssText`)
    pub fn style_text(&self) -> String {
        self.style
            .iter()
            .map(|(k, v)| format!("{k}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn sync_style_attr(&mut self) {
        if self.style.is_empty() {
            self.attrs.retain(|(k, _)| k != "style");
        } else {
            let text = self.style_text();
            self.write_attr("style".to_string(), text);
        }
    }

    // ------------------------------------------------------------------
    // Form control state
    // ------------------------------------------------------------------

    /// Dirty value, if the control was edited
    pub fn dirty_value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_dirty_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    pub fn is_disabled(&self) -> bool {
        self.has_attr("disabled")
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        if disabled {
            self.write_attr("disabled".to_string(), String::new());
        } else {
            self.remove_attr("disabled");
        }
    }
}

fn dedup_in_order(list: &mut Vec<String>) {
    let mut seen = Vec::with_capacity(list.len());
    list.retain(|c| {
        if seen.contains(c) {
            false
        } else {
            seen.push(c.clone());
            true
        }
    });
}

/// Parse `a: b; c: d` into ordered pairs
fn parse_declarations(text: &str) -> Vec<(String, String)> {
    text.split(';')
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            let (k, v) = (k.trim(), v.trim());
            (!k.is_empty()).then(|| (k.to_ascii_lowercase(), v.to_string()))
        })
        .collect()
}
