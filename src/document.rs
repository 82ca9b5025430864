//! Owned GPX document tree.
//!
//! The converter builds one [`Document`] per call and hands it to the caller,
//! who can inspect it or serialize it with [`crate::writer`].

/// GPX 1.1 namespace, shared by every element of the document.
pub const GPX_NAMESPACE: &str = "http://www.topografix.com/GPX/1/1";

/// The `<?xml ...?>` declaration heading the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
        }
    }
}

/// A document: declaration plus a single root element in one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub declaration: Declaration,
    pub namespace: String,
    root: Element,
}

impl Document {
    pub fn new(namespace: impl Into<String>, root: Element) -> Self {
        Self {
            declaration: Declaration::default(),
            namespace: namespace.into(),
            root,
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }
}

/// An element node.
///
/// A node carries either text or child elements, never both: text is only
/// set through [`Element::leaf`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: Option<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Create a text-only element such as `<name>Camp</name>`.
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(name)
        }
    }

    /// Set an attribute, replacing any previous value under the same name.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn append_child(&mut self, child: Element) {
        debug_assert!(self.text.is_none(), "<{}> already holds text", self.name);
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Text of the first child with the given tag name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(Element::text)
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.is_none()
    }
}
