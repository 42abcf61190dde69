use std::fmt;

/// A node in a rendered page view.
///
/// Only elements are mountable; a render function that produces a bare
/// text node is treated as a render failure by the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewNode {
    /// An element with a tag, attributes and children.
    Element(Element),
    /// A text node.
    Text(String),
}

impl ViewNode {
    /// Creates a text node.
    pub fn text(value: impl Into<String>) -> Self {
        ViewNode::Text(value.into())
    }

    /// Returns `true` if this node is an element.
    pub fn is_element(&self) -> bool {
        matches!(self, ViewNode::Element(_))
    }

    /// Returns the element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            ViewNode::Element(element) => Some(element),
            ViewNode::Text(_) => None,
        }
    }

    /// Renders the node to a plain string, for logging and assertions.
    pub fn render_to_string(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        match self {
            ViewNode::Text(text) => out.push_str(text),
            ViewNode::Element(element) => element.write_to(out),
        }
    }
}

impl From<Element> for ViewNode {
    fn from(element: Element) -> Self {
        ViewNode::Element(element)
    }
}

/// An element in a page view.
#[derive(Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<ViewNode>,
}

impl Element {
    /// Creates an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Appends a child node.
    pub fn child(mut self, node: impl Into<ViewNode>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Appends a text child.
    pub fn text(self, value: impl Into<String>) -> Self {
        self.child(ViewNode::Text(value.into()))
    }

    /// Returns the element's tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the value of the first attribute with the given name.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the element's children.
    pub fn children(&self) -> &[ViewNode] {
        &self.children
    }

    /// Depth-first search for the first descendant (or self) with the
    /// given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.children
            .iter()
            .filter_map(ViewNode::as_element)
            .find_map(|child| child.find(tag))
    }

    /// Returns the concatenated text content of the element's subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                ViewNode::Text(text) => out.push_str(text),
                ViewNode::Element(element) => element.collect_text(out),
            }
        }
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&ViewNode::Element(self.clone()).render_to_string())
    }
}

/// The mount target the router renders into.
///
/// Mounting fully replaces the previous contents, so the container holds
/// at most one view at a time.
pub trait ViewHost {
    /// Replaces the container's contents with the given view.
    fn mount(&mut self, view: ViewNode);
}

/// The application's root container.
///
/// After any settled navigation it holds exactly one view: either the
/// requested page or an error view.
#[derive(Debug, Default)]
pub struct RootContainer {
    view: Option<ViewNode>,
}

impl RootContainer {
    /// Creates an empty container.
    pub fn new() -> Self {
        RootContainer::default()
    }

    /// Returns the mounted view, if any.
    pub fn view(&self) -> Option<&ViewNode> {
        self.view.as_ref()
    }

    /// Returns `true` if nothing has been mounted yet.
    pub fn is_empty(&self) -> bool {
        self.view.is_none()
    }
}

impl ViewHost for RootContainer {
    fn mount(&mut self, view: ViewNode) {
        self.view = Some(view);
    }
}
