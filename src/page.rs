//! Page capabilities: the document and window operations behaviors may use.
//!
//! `Page` covers what the behaviors read and write and nothing more. Writes
//! that fail in the browser are logged by the host and otherwise ignored.

use crate::selector::Selector;

/// Opaque handle to an element, stable for the lifetime of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Where a listener is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Window,
    Document,
    Node(NodeId),
}

/// A box in viewport coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Layout metrics of one element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Metrics {
    /// `getBoundingClientRect()`.
    pub rect: Rect,
    /// `offsetTop`, relative to the document.
    pub offset_top: f64,
    /// `offsetHeight`.
    pub offset_height: f64,
    /// `scrollHeight` of the content.
    pub scroll_height: f64,
}

/// Document and window operations available to behaviors.
pub trait Page {
    // --- Queries ---

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &Selector) -> Vec<NodeId>;

    /// Elements under `root` (excluding `root`) matching `selector`, in document order.
    fn query_within(&self, root: NodeId, selector: &Selector) -> Vec<NodeId>;

    /// First element matching `selector`.
    fn query(&self, selector: &Selector) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }

    /// Element with the given `id` attribute.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Parent element, or `None` for the root and detached nodes.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    fn head(&self) -> Option<NodeId>;
    fn body(&self) -> Option<NodeId>;

    // --- Element state ---

    /// Lowercase tag name.
    fn tag(&self, node: NodeId) -> String;
    fn attr(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_attr(&mut self, node: NodeId, name: &str, value: &str);
    fn remove_attr(&mut self, node: NodeId, name: &str);

    fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Inline style property, if set.
    fn style(&self, node: NodeId, property: &str) -> Option<String>;
    /// Set an inline style property. An empty value removes it.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    fn text(&self, node: NodeId) -> String;
    /// Replace all children with a single text node.
    fn set_text(&mut self, node: NodeId, text: &str);
    /// Append a text node after the existing children.
    fn append_text(&mut self, node: NodeId, text: &str);

    /// Current value of a form control; empty for other elements.
    fn value(&self, node: NodeId) -> String;
    /// The control's `type`, lowercased, or an empty string.
    fn input_type(&self, node: NodeId) -> String;
    fn set_disabled(&mut self, node: NodeId, disabled: bool);

    fn focus(&mut self, node: NodeId);

    // --- Tree mutation ---

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;
    fn append_child(&mut self, parent: NodeId, child: NodeId);
    /// Insert `node` as the next sibling of `reference`.
    fn insert_after(&mut self, reference: NodeId, node: NodeId);
    /// Detach `node` from the tree.
    fn remove(&mut self, node: NodeId);

    // --- Layout ---

    fn metrics(&self, node: NodeId) -> Metrics;

    // --- Window ---

    fn scroll_y(&self) -> f64;
    fn inner_width(&self) -> f64;
    /// Smooth-scroll the window to document offset `top`.
    fn scroll_to(&mut self, top: f64);
    /// `location.pathname`.
    fn pathname(&self) -> String;
    /// `location.hash`, including the leading `#`, or empty.
    fn hash(&self) -> String;
    fn navigate(&mut self, href: &str);
}
