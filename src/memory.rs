//! In-memory page.
//!
//! `MemoryPage` is an arena of element and text nodes plus the bits of window
//! state behaviors read (scroll offset, width, location). Layout is not
//! computed: each element carries a [`Layout`] in document coordinates that
//! tests set directly, and `metrics` derives viewport rects from it and the
//! current scroll offset.
//!
//! Side effects that leave the page (navigation, scroll requests, focus) are
//! recorded so tests can assert on them.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::collections::BTreeMap;
use std::fmt;

use selectors::OpaqueElement;
use selectors::attr::{AttrSelectorOperation, CaseSensitivity, NamespaceConstraint};
use selectors::matching::{ElementSelectorFlags, MatchingContext};

use crate::page::{Metrics, NodeId, Page, Rect};
use crate::selector::{Ident, NoPseudoClass, NoPseudoElement, PageSelectors, Selector};

/// Element geometry in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layout {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    pub scroll_height: f64,
}

#[derive(Debug, Clone)]
enum Kind {
    Element {
        tag: String,
        attrs: BTreeMap<String, String>,
        style: BTreeMap<String, String>,
        value: String,
        layout: Layout,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: Kind,
}

/// Borrowed element view used for selector matching.
#[derive(Clone, Copy)]
struct ElementRef<'a> {
    page: &'a MemoryPage,
    id: NodeId,
    node: &'a Node,
    tag: &'a str,
    attrs: &'a BTreeMap<String, String>,
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

impl<'a> ElementRef<'a> {
    fn new(page: &'a MemoryPage, id: NodeId) -> Option<Self> {
        let node = page.nodes.get(id.0)?;
        match &node.kind {
            Kind::Element { tag, attrs, .. } => Some(Self { page, id, node, tag, attrs }),
            Kind::Text(_) => None,
        }
    }

    fn attr_value(&self, name: &str) -> Option<&'a str> {
        self.attrs.get(name).map(String::as_str)
    }

    fn parent(&self) -> Option<Self> {
        Self::new(self.page, self.node.parent?)
    }

    /// Element siblings, self included, in document order.
    fn siblings(&self) -> impl Iterator<Item = Self> + 'a {
        let page = self.page;
        let ids = self.parent().map_or(&[][..], |p| p.node.children.as_slice());
        ids.iter().filter_map(move |id| Self::new(page, *id))
    }
}

impl selectors::Element for ElementRef<'_> {
    type Impl = PageSelectors;

    fn opaque(&self) -> OpaqueElement {
        OpaqueElement::new(self.node)
    }

    fn parent_element(&self) -> Option<Self> {
        self.parent()
    }

    fn parent_node_is_shadow_root(&self) -> bool {
        false
    }

    fn containing_shadow_host(&self) -> Option<Self> {
        None
    }

    fn is_pseudo_element(&self) -> bool {
        false
    }

    fn prev_sibling_element(&self) -> Option<Self> {
        self.siblings().take_while(|s| s.id != self.id).last()
    }

    fn next_sibling_element(&self) -> Option<Self> {
        self.siblings().skip_while(|s| s.id != self.id).nth(1)
    }

    fn first_element_child(&self) -> Option<Self> {
        self.node.children.iter().find_map(|id| Self::new(self.page, *id))
    }

    fn is_html_element_in_html_document(&self) -> bool {
        true
    }

    fn has_local_name(&self, local_name: &Ident) -> bool {
        self.tag == local_name.0
    }

    fn has_namespace(&self, ns: &Ident) -> bool {
        ns.0.is_empty()
    }

    fn is_same_type(&self, other: &Self) -> bool {
        self.tag == other.tag
    }

    fn attr_matches(
        &self,
        ns: &NamespaceConstraint<&Ident>,
        local_name: &Ident,
        operation: &AttrSelectorOperation<&Ident>,
    ) -> bool {
        if matches!(ns, NamespaceConstraint::Specific(url) if !url.0.is_empty()) {
            return false;
        }
        self.attr_value(&local_name.0).is_some_and(|value| operation.eval_str(value))
    }

    fn match_non_ts_pseudo_class(&self, pc: &NoPseudoClass, _context: &mut MatchingContext<'_, PageSelectors>) -> bool {
        match *pc {}
    }

    fn match_pseudo_element(&self, pe: &NoPseudoElement, _context: &mut MatchingContext<'_, PageSelectors>) -> bool {
        match *pe {}
    }

    fn apply_selector_flags(&self, _flags: ElementSelectorFlags) {}

    fn is_link(&self) -> bool {
        matches!(self.tag, "a" | "area") && self.attrs.contains_key("href")
    }

    fn is_html_slot_element(&self) -> bool {
        self.tag == "slot"
    }

    fn has_id(&self, id: &Ident, case_sensitivity: CaseSensitivity) -> bool {
        self.attr_value("id")
            .is_some_and(|own| case_sensitivity.eq(own.as_bytes(), id.0.as_bytes()))
    }

    fn has_class(&self, name: &Ident, case_sensitivity: CaseSensitivity) -> bool {
        self.attr_value("class").is_some_and(|list| {
            list.split_whitespace()
                .any(|class| case_sensitivity.eq(class.as_bytes(), name.0.as_bytes()))
        })
    }

    fn imported_part(&self, _name: &Ident) -> Option<Ident> {
        None
    }

    fn is_part(&self, _name: &Ident) -> bool {
        false
    }

    fn is_empty(&self) -> bool {
        self.node.children.iter().all(|id| match self.page.nodes.get(id.0).map(|n| &n.kind) {
            Some(Kind::Element { .. }) => false,
            Some(Kind::Text(text)) => text.is_empty(),
            None => true,
        })
    }

    fn is_root(&self) -> bool {
        self.id == self.page.root
    }
}

#[derive(Debug, Clone)]
pub struct MemoryPage {
    nodes: Vec<Node>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
    scroll_y: f64,
    inner_width: f64,
    pathname: String,
    hash: String,
    focused: Option<NodeId>,
    navigations: Vec<String>,
    scroll_requests: Vec<f64>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// An empty `<html>` with `<head>` and `<body>`, 1024px wide, at `/`.
    #[must_use]
    pub fn new() -> Self {
        let mut page = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            head: NodeId(0),
            body: NodeId(0),
            scroll_y: 0.0,
            inner_width: 1024.0,
            pathname: "/".to_owned(),
            hash: String::new(),
            focused: None,
            navigations: Vec::new(),
            scroll_requests: Vec::new(),
        };
        page.root = page.new_element("html");
        page.head = page.new_element("head");
        page.body = page.new_element("body");
        page.attach(page.root, page.head);
        page.attach(page.root, page.body);
        page
    }

    // --- Building ---

    /// Append a new element under `parent` and return a builder for it.
    pub fn append(&mut self, parent: NodeId, tag: &str) -> Builder<'_> {
        let id = self.new_element(tag);
        self.attach(parent, id);
        Builder { page: self, id }
    }

    fn new_element(&mut self, tag: &str) -> NodeId {
        self.push(Kind::Element {
            tag: tag.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            style: BTreeMap::new(),
            value: String::new(),
            layout: Layout::default(),
        })
    }

    fn push(&mut self, kind: Kind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent: None, children: Vec::new(), kind });
        id
    }

    /// Ids outside the arena are ignored.
    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if parent.0 >= self.nodes.len() || child.0 >= self.nodes.len() {
            return;
        }
        self.detach(child);
        if let Some(n) = self.nodes.get_mut(child.0) {
            n.parent = Some(parent);
        }
        if let Some(n) = self.nodes.get_mut(parent.0) {
            n.children.push(child);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get_mut(node.0).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(n) = self.nodes.get_mut(parent.0) {
            n.children.retain(|c| *c != node);
        }
    }

    pub fn set_layout(&mut self, node: NodeId, layout: Layout) {
        if let Some(Node { kind: Kind::Element { layout: l, .. }, .. }) = self.nodes.get_mut(node.0) {
            *l = layout;
        }
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(Node { kind: Kind::Element { value: v, .. }, .. }) = self.nodes.get_mut(node.0) {
            value.clone_into(v);
        }
    }

    pub fn set_scroll_y(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    pub fn set_inner_width(&mut self, width: f64) {
        self.inner_width = width;
    }

    pub fn set_location(&mut self, pathname: &str, hash: &str) {
        pathname.clone_into(&mut self.pathname);
        hash.clone_into(&mut self.hash);
    }

    // --- Inspection ---

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Element children of `node`, in order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.get(node.0).map_or_else(Vec::new, |n| {
            n.children
                .iter()
                .copied()
                .filter(|c| self.element(*c).is_some())
                .collect()
        })
    }

    /// Whether `node` is reachable from the root.
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Every `navigate` call, oldest first.
    #[must_use]
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    /// Target offset of every `scroll_to` call, oldest first.
    #[must_use]
    pub fn scroll_requests(&self) -> &[f64] {
        &self.scroll_requests
    }

    fn element(&self, node: NodeId) -> Option<ElementRef<'_>> {
        ElementRef::new(self, node)
    }

    fn child_ids(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(node.0).map_or(&[], |n| n.children.as_slice())
    }

    fn attrs_mut(&mut self, node: NodeId) -> Option<&mut BTreeMap<String, String>> {
        match &mut self.nodes.get_mut(node.0)?.kind {
            Kind::Element { attrs, .. } => Some(attrs),
            Kind::Text(_) => None,
        }
    }

    fn layout(&self, node: NodeId) -> Layout {
        match self.nodes.get(node.0).map(|n| &n.kind) {
            Some(Kind::Element { layout, .. }) => *layout,
            _ => Layout::default(),
        }
    }

    /// Descendants of `root` in pre-order, excluding `root`.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.child_ids(root).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.child_ids(id).iter().rev().copied());
        }
        out
    }

    fn matching(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| self.element(*id).is_some_and(|el| selector.matches(&el)))
            .collect()
    }
}

impl Page for MemoryPage {
    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        let mut out = self.matching(self.root, selector);
        if self.element(self.root).is_some_and(|el| selector.matches(&el)) {
            out.insert(0, self.root);
        }
        out
    }

    fn query_within(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        if root.0 >= self.nodes.len() {
            return Vec::new();
        }
        self.matching(root, selector)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.element(*n).and_then(|el| el.attr_value("id")) == Some(id))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.parent(id);
        }
        false
    }

    fn head(&self) -> Option<NodeId> {
        Some(self.head)
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn tag(&self, node: NodeId) -> String {
        self.element(node).map(|el| el.tag.to_owned()).unwrap_or_default()
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.attr_value(name).map(str::to_owned)
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(attrs) = self.attrs_mut(node) {
            attrs.insert(name.to_owned(), value.to_owned());
        }
    }

    fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(attrs) = self.attrs_mut(node) {
            attrs.remove(name);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .and_then(|el| el.attr_value("class"))
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        if let Some(attrs) = self.attrs_mut(node) {
            let list = attrs.entry("class".to_owned()).or_default();
            if !list.is_empty() {
                list.push(' ');
            }
            list.push_str(class);
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(attrs) = self.attrs_mut(node) {
            if let Some(list) = attrs.get_mut("class") {
                *list = list
                    .split_whitespace()
                    .filter(|c| *c != class)
                    .collect::<Vec<_>>()
                    .join(" ");
            }
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        match &self.nodes.get(node.0)?.kind {
            Kind::Element { style, .. } => style.get(property).cloned(),
            Kind::Text(_) => None,
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(Node { kind: Kind::Element { style, .. }, .. }) = self.nodes.get_mut(node.0) {
            if value.is_empty() {
                style.remove(property);
            } else {
                style.insert(property.to_owned(), value.to_owned());
            }
        }
    }

    fn text(&self, node: NodeId) -> String {
        let mut out = String::new();
        for id in self.descendants(node) {
            if let Some(Node { kind: Kind::Text(t), .. }) = self.nodes.get(id.0) {
                out.push_str(t);
            }
        }
        out
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if self.element(node).is_none() {
            return;
        }
        for child in self.child_ids(node).to_vec() {
            self.detach(child);
        }
        self.append_text(node, text);
    }

    fn append_text(&mut self, node: NodeId, text: &str) {
        if self.element(node).is_none() {
            return;
        }
        let id = self.push(Kind::Text(text.to_owned()));
        self.attach(node, id);
    }

    fn value(&self, node: NodeId) -> String {
        match self.nodes.get(node.0).map(|n| &n.kind) {
            Some(Kind::Element { value, .. }) => value.clone(),
            _ => String::new(),
        }
    }

    fn input_type(&self, node: NodeId) -> String {
        let Some(el) = self.element(node) else {
            return String::new();
        };
        match el.tag {
            "input" => el
                .attr_value("type")
                .map_or_else(|| "text".to_owned(), str::to_ascii_lowercase),
            "textarea" => "textarea".to_owned(),
            "select" => "select-one".to_owned(),
            "button" => el
                .attr_value("type")
                .map_or_else(|| "submit".to_owned(), str::to_ascii_lowercase),
            _ => String::new(),
        }
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if disabled {
            self.set_attr(node, "disabled", "");
        } else {
            self.remove_attr(node, "disabled");
        }
    }

    fn focus(&mut self, node: NodeId) {
        self.focused = Some(node);
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.new_element(tag)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent != child && !self.contains(child, parent) {
            self.attach(parent, child);
        }
    }

    fn insert_after(&mut self, reference: NodeId, node: NodeId) {
        let Some(parent) = self.parent(reference) else {
            return;
        };
        if node == reference || node.0 >= self.nodes.len() || self.contains(node, parent) {
            return;
        }
        self.detach(node);
        if let Some(n) = self.nodes.get_mut(parent.0) {
            let at = n.children.iter().position(|c| *c == reference).map_or(n.children.len(), |i| i + 1);
            n.children.insert(at, node);
        }
        if let Some(n) = self.nodes.get_mut(node.0) {
            n.parent = Some(parent);
        }
    }

    fn remove(&mut self, node: NodeId) {
        self.detach(node);
    }

    fn metrics(&self, node: NodeId) -> Metrics {
        let layout = self.layout(node);
        Metrics {
            rect: Rect {
                top: layout.top - self.scroll_y,
                left: layout.left,
                width: layout.width,
                height: layout.height,
            },
            offset_top: layout.top,
            offset_height: layout.height,
            scroll_height: layout.scroll_height,
        }
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn inner_width(&self) -> f64 {
        self.inner_width
    }

    fn scroll_to(&mut self, top: f64) {
        self.scroll_requests.push(top);
        self.set_scroll_y(top);
    }

    fn pathname(&self) -> String {
        self.pathname.clone()
    }

    fn hash(&self) -> String {
        self.hash.clone()
    }

    fn navigate(&mut self, href: &str) {
        self.navigations.push(href.to_owned());
    }
}

/// Fluent setup for one element, returned by [`MemoryPage::append`].
pub struct Builder<'a> {
    page: &'a mut MemoryPage,
    id: NodeId,
}

impl Builder<'_> {
    #[must_use]
    pub fn attr(self, name: &str, value: &str) -> Self {
        self.page.set_attr(self.id, name, value);
        self
    }

    #[must_use]
    pub fn class(self, class: &str) -> Self {
        self.page.add_class(self.id, class);
        self
    }

    #[must_use]
    pub fn text(self, text: &str) -> Self {
        self.page.set_text(self.id, text);
        self
    }

    #[must_use]
    pub fn value(self, value: &str) -> Self {
        self.page.set_value(self.id, value);
        self
    }

    /// Vertical placement and size in document coordinates.
    #[must_use]
    pub fn at(self, top: f64, height: f64) -> Self {
        let layout = Layout { top, height, ..self.page.layout(self.id) };
        self.page.set_layout(self.id, layout);
        self
    }

    #[must_use]
    pub fn layout(self, layout: Layout) -> Self {
        self.page.set_layout(self.id, layout);
        self
    }

    /// Finish and return the new node.
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }
}
