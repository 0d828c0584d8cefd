use std::cell::RefCell;

use js_sys::Reflect;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, KeyboardEvent, MouseEvent, NodeList, ScrollToOptions, Window,
};

use super::logged;
use crate::config::{CONFIG_ELEMENT_ID, PageConfig};
use crate::error::Error;
use crate::event::{EventKind, Key, PageEvent};
use crate::page::{Metrics, NodeId, Page, Rect, Target};
use crate::selector::Selector;
use crate::slots::Slots;

/// Expando property holding an element's [`NodeId`].
const NODE_KEY: &str = "__pagefxNode";

/// Handle for an element that could not be created. Every call on it is a no-op.
const DETACHED: NodeId = NodeId(usize::MAX);

/// The live document and window.
///
/// Elements are interned on first sight: each gets a [`NodeId`] stored on the
/// element itself, so the same element always maps to the same id. Removing
/// an element, or replacing its children with text, frees the ids of
/// everything taken out of the document.
pub struct WebPage {
    window: Window,
    document: Document,
    nodes: RefCell<Slots<Element>>,
}

impl WebPage {
    /// # Errors
    ///
    /// Returns [`Error::Host`] outside a browsing context.
    pub fn new() -> Result<Self, Error> {
        let window = web_sys::window().ok_or_else(|| Error::Host("no window".to_owned()))?;
        let document = window.document().ok_or_else(|| Error::Host("no document".to_owned()))?;
        Ok(Self { window, document, nodes: RefCell::new(Slots::new()) })
    }

    /// The config data island, or defaults when it is missing or invalid.
    #[must_use]
    pub fn read_config(&self) -> PageConfig {
        let Some(raw) = self.document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|el| el.text_content()) else {
            return PageConfig::default();
        };
        match PageConfig::from_json(&raw) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("pagefx: {err}; using defaults");
                PageConfig::default()
            }
        }
    }

    /// `document.readyState`.
    #[must_use]
    pub fn ready_state(&self) -> String {
        Reflect::get(&self.document, &JsValue::from_str("readyState"))
            .map(|v| v.as_string().unwrap_or_default())
            .unwrap_or_default()
    }

    pub(crate) fn document(&self) -> &Document {
        &self.document
    }

    pub(crate) fn intern(&self, el: Element) -> NodeId {
        if let Some(index) = slot_of(&el) {
            return NodeId(index);
        }
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.insert(el.clone()));
        #[allow(clippy::cast_precision_loss)]
        let tagged = Reflect::set(&el, &JsValue::from_str(NODE_KEY), &JsValue::from_f64(id.0 as f64));
        if logged("tag element", tagged).is_none() {
            nodes.remove(id.0);
            return DETACHED;
        }
        id
    }

    pub(crate) fn element(&self, node: NodeId) -> Option<Element> {
        self.nodes.borrow().get(node.0).cloned()
    }

    /// Free the ids of every interned element below `el`, and of `el` itself
    /// when `inclusive`.
    fn release(&self, el: &Element, inclusive: bool) {
        if let Some(list) = logged("querySelectorAll", el.query_selector_all("*")) {
            for below in (0..list.length()).filter_map(|i| list.get(i)) {
                if let Some(below) = below.dyn_ref::<Element>() {
                    self.forget(below);
                }
            }
        }
        if inclusive {
            self.forget(el);
        }
    }

    fn forget(&self, el: &Element) {
        let Some(index) = slot_of(el) else {
            return;
        };
        logged("untag element", Reflect::delete_property(el, &JsValue::from_str(NODE_KEY)));
        self.nodes.borrow_mut().remove(index);
    }

    fn html(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node).and_then(|el| el.dyn_ref::<HtmlElement>().cloned())
    }

    fn collect(&self, list: Result<NodeList, JsValue>) -> Vec<NodeId> {
        let Some(list) = logged("querySelectorAll", list) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_ref::<Element>().cloned())
            .map(|el| self.intern(el))
            .collect()
    }

    /// The DOM object a listener for `target` attaches to.
    pub(crate) fn event_target(&self, target: Target) -> Option<EventTarget> {
        match target {
            Target::Window => Some(self.window.clone().into()),
            Target::Document => Some(self.document.clone().into()),
            Target::Node(node) => self.element(node).map(Into::into),
        }
    }

    /// Translate a DOM event for a listener of `kind`. Events whose target is
    /// not an element are dropped for element-targeted kinds.
    pub(crate) fn translate(&self, kind: EventKind, event: &Event) -> Option<PageEvent> {
        let target = || {
            event
                .target()
                .and_then(|t| t.dyn_ref::<Element>().cloned())
                .map(|el| self.intern(el))
        };
        Some(match kind {
            EventKind::Click => {
                let (client_x, client_y) = event
                    .dyn_ref::<MouseEvent>()
                    .map_or((0.0, 0.0), |m| (f64::from(m.client_x()), f64::from(m.client_y())));
                PageEvent::Click { target: target()?, client_x, client_y }
            }
            EventKind::KeyDown => PageEvent::KeyDown { key: Key(event.dyn_ref::<KeyboardEvent>()?.key()) },
            EventKind::Submit => PageEvent::Submit { form: target()? },
            EventKind::Scroll => PageEvent::Scroll,
            EventKind::Resize => PageEvent::Resize,
            EventKind::MouseEnter => PageEvent::MouseEnter { target: target()? },
            EventKind::MouseLeave => PageEvent::MouseLeave { target: target()? },
        })
    }
}

impl Page for WebPage {
    fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.collect(self.document.query_selector_all(selector.as_str()))
    }

    fn query_within(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        match self.element(root) {
            Some(el) => self.collect(el.query_selector_all(selector.as_str())),
            None => Vec::new(),
        }
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.document.get_element_by_id(id).map(|el| self.intern(el))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node)?.parent_element().map(|el| self.intern(el))
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        match (self.element(ancestor), self.element(node)) {
            (Some(a), Some(n)) => a.contains(Some(n.as_ref())),
            _ => false,
        }
    }

    fn head(&self) -> Option<NodeId> {
        logged("querySelector", self.document.query_selector("head"))
            .flatten()
            .map(|el| self.intern(el))
    }

    fn body(&self) -> Option<NodeId> {
        self.document.body().map(|body| self.intern(body.into()))
    }

    fn tag(&self, node: NodeId) -> String {
        self.element(node).map(|el| el.tag_name().to_ascii_lowercase()).unwrap_or_default()
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element(node) {
            logged("setAttribute", el.set_attribute(name, value));
        }
    }

    fn remove_attr(&mut self, node: NodeId, name: &str) {
        if let Some(el) = self.element(node) {
            logged("removeAttribute", el.remove_attribute(name));
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|el| el.class_list().contains(class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element(node) {
            logged("classList.add", el.class_list().add_1(class));
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(el) = self.element(node) {
            logged("classList.remove", el.class_list().remove_1(class));
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        let value = logged("getPropertyValue", self.html(node)?.style().get_property_value(property))?;
        (!value.is_empty()).then_some(value)
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let Some(el) = self.html(node) else {
            return;
        };
        let style = el.style();
        if value.is_empty() {
            logged("removeProperty", style.remove_property(property));
        } else {
            logged("setProperty", style.set_property(property, value));
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node).and_then(|el| el.text_content()).unwrap_or_default()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(el) = self.element(node) {
            self.release(&el, false);
            el.set_text_content(Some(text));
        }
    }

    fn append_text(&mut self, node: NodeId, text: &str) {
        if let Some(el) = self.element(node) {
            logged("insertAdjacentText", el.insert_adjacent_text("beforeend", text));
        }
    }

    fn value(&self, node: NodeId) -> String {
        let Some(el) = self.element(node) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn input_type(&self, node: NodeId) -> String {
        let Some(el) = self.element(node) else {
            return String::new();
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.type_().to_ascii_lowercase()
        } else if el.dyn_ref::<HtmlTextAreaElement>().is_some() {
            "textarea".to_owned()
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.type_()
        } else if let Some(button) = el.dyn_ref::<HtmlButtonElement>() {
            button.type_()
        } else {
            String::new()
        }
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(el) = self.element(node) {
            logged("toggleAttribute", el.toggle_attribute_with_force("disabled", disabled));
        }
    }

    fn focus(&mut self, node: NodeId) {
        if let Some(el) = self.html(node) {
            logged("focus", el.focus());
        }
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        match logged("createElement", self.document.create_element(tag)) {
            Some(el) => self.intern(el),
            None => DETACHED,
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let (Some(parent), Some(child)) = (self.element(parent), self.element(child)) {
            logged("appendChild", parent.append_child(&child));
        }
    }

    fn insert_after(&mut self, reference: NodeId, node: NodeId) {
        if let (Some(reference), Some(node)) = (self.element(reference), self.element(node)) {
            logged("after", reference.after_with_node_1(&node));
        }
    }

    fn remove(&mut self, node: NodeId) {
        if let Some(el) = self.element(node) {
            self.release(&el, true);
            el.remove();
        }
    }

    fn metrics(&self, node: NodeId) -> Metrics {
        let Some(el) = self.element(node) else {
            return Metrics::default();
        };
        let r = el.get_bounding_client_rect();
        let (offset_top, offset_height) = el
            .dyn_ref::<HtmlElement>()
            .map_or((0.0, 0.0), |h| (f64::from(h.offset_top()), f64::from(h.offset_height())));
        Metrics {
            rect: Rect { top: r.top(), left: r.left(), width: r.width(), height: r.height() },
            offset_top,
            offset_height,
            scroll_height: f64::from(el.scroll_height()),
        }
    }

    fn scroll_y(&self) -> f64 {
        logged("scrollY", self.window.scroll_y()).unwrap_or_default()
    }

    fn inner_width(&self) -> f64 {
        logged("innerWidth", self.window.inner_width())
            .and_then(|v| v.as_f64())
            .unwrap_or_default()
    }

    fn scroll_to(&mut self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn pathname(&self) -> String {
        logged("location.pathname", self.window.location().pathname()).unwrap_or_default()
    }

    fn hash(&self) -> String {
        logged("location.hash", self.window.location().hash()).unwrap_or_default()
    }

    fn navigate(&mut self, href: &str) {
        logged("location.href", self.window.location().set_href(href));
    }
}

/// The slot index stored on `el`, if it was interned.
fn slot_of(el: &Element) -> Option<usize> {
    let Ok(value) = Reflect::get(el, &JsValue::from_str(NODE_KEY)) else {
        return None;
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = value.as_f64()? as usize;
    Some(index)
}
