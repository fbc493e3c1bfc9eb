//! DOM host backed by `web-sys`.
//!
//! Elements are interned into [`NodeId`]s on first sight and stamped with
//! [`NODE_STAMP_ATTRIBUTE`], so controllers keep plain handles and repeated
//! lookups stay constant time. Every listener closure is leaked into the JS
//! heap with `forget`, which matches the page-lifetime registration the
//! controllers expect.

use anyhow::{anyhow, Context, Result};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlElement, HtmlInputElement, HtmlTextAreaElement,
    KeyboardEvent, MouseEvent, ScrollToOptions, Window,
};

use super::node_table::{NodeTable, NODE_STAMP_ATTRIBUTE};
use super::{
    Event, EventKind, EventSource, EventTarget, Handler, Host, NodeId, Page, Scheduler,
    ScrollBehavior, Storage, TimerId,
};
use crate::app::Portfolio;
use crate::config::Config;
use crate::models::Rect;

fn js_error(context: &str, value: &JsValue) -> anyhow::Error {
    anyhow!("{}: {:?}", context, value)
}

/// The current document.
pub struct BrowserPage {
    window: Window,
    document: Document,
    nodes: RefCell<NodeTable<Element>>,
}

impl BrowserPage {
    /// Page for the global `window`.
    pub fn new() -> Result<Self> {
        let window = web_sys::window().context("No global window")?;
        let document = window.document().context("Window has no document")?;
        Ok(Self {
            window,
            document,
            nodes: RefCell::new(NodeTable::new()),
        })
    }

    fn intern(&self, element: Element) -> NodeId {
        let stamp = element.get_attribute(NODE_STAMP_ATTRIBUTE);
        self.nodes
            .borrow_mut()
            .intern(element, stamp.as_deref(), |element, index| {
                if let Err(e) = element.set_attribute(NODE_STAMP_ATTRIBUTE, index) {
                    tracing::debug!("Could not stamp element {}: {:?}", index, e);
                }
            })
    }

    fn element(&self, node: NodeId) -> Option<Element> {
        self.nodes.borrow().get(node)
    }

    fn html(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node)?.dyn_into::<HtmlElement>().ok()
    }

    fn collect(&self, list: Result<web_sys::NodeList, JsValue>, selector: &str) -> Vec<NodeId> {
        let list = match list {
            Ok(list) => list,
            Err(e) => {
                tracing::debug!("Selector '{}' rejected: {:?}", selector, e);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.intern(element))
            .collect()
    }
}

impl Page for BrowserPage {
    fn by_id(&self, id: &str) -> Option<NodeId> {
        self.document
            .get_element_by_id(id)
            .map(|element| self.intern(element))
    }

    fn select_all(&self, selector: &str) -> Vec<NodeId> {
        self.collect(self.document.query_selector_all(selector), selector)
    }

    fn select_within(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        match self.element(root) {
            Some(root) => self.collect(root.query_selector_all(selector), selector),
            None => Vec::new(),
        }
    }

    fn body(&self) -> Option<NodeId> {
        let body: Element = self.document.body()?.into();
        Some(self.intern(body))
    }

    fn bounding_box(&self, node: NodeId) -> Option<Rect> {
        let rect = self.element(node)?.get_bounding_client_rect();
        Some(Rect::new(rect.top(), rect.left(), rect.width(), rect.height()))
    }

    fn offset_top(&self, node: NodeId) -> Option<f64> {
        self.html(node).map(|el| f64::from(el.offset_top()))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element(node) {
            if let Err(e) = element.set_attribute(name, value) {
                tracing::warn!("Failed to set attribute {}: {:?}", name, e);
            }
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            let _ = element.class_list().remove_1(class);
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        let value = self.html(node)?.style().get_property_value(property).ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        if let Some(el) = self.html(node) {
            let _ = el.style().set_property(property, value);
        }
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.element(node)?.text_content()
    }

    fn set_text(&self, node: NodeId, text: &str) {
        if let Some(element) = self.element(node) {
            element.set_text_content(Some(text));
        }
    }

    fn value(&self, node: NodeId) -> Option<String> {
        let element = self.element(node)?;
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return Some(input.value());
        }
        element
            .dyn_ref::<HtmlTextAreaElement>()
            .map(HtmlTextAreaElement::value)
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        let element = self.document.create_element(tag).ok()?;
        Some(self.intern(element))
    }

    fn prepend_to_body(&self, node: NodeId) {
        if let (Some(body), Some(element)) = (self.document.body(), self.element(node)) {
            if let Err(e) = body.prepend_with_node_1(&element) {
                tracing::warn!("Failed to insert element: {:?}", e);
            }
        }
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or_default()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn download(&self, href: &str, file_name: &str) {
        let Some(body) = self.document.body() else {
            return;
        };
        let Ok(link) = self
            .document
            .create_element("a")
            .map(|element| element.unchecked_into::<HtmlAnchorElement>())
        else {
            return;
        };
        link.set_href(href);
        link.set_download(file_name);
        if body.append_child(&link).is_ok() {
            link.click();
            link.remove();
        }
    }

    fn print(&self) {
        if let Err(e) = self.window.print() {
            tracing::warn!("Print failed: {:?}", e);
        }
    }
}

fn translate(raw: &web_sys::Event) -> Event {
    if let Some(mouse) = raw.dyn_ref::<MouseEvent>() {
        return Event::pointer(f64::from(mouse.client_x()), f64::from(mouse.client_y()));
    }
    if let Some(keyboard) = raw.dyn_ref::<KeyboardEvent>() {
        return Event::key(keyboard.key());
    }
    Event::plain()
}

/// Listener registration on DOM event targets.
pub struct BrowserEvents {
    page: Rc<BrowserPage>,
}

impl BrowserEvents {
    /// Events for `page`.
    pub fn new(page: Rc<BrowserPage>) -> Self {
        Self { page }
    }

    fn resolve(&self, target: EventTarget) -> Option<web_sys::EventTarget> {
        match target {
            EventTarget::Window => Some(self.page.window.clone().into()),
            EventTarget::Document => Some(self.page.document.clone().into()),
            EventTarget::Node(node) => self.page.element(node).map(Into::into),
        }
    }
}

impl EventSource for BrowserEvents {
    fn listen(&self, target: EventTarget, kind: EventKind, mut handler: Handler) {
        let Some(js_target) = self.resolve(target) else {
            return;
        };
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |raw: web_sys::Event| {
            let event = translate(&raw);
            handler(&event);
            if event.default_prevented() {
                raw.prevent_default();
            }
        });
        if let Err(e) = js_target
            .add_event_listener_with_callback(kind.dom_name(), closure.as_ref().unchecked_ref())
        {
            tracing::warn!("Failed to listen for {}: {:?}", kind.dom_name(), e);
        }
        closure.forget();
    }
}

/// `setTimeout` / `requestAnimationFrame`.
pub struct BrowserScheduler {
    window: Window,
}

impl BrowserScheduler {
    /// Scheduler on `window`.
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Scheduler for BrowserScheduler {
    fn now(&self) -> f64 {
        self.window
            .performance()
            .map_or(0.0, |performance| performance.now())
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> TimerId {
        let callback = Closure::once_into_js(callback);
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            Ok(handle) => TimerId(u64::try_from(handle).unwrap_or_default()),
            Err(e) => {
                tracing::warn!("setTimeout failed: {:?}", e);
                TimerId(0)
            }
        }
    }

    fn clear_timeout(&self, id: TimerId) {
        if let Ok(handle) = i32::try_from(id.0) {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) {
        let callback = Closure::once_into_js(callback);
        if let Err(e) = self.window.request_animation_frame(callback.unchecked_ref()) {
            tracing::warn!("requestAnimationFrame failed: {:?}", e);
        }
    }
}

/// `window.localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Local storage of `window`.
    pub fn new(window: &Window) -> Result<Self> {
        let storage = window
            .local_storage()
            .map_err(|e| js_error("localStorage is not accessible", &e))?
            .context("localStorage is not available")?;
        Ok(Self { storage })
    }
}

impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| js_error(&format!("Failed to store '{}'", key), &e))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| js_error(&format!("Failed to remove '{}'", key), &e))
    }
}

/// Host bundle for the current browser window.
pub fn browser_host() -> Result<Host> {
    let page = Rc::new(BrowserPage::new()?);
    let storage = LocalStorage::new(&page.window)?;
    let scheduler = BrowserScheduler::new(page.window.clone());
    let events = BrowserEvents::new(Rc::clone(&page));
    Ok(Host::new(
        page,
        Rc::new(events),
        Rc::new(scheduler),
        Rc::new(storage),
    ))
}

/// Mounts every behaviour on the current document.
pub fn mount_in_browser(config: &Config) -> Result<Portfolio> {
    let host = browser_host()?;
    Portfolio::mount(&host, config)
}
