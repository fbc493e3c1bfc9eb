//! In-memory document.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crate::host::selector::{ElementView, Selector};
use crate::host::{NodeId, Page, ScrollBehavior};
use crate::models::{ElementSpec, PageLayout, Rect, Viewport};

#[derive(Debug, Clone, Default)]
struct SimNode {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    rect: Rect,
    fixed: bool,
    text: Option<String>,
    value: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SimNode {
    fn view(&self) -> ElementView<'_> {
        ElementView {
            tag: &self.tag,
            classes: &self.classes,
            attributes: &self.attributes,
        }
    }
}

/// A request recorded by [`Page::download`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Downloaded resource
    pub href: String,
    /// Suggested file name
    pub file_name: String,
}

/// Document held entirely in memory.
///
/// Element boxes are stored in document coordinates; [`Page::bounding_box`]
/// subtracts the scroll position unless the element is `fixed`. External
/// actions (alerts, downloads, print) are recorded instead of performed.
#[derive(Debug)]
pub struct SimPage {
    nodes: RefCell<Vec<SimNode>>,
    viewport: Cell<Viewport>,
    scroll_y: Cell<f64>,
    scroll_changed: Cell<bool>,
    alerts: RefCell<Vec<String>>,
    downloads: RefCell<Vec<DownloadRequest>>,
    prints: Cell<u32>,
}

const BODY: NodeId = NodeId(0);

impl SimPage {
    /// Builds a document from a layout description.
    #[must_use]
    pub fn from_layout(layout: &PageLayout) -> Self {
        let page = Self {
            nodes: RefCell::new(vec![SimNode {
                tag: "body".to_string(),
                ..SimNode::default()
            }]),
            viewport: Cell::new(layout.viewport),
            scroll_y: Cell::new(0.0),
            scroll_changed: Cell::new(false),
            alerts: RefCell::new(Vec::new()),
            downloads: RefCell::new(Vec::new()),
            prints: Cell::new(0),
        };

        for spec in &layout.elements {
            page.insert(spec, BODY);
        }

        page
    }

    fn insert(&self, spec: &ElementSpec, parent: NodeId) -> NodeId {
        let mut attributes = spec.attributes.clone();
        if let Some(id) = &spec.id {
            attributes.insert("id".to_string(), id.clone());
        }

        let node = SimNode {
            tag: spec.tag.to_lowercase(),
            classes: spec.classes.clone(),
            attributes,
            styles: BTreeMap::new(),
            rect: spec.rect,
            fixed: spec.fixed,
            text: spec.text.clone(),
            value: spec.value.clone(),
            parent: Some(parent),
            children: Vec::new(),
        };

        let id = {
            let mut nodes = self.nodes.borrow_mut();
            nodes.push(node);
            let id = NodeId(nodes.len() - 1);
            nodes[parent.0].children.push(id);
            id
        };

        for child in &spec.children {
            self.insert(child, id);
        }

        id
    }

    fn with_node<R>(&self, node: NodeId, f: impl FnOnce(&SimNode) -> R) -> Option<R> {
        self.nodes.borrow().get(node.0).map(f)
    }

    fn with_node_mut(&self, node: NodeId, f: impl FnOnce(&mut SimNode)) {
        if let Some(n) = self.nodes.borrow_mut().get_mut(node.0) {
            f(n);
        }
    }

    /// Pre-order descendants of `root`, excluding `root` itself.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = match nodes.get(root.0) {
            Some(n) => n.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    fn matching(&self, candidates: Vec<NodeId>, selector: &str) -> Vec<NodeId> {
        let Ok(selector) = Selector::parse(selector) else {
            tracing::debug!("Unsupported selector ignored: {}", selector);
            return Vec::new();
        };
        let nodes = self.nodes.borrow();
        candidates
            .into_iter()
            .filter(|id| selector.matches(&nodes[id.0].view()))
            .collect()
    }

    /// Replaces an element's document-space box.
    pub fn set_rect(&self, node: NodeId, rect: Rect) {
        self.with_node_mut(node, |n| n.rect = rect);
    }

    /// Changes the viewport height.
    pub fn set_viewport_height(&self, height: f64) {
        let mut viewport = self.viewport.get();
        viewport.height = height;
        self.viewport.set(viewport);
    }

    /// Sets a form control's value.
    pub fn set_value(&self, node: NodeId, value: &str) {
        self.with_node_mut(node, |n| n.value = Some(value.to_string()));
    }

    /// Appends a new element under `parent` (attached to the document).
    pub fn append(&self, parent: NodeId, spec: &ElementSpec) -> NodeId {
        self.insert(spec, parent)
    }

    /// Returns and clears the "scroll position changed" flag.
    pub fn take_scroll_changed(&self) -> bool {
        self.scroll_changed.replace(false)
    }

    /// Messages passed to [`Page::alert`], oldest first.
    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    /// Downloads started through [`Page::download`].
    #[must_use]
    pub fn downloads(&self) -> Vec<DownloadRequest> {
        self.downloads.borrow().clone()
    }

    /// Number of [`Page::print`] calls.
    #[must_use]
    pub fn print_count(&self) -> u32 {
        self.prints.get()
    }

    /// Human-readable label: `#id` when the element has one, else `tag.class`.
    #[must_use]
    pub fn label(&self, node: NodeId) -> String {
        self.with_node(node, |n| {
            if let Some(id) = n.attributes.get("id") {
                format!("#{}", id)
            } else if let Some(class) = n.classes.first() {
                format!("{}.{}@{}", n.tag, class, node.0)
            } else {
                format!("{}@{}", n.tag, node.0)
            }
        })
        .unwrap_or_default()
    }
}

impl Page for SimPage {
    fn by_id(&self, id: &str) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        self.descendants(BODY)
            .into_iter()
            .find(|node| nodes[node.0].attributes.get("id").map(String::as_str) == Some(id))
    }

    fn select_all(&self, selector: &str) -> Vec<NodeId> {
        self.matching(self.descendants(BODY), selector)
    }

    fn select_within(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        self.matching(self.descendants(root), selector)
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn bounding_box(&self, node: NodeId) -> Option<Rect> {
        let scroll = self.scroll_y.get();
        self.with_node(node, |n| {
            if n.fixed {
                n.rect
            } else {
                n.rect.shifted_up(scroll)
            }
        })
    }

    fn offset_top(&self, node: NodeId) -> Option<f64> {
        self.with_node(node, |n| n.rect.top)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.with_node(node, |n| {
            if name == "class" {
                Some(n.classes.join(" "))
            } else {
                n.attributes.get(name).cloned()
            }
        })
        .flatten()
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        self.with_node_mut(node, |n| {
            if name == "class" {
                n.classes = value.split_whitespace().map(str::to_string).collect();
            } else {
                n.attributes.insert(name.to_string(), value.to_string());
            }
        });
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.with_node(node, |n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn add_class(&self, node: NodeId, class: &str) {
        self.with_node_mut(node, |n| {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        self.with_node_mut(node, |n| n.classes.retain(|c| c != class));
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.with_node(node, |n| n.styles.get(property).cloned())
            .flatten()
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        self.with_node_mut(node, |n| {
            n.styles.insert(property.to_string(), value.to_string());
        });
    }

    fn text(&self, node: NodeId) -> Option<String> {
        self.with_node(node, |n| n.text.clone()).flatten()
    }

    fn set_text(&self, node: NodeId, text: &str) {
        self.with_node_mut(node, |n| n.text = Some(text.to_string()));
    }

    fn value(&self, node: NodeId) -> Option<String> {
        self.with_node(node, |n| n.value.clone()).flatten()
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(SimNode {
            tag: tag.to_lowercase(),
            ..SimNode::default()
        });
        Some(NodeId(nodes.len() - 1))
    }

    fn prepend_to_body(&self, node: NodeId) {
        if node == BODY {
            return;
        }
        let mut nodes = self.nodes.borrow_mut();
        if node.0 >= nodes.len() {
            return;
        }
        if let Some(old_parent) = nodes[node.0].parent {
            nodes[old_parent.0].children.retain(|c| *c != node);
        }
        nodes[node.0].parent = Some(BODY);
        nodes[BODY.0].children.insert(0, node);
    }

    fn viewport_height(&self) -> f64 {
        self.viewport.get().height
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn scroll_to(&self, top: f64, _behavior: ScrollBehavior) {
        let top = top.max(0.0);
        if (self.scroll_y.get() - top).abs() > f64::EPSILON {
            self.scroll_y.set(top);
            self.scroll_changed.set(true);
        }
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn download(&self, href: &str, file_name: &str) {
        self.downloads.borrow_mut().push(DownloadRequest {
            href: href.to_string(),
            file_name: file_name.to_string(),
        });
    }

    fn print(&self) {
        self.prints.set(self.prints.get() + 1);
    }
}
