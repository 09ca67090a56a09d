//! In-memory document model
//!
//! A small element tree with the parts of the DOM the page behaviours use:
//! classes, attributes, text, form values, inline style and layout bounds.
//! Bounds are supplied by the host; there is no layout engine here.
//!
//! Removed nodes are dropped from the arena together with their subtree.
//! Every accessor returns `None` (and every mutator does nothing) for a
//! node that no longer exists, mirroring how detached DOM nodes are inert.
//!
//! # Example
//!
//! ```rust
//! use nemesix_core::{Document, Rect};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let card = doc
//!     .build(body, "div")
//!     .class("animate-card")
//!     .bounds(Rect::new(0.0, 900.0, 300.0, 200.0))
//!     .finish();
//!
//! assert!(doc.has_class(card, "animate-card"));
//! assert_eq!(doc.query_selector(".animate-card").unwrap(), Some(card));
//! ```

use indexmap::IndexMap;
use slotmap::{new_key_type, Key, SlotMap};
use smallvec::SmallVec;

use crate::error::Result;
use crate::geometry::Rect;
use crate::selector::Selector;
use crate::style::{Style, StyleProperty};

new_key_type! {
    /// Handle to a node in a [`Document`]
    pub struct NodeId;
}

impl NodeId {
    /// Convert to a raw u64 representation (for logging and attributes)
    pub fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }
}

/// A single element
#[derive(Clone, Debug)]
pub struct Node {
    tag: String,
    id: Option<String>,
    classes: SmallVec<[String; 4]>,
    attributes: IndexMap<String, String>,
    text: String,
    value: String,
    style: Style,
    bounds: Rect,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: SmallVec::new(),
            attributes: IndexMap::new(),
            text: String::new(),
            value: String::new(),
            style: Style::new(),
            bounds: Rect::ZERO,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// The element tree of one page
#[derive(Clone, Debug)]
pub struct Document {
    nodes: SlotMap<NodeId, Node>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only `<body>`
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(Node::new("body"));
        Self { nodes, body }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of live nodes (including body)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    // =========================================================================
    // Tree structure
    // =========================================================================

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.insert(Node::new(tag))
    }

    /// Start building an element appended to `parent`
    pub fn build(&mut self, parent: NodeId, tag: &str) -> ElementBuilder<'_> {
        let node = self.create_element(tag);
        self.append_child(parent, node);
        ElementBuilder { doc: self, node }
    }

    /// Append `child` as the last child of `parent`, detaching it first
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return;
        }
        self.detach(child);
        self.nodes[parent].children.push(child);
        self.nodes[child].parent = Some(parent);
    }

    /// Insert `node` directly after `reference` under the same parent
    pub fn insert_after(&mut self, reference: NodeId, node: NodeId) {
        let Some(parent) = self.parent(reference) else {
            return;
        };
        if reference == node || !self.contains(node) {
            return;
        }
        self.detach(node);
        let siblings = &mut self.nodes[parent].children;
        let index = siblings
            .iter()
            .position(|&n| n == reference)
            .map(|i| i + 1)
            .unwrap_or(siblings.len());
        siblings.insert(index, node);
        self.nodes[node].parent = Some(parent);
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes.get(node).and_then(|n| n.parent) {
            if let Some(p) = self.nodes.get_mut(parent) {
                p.children.retain(|&c| c != node);
            }
        }
        if let Some(n) = self.nodes.get_mut(node) {
            n.parent = None;
        }
    }

    /// Remove a node and its whole subtree. The body cannot be removed.
    pub fn remove(&mut self, node: NodeId) {
        if node == self.body || !self.contains(node) {
            return;
        }
        self.detach(node);

        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if let Some(removed) = self.nodes.remove(current) {
                stack.extend(removed.children);
            }
        }
    }

    /// Remove every child of `node`
    pub fn clear_children(&mut self, node: NodeId) {
        let children = self.children(node).to_vec();
        for child in children {
            self.remove(child);
        }
    }

    /// Whether the node still exists
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    /// Whether the node exists and is reachable from body
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == self.body {
                return true;
            }
            current = self.nodes.get(n).and_then(|n| n.parent);
        }
        false
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&n| n == node)?;
        siblings.get(index + 1).copied()
    }

    /// All descendants of `node` in document (pre-)order, excluding `node`
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    // =========================================================================
    // Identity, classes, attributes
    // =========================================================================

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|n| n.tag.as_str())
    }

    pub fn id_of(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node)?.id.as_deref()
    }

    pub fn set_id(&mut self, node: NodeId, id: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.id = Some(id.into());
        }
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        self.nodes
            .get(node)
            .map(|n| n.classes.as_slice())
            .unwrap_or(&[])
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.classes(node).iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.classes.retain(|c| c != class);
        }
    }

    /// Add the class when `on` is true, remove it otherwise
    pub fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes.get(node)?.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.attributes.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.attributes.shift_remove(name);
        }
    }

    // =========================================================================
    // Text and form values
    // =========================================================================

    /// Own text of the node
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|n| n.text.as_str())
    }

    /// Replace the node's content with text (like `textContent = ...`)
    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.clear_children(node);
        if let Some(n) = self.nodes.get_mut(node) {
            n.text = text.into();
        }
    }

    pub fn append_text(&mut self, node: NodeId, text: &str) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.text.push_str(text);
        }
    }

    /// Concatenated text of the node and its descendants
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = self.text(node).unwrap_or_default().to_string();
        for d in self.descendants(node) {
            out.push_str(self.text(d).unwrap_or_default());
        }
        out
    }

    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node).map(|n| n.value.as_str())
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.value = value.into();
        }
    }

    // =========================================================================
    // Style and bounds
    // =========================================================================

    pub fn style(&self, node: NodeId) -> Option<&Style> {
        self.nodes.get(node).map(|n| &n.style)
    }

    pub fn style_mut(&mut self, node: NodeId) -> Option<&mut Style> {
        self.nodes.get_mut(node).map(|n| &mut n.style)
    }

    /// Current numeric style value (initial value if never written)
    pub fn style_value(&self, node: NodeId, property: StyleProperty) -> Option<f32> {
        self.style(node).map(|s| s.get(property))
    }

    pub fn set_style(&mut self, node: NodeId, property: StyleProperty, value: f32) {
        if let Some(style) = self.style_mut(node) {
            style.set(property, value);
        }
    }

    pub fn style_keyword(&self, node: NodeId, name: &str) -> Option<&str> {
        self.style(node)?.keyword(name)
    }

    pub fn set_style_keyword(&mut self, node: NodeId, name: &str, value: impl Into<String>) {
        if let Some(style) = self.style_mut(node) {
            style.set_keyword(name, value);
        }
    }

    pub fn bounds(&self, node: NodeId) -> Option<Rect> {
        self.nodes.get(node).map(|n| n.bounds)
    }

    pub fn set_bounds(&mut self, node: NodeId, bounds: Rect) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.bounds = bounds;
        }
    }

    /// Height of the scrollable content: the lowest bottom edge of any
    /// connected node
    pub fn scroll_height(&self) -> f32 {
        self.descendants(self.body)
            .into_iter()
            .filter_map(|n| self.bounds(n))
            .map(|b| b.bottom())
            .fold(self.nodes[self.body].bounds.bottom(), f32::max)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// First connected node with the given id
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .find(|&n| self.id_of(n) == Some(id))
    }

    pub fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.select(&selector))
    }

    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.select_all(&selector))
    }

    /// First match among the descendants of `scope`
    pub fn query_selector_in(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.select_in(scope, &selector))
    }

    /// All matches among the descendants of `scope`
    pub fn query_selector_all_in(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>> {
        let selector = Selector::parse(selector)?;
        Ok(self.select_all_in(scope, &selector))
    }

    pub fn select(&self, selector: &Selector) -> Option<NodeId> {
        self.select_in(self.body, selector)
    }

    pub fn select_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.select_all_in(self.body, selector)
    }

    pub fn select_in(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|&n| selector.matches(self, n))
    }

    pub fn select_all_in(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| selector.matches(self, n))
            .collect()
    }
}

/// Fluent builder returned by [`Document::build`]
pub struct ElementBuilder<'a> {
    doc: &'a mut Document,
    node: NodeId,
}

impl ElementBuilder<'_> {
    pub fn id(self, id: &str) -> Self {
        self.doc.set_id(self.node, id);
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.doc.add_class(self.node, class);
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.doc.set_attribute(self.node, name, value);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.doc.set_text(self.node, text);
        self
    }

    pub fn value(self, value: &str) -> Self {
        self.doc.set_value(self.node, value);
        self
    }

    pub fn bounds(self, bounds: Rect) -> Self {
        self.doc.set_bounds(self.node, bounds);
        self
    }

    pub fn style(self, name: &str, value: &str) -> Self {
        self.doc.set_style_keyword(self.node, name, value);
        self
    }

    pub fn finish(self) -> NodeId {
        self.node
    }
}
