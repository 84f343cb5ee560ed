use std::collections::{BTreeMap, BTreeSet};

use super::Selector;

/// Handle to an element stored in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// CSS `display` as far as the pages care about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Default,
    None,
    Block,
}

impl Display {
    pub fn is_visible(self) -> bool {
        !matches!(self, Display::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Change,
}

/// Element data. Used both as a builder for new subtrees (with `children`)
/// and as the stored payload of a node (children live in the arena then).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub value: Option<String>,
    pub display: Display,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds every whitespace separated class in `classes`.
    pub fn with_class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(id) => self.id.as_deref() == Some(id.as_str()),
            Selector::Class(class) => self.has_class(class),
            Selector::Attribute { tag, name, value } => {
                self.tag.eq_ignore_ascii_case(tag) && self.attribute(name) == Some(value.as_str())
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-memory page document. Removed nodes leave a hole in the arena so
/// stale [`NodeId`]s never alias a newer element.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Option<Node>>,
    body: NodeId,
    listeners: BTreeSet<(NodeId, EventKind)>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let body = Node {
            element: Element::new("body"),
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![Some(body)],
            body: NodeId(0),
            listeners: BTreeSet::new(),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Inserts `element` and its children under `parent`.
    /// Returns `None` if `parent` is no longer in the document.
    pub fn append_child(&mut self, parent: NodeId, mut element: Element) -> Option<NodeId> {
        if !self.contains(parent) {
            return None;
        }

        let children = std::mem::take(&mut element.children);
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Node {
            element,
            parent: Some(parent),
            children: Vec::new(),
        }));
        if let Some(node) = self.node_mut(parent) {
            node.children.push(id);
        }

        for child in children {
            self.append_child(id, child);
        }

        Some(id)
    }

    /// Detaches `node` and drops its subtree. Removing a node that is
    /// already gone (or the body) returns `false`.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.body || !self.contains(node) {
            return false;
        }

        if let Some(parent) = self.node(node).and_then(|n| n.parent) {
            if let Some(parent) = self.node_mut(parent) {
                parent.children.retain(|c| *c != node);
            }
        }

        let mut pending = vec![node];
        while let Some(current) = pending.pop() {
            if let Some(removed) = self.nodes.get_mut(current.0).and_then(Option::take) {
                pending.extend(removed.children);
            }
            self.listeners.retain(|(target, _)| *target != current);
        }

        true
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.node(node).is_some()
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.node(node).map(|n| &n.element)
    }

    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.node_mut(node).map(|n| &mut n.element)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query_selector(&Selector::id(id))
    }

    /// First match in document order.
    pub fn query_selector(&self, selector: &Selector) -> Option<NodeId> {
        self.walk().find(|id| self.matches(*id, selector))
    }

    pub fn query_selector_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.walk().filter(|id| self.matches(*id, selector)).collect()
    }

    pub fn add_event_listener(&mut self, node: NodeId, kind: EventKind) -> bool {
        if !self.contains(node) {
            return false;
        }
        self.listeners.insert((node, kind));
        true
    }

    pub fn has_listener(&self, node: NodeId, kind: EventKind) -> bool {
        self.listeners.contains(&(node, kind))
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) -> bool {
        match self.element_mut(node) {
            Some(element) => {
                element.value = Some(value.into());
                true
            }
            None => false,
        }
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        self.element(node).is_some_and(|e| e.matches(selector))
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Pre-order traversal starting at the body.
    fn walk(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut stack = vec![self.body];
        std::iter::from_fn(move || {
            let current = stack.pop()?;
            stack.extend(self.children(current).iter().rev().copied());
            Some(current)
        })
    }
}
