//! Node tree: the registry of rectangular screen regions that menus and
//! their triggers refer to.
//!
//! A node is a non-owned reference to a region of the terminal: the tree
//! tracks its rectangle and optional name, never the widget that renders
//! into it. Gateways hit-test against this tree to decide which listeners
//! a pointer event reaches.

use std::collections::BTreeMap;

use ratatui::layout::Rect;
use thiserror::Error;

/// Stable handle for a registered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NodeTreeError {
    #[error("node name {0:?} is already registered")]
    DuplicateName(String),
}

/// A trigger reference: either a direct node handle or a name resolved
/// against the tree at bind time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerRef {
    Node(NodeId),
    Name(String),
}

/// The element(s) whose gesture opens a context menu.
///
/// Mirrors the accepted configuration shapes: a single node handle, a name
/// string, or an ordered list of either. An empty list is a valid value
/// meaning "bind nothing".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    One(TriggerRef),
    Many(Vec<TriggerRef>),
}

impl Trigger {
    pub fn node(id: NodeId) -> Self {
        Trigger::One(TriggerRef::Node(id))
    }

    pub fn name(name: impl Into<String>) -> Self {
        Trigger::One(TriggerRef::Name(name.into()))
    }

    pub fn many(refs: impl IntoIterator<Item = TriggerRef>) -> Self {
        Trigger::Many(refs.into_iter().collect())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TriggerRef> {
        match self {
            Trigger::One(single) => std::slice::from_ref(single).iter(),
            Trigger::Many(refs) => refs.iter(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Trigger::One(_) => false,
            Trigger::Many(refs) => refs.is_empty(),
        }
    }
}

impl From<NodeId> for Trigger {
    fn from(id: NodeId) -> Self {
        Trigger::node(id)
    }
}

impl From<&str> for Trigger {
    fn from(name: &str) -> Self {
        Trigger::name(name)
    }
}

#[derive(Debug)]
struct Node {
    area: Rect,
    name: Option<String>,
    /// Insertion sequence. Later nodes are treated as sitting above earlier
    /// ones when more than one contains the same point.
    order: u32,
}

/// Registry of screen regions addressable by [`NodeId`] or name.
#[derive(Debug, Default)]
pub struct NodeTree {
    nodes: BTreeMap<NodeId, Node>,
    names: BTreeMap<String, NodeId>,
    next: u32,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, area: Rect) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        self.nodes.insert(
            id,
            Node {
                area,
                name: None,
                order: id.0,
            },
        );
        id
    }

    pub fn insert_named(&mut self, name: &str, area: Rect) -> Result<NodeId, NodeTreeError> {
        if self.names.contains_key(name) {
            return Err(NodeTreeError::DuplicateName(name.to_string()));
        }
        let id = self.insert(area);
        if let Some(node) = self.nodes.get_mut(&id) {
            node.name = Some(name.to_string());
        }
        self.names.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn remove(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id)
            && let Some(name) = node.name
        {
            self.names.remove(&name);
        }
    }

    pub fn set_area(&mut self, id: NodeId, area: Rect) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.area = area;
        }
    }

    pub fn area(&self, id: NodeId) -> Option<Rect> {
        self.nodes.get(&id).map(|node| node.area)
    }

    pub fn resolve(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub fn contains(&self, id: NodeId, column: u16, row: u16) -> bool {
        self.area(id)
            .is_some_and(|area| rect_contains(area, column, row))
    }

    /// Nodes containing the point, outermost first.
    ///
    /// "Outermost" follows insertion order: a node registered later is
    /// assumed to sit above (inside) one registered earlier. Capture-phase
    /// dispatch walks this path front to back; the hit target is the last
    /// entry.
    pub fn hit_path(&self, column: u16, row: u16) -> Vec<NodeId> {
        let mut hits: Vec<(u32, NodeId)> = self
            .nodes
            .iter()
            .filter(|(_, node)| rect_contains(node.area, column, row))
            .map(|(id, node)| (node.order, *id))
            .collect();
        hits.sort_by_key(|(order, _)| *order);
        hits.into_iter().map(|(_, id)| id).collect()
    }
}

/// Whether `(column, row)` falls inside `rect`.
pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
