//! The diagram's graph: nodes and edges kept in id-keyed tables.
//!
//! Edges refer to their endpoints by [`NodeId`] and every node keeps the set of
//! edges touching it in an incidence index, so removing a node can drop its
//! edges without scanning the whole edge table. Both tables preserve creation
//! order, which doubles as the z-order on the canvas (later nodes are on top).

mod edge;
mod node;

pub use edge::{Edge, EdgeId};
pub use node::{DEFAULT_NODE_TEXT, Node, NodeId};

use std::collections::{BTreeSet, HashMap};

use egui::Pos2;
use indexmap::IndexMap;

use crate::error::{ElementRef, GraphError};
use crate::id_generator::IdGenerator;

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphModel {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    incidence: HashMap<NodeId, BTreeSet<EdgeId>>,
    node_ids: IdGenerator,
    edge_ids: IdGenerator,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node with a freshly allocated id. Never fails.
    pub fn add_node(&mut self, position: Pos2, text: impl Into<String>) -> &Node {
        let id = NodeId(self.node_ids.generate());
        self.insert(Node::new(id, text, position))
    }

    /// Insert a node that already carries an id (used when loading a document).
    ///
    /// A node with the same id is replaced in place. The id counter is moved
    /// past `id` so it will never be allocated again.
    pub fn restore_node(&mut self, id: NodeId, position: Pos2, text: impl Into<String>) -> &Node {
        self.node_ids.observe(id.0);
        self.insert(Node::new(id, text, position))
    }

    fn insert(&mut self, node: Node) -> &Node {
        let id = node.id();
        self.incidence.entry(id).or_default();
        self.nodes.insert(id, node);
        &self.nodes[&id]
    }

    /// Remove a node together with every edge that starts or ends at it.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<Node> {
        if !self.nodes.contains_key(&id) {
            return Err(GraphError::NotFound(ElementRef::Node(id)));
        }

        let incident = self.incidence.remove(&id).unwrap_or_default();
        for edge_id in &incident {
            if let Some(edge) = self.edges.shift_remove(edge_id) {
                let other = if edge.source() == id { edge.target() } else { edge.source() };
                if let Some(set) = self.incidence.get_mut(&other) {
                    set.remove(edge_id);
                }
            }
        }

        let node = self
            .nodes
            .shift_remove(&id)
            .ok_or(GraphError::NotFound(ElementRef::Node(id)))?;
        log::debug!("Removed node {} and {} incident edge(s)", id, incident.len());
        Ok(node)
    }

    /// Connect `source` to `target`. Parallel edges are allowed; self-loops are not.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> GraphResult<&Edge> {
        for endpoint in [source, target] {
            if !self.nodes.contains_key(&endpoint) {
                return Err(GraphError::NotFound(ElementRef::Node(endpoint)));
            }
        }
        if source == target {
            return Err(GraphError::SelfLoop(source));
        }

        let id = EdgeId(self.edge_ids.generate());
        self.edges.insert(id, Edge::new(id, source, target));
        self.incidence.entry(source).or_default().insert(id);
        self.incidence.entry(target).or_default().insert(id);
        Ok(&self.edges[&id])
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> GraphResult<Edge> {
        let edge = self
            .edges
            .shift_remove(&id)
            .ok_or(GraphError::NotFound(ElementRef::Edge(id)))?;
        for endpoint in [edge.source(), edge.target()] {
            if let Some(set) = self.incidence.get_mut(&endpoint) {
                set.remove(&id);
            }
        }
        Ok(edge)
    }

    /// Topmost node containing `pos`. The most recently created node wins ties.
    pub fn node_at(&self, pos: Pos2) -> Option<&Node> {
        self.nodes.values().rev().find(|node| node.hit_test(pos))
    }

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> GraphResult<()> {
        let node = self.node_mut(id)?;
        node.text = text.into();
        Ok(())
    }

    /// Move a node's top-left corner to `position`.
    pub fn move_node(&mut self, id: NodeId, position: Pos2) -> GraphResult<()> {
        let node = self.node_mut(id)?;
        node.position = position;
        Ok(())
    }

    /// Drop every node and edge and restart id allocation from the beginning.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn node_mut(&mut self, id: NodeId) -> GraphResult<&mut Node> {
        self.nodes
            .get_mut(&id)
            .ok_or(GraphError::NotFound(ElementRef::Node(id)))
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &Node> {
        self.nodes.values()
    }

    /// Edges in creation order.
    pub fn edges(&self) -> impl DoubleEndedIterator<Item = &Edge> {
        self.edges.values()
    }

    /// Edges whose source or target is `id`.
    pub fn incident_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        self.incidence
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|edge_id| self.edges.get(edge_id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// The id the next `add_node` call will assign.
    pub fn next_node_id(&self) -> NodeId {
        NodeId(self.node_ids.peek())
    }
}
