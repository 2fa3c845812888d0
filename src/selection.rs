use std::collections::BTreeSet;

use egui::Rect;

use crate::geometry::{edge_segment, hit_testing::segment_intersects_rect};
use crate::graph::{EdgeId, GraphModel, NodeId};

/// The set of selected nodes and edges, referenced by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    nodes: BTreeSet<NodeId>,
    edges: BTreeSet<EdgeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything touched by a rubber band: nodes whose box intersects `rect`
    /// and edges whose line passes through it.
    pub fn from_rect(model: &GraphModel, rect: Rect) -> Self {
        let nodes = model
            .nodes()
            .filter(|node| node.rect().intersects(rect))
            .map(|node| node.id())
            .collect();
        let edges = model
            .edges()
            .filter(|edge| {
                edge_segment(model, edge).is_some_and(|s| segment_intersects_rect(&s, rect))
            })
            .map(|edge| edge.id())
            .collect();
        Self { nodes, edges }
    }

    pub fn single_node(id: NodeId) -> Self {
        Self {
            nodes: BTreeSet::from([id]),
            edges: BTreeSet::new(),
        }
    }

    pub fn single_edge(id: EdgeId) -> Self {
        Self {
            nodes: BTreeSet::new(),
            edges: BTreeSet::from([id]),
        }
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_rubber_band_picks_crossed_edges() {
        let mut model = GraphModel::new();
        let a = model.add_node(pos2(0.0, 0.0), "A").id();
        let b = model.add_node(pos2(400.0, 0.0), "B").id();
        let edge = model.add_edge(a, b).unwrap().id();

        // A band between the two boxes catches only the edge.
        let selection = Selection::from_rect(&model, Rect::from_two_pos(pos2(200.0, 0.0), pos2(250.0, 50.0)));
        assert!(selection.contains_edge(edge));
        assert!(!selection.contains_node(a) && !selection.contains_node(b));

        let empty = Selection::from_rect(&model, Rect::from_two_pos(pos2(0.0, 100.0), pos2(50.0, 150.0)));
        assert!(empty.is_empty());
    }
}
