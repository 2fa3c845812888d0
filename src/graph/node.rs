use std::fmt;

use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::style::NODE_SIZE;

/// Stable identifier of a node within one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub const DEFAULT_NODE_TEXT: &str = "New Node";

/// A labeled box on the canvas. `position` is the top-left corner in scene coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    pub text: String,
    pub position: Pos2,
}

impl Node {
    pub fn new(id: NodeId, text: impl Into<String>, position: Pos2) -> Self {
        Self {
            id,
            text: text.into(),
            position,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Bounding rectangle; every node has the same fixed size.
    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, NODE_SIZE)
    }

    pub fn center(&self) -> Pos2 {
        self.rect().center()
    }

    pub fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }
}
