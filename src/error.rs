use std::fmt;

use thiserror::Error;

use crate::graph::{EdgeId, NodeId};

/// A reference to something stored in the graph, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRef {
    Node(NodeId),
    Edge(EdgeId),
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node(id) => write!(f, "node {}", id),
            Self::Edge(id) => write!(f, "edge {}", id),
        }
    }
}

/// Errors raised by graph mutations. A failed operation leaves the graph untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("{0} does not exist")]
    NotFound(ElementRef),

    #[error("cannot connect node {0} to itself")]
    SelfLoop(NodeId),
}

/// Errors that can occur while saving or loading a document
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Invalid flowchart document: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to serialize flowchart: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors that can occur while exporting the diagram as an image
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to build the export scene")]
    Svg(#[from] usvg::Error),

    #[error("failed to allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },

    #[error("failed to write image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Anything a toolbar command can fail with.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
