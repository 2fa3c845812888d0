#![warn(clippy::all, rust_2018_idioms)]

pub mod command;
pub mod dialogs;
pub mod document;
pub mod error;
pub mod export;
pub mod geometry;
pub mod graph;
pub mod id_generator;
pub mod input;
pub mod renderer;
pub mod selection;
pub mod settings;
pub mod state;
pub mod style;

#[cfg(not(target_arch = "wasm32"))]
pub mod app;
#[cfg(not(target_arch = "wasm32"))]
pub mod native_dialogs;
#[cfg(not(target_arch = "wasm32"))]
mod panels;

#[cfg(not(target_arch = "wasm32"))]
pub use app::FlowchartApp;
pub use command::{Command, Effect};
pub use dialogs::Dialogs;
pub use document::Document;
pub use error::{EditorError, ExportError, GraphError, PersistenceError};
pub use graph::{Edge, EdgeId, GraphModel, Node, NodeId};
pub use renderer::Renderer;
pub use selection::Selection;
pub use state::{EditorContext, EditorState, Mode};
