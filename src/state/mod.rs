mod editor_state;
pub mod context;
pub mod persistence;

pub use editor_state::{EditorState, Mode, SelectGesture};
pub use context::{EditorContext, StateTransitionError};
pub use persistence::{load_from_path, save_to_path};
