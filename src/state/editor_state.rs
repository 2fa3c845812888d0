//! The interaction state machine of the flowchart editor.
//!
//! Each variant is one way of interpreting pointer events. The toolbar switches
//! freely between the three modes; `ConnectDragging` only exists between a
//! press on a node in `Connect` mode and the matching release.
//!
//! ```text
//!                 SetSelect / SetAdd / SetConnect
//!        ┌──────────────┬──────────────┬──────────────┐
//!        ▼              ▼              ▼              │
//!   ┌─────────┐    ┌─────────┐    ┌─────────┐  down   │   ┌──────────────────┐
//!   │ Select  │◄──►│ AddNode │◄──►│ Connect ├─on node─┼──►│ ConnectDragging  │
//!   └─────────┘    └─────────┘    └────▲────┘         │   └────────┬─────────┘
//!                                      └──────────────┴────────────┘ up
//! ```
use egui::Pos2;

use crate::graph::NodeId;

/// What a press in `Select` mode turned into.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SelectGesture {
    #[default]
    Idle,
    /// Moving the selected nodes; `last` is the previous pointer position.
    Dragging { last: Pos2 },
    /// Rubber-band selection from `start` to `current`.
    RubberBand { start: Pos2, current: Pos2 },
}

/// The possible states of the editor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditorState {
    Select { gesture: SelectGesture },
    AddNode,
    Connect,
    /// A connection is being dragged out of `source`; `pointer` is the preview's loose end.
    ConnectDragging { source: NodeId, pointer: Pos2 },
}

impl Default for EditorState {
    fn default() -> Self {
        Self::Select {
            gesture: SelectGesture::Idle,
        }
    }
}

/// The tool picked in the toolbar. `ConnectDragging` reports as `Connect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Select,
    AddNode,
    Connect,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Select => "Select",
            Mode::AddNode => "Add",
            Mode::Connect => "Connect",
        }
    }

    /// State entered when this mode is picked.
    pub fn initial_state(&self) -> EditorState {
        match self {
            Mode::Select => EditorState::default(),
            Mode::AddNode => EditorState::AddNode,
            Mode::Connect => EditorState::Connect,
        }
    }
}

impl EditorState {
    /// Validates whether a transition to the new state is allowed
    pub fn can_transition_to(&self, new_state: &EditorState) -> bool {
        use EditorState::*;
        match (self, new_state) {
            (ConnectDragging { .. }, Connect) => true,
            // Updating the preview endpoint.
            (ConnectDragging { source: a, .. }, ConnectDragging { source: b, .. }) => a == b,
            (ConnectDragging { .. }, _) => false,
            (Connect, ConnectDragging { .. }) => true,
            (_, ConnectDragging { .. }) => false,
            _ => true,
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            EditorState::Select { .. } => Mode::Select,
            EditorState::AddNode => Mode::AddNode,
            EditorState::Connect | EditorState::ConnectDragging { .. } => Mode::Connect,
        }
    }

    /// Returns true while a pointer gesture is in progress
    pub fn is_busy(&self) -> bool {
        match self {
            EditorState::Select { gesture } => *gesture != SelectGesture::Idle,
            EditorState::ConnectDragging { .. } => true,
            _ => false,
        }
    }

    /// The state reached by abandoning whatever gesture is in progress.
    pub fn cancelled(&self) -> EditorState {
        self.mode().initial_state()
    }

    pub fn connect_source(&self) -> Option<NodeId> {
        match self {
            EditorState::ConnectDragging { source, .. } => Some(*source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_connect_dragging_only_returns_to_connect() {
        let dragging = EditorState::ConnectDragging {
            source: NodeId(1),
            pointer: pos2(0.0, 0.0),
        };
        assert!(dragging.can_transition_to(&EditorState::Connect));
        assert!(!dragging.can_transition_to(&EditorState::AddNode));
        assert!(!dragging.can_transition_to(&EditorState::default()));
        assert!(!dragging.can_transition_to(&EditorState::ConnectDragging {
            source: NodeId(2),
            pointer: pos2(0.0, 0.0),
        }));
    }

    #[test]
    fn test_connect_dragging_only_reachable_from_connect() {
        let dragging = EditorState::ConnectDragging {
            source: NodeId(1),
            pointer: pos2(0.0, 0.0),
        };
        assert!(EditorState::Connect.can_transition_to(&dragging));
        assert!(!EditorState::AddNode.can_transition_to(&dragging));
        assert!(!EditorState::default().can_transition_to(&dragging));
    }

    #[test]
    fn test_modes_switch_freely() {
        for from in [Mode::Select, Mode::AddNode, Mode::Connect] {
            for to in [Mode::Select, Mode::AddNode, Mode::Connect] {
                assert!(from.initial_state().can_transition_to(&to.initial_state()));
            }
        }
    }
}
