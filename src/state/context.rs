//! The interaction controller: owns the graph and turns pointer events and
//! toolbar commands into graph mutations.
//!
//! `EditorContext` is the only thing that mutates the [`GraphModel`]. Pointer
//! events are interpreted according to the current [`EditorState`]; every
//! state change goes through [`EditorContext::transition_to`], which rejects
//! transitions the state machine does not allow.
//!
//! Some reactions need an answer from the user (new node text, a file path,
//! a confirmation). Those come back as [`Effect`]s. A caller that can block on
//! dialogs hands them to [`EditorContext::run_effects`]; the egui shell instead
//! answers them over several frames and reports back through the follow-up
//! methods (`apply_text`, `clear`, `save_to`, `load_from`, `export_to`).
//!
//! # Example
//!
//! ```rust
//! use eframe_flowchart::state::{EditorContext, Mode};
//! use eframe_flowchart::input::PointerEvent;
//! use egui::pos2;
//!
//! let mut context = EditorContext::new();
//! context.set_mode(Mode::AddNode);
//! context.handle_pointer(PointerEvent::Down(pos2(10.0, 10.0)));
//! assert_eq!(context.model().node_count(), 1);
//! ```
use std::path::{Path, PathBuf};

use egui::{Pos2, Rect};
use thiserror::Error;

use super::editor_state::{EditorState, Mode, SelectGesture};
use super::persistence;
use crate::command::{Command, Effect};
use crate::dialogs::{self, Dialogs};
use crate::error::{EditorError, GraphError};
use crate::export;
use crate::geometry::{Segment, hit_testing};
use crate::graph::{DEFAULT_NODE_TEXT, GraphModel, NodeId};
use crate::input::PointerEvent;
use crate::selection::Selection;
use crate::style::EDGE_HIT_TOLERANCE;

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateTransitionError {
    #[error("cannot go from {from:?} to {to:?}")]
    InvalidTransition { from: EditorState, to: EditorState },
}

#[derive(Debug, Default)]
pub struct EditorContext {
    state: EditorState,
    model: GraphModel,
    selection: Selection,
    /// Document last saved to or loaded from.
    document_path: Option<PathBuf>,
}

impl EditorContext {
    /// Creates a context with an empty graph in `Select` mode.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: GraphModel) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn document_path(&self) -> Option<&Path> {
        self.document_path.as_deref()
    }

    /// Attempts to transition to a new state.
    ///
    /// # Errors
    ///
    /// Returns `StateTransitionError::InvalidTransition` if the requested transition
    /// is not allowed from the current state.
    pub fn transition_to(&mut self, new_state: EditorState) -> Result<(), StateTransitionError> {
        if !self.state.can_transition_to(&new_state) {
            return Err(StateTransitionError::InvalidTransition {
                from: self.state,
                to: new_state,
            });
        }
        if self.state.mode() != new_state.mode() || self.state.is_busy() != new_state.is_busy() {
            log::debug!("Editor state {:?} -> {:?}", self.state, new_state);
        }
        self.state = new_state;
        Ok(())
    }

    /// Switch tools. An unfinished connection is discarded first.
    pub fn set_mode(&mut self, mode: Mode) {
        self.cancel_gesture();
        if let Err(err) = self.transition_to(mode.initial_state()) {
            log::warn!("Ignoring mode change: {}", err);
        }
    }

    /// Abandon a drag, rubber band or connection preview without touching the graph.
    pub fn cancel_gesture(&mut self) {
        let cancelled = self.state.cancelled();
        if let Err(err) = self.transition_to(cancelled) {
            log::warn!("Could not cancel gesture: {}", err);
        }
    }

    /// Feed one pointer event through the state machine.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Vec<Effect> {
        let mut effects = Vec::new();

        let next = match (self.state, event) {
            (EditorState::Select { .. }, PointerEvent::Down(pos)) => {
                Some(self.begin_select_gesture(pos))
            }
            (EditorState::Select { gesture: SelectGesture::Dragging { last } }, PointerEvent::Move(pos)) => {
                self.drag_selected_nodes(pos - last);
                Some(EditorState::Select {
                    gesture: SelectGesture::Dragging { last: pos },
                })
            }
            (EditorState::Select { gesture: SelectGesture::Dragging { last } }, PointerEvent::Up(pos)) => {
                self.drag_selected_nodes(pos - last);
                Some(EditorState::default())
            }
            (EditorState::Select { gesture: SelectGesture::RubberBand { start, .. } }, PointerEvent::Move(pos)) => {
                self.selection = Selection::from_rect(&self.model, Rect::from_two_pos(start, pos));
                Some(EditorState::Select {
                    gesture: SelectGesture::RubberBand { start, current: pos },
                })
            }
            (EditorState::Select { gesture: SelectGesture::RubberBand { start, .. } }, PointerEvent::Up(pos)) => {
                self.selection = Selection::from_rect(&self.model, Rect::from_two_pos(start, pos));
                Some(EditorState::default())
            }
            (EditorState::Select { .. }, PointerEvent::DoubleClick(pos)) => {
                if let Some(node) = self.model.node_at(pos) {
                    effects.push(Effect::EditText {
                        node: node.id(),
                        current: node.text.clone(),
                    });
                }
                None
            }
            (EditorState::AddNode, PointerEvent::Down(pos)) => {
                let id = self.model.add_node(pos, DEFAULT_NODE_TEXT).id();
                log::debug!("Added node {} at {:?}", id, pos);
                None
            }
            (EditorState::Connect, PointerEvent::Down(pos)) => self
                .model
                .node_at(pos)
                .map(|node| EditorState::ConnectDragging {
                    source: node.id(),
                    pointer: pos,
                }),
            (EditorState::ConnectDragging { source, .. }, PointerEvent::Move(pos)) => {
                Some(EditorState::ConnectDragging { source, pointer: pos })
            }
            (EditorState::ConnectDragging { source, .. }, PointerEvent::Up(pos)) => {
                self.finish_connection(source, pos);
                Some(EditorState::Connect)
            }
            _ => None,
        };

        if let Some(next) = next {
            if let Err(err) = self.transition_to(next) {
                log::warn!("Ignoring {:?}: {}", event, err);
            }
        }
        effects
    }

    /// Run a toolbar command. File and clear commands only return the
    /// request for a path or confirmation; the work happens in the follow-ups.
    pub fn handle_command(&mut self, command: Command) -> Vec<Effect> {
        log::debug!("Command {:?} in {:?}", command, self.state);
        match command {
            Command::SetSelect => self.set_mode(Mode::Select),
            Command::SetAdd => self.set_mode(Mode::AddNode),
            Command::SetConnect => self.set_mode(Mode::Connect),
            Command::DeleteSelected => self.delete_selected(),
            Command::Save => return vec![Effect::ChooseSavePath],
            Command::Load => return vec![Effect::ChooseOpenPath],
            Command::ExportPng => return vec![Effect::ChooseExportPath],
            Command::Clear => return vec![Effect::ConfirmClear],
        }
        Vec::new()
    }

    /// Remove every selected node (with its edges) and every selected edge.
    pub fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let nodes: Vec<_> = self.selection.nodes().collect();
        let edges: Vec<_> = self.selection.edges().collect();

        for id in nodes {
            if let Err(err) = self.model.remove_node(id) {
                log::warn!("Delete skipped: {}", err);
            }
        }
        // Edges attached to a deleted node are already gone.
        for id in edges {
            if !self.model.contains_edge(id) {
                continue;
            }
            if let Err(err) = self.model.remove_edge(id) {
                log::warn!("Delete skipped: {}", err);
            }
        }

        self.selection.clear();
        if let Some(source) = self.state.connect_source() {
            if !self.model.contains_node(source) {
                self.cancel_gesture();
            }
        }
    }

    /// Replace a node's text (answer to [`Effect::EditText`]).
    pub fn apply_text(&mut self, node: NodeId, text: impl Into<String>) -> Result<(), GraphError> {
        self.model.set_text(node, text)
    }

    /// Empty the graph and restart id allocation (answer to a confirmed [`Effect::ConfirmClear`]).
    pub fn clear(&mut self) {
        self.cancel_gesture();
        self.model.clear();
        self.selection.clear();
        log::info!("Cleared the canvas");
    }

    pub fn save_to(&mut self, path: &Path) -> Result<(), EditorError> {
        persistence::save_to_path(&self.model, path)?;
        self.document_path = Some(path.to_owned());
        Ok(())
    }

    /// Replace the graph with the document at `path`.
    ///
    /// The new graph is fully built before the old one is dropped, so on error
    /// the current graph is left exactly as it was.
    pub fn load_from(&mut self, path: &Path) -> Result<(), EditorError> {
        let model = persistence::load_from_path(path)?;
        self.cancel_gesture();
        self.model = model;
        self.selection.clear();
        self.document_path = Some(path.to_owned());
        Ok(())
    }

    pub fn export_to(&self, path: &Path) -> Result<(), EditorError> {
        export::export_png(&self.model, path)?;
        Ok(())
    }

    /// Answer effects by asking `dialogs`, blocking on each in turn.
    pub fn run_effects(&mut self, effects: Vec<Effect>, dialogs: &mut dyn Dialogs) {
        for effect in effects {
            match effect {
                Effect::EditText { node, current } => {
                    let answer =
                        dialogs.prompt(dialogs::EDIT_NODE_TITLE, dialogs::EDIT_NODE_LABEL, Some(&current));
                    if let Some(text) = answer {
                        if let Err(err) = self.apply_text(node, text) {
                            log::warn!("Text edit dropped: {}", err);
                        }
                    }
                }
                Effect::ConfirmClear => {
                    if dialogs.confirm(dialogs::CLEAR_TITLE, dialogs::CLEAR_MESSAGE) {
                        self.clear();
                    }
                }
                Effect::ChooseSavePath => {
                    if let Some(path) = dialogs.choose_save_path(dialogs::SAVE_TITLE, &dialogs::JSON_FILTER) {
                        let result = self.save_to(&path);
                        report(result, dialogs);
                    }
                }
                Effect::ChooseOpenPath => {
                    if let Some(path) = dialogs.choose_open_path(dialogs::LOAD_TITLE, &dialogs::JSON_FILTER) {
                        let result = self.load_from(&path);
                        report(result, dialogs);
                    }
                }
                Effect::ChooseExportPath => {
                    if let Some(path) = dialogs.choose_save_path(dialogs::EXPORT_TITLE, &dialogs::PNG_FILTER) {
                        let result = self.export_to(&path);
                        report(result, dialogs);
                    }
                }
            }
        }
    }

    /// `handle_pointer` followed by `run_effects`.
    pub fn dispatch_pointer(&mut self, event: PointerEvent, dialogs: &mut dyn Dialogs) {
        let effects = self.handle_pointer(event);
        self.run_effects(effects, dialogs);
    }

    /// `handle_command` followed by `run_effects`.
    pub fn dispatch_command(&mut self, command: Command, dialogs: &mut dyn Dialogs) {
        let effects = self.handle_command(command);
        self.run_effects(effects, dialogs);
    }

    /// Dashed line from the source node's center to the pointer while connecting.
    pub fn connection_preview(&self) -> Option<Segment> {
        let EditorState::ConnectDragging { source, pointer } = self.state else {
            return None;
        };
        let source = self.model.node(source)?;
        Some(Segment::new(source.center(), pointer))
    }

    /// Rectangle being dragged out for a rubber-band selection.
    pub fn rubber_band(&self) -> Option<Rect> {
        match self.state {
            EditorState::Select {
                gesture: SelectGesture::RubberBand { start, current },
            } => Some(Rect::from_two_pos(start, current)),
            _ => None,
        }
    }

    fn begin_select_gesture(&mut self, pos: Pos2) -> EditorState {
        if let Some(node) = self.model.node_at(pos) {
            let id = node.id();
            if !self.selection.contains_node(id) {
                self.selection = Selection::single_node(id);
            }
            return EditorState::Select {
                gesture: SelectGesture::Dragging { last: pos },
            };
        }
        if let Some(edge) = hit_testing::edge_at(&self.model, pos, EDGE_HIT_TOLERANCE) {
            self.selection = Selection::single_edge(edge.id());
            return EditorState::default();
        }
        self.selection.clear();
        EditorState::Select {
            gesture: SelectGesture::RubberBand { start: pos, current: pos },
        }
    }

    fn drag_selected_nodes(&mut self, delta: egui::Vec2) {
        if delta == egui::Vec2::ZERO {
            return;
        }
        let selected: Vec<_> = self.selection.nodes().collect();
        for id in selected {
            let Some(position) = self.model.node(id).map(|node| node.position) else {
                continue;
            };
            if let Err(err) = self.model.move_node(id, position + delta) {
                log::warn!("Drag skipped: {}", err);
            }
        }
    }

    /// Create the edge for a connection released at `pos`, if it landed on
    /// another node. Releasing on empty canvas or on the source itself is a no-op.
    fn finish_connection(&mut self, source: NodeId, pos: Pos2) {
        let target = self
            .model
            .nodes()
            .rev()
            .find(|node| node.id() != source && node.hit_test(pos))
            .map(|node| node.id());

        let Some(target) = target else {
            log::debug!("Connection from {} released over no other node", source);
            return;
        };
        match self.model.add_edge(source, target) {
            Ok(edge) => log::debug!("Connected {} -> {} as edge {}", source, target, edge.id()),
            Err(GraphError::SelfLoop(_)) => {}
            Err(err) => log::warn!("Connection discarded: {}", err),
        }
    }
}

fn report(result: Result<(), EditorError>, dialogs: &mut dyn Dialogs) {
    if let Err(err) = result {
        log::error!("{}", err);
        dialogs.notify_error(dialogs::ERROR_TITLE, &err.to_string());
    }
}
