use egui::{Align2, Rect};

use crate::command::{Command, Effect};
use crate::dialogs;
use crate::graph::NodeId;
use crate::input::{InputEvent, InputHandler};
use crate::native_dialogs::NativeDialogs;
use crate::panels::{central_panel, status_panel, tools_panel};
use crate::renderer::Renderer;
use crate::settings::Settings;
use crate::state::EditorContext;

/// Text edit waiting for the user to press OK or Cancel.
#[derive(Debug)]
struct PendingTextEdit {
    node: NodeId,
    buffer: String,
}

/// The eframe shell around the editor.
///
/// Pointer and keyboard input from the canvas is forwarded to the
/// [`EditorContext`]; the effects it returns are answered with egui windows
/// (text edit, clear confirmation) or native dialogs (files, errors).
pub struct FlowchartApp {
    context: EditorContext,
    settings: Settings,
    renderer: Renderer,
    input_handler: InputHandler,
    text_edit: Option<PendingTextEdit>,
    confirm_clear: bool,
}

impl Default for FlowchartApp {
    fn default() -> Self {
        Self {
            context: EditorContext::new(),
            settings: Settings::default(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(Rect::ZERO),
            text_edit: None,
            confirm_clear: false,
        }
    }
}

impl FlowchartApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = Settings::load(cc.storage);
        log::debug!("Restored settings: {:?}", settings);
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn context(&self) -> &EditorContext {
        &self.context
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// True while an egui dialog is waiting for an answer.
    pub fn modal_open(&self) -> bool {
        self.text_edit.is_some() || self.confirm_clear
    }

    pub fn execute_command(&mut self, command: Command) {
        let effects = self.context.handle_command(command);
        self.apply_effects(effects);
    }

    /// Feed this frame's canvas input to the editor.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: Rect, canvas_hovered: bool) {
        self.input_handler.set_canvas_rect(canvas_rect);
        let accept_presses = canvas_hovered && !self.modal_open();

        for event in self.input_handler.process_input(ctx, accept_presses) {
            match event {
                InputEvent::Pointer(pointer) => {
                    let effects = self.context.handle_pointer(pointer);
                    self.apply_effects(effects);
                }
                InputEvent::KeyDown { key, .. }
                    if matches!(key, egui::Key::Delete | egui::Key::Backspace)
                        && !self.modal_open()
                        && !ctx.wants_keyboard_input() =>
                {
                    self.execute_command(Command::DeleteSelected);
                }
                InputEvent::KeyDown { .. } => {}
            }
        }
    }

    pub fn render(&mut self, painter: &egui::Painter, rect: Rect) {
        self.renderer.render(painter, rect, &self.context);
    }

    fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::EditText { node, current } => {
                    self.text_edit = Some(PendingTextEdit {
                        node,
                        buffer: current,
                    });
                }
                Effect::ConfirmClear => self.confirm_clear = true,
                file_effect => self.run_file_effect(file_effect),
            }
        }
    }

    /// File pickers block inside rfd, so these are answered on the spot.
    fn run_file_effect(&mut self, effect: Effect) {
        let mut native = NativeDialogs::new(self.settings.last_directory.clone());
        self.context.run_effects(vec![effect], &mut native);

        if let Some(picked) = &native.picked {
            self.settings.remember_directory(picked);
        }
        if let Some(document) = self.context.document_path() {
            if self.settings.last_document.as_deref() != Some(document) {
                self.settings.remember_document(document);
            }
        }
    }

    fn show_text_edit(&mut self, ctx: &egui::Context) {
        let Some(edit) = &mut self.text_edit else {
            return;
        };
        let mut answer = None;
        egui::Window::new(dialogs::EDIT_NODE_TITLE)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(dialogs::EDIT_NODE_LABEL);
                ui.add(egui::TextEdit::multiline(&mut edit.buffer).desired_rows(4));
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });

        match answer {
            Some(true) => {
                if let Some(edit) = self.text_edit.take() {
                    if let Err(err) = self.context.apply_text(edit.node, edit.buffer) {
                        log::warn!("Text edit dropped: {}", err);
                    }
                }
            }
            Some(false) => self.text_edit = None,
            None => {}
        }
    }

    fn show_confirm_clear(&mut self, ctx: &egui::Context) {
        if !self.confirm_clear {
            return;
        }
        let mut answer = None;
        egui::Window::new(dialogs::CLEAR_TITLE)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(dialogs::CLEAR_MESSAGE);
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("No").clicked() {
                        answer = Some(false);
                    }
                });
            });

        if let Some(yes) = answer {
            self.confirm_clear = false;
            if yes {
                self.context.clear();
            }
        }
    }
}

impl eframe::App for FlowchartApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.settings.save(storage);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);
        status_panel(self, ctx);
        central_panel(self, ctx);

        self.show_text_edit(ctx);
        self.show_confirm_clear(ctx);
    }
}
