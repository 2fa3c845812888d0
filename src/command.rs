use crate::graph::NodeId;

/// Commands issued by the toolbar (or keyboard shortcuts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetSelect,
    SetAdd,
    SetConnect,
    DeleteSelected,
    Save,
    Load,
    ExportPng,
    Clear,
}

impl Command {
    /// Toolbar buttons, in display order.
    pub const TOOLBAR: [Command; 8] = [
        Command::SetAdd,
        Command::SetConnect,
        Command::SetSelect,
        Command::DeleteSelected,
        Command::Save,
        Command::Load,
        Command::ExportPng,
        Command::Clear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Command::SetSelect => "Select",
            Command::SetAdd => "Add Node",
            Command::SetConnect => "Connect",
            Command::DeleteSelected => "Delete Selected",
            Command::Save => "Save",
            Command::Load => "Load",
            Command::ExportPng => "Export PNG",
            Command::Clear => "Clear",
        }
    }
}

/// A request the controller cannot satisfy on its own.
///
/// Effects are handed back to whoever drives the controller, which asks the
/// matching collaborator (dialog, file picker) and reports the answer through
/// the controller's follow-up methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask for a node's new text, starting from `current`.
    EditText { node: NodeId, current: String },
    /// Ask the user to confirm wiping the canvas.
    ConfirmClear,
    /// Ask where to save the document.
    ChooseSavePath,
    /// Ask which document to load.
    ChooseOpenPath,
    /// Ask where to write the PNG export.
    ChooseExportPath,
}
