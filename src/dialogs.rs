//! Interfaces of the UI collaborators the editor relies on but does not implement.

use std::path::PathBuf;

/// A named file-type filter for the file pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub extensions: &'static [&'static str],
}

pub const JSON_FILTER: FileFilter = FileFilter {
    name: "JSON Files",
    extensions: &["json"],
};

pub const PNG_FILTER: FileFilter = FileFilter {
    name: "PNG Files",
    extensions: &["png"],
};

/// Modal dialogs and file pickers.
///
/// Every method blocks until the user answers; `None`/`false` means the user
/// cancelled.
pub trait Dialogs {
    /// Ask for a line (or several) of text.
    fn prompt(&mut self, title: &str, label: &str, initial: Option<&str>) -> Option<String>;

    fn choose_save_path(&mut self, title: &str, filter: &FileFilter) -> Option<PathBuf>;

    fn choose_open_path(&mut self, title: &str, filter: &FileFilter) -> Option<PathBuf>;

    /// Yes/no question. `true` means yes.
    fn confirm(&mut self, title: &str, message: &str) -> bool;

    /// Show an error to the user.
    fn notify_error(&mut self, title: &str, message: &str);
}

pub const EDIT_NODE_TITLE: &str = "Edit Node";
pub const EDIT_NODE_LABEL: &str = "Text:";
pub const SAVE_TITLE: &str = "Save flowchart";
pub const LOAD_TITLE: &str = "Load flowchart";
pub const EXPORT_TITLE: &str = "Export PNG";
pub const CLEAR_TITLE: &str = "Clear";
pub const CLEAR_MESSAGE: &str = "Clear the canvas?";
pub const ERROR_TITLE: &str = "Error";
