//! Native file pickers and message boxes backed by `rfd`.

use std::path::PathBuf;

use crate::dialogs::{Dialogs, FileFilter};

/// [`Dialogs`] implemented with the platform's own dialogs.
///
/// There is no native text prompt; the app answers text edits with an egui
/// window and never routes them here.
#[derive(Debug, Default)]
pub struct NativeDialogs {
    /// Folder the file pickers open in.
    pub directory: Option<PathBuf>,
    /// Last path the user picked, if any.
    pub picked: Option<PathBuf>,
}

impl NativeDialogs {
    pub fn new(directory: Option<PathBuf>) -> Self {
        Self {
            directory,
            picked: None,
        }
    }

    fn file_dialog(&self, title: &str, filter: &FileFilter) -> rfd::FileDialog {
        let dialog = rfd::FileDialog::new()
            .set_title(title)
            .add_filter(filter.name, filter.extensions);
        match &self.directory {
            Some(dir) => dialog.set_directory(dir),
            None => dialog,
        }
    }
}

impl Dialogs for NativeDialogs {
    fn prompt(&mut self, title: &str, _label: &str, _initial: Option<&str>) -> Option<String> {
        log::warn!("No native prompt for {:?}", title);
        None
    }

    fn choose_save_path(&mut self, title: &str, filter: &FileFilter) -> Option<PathBuf> {
        let mut dialog = self.file_dialog(title, filter);
        if let Some(ext) = filter.extensions.first() {
            dialog = dialog.set_file_name(format!("flowchart.{ext}"));
        }
        let path = with_extension(dialog.save_file()?, filter);
        self.picked = Some(path.clone());
        Some(path)
    }

    fn choose_open_path(&mut self, title: &str, filter: &FileFilter) -> Option<PathBuf> {
        let path = self.file_dialog(title, filter).pick_file()?;
        self.picked = Some(path.clone());
        Some(path)
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        let answer = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Warning)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::YesNo)
            .show();
        matches!(answer, rfd::MessageDialogResult::Yes)
    }

    fn notify_error(&mut self, title: &str, message: &str) {
        rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

/// Append the filter's extension unless the name already ends with one of its extensions.
fn with_extension(path: PathBuf, filter: &FileFilter) -> PathBuf {
    let matches = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| filter.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)));
    match filter.extensions.first() {
        Some(ext) if !matches => {
            let mut name = path.into_os_string();
            name.push(".");
            name.push(ext);
            PathBuf::from(name)
        }
        _ => path,
    }
}
