use std::path::{Path, PathBuf};

/// User preferences kept between runs in eframe's storage.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct Settings {
    /// Directory the file dialogs open in.
    pub last_directory: Option<PathBuf>,
    /// Document last saved or loaded.
    pub last_document: Option<PathBuf>,
}

impl Settings {
    /// Restore settings saved by a previous run, falling back to defaults.
    pub fn load(storage: Option<&dyn eframe::Storage>) -> Self {
        storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default()
    }

    pub fn save(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Remember `path` as the current document and its folder as the dialog start.
    pub fn remember_document(&mut self, path: &Path) {
        self.last_document = Some(path.to_owned());
        self.remember_directory(path);
    }

    pub fn remember_directory(&mut self, path: &Path) {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            self.last_directory = Some(dir.to_owned());
        }
    }
}
