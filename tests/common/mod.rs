#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::PathBuf;

use eframe_flowchart::dialogs::{Dialogs, FileFilter};

/// Dialogs that answer from pre-recorded scripts and remember what was asked.
#[derive(Debug, Default)]
pub struct ScriptedDialogs {
    pub prompts: VecDeque<Option<String>>,
    pub paths: VecDeque<Option<PathBuf>>,
    pub confirmations: VecDeque<bool>,
    /// (title, label, initial) of every prompt shown.
    pub prompted: Vec<(String, String, Option<String>)>,
    /// (title, filter name) of every file picker shown.
    pub pickers: Vec<(String, String)>,
    /// (title, message) of every confirmation shown.
    pub confirmed: Vec<(String, String)>,
    /// (title, message) of every error shown.
    pub errors: Vec<(String, String)>,
}

impl ScriptedDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer_prompt(mut self, text: Option<&str>) -> Self {
        self.prompts.push_back(text.map(str::to_owned));
        self
    }

    pub fn answer_path(mut self, path: Option<PathBuf>) -> Self {
        self.paths.push_back(path);
        self
    }

    pub fn answer_confirm(mut self, yes: bool) -> Self {
        self.confirmations.push_back(yes);
        self
    }

    fn next_path(&mut self, title: &str, filter: &FileFilter) -> Option<PathBuf> {
        self.pickers.push((title.to_owned(), filter.name.to_owned()));
        self.paths.pop_front().flatten()
    }
}

impl Dialogs for ScriptedDialogs {
    fn prompt(&mut self, title: &str, label: &str, initial: Option<&str>) -> Option<String> {
        self.prompted
            .push((title.to_owned(), label.to_owned(), initial.map(str::to_owned)));
        self.prompts.pop_front().flatten()
    }

    fn choose_save_path(&mut self, title: &str, filter: &FileFilter) -> Option<PathBuf> {
        self.next_path(title, filter)
    }

    fn choose_open_path(&mut self, title: &str, filter: &FileFilter) -> Option<PathBuf> {
        self.next_path(title, filter)
    }

    fn confirm(&mut self, title: &str, message: &str) -> bool {
        self.confirmed.push((title.to_owned(), message.to_owned()));
        self.confirmations.pop_front().unwrap_or(false)
    }

    fn notify_error(&mut self, title: &str, message: &str) {
        self.errors.push((title.to_owned(), message.to_owned()));
    }
}
