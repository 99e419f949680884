//! Observers for the changes the engine makes.

use indexmap::IndexMap;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

/// Receives every folder move and file rewrite as it happens (or, in
/// dry-run mode, as it would happen).
pub trait ChangeSink {
    /// Diagnostic details printed once before a pipeline runs its steps.
    fn pipeline_started(&self, _name: &str, _details: &IndexMap<&'static str, String>) {}

    fn folder_moved(&self, _from: &Path, _to: &Path) {}

    fn file_rewritten(&self, _path: &Path, _before: &str, _after: &str) {}
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl ChangeSink for NoopSink {}

/// Keeps a record of reported changes; used for previews and tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    folders: RefCell<Vec<(PathBuf, PathBuf)>>,
    files: RefCell<Vec<PathBuf>>,
    pipelines: RefCell<Vec<String>>,
}

impl RecordingSink {
    pub fn moved_folders(&self) -> Vec<(PathBuf, PathBuf)> {
        self.folders.borrow().clone()
    }

    pub fn rewritten_files(&self) -> Vec<PathBuf> {
        self.files.borrow().clone()
    }

    pub fn started_pipelines(&self) -> Vec<String> {
        self.pipelines.borrow().clone()
    }
}

impl ChangeSink for RecordingSink {
    fn pipeline_started(&self, name: &str, _details: &IndexMap<&'static str, String>) {
        self.pipelines.borrow_mut().push(name.to_string());
    }

    fn folder_moved(&self, from: &Path, to: &Path) {
        self.folders
            .borrow_mut()
            .push((from.to_path_buf(), to.to_path_buf()));
    }

    fn file_rewritten(&self, path: &Path, _before: &str, _after: &str) {
        self.files.borrow_mut().push(path.to_path_buf());
    }
}
