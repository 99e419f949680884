//! Behavioral tests for the rename engine, driven through the library API
//! against temporary project trees.

use project_renamer::{
    Mode, NoopSink, PipelineReport, ProjectIdentity, RenameContext, RenameOptions, RewriteFlags,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

mod conflict;
mod fail_fast;
mod folder_rename;
mod idempotence;
mod round_trip;
mod token_boundary;

pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

pub fn read_file(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

pub fn write_config(root: &Path, package: &str, library_id: &str) {
    write_file(
        root,
        "configs/project.toml",
        &format!(
            "[project]\npackage = \"{package}\"\n\n[template]\npackage = \"com.acme\"\nlibrary_id = \"acme\"\n\n[rename]\nmodule_references = true\n"
        ),
    );
    write_file(
        root,
        "configs/library.toml",
        &format!("[library]\nid = \"{library_id}\"\n"),
    );
}

/// Every file below `root` (state file excluded) with its bytes, keyed by
/// forward-slash relative path.
pub fn snapshot(root: &Path) -> BTreeMap<String, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            if relative == "configs/rename-state.properties" {
                return None;
            }
            Some((relative, fs::read(entry.path()).unwrap()))
        })
        .collect()
}

pub fn rename(root: &Path, old: &str, new: &str) -> PipelineReport {
    let identity =
        ProjectIdentity::new(root, old, new, "acme", "acme", RewriteFlags::default()).unwrap();
    let ctx = RenameContext::new(identity, RenameOptions::default(), Mode::Apply, &NoopSink);
    project_renamer::run_project_renamer(&ctx)
}
