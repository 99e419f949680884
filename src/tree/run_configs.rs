//! IDE run-configuration descriptors.
//!
//! Shared run configurations live in `.run/`; project-local ones in
//! `.idea/runConfigurations/`. Both embed module names and main-class
//! packages.

use crate::context::RenameContext;
use crate::error::RenameError;
use crate::tree::contents::{rewrite_one, ContentSummary};
use crate::tree::walk::walk_project;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::info;

pub const RUN_CONFIG_DIRS: &[&str] = &[".run", ".idea/runConfigurations"];

/// Collect every run-configuration descriptor below `root`: `*.xml` inside
/// the run-configuration folders, and `*.run.xml` anywhere else.
pub fn find_run_configurations(
    root: &Path,
    exclude_dirs: &[String],
) -> Result<Vec<PathBuf>, RenameError> {
    let mut found = BTreeSet::new();

    for dir in RUN_CONFIG_DIRS {
        let dir = root.join(dir);
        if !dir.is_dir() {
            continue;
        }
        for entry in walk_project(&dir, &[]) {
            let entry = entry?;
            if entry.file_type().is_file() && has_extension(entry.path(), "xml") {
                found.insert(entry.into_path());
            }
        }
    }

    for entry in walk_project(root, exclude_dirs) {
        let entry = entry?;
        let is_run_xml = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(".run.xml"));
        if entry.file_type().is_file() && is_run_xml {
            found.insert(entry.into_path());
        }
    }

    Ok(found.into_iter().collect())
}

/// Apply the content rules to every run-configuration descriptor.
pub fn update_run_configurations(ctx: &RenameContext<'_>) -> Result<ContentSummary, RenameError> {
    let rules = ctx.content_rules();
    let mut summary = ContentSummary::default();
    if rules.is_empty() {
        return Ok(summary);
    }

    for path in find_run_configurations(ctx.root_dir(), &ctx.options().exclude_dirs)? {
        summary.record(rewrite_one(ctx, &path, &rules)?);
    }

    info!(
        found = summary.files_scanned,
        rewritten = summary.files_rewritten,
        "run configurations updated"
    );
    Ok(summary)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
