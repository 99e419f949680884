//! Conversions between package identifiers, folder paths and build-module
//! references.
//!
//! All relative paths produced here use forward slashes regardless of the
//! host platform.

use crate::error::RenameError;
use crate::tree::walk::walk_project;
use std::path::{Component, Path, PathBuf};

/// Build descriptors that mark a folder as a build module.
pub const BUILD_DESCRIPTORS: &[&str] = &["build.gradle.kts", "build.gradle"];

/// Split a dot-separated package into its segments.
pub fn package_segments(package: &str) -> Vec<&str> {
    package.split('.').collect()
}

/// `com.acme.app` -> `com/acme/app`
pub fn package_to_path(package: &str) -> PathBuf {
    package_segments(package).iter().collect()
}

/// Path of `path` relative to `root`, joined with `/`.
///
/// Returns `None` when `path` is not below `root`.
pub fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(parts.join("/"))
}

/// Convert a folder (relative, forward-slash form) into a build-module
/// reference.
///
/// Folders inside the library folder are namespaced with the library id:
///
/// ```
/// use project_renamer::module_path::folder_to_module_name;
///
/// assert_eq!(folder_to_module_name("library", "widgets", "library"), ":widgets");
/// assert_eq!(folder_to_module_name("library/core", "widgets", "library"), ":widgets:core");
/// assert_eq!(folder_to_module_name("demo/app", "widgets", "library"), ":demo:app");
/// ```
pub fn folder_to_module_name(path: &str, library_id: &str, library_folder: &str) -> String {
    let path = path.trim_matches('/');
    if path == library_folder {
        return format!(":{library_id}");
    }
    match path
        .strip_prefix(library_folder)
        .and_then(|rest| rest.strip_prefix('/'))
    {
        Some(rest) => format!(":{library_id}:{}", rest.replace('/', ":")),
        None => format!(":{}", path.replace('/', ":")),
    }
}

/// Find every folder below `root` holding a build descriptor and return its
/// module reference, sorted.
///
/// The root folder itself is not a module.
pub fn discover_modules(
    root: &Path,
    library_id: &str,
    library_folder: &str,
    exclude_dirs: &[String],
) -> Result<Vec<String>, RenameError> {
    let mut modules = Vec::new();
    for entry in walk_project(root, exclude_dirs) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_descriptor = entry
            .file_name()
            .to_str()
            .is_some_and(|name| BUILD_DESCRIPTORS.contains(&name));
        if !is_descriptor {
            continue;
        }
        let Some(folder) = entry.path().parent() else {
            continue;
        };
        match relative_slash_path(root, folder) {
            Some(relative) if !relative.is_empty() => {
                modules.push(folder_to_module_name(&relative, library_id, library_folder));
            }
            _ => {}
        }
    }
    modules.sort();
    modules.dedup();
    Ok(modules)
}
