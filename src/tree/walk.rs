use crate::error::RenameError;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Walk `root` in file-name order, never descending into directories whose
/// name is in `exclude_dirs`.
pub(crate) fn walk_project<'a>(
    root: &'a Path,
    exclude_dirs: &'a [String],
) -> impl Iterator<Item = Result<DirEntry, RenameError>> + 'a {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| entry.depth() == 0 || !is_excluded_dir(entry, exclude_dirs))
        .map(|entry| entry.map_err(RenameError::from))
}

fn is_excluded_dir(entry: &DirEntry, exclude_dirs: &[String]) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| exclude_dirs.iter().any(|excluded| excluded == name))
}
