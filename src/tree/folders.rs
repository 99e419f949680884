//! Package folder moves.
//!
//! Moves are planned against the untouched tree, checked for conflicts, and
//! only then executed deepest first, so no move invalidates a path another
//! move still needs.

use crate::context::RenameContext;
use crate::error::RenameError;
use crate::tree::walk::walk_project;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveKind {
    /// Rename in place: `to` is a sibling of `from`.
    Rename,
    /// Move a whole package root below `base` (old and new packages have a
    /// different number of segments).
    Relocate { base: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderMove {
    pub from: PathBuf,
    pub to: PathBuf,
    pub kind: MoveKind,
}

/// Compute every folder move for the current identity, deepest first.
///
/// A package root is a directory whose trailing path components spell the
/// old package. Only package roots move, never the folders they share with
/// other packages: a root whose leaf alone changes is renamed in place, any
/// other root is relocated to `<base>/<new path>`. When the leaf changes and
/// both packages have the same number of segments, folders continuing the
/// root with the old leaf name (`acme/acme`) are renamed too.
pub fn plan_folder_moves(ctx: &RenameContext<'_>) -> Result<Vec<FolderMove>, RenameError> {
    let identity = ctx.identity();
    let root = identity.root_dir();
    let old = identity.old_segments();
    let new = identity.new_segments();

    let directories = collect_directories(root, &ctx.options().exclude_dirs)?;
    let package_roots: Vec<&PathBuf> = directories
        .iter()
        .filter(|dir| ends_with_segments(root, dir, &old))
        .collect();

    if package_roots.is_empty() {
        info!(package = identity.old_package(), "no package folders found");
        return Ok(Vec::new());
    }

    let last = old.len() - 1;
    let same_shape = old.len() == new.len();
    let leaf_only = same_shape && old[..last] == new[..last];
    let new_path = identity.new_package_path();

    let mut planned: BTreeMap<PathBuf, FolderMove> = BTreeMap::new();
    for package_root in package_roots {
        if same_shape && old[last] != new[last] {
            for dir in leaf_chain(&directories, package_root, old[last]) {
                planned.insert(
                    dir.clone(),
                    FolderMove {
                        from: dir.clone(),
                        to: dir.with_file_name(new[last]),
                        kind: MoveKind::Rename,
                    },
                );
            }
        }

        let root_move = if leaf_only {
            FolderMove {
                from: package_root.clone(),
                to: package_root.with_file_name(new[last]),
                kind: MoveKind::Rename,
            }
        } else {
            let Some(base) = package_root.ancestors().nth(old.len()) else {
                continue;
            };
            FolderMove {
                from: package_root.clone(),
                to: base.join(&new_path),
                kind: MoveKind::Relocate {
                    base: base.to_path_buf(),
                },
            }
        };
        planned.insert(package_root.clone(), root_move);
    }

    let mut moves: Vec<FolderMove> = planned.into_values().collect();
    moves.sort_by(|a, b| {
        depth(&b.from)
            .cmp(&depth(&a.from))
            .then_with(|| a.from.cmp(&b.from))
    });
    Ok(moves)
}

/// Rename package folders from the old to the new package.
///
/// Every destination is checked before the first move; a non-empty
/// destination aborts with [`RenameError::Conflict`] and leaves the tree as
/// it was. In dry-run mode the moves are only reported.
pub fn rename_folders(ctx: &RenameContext<'_>) -> Result<Vec<FolderMove>, RenameError> {
    let moves = plan_folder_moves(ctx)?;

    for folder_move in &moves {
        check_destination(folder_move)?;
    }

    for folder_move in &moves {
        if !ctx.is_dry_run() {
            apply_move(folder_move, ctx.root_dir())?;
        }
        debug!(
            from = %folder_move.from.display(),
            to = %folder_move.to.display(),
            "moved folder"
        );
        ctx.sink().folder_moved(&folder_move.from, &folder_move.to);
    }

    info!(count = moves.len(), "package folders renamed");
    Ok(moves)
}

/// Directories below `package_root` whose every component is `leaf`:
/// `root/leaf`, `root/leaf/leaf`, and so on.
fn leaf_chain<'d>(
    directories: &'d [PathBuf],
    package_root: &'d Path,
    leaf: &'d str,
) -> impl Iterator<Item = &'d PathBuf> + 'd {
    directories.iter().filter(move |dir| {
        let Ok(relative) = dir.strip_prefix(package_root) else {
            return false;
        };
        let mut components = relative.components().peekable();
        components.peek().is_some()
            && components.all(|component| component.as_os_str().to_str() == Some(leaf))
    })
}

fn check_destination(folder_move: &FolderMove) -> Result<(), RenameError> {
    let FolderMove { from, to, kind } = folder_move;
    if !to.exists() {
        return Ok(());
    }

    let occupied = match kind {
        MoveKind::Rename => !is_empty_dir(to).map_err(|source| RenameError::io(to, source))?,
        // the source is staged away first, so a destination inside it is free
        MoveKind::Relocate { .. } if to.starts_with(from) => false,
        MoveKind::Relocate { .. } => {
            occupied_besides(to, from).map_err(|source| RenameError::io(to, source))?
        }
    };

    if occupied {
        return Err(RenameError::Conflict {
            path: from.clone(),
            destination: to.clone(),
        });
    }
    Ok(())
}

fn apply_move(folder_move: &FolderMove, root: &Path) -> Result<(), RenameError> {
    let FolderMove { from, to, kind } = folder_move;
    match kind {
        MoveKind::Rename => {
            if to.is_dir() {
                fs::remove_dir(to).map_err(|source| RenameError::io(to, source))?;
            }
            fs::rename(from, to).map_err(|source| RenameError::io(from, source))?;
        }
        MoveKind::Relocate { base } => {
            let staging = tempfile::Builder::new()
                .prefix(".project-renamer-")
                .tempdir_in(root)
                .map_err(|source| RenameError::io(root, source))?;
            let staged = staging.path().join("package");
            fs::rename(from, &staged).map_err(|source| RenameError::io(from, source))?;

            prune_empty_ancestors(from.parent(), base)
                .map_err(|source| RenameError::io(from, source))?;

            if to.is_dir() {
                fs::remove_dir(to).map_err(|source| RenameError::io(to, source))?;
            }
            if let Some(parent) = to.parent() {
                fs::create_dir_all(parent).map_err(|source| RenameError::io(parent, source))?;
            }
            fs::rename(&staged, to).map_err(|source| RenameError::io(to, source))?;
        }
    }
    Ok(())
}

/// Remove empty directories from `start` upwards, stopping at `stop`.
fn prune_empty_ancestors(start: Option<&Path>, stop: &Path) -> io::Result<()> {
    let mut current = start;
    while let Some(dir) = current {
        if dir == stop || !dir.starts_with(stop) || !is_empty_dir(dir)? {
            break;
        }
        fs::remove_dir(dir)?;
        current = dir.parent();
    }
    Ok(())
}

/// True when `dest` holds anything other than the directory chain that leads
/// to `from`.
fn occupied_besides(dest: &Path, from: &Path) -> io::Result<bool> {
    if !dest.is_dir() {
        return Ok(true);
    }
    let Ok(rest) = from.strip_prefix(dest) else {
        return Ok(!is_empty_dir(dest)?);
    };

    let mut current = dest.to_path_buf();
    for component in rest.components() {
        let next = current.join(component);
        for entry in fs::read_dir(&current)? {
            if entry?.path() != next {
                return Ok(true);
            }
        }
        if next == from {
            break;
        }
        current = next;
    }
    Ok(false)
}

fn is_empty_dir(path: &Path) -> io::Result<bool> {
    if !path.is_dir() {
        return Ok(false);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

fn collect_directories(root: &Path, exclude_dirs: &[String]) -> Result<Vec<PathBuf>, RenameError> {
    let mut directories = Vec::new();
    for entry in walk_project(root, exclude_dirs) {
        let entry = entry?;
        if entry.depth() > 0 && entry.file_type().is_dir() {
            directories.push(entry.into_path());
        }
    }
    Ok(directories)
}

fn ends_with_segments(root: &Path, dir: &Path, segments: &[&str]) -> bool {
    let Ok(relative) = dir.strip_prefix(root) else {
        return false;
    };
    let components: Vec<&str> = relative
        .components()
        .filter_map(|component| component.as_os_str().to_str())
        .collect();
    components.len() >= segments.len() && components.ends_with(segments)
}

fn depth(path: &Path) -> usize {
    path.components().count()
}
