use crate::context::Mode;
use crate::error::RenameError;
use crate::rewrite::rules::{apply_rules, RewriteRule};
use crate::sink::ChangeSink;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Extensions that are never opened for rewriting, even when targeted
/// explicitly.
pub const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "ico", "icns", "svgz", "jar", "aar", "class",
    "dex", "apk", "aab", "ipa", "so", "dylib", "dll", "a", "o", "bin", "zip", "gz", "tgz", "tar",
    "7z", "xz", "keystore", "jks", "p12", "ttf", "otf", "woff", "woff2", "pdf", "mp3", "mp4",
    "wav", "db", "sqlite",
];

pub fn is_binary_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            BINARY_EXTENSIONS
                .iter()
                .any(|binary| binary.eq_ignore_ascii_case(ext))
        })
}

/// Why a file was left alone without being read as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Binary,
    NotUtf8,
}

/// Result of running the rewriter over one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "RewriteOutcome reports whether the file changed"]
pub enum RewriteOutcome {
    /// Content changed (and was written unless in dry-run mode).
    Rewritten { replacements: usize },
    /// Nothing matched; the file was not touched.
    Unchanged,
    Skipped(SkipReason),
}

impl RewriteOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, RewriteOutcome::Rewritten { .. })
    }
}

/// Rewrite `path` in place with `rules`.
///
/// Unchanged files are never written, so their timestamps survive.
pub fn rewrite_file(
    path: &Path,
    rules: &[RewriteRule],
    mode: Mode,
    sink: &dyn ChangeSink,
) -> Result<RewriteOutcome, RenameError> {
    if is_binary_path(path) {
        debug!(path = %path.display(), "skipping binary file");
        return Ok(RewriteOutcome::Skipped(SkipReason::Binary));
    }

    let bytes = fs::read(path).map_err(|source| RenameError::io(path, source))?;
    let Ok(original) = String::from_utf8(bytes) else {
        warn!(path = %path.display(), "skipping file that is not valid UTF-8");
        return Ok(RewriteOutcome::Skipped(SkipReason::NotUtf8));
    };

    let (updated, replacements) = apply_rules(&original, rules);
    if replacements == 0 || updated == original {
        return Ok(RewriteOutcome::Unchanged);
    }

    if mode == Mode::Apply {
        atomic_write(path, updated.as_bytes()).map_err(|source| RenameError::io(path, source))?;
    }
    debug!(path = %path.display(), replacements, "rewrote file");
    sink.file_rewritten(path, &original, &updated);

    Ok(RewriteOutcome::Rewritten { replacements })
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Either the full write succeeds or the original file is left intact.
pub(crate) fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = path.parent().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path has no parent directory",
        )
    })?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;

    // keep the permissions of the file being replaced
    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions())?;
    }

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
