use crate::context::RenameContext;
use crate::error::RenameError;
use crate::rewrite::{rewrite_file, RewriteOutcome, RewriteRule};
use crate::tree::walk::walk_project;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Counters for one pass of the rewriter over a set of files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContentSummary {
    pub files_scanned: usize,
    pub files_rewritten: usize,
    pub replacements: usize,
    pub files_skipped: usize,
}

impl ContentSummary {
    pub(crate) fn record(&mut self, outcome: RewriteOutcome) {
        self.files_scanned += 1;
        match outcome {
            RewriteOutcome::Rewritten { replacements } => {
                self.files_rewritten += 1;
                self.replacements += replacements;
            }
            RewriteOutcome::Unchanged => {}
            RewriteOutcome::Skipped(_) => self.files_skipped += 1,
        }
    }
}

/// Rewrite package (and, when enabled, module) references in every
/// allow-listed file below the project root.
pub fn rename_project(ctx: &RenameContext<'_>) -> Result<ContentSummary, RenameError> {
    let rules = ctx.content_rules();
    if rules.is_empty() {
        info!("content rewriting disabled by flags");
        return Ok(ContentSummary::default());
    }

    let options = ctx.options();
    let mut summary = ContentSummary::default();

    for entry in walk_project(ctx.root_dir(), &options.exclude_dirs) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !options.allows_extension(path) {
            continue;
        }
        if options.is_protected(path) {
            debug!(path = %path.display(), "skipping protected file");
            continue;
        }
        summary.record(rewrite_one(ctx, path, &rules)?);
    }

    info!(
        scanned = summary.files_scanned,
        rewritten = summary.files_rewritten,
        replacements = summary.replacements,
        "project content renamed"
    );
    Ok(summary)
}

pub(crate) fn rewrite_one(
    ctx: &RenameContext<'_>,
    path: &Path,
    rules: &[RewriteRule],
) -> Result<RewriteOutcome, RenameError> {
    rewrite_file(path, rules, ctx.mode(), ctx.sink())
}
