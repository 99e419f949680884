//! The standard rename pipeline and the identity resolution that precedes
//! it.

use crate::config::RenamerConfig;
use crate::context::RenameContext;
use crate::error::RenameError;
use crate::identity::ProjectIdentity;
use crate::pipeline::{run_script, PipelineReport, Step};
use crate::state::{read_state, update_state_file, StateRecord};
use crate::tree::contents::rewrite_one;
use crate::tree::{rename_folders, rename_project, update_run_configurations, ContentSummary};
use std::path::Path;
use tracing::{debug, info};

pub const RENAME_PIPELINE: &str = "Rename Project";

pub const STEP_RENAME_PACKAGES: &str = "Rename Package Names";
pub const STEP_UPDATE_COMPANION_APP: &str = "Update iOS App";
pub const STEP_UPDATE_RUN_CONFIGS: &str = "Update Run Configurations";
pub const STEP_SAVE_STATE: &str = "Save State";

/// Companion mobile app, relative to the project root.
pub const COMPANION_APP_DIR: &str = "demo/iosApp";
/// Files of the companion app that carry the package, relative to the
/// project root.
pub const COMPANION_APP_FILES: &[&str] = &[
    "demo/iosApp/Configuration/Config.xcconfig",
    "demo/iosApp/iosApp.xcodeproj/project.pbxproj",
];

/// Outcome of comparing the configured target with the recorded state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The recorded rename already produced the requested package.
    AlreadyApplied(StateRecord),
    /// A rename is needed, from the tree's current identifiers.
    Pending(ProjectIdentity),
}

/// Work out what to rename from and to.
///
/// The tree's current identifiers are the ones of the last recorded rename,
/// or the template's when nothing has been recorded.
pub fn resolve_identity(root: &Path, config: &RenamerConfig) -> Result<Resolution, RenameError> {
    let target_package = config.target_package();
    let state = read_state(root)?;

    if let Some(record) = state.as_ref() {
        if record.is_applied(target_package) {
            info!(package = target_package, "rename already applied");
            return Ok(Resolution::AlreadyApplied(record.clone()));
        }
    }

    let (old_package, old_library_id) = match state {
        Some(record) => (record.new_package, record.new_library_id),
        None => (
            config.project.template.package.clone(),
            config.project.template.library_id.clone(),
        ),
    };
    debug!(%old_package, %old_library_id, "resolved current identifiers");

    let identity = ProjectIdentity::new(
        root,
        old_package,
        target_package,
        old_library_id,
        config.target_library_id(),
        config.flags(),
    )?;
    Ok(Resolution::Pending(identity))
}

/// Rewrite the package in the companion app's configuration and project
/// descriptor. A missing app, or a missing file within it, is not an error.
pub fn update_companion_app(ctx: &RenameContext<'_>) -> Result<ContentSummary, RenameError> {
    let mut summary = ContentSummary::default();
    if !ctx.root_dir().join(COMPANION_APP_DIR).is_dir() {
        info!("no companion app, skipping");
        return Ok(summary);
    }

    let rules = ctx.package_rules();
    for relative in COMPANION_APP_FILES {
        let path = ctx.root_dir().join(relative);
        if !path.is_file() {
            debug!(path = %path.display(), "companion file not present");
            continue;
        }
        summary.record(rewrite_one(ctx, &path, &rules)?);
    }
    info!(rewritten = summary.files_rewritten, "companion app updated");
    Ok(summary)
}

/// The four rename steps, in execution order.
pub fn rename_steps<'a>(ctx: &'a RenameContext<'a>) -> Vec<Step<'a>> {
    vec![
        Step::new(STEP_RENAME_PACKAGES, move || {
            let moves = rename_folders(ctx)?;
            let summary = rename_project(ctx)?;
            info!(
                folders = moves.len(),
                files = summary.files_rewritten,
                "package names renamed"
            );
            Ok(())
        }),
        Step::new(STEP_UPDATE_COMPANION_APP, move || {
            update_companion_app(ctx).map(|_| ())
        }),
        Step::new(STEP_UPDATE_RUN_CONFIGS, move || {
            update_run_configurations(ctx).map(|_| ())
        }),
        Step::new(STEP_SAVE_STATE, move || {
            update_state_file(ctx)?;
            Ok(())
        }),
    ]
}

/// Run the full rename pipeline for `ctx`.
pub fn run_project_renamer(ctx: &RenameContext<'_>) -> PipelineReport {
    run_script(RENAME_PIPELINE, rename_steps(ctx), || {
        ctx.sink()
            .pipeline_started(RENAME_PIPELINE, &ctx.identity().as_string_map());
    })
}
