//! Command table: named entry points with typed handlers.

use crate::actions::{resolve_identity, run_project_renamer, Resolution};
use crate::config::RenamerConfig;
use crate::context::{Mode, RenameContext};
use crate::error::RenameError;
use crate::module_path::discover_modules;
use crate::pipeline::PipelineReport;
use crate::sink::ChangeSink;
use crate::state::{read_state, StateRecord};
use serde::Serialize;
use std::path::Path;

/// Inputs every command handler receives.
pub struct CommandContext<'a> {
    pub root: &'a Path,
    pub config: &'a RenamerConfig,
    pub mode: Mode,
    pub sink: &'a dyn ChangeSink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommandOutcome {
    Renamed { report: PipelineReport },
    AlreadyApplied { state: StateRecord },
    Status {
        state: Option<StateRecord>,
        target_package: String,
        target_library_id: String,
    },
    Modules { modules: Vec<String> },
}

impl CommandOutcome {
    /// False only when a pipeline ran and one of its steps failed.
    pub fn is_success(&self) -> bool {
        match self {
            CommandOutcome::Renamed { report } => report.is_success(),
            _ => true,
        }
    }
}

pub type CommandHandler = fn(&CommandContext<'_>) -> Result<CommandOutcome, RenameError>;

pub struct Command {
    pub name: &'static str,
    pub description: &'static str,
    pub handler: CommandHandler,
}

pub const COMMANDS: &[Command] = &[
    Command {
        name: "rename-project",
        description: "Rename packages, folders, companion app and run configurations",
        handler: rename_project_command,
    },
    Command {
        name: "status",
        description: "Show the last applied rename and the configured target",
        handler: status_command,
    },
    Command {
        name: "modules",
        description: "List build modules derived from the project folders",
        handler: modules_command,
    },
];

pub fn find_command(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|command| command.name == name)
}

pub fn command_names() -> Vec<&'static str> {
    COMMANDS.iter().map(|command| command.name).collect()
}

fn rename_project_command(ctx: &CommandContext<'_>) -> Result<CommandOutcome, RenameError> {
    let identity = match resolve_identity(ctx.root, ctx.config)? {
        Resolution::AlreadyApplied(state) => return Ok(CommandOutcome::AlreadyApplied { state }),
        Resolution::Pending(identity) => identity,
    };
    let options = ctx.config.rename_options(identity.root_dir());
    let rename_ctx = RenameContext::new(identity, options, ctx.mode, ctx.sink);
    let report = run_project_renamer(&rename_ctx);
    Ok(CommandOutcome::Renamed { report })
}

fn status_command(ctx: &CommandContext<'_>) -> Result<CommandOutcome, RenameError> {
    Ok(CommandOutcome::Status {
        state: read_state(ctx.root)?,
        target_package: ctx.config.target_package().to_string(),
        target_library_id: ctx.config.target_library_id().to_string(),
    })
}

fn modules_command(ctx: &CommandContext<'_>) -> Result<CommandOutcome, RenameError> {
    let options = ctx.config.rename_options(ctx.root);
    let modules = discover_modules(
        ctx.root,
        ctx.config.target_library_id(),
        &options.library_folder,
        &options.exclude_dirs,
    )?;
    Ok(CommandOutcome::Modules { modules })
}
