//! Project Renamer: rebrands a multi-module project template.
//!
//! Given the package and library id a project currently carries and the ones
//! it should carry, the engine moves package folders, rewrites package and
//! module references inside text files, updates the companion iOS app and
//! IDE run configurations, and records the applied rename so reruns are
//! no-ops.
//!
//! # Architecture
//!
//! Every operation receives an explicit [`RenameContext`] (identity,
//! options, mode and a [`ChangeSink`]). The rename itself is a fail-fast
//! [`pipeline`] of named steps; nothing that already ran is rolled back.
//!
//! # Safety
//!
//! - Substitutions are token-bounded: `com.foo` never matches `com.foobar`
//! - All folder moves are conflict-checked before the first one runs
//! - Atomic file writes (tempfile + fsync + rename)
//! - Unchanged files are never written
//! - Binary and non-UTF-8 files are never rewritten
//!
//! # Example
//!
//! ```no_run
//! use project_renamer::{
//!     run_project_renamer, Mode, NoopSink, ProjectIdentity, RenameContext, RenameOptions,
//!     RewriteFlags,
//! };
//!
//! let identity = ProjectIdentity::new(
//!     "/path/to/project",
//!     "com.example.template",
//!     "com.widgets",
//!     "template",
//!     "widgets",
//!     RewriteFlags::default(),
//! )
//! .expect("valid identifiers");
//! let ctx = RenameContext::new(identity, RenameOptions::default(), Mode::Apply, &NoopSink);
//!
//! let report = run_project_renamer(&ctx);
//! println!("{report}");
//! ```

pub mod actions;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod identity;
pub mod module_path;
pub mod pipeline;
pub mod rewrite;
pub mod sink;
pub mod state;
pub mod tree;

pub use actions::{resolve_identity, run_project_renamer, update_companion_app, Resolution};
pub use commands::{find_command, Command, CommandContext, CommandOutcome, COMMANDS};
pub use config::{load_config, ConfigError, RenamerConfig};
pub use context::{Mode, RenameContext, RenameOptions};
pub use error::{RenameError, ValidationError, ValidationIssue};
pub use identity::{ProjectIdentity, RewriteFlags};
pub use pipeline::{run_script, PipelineReport, Step, StepResult, StepStatus};
pub use rewrite::{replace_bounded, rewrite_file, Boundary, RewriteOutcome, RewriteRule};
pub use sink::{ChangeSink, NoopSink, RecordingSink};
pub use state::{read_state, update_state_file, write_state, StateError, StateRecord};
pub use tree::{rename_folders, rename_project, update_run_configurations, ContentSummary};
