use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indexmap::IndexMap;
use project_renamer::commands::{command_names, find_command, CommandContext, CommandOutcome};
use project_renamer::config::{load_config, PROJECT_CONFIG_PATH};
use project_renamer::{ChangeSink, Mode, PipelineReport, StateRecord, StepStatus, COMMANDS};
use similar::{ChangeTag, TextDiff};
use std::env;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const ROOT_ENV: &str = "PROJECT_RENAMER_ROOT";

#[derive(Parser)]
#[command(name = "project-renamer")]
#[command(about = "Rebrand a multi-module project template", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct RunArgs {
    /// Path to project root (auto-detected if not specified)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Dry run - show what would be changed without modifying files
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show unified diff of changes
    #[arg(short, long)]
    diff: bool,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command from the command table
    Run {
        /// Command name (see `list`)
        command: String,

        #[command(flatten)]
        args: RunArgs,
    },

    /// Rename the project to the configured package and library id
    Rename {
        #[command(flatten)]
        args: RunArgs,
    },

    /// Show the last applied rename and the configured target
    Status {
        /// Path to project root (auto-detected if not specified)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// List build modules derived from the project folders
    Modules {
        /// Path to project root (auto-detected if not specified)
        #[arg(short, long)]
        root: Option<PathBuf>,
    },

    /// List available commands
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run { command, args } => cmd_run(&command, args),
        Commands::Rename { args } => cmd_run("rename-project", args),
        Commands::Status { root } => cmd_run(
            "status",
            RunArgs {
                root,
                dry_run: false,
                diff: false,
                json: false,
            },
        ),
        Commands::Modules { root } => cmd_run(
            "modules",
            RunArgs {
                root,
                dry_run: false,
                diff: false,
                json: false,
            },
        ),
        Commands::List => cmd_list(),
    }
}

/// Log level comes from `-v` when given, else `RUST_LOG`, else `warn`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Resolve project root using multiple detection strategies
///
/// Priority order:
/// 1. Explicit --root flag
/// 2. PROJECT_RENAMER_ROOT environment variable
/// 3. Auto-detect from current directory
fn resolve_root(cli_root: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = cli_root {
        return path
            .canonicalize()
            .with_context(|| format!("project root does not exist: {}", path.display()));
    }

    if let Ok(env_path) = env::var(ROOT_ENV) {
        let path = PathBuf::from(&env_path);
        if path.exists() {
            return Ok(path.canonicalize()?);
        }
        eprintln!(
            "{}",
            format!(
                "Warning: {} is set but path doesn't exist: {}",
                ROOT_ENV, env_path
            )
            .yellow()
        );
    }

    if let Some(path) = auto_detect_root() {
        eprintln!(
            "{}",
            format!("Auto-detected project root: {}", path.display()).dimmed()
        );
        return Ok(path);
    }

    anyhow::bail!(
        "{}\n{}\n  {}\n  {}\n  {}",
        "Could not find the project root.".red(),
        "Try one of:".bold(),
        "1. cd into your project: cd /path/to/project && project-renamer rename",
        "2. Specify explicitly: project-renamer rename --root /path/to/project",
        "3. Set environment variable: export PROJECT_RENAMER_ROOT=/path/to/project"
    )
}

/// Walk up from the current directory to the first folder holding the
/// project configuration.
fn auto_detect_root() -> Option<PathBuf> {
    let current = env::current_dir().ok()?;
    current
        .ancestors()
        .find(|ancestor| ancestor.join(PROJECT_CONFIG_PATH).is_file())
        .map(Path::to_path_buf)
}

/// Prints progress as the engine reports it.
struct ConsoleSink {
    quiet: bool,
    show_diff: bool,
    dry_run: bool,
}

impl ChangeSink for ConsoleSink {
    fn pipeline_started(&self, name: &str, details: &IndexMap<&'static str, String>) {
        if self.quiet {
            return;
        }
        println!("{}", name.bold());
        for (key, value) in details {
            println!("  {}: {}", key.dimmed(), value);
        }
        if self.dry_run {
            println!("{}", "  [DRY RUN - showing what would be changed]".cyan());
        }
        println!();
    }

    fn folder_moved(&self, from: &Path, to: &Path) {
        if self.quiet {
            return;
        }
        let verb = if self.dry_run { "Would move" } else { "Moved" };
        println!("  {} {} -> {}", verb.dimmed(), from.display(), to.display());
    }

    fn file_rewritten(&self, path: &Path, before: &str, after: &str) {
        if self.quiet {
            return;
        }
        let verb = if self.dry_run { "Would rewrite" } else { "Rewrote" };
        println!("  {} {}", verb.dimmed(), path.display());
        if self.show_diff {
            display_diff(path, before, after);
        }
    }
}

/// Helper: Show unified diff between original and modified content
fn display_diff(file: &Path, original: &str, modified: &str) {
    println!(
        "\n{}",
        format!("--- {} (original)", file.display()).dimmed()
    );
    println!("{}", format!("+++ {} (renamed)", file.display()).dimmed());

    let diff = TextDiff::from_lines(original, modified);

    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => format!("-{}", change).red(),
            ChangeTag::Insert => format!("+{}", change).green(),
            ChangeTag::Equal => format!(" {}", change).normal(),
        };
        print!("{}", sign);
    }
}

fn cmd_run(name: &str, args: RunArgs) -> Result<()> {
    let Some(command) = find_command(name) else {
        anyhow::bail!(
            "Unknown command '{}'. Known commands: {}",
            name,
            command_names().join(", ")
        );
    };

    let root = resolve_root(args.root)?;
    let config = load_config(&root)?;
    let mode = if args.dry_run {
        Mode::DryRun
    } else {
        Mode::Apply
    };
    let sink = ConsoleSink {
        quiet: args.json,
        show_diff: args.diff,
        dry_run: args.dry_run,
    };
    let ctx = CommandContext {
        root: &root,
        config: &config,
        mode,
        sink: &sink,
    };

    let outcome = (command.handler)(&ctx)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&root, &outcome);
    }

    if !outcome.is_success() {
        std::process::exit(1);
    }

    Ok(())
}

fn print_outcome(root: &Path, outcome: &CommandOutcome) {
    match outcome {
        CommandOutcome::Renamed { report } => print_report(report),
        CommandOutcome::AlreadyApplied { state } => {
            println!(
                "{} Rename to {} already applied ({})",
                "⊙".yellow(),
                state.new_package,
                state.timestamp.to_rfc3339()
            );
        }
        CommandOutcome::Status {
            state,
            target_package,
            target_library_id,
        } => {
            println!("{}", "Rename Status Report".bold());
            println!("Project: {}", root.display());
            println!("Target: {} (library {})", target_package, target_library_id);
            println!();
            match state {
                Some(state) => print_state(state, target_package),
                None => println!("{} {}", "⊙".yellow(), "NO RENAME RECORDED".yellow().bold()),
            }
        }
        CommandOutcome::Modules { modules } => {
            if modules.is_empty() {
                println!("{}", "No build modules found".yellow());
            }
            for module in modules {
                println!("{}", module);
            }
        }
    }
}

fn print_state(state: &StateRecord, target_package: &str) {
    if state.is_applied(target_package) {
        println!("{} {}", "✓".green(), "APPLIED".green().bold());
    } else {
        println!("{} {}", "⊙".yellow(), "PENDING".yellow().bold());
    }
    for (key, value) in state.as_string_map() {
        println!("  {}: {}", key, value);
    }
}

fn print_report(report: &PipelineReport) {
    for step in &report.steps {
        match step.status {
            StepStatus::Succeeded => println!("{} {}", "✓".green(), step.name),
            StepStatus::Failed => {
                eprintln!(
                    "{} {}: Failed - {}",
                    "✗".red(),
                    step.name,
                    step.message.as_deref().unwrap_or("unknown error")
                );
            }
            StepStatus::Skipped => println!("{} {}: Skipped", "⊘".cyan(), step.name),
            StepStatus::Pending | StepStatus::Running => {
                println!("{} {}: {}", "?".dimmed(), step.name, step.status)
            }
        }
    }

    println!();
    println!("{}", "Summary:".bold());
    println!(
        "  {} succeeded",
        format!("{}", report.count(StepStatus::Succeeded)).green()
    );
    println!(
        "  {} failed",
        format!("{}", report.count(StepStatus::Failed)).red()
    );
    println!(
        "  {} skipped",
        format!("{}", report.count(StepStatus::Skipped)).cyan()
    );
}

fn cmd_list() -> Result<()> {
    println!("{}", "Available Commands".bold());
    println!();
    for command in COMMANDS {
        println!("  {} - {}", command.name.green(), command.description);
    }
    Ok(())
}
