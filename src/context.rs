//! Explicit execution context handed to every rename operation.

use crate::identity::ProjectIdentity;
use crate::rewrite::RewriteRule;
use crate::sink::ChangeSink;
use std::path::{Path, PathBuf};

/// File extensions the content walk rewrites by default.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "kt",
    "kts",
    "java",
    "gradle",
    "xml",
    "json",
    "toml",
    "properties",
    "pro",
    "md",
    "plist",
    "xcconfig",
    "pbxproj",
    "swift",
    "yml",
    "yaml",
    "txt",
];

/// Directory names never descended into.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".svn",
    ".hg",
    ".gradle",
    ".kotlin",
    ".idea",
    "build",
    "target",
    "node_modules",
];

/// Whether operations mutate the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Apply,
    /// Plan, check and report, but write nothing.
    DryRun,
}

/// Tunables for the tree walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOptions {
    /// Lower-case extensions (without dot) eligible for rewriting.
    pub extensions: Vec<String>,
    /// Directory names skipped at any depth.
    pub exclude_dirs: Vec<String>,
    /// Files the content walk must never rewrite (configuration, state).
    pub protected_files: Vec<PathBuf>,
    /// Folder holding the library modules.
    pub library_folder: String,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            exclude_dirs: DEFAULT_EXCLUDED_DIRS
                .iter()
                .map(|dir| dir.to_string())
                .collect(),
            protected_files: Vec::new(),
            library_folder: "library".to_string(),
        }
    }
}

impl RenameOptions {
    pub fn allows_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }

    pub fn is_protected(&self, path: &Path) -> bool {
        self.protected_files.iter().any(|protected| protected == path)
    }
}

/// Everything an operation needs; nothing is read from ambient process
/// state.
pub struct RenameContext<'s> {
    identity: ProjectIdentity,
    options: RenameOptions,
    mode: Mode,
    sink: &'s dyn ChangeSink,
}

impl<'s> RenameContext<'s> {
    pub fn new(
        identity: ProjectIdentity,
        options: RenameOptions,
        mode: Mode,
        sink: &'s dyn ChangeSink,
    ) -> Self {
        Self {
            identity,
            options,
            mode,
            sink,
        }
    }

    pub fn identity(&self) -> &ProjectIdentity {
        &self.identity
    }

    pub fn options(&self) -> &RenameOptions {
        &self.options
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_dry_run(&self) -> bool {
        self.mode == Mode::DryRun
    }

    pub fn sink(&self) -> &dyn ChangeSink {
        self.sink
    }

    pub fn root_dir(&self) -> &Path {
        self.identity.root_dir()
    }

    /// The package rule alone, used for explicitly targeted files.
    pub fn package_rules(&self) -> Vec<RewriteRule> {
        vec![RewriteRule::package(
            self.identity.old_package(),
            self.identity.new_package(),
        )]
    }

    /// Rules the content walk applies, according to the rewrite flags.
    pub fn content_rules(&self) -> Vec<RewriteRule> {
        let flags = self.identity.flags();
        let mut rules = Vec::new();
        if flags.rewrites_packages() {
            rules.extend(self.package_rules());
        }
        if flags.rename_module_references && self.identity.library_id_changed() {
            rules.push(RewriteRule::module_reference(
                self.identity.old_library_id(),
                self.identity.new_library_id(),
            ));
        }
        rules
    }
}
