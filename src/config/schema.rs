use crate::context::{RenameOptions, DEFAULT_EXCLUDED_DIRS, DEFAULT_EXTENSIONS};
use crate::error::{ValidationError, ValidationIssue};
use crate::identity::RewriteFlags;
use crate::state::STATE_FILE;
use serde::Deserialize;
use std::path::Path;

/// `configs/project.toml`.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    #[serde(default)]
    pub project: ProjectSection,
    #[serde(default)]
    pub template: TemplateSection,
    #[serde(default)]
    pub rename: RenameSection,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ProjectSection {
    /// Package the project should end up with.
    #[serde(default)]
    pub package: String,
}

/// Identifiers the template ships with, used until a rename is recorded.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TemplateSection {
    #[serde(default = "default_template_package")]
    pub package: String,
    #[serde(default = "default_template_library_id")]
    pub library_id: String,
}

impl Default for TemplateSection {
    fn default() -> Self {
        Self {
            package: default_template_package(),
            library_id: default_template_library_id(),
        }
    }
}

fn default_template_package() -> String {
    "com.example.template".to_string()
}

fn default_template_library_id() -> String {
    "template".to_string()
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RenameSection {
    #[serde(default = "default_true")]
    pub imports: bool,
    #[serde(default = "default_true")]
    pub package_names: bool,
    #[serde(default)]
    pub module_references: bool,
    /// Replaces the default extension allow-list when present.
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
    /// Added to the default excluded directories.
    #[serde(default)]
    pub exclude_dirs: Vec<String>,
}

impl Default for RenameSection {
    fn default() -> Self {
        Self {
            imports: true,
            package_names: true,
            module_references: false,
            extensions: None,
            exclude_dirs: Vec::new(),
        }
    }
}

fn default_true() -> bool {
    true
}

impl ProjectConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        if self.project.package.trim().is_empty() {
            issues.push(ValidationIssue::MissingField {
                field: "project.package",
            });
        }
        if self.template.package.trim().is_empty() {
            issues.push(ValidationIssue::MissingField {
                field: "template.package",
            });
        }
        if self.template.library_id.trim().is_empty() {
            issues.push(ValidationIssue::MissingField {
                field: "template.library_id",
            });
        }
        if let Some(extensions) = &self.rename.extensions {
            if extensions.iter().any(|ext| ext.trim().is_empty()) {
                issues.push(ValidationIssue::MalformedIdentifier {
                    field: "rename.extensions",
                    value: extensions.join(","),
                    reason: "extensions must not be empty".to_string(),
                });
            }
        }
        ValidationError::from_issues(issues)
    }
}

/// `configs/library.toml`.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    #[serde(default)]
    pub library: LibrarySection,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LibrarySection {
    /// Library id the project should end up with.
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_library_folder")]
    pub folder: String,
}

impl Default for LibrarySection {
    fn default() -> Self {
        Self {
            id: String::new(),
            folder: default_library_folder(),
        }
    }
}

fn default_library_folder() -> String {
    "library".to_string()
}

impl LibraryConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();
        if self.library.id.trim().is_empty() {
            issues.push(ValidationIssue::MissingField { field: "library.id" });
        }
        if self.library.folder.trim().is_empty() {
            issues.push(ValidationIssue::MissingField {
                field: "library.folder",
            });
        }
        ValidationError::from_issues(issues)
    }
}

/// Both configuration resources of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamerConfig {
    pub project: ProjectConfig,
    pub library: LibraryConfig,
}

impl RenamerConfig {
    pub fn target_package(&self) -> &str {
        self.project.project.package.trim()
    }

    pub fn target_library_id(&self) -> &str {
        self.library.library.id.trim()
    }

    pub fn flags(&self) -> RewriteFlags {
        RewriteFlags {
            rename_imports: self.project.rename.imports,
            rename_package_names: self.project.rename.package_names,
            rename_module_references: self.project.rename.module_references,
        }
    }

    /// Walk options for a project rooted at `root`. The configuration
    /// resources and the state file are always protected from rewriting.
    pub fn rename_options(&self, root: &Path) -> RenameOptions {
        let rename = &self.project.rename;
        let extensions = match &rename.extensions {
            Some(extensions) => extensions
                .iter()
                .map(|ext| ext.trim().trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            None => DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        };

        let mut exclude_dirs: Vec<String> = DEFAULT_EXCLUDED_DIRS
            .iter()
            .map(|dir| dir.to_string())
            .collect();
        for dir in &rename.exclude_dirs {
            let dir = dir.trim();
            if !dir.is_empty() && !exclude_dirs.iter().any(|known| known == dir) {
                exclude_dirs.push(dir.to_string());
            }
        }

        let protected_files = [
            super::loader::PROJECT_CONFIG_PATH,
            super::loader::LIBRARY_CONFIG_PATH,
            STATE_FILE,
        ]
        .iter()
        .map(|relative| root.join(relative))
        .collect();

        RenameOptions {
            extensions,
            exclude_dirs,
            protected_files,
            library_folder: self.library.library.folder.trim().to_string(),
        }
    }
}
