//! The identifier model: what is renamed into what, and where.

use crate::error::{ValidationError, ValidationIssue};
use crate::module_path::{package_segments, package_to_path};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Which kinds of references the content walk rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RewriteFlags {
    pub rename_imports: bool,
    pub rename_package_names: bool,
    pub rename_module_references: bool,
}

impl Default for RewriteFlags {
    fn default() -> Self {
        Self {
            rename_imports: true,
            rename_package_names: true,
            rename_module_references: false,
        }
    }
}

impl RewriteFlags {
    /// Package strings are rewritten when either imports or declarations are.
    pub fn rewrites_packages(&self) -> bool {
        self.rename_imports || self.rename_package_names
    }
}

/// Old and new identifiers of a rename, validated once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectIdentity {
    root_dir: PathBuf,
    old_package: String,
    new_package: String,
    old_library_id: String,
    new_library_id: String,
    flags: RewriteFlags,
}

impl ProjectIdentity {
    /// Validate and build an identity.
    ///
    /// Every problem is collected; nothing touches the filesystem apart from
    /// checking and canonicalizing `root_dir`.
    pub fn new(
        root_dir: impl AsRef<Path>,
        old_package: impl Into<String>,
        new_package: impl Into<String>,
        old_library_id: impl Into<String>,
        new_library_id: impl Into<String>,
        flags: RewriteFlags,
    ) -> Result<Self, ValidationError> {
        let root_dir = root_dir.as_ref();
        let old_package = old_package.into().trim().to_string();
        let new_package = new_package.into().trim().to_string();
        let old_library_id = old_library_id.into().trim().to_string();
        let new_library_id = new_library_id.into().trim().to_string();

        let mut issues = Vec::new();
        check_package("oldPackage", &old_package, &mut issues);
        check_package("newPackage", &new_package, &mut issues);
        check_library_id("oldLibraryId", &old_library_id, &mut issues);
        check_library_id("newLibraryId", &new_library_id, &mut issues);

        if !old_package.is_empty() && old_package == new_package {
            issues.push(ValidationIssue::UnchangedPackage {
                package: old_package.clone(),
            });
        }

        let canonical = match root_dir.canonicalize() {
            Ok(path) if path.is_dir() => Some(path),
            Ok(path) => {
                issues.push(ValidationIssue::RootNotDirectory { path });
                None
            }
            Err(_) => {
                issues.push(ValidationIssue::RootNotFound {
                    path: root_dir.to_path_buf(),
                });
                None
            }
        };

        ValidationError::from_issues(issues)?;

        Ok(Self {
            root_dir: canonical.unwrap_or_else(|| root_dir.to_path_buf()),
            old_package,
            new_package,
            old_library_id,
            new_library_id,
            flags,
        })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn old_package(&self) -> &str {
        &self.old_package
    }

    pub fn new_package(&self) -> &str {
        &self.new_package
    }

    pub fn old_library_id(&self) -> &str {
        &self.old_library_id
    }

    pub fn new_library_id(&self) -> &str {
        &self.new_library_id
    }

    pub fn flags(&self) -> RewriteFlags {
        self.flags
    }

    pub fn old_segments(&self) -> Vec<&str> {
        package_segments(&self.old_package)
    }

    pub fn new_segments(&self) -> Vec<&str> {
        package_segments(&self.new_package)
    }

    /// `com.acme` -> `com/acme`
    pub fn old_package_path(&self) -> PathBuf {
        package_to_path(&self.old_package)
    }

    pub fn new_package_path(&self) -> PathBuf {
        package_to_path(&self.new_package)
    }

    /// The library ids changed, so module references need rewriting.
    pub fn library_id_changed(&self) -> bool {
        self.old_library_id != self.new_library_id
    }

    /// Identifiers as an ordered key/value map for diagnostic output.
    pub fn as_string_map(&self) -> IndexMap<&'static str, String> {
        let mut map = IndexMap::new();
        map.insert("root", self.root_dir.display().to_string());
        map.insert("oldPackage", self.old_package.clone());
        map.insert("newPackage", self.new_package.clone());
        map.insert("oldLibraryId", self.old_library_id.clone());
        map.insert("newLibraryId", self.new_library_id.clone());
        map.insert("renameImports", self.flags.rename_imports.to_string());
        map.insert(
            "renamePackageNames",
            self.flags.rename_package_names.to_string(),
        );
        map.insert(
            "renameModuleReferences",
            self.flags.rename_module_references.to_string(),
        );
        map
    }
}

fn check_package(field: &'static str, value: &str, issues: &mut Vec<ValidationIssue>) {
    if value.is_empty() {
        issues.push(ValidationIssue::MissingField { field });
        return;
    }
    for segment in value.split('.') {
        if let Err(reason) = check_segment(segment, false) {
            issues.push(ValidationIssue::MalformedIdentifier {
                field,
                value: value.to_string(),
                reason,
            });
            return;
        }
    }
}

fn check_library_id(field: &'static str, value: &str, issues: &mut Vec<ValidationIssue>) {
    if value.is_empty() {
        issues.push(ValidationIssue::MissingField { field });
        return;
    }
    if let Err(reason) = check_segment(value, true) {
        issues.push(ValidationIssue::MalformedIdentifier {
            field,
            value: value.to_string(),
            reason,
        });
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`, optionally allowing `-` after the first char.
fn check_segment(segment: &str, allow_hyphen: bool) -> Result<(), String> {
    let mut chars = segment.chars();
    let Some(first) = chars.next() else {
        return Err("empty segment".to_string());
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(format!(
            "segment '{segment}' must start with a letter or underscore"
        ));
    }
    for c in chars {
        let valid = c.is_ascii_alphanumeric() || c == '_' || (allow_hyphen && c == '-');
        if !valid {
            return Err(format!("segment '{segment}' contains invalid character '{c}'"));
        }
    }
    Ok(())
}
