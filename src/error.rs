use crate::config::ConfigError;
use crate::state::StateError;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by the rename engine.
///
/// Every variant carries enough context to be printed as the message of a
/// failed pipeline step.
#[derive(Error, Debug)]
pub enum RenameError {
    #[error("invalid rename identifiers:\n{0}")]
    Validation(#[from] ValidationError),

    #[error("rename destination already exists and is not empty: {} (while moving {})", .destination.display(), .path.display())]
    Conflict { path: PathBuf, destination: PathBuf },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    State(#[from] StateError),
}

impl RenameError {
    pub(crate) fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        RenameError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<walkdir::Error> for RenameError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        RenameError::Io { path, source }
    }
}

/// All problems found while validating identifiers or configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    /// Ok when no issues were collected.
    pub fn from_issues(issues: Vec<ValidationIssue>) -> Result<(), ValidationError> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingField {
        field: &'static str,
    },
    MalformedIdentifier {
        field: &'static str,
        value: String,
        reason: String,
    },
    UnchangedPackage {
        package: String,
    },
    RootNotFound {
        path: PathBuf,
    },
    RootNotDirectory {
        path: PathBuf,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingField { field } => {
                write!(f, "missing required value '{field}'")
            }
            ValidationIssue::MalformedIdentifier {
                field,
                value,
                reason,
            } => write!(f, "'{field}' has malformed value '{value}': {reason}"),
            ValidationIssue::UnchangedPackage { package } => {
                write!(f, "old and new package are identical ('{package}'), nothing to rename")
            }
            ValidationIssue::RootNotFound { path } => {
                write!(f, "project root does not exist: {}", path.display())
            }
            ValidationIssue::RootNotDirectory { path } => {
                write!(f, "project root is not a directory: {}", path.display())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_issue() {
        let err = ValidationError {
            issues: vec![
                ValidationIssue::MissingField {
                    field: "newPackage",
                },
                ValidationIssue::UnchangedPackage {
                    package: "com.acme".to_string(),
                },
            ],
        };
        let text = err.to_string();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("newPackage"));
        assert!(text.contains("com.acme"));
    }

    #[test]
    fn from_issues_is_ok_when_empty() {
        assert!(ValidationError::from_issues(Vec::new()).is_ok());
        assert!(ValidationError::from_issues(vec![ValidationIssue::MissingField {
            field: "oldPackage"
        }])
        .is_err());
    }

    #[test]
    fn conflict_message_names_both_paths() {
        let err = RenameError::Conflict {
            path: PathBuf::from("src/com/acme"),
            destination: PathBuf::from("src/com/widgets"),
        };
        let text = err.to_string();
        assert!(text.contains("src/com/widgets"));
        assert!(text.contains("src/com/acme"));
    }
}
