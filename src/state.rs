//! The state record of the last applied rename.
//!
//! Stored as plain `key=value` lines so it stays readable and diffable in the
//! project repository.

use crate::context::RenameContext;
use crate::identity::ProjectIdentity;
use crate::rewrite::file::atomic_write;
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Location of the state file relative to the project root.
pub const STATE_FILE: &str = "configs/rename-state.properties";

const KEY_OLD_PACKAGE: &str = "oldPackage";
const KEY_NEW_PACKAGE: &str = "newPackage";
const KEY_OLD_LIBRARY_ID: &str = "oldLibraryId";
const KEY_NEW_LIBRARY_ID: &str = "newLibraryId";
const KEY_TIMESTAMP: &str = "timestamp";

#[derive(Error, Debug)]
pub enum StateError {
    #[error("failed to access state file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state file {} is missing key '{key}'", .path.display())]
    MissingKey { path: PathBuf, key: &'static str },

    #[error("state file {} has invalid timestamp '{value}': {source}", .path.display())]
    InvalidTimestamp {
        path: PathBuf,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("state file {} line {line} is not a key=value pair", .path.display())]
    MalformedLine { path: PathBuf, line: usize },
}

/// One applied rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateRecord {
    pub old_package: String,
    pub new_package: String,
    pub old_library_id: String,
    pub new_library_id: String,
    pub timestamp: DateTime<Utc>,
}

impl StateRecord {
    pub fn from_identity(identity: &ProjectIdentity, timestamp: DateTime<Utc>) -> Self {
        Self {
            old_package: identity.old_package().to_string(),
            new_package: identity.new_package().to_string(),
            old_library_id: identity.old_library_id().to_string(),
            new_library_id: identity.new_library_id().to_string(),
            timestamp,
        }
    }

    /// Parse the `key=value` form. `path` is only used in error messages.
    pub fn parse(input: &str, path: &Path) -> Result<Self, StateError> {
        let mut values: HashMap<&str, &str> = HashMap::new();
        for (index, line) in input.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(StateError::MalformedLine {
                    path: path.to_path_buf(),
                    line: index + 1,
                });
            };
            values.insert(key.trim(), value.trim());
        }

        let get = |key: &'static str| {
            values
                .get(key)
                .map(|value| value.to_string())
                .ok_or_else(|| StateError::MissingKey {
                    path: path.to_path_buf(),
                    key,
                })
        };

        let raw_timestamp = get(KEY_TIMESTAMP)?;
        let timestamp = DateTime::parse_from_rfc3339(&raw_timestamp)
            .map_err(|source| StateError::InvalidTimestamp {
                path: path.to_path_buf(),
                value: raw_timestamp.clone(),
                source,
            })?
            .with_timezone(&Utc);

        Ok(Self {
            old_package: get(KEY_OLD_PACKAGE)?,
            new_package: get(KEY_NEW_PACKAGE)?,
            old_library_id: get(KEY_OLD_LIBRARY_ID)?,
            new_library_id: get(KEY_NEW_LIBRARY_ID)?,
            timestamp,
        })
    }

    /// Ordered key/value view, in file order.
    pub fn as_string_map(&self) -> IndexMap<&'static str, String> {
        let mut map = IndexMap::new();
        map.insert(KEY_OLD_PACKAGE, self.old_package.clone());
        map.insert(KEY_NEW_PACKAGE, self.new_package.clone());
        map.insert(KEY_OLD_LIBRARY_ID, self.old_library_id.clone());
        map.insert(KEY_NEW_LIBRARY_ID, self.new_library_id.clone());
        map.insert(
            KEY_TIMESTAMP,
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        map
    }

    pub fn to_properties(&self) -> String {
        let mut out = String::from("# Last applied project rename. Managed by project-renamer.\n");
        for (key, value) in self.as_string_map() {
            out.push_str(key);
            out.push('=');
            out.push_str(&value);
            out.push('\n');
        }
        out
    }

    /// The requested package is what this record already produced.
    pub fn is_applied(&self, requested_new_package: &str) -> bool {
        self.new_package == requested_new_package.trim()
    }
}

pub fn state_file_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}

/// Read the state record, `None` when no rename has been applied yet.
pub fn read_state(root: &Path) -> Result<Option<StateRecord>, StateError> {
    let path = state_file_path(root);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(StateError::Io { path, source }),
    };
    StateRecord::parse(&contents, &path).map(Some)
}

/// Overwrite the state file with `record`.
pub fn write_state(root: &Path, record: &StateRecord) -> Result<(), StateError> {
    let path = state_file_path(root);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StateError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    atomic_write(&path, record.to_properties().as_bytes())
        .map_err(|source| StateError::Io { path, source })
}

/// Record the context's identity as applied, now. Nothing is written in
/// dry-run mode.
pub fn update_state_file(ctx: &RenameContext<'_>) -> Result<StateRecord, StateError> {
    let record = StateRecord::from_identity(ctx.identity(), Utc::now());
    if ctx.is_dry_run() {
        info!("dry run, state file not written");
        return Ok(record);
    }
    write_state(ctx.root_dir(), &record)?;
    info!(path = %state_file_path(ctx.root_dir()).display(), "state file updated");
    Ok(record)
}
