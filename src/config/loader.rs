use crate::config::schema::{LibraryConfig, ProjectConfig, RenamerConfig};
use crate::error::ValidationError;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Project configuration, relative to the project root.
pub const PROJECT_CONFIG_PATH: &str = "configs/project.toml";
/// Library configuration, relative to the project root.
pub const LIBRARY_CONFIG_PATH: &str = "configs/library.toml";

#[derive(Debug)]
pub enum ConfigError {
    Missing {
        path: PathBuf,
    },
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Toml {
        path: Option<PathBuf>,
        source: toml_edit::de::Error,
    },
    Validation {
        path: Option<PathBuf>,
        source: ValidationError,
    },
}

impl ConfigError {
    fn with_path(self, path: &Path) -> Self {
        let path = path.to_path_buf();
        match self {
            ConfigError::Toml { path: None, source } => ConfigError::Toml {
                path: Some(path),
                source,
            },
            ConfigError::Validation { path: None, source } => ConfigError::Validation {
                path: Some(path),
                source,
            },
            other => other,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing { path } => {
                write!(f, "configuration file not found: {}", path.display())
            }
            ConfigError::Io { path, source } => {
                write!(
                    f,
                    "failed to read configuration from {}: {}",
                    path.display(),
                    source
                )
            }
            ConfigError::Toml { path, source } => match path {
                Some(path) => write!(
                    f,
                    "failed to parse configuration TOML ({}): {}",
                    path.display(),
                    source
                ),
                None => write!(f, "failed to parse configuration TOML: {}", source),
            },
            ConfigError::Validation { path, source } => match path {
                Some(path) => write!(f, "invalid configuration ({}):\n{}", path.display(), source),
                None => write!(f, "invalid configuration:\n{}", source),
            },
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Missing { .. } => None,
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
            ConfigError::Validation { source, .. } => Some(source),
        }
    }
}

pub fn load_project_config_from_str(input: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig = toml_edit::de::from_str(input)
        .map_err(|source| ConfigError::Toml { path: None, source })?;
    config
        .validate()
        .map_err(|source| ConfigError::Validation { path: None, source })?;
    Ok(config)
}

pub fn load_library_config_from_str(input: &str) -> Result<LibraryConfig, ConfigError> {
    let config: LibraryConfig = toml_edit::de::from_str(input)
        .map_err(|source| ConfigError::Toml { path: None, source })?;
    config
        .validate()
        .map_err(|source| ConfigError::Validation { path: None, source })?;
    Ok(config)
}

/// Load and validate both configuration resources below `root`.
pub fn load_config(root: impl AsRef<Path>) -> Result<RenamerConfig, ConfigError> {
    let root = root.as_ref();

    let project_path = root.join(PROJECT_CONFIG_PATH);
    let project = load_project_config_from_str(&read_config(&project_path)?)
        .map_err(|error| error.with_path(&project_path))?;

    let library_path = root.join(LIBRARY_CONFIG_PATH);
    let library = load_library_config_from_str(&read_config(&library_path)?)
        .map_err(|error| error.with_path(&library_path))?;

    Ok(RenamerConfig { project, library })
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            ConfigError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}
