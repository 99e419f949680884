pub mod loader;
pub mod schema;

pub use loader::{
    load_config, load_library_config_from_str, load_project_config_from_str, ConfigError,
    LIBRARY_CONFIG_PATH, PROJECT_CONFIG_PATH,
};
pub use schema::{
    LibraryConfig, LibrarySection, ProjectConfig, ProjectSection, RenameSection, RenamerConfig,
    TemplateSection,
};
