//! Tree renamer: folder moves, the content walk and run-configuration
//! updates.

pub mod contents;
pub mod folders;
pub mod run_configs;
pub(crate) mod walk;

pub use contents::{rename_project, ContentSummary};
pub use folders::{plan_folder_moves, rename_folders, FolderMove};
pub use run_configs::{find_run_configurations, update_run_configurations};
