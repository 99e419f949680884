//! Content rewriting: token-bounded replacement rules and the in-place file
//! rewriter built on them.

pub mod file;
pub mod rules;
pub mod token;

pub use file::{is_binary_path, rewrite_file, RewriteOutcome, SkipReason, BINARY_EXTENSIONS};
pub use rules::{apply_rules, RewriteRule};
pub use token::{replace_bounded, Boundary};
