#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Stock comments and free-text comment entry
pub mod comments;
/// Grammar for `%` score expressions
pub mod parsers;
/// Printable grading overview
pub mod results;
/// Score entry and clamping
pub mod score;

pub use comments::{interpret_comment, with_default};
pub use score::{clamp, interpret_score, is_derived};
