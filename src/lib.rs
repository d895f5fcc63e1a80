//! # gradesheet
//!
//! An interactive grader for rubrics kept as tables inside OpenDocument text
//! files. Scores and comments are typed in, and a filled-in copy of the sheet
//! is written out, named after the total.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Reading and rewriting the zip container
pub mod archive;
/// Constant values used throughout, including the stock comments
pub mod constants;
/// Error type shared by every module
pub mod error;
/// Score entry, comments, and the grading overview
pub mod grade;
/// A mutable XML tree for the document content
pub mod markup;
/// Locating the rubric table inside the document
pub mod rubric;
/// The prompting loop
pub mod session;
/// A sheet opened for grading, and writing the graded copy
pub mod sheet;

pub use error::{GradingError, Result};
pub use session::{Prompter, Terminal, run};
pub use sheet::Gradesheet;
