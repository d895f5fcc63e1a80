#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T, E = GradingError> = std::result::Result<T, E>;

/// Everything that can go wrong while reading, grading or writing a sheet.
#[derive(Debug, Error)]
pub enum GradingError {
    /// The input path could not be opened as a zip container.
    #[error("Could not open `{path}` as an archive: {reason}")]
    Archive {
        /// Path that was being opened.
        path:   String,
        /// Underlying failure.
        reason: String,
    },
    /// The container has no member with the requested name.
    #[error("The archive has no entry named `{0}`.")]
    EntryNotFound(String),
    /// The markup member is not well-formed.
    #[error("Could not parse the document markup: {0}")]
    Parse(String),
    /// The markup tree could not be rendered back to bytes.
    #[error("Could not serialize the document markup: {0}")]
    Serialize(String),
    /// The document does not contain a usable grading table.
    #[error("The rubric is not usable: {0}")]
    RubricStructure(String),
    /// A rubric row does not have the expected cells.
    #[error("Rubric row {row} is malformed: {reason}")]
    MalformedRow {
        /// Zero-based index of the row inside the table.
        row:    usize,
        /// What was wrong with it.
        reason: String,
    },
    /// A `%` score expression could not be parsed or evaluated.
    #[error("Could not evaluate `{input}`: {reason}")]
    Expression {
        /// The expression as typed, without the leading `%`.
        input:  String,
        /// Why evaluation failed.
        reason: String,
    },
    /// A score is not a whole number.
    #[error("`{0}` is not a whole number.")]
    Format(String),
    /// A `%keyword` does not name a stock comment.
    #[error("No stock comment is registered for `%{0}`.")]
    UnknownKeyword(String),
    /// The output archive could not be written.
    #[error("Could not write `{path}`: {reason}")]
    Write {
        /// Destination being written.
        path:   String,
        /// Underlying failure.
        reason: String,
    },
    /// A stored reference into the markup tree no longer resolves.
    #[error("The document node at {0} could not be found.")]
    MissingNode(String),
    /// The operator aborted the session, or the terminal went away.
    #[error("Grading aborted: {0}")]
    Interrupted(String),
}

impl GradingError {
    /// Whether this error must abort the session instead of being retried.
    pub fn is_interrupt(&self) -> bool {
        matches!(self, GradingError::Interrupted(_))
    }
}
