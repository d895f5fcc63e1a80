#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Name of the markup member inside an OpenDocument container
pub const CONTENT_ENTRY: &str = "content.xml";

/// Comment written when grading produced no feedback at all
pub const DEFAULT_COMMENT: &str = "Nice job.";

/// Prompt shown when an item did not receive full marks
pub const COMMENT_PROMPT: &str = "Explain reason for lost points: ";

/// Prompt shown before the whole workflow is restarted
pub const START_OVER_PROMPT: &str = "Press Enter to start over, or interrupt to quit: ";

/// Printed after every caught error, before the same prompt is repeated
pub const RETRY_NOTICE: &str = "Error encountered, trying again.";

/// Output file name prefix, followed by the total score
pub const OUTPUT_PREFIX: &str = "grade_";

/// Output file extension
pub const OUTPUT_EXTENSION: &str = "odt";

/// Element names used by OpenDocument spreadsheets embedded in text documents.
pub mod tags {
    /// A table
    pub const TABLE: &str = "table:table";
    /// A table row
    pub const TABLE_ROW: &str = "table:table-row";
    /// A table cell
    pub const TABLE_CELL: &str = "table:table-cell";
    /// A text paragraph
    pub const PARAGRAPH: &str = "text:p";
    /// The body of a text document
    pub const OFFICE_TEXT: &str = "office:text";
}

/// Canned feedback paragraphs, selected in comments with `%keyword`
pub const STOCK_COMMENTS: &[(&str, &str)] = &[
    ("no_header", include_str!("comments/no_header.md")),
    ("no_comments", include_str!("comments/no_comments.md")),
    ("bad_include", include_str!("comments/bad_include.md")),
    ("no_include", include_str!("comments/no_include.md")),
    ("no_srand", include_str!("comments/no_srand.md")),
    ("constructor_duplicated", include_str!("comments/constructor_duplicated.md")),
];

/// Looks up a stock comment by keyword, trimmed of surrounding blank lines
pub fn stock_comment(keyword: &str) -> Option<&'static str> {
    STOCK_COMMENTS
        .iter()
        .find(|(name, _)| *name == keyword)
        .map(|(_, text)| text.trim())
}
