#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use itertools::Itertools;

use crate::{
    constants::{DEFAULT_COMMENT, stock_comment},
    error::{GradingError, Result},
};

/// Returns the stock comment key if `token` is a `%keyword`.
fn keyword(token: &str) -> Option<&str> {
    token.strip_prefix('%').filter(|rest| !rest.is_empty())
}

/// Turns a line typed at the comment prompt into comment paragraphs.
///
/// Every `%keyword` token is replaced by its stock comment, in the order the
/// keywords appear. The remaining words are joined with single spaces and
/// always come last, even when nothing is left.
pub fn interpret_comment(input: &str) -> Result<Vec<String>> {
    let mut comments = input
        .split_whitespace()
        .filter_map(keyword)
        .map(|key| {
            stock_comment(key)
                .map(String::from)
                .ok_or_else(|| GradingError::UnknownKeyword(key.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let remainder = input
        .split_whitespace()
        .filter(|token| keyword(token).is_none())
        .join(" ");
    comments.push(remainder);

    Ok(comments)
}

/// Substitutes the default comment when a grading pass produced none.
pub fn with_default(mut comments: Vec<String>) -> Vec<String> {
    if comments.is_empty() {
        comments.push(DEFAULT_COMMENT.to_string());
    }
    comments
}
