#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use tabled::{
    Table, Tabled,
    settings::{Panel, Style},
};

use crate::rubric::{LineItem, Rubric};

#[derive(Tabled, Clone, Debug)]
/// One line of the grading overview
pub struct ScoreRow {
    #[tabled(rename = "Item")]
    /// * `item`: rubric label
    pub item:  String,
    #[tabled(rename = "Score")]
    /// * `score`: awarded score over maximum
    pub score: String,
}

impl From<&LineItem> for ScoreRow {
    fn from(item: &LineItem) -> Self {
        Self {
            item:  item.label().to_string(),
            score: format!("{}/{}", item.awarded(), item.max()),
        }
    }
}

/// Renders the awarded scores of a graded rubric as a table.
pub fn overview(rubric: &Rubric) -> String {
    let rows: Vec<ScoreRow> = rubric.items().iter().map(ScoreRow::from).collect();
    let total = rubric.total();

    Table::new(rows)
        .with(Panel::header("Grading Overview"))
        .with(Panel::footer(format!(
            "{}: {}/{}",
            total.label(),
            total.awarded(),
            total.max()
        )))
        .with(Style::modern())
        .to_string()
}
