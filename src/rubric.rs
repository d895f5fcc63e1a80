#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use crate::{
    constants::tags,
    error::{GradingError, Result},
    markup::{Markup, NodePath},
};

/// One row of the rubric: a label, the points available, and the points
/// awarded so far.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    /// Text of the first cell
    label:   String,
    /// Points available, from the second cell
    max:     u32,
    /// Points awarded
    awarded: u32,
    /// Paragraph in the third cell that receives the awarded score
    anchor:  NodePath,
}

impl LineItem {
    /// Creates an item with nothing awarded yet.
    pub fn new(label: impl Into<String>, max: u32, anchor: NodePath) -> Self {
        Self {
            label: label.into(),
            max,
            awarded: 0,
            anchor,
        }
    }

    /// Label shown to the grader.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Points available.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Points awarded.
    pub fn awarded(&self) -> u32 {
        self.awarded
    }

    /// Where the awarded score is written.
    pub fn anchor(&self) -> &NodePath {
        &self.anchor
    }

    /// Prompt text, eg. `Q1 (10): `.
    pub fn prompt(&self) -> String {
        format!("{} ({}): ", self.label, self.max)
    }

    /// Stores a score, clamped into `[0, max]`.
    pub fn set_awarded(&mut self, value: i64) {
        self.awarded = crate::grade::clamp(value, self.max);
    }

    /// Overwrites the awarded value without clamping. Only the total row uses
    /// this, since it holds a sum rather than an entered score.
    pub(crate) fn set_sum(&mut self, value: u32) {
        self.awarded = value;
    }
}

/// The grading table of a sheet, plus where comments are appended.
#[derive(Debug, Clone)]
pub struct Rubric {
    /// Gradable rows, in table order
    items:          Vec<LineItem>,
    /// The last row, holding the sum
    total:          LineItem,
    /// The document body that comment paragraphs are appended to
    comment_anchor: NodePath,
}

impl Rubric {
    /// Finds the first table in `markup` and reads it as a rubric.
    ///
    /// The first row is a header and is skipped, the last row is the total,
    /// and every row in between is one line item. Comments go at the end of
    /// the last `office:text` element.
    pub fn load(markup: &Markup) -> Result<Self> {
        let table = markup
            .find_all(&NodePath::root(), tags::TABLE)?
            .into_iter()
            .next()
            .ok_or_else(|| GradingError::RubricStructure("no table found".into()))?;

        let rows = markup.find_all(&table, tags::TABLE_ROW)?;
        if rows.len() < 3 {
            return Err(GradingError::RubricStructure(format!(
                "the table has {} rows, but a header, at least one item and a total are needed",
                rows.len()
            )));
        }

        let last = rows.len() - 1;
        let items = rows[1..last]
            .iter()
            .enumerate()
            .map(|(i, row)| read_row(markup, i + 1, row))
            .collect::<Result<Vec<_>>>()?;
        let total = read_row(markup, last, &rows[last])?;

        let comment_anchor = markup
            .find_all(&NodePath::root(), tags::OFFICE_TEXT)?
            .pop()
            .ok_or_else(|| {
                GradingError::RubricStructure(format!("no `{}` element found", tags::OFFICE_TEXT))
            })?;

        let available: u32 = items.iter().map(LineItem::max).sum();
        if available != total.max() {
            tracing::warn!(
                "Items add up to {available} points but the total row says {}",
                total.max()
            );
        }
        tracing::debug!("Loaded rubric with {} items", items.len());

        Ok(Self {
            items,
            total,
            comment_anchor,
        })
    }

    /// Gradable rows, in table order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Gradable rows, mutably.
    pub fn items_mut(&mut self) -> &mut [LineItem] {
        &mut self.items
    }

    /// The total row.
    pub fn total(&self) -> &LineItem {
        &self.total
    }

    /// Where comment paragraphs are appended.
    pub fn comment_anchor(&self) -> &NodePath {
        &self.comment_anchor
    }

    /// Forgets all awarded scores, including the total.
    pub fn reset(&mut self) {
        for item in &mut self.items {
            item.set_awarded(0);
        }
        self.total.set_sum(0);
    }

    /// Stores a score for item `index` and adds the clamped value to the
    /// total. Returns the clamped value.
    pub fn award(&mut self, index: usize, value: i64) -> Result<u32> {
        let item = self
            .items
            .get_mut(index)
            .ok_or_else(|| GradingError::RubricStructure(format!("no item at index {index}")))?;
        item.set_awarded(value);
        let awarded = item.awarded();

        let sum = self.total.awarded().saturating_add(awarded);
        if sum > self.total.max() {
            tracing::warn!(
                "Running total {sum} exceeds the {} points the total row allows",
                self.total.max()
            );
        }
        self.total.set_sum(sum);
        Ok(awarded)
    }
}

/// Reads the label, maximum and score anchor of the row at `path`.
fn read_row(markup: &Markup, index: usize, path: &NodePath) -> Result<LineItem> {
    let malformed = |reason: String| GradingError::MalformedRow { row: index, reason };

    let cells = markup.find_all(path, tags::TABLE_CELL)?;
    if cells.len() < 3 {
        return Err(malformed(format!("expected 3 cells, found {}", cells.len())));
    }

    let label = markup.flatten_text(&cells[0])?;
    let max_text = markup.flatten_text(&cells[1])?;
    let max = max_text
        .trim()
        .parse::<u32>()
        .map_err(|_| malformed(format!("`{max_text}` is not a maximum score")))?;

    let anchor = markup
        .find_all(&cells[2], tags::PARAGRAPH)?
        .into_iter()
        .next()
        .ok_or_else(|| malformed("the score cell has no paragraph".into()))?;

    Ok(LineItem::new(label, max, anchor))
}
