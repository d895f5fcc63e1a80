#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use crate::{
    archive::Archive,
    constants::{CONTENT_ENTRY, OUTPUT_EXTENSION, OUTPUT_PREFIX},
    error::Result,
    markup::{Element, Markup, Node},
    rubric::{LineItem, Rubric},
};

/// A grading sheet: the open container, its parsed content, and the rubric
/// found in it.
pub struct Gradesheet {
    /// The container the sheet was read from
    archive: Archive,
    /// Parsed `content.xml`
    markup:  Markup,
    /// Rubric rows and their anchors into `markup`
    rubric:  Rubric,
}

impl Gradesheet {
    /// Opens the sheet at `path` and locates its rubric.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut archive = Archive::open(path)?;
        let markup = Markup::parse(&archive.read_entry(CONTENT_ENTRY)?)?;
        let rubric = Rubric::load(&markup)?;

        Ok(Self {
            archive,
            markup,
            rubric,
        })
    }

    /// The rubric.
    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    /// The rubric, for recording scores.
    pub fn rubric_mut(&mut self) -> &mut Rubric {
        &mut self.rubric
    }

    /// The parsed content, as read from the container.
    pub fn markup(&self) -> &Markup {
        &self.markup
    }

    /// Where the graded copy is written inside `output_dir`.
    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!(
            "{OUTPUT_PREFIX}{}.{OUTPUT_EXTENSION}",
            self.rubric.total().awarded()
        ))
    }

    /// Builds the graded content: scores in their cells, and each comment
    /// appended to the body after an empty spacer paragraph.
    ///
    /// Works on a copy, so the sheet can be finalized again after a failed
    /// write.
    pub fn render(&self, comments: &[String]) -> Result<Markup> {
        let mut markup = self.markup.clone();

        let rows = self.rubric.items().iter().chain([self.rubric.total()]);
        for item in rows {
            write_score(&mut markup, item)?;
        }

        let body = self.rubric.comment_anchor();
        for comment in comments {
            markup.append_child(body, Node::Element(Element::paragraph("")))?;
            markup.append_child(body, Node::Element(Element::paragraph(comment.as_str())))?;
        }

        Ok(markup)
    }

    /// Writes the graded copy to `<output_dir>/grade_<total>.odt` and
    /// returns its path.
    pub fn finalize(&mut self, comments: &[String], output_dir: &Path) -> Result<PathBuf> {
        let contents = self.render(comments)?.serialize()?;
        let output = self.output_path(output_dir);

        self.archive.rewrite(&output, CONTENT_ENTRY, &contents)?;
        tracing::debug!(
            "Wrote {} from {}",
            output.display(),
            self.archive.path().display()
        );
        Ok(output)
    }
}

/// Inserts the awarded score as text into the item's anchor paragraph.
fn write_score(markup: &mut Markup, item: &LineItem) -> Result<()> {
    markup.append_child(item.anchor(), Node::Text(item.awarded().to_string()))
}
