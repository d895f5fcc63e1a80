#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The interactive part of grading.
//!
//! Every prompt is wrapped in a validate-or-reprompt loop: a line that
//! cannot be interpreted is reported and the same question is asked again.
//! Only [`GradingError::Interrupted`] escapes these loops.

use std::{
    io::{self, BufRead, StdinLock, Stdout, Write},
    path::{Path, PathBuf},
};

use colored::Colorize;

use crate::{
    constants::{COMMENT_PROMPT, RETRY_NOTICE, START_OVER_PROMPT},
    error::{GradingError, Result},
    grade::{interpret_comment, interpret_score, is_derived, results::overview, with_default},
    rubric::Rubric,
    sheet::Gradesheet,
};

/// Line-oriented conversation with the grader.
pub trait Prompter {
    /// Shows `message` and returns the next line typed, without its line
    /// ending. End of input is an [`GradingError::Interrupted`].
    fn prompt(&mut self, message: &str) -> Result<String>;

    /// Shows an informational line.
    fn notify(&mut self, message: &str) -> Result<()>;
}

/// A [`Prompter`] over any line reader and writer.
pub struct Terminal<R, W> {
    /// Where answers are read from
    input:  R,
    /// Where prompts are written
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Wraps a reader and writer.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Gives back the writer, eg. to inspect what was shown in tests.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl Terminal<StdinLock<'static>, Stdout> {
    /// The process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

/// Maps a terminal failure onto an interrupt; without a terminal there is
/// nobody left to retry for.
fn terminal_gone(e: io::Error) -> GradingError {
    GradingError::Interrupted(format!("terminal error: {e}"))
}

impl<R: BufRead, W: Write> Prompter for Terminal<R, W> {
    fn prompt(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{message}").map_err(terminal_gone)?;
        self.output.flush().map_err(terminal_gone)?;

        let mut line = String::new();
        if self.input.read_line(&mut line).map_err(terminal_gone)? == 0 {
            return Err(GradingError::Interrupted("end of input".into()));
        }

        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}").map_err(terminal_gone)
    }
}

/// Reports a caught error to the grader. Interrupts are handed back instead.
fn report(prompter: &mut (impl Prompter + ?Sized), error: GradingError) -> Result<()> {
    if error.is_interrupt() {
        return Err(error);
    }

    tracing::error!("{error}");
    prompter.notify(&RETRY_NOTICE.yellow().to_string())
}

/// Asks `message` until `interpret` accepts the answer.
pub fn read_until_valid<T>(
    prompter: &mut (impl Prompter + ?Sized),
    message: &str,
    mut interpret: impl FnMut(&str) -> Result<T>,
) -> Result<T> {
    loop {
        let answer = prompter.prompt(message)?;
        match interpret(&answer) {
            Ok(value) => return Ok(value),
            Err(e) => report(prompter, e)?,
        }
    }
}

/// Runs one grading pass over every item of `rubric` and returns the
/// comments collected, before any default is substituted.
///
/// Scores and the total are reset first, so a pass can be repeated.
pub fn grade_all(rubric: &mut Rubric, prompter: &mut (impl Prompter + ?Sized)) -> Result<Vec<String>> {
    rubric.reset();
    let mut comments = Vec::new();

    for index in 0..rubric.items().len() {
        let item = &rubric.items()[index];
        let (message, max) = (item.prompt(), item.max());

        let (score, derived) = read_until_valid(prompter, &message, |answer| {
            Ok((interpret_score(answer, max)?, is_derived(answer)))
        })?;
        if derived {
            prompter.notify(&format!("Evaluated score: {score}"))?;
        }

        let awarded = rubric.award(index, score)?;
        tracing::debug!("Awarded {awarded}/{max}");

        if awarded < max {
            let explained = read_until_valid(prompter, COMMENT_PROMPT, interpret_comment)?;
            comments.extend(explained);
        }
    }

    Ok(comments)
}

/// Grades the sheet at `template` once and writes the result into
/// `output_dir`.
pub fn grade_sheet(
    template: &Path,
    output_dir: &Path,
    prompter: &mut (impl Prompter + ?Sized),
) -> Result<PathBuf> {
    let mut sheet = Gradesheet::open(template)?;
    let comments = with_default(grade_all(sheet.rubric_mut(), prompter)?);

    prompter.notify(&overview(sheet.rubric()))?;
    sheet.finalize(&comments, output_dir)
}

/// Grades the sheet at `template`, starting over from a fresh copy of the
/// sheet whenever loading, grading or writing fails.
///
/// The grader confirms each restart, so a sheet that cannot be loaded does
/// not spin. Returns the path of the written file.
pub fn run(
    template: &Path,
    output_dir: &Path,
    prompter: &mut (impl Prompter + ?Sized),
) -> Result<PathBuf> {
    loop {
        match grade_sheet(template, output_dir, prompter) {
            Ok(path) => return Ok(path),
            Err(e) => {
                report(prompter, e)?;
                prompter.prompt(START_OVER_PROMPT)?;
            }
        }
    }
}
