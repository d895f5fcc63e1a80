#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # gradesheet
//!
//! Usage: `gradesheet TEMPLATE OUTPUT_DIR`
//!
//! Prompts for a score for every row of the rubric in `TEMPLATE`. Pressing
//! Enter awards full marks, `-2` takes two points off, `%max*0.8` evaluates
//! an expression, and any other number is taken as is. When points are lost
//! the reason is asked for; `%keyword` inserts a stock comment. The graded
//! copy is written to `OUTPUT_DIR/grade_<total>.odt`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use bpaf::*;
use colored::Colorize;
use gradesheet::{Terminal, constants::STOCK_COMMENTS, run};
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Parsed command line.
#[derive(Debug, Clone)]
struct Options {
    /// Log debug details
    verbose:       bool,
    /// Print the stock comments and exit
    list_comments: bool,
    /// Rubric sheet to grade
    template:      Option<PathBuf>,
    /// Directory the graded sheet is written to
    output_dir:    Option<PathBuf>,
}

/// Parse the command line arguments and return `Options`
fn options() -> Options {
    let verbose = short('v')
        .long("verbose")
        .help("Log what is read and written")
        .switch();

    let list_comments = long("list-comments")
        .help("Print the stock comment keywords and exit")
        .switch();

    let template = positional::<PathBuf>("TEMPLATE")
        .help("OpenDocument sheet containing the rubric table")
        .optional();

    let output_dir = positional::<PathBuf>("OUTPUT_DIR")
        .help("Directory to write grade_<total>.odt into")
        .optional();

    construct!(Options {
        verbose,
        list_comments,
        template,
        output_dir
    })
    .to_options()
    .descr("Interactive rubric grader for OpenDocument sheets")
    .run()
}

fn main() -> Result<()> {
    let opts = options();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(if opts.verbose { Level::DEBUG } else { Level::INFO });
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    if opts.list_comments {
        for (keyword, text) in STOCK_COMMENTS {
            println!("{}\n{}\n", format!("%{keyword}").bold(), text.trim());
        }
        return Ok(());
    }

    let (Some(template), Some(output_dir)) = (opts.template, opts.output_dir) else {
        println!("Usage: gradesheet TEMPLATE OUTPUT_DIR");
        return Ok(());
    };

    let mut terminal = Terminal::stdio();
    let written = run(&template, &output_dir, &mut terminal)
        .with_context(|| format!("Grading {} did not finish", template.display()))?;

    println!("{} {}", "Wrote".green(), written.display());
    Ok(())
}
