//! Count the word ngrams found in a text column of a spreadsheet, and report
//! the most frequent ones.

mod columns;
mod config;
mod count;
mod error;
mod input;
mod ngrams;
mod progress;
mod report;
mod tokenize;
mod top;

use crate::{
    config::Config,
    input::Input,
    progress::{ProgressConfig, ProgressReport, Work},
};
use clap::Parser;
use log::LevelFilter;
use std::{
    num::{NonZeroU64, NonZeroUsize},
    path::PathBuf,
    sync::Arc,
};

/// Count word ngrams in a spreadsheet column and report the most common ones
///
/// Each cell of the text column is lower-cased and split into words, with URLs
/// and email addresses kept whole. Every run of consecutive words whose length
/// is within the requested bounds is then counted as one occurence of an
/// ngram. The most common ngrams are reported in order of decreasing
/// occurence count, in CSV and/or XLSX format.
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {
    /// Input data file
    ///
    /// CSV, TSV, gzipped CSV/TSV and spreadsheet workbooks (xlsx, xlsm, xlsb,
    /// xls, ods) are supported. The first row must contain column names.
    input: PathBuf,

    /// Name of the column that holds the text to be analyzed
    ///
    /// Will interactively prompt for a column if not specified.
    #[arg(short = 'c', long, default_value = None)]
    text_column: Option<Box<str>>,

    /// Name of the worksheet to be read from spreadsheet workbooks
    ///
    /// By default, the first worksheet of the workbook is used. This option
    /// is rejected for CSV/TSV inputs.
    #[arg(long, default_value = None)]
    sheet: Option<Box<str>>,

    /// Minimum ngram length, in words
    #[arg(short = 'n', long, default_value = "1")]
    min_ngram_length: NonZeroUsize,

    /// Maximum ngram length, in words
    ///
    /// Must be greater than or equal to the minimum ngram length.
    #[arg(short = 'x', long, default_value = "3")]
    max_ngram_length: NonZeroUsize,

    /// Write a CSV report to this file
    ///
    /// If neither a CSV nor an XLSX report file is specified, the CSV report
    /// is written to standard output.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write an XLSX report to this file
    #[arg(long)]
    xlsx: Option<PathBuf>,

    /// Max number of output ngrams
    ///
    /// Once ngrams are sorted by decreasing occurence count, only this many
    /// are kept, to keep reports at a size that spreadsheet software can
    /// handle.
    #[arg(short = 'o', long, default_value_t = top::MAX_UNIQUE_NGRAM_COUNT)]
    max_outputs: NonZeroUsize,

    /// Number of texts per parallel processing task
    ///
    /// If it is set too low, constant overheads for spawning parallel tasks
    /// will not be properly amortized. But if it is set too high, parallel
    /// load balancing will be less effective.
    #[arg(long, default_value = "500")]
    chunk_size: NonZeroUsize,
}
//
impl Args {
    /// Decode and validate CLI arguments
    pub fn parse_and_check() -> Result<Arc<Config>> {
        Config::new(Args::parse())
    }
}
//
#[tokio::main]
async fn main() -> Result<()> {
    // Set up logging
    if let Err(e) = setup_logging() {
        eprintln!("Failed to set up system logging, continuing without logs: {e}");
    }

    // Decode and check CLI arguments before touching any data
    let config = Args::parse_and_check()?;
    log::debug!("Running with {config:#?}");

    // Open the input and pick the text column
    let input = Input::open(&config.input, config.input_format, config.sheet.as_deref()).await?;
    let column = columns::select(input.headers(), config.text_column.as_deref())?;

    // Set up progress reporting
    let report = ProgressReport::new();
    report.note(format!(
        "Reading text from column {} at index {column}.",
        input.headers()[column]
    ));

    // Collect the text column
    let texts = input.read_column(column, &report).await?;

    // Count ngrams
    let chunk_size = config.chunk_size.get();
    let counting = report.add(
        "Counting ngrams",
        ProgressConfig::new(Work::PercentSteps(texts.len().div_ceil(chunk_size))),
    );
    let counts = count::compute(&texts, config.lengths, chunk_size, &counting)?;
    counting.finish();
    std::mem::drop(texts);
    report.note(format!(
        "Read {} rows ({} with text), which produced {} occurrences of {} unique ngrams.",
        counts.stats.texts,
        counts.stats.nonblank_texts,
        counts.stats.windows,
        counts.counts.len()
    ));

    // Pick the most frequent ngrams
    let ranking = top::rank(counts.counts, config.max_outputs);
    if ranking.is_truncated() {
        report.note(format!(
            "Truncated output to {} most common unique ngrams, {} less common ngrams were left out.",
            config.max_outputs, ranking.discarded
        ));
    }

    // Write down the reports
    report::write_all(&config.outputs, Arc::new(ranking), &report).await?;
    report.note("Done!");
    Ok(())
}

/// Use anyhow for Result type erasure
pub use anyhow::Result;

/// Lower-case ngram, whose words are separated by single spaces
pub type Ngram = Box<str>;

/// Addition operator for NonZeroU64
pub fn add_nz_u64(x: NonZeroU64, y: NonZeroU64) -> NonZeroU64 {
    x.checked_add(y.get())
        .expect("overflow while adding NonZeroU64s")
}

/// Set up logging
fn setup_logging() -> syslog::Result<()> {
    syslog::init(
        syslog::Facility::LOG_USER,
        if cfg!(feature = "log-trace") {
            LevelFilter::Trace
        } else if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        None,
    )
}
