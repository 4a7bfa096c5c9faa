//! Output reports of the top ngrams
//!
//! Every report is a two-column table with an `ngram,count` header row,
//! listing the ngrams in ranking order.

mod csv;
mod xlsx;

use crate::{
    progress::{ProgressConfig, ProgressReport, ProgressTracker, Work},
    top::Ranking,
    Result,
};
use anyhow::Context;
use std::{fmt, path::PathBuf, sync::Arc};
use tokio::task::JoinSet;

pub use self::xlsx::MAX_DATA_ROWS as MAX_XLSX_DATA_ROWS;

/// Header row of every report
pub const HEADER: [&str; 2] = ["ngram", "count"];

/// Supported report formats
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OutputFormat {
    /// Comma-separated values
    Csv,

    /// Office Open XML workbook
    Xlsx,
}
//
impl OutputFormat {
    /// Short name of the format, which is also its usual file extension
    pub fn key(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}
//
impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Where a report should be written
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum OutputTarget {
    /// File on disk, created or overwritten
    File(PathBuf),

    /// Standard output of the process
    Stdout,
}
//
impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdout => f.write_str("standard output"),
        }
    }
}

/// Report to be produced
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Output {
    pub format: OutputFormat,
    pub target: OutputTarget,
}

/// Write all requested reports concurrently
pub async fn write_all(
    outputs: &[Output],
    ranking: Arc<Ranking>,
    report: &ProgressReport,
) -> Result<()> {
    let mut writers = JoinSet::new();
    for output in outputs.iter().cloned() {
        report.note(format!(
            "Outputting {} report to {}...",
            output.format, output.target
        ));
        let progress = report.add(
            format!("Writing {} report", output.format),
            ProgressConfig::new(Work::Steps(ranking.top.len())),
        );
        writers.spawn(write(output, ranking.clone(), progress));
    }
    while let Some(result) = writers.join_next().await {
        result.context("waiting for a report writer")??;
    }
    Ok(())
}

/// Write one report
async fn write(output: Output, ranking: Arc<Ranking>, progress: ProgressTracker) -> Result<()> {
    let context = format!("writing {} report to {}", output.format, output.target);
    let result = match (output.format, output.target) {
        (OutputFormat::Csv, OutputTarget::File(path)) => {
            csv::write_file(&path, &ranking.top, &progress).await
        }
        (OutputFormat::Csv, OutputTarget::Stdout) => {
            csv::write(tokio::io::stdout(), &ranking.top, &progress).await
        }
        (OutputFormat::Xlsx, OutputTarget::File(path)) => {
            let progress = progress.clone();
            tokio::task::spawn_blocking(move || xlsx::write(&path, &ranking.top, &progress))
                .await
                .context("waiting for the XLSX writer")
                .and_then(|result| result)
        }
        (OutputFormat::Xlsx, OutputTarget::Stdout) => {
            Err(anyhow::format_err!("XLSX reports cannot be written to standard output"))
        }
    };
    progress.finish();
    result.context(context)
}
