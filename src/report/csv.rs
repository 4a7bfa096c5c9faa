//! CSV reports

use super::HEADER;
use crate::{count::NgramCount, progress::ProgressTracker, Result};
use anyhow::Context;
use csv_async::AsyncWriterBuilder;
use std::path::Path;
use tokio::{fs::File, io::AsyncWrite};

/// Write a CSV report into a file
pub async fn write_file(path: &Path, ngrams: &[NgramCount], progress: &ProgressTracker) -> Result<()> {
    let file = File::create(path)
        .await
        .with_context(|| format!("creating {path:?}"))?;
    write(file, ngrams, progress).await
}

/// Write a CSV report into some byte sink
///
/// The sink is flushed before returning, so that the report is complete on
/// success even if the sink buffers its output.
pub async fn write<W>(sink: W, ngrams: &[NgramCount], progress: &ProgressTracker) -> Result<()>
where
    W: AsyncWrite + Send + Unpin,
{
    let mut serializer = AsyncWriterBuilder::new()
        .has_headers(false)
        .create_serializer(sink);
    serializer
        .serialize(HEADER)
        .await
        .context("writing down the header row")?;
    for ngram in ngrams {
        serializer
            .serialize(ngram)
            .await
            .with_context(|| format!("writing down {ngram:?}"))?;
        progress.make_progress(1);
    }
    serializer.flush().await.context("flushing the CSV output")?;
    Ok(())
}
