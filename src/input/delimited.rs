//! Delimiter-separated text input (CSV, TSV), optionally gzip-compressed

use super::Texts;
use crate::{
    progress::{ProgressConfig, ProgressReport, Work},
    Result,
};
use anyhow::Context;
use async_compression::tokio::bufread::GzipDecoder;
use csv_async::{AsyncReader, AsyncReaderBuilder};
use futures::stream::StreamExt;
use std::{
    path::{Path, PathBuf},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};
use tokio::{
    fs::File,
    io::{AsyncRead, BufReader},
};
use tokio_util::io::InspectReader;

/// Byte stream that the records are decoded from
type ByteStream = Box<dyn AsyncRead + Send + Unpin>;

/// Delimited text file whose header row has been read
pub struct DelimitedInput {
    /// Path to the input file, for error messages
    path: PathBuf,

    /// Record reader, positioned right after the header row
    reader: AsyncReader<ByteStream>,

    /// Column names
    headers: Box<[Box<str>]>,

    /// Size of the input file on disk
    file_size: u64,

    /// Number of bytes read from the input file so far
    bytes_read: Arc<AtomicU64>,
}
//
impl DelimitedInput {
    /// Open a delimited text file and read its header row
    pub async fn open(path: &Path, delimiter: u8, gzip: bool) -> Result<Self> {
        let context = || format!("opening input file {path:?}");
        let file = File::open(path).await.with_context(context)?;
        let file_size = file.metadata().await.with_context(context)?.len();

        // Count raw bytes as they are read, before any decompression
        let bytes_read = Arc::new(AtomicU64::new(0));
        let counter = bytes_read.clone();
        let file = InspectReader::new(file, move |bytes: &[u8]| {
            counter.fetch_add(bytes.len() as u64, Ordering::Relaxed);
        });
        let bytes: ByteStream = if gzip {
            let mut decoder = GzipDecoder::new(BufReader::new(file));
            decoder.multiple_members(true);
            Box::new(decoder)
        } else {
            Box::new(file)
        };

        let mut reader = AsyncReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .create_reader(bytes);
        let headers: Box<[Box<str>]> = reader
            .headers()
            .await
            .with_context(|| format!("reading the header row of {path:?}"))?
            .iter()
            .map(Box::from)
            .collect();
        Ok(Self {
            path: path.to_owned(),
            reader,
            headers,
            file_size,
            bytes_read,
        })
    }

    /// Column names
    pub fn headers(&self) -> &[Box<str>] {
        &self.headers
    }

    /// Read the cells of one column from all remaining rows
    ///
    /// Rows that are too short to have this column yield `None`.
    pub async fn read_column(self, column: usize, report: &ProgressReport) -> Result<Texts> {
        let Self {
            path,
            reader,
            file_size,
            bytes_read,
            ..
        } = self;
        let progress = report.add(
            "Reading input",
            ProgressConfig::new(Work::Bytes(file_size)),
        );
        let mut reported = bytes_read.load(Ordering::Relaxed);
        progress.make_progress(reported);

        let mut texts = Texts::new();
        let mut records = reader.into_records();
        while let Some(record) = records.next().await {
            let record = record.with_context(|| format!("reading a record from {path:?}"))?;
            texts.push(
                record
                    .get(column)
                    .filter(|text| !text.is_empty())
                    .map(Box::from),
            );
            let current = bytes_read.load(Ordering::Relaxed);
            if current > reported {
                progress.make_progress(current - reported);
                reported = current;
            }
        }
        progress.finish();
        log::debug!("Read {} rows from {path:?}", texts.len());
        Ok(texts)
    }
}
//
impl std::fmt::Debug for DelimitedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelimitedInput")
            .field("path", &self.path)
            .field("headers", &self.headers)
            .field("file_size", &self.file_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_compression::tokio::write::GzipEncoder;
    use tokio::io::AsyncWriteExt;

    fn text(text: &str) -> Option<Box<str>> {
        Some(text.into())
    }

    async fn read_all(path: &Path, delimiter: u8, gzip: bool, column: &str) -> Texts {
        let input = DelimitedInput::open(path, delimiter, gzip).await.unwrap();
        let column = crate::columns::find(input.headers(), column).unwrap();
        input
            .read_column(column, &ProgressReport::new())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn csv_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tweets.csv");
        std::fs::write(
            &path,
            "id,text,lang\n1,\"Hello, world\",en\n2,,fr\n3\n4,\"multi\nline\",en\n",
        )
        .unwrap();
        let texts = read_all(&path, b',', false, "text").await;
        assert_eq!(
            texts,
            [
                text("Hello, world"),
                None,
                None,
                text("multi\nline")
            ]
        );
    }

    #[tokio::test]
    async fn gzipped_tsv_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tweets.tsv.gz");
        let mut encoder = GzipEncoder::new(File::create(&path).await.unwrap());
        encoder
            .write_all(b"text\tid\nfirst row\t1\nsecond row\t2\n")
            .await
            .unwrap();
        encoder.shutdown().await.unwrap();

        let texts = read_all(&path, b'\t', true, "TEXT").await;
        assert_eq!(texts, [text("first row"), text("second row")]);
    }

    #[tokio::test]
    async fn missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DelimitedInput::open(&dir.path().join("nope.csv"), b',', false)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("opening input file"));
    }
}
