//! XLSX reports

use super::HEADER;
use crate::{count::NgramCount, progress::ProgressTracker, Result};
use anyhow::Context;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// Maximal number of data rows in an XLSX worksheet, header row excluded
pub const MAX_DATA_ROWS: usize = 1_048_575;

/// Write an XLSX report, blocking the current thread
///
/// The workbook is assembled in memory and saved in one go at the end.
pub fn write(path: &Path, ngrams: &[NgramCount], progress: &ProgressTracker) -> Result<()> {
    anyhow::ensure!(
        ngrams.len() <= MAX_DATA_ROWS,
        "an XLSX worksheet cannot hold more than {MAX_DATA_ROWS} ngrams"
    );
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name("ngrams")?;
    for (col, &header) in (0..).zip(HEADER.iter()) {
        sheet.write_string_with_format(0, col, header, &header_format)?;
    }
    for (row, ngram) in (1..).zip(ngrams) {
        sheet
            .write_string(row, 0, ngram.ngram())
            .and_then(|sheet| sheet.write_number(row, 1, ngram.count().get() as f64))
            .with_context(|| format!("writing down {ngram:?}"))?;
        progress.make_progress(1);
    }
    workbook
        .save(path)
        .with_context(|| format!("saving workbook to {path:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader};

    #[test]
    fn header_and_rows() {
        let ngrams = [
            NgramCount::new("the cat", 3).unwrap(),
            NgramCount::new("cat", 1).unwrap(),
        ];
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ngrams.xlsx");
        write(&path, &ngrams, &ProgressTracker::hidden()).unwrap();

        let mut workbook = calamine::open_workbook_auto(&path).unwrap();
        let range = workbook.worksheet_range("ngrams").unwrap();
        let rows = range.rows().map(<[Data]>::to_vec).collect::<Vec<_>>();
        assert_eq!(
            rows,
            [
                vec![Data::String("ngram".into()), Data::String("count".into())],
                vec![Data::String("the cat".into()), Data::Float(3.0)],
                vec![Data::String("cat".into()), Data::Float(1.0)],
            ]
        );
    }
}
