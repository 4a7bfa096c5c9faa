//! Spreadsheet workbook input (xlsx, xlsm, xlsb, xls, ods)

use super::Texts;
use crate::{
    progress::{ProgressConfig, ProgressReport, Work},
    Result,
};
use anyhow::Context;
use calamine::{Data, Range, Reader};
use std::path::PathBuf;

/// Worksheet that has been loaded into memory
#[derive(Debug)]
pub struct WorkbookInput {
    /// Cells of the worksheet, header row included
    range: Range<Data>,

    /// Column names
    headers: Box<[Box<str>]>,
}
//
impl WorkbookInput {
    /// Load a worksheet from a workbook, by default the first one
    pub async fn open(path: PathBuf, sheet: Option<Box<str>>) -> Result<Self> {
        let range = tokio::task::spawn_blocking(move || load_sheet(path, sheet))
            .await
            .context("loading the input worksheet")??;
        let headers: Box<[Box<str>]> = (range.rows().next())
            .map(|row| {
                row.iter()
                    .map(|cell| cell_text(cell).unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();
        Ok(Self { range, headers })
    }

    /// Column names
    pub fn headers(&self) -> &[Box<str>] {
        &self.headers
    }

    /// Extract the cells of one column below the header row
    pub fn read_column(self, column: usize, report: &ProgressReport) -> Result<Texts> {
        let num_rows = self.range.height().saturating_sub(1);
        let progress = report.add(
            "Extracting text column",
            ProgressConfig::new(Work::PercentSteps(num_rows)).dont_show_rate_eta(),
        );
        let texts = (self.range.rows().skip(1))
            .map(|row| {
                progress.make_progress(1);
                row.get(column).and_then(cell_text)
            })
            .collect::<Texts>();
        progress.finish();
        Ok(texts)
    }
}

/// Load a worksheet in a blocking fashion
fn load_sheet(path: PathBuf, sheet: Option<Box<str>>) -> Result<Range<Data>> {
    let mut workbook = calamine::open_workbook_auto(&path)
        .with_context(|| format!("opening input workbook {path:?}"))?;
    match sheet {
        Some(name) => workbook
            .worksheet_range(&name)
            .with_context(|| format!("reading worksheet {name:?} from {path:?}")),
        None => workbook
            .worksheet_range_at(0)
            .with_context(|| format!("input workbook {path:?} has no worksheet"))?
            .with_context(|| format!("reading the first worksheet from {path:?}")),
    }
}

/// Text of a cell, if it holds anything
///
/// Cells with a formula error are treated as empty.
fn cell_text(cell: &Data) -> Option<Box<str>> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(s.as_str().into()),
        other => Some(other.to_string().into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[tokio::test]
    async fn xlsx_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("responses.xlsx");
        {
            let mut workbook = Workbook::new();
            let sheet = workbook.add_worksheet();
            sheet.set_name("Answers").unwrap();
            sheet.write_string(0, 0, "Answer").unwrap();
            sheet.write_string(0, 1, "Score").unwrap();
            sheet.write_string(1, 0, "Good service").unwrap();
            sheet.write_number(1, 1, 5).unwrap();
            sheet.write_number(2, 0, 42).unwrap();
            sheet.write_string(3, 1, "no answer").unwrap();
            workbook.save(&path).unwrap();
        }

        let input = WorkbookInput::open(path.clone(), Some("Answers".into()))
            .await
            .unwrap();
        assert_eq!(input.headers(), [Box::<str>::from("Answer"), "Score".into()]);
        let texts = input.read_column(0, &ProgressReport::new()).unwrap();
        assert_eq!(
            texts,
            [Some(Box::<str>::from("Good service")), Some("42".into()), None]
        );

        let err = WorkbookInput::open(path, Some("Missing".into()))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("reading worksheet \"Missing\""));
    }
}
