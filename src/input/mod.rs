//! Reading the text column from the input file
//!
//! Inputs are tables whose first row holds the column names. Delimited text
//! files (CSV/TSV, possibly gzipped) are streamed asynchronously, while
//! spreadsheet workbooks are loaded in one go on a blocking thread.

mod delimited;
mod workbook;

use crate::{error::UnsupportedFormat, progress::ProgressReport, Result};
use std::path::Path;

pub use self::{delimited::DelimitedInput, workbook::WorkbookInput};

/// Text cells from the input's text column, in row order
///
/// Empty cells are `None`.
pub type Texts = Vec<Option<Box<str>>>;

/// Supported input file formats
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InputFormat {
    /// Delimiter-separated values
    Delimited {
        /// Field delimiter
        delimiter: u8,

        /// Truth that the data is gzip-compressed
        gzip: bool,
    },

    /// Spreadsheet workbook (xlsx, xlsm, xlsb, xls, ods)
    Workbook,
}
//
impl InputFormat {
    /// File extensions that we know how to read
    pub const SUPPORTED: &'static str =
        ".csv, .tsv, .txt (optionally followed by .gz), .xlsx, .xlsm, .xlsb, .xls, .ods";

    /// Determine the input format from a file name
    pub fn from_path(path: &Path) -> Result<Self, UnsupportedFormat> {
        let unsupported = || UnsupportedFormat {
            path: path.to_string_lossy().into(),
            supported: Self::SUPPORTED,
        };
        let extension = |path: &Path| {
            path.extension()
                .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        };
        let mut gzip = false;
        let mut ext = extension(path).ok_or_else(unsupported)?;
        if ext == "gz" {
            gzip = true;
            let stem = path.file_stem().map(Path::new).ok_or_else(unsupported)?;
            ext = extension(stem).ok_or_else(unsupported)?;
        }
        match (&*ext, gzip) {
            ("csv", _) => Ok(Self::Delimited {
                delimiter: b',',
                gzip,
            }),
            ("tsv" | "txt", _) => Ok(Self::Delimited {
                delimiter: b'\t',
                gzip,
            }),
            ("xlsx" | "xlsm" | "xlsb" | "xls" | "ods", false) => Ok(Self::Workbook),
            _ => Err(unsupported()),
        }
    }
}

/// Input file whose header row has been read
#[derive(Debug)]
pub enum Input {
    Delimited(DelimitedInput),
    Workbook(WorkbookInput),
}
//
impl Input {
    /// Open an input file and read its header row
    ///
    /// `sheet` selects a worksheet in workbooks, the first one is used by
    /// default. It must be `None` for other formats.
    pub async fn open(path: &Path, format: InputFormat, sheet: Option<&str>) -> Result<Self> {
        match format {
            InputFormat::Delimited { delimiter, gzip } => {
                debug_assert!(sheet.is_none(), "worksheet names are only valid for workbooks");
                Ok(Self::Delimited(
                    DelimitedInput::open(path, delimiter, gzip).await?,
                ))
            }
            InputFormat::Workbook => Ok(Self::Workbook(
                WorkbookInput::open(path.to_owned(), sheet.map(Box::from)).await?,
            )),
        }
    }

    /// Column names
    pub fn headers(&self) -> &[Box<str>] {
        match self {
            Self::Delimited(input) => input.headers(),
            Self::Workbook(input) => input.headers(),
        }
    }

    /// Read the cells of one column from all remaining rows
    pub async fn read_column(self, column: usize, report: &ProgressReport) -> Result<Texts> {
        match self {
            Self::Delimited(input) => input.read_column(column, report).await,
            Self::Workbook(input) => input.read_column(column, report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_from_extensions() {
        let format = |name: &str| InputFormat::from_path(Path::new(name));
        let csv = InputFormat::Delimited {
            delimiter: b',',
            gzip: false,
        };
        assert_eq!(format("data.csv"), Ok(csv));
        assert_eq!(format("dir.d/DATA.CSV"), Ok(csv));
        assert_eq!(
            format("tweets.tsv.gz"),
            Ok(InputFormat::Delimited {
                delimiter: b'\t',
                gzip: true,
            })
        );
        assert_eq!(format("book.xlsx"), Ok(InputFormat::Workbook));
        assert_eq!(format("old.xls"), Ok(InputFormat::Workbook));
        assert!(format("book.xlsx.gz").is_err());
        assert!(format("data.json").is_err());
        assert!(format("data").is_err());
        assert!(format("data.gz").is_err());
    }
}
