//! Processing pipeline configuration

use crate::{
    input::InputFormat,
    ngrams::NgramLengths,
    report::{Output, OutputFormat, OutputTarget, MAX_XLSX_DATA_ROWS},
    Args, Result,
};
use std::{num::NonZeroUsize, path::PathBuf, sync::Arc};

/// Final process configuration
///
/// This is the result of validating and digesting [`Args`]. Please refer to
/// [`Args`] to know more about common fields.
#[allow(missing_docs)]
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    /// Input data file
    pub input: PathBuf,

    /// Format of the input data file
    pub input_format: InputFormat,

    /// Range of ngram lengths to be counted
    pub lengths: NgramLengths,

    /// Reports to be produced, at least one
    pub outputs: Box<[Output]>,

    // Other fields have the same meaning as in Args
    pub sheet: Option<Box<str>>,
    pub text_column: Option<Box<str>>,
    pub max_outputs: NonZeroUsize,
    pub chunk_size: NonZeroUsize,
}
//
impl Config {
    /// Determine and check the process configuration
    ///
    /// This must succeed before any input is read.
    pub(crate) fn new(args: Args) -> Result<Arc<Self>> {
        let Args {
            input,
            text_column,
            sheet,
            min_ngram_length,
            max_ngram_length,
            csv,
            xlsx,
            max_outputs,
            chunk_size,
        } = args;
        let lengths = NgramLengths::new(min_ngram_length, max_ngram_length)?;
        let input_format = InputFormat::from_path(&input)?;
        anyhow::ensure!(
            sheet.is_none() || input_format == InputFormat::Workbook,
            "a worksheet name can only be specified for spreadsheet workbook inputs, \
             {input:?} is a delimited text file"
        );

        // Without any output file, the CSV report goes to stdout
        let mut outputs = Vec::new();
        if let Some(path) = csv {
            outputs.push(Output {
                format: OutputFormat::Csv,
                target: OutputTarget::File(path),
            });
        }
        if let Some(path) = xlsx {
            anyhow::ensure!(
                max_outputs.get() <= MAX_XLSX_DATA_ROWS,
                "XLSX reports cannot hold more than {MAX_XLSX_DATA_ROWS} ngrams, \
                 please lower the maximal number of output ngrams"
            );
            outputs.push(Output {
                format: OutputFormat::Xlsx,
                target: OutputTarget::File(path),
            });
        }
        if outputs.is_empty() {
            outputs.push(Output {
                format: OutputFormat::Csv,
                target: OutputTarget::Stdout,
            });
        }

        Ok(Arc::new(Self {
            input,
            input_format,
            lengths,
            outputs: outputs.into(),
            sheet,
            text_column,
            max_outputs,
            chunk_size,
        }))
    }
}
