//! Selection of the input column that holds the text to be analyzed

use crate::{error::ColumnNotFound, Result};
use anyhow::Context;
use dialoguer::FuzzySelect;
use std::io::IsTerminal;
use unicase::UniCase;

/// Pick the text column, prompting the user if no column name was specified
pub fn select(headers: &[Box<str>], requested: Option<&str>) -> Result<usize> {
    match requested {
        Some(name) => Ok(find(headers, name)?),
        None => {
            anyhow::ensure!(
                std::io::stderr().is_terminal(),
                "no text column name was specified and there is no terminal to ask for one"
            );
            anyhow::ensure!(!headers.is_empty(), "input has no column to pick text from");
            prompt(headers).context("asking which column holds the text")
        }
    }
}

/// Find the index of a column from its name
///
/// An exact match is preferred. Failing that, a case-insensitive match is
/// accepted if there is only one.
pub fn find(headers: &[Box<str>], name: &str) -> Result<usize, ColumnNotFound> {
    if let Some(index) = headers.iter().position(|header| &**header == name) {
        return Ok(index);
    }
    let name_nocase = UniCase::new(name);
    let mut candidates = (headers.iter().enumerate())
        .filter(|(_, header)| UniCase::new(&***header) == name_nocase);
    match (candidates.next(), candidates.next()) {
        (Some((index, header)), None) => {
            log::info!("Using column {header:?} for requested text column {name:?}");
            Ok(index)
        }
        (Some(first), Some(second)) => Err(ColumnNotFound::Ambiguous {
            name: name.into(),
            candidates: quoted_list([first, second].into_iter().chain(candidates).map(|(_, h)| h)),
        }),
        (None, _) => Err(ColumnNotFound::Missing {
            name: name.into(),
            available: quoted_list(headers.iter()),
        }),
    }
}

/// Ask the user to select a column
fn prompt(headers: &[Box<str>]) -> dialoguer::Result<usize> {
    let column_names = (headers.iter().enumerate())
        .map(|(index, name)| format!("{name} (column {index})"))
        .collect::<Vec<_>>();
    FuzzySelect::new()
        .with_prompt("Which column holds the text?")
        .items(&column_names)
        .default(0)
        .max_length(usize::MAX)
        .interact()
}

/// Display column names as a comma-separated list
fn quoted_list<'a>(names: impl Iterator<Item = &'a Box<str>>) -> Box<str> {
    names
        .map(|name| format!("{name:?}"))
        .collect::<Vec<_>>()
        .join(", ")
        .into()
}
