//! Domain errors
//!
//! Most of the program propagates errors through [`anyhow`], but the failure
//! modes that callers may want to tell apart get their own types here.

#[cfg(test)]
use std::io;
use thiserror::Error;

/// Requested n-gram lengths do not form a valid range
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("maximum ngram length ({max}) must be greater than or equal to minimum ngram length ({min})")]
pub struct InvalidNgramLengths {
    pub min: usize,
    pub max: usize,
}

/// Attempted to build an [`NgramCount`](crate::count::NgramCount) that
/// would not describe at least one occurence of a non-empty ngram
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum InvalidNgramCount {
    #[error("ngram {ngram:?} must have a positive occurence count")]
    ZeroCount { ngram: Box<str> },

    #[error("ngrams must not be empty")]
    EmptyNgram,
}

/// The character stream that text was being tokenized from could not be read
#[cfg(test)]
#[derive(Debug, Error)]
#[error("failed to read text for tokenization")]
pub struct UnreadableText(#[from] pub io::Error);

/// The requested text column is not part of the input's header row
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ColumnNotFound {
    #[error("no text column with name {name:?} (available columns: {available})")]
    Missing { name: Box<str>, available: Box<str> },

    #[error("text column name {name:?} is ambiguous, it matches columns {candidates} when ignoring case")]
    Ambiguous { name: Box<str>, candidates: Box<str> },
}

/// Input or output file whose format we do not know how to handle
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unsupported file format for {path:?}, expected one of {supported}")]
pub struct UnsupportedFormat {
    pub path: Box<str>,
    pub supported: &'static str,
}
