//! Ngram occurence counting

use crate::{
    add_nz_u64,
    error::InvalidNgramCount,
    ngrams::{self, NgramLengths},
    progress::ProgressTracker,
    tokenize, Ngram,
};
use rayon::prelude::*;
use serde::Serialize;
use std::{
    collections::{hash_map, HashMap},
    num::NonZeroU64,
};

/// Number of occurences of an ngram across the whole input
///
/// Serializes as a report row, with fields in report column order.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct NgramCount {
    ngram: Ngram,
    count: NonZeroU64,
}
//
impl NgramCount {
    /// Record that a non-empty ngram was seen `count >= 1` times
    pub fn new(ngram: impl Into<Ngram>, count: u64) -> Result<Self, InvalidNgramCount> {
        let ngram = ngram.into();
        if ngram.is_empty() {
            return Err(InvalidNgramCount::EmptyNgram);
        }
        let Some(count) = NonZeroU64::new(count) else {
            return Err(InvalidNgramCount::ZeroCount { ngram });
        };
        Ok(Self { ngram, count })
    }

    /// Text of the ngram
    pub fn ngram(&self) -> &str {
        &self.ngram
    }

    /// Number of occurences
    pub fn count(&self) -> NonZeroU64 {
        self.count
    }
}

/// Ngram occurence counter
///
/// Texts can be fed one by one with [`add_text()`](Self::add_text), and
/// counters built from disjoint sets of texts can be combined with
/// [`merge()`](Self::merge). Since addition is commutative and associative,
/// the final counts do not depend on the order in which this is done.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NgramCounter {
    /// Ngram length range
    lengths: NgramLengths,

    /// Occurences of each ngram seen so far
    counts: HashMap<Ngram, NonZeroU64>,

    /// Statistics about the texts that were fed in
    stats: CountStats,
}
//
impl NgramCounter {
    /// Set up a counter for ngrams within a certain length range
    pub fn new(lengths: NgramLengths) -> Self {
        Self {
            lengths,
            counts: HashMap::new(),
            stats: CountStats::default(),
        }
    }

    /// Count the ngrams from one text
    ///
    /// Missing and blank texts are ignored.
    pub fn add_text(&mut self, text: Option<&str>) {
        self.stats.texts += 1;
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return;
        };
        self.stats.nonblank_texts += 1;
        let tokens = tokenize::tokenize(text);
        self.stats.windows += ngrams::window_count(tokens.len(), self.lengths);
        for ngram in ngrams::ngrams(&tokens, self.lengths) {
            self.add_occurences(ngram.into(), NonZeroU64::MIN);
        }
    }

    /// Merge the counts from another counter into this one
    pub fn merge(mut self, mut other: Self) -> Self {
        if self.counts.len() < other.counts.len() {
            std::mem::swap(&mut self, &mut other);
        }
        self.stats.merge(other.stats);
        for (ngram, count) in other.counts {
            self.add_occurences(ngram, count);
        }
        self
    }

    /// Statistics about the texts that were fed in so far
    pub fn stats(&self) -> CountStats {
        self.stats
    }

    /// Number of distinct ngrams seen so far
    pub fn num_ngrams(&self) -> usize {
        self.counts.len()
    }

    /// Export the final counts, in unspecified order
    pub fn finish(self) -> Result<NgramCounts, InvalidNgramCount> {
        let counts = (self.counts.into_par_iter())
            .map(|(ngram, count)| NgramCount::new(ngram, count.get()))
            .collect::<Result<_, _>>()?;
        Ok(NgramCounts {
            counts,
            stats: self.stats,
        })
    }

    /// Record extra occurences of an ngram
    fn add_occurences(&mut self, ngram: Ngram, count: NonZeroU64) {
        match self.counts.entry(ngram) {
            hash_map::Entry::Occupied(o) => {
                let o = o.into_mut();
                *o = add_nz_u64(*o, count);
            }
            hash_map::Entry::Vacant(v) => {
                v.insert(count);
            }
        }
    }
}

/// Statistics about the texts that went through an [`NgramCounter`]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CountStats {
    /// Texts that were fed in, including missing and blank ones
    pub texts: u64,

    /// Texts that were actually tokenized
    pub nonblank_texts: u64,

    /// Ngram windows that were counted, i.e. total occurences of all ngrams
    pub windows: u64,
}
//
impl CountStats {
    /// Merge statistics from a disjoint set of texts
    fn merge(&mut self, other: Self) {
        self.texts += other.texts;
        self.nonblank_texts += other.nonblank_texts;
        self.windows += other.windows;
    }
}

/// Final ngram counts, one entry per distinct ngram, in unspecified order
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NgramCounts {
    /// Occurence count of each distinct ngram
    pub counts: Vec<NgramCount>,

    /// Statistics about the texts these counts were computed from
    pub stats: CountStats,
}

/// Count the ngrams across a set of texts in parallel
///
/// Input texts are processed in chunks of `chunk_size`. Each worker thread
/// accumulates its own counts, and the per-thread counts are summed at the
/// end. Progress is reported once per processed chunk.
pub fn compute<S: AsRef<str> + Sync>(
    texts: &[Option<S>],
    lengths: NgramLengths,
    chunk_size: usize,
    progress: &ProgressTracker,
) -> Result<NgramCounts, InvalidNgramCount> {
    let counter = (texts.par_chunks(chunk_size.max(1)))
        .fold(
            || NgramCounter::new(lengths),
            |mut counter, chunk| {
                for text in chunk {
                    counter.add_text(text.as_ref().map(S::as_ref));
                }
                progress.make_progress(1);
                counter
            },
        )
        .reduce(|| NgramCounter::new(lengths), NgramCounter::merge);
    log::debug!(
        "Counted {} distinct ngrams with {:?}",
        counter.num_ngrams(),
        counter.stats()
    );
    counter.finish()
}
