//! Rank ngrams by decreasing occurence count and keep the top ones

use crate::count::NgramCount;
use rayon::prelude::*;
use std::{cmp::Ordering, num::NonZeroUsize};

/// Maximal number of unique ngrams in the output reports, by default
///
/// Spreadsheet formats have a row limit, and XLSX cannot hold much more than
/// one million rows.
pub const MAX_UNIQUE_NGRAM_COUNT: NonZeroUsize = match NonZeroUsize::new(1_000_000) {
    Some(max) => max,
    None => unreachable!(),
};

/// Ngrams sorted by decreasing popularity, possibly truncated
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ranking {
    /// Top ngrams, most frequent first
    pub top: Vec<NgramCount>,

    /// Number of less frequent ngrams that were discarded due to the limit
    pub discarded: usize,
}
//
impl Ranking {
    /// Truth that some ngrams did not make it into the ranking
    pub fn is_truncated(&self) -> bool {
        self.discarded > 0
    }
}

/// Ranking order: decreasing count, then increasing ngram text
///
/// This is a total order over distinct ngrams, so sorting with it gives the
/// same result no matter how the input was ordered.
pub fn by_decreasing_count(a: &NgramCount, b: &NgramCount) -> Ordering {
    (b.count().cmp(&a.count())).then_with(|| a.ngram().cmp(b.ngram()))
}

/// Sort ngrams by decreasing count and keep at most `limit` of them
///
/// Truncation is logged, and reported through [`Ranking::discarded`].
pub fn rank(mut counts: Vec<NgramCount>, limit: NonZeroUsize) -> Ranking {
    counts.par_sort_unstable_by(by_decreasing_count);
    let discarded = counts.len().saturating_sub(limit.get());
    if discarded > 0 {
        log::warn!(
            "Truncating output to the {limit} most common unique ngrams, discarding {discarded} others"
        );
        counts.truncate(limit.get());
    }
    Ranking {
        top: counts,
        discarded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn count(ngram: &str, count: u64) -> NgramCount {
        NgramCount::new(ngram, count).unwrap()
    }

    #[test]
    fn sorted_by_count_then_text() {
        let counts = vec![
            count("b", 2),
            count("a c", 1),
            count("z", 5),
            count("a", 2),
            count("a b", 1),
        ];
        let ranking = rank(counts, NonZeroUsize::new(10).unwrap());
        let order = (ranking.top.iter())
            .map(|c| (c.ngram(), c.count().get()))
            .collect::<Vec<_>>();
        assert_eq!(order, [("z", 5), ("a", 2), ("b", 2), ("a b", 1), ("a c", 1)]);
        assert!(!ranking.is_truncated());
    }

    #[test]
    fn empty_input() {
        let ranking = rank(Vec::new(), MAX_UNIQUE_NGRAM_COUNT);
        assert!(ranking.top.is_empty());
        assert_eq!(ranking.discarded, 0);
    }

    #[test]
    fn truncation_keeps_most_common() {
        let counts = vec![count("rare", 1), count("common", 9), count("usual", 4)];
        let ranking = rank(counts, NonZeroUsize::new(2).unwrap());
        assert_eq!(ranking.top, [count("common", 9), count("usual", 4)]);
        assert_eq!(ranking.discarded, 1);
        assert!(ranking.is_truncated());
    }

    #[test]
    fn truncation_at_default_limit() {
        let limit = MAX_UNIQUE_NGRAM_COUNT.get();
        let counts = (0..=limit)
            .map(|i| count(&format!("ngram{i:07}"), 1))
            .collect::<Vec<_>>();
        let ranking = rank(counts, MAX_UNIQUE_NGRAM_COUNT);
        assert_eq!(ranking.top.len(), limit);
        assert_eq!(ranking.discarded, 1);
        assert_eq!(ranking.top[0].ngram(), "ngram0000000");
        assert_eq!(ranking.top[limit - 1].ngram(), "ngram0999999");
    }

    proptest! {
        #[test]
        fn ranking_is_ordered_and_deterministic(
            entries in prop::collection::hash_map("[a-e]{1,3}", 1u64..6, 0..50),
            limit in 1usize..60,
        ) {
            let counts = (entries.iter())
                .map(|(ngram, &n)| count(ngram, n))
                .collect::<Vec<_>>();
            let mut reversed = counts.clone();
            reversed.reverse();
            let limit = NonZeroUsize::new(limit).unwrap();

            let ranking = rank(counts, limit);
            prop_assert_eq!(ranking.top.len(), entries.len().min(limit.get()));
            prop_assert_eq!(ranking.discarded, entries.len().saturating_sub(limit.get()));
            for pair in ranking.top.windows(2) {
                prop_assert!(pair[0].count() >= pair[1].count());
                prop_assert_eq!(by_decreasing_count(&pair[0], &pair[1]), Ordering::Less);
            }
            prop_assert_eq!(ranking, rank(reversed, limit));
        }
    }
}
