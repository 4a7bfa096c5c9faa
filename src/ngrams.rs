//! Sliding-window ngram generation

use crate::error::InvalidNgramLengths;
use std::num::NonZeroUsize;

/// Inclusive range of ngram lengths, in tokens
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NgramLengths {
    min: NonZeroUsize,
    max: NonZeroUsize,
}
//
impl NgramLengths {
    /// Check that the maximum length is not smaller than the minimum length
    pub fn new(min: NonZeroUsize, max: NonZeroUsize) -> Result<Self, InvalidNgramLengths> {
        if max < min {
            return Err(InvalidNgramLengths {
                min: min.get(),
                max: max.get(),
            });
        }
        Ok(Self { min, max })
    }

    /// Shortest accepted ngram length
    pub fn min(&self) -> usize {
        self.min.get()
    }

    /// Longest accepted ngram length
    pub fn max(&self) -> usize {
        self.max.get()
    }
}

/// Enumerate the ngrams of a token sequence
///
/// For each start position, in order, this yields every window of the allowed
/// lengths that fits inside the token sequence, shortest first. Windows never
/// extend past the last token, and the last token is part of the longest
/// windows that end there. Tokens are joined by a single space. Repeated
/// windows are yielded as many times as they occur.
pub fn ngrams<T: AsRef<str>>(
    tokens: &[T],
    lengths: NgramLengths,
) -> impl Iterator<Item = String> + '_ {
    (0..tokens.len()).flat_map(move |start| {
        let max_len = lengths.max().min(tokens.len() - start);
        (lengths.min()..=max_len).map(move |len| join(&tokens[start..start + len]))
    })
}

/// Number of windows that [`ngrams()`] yields for a sequence of `num_tokens`
pub fn window_count(num_tokens: usize, lengths: NgramLengths) -> u64 {
    (lengths.min()..=lengths.max())
        .take_while(|&len| len <= num_tokens)
        .map(|len| (num_tokens - len + 1) as u64)
        .sum()
}

/// Join tokens with single spaces
fn join<T: AsRef<str>>(tokens: &[T]) -> String {
    let len = tokens.iter().map(|t| t.as_ref().len() + 1).sum::<usize>();
    let mut ngram = String::with_capacity(len.saturating_sub(1));
    for (idx, token) in tokens.iter().enumerate() {
        if idx > 0 {
            ngram.push(' ');
        }
        ngram.push_str(token.as_ref());
    }
    ngram
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Shorthand for building length ranges in tests
    pub(crate) fn lengths(min: usize, max: usize) -> NgramLengths {
        NgramLengths::new(
            NonZeroUsize::new(min).unwrap(),
            NonZeroUsize::new(max).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn length_validation() {
        let one = NonZeroUsize::new(1).unwrap();
        let two = NonZeroUsize::new(2).unwrap();
        assert!(NgramLengths::new(one, one).is_ok());
        assert!(NgramLengths::new(one, two).is_ok());
        assert_eq!(
            NgramLengths::new(two, one),
            Err(InvalidNgramLengths { min: 2, max: 1 })
        );
    }

    #[test]
    fn windows_include_the_last_token() {
        let all = ngrams(&["a", "b", "c"], lengths(1, 3)).collect::<Vec<_>>();
        assert_eq!(all, ["a", "a b", "a b c", "b", "b c", "c"]);
        assert_eq!(window_count(3, lengths(1, 3)), 6);
    }

    #[test]
    fn length_bounds() {
        let tokens = ["the", "quick", "brown", "fox"];
        let bigrams = ngrams(&tokens, lengths(2, 2)).collect::<Vec<_>>();
        assert_eq!(bigrams, ["the quick", "quick brown", "brown fox"]);
        let long = ngrams(&tokens, lengths(3, 10)).collect::<Vec<_>>();
        assert_eq!(long, ["the quick brown", "the quick brown fox", "quick brown fox"]);
        assert_eq!(window_count(4, lengths(3, 10)), 3);
    }

    #[test]
    fn too_few_tokens() {
        let empty: [&str; 0] = [];
        assert_eq!(ngrams(&empty, lengths(1, 3)).count(), 0);
        assert_eq!(ngrams(&["a", "b"], lengths(3, 4)).count(), 0);
        assert_eq!(window_count(2, lengths(3, 4)), 0);
        assert_eq!(window_count(0, lengths(1, 1)), 0);
    }

    #[test]
    fn repeats_are_kept() {
        let all = ngrams(&["la", "la", "la"], lengths(1, 1)).collect::<Vec<_>>();
        assert_eq!(all, ["la", "la", "la"]);
    }
}
