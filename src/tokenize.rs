//! Text tokenization
//!
//! Text is lower-cased, then split on Unicode (UAX #29) word boundaries. URLs
//! and email addresses would be torn apart by plain word segmentation, so they
//! are located beforehand and kept as single tokens.

use regex::Regex;
use std::sync::OnceLock;
#[cfg(test)]
use {crate::error::UnreadableText, std::io::Read};
use unicode_segmentation::UnicodeSegmentation;

/// Split some text into lower-case word-like tokens
///
/// Punctuation, symbols and whitespace only act as separators and are never
/// emitted as tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let text = text.to_lowercase();
    let mut tokens = Vec::new();
    let mut last_end = 0;
    for address in url_or_email().find_iter(&text) {
        push_words(&text[last_end..address.start()], &mut tokens);
        tokens.push(address.as_str().to_owned());
        last_end = address.end();
    }
    push_words(&text[last_end..], &mut tokens);
    tokens
}

/// Tokenize text from a character stream
///
/// Fails if the stream cannot be read to the end or is not valid UTF-8. Input
/// cells are already decoded in memory, so only tests feed streams.
#[cfg(test)]
pub fn tokenize_reader(mut reader: impl Read) -> Result<Vec<String>, UnreadableText> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(tokenize(&text))
}

/// Append the words from a stretch of text that contains no URL or email
fn push_words(text: &str, tokens: &mut Vec<String>) {
    tokens.extend(text.unicode_words().map(str::to_owned));
}

/// Regex matching URLs and email addresses
///
/// URLs may start with a scheme, which can directly follow other letters, or
/// be bare `host.tld` names with an optional path. Bare names need a top-level
/// domain of at least two letters, so that numbers like `3.14` stay words.
/// Emails take precedence over bare names. Trailing sentence punctuation and
/// closing brackets are left out of the match.
fn url_or_email() -> &'static Regex {
    static LAZY: OnceLock<Regex> = OnceLock::new();
    LAZY.get_or_init(|| {
        Regex::new(concat!(
            r#"(?:(?:https?|ftp)://|\bwww\.)[^\s<>"]*[^\s<>".,;:!?'()\[\]{}]"#,
            r"|",
            r"\b[\w.+\-]+@[\w\-]+(?:\.[\w\-]+)+\b",
            r"|",
            r#"\b[\w\-]+(?:\.[\w\-]+)*\.\p{L}{2,}\b(?:/[^\s<>"]*[^\s<>".,;:!?'()\[\]{}])?"#,
        ))
        .expect("URL/email regex should be valid")
    })
}
