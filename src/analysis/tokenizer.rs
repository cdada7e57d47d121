//! Tokenizers split text into lowercase terms.
//!
//! The default [`RegexTokenizer`] splits on maximal runs of characters that
//! are neither letters, numbers nor `_`. Empty segments produced by leading or
//! trailing separators are kept as empty terms; nothing is stemmed and no
//! stopwords are removed.

use std::fmt::Debug;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TermdexError};

/// A lazy stream of terms borrowed from the tokenized text.
pub type TermStream<'a> = Box<dyn Iterator<Item = String> + 'a>;

/// Pattern matching one separator run between terms.
///
/// Word characters are Unicode letters and numbers of any kind plus `_`.
/// Combining marks and other connector punctuation separate terms.
pub const DEFAULT_SEPARATOR_PATTERN: &str = r"[^\p{L}\p{N}_]+";

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_SEPARATOR_PATTERN).unwrap());

/// Splits text into a sequence of terms.
///
/// Each call to [`Tokenizer::tokenize`] produces a fresh stream, so the
/// sequence can be restarted by tokenizing the same text again.
pub trait Tokenizer: Send + Sync + Debug {
    /// Tokenize `text` into lowercase terms.
    fn tokenize<'a>(&'a self, text: &'a str) -> TermStream<'a>;

    /// Name of this tokenizer, used in log output.
    fn name(&self) -> &'static str;
}

/// Tokenizer that splits on a separator regex and lowercases each segment.
#[derive(Debug, Clone)]
pub struct RegexTokenizer {
    separator: Regex,
}

impl RegexTokenizer {
    /// Create a tokenizer splitting on [`DEFAULT_SEPARATOR_PATTERN`].
    pub fn new() -> Self {
        RegexTokenizer {
            separator: NON_WORD_RE.clone(),
        }
    }

    /// Create a tokenizer splitting on a custom separator pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let separator = Regex::new(pattern).map_err(|e| {
            TermdexError::invalid_argument(format!("Invalid separator pattern '{pattern}': {e}"))
        })?;
        Ok(RegexTokenizer { separator })
    }

    /// The separator pattern in use.
    pub fn pattern(&self) -> &str {
        self.separator.as_str()
    }
}

impl Default for RegexTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize<'a>(&'a self, text: &'a str) -> TermStream<'a> {
        Box::new(self.separator.split(text).map(str::to_lowercase))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
