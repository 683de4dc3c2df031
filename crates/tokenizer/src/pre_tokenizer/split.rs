//! Text splitting for pre-tokenization.
//!
//! Text is cut into chunks before BPE so merges stay inside word-like units.
//! Splitting is lossless: the chunks concatenate back to the input.

use fancy_regex::Regex;
use openai_do_core::{Result, TokenizerError};

/// GPT-2 pre-tokenization pattern.
///
/// Contractions, letter runs, digit runs and symbol runs each take at most one
/// leading space. `\s+(?!\S)` stops a whitespace run one character early when
/// a word follows, leaving that last space for the word.
pub const GPT2_PATTERN: &str =
    r"'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+";

/// Splitting patterns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SplitPattern {
    /// GPT-2 regex splitting
    #[default]
    Gpt2,
    /// No splitting (keep text as-is)
    NoSplit,
    /// Custom regex pattern
    Custom(String),
}

/// Text splitter for pre-tokenization.
#[derive(Debug, Clone)]
pub struct Splitter {
    /// Compiled pattern; `None` means no splitting
    regex: Option<Regex>,
}

impl Splitter {
    /// Create a new splitter.
    ///
    /// Fails with `InvalidConfig` if a custom pattern does not compile.
    pub fn new(pattern: &SplitPattern) -> Result<Self> {
        let source = match pattern {
            SplitPattern::Gpt2 => GPT2_PATTERN,
            SplitPattern::NoSplit => return Ok(Self { regex: None }),
            SplitPattern::Custom(source) => source.as_str(),
        };

        let regex = Regex::new(source).map_err(|e| {
            TokenizerError::InvalidConfig(format!("Invalid split pattern {:?}: {}", source, e))
        })?;

        Ok(Self { regex: Some(regex) })
    }

    /// Create a GPT-2 splitter.
    pub fn gpt2() -> Result<Self> {
        Self::new(&SplitPattern::Gpt2)
    }

    /// Split text into chunks.
    ///
    /// Text not covered by any match is returned as its own chunk, so a custom
    /// pattern still yields a lossless split. Empty matches are dropped.
    pub fn split<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let Some(regex) = &self.regex else {
            return Ok(vec![text]);
        };

        let mut chunks = Vec::new();
        let mut last = 0;

        for found in regex.find_iter(text) {
            let found = found
                .map_err(|e| TokenizerError::Encoding(format!("Pre-tokenization failed: {}", e)))?;
            if found.start() > last {
                chunks.push(&text[last..found.start()]);
            }
            if !found.as_str().is_empty() {
                chunks.push(found.as_str());
            }
            last = found.end();
        }

        if last < text.len() {
            chunks.push(&text[last..]);
        }

        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn gpt2(text: &str) -> Vec<&str> {
        Splitter::gpt2().unwrap().split(text).unwrap()
    }

    #[test]
    fn test_gpt2_words_and_punctuation() {
        assert_eq!(gpt2("Hello, world!"), vec!["Hello", ",", " world", "!"]);
    }

    #[test]
    fn test_gpt2_whitespace_attaches_to_next_chunk() {
        assert_eq!(gpt2("hello world"), vec!["hello", " world"]);
        assert_eq!(gpt2("hello  world"), vec!["hello", " ", " world"]);
        assert_eq!(gpt2("  leading"), vec![" ", " leading"]);
        assert_eq!(gpt2("trailing  "), vec!["trailing", "  "]);
    }

    #[test]
    fn test_gpt2_contractions() {
        assert_eq!(
            gpt2("I'm can't they'll"),
            vec!["I", "'m", " can", "'t", " they", "'ll"]
        );
    }

    #[test]
    fn test_gpt2_digits_and_unicode() {
        assert_eq!(gpt2("12345 apples"), vec!["12345", " apples"]);
        assert_eq!(gpt2("héllo wörld"), vec!["héllo", " wörld"]);
        assert_eq!(gpt2("🦀 Rust"), vec!["🦀", " Rust"]);
    }

    #[test]
    fn test_gpt2_newlines() {
        // Only a plain space is attached to the following word.
        assert_eq!(gpt2("a\n\nb"), vec!["a", "\n", "\n", "b"]);
        assert_eq!(gpt2("line\nbreak\n\n"), vec!["line", "\n", "break", "\n\n"]);
    }

    #[test]
    fn test_nosplit() {
        let splitter = Splitter::new(&SplitPattern::NoSplit).unwrap();
        let result = splitter.split("hello world  test").unwrap();
        assert_eq!(result, vec!["hello world  test"]);
    }

    #[test]
    fn test_custom_split_keeps_gaps() {
        let splitter = Splitter::new(&SplitPattern::Custom(r"\d+".to_string())).unwrap();
        let result = splitter.split("ab12cd3").unwrap();
        assert_eq!(result, vec!["ab", "12", "cd", "3"]);
    }

    #[test]
    fn test_invalid_custom_pattern() {
        let err = Splitter::new(&SplitPattern::Custom("(".to_string())).unwrap_err();
        assert!(matches!(err, TokenizerError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(gpt2(""), Vec::<&str>::new());
    }

    proptest! {
        #[test]
        fn prop_chunks_reconstruct_input(text in any::<String>()) {
            let chunks = gpt2(&text);
            prop_assert!(chunks.iter().all(|chunk| !chunk.is_empty()));
            prop_assert_eq!(chunks.concat(), text);
        }
    }
}
