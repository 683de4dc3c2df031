//! Loading vocabularies and merge tables.
//!
//! Both sources use the GPT-2 release layout: a JSON `{ token: id }` object
//! and a `vocab.bpe`-style list of merge rules.

use openai_do_core::{MergeRules, Result, TokenizerError, Vocabulary};
use std::path::Path;

/// GPT-2 vocabulary (`encoder.json` from the public GPT-2 release).
pub const GPT2_VOCAB_JSON: &str = include_str!("../../assets/encoder.json");

/// GPT-2 merge rules (`vocab.bpe` from the public GPT-2 release).
pub const GPT2_MERGES_TXT: &str = include_str!("../../assets/vocab.bpe");

/// Tokenizer loader - builds vocabulary and merge tables from raw data.
pub struct TokenizerLoader;

impl TokenizerLoader {
    /// Parse a vocabulary JSON document and a merges document.
    pub fn from_strs(vocab_json: &str, merges_txt: &str) -> Result<(Vocabulary, MergeRules)> {
        let vocab = Vocabulary::from_json_str(vocab_json)?;
        let merges = MergeRules::from_text(merges_txt, &vocab)?;

        log::debug!(
            "loaded {} vocabulary entries and {} merge rules",
            vocab.len(),
            merges.len()
        );
        if merges.unresolved() > 0 {
            log::debug!(
                "{} merge rules produce tokens missing from the vocabulary",
                merges.unresolved()
            );
        }

        Ok((vocab, merges))
    }

    /// Load the GPT-2 tables bundled into the binary.
    pub fn gpt2() -> Result<(Vocabulary, MergeRules)> {
        Self::from_strs(GPT2_VOCAB_JSON, GPT2_MERGES_TXT)
    }

    /// Load from HuggingFace format (vocab.json + merges.txt).
    ///
    /// Expects two files in the given directory:
    /// - `vocab.json`: Token to ID mapping
    /// - `merges.txt`: Merge rules, one per line
    pub fn load_huggingface(path: &Path) -> Result<(Vocabulary, MergeRules)> {
        let vocab_json = Self::read(&path.join("vocab.json"))?;
        let merges_txt = Self::read(&path.join("merges.txt"))?;

        Self::from_strs(&vocab_json, &merges_txt)
    }

    fn read(path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|e| {
            TokenizerError::ResourceLoad(format!("Failed to read {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpt2_tables() {
        let (vocab, merges) = TokenizerLoader::gpt2().unwrap();

        assert_eq!(vocab.len(), 50_257);
        assert_eq!(merges.len(), 50_000);
        assert_eq!(merges.unresolved(), 0);
        assert_eq!(vocab.get_id("Hello"), Some(15496));
        assert_eq!(vocab.get_id("Ġworld"), Some(995));
        assert_eq!(vocab.get_token(50256), Some("<|endoftext|>"));

        // The first GPT-2 rule joins a space with "t".
        let space = vocab.get_id("Ġ").unwrap();
        let t = vocab.get_id("t").unwrap();
        assert_eq!(merges.rank((space, t)), Some(0));
    }

    #[test]
    fn test_from_strs_rejects_bad_merges() {
        let err = TokenizerLoader::from_strs(r#"{"a": 0, "b": 1}"#, "a b c").unwrap_err();
        assert!(matches!(err, TokenizerError::ResourceLoad(_)));
    }

    #[test]
    fn test_load_huggingface() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("vocab.json"),
            r#"{"h": 0, "i": 1, "hi": 2}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("merges.txt"), "#version: 0.2\nh i\n").unwrap();

        let (vocab, merges) = TokenizerLoader::load_huggingface(dir.path()).unwrap();

        assert_eq!(vocab.len(), 3);
        assert_eq!(merges.get((0, 1)).unwrap().new_id, Some(2));
    }

    #[test]
    fn test_load_huggingface_missing_files() {
        let dir = tempfile::tempdir().unwrap();

        let err = TokenizerLoader::load_huggingface(dir.path()).unwrap_err();
        match err {
            TokenizerError::ResourceLoad(message) => assert!(message.contains("vocab.json")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
