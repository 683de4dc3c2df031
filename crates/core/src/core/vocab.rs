//! Vocabulary storage and lookup.
//!
//! Token strings are kept in their byte-level form (see
//! [`crate::encoding::ByteMap`]), so `"Ġworld"` is the entry for `" world"`.
//! Storage uses AHashMap for fast lookups and CompactString so the short
//! tokens that dominate a BPE vocabulary stay inline.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;
use std::collections::HashMap;

/// Forward mapping: token string -> ID
pub type Vocab = AHashMap<CompactString, u32>;

/// Reverse mapping: ID -> token string
pub type VocabR = AHashMap<u32, CompactString>;

/// Vocabulary with forward and reverse mappings.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    /// Forward mapping: token string -> ID
    pub vocab: Vocab,
    /// Reverse mapping: ID -> token string
    pub vocab_r: VocabR,
    /// Smallest ID not yet handed out by `add_token`
    next_id: u32,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vocab: Vocab::with_capacity(capacity),
            vocab_r: VocabR::with_capacity(capacity),
            next_id: 0,
        }
    }

    /// Parse a vocabulary from a JSON object of `{ "token": id }` pairs,
    /// the layout of GPT-2's `encoder.json`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: HashMap<String, u32> = serde_json::from_str(json)
            .map_err(|e| TokenizerError::ResourceLoad(format!("Failed to parse vocabulary: {}", e)))?;

        if entries.is_empty() {
            return Err(TokenizerError::ResourceLoad(
                "Vocabulary is empty".to_string(),
            ));
        }

        let mut vocab = Self::with_capacity(entries.len());
        for (token, id) in entries {
            vocab.add_token_with_id(&token, id)?;
        }

        Ok(vocab)
    }

    /// Add a token to the vocabulary.
    ///
    /// Returns the ID assigned to the token, or its existing ID.
    pub fn add_token(&mut self, token: &str) -> Result<u32> {
        if let Some(id) = self.get_id(token) {
            return Ok(id);
        }

        let id = self.next_id;
        self.add_token_with_id(token, id)?;
        Ok(id)
    }

    /// Add a token with a specific ID.
    ///
    /// Returns an error if the ID or the token string is already taken.
    pub fn add_token_with_id(&mut self, token: &str, id: u32) -> Result<()> {
        if let Some(existing) = self.vocab_r.get(&id) {
            return Err(TokenizerError::ResourceLoad(format!(
                "Token ID {} is assigned to both {:?} and {:?}",
                id, existing, token
            )));
        }
        if let Some(existing) = self.get_id(token) {
            return Err(TokenizerError::ResourceLoad(format!(
                "Token {:?} is assigned to both {} and {}",
                token, existing, id
            )));
        }

        let token = CompactString::new(token);
        self.vocab_r.insert(id, token.clone());
        self.vocab.insert(token, id);
        self.next_id = self.next_id.max(id.saturating_add(1));

        Ok(())
    }

    /// Get the ID for a token string.
    #[inline]
    pub fn get_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }

    /// Get the token string for an ID.
    #[inline]
    pub fn get_token(&self, id: u32) -> Option<&str> {
        self.vocab_r.get(&id).map(|s| s.as_str())
    }

    /// Get the size of the vocabulary.
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// Check if the vocabulary is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut vocab = Vocabulary::new();

        assert_eq!(vocab.add_token("Ġthe").unwrap(), 0);
        assert_eq!(vocab.add_token("ing").unwrap(), 1);
        assert_eq!(vocab.get_token(1), Some("ing"));
        assert_eq!(vocab.get_id("Ġthe"), Some(0));
        assert_eq!(vocab.get_id("the"), None);
    }

    #[test]
    fn test_existing_token_keeps_its_id() {
        let mut vocab = Vocabulary::new();
        vocab.add_token("ing").unwrap();

        assert_eq!(vocab.add_token("ing").unwrap(), 0);
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn test_add_token_with_id() {
        let mut vocab = Vocabulary::new();
        vocab.add_token_with_id("Hello", 15496).unwrap();
        vocab.add_token_with_id("Ġworld", 995).unwrap();

        assert_eq!(vocab.get_id("Hello"), Some(15496));
        assert_eq!(vocab.get_token(995), Some("Ġworld"));

        // Auto-assigned IDs continue after the highest explicit one
        assert_eq!(vocab.add_token("!").unwrap(), 15497);
    }

    #[test]
    fn test_duplicates_rejected() {
        let mut vocab = Vocabulary::new();
        vocab.add_token_with_id("a", 64).unwrap();

        let err = vocab.add_token_with_id("b", 64).unwrap_err();
        assert!(matches!(err, TokenizerError::ResourceLoad(_)));

        let err = vocab.add_token_with_id("a", 65).unwrap_err();
        assert!(matches!(err, TokenizerError::ResourceLoad(_)));
    }

    #[test]
    fn test_from_json_str() {
        let vocab = Vocabulary::from_json_str(r#"{"!": 0, "a": 1, "Ġworld": 995}"#).unwrap();

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.get_id("Ġworld"), Some(995));
        assert_eq!(vocab.get_token(1), Some("a"));
    }

    #[test]
    fn test_from_json_str_malformed() {
        let err = Vocabulary::from_json_str(r#"{"a": "one"}"#).unwrap_err();
        assert!(matches!(err, TokenizerError::ResourceLoad(_)));

        let err = Vocabulary::from_json_str("{}").unwrap_err();
        assert!(matches!(err, TokenizerError::ResourceLoad(_)));

        let err = Vocabulary::from_json_str("not json").unwrap_err();
        assert!(matches!(err, TokenizerError::ResourceLoad(_)));
    }
}
