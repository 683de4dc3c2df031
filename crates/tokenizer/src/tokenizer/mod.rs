//! Main tokenizer implementation.
//!
//! This module provides the high-level `Tokenizer` struct that ties the
//! pre-tokenizer, the chunk cache and the byte-level BPE encoder together.

use crate::io::TokenizerLoader;
use crate::pre_tokenizer::{SplitPattern, Splitter};
use crate::utils::{CacheStats, ChunkCache};
use openai_do_core::{BytePairEncoder, MergeRules, Result, Vocabulary};
use rayon::prelude::*;
use std::path::Path;
use std::sync::OnceLock;

/// Configuration for building a tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    /// Pre-tokenization pattern
    pub split_pattern: SplitPattern,
    /// Cache chunk encodings for the lifetime of the tokenizer
    pub cache_enabled: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            split_pattern: SplitPattern::Gpt2,
            cache_enabled: true,
        }
    }
}

/// Builder for creating a tokenizer.
#[derive(Debug, Clone, Default)]
pub struct TokenizerBuilder {
    config: TokenizerConfig,
}

impl TokenizerBuilder {
    /// Create a new tokenizer builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pre-tokenization pattern.
    pub fn split_pattern(mut self, pattern: SplitPattern) -> Self {
        self.config.split_pattern = pattern;
        self
    }

    /// Enable or disable the chunk cache.
    pub fn cache(mut self, enabled: bool) -> Self {
        self.config.cache_enabled = enabled;
        self
    }

    /// Build a tokenizer over the embedded GPT-2 tables.
    pub fn build_gpt2(self) -> Result<Tokenizer> {
        let (vocab, merges) = TokenizerLoader::gpt2()?;
        self.build_from_parts(vocab, merges)
    }

    /// Build a tokenizer over tables loaded from a HuggingFace-style directory.
    pub fn load_huggingface(self, path: &Path) -> Result<Tokenizer> {
        let (vocab, merges) = TokenizerLoader::load_huggingface(path)?;
        self.build_from_parts(vocab, merges)
    }

    /// Build a tokenizer over the given tables.
    pub fn build_from_parts(self, vocab: Vocabulary, merges: MergeRules) -> Result<Tokenizer> {
        Tokenizer::new(vocab, merges, self.config)
    }
}

/// Main tokenizer struct.
///
/// Encoding splits text into chunks, encodes each chunk with byte-level BPE
/// (through the cache when enabled) and concatenates the IDs in order.
///
/// A `Tokenizer` is `Send + Sync`; after construction it can be shared by
/// reference across threads.
#[derive(Debug)]
pub struct Tokenizer {
    /// Byte-level BPE encoder
    encoder: BytePairEncoder,
    /// Text splitter
    splitter: Splitter,
    /// Chunk cache, absent when disabled
    cache: Option<ChunkCache>,
    /// Configuration
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a new tokenizer with the given tables and configuration.
    pub fn new(vocab: Vocabulary, merges: MergeRules, config: TokenizerConfig) -> Result<Self> {
        let splitter = Splitter::new(&config.split_pattern)?;
        let cache = config.cache_enabled.then(ChunkCache::new);

        Ok(Self {
            encoder: BytePairEncoder::new(vocab, merges),
            splitter,
            cache,
            config,
        })
    }

    /// Create a tokenizer builder.
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::new()
    }

    /// Create a GPT-2/3 tokenizer from the embedded tables.
    ///
    /// Parses the full vocabulary on every call; prefer
    /// [`Tokenizer::gpt2_shared`] when one instance will do.
    pub fn gpt2() -> Result<Self> {
        Self::builder().build_gpt2()
    }

    /// Process-wide GPT-2/3 tokenizer, built on first use.
    ///
    /// Concurrent first calls may each build a tokenizer; one of them is kept.
    pub fn gpt2_shared() -> Result<&'static Tokenizer> {
        static SHARED: OnceLock<Tokenizer> = OnceLock::new();

        if let Some(tokenizer) = SHARED.get() {
            return Ok(tokenizer);
        }
        let tokenizer = Self::gpt2()?;
        Ok(SHARED.get_or_init(|| tokenizer))
    }

    /// Load a tokenizer from a HuggingFace-style directory.
    ///
    /// # Arguments
    /// * `path` - Directory containing `vocab.json` and `merges.txt`
    pub fn load_huggingface(path: &Path) -> Result<Self> {
        Self::builder().load_huggingface(path)
    }

    /// Encode text to token IDs.
    pub fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let chunks = self.splitter.split(text)?;
        let mut ids = Vec::with_capacity(text.len() / 3 + 1);

        for chunk in chunks {
            match &self.cache {
                Some(cache) => {
                    let cached = cache.get_or_encode(chunk, |c| self.encoder.encode_chunk(c))?;
                    ids.extend_from_slice(&cached);
                }
                None => ids.extend(self.encoder.encode_chunk(chunk)?),
            }
        }

        Ok(ids)
    }

    /// Encode a batch of texts (parallelized).
    ///
    /// Fails if any text fails; no partial results are returned.
    pub fn encode_batch<S>(&self, texts: &[S]) -> Result<Vec<Vec<u32>>>
    where
        S: AsRef<str> + Sync,
    {
        texts
            .par_iter()
            .map(|text| self.encode(text.as_ref()))
            .collect()
    }

    /// Count the tokens `text` encodes to.
    pub fn count(&self, text: &str) -> Result<usize> {
        self.encode(text).map(|ids| ids.len())
    }

    /// Decode token IDs back to text.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        self.encoder.decode(ids)
    }

    /// Get the vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.encoder.vocab().len()
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        self.encoder.vocab()
    }

    /// ID of a token in its byte-level form (`"Ġworld"`, not `" world"`).
    pub fn token_to_id(&self, token: &str) -> Option<u32> {
        self.encoder.vocab().get_id(token)
    }

    /// Byte-level form of the token with the given ID.
    pub fn id_to_token(&self, id: u32) -> Option<&str> {
        self.encoder.vocab().get_token(id)
    }

    /// Get the configuration the tokenizer was built with.
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Cache statistics, `None` when the cache is disabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(ChunkCache::stats)
    }

    /// Drop all cached chunk encodings.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }
}
