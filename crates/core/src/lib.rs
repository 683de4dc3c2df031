//! openai-do-core - Byte-level BPE primitives
//!
//! This crate provides the data structures and the merge algorithm behind the
//! `openai-do tokens` commands, independent of where the vocabulary comes from.
//!
//! # Features
//!
//! - Vocabulary storage using `AHashMap` and compact strings
//! - Merge rules keyed by token ID pairs with constant-time rank lookup
//! - The GPT-2 byte-to-unicode table
//! - An arena/heap based merge loop that never reallocates while merging
//!
//! # Example
//!
//! ```rust
//! use openai_do_core::{BytePairEncoder, MergeRules, Vocabulary};
//!
//! let vocab = Vocabulary::from_json_str(r#"{"a": 0, "b": 1, "ab": 2}"#)?;
//! let merges = MergeRules::from_text("#version: 0.2\na b\n", &vocab)?;
//! let encoder = BytePairEncoder::new(vocab, merges);
//!
//! assert_eq!(encoder.encode_chunk("ab")?, vec![2]);
//! assert_eq!(encoder.decode(&[2, 0])?, "aba");
//! # Ok::<(), openai_do_core::TokenizerError>(())
//! ```

pub mod error;
pub use error::{Result, TokenizerError};

// Core BPE data structures
pub mod core;
pub use core::{
    MergeCandidate, MergeMap, MergeQueue, MergeRule, MergeRules, Pair, Vocab, VocabR, Vocabulary,
};

// Byte-level encoding
pub mod encoding;
pub use encoding::{ByteMap, BytePairEncoder};
