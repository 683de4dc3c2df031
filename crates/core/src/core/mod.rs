//! Core BPE data structures.
//!
//! Vocabulary, merge rules and the merge queue, independent of how text is
//! mapped to symbols.

pub mod merges;
pub mod priority;
pub mod vocab;

pub use merges::{MergeMap, MergeRule, MergeRules, Pair};
pub use priority::{MergeCandidate, MergeQueue};
pub use vocab::{Vocab, VocabR, Vocabulary};
