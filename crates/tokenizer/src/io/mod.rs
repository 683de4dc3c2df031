//! Loading of vocabularies and merge tables.
//!
//! The GPT-2 tables are embedded at build time; HuggingFace-style
//! directories (`vocab.json` + `merges.txt`) can be loaded at runtime.

pub mod load;

pub use load::{TokenizerLoader, GPT2_MERGES_TXT, GPT2_VOCAB_JSON};
