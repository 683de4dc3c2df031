//! Pre-tokenization pipeline.
//!
//! Splits raw text into chunks before BPE encoding.

pub mod split;

pub use split::{SplitPattern, Splitter, GPT2_PATTERN};
