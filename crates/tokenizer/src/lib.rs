//! openai-do-tokenizer - GPT-2/3 token encoder
//!
//! This crate ties the byte-level BPE primitives of `openai-do-core` to a
//! pre-tokenizer and a chunk cache, and embeds the GPT-2 vocabulary and
//! merge rules so no files are needed at runtime.
//!
//! # Features
//!
//! - Bundled GPT-2 tables, parsed once per process with [`Tokenizer::gpt2_shared`]
//! - GPT-2 regex pre-tokenization, or a custom pattern
//! - Thread-safe chunk cache
//! - Parallel batch encoding with rayon
//! - Loading other vocabularies in the HuggingFace `vocab.json` + `merges.txt` layout
//!
//! # Example
//!
//! ```rust
//! use openai_do_tokenizer::Tokenizer;
//!
//! let tokenizer = Tokenizer::gpt2_shared()?;
//!
//! let ids = tokenizer.encode("Hello, world!")?;
//! assert_eq!(ids, vec![15496, 11, 995, 0]);
//! assert_eq!(tokenizer.decode(&ids)?, "Hello, world!");
//! # Ok::<(), openai_do_tokenizer::TokenizerError>(())
//! ```

// Re-export core types
pub use openai_do_core::{Result, TokenizerError};

// Tokenizer API
pub mod tokenizer;
pub use tokenizer::{Tokenizer, TokenizerBuilder, TokenizerConfig};

// Vocabulary loading
pub mod io;
pub use io::TokenizerLoader;

// Pre-tokenization
pub mod pre_tokenizer;
pub use pre_tokenizer::{SplitPattern, Splitter};

// Utilities
pub mod utils;
pub use utils::{CacheStats, ChunkCache};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
