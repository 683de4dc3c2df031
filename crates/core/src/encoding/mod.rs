//! Byte-level encoding.
//!
//! - `byte_map`: the GPT-2 byte <-> unicode table
//! - `byte_level`: the BPE merge loop and decoder built on it

pub mod byte_level;
pub mod byte_map;

pub use byte_level::BytePairEncoder;
pub use byte_map::ByteMap;
