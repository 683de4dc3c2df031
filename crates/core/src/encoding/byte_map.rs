//! GPT-2 byte-to-unicode mapping.
//!
//! Every byte value is assigned a printable character so that arbitrary
//! bytes can be merged as text. Printable Latin-1 bytes (`!`..`~`, `¡`..`¬`,
//! `®`..`ÿ`) map to themselves; the remaining bytes, in ascending order,
//! map to `U+0100`, `U+0101`, ... This is why a space shows up as `Ġ`
//! (`U+0120`) in the vocabulary.

use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use std::sync::OnceLock;

/// Bidirectional byte <-> character table.
#[derive(Debug, Clone)]
pub struct ByteMap {
    /// Byte to character
    encoder: [char; 256],
    /// Character to byte
    decoder: AHashMap<char, u8>,
}

impl ByteMap {
    /// Build the GPT-2 table.
    pub fn new() -> Self {
        let mut encoder = ['\0'; 256];
        let mut shifted = 0u32;

        for byte in 0..=255u8 {
            let printable = matches!(byte, b'!'..=b'~' | 0xA1..=0xAC | 0xAE..=0xFF);
            let codepoint = if printable {
                u32::from(byte)
            } else {
                shifted += 1;
                255 + shifted
            };
            // 0x100..=0x143 never hits the surrogate range.
            encoder[usize::from(byte)] =
                char::from_u32(codepoint).unwrap_or(char::REPLACEMENT_CHARACTER);
        }

        let decoder = encoder
            .iter()
            .enumerate()
            .map(|(byte, &ch)| (ch, byte as u8))
            .collect();

        Self { encoder, decoder }
    }

    /// Process-wide shared table.
    pub fn shared() -> &'static ByteMap {
        static MAP: OnceLock<ByteMap> = OnceLock::new();
        MAP.get_or_init(ByteMap::new)
    }

    /// Character standing in for `byte`.
    #[inline]
    pub fn char_for(&self, byte: u8) -> char {
        self.encoder[usize::from(byte)]
    }

    /// Byte represented by `ch`, if `ch` belongs to the table.
    #[inline]
    pub fn byte_for(&self, ch: char) -> Option<u8> {
        self.decoder.get(&ch).copied()
    }

    /// Map raw bytes to their byte-level string.
    pub fn encode(&self, bytes: &[u8]) -> String {
        bytes.iter().map(|&b| self.char_for(b)).collect()
    }

    /// Append the bytes represented by a byte-level string to `out`.
    ///
    /// Fails with `MalformedOutput` if `text` contains a character outside
    /// the table.
    pub fn decode_into(&self, text: &str, out: &mut Vec<u8>) -> Result<()> {
        for ch in text.chars() {
            let byte = self.byte_for(ch).ok_or_else(|| TokenizerError::MalformedOutput {
                offset: out.len(),
                reason: format!("character {:?} is not a byte-level symbol", ch),
            })?;
            out.push(byte);
        }
        Ok(())
    }
}

impl Default for ByteMap {
    fn default() -> Self {
        Self::new()
    }
}
