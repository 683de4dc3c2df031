//! Byte-level BPE encoding (GPT-2 style).
//!
//! A chunk of text is converted to UTF-8 bytes, each byte becomes the
//! vocabulary entry of its byte-level character, and adjacent symbols are
//! merged in rank order until no adjacent pair has a merge rule.
//!
//! Symbols live in an arena linked by `prev`/`next` indices, so a merge only
//! rewrites two slots and never shifts or reallocates the sequence.

use crate::core::{MergeCandidate, MergeQueue, MergeRules, Vocabulary};
use crate::encoding::ByteMap;
use crate::error::{Result, TokenizerError};

/// One symbol of a chunk being merged.
#[derive(Debug, Clone, Copy)]
struct Symbol {
    /// Current token ID
    id: u32,
    /// Number of input bytes covered; 0 once merged into its left neighbour
    len: usize,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Byte-level BPE encoder and decoder over a fixed vocabulary and merge table.
#[derive(Debug, Clone)]
pub struct BytePairEncoder {
    /// Vocabulary in byte-level form
    vocab: Vocabulary,
    /// Merge rules keyed by token ID pairs
    merges: MergeRules,
    /// Token ID of each single-byte symbol
    byte_ids: [Option<u32>; 256],
    /// Byte <-> character table
    bytes: &'static ByteMap,
}

impl BytePairEncoder {
    /// Create a new byte-level encoder.
    pub fn new(vocab: Vocabulary, merges: MergeRules) -> Self {
        let bytes = ByteMap::shared();
        let mut byte_ids = [None; 256];
        let mut buf = [0u8; 4];

        for byte in 0..=255u8 {
            let symbol = bytes.char_for(byte).encode_utf8(&mut buf);
            byte_ids[usize::from(byte)] = vocab.get_id(symbol);
        }

        Self {
            vocab,
            merges,
            byte_ids,
            bytes,
        }
    }

    /// Get a reference to the vocabulary.
    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Get a reference to the merge rules.
    pub fn merges(&self) -> &MergeRules {
        &self.merges
    }

    /// Encode a single pre-tokenized chunk into token IDs.
    pub fn encode_chunk(&self, chunk: &str) -> Result<Vec<u32>> {
        let input = chunk.as_bytes();
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let mut symbols = Vec::with_capacity(input.len());
        for (i, &byte) in input.iter().enumerate() {
            let id = self.byte_ids[usize::from(byte)].ok_or_else(|| {
                TokenizerError::Encoding(format!(
                    "byte 0x{:02x} ({:?}) has no vocabulary entry",
                    byte,
                    self.bytes.char_for(byte)
                ))
            })?;
            symbols.push(Symbol {
                id,
                len: 1,
                prev: i.checked_sub(1),
                next: (i + 1 < input.len()).then_some(i + 1),
            });
        }

        self.apply_merges(&mut symbols)?;

        Ok(symbols
            .iter()
            .filter(|symbol| symbol.len > 0)
            .map(|symbol| symbol.id)
            .collect())
    }

    /// Queue the pair starting at `left`, if it has a merge rule.
    fn queue_pair(&self, symbols: &[Symbol], left: usize, queue: &mut MergeQueue) {
        let Some(right) = symbols[left].next else {
            return;
        };
        let (l, r) = (&symbols[left], &symbols[right]);

        if let Some(rule) = self.merges.get((l.id, r.id)) {
            queue.push(MergeCandidate {
                rank: rule.rank,
                left,
                right,
                len: l.len + r.len,
                new_id: rule.new_id,
            });
        }
    }

    /// Merge adjacent symbols in rank order until no pair has a rule.
    ///
    /// Candidates whose symbols changed after they were queued are skipped:
    /// the left symbol must still link to the same right symbol and both must
    /// still cover the same bytes.
    fn apply_merges(&self, symbols: &mut [Symbol]) -> Result<()> {
        if symbols.len() < 2 {
            return Ok(());
        }

        let mut queue = MergeQueue::with_capacity(symbols.len());
        for left in 0..symbols.len() - 1 {
            self.queue_pair(symbols, left, &mut queue);
        }

        while let Some(candidate) = queue.pop() {
            let (l, r) = (symbols[candidate.left], symbols[candidate.right]);
            if l.len == 0 || r.len == 0 || l.next != Some(candidate.right) {
                continue;
            }
            if l.len + r.len != candidate.len {
                continue;
            }

            let new_id = candidate.new_id.ok_or_else(|| {
                TokenizerError::Encoding(format!(
                    "merge of {:?} and {:?} (rank {}) produces a token missing from the vocabulary",
                    self.vocab.get_token(l.id).unwrap_or("?"),
                    self.vocab.get_token(r.id).unwrap_or("?"),
                    candidate.rank
                ))
            })?;

            symbols[candidate.left] = Symbol {
                id: new_id,
                len: l.len + r.len,
                prev: l.prev,
                next: r.next,
            };
            symbols[candidate.right].len = 0;
            if let Some(next) = r.next {
                symbols[next].prev = Some(candidate.left);
            }

            if let Some(prev) = l.prev {
                self.queue_pair(symbols, prev, &mut queue);
            }
            self.queue_pair(symbols, candidate.left, &mut queue);
        }

        Ok(())
    }

    /// Decode token IDs back to text.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        let mut bytes = Vec::with_capacity(ids.len() * 4);

        for &id in ids {
            let token = self
                .vocab
                .get_token(id)
                .ok_or(TokenizerError::UnknownToken(id))?;
            self.bytes.decode_into(token, &mut bytes)?;
        }

        String::from_utf8(bytes).map_err(|e| TokenizerError::MalformedOutput {
            offset: e.utf8_error().valid_up_to(),
            reason: e.utf8_error().to_string(),
        })
    }
}
