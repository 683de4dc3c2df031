//! Merge rule management for BPE.
//!
//! Merge rules are stored using token IDs rather than strings for fast
//! comparison. The rank of a rule is its position in the ordered merge list.

use crate::core::vocab::Vocabulary;
use crate::error::{Result, TokenizerError};
use ahash::AHashMap;
use compact_str::CompactString;

/// A pair of token IDs that can be merged.
pub type Pair = (u32, u32);

/// A single merge rule as seen by the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRule {
    /// Priority of the rule (lower rank = applied first)
    pub rank: u32,
    /// ID of the merged token, `None` when the vocabulary lacks `left + right`
    pub new_id: Option<u32>,
}

/// Merge rule mapping: pair -> rule.
pub type MergeMap = AHashMap<Pair, MergeRule>;

/// Collection of BPE merge rules with efficient lookup.
#[derive(Debug, Clone)]
pub struct MergeRules {
    /// Merge rules: pair -> (rank, new_token_id)
    pub merges: MergeMap,
    /// Maximum rank (for validation and ordering)
    pub max_rank: u32,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new collection with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            merges: MergeMap::with_capacity(capacity),
            max_rank: 0,
        }
    }

    /// Parse merge rules in the GPT-2 `vocab.bpe` layout.
    ///
    /// The first line may be a `#version` header. Every other non-blank line
    /// holds exactly two space-separated tokens; its rank is its position
    /// among those lines. Both tokens must exist in `vocab`. If a pair
    /// appears twice the earlier (higher priority) rank is kept.
    pub fn from_text(text: &str, vocab: &Vocabulary) -> Result<Self> {
        let mut rules = Self::with_capacity(vocab.len());
        let mut rank = 0u32;

        for (line_num, line) in text.lines().enumerate() {
            if line_num == 0 && line.starts_with("#version") {
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }

            let mut fields = line.split(' ');
            let (left, right) = match (fields.next(), fields.next(), fields.next()) {
                (Some(left), Some(right), None) if !left.is_empty() && !right.is_empty() => {
                    (left, right)
                }
                _ => {
                    return Err(TokenizerError::ResourceLoad(format!(
                        "Invalid merge format at line {}: {:?}",
                        line_num + 1,
                        line
                    )))
                }
            };

            let left_id = Self::operand_id(vocab, left, line_num)?;
            let right_id = Self::operand_id(vocab, right, line_num)?;

            let mut merged = CompactString::new(left);
            merged.push_str(right);
            let new_id = vocab.get_id(&merged);

            rules.add_merge((left_id, right_id), rank, new_id);
            rank += 1;
        }

        Ok(rules)
    }

    fn operand_id(vocab: &Vocabulary, token: &str, line_num: usize) -> Result<u32> {
        vocab.get_id(token).ok_or_else(|| {
            TokenizerError::ResourceLoad(format!(
                "Unknown token in merges at line {}: {:?}",
                line_num + 1,
                token
            ))
        })
    }

    /// Add a merge rule.
    ///
    /// Keeps the existing rule if `pair` is already present.
    pub fn add_merge(&mut self, pair: Pair, rank: u32, new_id: Option<u32>) {
        self.merges.entry(pair).or_insert(MergeRule { rank, new_id });
        self.max_rank = self.max_rank.max(rank);
    }

    /// Get the merge rule for a pair.
    #[inline]
    pub fn get(&self, pair: Pair) -> Option<MergeRule> {
        self.merges.get(&pair).copied()
    }

    /// Get the rank of a pair, if it merges at all.
    #[inline]
    pub fn rank(&self, pair: Pair) -> Option<u32> {
        self.get(pair).map(|rule| rule.rank)
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.merges.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    /// Number of rules whose merged token is missing from the vocabulary.
    pub fn unresolved(&self) -> usize {
        self.merges
            .values()
            .filter(|rule| rule.new_id.is_none())
            .count()
    }
}

impl Default for MergeRules {
    fn default() -> Self {
        Self::new()
    }
}
