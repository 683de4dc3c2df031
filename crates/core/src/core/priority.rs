//! Priority queue for BPE merge candidates.
//!
//! During encoding every adjacent symbol pair that has a merge rule is queued
//! here. The queue pops the lowest rank first and, among equal ranks, the
//! leftmost pair.

use dary_heap::OctonaryHeap;
use std::cmp::Ordering;

/// A pending merge of two adjacent symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeCandidate {
    /// Rank of the merge rule (lower = higher priority)
    pub rank: u32,
    /// Arena index of the left symbol
    pub left: usize,
    /// Arena index of the right symbol
    pub right: usize,
    /// Combined byte length of both symbols when the candidate was queued
    pub len: usize,
    /// ID of the merged token, if the vocabulary has one
    pub new_id: Option<u32>,
}

// Reversed so the max-heap yields the lowest rank, then the leftmost position.
impl Ord for MergeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .rank
            .cmp(&self.rank)
            .then_with(|| other.left.cmp(&self.left))
    }
}

impl PartialOrd for MergeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Min-queue of merge candidates.
///
/// Uses an 8-ary heap for better cache locality than a binary heap. Entries
/// are never updated in place; callers discard stale candidates on pop.
#[derive(Debug, Default)]
pub struct MergeQueue {
    heap: OctonaryHeap<MergeCandidate>,
}

impl MergeQueue {
    /// Create a new queue with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: OctonaryHeap::with_capacity(capacity),
        }
    }

    /// Create a new empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a merge candidate onto the queue.
    #[inline]
    pub fn push(&mut self, candidate: MergeCandidate) {
        self.heap.push(candidate);
    }

    /// Pop the highest priority candidate.
    #[inline]
    pub fn pop(&mut self) -> Option<MergeCandidate> {
        self.heap.pop()
    }

    /// Get the number of (potentially stale) entries in the queue.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Check if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Clear all entries from the queue.
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(rank: u32, left: usize) -> MergeCandidate {
        MergeCandidate {
            rank,
            left,
            right: left + 1,
            len: 2,
            new_id: Some(0),
        }
    }

    #[test]
    fn test_lowest_rank_first() {
        let mut queue = MergeQueue::new();

        queue.push(candidate(10, 0));
        queue.push(candidate(2, 3));
        queue.push(candidate(5, 1));

        assert_eq!(queue.pop().unwrap().rank, 2);
        assert_eq!(queue.pop().unwrap().rank, 5);
        assert_eq!(queue.pop().unwrap().rank, 10);
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_equal_rank_leftmost_first() {
        let mut queue = MergeQueue::with_capacity(3);

        queue.push(candidate(4, 7));
        queue.push(candidate(4, 2));
        queue.push(candidate(4, 5));

        assert_eq!(queue.pop().unwrap().left, 2);
        assert_eq!(queue.pop().unwrap().left, 5);
        assert_eq!(queue.pop().unwrap().left, 7);
    }

    #[test]
    fn test_clear() {
        let mut queue = MergeQueue::new();

        queue.push(candidate(0, 0));
        queue.push(candidate(1, 1));

        assert!(!queue.is_empty());
        assert_eq!(queue.len(), 2);

        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
    }
}
