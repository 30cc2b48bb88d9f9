//! Block selection strategies.
//!
//! Each strategy is a pure function over the current partition: it looks
//! only at free blocks large enough for the request and returns the index
//! of the chosen block. Best-Fit and Worst-Fit break ties on the lowest
//! block ID.
//!
//! # Reference
//! Knuth (1997), "The Art of Computer Programming", Vol. 1, Ch. 2.5

use std::cmp::Reverse;

use super::AllocationPolicy;
use crate::models::{MemoryBlock, Size};

/// Selects a block index for a request of `size`.
///
/// `cursor` is the Next-Fit scan origin; other policies ignore it.
pub fn select_block(
    policy: AllocationPolicy,
    blocks: &[MemoryBlock],
    size: Size,
    cursor: usize,
) -> Option<usize> {
    match policy {
        AllocationPolicy::FirstFit => first_fit(blocks, size),
        AllocationPolicy::BestFit => best_fit(blocks, size),
        AllocationPolicy::WorstFit => worst_fit(blocks, size),
        AllocationPolicy::NextFit => next_fit(blocks, size, cursor),
    }
}

/// First free block, scanning from index 0, that is large enough.
pub fn first_fit(blocks: &[MemoryBlock], size: Size) -> Option<usize> {
    blocks.iter().position(|b| b.fits(size))
}

/// Free block leaving the least unused space.
pub fn best_fit(blocks: &[MemoryBlock], size: Size) -> Option<usize> {
    candidates(blocks, size)
        .min_by_key(|(_, b)| (b.size - size, b.id))
        .map(|(i, _)| i)
}

/// Largest free block.
pub fn worst_fit(blocks: &[MemoryBlock], size: Size) -> Option<usize> {
    candidates(blocks, size)
        .min_by_key(|(_, b)| (Reverse(b.size), b.id))
        .map(|(i, _)| i)
}

/// First-Fit starting at `cursor`, wrapping around to index 0.
pub fn next_fit(blocks: &[MemoryBlock], size: Size, cursor: usize) -> Option<usize> {
    let n = blocks.len();
    (0..n)
        .map(|offset| (cursor + offset) % n)
        .find(|&i| blocks[i].fits(size))
}

fn candidates(
    blocks: &[MemoryBlock],
    size: Size,
) -> impl Iterator<Item = (usize, &MemoryBlock)> + '_ {
    blocks.iter().enumerate().filter(move |(_, b)| b.fits(size))
}
