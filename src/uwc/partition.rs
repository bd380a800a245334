use std::num::NonZeroUsize;
use std::ops::Range;

use super::tokenize::is_whitespace;

/// One worker's share of the input, as decided at claim time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkSpec {
    /// Claim order, 0-based.
    pub index: usize,
    /// Bytes to read before boundary extension. Ignored when `is_final`.
    pub nominal_size: u64,
    /// The final claim reads everything that remains.
    pub is_final: bool,
}

/// Nominal split of `total_len` bytes across `workers`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub total_len: u64,
    pub workers: NonZeroUsize,
    pub nominal_size: u64,
}

impl Partition {
    /// `nominal_size = floor(total_len / workers)`. When `total_len < workers`
    /// this is 0 and the non-final workers read only their boundary extension.
    pub fn new(total_len: u64, workers: NonZeroUsize) -> Self {
        Self {
            total_len,
            workers,
            nominal_size: total_len / workers.get() as u64,
        }
    }

    /// Spec for the `index`-th claim. Exactly one index (the last) is final.
    #[inline]
    pub fn spec(&self, index: usize) -> ChunkSpec {
        ChunkSpec {
            index,
            nominal_size: self.nominal_size,
            is_final: index + 1 == self.workers.get(),
        }
    }

    /// All specs in claim order.
    pub fn specs(&self) -> impl Iterator<Item = ChunkSpec> + '_ {
        (0..self.workers.get()).map(|i| self.spec(i))
    }
}

/// A precomputed, boundary-aligned byte range of an in-memory buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub spec: ChunkSpec,
    /// Bytes handed to the tokenizer.
    pub range: Range<usize>,
    /// Bytes taken off the input, including a discarded delimiter.
    pub consumed: usize,
}

/// Split `data` into `workers` disjoint ranges using the same rule as the
/// shared cursor: each non-final range takes `nominal_size` bytes and then
/// extends up to (and swallows) the next whitespace byte; the final range
/// takes the rest. Since all offsets are absolute, the ranges can be
/// processed in any order without coordination.
pub fn split_ranges(data: &[u8], workers: NonZeroUsize) -> Vec<Span> {
    let partition = Partition::new(data.len() as u64, workers);
    // nominal_size <= data.len(), so it fits in usize.
    let nominal = partition.nominal_size as usize;
    let len = data.len();
    let mut spans = Vec::with_capacity(workers.get());
    let mut pos = 0usize;

    for spec in partition.specs() {
        let start = pos;
        if spec.is_final {
            spans.push(Span {
                spec,
                range: start..len,
                consumed: len - start,
            });
            pos = len;
            continue;
        }

        let fixed_end = (start + nominal).min(len);
        let (end, next) = match data[fixed_end..].iter().position(|&b| is_whitespace(b)) {
            Some(i) => (fixed_end + i, fixed_end + i + 1),
            None => (len, len),
        };
        spans.push(Span {
            spec,
            range: start..end,
            consumed: next - start,
        });
        pos = next;
    }

    spans
}
