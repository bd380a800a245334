use std::io::Read;

use log::debug;

use super::cursor::SharedCursor;
use super::error::Result;
use super::normalize::normalize;
use super::tokenize::tokens;
use super::vocab::WordSet;

/// What one worker did, kept by the driver for logging and verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkReport {
    /// Claim order.
    pub index: usize,
    pub offset: u64,
    /// Bytes taken off the stream, including a swallowed delimiter.
    pub consumed: u64,
    /// Distinct words in this chunk.
    pub words: usize,
    pub is_final: bool,
}

/// A finished worker's result. Ownership moves to the driver on join.
#[derive(Debug)]
pub struct WorkerOutput {
    pub words: WordSet,
    pub report: ChunkReport,
}

/// Tokenize and normalize one buffer into its set of unique words.
pub fn extract_words(data: &[u8]) -> WordSet {
    tokens(data).filter_map(normalize).collect()
}

/// One chunk worker: claim the next span from the shared cursor, then
/// build its word set outside the lock.
pub fn run_worker<R: Read>(cursor: &SharedCursor<R>) -> Result<WorkerOutput> {
    let (spec, chunk) = cursor.claim()?;
    let words = extract_words(&chunk.data);
    let report = ChunkReport {
        index: spec.index,
        offset: chunk.offset,
        consumed: chunk.consumed,
        words: words.len(),
        is_final: spec.is_final,
    };
    debug!(
        "chunk {}: bytes {}..{} -> {} unique words",
        report.index,
        report.offset,
        report.offset + report.consumed,
        report.words
    );
    Ok(WorkerOutput { words, report })
}
