use std::io::{self, BufRead, BufReader, Read};
use std::sync::{Mutex, MutexGuard};

use log::trace;

use super::error::{Result, UwcError};
use super::partition::{ChunkSpec, Partition};
use super::tokenize::is_whitespace;

/// Buffer size for the shared reader. Boundary extension scans this buffer
/// directly, so a larger buffer means fewer refills per extension.
const READ_BUF_SIZE: usize = 256 * 1024;

/// Bytes one claim took off the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Absolute stream position where this chunk starts.
    pub offset: u64,
    /// Bytes kept for tokenization.
    pub data: Vec<u8>,
    /// Bytes consumed from the stream: `data.len()`, plus one if a
    /// whitespace delimiter was swallowed at the end.
    pub consumed: u64,
}

impl Chunk {
    /// True if the read stopped on a whitespace byte that was discarded.
    #[inline]
    pub fn swallowed_delimiter(&self) -> bool {
        self.consumed > self.data.len() as u64
    }
}

struct CursorState<R> {
    reader: BufReader<R>,
    position: u64,
    claims_made: usize,
}

impl<R: Read> CursorState<R> {
    fn read_chunk(&mut self, requested_size: u64, extend_to_boundary: bool) -> io::Result<Chunk> {
        let offset = self.position;
        let mut data = Vec::new();

        let consumed = if extend_to_boundary {
            // The request may exceed what the stream holds; let read_to_end
            // grow past one buffer's worth.
            data.reserve(requested_size.min(READ_BUF_SIZE as u64) as usize);
            // Short reads only happen at end of stream; an earlier claim's
            // extension may have eaten into this claim's nominal span.
            Read::by_ref(&mut self.reader)
                .take(requested_size)
                .read_to_end(&mut data)?;
            data.len() as u64 + self.extend_to_boundary(&mut data)?
        } else {
            self.reader.read_to_end(&mut data)? as u64
        };

        self.position += consumed;
        Ok(Chunk {
            offset,
            data,
            consumed,
        })
    }

    /// Append bytes up to the next whitespace byte (or end of stream). The
    /// whitespace byte itself is consumed but not appended, so the next claim
    /// starts at the first byte after it. Returns the number of bytes consumed.
    fn extend_to_boundary(&mut self, data: &mut Vec<u8>) -> io::Result<u64> {
        let mut consumed = 0u64;
        loop {
            let (done, used) = {
                let available = match self.reader.fill_buf() {
                    Ok(buf) => buf,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                };
                if available.is_empty() {
                    return Ok(consumed);
                }
                match available.iter().position(|&b| is_whitespace(b)) {
                    Some(i) => {
                        data.extend_from_slice(&available[..i]);
                        (true, i + 1)
                    }
                    None => {
                        data.extend_from_slice(available);
                        (false, available.len())
                    }
                }
            };
            self.reader.consume(used);
            consumed += used as u64;
            if done {
                return Ok(consumed);
            }
        }
    }
}

/// The single read position into the source, shared by all workers.
///
/// Every read (fixed span plus boundary extension) happens under one lock,
/// so spans are contiguous, non-overlapping and cover the stream exactly
/// once. Which worker reads to end of stream is decided by claim order:
/// the claim that exhausts the partition's worker count is the final one,
/// whatever thread happens to make it.
pub struct SharedCursor<R> {
    state: Mutex<CursorState<R>>,
    partition: Partition,
}

impl<R: Read> SharedCursor<R> {
    pub fn new(source: R, partition: Partition) -> Self {
        Self {
            state: Mutex::new(CursorState {
                reader: BufReader::with_capacity(READ_BUF_SIZE, source),
                position: 0,
                claims_made: 0,
            }),
            partition,
        }
    }

    pub fn partition(&self) -> &Partition {
        &self.partition
    }

    fn lock(&self) -> Result<MutexGuard<'_, CursorState<R>>> {
        self.state
            .lock()
            .map_err(|_| UwcError::Internal("source cursor lock poisoned".to_string()))
    }

    /// Take the next span. Non-final claims read `nominal_size` bytes and
    /// extend to the next whitespace; the last claim reads to end of stream.
    /// Claiming more often than the partition has workers is an error.
    pub fn claim(&self) -> Result<(ChunkSpec, Chunk)> {
        let mut state = self.lock()?;
        let index = state.claims_made;
        if index >= self.partition.workers.get() {
            return Err(UwcError::Internal(format!(
                "claim {} exceeds worker count {}",
                index + 1,
                self.partition.workers
            )));
        }
        state.claims_made += 1;

        let spec = self.partition.spec(index);
        let offset = state.position;
        let chunk = state
            .read_chunk(spec.nominal_size, !spec.is_final)
            .map_err(|source| UwcError::Read { offset, source })?;
        trace!(
            "claim {}: offset={} consumed={} final={}",
            spec.index, chunk.offset, chunk.consumed, spec.is_final
        );
        Ok((spec, chunk))
    }

    /// Raw read under the lock, without claim bookkeeping.
    ///
    /// With `extend_to_boundary`, reads up to `requested_size` bytes and then
    /// continues to the next whitespace byte, which is consumed and dropped.
    /// Without it, reads everything from the current position to end of stream.
    pub fn read_chunk(&self, requested_size: u64, extend_to_boundary: bool) -> Result<Chunk> {
        let mut state = self.lock()?;
        let offset = state.position;
        state
            .read_chunk(requested_size, extend_to_boundary)
            .map_err(|source| UwcError::Read { offset, source })
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> Result<u64> {
        Ok(self.lock()?.position)
    }

    /// Number of claims made so far.
    pub fn claims_made(&self) -> Result<usize> {
        Ok(self.lock()?.claims_made)
    }
}
