use std::io::{self, Read, Write};
use std::path::Path;
use std::thread;

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::common::io::{open_file, open_source, read_open_file};

use super::config::{ReadStrategy, UwcConfig};
use super::cursor::SharedCursor;
use super::error::{Result, UwcError};
use super::partition::{Partition, split_ranges};
use super::vocab::Vocabulary;
use super::worker::{ChunkReport, WorkerOutput, extract_words, run_worker};

/// Drives one unique-word count: partition, dispatch workers, join, merge.
///
/// The vocabulary is replaced only when every worker succeeded. A failed
/// call leaves the previous result (empty, for a fresh processor) in place.
#[derive(Debug, Default)]
pub struct WordProcessor {
    config: UwcConfig,
    vocabulary: Vocabulary,
    reports: Vec<ChunkReport>,
}

impl WordProcessor {
    pub fn new(config: UwcConfig) -> Self {
        Self {
            config,
            vocabulary: Vocabulary::new(),
            reports: Vec::new(),
        }
    }

    pub fn config(&self) -> &UwcConfig {
        &self.config
    }

    /// Count the unique words of the file at `path` with the configured
    /// strategy. Returns the number of distinct words.
    pub fn process_file(&mut self, path: &Path) -> Result<usize> {
        match self.config.strategy {
            ReadStrategy::SharedCursor => {
                let (file, len) = open_source(path).map_err(|e| UwcError::open(path, e))?;
                self.process_reader(file, len)
            }
            ReadStrategy::Mmap => {
                let file = open_file(path).map_err(|e| UwcError::open(path, e))?;
                let data =
                    read_open_file(file).map_err(|source| UwcError::Read { offset: 0, source })?;
                self.process_bytes(&data)
            }
        }
    }

    /// Shared-cursor pipeline over any byte source of `total_len` bytes.
    ///
    /// Launches one scoped thread per worker. Each claims the next span under
    /// the cursor lock; the driver joins them in launch order and only merges
    /// once all of them have returned successfully.
    pub fn process_reader<R: Read + Send>(&mut self, source: R, total_len: u64) -> Result<usize> {
        let partition = Partition::new(total_len, self.config.workers);
        debug!(
            "partition: {} bytes across {} workers, nominal chunk {} bytes",
            partition.total_len, partition.workers, partition.nominal_size
        );

        let cursor = SharedCursor::new(source, partition);
        let joined: Vec<Result<WorkerOutput>> = thread::scope(|s| {
            let handles: Vec<_> = (0..partition.workers.get())
                .map(|_| s.spawn(|| run_worker(&cursor)))
                .collect();
            handles
                .into_iter()
                .enumerate()
                .map(|(i, h)| h.join().unwrap_or_else(|_| Err(UwcError::WorkerPanicked(i))))
                .collect()
        });

        // All-or-nothing: the first failure discards every other worker's set.
        let outputs = joined.into_iter().collect::<Result<Vec<_>>>()?;

        let consumed = cursor.position()?;
        if consumed != total_len {
            warn!(
                "source length changed while reading: expected {} bytes, consumed {}",
                total_len, consumed
            );
        }

        Ok(self.finish(outputs))
    }

    /// Precomputed-range pipeline over an in-memory buffer. Ranges are
    /// fixed before dispatch, so workers need no shared state at all.
    pub fn process_bytes(&mut self, data: &[u8]) -> Result<usize> {
        let workers = self.config.workers.get();
        let spans = split_ranges(data, self.config.workers);
        debug!(
            "split {} bytes into {} precomputed ranges",
            data.len(),
            spans.len()
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
            .map_err(|e| UwcError::Internal(format!("failed to build thread pool: {}", e)))?;

        let outputs: Vec<WorkerOutput> = pool.install(|| {
            spans
                .par_iter()
                .map(|span| {
                    let words = extract_words(&data[span.range.clone()]);
                    let report = ChunkReport {
                        index: span.spec.index,
                        offset: span.range.start as u64,
                        consumed: span.consumed as u64,
                        words: words.len(),
                        is_final: span.spec.is_final,
                    };
                    WorkerOutput { words, report }
                })
                .collect()
        });

        Ok(self.finish(outputs))
    }

    /// Merge phase: fold every worker's set into a fresh vocabulary.
    fn finish(&mut self, outputs: Vec<WorkerOutput>) -> usize {
        let mut vocabulary = Vocabulary::new();
        let mut reports = Vec::with_capacity(outputs.len());
        for output in outputs {
            reports.push(output.report);
            vocabulary.merge(output.words);
        }
        reports.sort_unstable_by_key(|r| r.index);

        info!(
            "{} unique words across {} chunks",
            vocabulary.len(),
            reports.len()
        );
        self.vocabulary = vocabulary;
        self.reports = reports;
        self.vocabulary.len()
    }

    /// Distinct words found by the last successful call.
    #[inline]
    pub fn unique_count(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Per-chunk reports of the last successful call, in claim order.
    pub fn reports(&self) -> &[ChunkReport] {
        &self.reports
    }

    /// Write the one-line result.
    pub fn print_result(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{} unique words found.", self.unique_count())
    }
}

/// Convenience wrapper: count the unique words of `path` with `config`.
pub fn count_unique_words(path: &Path, config: &UwcConfig) -> Result<usize> {
    WordProcessor::new(config.clone()).process_file(path)
}
