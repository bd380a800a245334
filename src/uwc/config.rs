use std::num::NonZeroUsize;
use std::thread;

use super::error::{Result, UwcError};

/// How the source file is split among workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadStrategy {
    /// All workers share one read cursor guarded by a lock; each claim takes
    /// the next contiguous span and the last claim reads to end of file.
    #[default]
    SharedCursor,
    /// The whole file is mapped (or read, for small files) and split into
    /// precomputed ranges before any worker starts.
    Mmap,
}

/// Configuration for a unique-word count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UwcConfig {
    pub workers: NonZeroUsize,
    pub strategy: ReadStrategy,
}

impl Default for UwcConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            strategy: ReadStrategy::SharedCursor,
        }
    }
}

/// Available hardware parallelism, or 1 if it cannot be determined.
pub fn default_workers() -> NonZeroUsize {
    thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

impl UwcConfig {
    /// Build a config with an explicit worker count. Zero is rejected.
    pub fn with_workers(workers: usize) -> Result<Self> {
        let workers = NonZeroUsize::new(workers)
            .ok_or_else(|| UwcError::Config("invalid number of threads: '0'".to_string()))?;
        Ok(Self {
            workers,
            ..Self::default()
        })
    }

    /// Parse the optional thread-count argument of the command line.
    /// `None` means "use available parallelism"; anything that is not a
    /// positive integer is a configuration error.
    pub fn parse_workers(arg: Option<&str>) -> Result<NonZeroUsize> {
        let Some(raw) = arg else {
            return Ok(default_workers());
        };
        let invalid = || UwcError::Config(format!("invalid number of threads: '{}'", raw));
        let n: i64 = raw.trim().parse().map_err(|_| invalid())?;
        if n <= 0 {
            return Err(invalid());
        }
        usize::try_from(n)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(invalid)
    }
}
