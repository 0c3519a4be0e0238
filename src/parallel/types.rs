//! Type definitions for parallel processing
//!
//! Contains the queue item, per-file outcome and pool configuration types.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::config::DEFAULT_BUFFER_SIZE;
use crate::error_handling::FileError;
use crate::record::Record;
use crate::stats::{FileSummary, ProcessingStats};

/// Configuration for parallel processing
#[derive(Debug, Clone)]
pub struct ParallelConfig {
    pub num_workers: usize,
    /// Capacity of the bounded record queue
    pub buffer_size: usize,
    /// Abort the run on the first file failure instead of collecting it
    pub fail_fast: bool,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: num_cpus::get(),
            buffer_size: DEFAULT_BUFFER_SIZE,
            fail_fast: false,
        }
    }
}

impl ParallelConfig {
    pub fn from_config(config: &crate::config::RegistryConfig) -> Self {
        Self {
            num_workers: config.effective_workers(),
            buffer_size: config.performance.buffer_size,
            fail_fast: config.processing.fail_fast,
        }
    }
}

/// Item carried by the record queue from file readers to the aggregator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ingested {
    Record(Record),
    /// A keyed entry with a value but no source; counted, never mapped
    Unattributed,
}

/// Source path to the set of registry keys seen for it
pub type OccurrenceMap = HashMap<String, HashSet<String>>;

/// What the aggregator hands back once the queue is closed and drained
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    pub occurrences: OccurrenceMap,
    /// Every queue item, including unattributed entries
    pub records_read: usize,
    pub records_accepted: usize,
}

/// Result of analysing one registry file
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<FileSummary, FileError>,
}

/// Everything a finished run produced
#[derive(Debug)]
pub struct AnalysisResult {
    pub aggregate: Aggregate,
    pub files: Vec<FileOutcome>,
    pub stats: ProcessingStats,
}

impl AnalysisResult {
    pub fn failures(&self) -> Vec<&FileError> {
        self.files
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err())
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        self.files.iter().any(|outcome| outcome.result.is_err())
    }
}
