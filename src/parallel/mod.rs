//! Parallel ingestion for regan
//!
//! Registry files are read by a bounded pool of worker threads that feed a
//! single aggregator over a bounded channel.
//!
//! # Module Structure
//!
//! - `types`: Queue items, per-file outcomes and configuration
//! - `worker`: Worker thread pulling file names from the work queue
//! - `aggregator`: The single consumer building the occurrence map
//! - `processor`: Main ParallelProcessor orchestration

mod aggregator;
mod processor;
mod types;
mod worker;

pub use aggregator::aggregator_thread;
pub use processor::ParallelProcessor;
pub use types::{Aggregate, AnalysisResult, FileOutcome, Ingested, OccurrenceMap, ParallelConfig};
pub use worker::{worker_thread, WorkerReport};
