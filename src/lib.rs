// Core library for the regan Filebeat registry analyser

pub use config::RegistryConfig;
pub use error_handling::FileError;
pub use parallel::{AnalysisResult, OccurrenceMap, ParallelConfig, ParallelProcessor};
pub use report::{find_flagged_sources, FlaggedSource, Report};

pub mod cli;
pub mod colors;
pub mod config;
pub mod config_file;
pub mod decompression;
pub mod error_handling;
pub mod parallel;
pub mod platform;
pub mod readers;
pub mod record;
pub mod report;
pub mod stats;
pub mod tty;

/// Read every configured registry file and aggregate the records
///
/// Returns once all readers and the aggregator have finished, so the
/// occurrence map in the result is complete.
pub fn analyse(config: &RegistryConfig) -> anyhow::Result<AnalysisResult> {
    ParallelProcessor::new(ParallelConfig::from_config(config))
        .with_output(config.output.clone())
        .process_files(&config.input.files)
}
