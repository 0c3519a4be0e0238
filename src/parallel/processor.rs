//! Main parallel processor
//!
//! Contains the ParallelProcessor struct that wires the worker pool to the
//! aggregator and decides when the results are safe to read.

use anyhow::{anyhow, Result};
use crossbeam_channel::bounded;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::config::OutputConfig;
use crate::stats::ProcessingStats;

use super::aggregator::aggregator_thread;
use super::types::{AnalysisResult, FileOutcome, Ingested, ParallelConfig};
use super::worker::worker_thread;

/// Main parallel processor
pub struct ParallelProcessor {
    config: ParallelConfig,
    output: OutputConfig,
}

impl ParallelProcessor {
    pub fn new(config: ParallelConfig) -> Self {
        Self {
            config,
            output: OutputConfig::default(),
        }
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Analyse the given registry files
    ///
    /// Returns once every worker has exited and the aggregator has drained the
    /// record queue. Under fail-fast the first file error is returned instead.
    pub fn process_files(&self, files: &[String]) -> Result<AnalysisResult> {
        let started = Instant::now();
        let num_workers = self.config.num_workers.clamp(1, files.len().max(1));

        // Pre-filled work queue; the sender is dropped so recv() ends when it is empty
        let (file_sender, file_receiver) = bounded::<PathBuf>(files.len().max(1));
        for file in files {
            file_sender
                .send(PathBuf::from(file))
                .map_err(|_| anyhow!("work queue closed before dispatch"))?;
        }
        drop(file_sender);

        let (record_sender, record_receiver) = bounded::<Ingested>(self.config.buffer_size.max(1));

        let aggregator_handle = thread::spawn(move || aggregator_thread(record_receiver));

        let abort = Arc::new(AtomicBool::new(false));
        let mut worker_handles = Vec::with_capacity(num_workers);
        for worker_id in 0..num_workers {
            let file_receiver = file_receiver.clone();
            let record_sender = record_sender.clone();
            let output = self.output.clone();
            let abort = abort.clone();
            let fail_fast = self.config.fail_fast;

            let handle = thread::spawn(move || {
                worker_thread(
                    worker_id,
                    file_receiver,
                    record_sender,
                    output,
                    abort,
                    fail_fast,
                )
            });
            worker_handles.push(handle);
        }

        // Drop our sender so the queue closes once the last worker exits
        drop(record_sender);

        let mut outcomes: Vec<FileOutcome> = Vec::with_capacity(files.len());
        let mut stats = ProcessingStats::new();
        let mut worker_panicked = false;
        for (idx, handle) in worker_handles.into_iter().enumerate() {
            match handle.join() {
                Ok(report) => {
                    stats.merge(&report.stats);
                    outcomes.extend(report.outcomes);
                }
                Err(e) => {
                    worker_panicked = true;
                    eprintln!(
                        "{}",
                        self.output
                            .format_error_message(&format!("Worker thread {} panicked: {:?}", idx, e))
                    );
                }
            }
        }

        // Workers being done is not enough: the aggregator may still be draining
        let aggregate = aggregator_handle
            .join()
            .map_err(|e| anyhow!("Aggregator thread panicked: {:?}", e))?;

        if worker_panicked {
            return Err(anyhow!("a worker thread panicked, results are incomplete"));
        }

        stats.finish(started);

        // Report files in the order they were given
        outcomes.sort_by_key(|outcome| {
            files
                .iter()
                .position(|f| PathBuf::from(f) == outcome.path)
                .unwrap_or(usize::MAX)
        });

        if self.config.fail_fast {
            if let Some(position) = outcomes.iter().position(|o| o.result.is_err()) {
                if let Err(err) = outcomes.swap_remove(position).result {
                    return Err(anyhow::Error::new(err));
                }
            }
        }

        Ok(AnalysisResult {
            aggregate,
            files: outcomes,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::FileError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn registry(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn processor(num_workers: usize, buffer_size: usize, fail_fast: bool) -> ParallelProcessor {
        ParallelProcessor::new(ParallelConfig {
            num_workers,
            buffer_size,
            fail_fast,
        })
        .with_output(OutputConfig {
            quiet_level: 2,
            no_emoji: true,
            ..Default::default()
        })
    }

    fn path_of(file: &NamedTempFile) -> String {
        file.path().to_string_lossy().to_string()
    }

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert!(config.num_workers > 0);
        assert!(config.buffer_size > 0);
        assert!(!config.fail_fast);
    }

    #[test]
    fn test_same_key_in_two_files_is_not_duplicated() {
        let a = registry(r#"{"k":"c","v":{"meta":{"source":"/y"}}}"#);
        let b = registry(r#"{"k":"c","v":{"meta":{"source":"/y"}}}"#);

        let result = processor(2, 16, false)
            .process_files(&[path_of(&a), path_of(&b)])
            .unwrap();

        assert_eq!(result.aggregate.records_read, 2);
        assert_eq!(result.aggregate.occurrences["/y"].len(), 1);
        assert!(!result.has_failures());
        assert_eq!(result.stats.files_processed, 2);
    }

    #[test]
    fn test_tiny_buffer_drains_everything() {
        let mut content = String::new();
        for i in 0..2000 {
            content.push_str(&format!(
                "{{\"k\":\"key-{}\",\"v\":{{\"source\":\"/var/log/{}.log\"}}}}\n",
                i % 3,
                i % 500
            ));
        }
        let files: Vec<NamedTempFile> = (0..4).map(|_| registry(&content)).collect();
        let paths: Vec<String> = files.iter().map(path_of).collect();

        let result = processor(4, 1, false).process_files(&paths).unwrap();

        assert_eq!(result.aggregate.records_read, 8000);
        assert_eq!(result.aggregate.records_accepted, 8000);
        assert_eq!(result.aggregate.unique_sources(), 500);
    }

    #[test]
    fn test_failed_file_does_not_stop_others() {
        let good = registry(r#"{"k":"a","v":{"source":"/x"}} {"k":"b","v":{"source":"/x"}}"#);
        let bad = registry("{\"k\":\"a\",\"v\":{\"source\":\"/z\"}}\nnot json\n");
        let paths = vec![
            "/no/such/registry.json".to_string(),
            path_of(&good),
            path_of(&bad),
        ];

        let result = processor(3, 8, false).process_files(&paths).unwrap();

        assert_eq!(result.files.len(), 3);
        assert!(matches!(
            result.files[0].result,
            Err(FileError::Open { .. })
        ));
        assert!(result.files[1].result.is_ok());
        assert!(matches!(
            result.files[2].result,
            Err(FileError::Decode { .. })
        ));
        assert_eq!(result.failures().len(), 2);
        assert_eq!(result.aggregate.occurrences["/x"].len(), 2);
        // Records before the malformed value still count
        assert!(result.aggregate.occurrences.contains_key("/z"));
    }

    #[test]
    fn test_stats_agree_with_aggregate_when_a_file_fails_midway() {
        let broken = registry(
            "{\"k\":\"a\",\"v\":{\"source\":\"/x\"}}\n{\"k\":\"b\",\"v\":{\"source\":\"/x\"}}\nnot json\n",
        );

        let result = processor(1, 8, false)
            .process_files(&[path_of(&broken)])
            .unwrap();

        assert!(matches!(result.files[0].result, Err(FileError::Decode { .. })));
        assert_eq!(result.aggregate.records_accepted, 2);
        assert_eq!(result.stats.records_accepted, result.aggregate.records_accepted);
        assert_eq!(result.stats.entries_decoded, 2);
        assert_eq!(result.stats.files_processed, 0);
        assert_eq!(result.stats.files_failed, 1);
    }

    #[test]
    fn test_fail_fast_returns_the_file_error() {
        let good = registry(r#"{"k":"a","v":{"source":"/x"}}"#);
        let paths = vec![path_of(&good), "/no/such/registry.json".to_string()];

        let err = processor(1, 8, true).process_files(&paths).unwrap_err();
        let file_error = err.downcast_ref::<FileError>().unwrap();
        assert!(matches!(file_error, FileError::Open { .. }));
    }

    #[test]
    fn test_more_workers_than_files() {
        let a = registry(r#"{"k":"a","v":{"source":"/x"}}"#);
        let result = processor(16, 8, false).process_files(&[path_of(&a)]).unwrap();
        assert_eq!(result.aggregate.records_accepted, 1);
    }
}
