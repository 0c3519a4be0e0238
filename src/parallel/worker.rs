//! Worker thread implementation
//!
//! Each worker pulls file names from the shared work queue and streams the
//! file onto the record queue, until the work queue is exhausted.

use crossbeam_channel::{Receiver, Sender};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::OutputConfig;
use crate::readers::{read_registry, ReaderContext};
use crate::stats::{FileSummary, ProcessingStats};

use super::types::{FileOutcome, Ingested};

/// What a worker hands back when it exits
#[derive(Debug, Default)]
pub struct WorkerReport {
    pub outcomes: Vec<FileOutcome>,
    pub stats: ProcessingStats,
}

pub fn worker_thread(
    worker_id: usize,
    filenames: Receiver<PathBuf>,
    records: Sender<Ingested>,
    output: OutputConfig,
    abort: Arc<AtomicBool>,
    fail_fast: bool,
) -> WorkerReport {
    let mut report = WorkerReport::default();
    let ctx = ReaderContext {
        records: &records,
        output: &output,
        abort: &abort,
    };

    while let Ok(path) = filenames.recv() {
        if abort.load(Ordering::Relaxed) {
            break;
        }

        if output.show_progress() {
            eprintln!(
                "{}",
                output.format_info_message(&format!("Reading from {}...", path.display()))
            );
        }

        let mut summary = FileSummary::default();
        let result = match read_registry(&path, &ctx, &mut summary) {
            Ok(()) => {
                report.stats.add_file(&summary);
                if output.show_progress() {
                    let note = if summary.compressed { " (decompressed)" } else { "" };
                    eprintln!(
                        "{}",
                        output.format_info_message(&format!(
                            "Reading from {} finished{}.",
                            path.display(),
                            note
                        ))
                    );
                }
                Ok(summary)
            }
            Err(err) => {
                report.stats.add_failure(&summary);
                if fail_fast {
                    abort.store(true, Ordering::Relaxed);
                } else if output.show_warnings() {
                    eprintln!(
                        "{}",
                        output.format_error_message(&format!(
                            "worker {}: {}, continuing with other files",
                            worker_id, err
                        ))
                    );
                }
                Err(err)
            }
        };

        report.outcomes.push(FileOutcome { path, result });
    }

    report
}
