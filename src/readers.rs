use crossbeam_channel::Sender;
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::OutputConfig;
use crate::decompression::RegistryInput;
use crate::error_handling::FileError;
use crate::parallel::Ingested;
use crate::record::{extract, Extraction, RegistryEntry};
use crate::stats::FileSummary;

/// Shared state a file reader needs besides the file itself
pub struct ReaderContext<'a> {
    pub records: &'a Sender<Ingested>,
    pub output: &'a OutputConfig,
    /// Set by another worker under --fail-fast; stops decoding early
    pub abort: &'a AtomicBool,
}

/// Stream one registry file onto the record queue
///
/// `summary` is updated as entries are decoded, so it still holds the
/// counts for everything forwarded before a failure.
pub fn read_registry(
    path: &Path,
    ctx: &ReaderContext<'_>,
    summary: &mut FileSummary,
) -> Result<(), FileError> {
    let input = RegistryInput::open(path)?;
    summary.compressed = input.is_compressed();
    read_entries(input, path, ctx, summary)
}

/// Decode a stream of JSON values one at a time, forwarding keyed entries
pub fn read_entries<R: Read>(
    reader: R,
    path: &Path,
    ctx: &ReaderContext<'_>,
    summary: &mut FileSummary,
) -> Result<(), FileError> {
    // A bare `null` is a valid value that carries no entry
    let mut stream =
        serde_json::Deserializer::from_reader(reader).into_iter::<Option<RegistryEntry>>();

    while let Some(next) = stream.next() {
        if ctx.abort.load(Ordering::Relaxed) {
            break;
        }

        let entry = next.map_err(|e| {
            FileError::from_stream(path.to_path_buf(), stream.byte_offset(), e)
        })?;
        summary.entries_decoded += 1;
        summary.bytes_decoded = stream.byte_offset();

        let extraction = match entry {
            Some(entry) => extract(entry),
            None => Extraction::NotARecord,
        };

        let item = match extraction {
            Extraction::NotARecord => {
                summary.control_entries += 1;
                continue;
            }
            Extraction::Removal => {
                summary.removal_markers += 1;
                continue;
            }
            Extraction::Unattributed { key } => {
                summary.unattributed += 1;
                if ctx.output.show_warnings() {
                    eprintln!(
                        "{}",
                        ctx.output.format_warning_message(&format!(
                            "found an incompatible record without a source file in {} at byte {}: key {}",
                            path.display(),
                            stream.byte_offset(),
                            key
                        ))
                    );
                }
                Ingested::Unattributed
            }
            Extraction::Accepted(record) => {
                summary.records_accepted += 1;
                Ingested::Record(record)
            }
        };

        // Blocks while the queue is full; fails only if the aggregator is gone
        if ctx.records.send(item).is_err() {
            break;
        }
    }

    Ok(())
}
