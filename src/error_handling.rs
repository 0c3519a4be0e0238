use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a registry file could not be analysed
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not supported: {reason}", path.display())]
    Unsupported { path: PathBuf, reason: String },

    #[error("failed to read a record from {} at byte {offset}: {source}", path.display())]
    Read {
        path: PathBuf,
        offset: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode a record from {} at byte {offset}: {source}", path.display())]
    Decode {
        path: PathBuf,
        offset: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl FileError {
    /// Short label used in the failure summary
    pub fn kind(&self) -> &'static str {
        match self {
            FileError::Open { .. } => "open",
            FileError::Unsupported { .. } => "unsupported",
            FileError::Read { .. } => "read",
            FileError::Decode { .. } => "decode",
        }
    }

    /// Split a stream error into an I/O failure or a malformed value
    pub(crate) fn from_stream(path: PathBuf, offset: usize, source: serde_json::Error) -> Self {
        if source.is_io() {
            FileError::Read {
                path,
                offset,
                source,
            }
        } else {
            FileError::Decode {
                path,
                offset,
                source,
            }
        }
    }
}

/// Render the failure block printed after the analysis
pub fn format_failure_summary(failures: &[&FileError]) -> Option<String> {
    if failures.is_empty() {
        return None;
    }

    let mut lines = vec![format!(
        "Failed to analyse {} file(s):",
        failures.len()
    )];
    for failure in failures {
        lines.push(format!("\t[{}] {}", failure.kind(), failure));
    }
    Some(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_message() {
        let err = FileError::Open {
            path: PathBuf::from("/missing/registry.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(
            err.to_string(),
            "failed to open /missing/registry.json: No such file or directory"
        );
        assert_eq!(err.kind(), "open");
    }

    #[test]
    fn test_decode_error_carries_offset() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = FileError::from_stream(PathBuf::from("log.json"), 17, source);
        assert!(matches!(err, FileError::Decode { offset: 17, .. }));
        assert!(err
            .to_string()
            .starts_with("failed to decode a record from log.json at byte 17"));
    }

    #[test]
    fn test_failure_summary() {
        assert!(format_failure_summary(&[]).is_none());

        let err = FileError::Unsupported {
            path: PathBuf::from("a.zip"),
            reason: "zip archives".to_string(),
        };
        let summary = format_failure_summary(&[&err]).unwrap();
        assert_eq!(
            summary,
            "Failed to analyse 1 file(s):\n\t[unsupported] a.zip is not supported: zip archives"
        );
    }
}
