use std::time::{Duration, Instant};

/// Statistics collected while ingesting registry files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub entries_decoded: usize,
    pub control_entries: usize,
    pub removal_markers: usize,
    pub unattributed: usize,
    pub records_accepted: usize,
    pub bytes_decoded: usize,
    pub processing_time: Duration,
}

/// Per-file tally produced by the file reader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSummary {
    pub entries_decoded: usize,
    pub control_entries: usize,
    pub removal_markers: usize,
    pub unattributed: usize,
    pub records_accepted: usize,
    pub bytes_decoded: usize,
    /// Input was gzip or zstd
    pub compressed: bool,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, summary: &FileSummary) {
        self.files_processed += 1;
        self.add_counts(summary);
    }

    /// A failed file still contributes whatever it decoded before failing
    pub fn add_failure(&mut self, partial: &FileSummary) {
        self.files_failed += 1;
        self.add_counts(partial);
    }

    fn add_counts(&mut self, summary: &FileSummary) {
        self.entries_decoded += summary.entries_decoded;
        self.control_entries += summary.control_entries;
        self.removal_markers += summary.removal_markers;
        self.unattributed += summary.unattributed;
        self.records_accepted += summary.records_accepted;
        self.bytes_decoded += summary.bytes_decoded;
    }

    /// Fold a worker's counters into the run total
    pub fn merge(&mut self, other: &ProcessingStats) {
        self.files_processed += other.files_processed;
        self.files_failed += other.files_failed;
        self.entries_decoded += other.entries_decoded;
        self.control_entries += other.control_entries;
        self.removal_markers += other.removal_markers;
        self.unattributed += other.unattributed;
        self.records_accepted += other.records_accepted;
        self.bytes_decoded += other.bytes_decoded;
    }

    pub fn finish(&mut self, started: Instant) {
        self.processing_time = started.elapsed();
    }

    pub fn format_stats(&self) -> String {
        let mut output = format!(
            "Entries decoded: {} total, {} records, {} control, {} removals, {} unattributed",
            self.entries_decoded,
            self.records_accepted,
            self.control_entries,
            self.removal_markers,
            self.unattributed
        );

        output.push_str(&format!(", {} files", self.files_processed));

        if self.files_failed > 0 {
            output.push_str(&format!(", {} failed", self.files_failed));
        }

        let processing_time_ms = self.processing_time.as_millis();
        output.push_str(&format!(" in {}ms", processing_time_ms));

        if processing_time_ms > 0 && self.entries_decoded > 0 {
            let entries_per_sec = (self.entries_decoded as f64 * 1000.0) / processing_time_ms as f64;
            output.push_str(&format!(" ({:.0} entries/s)", entries_per_sec));
        }

        output
    }
}
