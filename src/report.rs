//! Report generation for registry analysis
//!
//! Turns the finished occurrence map into the human-readable summary and the
//! list of sources tracked under more than one key.

use std::io::Write;

use anyhow::Result;

use crate::colors::ColorScheme;
use crate::config::OutputConfig;
use crate::error_handling::format_failure_summary;
use crate::parallel::{AnalysisResult, OccurrenceMap};

/// A source file tracked under more than one registry key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlaggedSource {
    pub source: String,
    /// Sorted so that output is stable
    pub keys: Vec<String>,
}

/// Read-only view over a finished run
#[derive(Debug, Clone)]
pub struct Report {
    pub records_read: usize,
    pub files_given: usize,
    pub unique_sources: usize,
    pub flagged: Vec<FlaggedSource>,
}

impl Report {
    pub fn from_result(result: &AnalysisResult, files_given: usize) -> Self {
        Self {
            records_read: result.aggregate.records_read,
            files_given,
            unique_sources: result.aggregate.unique_sources(),
            flagged: find_flagged_sources(&result.aggregate.occurrences),
        }
    }

    pub fn facts_reported(&self) -> usize {
        self.flagged.len()
    }
}

/// Every source whose key set has more than one member, sorted by path
pub fn find_flagged_sources(occurrences: &OccurrenceMap) -> Vec<FlaggedSource> {
    let mut flagged: Vec<FlaggedSource> = occurrences
        .iter()
        .filter(|(_, keys)| keys.len() > 1)
        .map(|(source, keys)| {
            let mut keys: Vec<String> = keys.iter().cloned().collect();
            keys.sort();
            FlaggedSource {
                source: source.clone(),
                keys,
            }
        })
        .collect();
    flagged.sort_by(|a, b| a.source.cmp(&b.source));
    flagged
}

/// Write the report as log lines
pub fn write_report<W: Write>(
    out: &mut W,
    report: &Report,
    result: &AnalysisResult,
    output: &OutputConfig,
) -> Result<()> {
    let colors = ColorScheme::new(output.use_colors());

    writeln!(
        out,
        "{}",
        output.format_info_message(&format!(
            "Found {} records in {} files",
            report.records_read, report.files_given
        ))
    )?;
    writeln!(
        out,
        "{}",
        output.format_info_message(&format!(
            "Found {} unique files in the registry",
            report.unique_sources
        ))
    )?;
    writeln!(out, "{}", output.format_info_message("Analysing..."))?;

    for flagged in &report.flagged {
        let keys: Vec<String> = flagged
            .keys
            .iter()
            .map(|key| format!("{}{}{}", colors.key, key, colors.reset))
            .collect();
        writeln!(
            out,
            "{}",
            output.format_warning_message(&format!(
                "File {}{}{} has multiple keys in the registry:\n\t{}",
                colors.source,
                flagged.source,
                colors.reset,
                keys.join("\n\t")
            ))
        )?;
    }

    writeln!(
        out,
        "{}",
        output.format_info_message(&format!(
            "Analysis is complete, {} fact(s) reported",
            report.facts_reported()
        ))
    )?;

    if let Some(summary) = format_failure_summary(&result.failures()) {
        writeln!(
            out,
            "{}",
            output.format_error_message(&format!(
                "{}{}{}",
                colors.failure, summary, colors.reset
            ))
        )?;
    }

    if output.stats {
        writeln!(
            out,
            "{}",
            output.format_info_message(&result.stats.format_stats())
        )?;
    }

    Ok(())
}
