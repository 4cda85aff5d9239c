// PeakQC - app/aggregate.rs
//
// The aggregation run: read every peak-calling log in order, build the QC
// table, then write it out.
//
// Failure model:
//   - Any unreadable or malformed log aborts the whole run.
//   - The table is fully built and rendered in memory before the output path
//     is touched, so a failed run leaves no output file behind.
//   - Files are processed strictly one at a time; each is read and closed
//     before the next is opened.

use crate::core::export;
use crate::core::model::{DuplicatePolicy, QcTable};
use crate::core::parser;
use crate::platform::config::AppConfig;
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::Result;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Settings for one aggregation run.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Largest log file accepted, in bytes.
    pub max_log_file_size: u64,
    /// Handling of repeated sample identifiers.
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            max_log_file_size: constants::DEFAULT_MAX_LOG_FILE_SIZE,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl From<&AppConfig> for AggregateOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_log_file_size: config.max_log_file_size,
            duplicate_policy: config.duplicate_policy,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateSummary {
    /// Number of log files read.
    pub inputs: usize,
    /// Number of data rows written.
    pub rows: usize,
    /// Inputs whose sample identifier was already in the table.
    pub duplicates: usize,
    /// Where the table was written.
    pub output: PathBuf,
}

/// Read every log in `inputs` and assemble the QC table in input order.
///
/// Returns the table and the number of duplicate identifiers that were
/// overwritten.
pub fn build_table(inputs: &[PathBuf], options: &AggregateOptions) -> Result<(QcTable, usize)> {
    let mut table = QcTable::with_capacity(inputs.len());
    let mut duplicates = 0;

    for path in inputs {
        let content = fs::read_log_file(path, options.max_log_file_size)?;
        let record = parser::parse_log(path, &content)?;

        if let Some(previous) = table.insert(record, options.duplicate_policy)? {
            duplicates += 1;
            tracing::warn!(
                sample = %previous.sample_id,
                replaced = %previous.source.display(),
                by = %path.display(),
                "Duplicate sample identifier; keeping the later value"
            );
        }
    }

    Ok((table, duplicates))
}

/// Render `table` as TSV into memory.
pub fn render_table(table: &QcTable, output: &Path) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    export::export_tsv(table, &mut buf, output)?;
    Ok(buf)
}

/// Run the full aggregation: build, render, then write `output` once.
pub fn run(
    inputs: &[PathBuf],
    output: &Path,
    options: &AggregateOptions,
) -> Result<AggregateSummary> {
    let started = Instant::now();
    tracing::info!(
        inputs = inputs.len(),
        output = %output.display(),
        duplicates = options.duplicate_policy.label(),
        "Aggregating peak-calling logs"
    );

    let (table, duplicates) = build_table(inputs, options)?;
    if table.is_empty() {
        tracing::warn!("No log files given; writing header-only table");
    }

    let rendered = render_table(&table, output)?;
    fs::write_output(output, &rendered)?;

    tracing::info!(
        rows = table.len(),
        duplicates,
        output = %output.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "QC table written"
    );

    Ok(AggregateSummary {
        inputs: inputs.len(),
        rows: table.len(),
        duplicates,
        output: output.to_path_buf(),
    })
}
