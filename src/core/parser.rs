// PeakQC - core/parser.rs
//
// Extraction of the sample identifier and the called-peak value from a
// peak-calling log. Core layer: works on paths and strings, never touches the
// filesystem directly.

use crate::core::model::SampleRecord;
use crate::util::constants;
use crate::util::error::ParseError;
use std::path::Path;

/// Derive the sample identifier from a log file path.
///
/// Takes the base name and truncates it at the first '.', so
/// `runs/sampleA.rep1.log` becomes `sampleA`. A name without a '.' is used
/// whole; a name starting with '.' yields an empty identifier.
pub fn sample_id_from_path(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());

    match name.find(constants::SAMPLE_ID_TERMINATOR) {
        Some(idx) => name[..idx].to_string(),
        None => name.into_owned(),
    }
}

/// Whitespace as the upstream tools strip it: Unicode `White_Space` plus the
/// ASCII file/group/record/unit separators (U+001C..U+001F).
fn is_strippable(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

fn strip(text: &str) -> &str {
    text.trim_matches(is_strippable)
}

/// Extract the called-peak value from log content.
///
/// The content is stripped and split on ':'; the second segment, stripped, is
/// the value. Text after a second ':' is not part of the value.
pub fn extract_called_peaks(file: &Path, content: &str) -> Result<String, ParseError> {
    let stripped = strip(content);
    stripped
        .split(constants::VALUE_SEPARATOR)
        .nth(1)
        .map(|value| strip(value).to_string())
        .ok_or_else(|| ParseError::MissingSeparator {
            file: file.to_path_buf(),
            preview: preview(stripped),
        })
}

/// Build the table row for one log file.
pub fn parse_log(file: &Path, content: &str) -> Result<SampleRecord, ParseError> {
    let called_peaks = extract_called_peaks(file, content)?;
    let sample_id = sample_id_from_path(file);

    tracing::debug!(
        file = %file.display(),
        sample = %sample_id,
        called_peaks = %called_peaks,
        "Parsed peak-calling log"
    );

    Ok(SampleRecord {
        sample_id,
        called_peaks,
        source: file.to_path_buf(),
    })
}

/// First line of `text`, cut to a bounded number of characters.
fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or("");
    let mut out: String = line.chars().take(constants::ERROR_PREVIEW_CHARS).collect();
    if line.chars().count() > constants::ERROR_PREVIEW_CHARS || text.lines().nth(1).is_some() {
        out.push_str("...");
    }
    out
}
