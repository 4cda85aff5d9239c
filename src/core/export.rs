// PeakQC - core/export.rs
//
// Tab-separated export of the QC table.
// Core layer: writes to any Write trait object.

use crate::core::model::QcTable;
use crate::util::constants;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export the table as TSV.
///
/// Writes the `Sample` / `Called Peaks` header followed by one row per record
/// in table order. An empty table still gets its header. Fields containing a
/// tab, quote or line break are quoted. Returns the number of data rows.
pub fn export_tsv<W: Write>(
    table: &QcTable,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    let mut tsv_writer = csv::WriterBuilder::new()
        .delimiter(constants::TABLE_DELIMITER)
        .from_writer(writer);

    tsv_writer
        .write_record([constants::SAMPLE_COLUMN, constants::CALLED_PEAKS_COLUMN])
        .map_err(csv_err)?;

    let mut count = 0;
    for record in table.records() {
        tsv_writer
            .write_record([record.sample_id.as_str(), record.called_peaks.as_str()])
            .map_err(csv_err)?;
        count += 1;
    }

    tsv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}
