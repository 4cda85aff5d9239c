// PeakQC - platform/fs.rs
//
// Filesystem access for log inputs and the table output.
// Every read is bounded by a size cap checked against metadata first.

use crate::util::error::{ExportError, InputError};
use std::io;
use std::path::Path;

/// Read a peak-calling log as UTF-8 text.
///
/// The file is stat'ed before it is opened so oversized inputs are rejected
/// without reading them. Invalid UTF-8 is an error, not replaced.
pub fn read_log_file(path: &Path, max_size: u64) -> Result<String, InputError> {
    let metadata = std::fs::metadata(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => InputError::NotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    if !metadata.is_file() {
        return Err(InputError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    if metadata.len() > max_size {
        return Err(InputError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| InputError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    String::from_utf8(bytes).map_err(|e| InputError::InvalidEncoding {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write the rendered table to `path` in a single call.
pub fn write_output(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, contents).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
