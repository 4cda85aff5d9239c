// PeakQC - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every error names the file it concerns; all errors preserve the causal
// chain through `source()` for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all PeakQC operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum PeakQcError {
    /// A log file could not be read.
    Input(InputError),

    /// A log file was read but its content is malformed.
    Parse(ParseError),

    /// Building the QC table failed.
    Table(TableError),

    /// Writing the QC table failed.
    Export(ExportError),

    /// Configuration loading failed.
    Config(ConfigError),
}

impl fmt::Display for PeakQcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(e) => write!(f, "Input error: {e}"),
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Table(e) => write!(f, "Table error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for PeakQcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Table(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Input errors
// ---------------------------------------------------------------------------

/// Errors raised while reading a log file from disk.
#[derive(Debug)]
pub enum InputError {
    /// The log file does not exist.
    NotFound { path: PathBuf },

    /// The path exists but is a directory or other non-regular file.
    NotAFile { path: PathBuf },

    /// The log file exceeds the configured size cap.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// The log file is not valid UTF-8.
    InvalidEncoding {
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    /// Any other I/O failure (permissions, device errors).
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => {
                write!(f, "Log file '{}' does not exist", path.display())
            }
            Self::NotAFile { path } => {
                write!(f, "Log path '{}' is not a regular file", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Log file '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::InvalidEncoding { path, source } => {
                write!(f, "'{}': invalid UTF-8 encoding: {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "I/O error reading '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidEncoding { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<InputError> for PeakQcError {
    fn from(e: InputError) -> Self {
        Self::Input(e)
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Errors related to log content.
#[derive(Debug)]
pub enum ParseError {
    /// The stripped content has no `:` so there is no value to extract.
    MissingSeparator { file: PathBuf, preview: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator { file, preview } => write!(
                f,
                "'{}': expected '<label>:<value>', found '{preview}'",
                file.display()
            ),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for PeakQcError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Table errors
// ---------------------------------------------------------------------------

/// Errors related to assembling the QC table.
#[derive(Debug)]
pub enum TableError {
    /// Two log files map to the same sample identifier and duplicates are
    /// configured to be rejected.
    DuplicateSample {
        sample_id: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSample {
                sample_id,
                first,
                second,
            } => write!(
                f,
                "Sample '{sample_id}' is produced by both '{}' and '{}'",
                first.display(),
                second.display()
            ),
        }
    }
}

impl std::error::Error for TableError {}

impl From<TableError> for PeakQcError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to writing the QC table.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the output file.
    Io { path: PathBuf, source: io::Error },

    /// TSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "TSV export error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
        }
    }
}

impl From<ExportError> for PeakQcError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for PeakQcError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for PeakQC results.
pub type Result<T> = std::result::Result<T, PeakQcError>;
