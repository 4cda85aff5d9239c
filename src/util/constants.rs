// PeakQC - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "PeakQC";

/// Application identifier used for the platform config directory.
pub const APP_ID: &str = "PeakQC";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// QC table layout
// =============================================================================

/// Header of the identifier column.
pub const SAMPLE_COLUMN: &str = "Sample";

/// Header of the value column.
pub const CALLED_PEAKS_COLUMN: &str = "Called Peaks";

/// Field delimiter of the output table.
pub const TABLE_DELIMITER: u8 = b'\t';

// =============================================================================
// Log conventions
// =============================================================================

/// Separates the label from the value inside a peak-calling log line.
pub const VALUE_SEPARATOR: char = ':';

/// The sample identifier is the file base name up to the first of these.
pub const SAMPLE_ID_TERMINATOR: char = '.';

/// Number of characters of offending content quoted in parse errors.
pub const ERROR_PREVIEW_CHARS: usize = 60;

// =============================================================================
// Input limits
// =============================================================================

/// Default maximum size of a single log file. The logs are one short line,
/// so anything near this size is the wrong file.
pub const DEFAULT_MAX_LOG_FILE_SIZE: u64 = 1024 * 1024; // 1 MB

/// Minimum user-configurable log file size cap.
pub const MIN_MAX_LOG_FILE_SIZE: u64 = 1;

/// Hard upper bound on the log file size cap.
pub const ABSOLUTE_MAX_LOG_FILE_SIZE: u64 = 64 * 1024 * 1024; // 64 MB

// =============================================================================
// Configuration & logging
// =============================================================================

/// Config file looked up in the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Log level used when neither RUST_LOG, --debug nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Accepted values for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
