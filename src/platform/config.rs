// PeakQC - platform/config.rs
//
// Config directory resolution and config.toml loading with startup
// validation. Values are checked against the named limits in
// `util::constants`; a bad value is reported and replaced by its default
// rather than aborting the run.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::DuplicatePolicy;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for PeakQC configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/peakqc/ or %APPDATA%\PeakQC\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Returns `None` if the platform directories cannot be determined
    /// (e.g. no home directory).
    pub fn resolve() -> Option<Self> {
        ProjectDirs::from("", "", constants::APP_ID).map(|proj_dirs| Self {
            config_dir: proj_dirs.config_dir().to_path_buf(),
        })
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[input]` section.
    pub input: InputSection,
    /// `[table]` section.
    pub table: TableSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[input]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct InputSection {
    /// Largest log file accepted, in bytes.
    pub max_file_size_bytes: Option<u64>,
}

/// `[table]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct TableSection {
    /// "overwrite" or "reject".
    pub duplicate_ids: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Largest log file accepted, in bytes.
    pub max_log_file_size: u64,
    /// Handling of repeated sample identifiers.
    pub duplicate_policy: DuplicatePolicy,
    /// Logging level string (read before tracing is initialised).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_log_file_size: constants::DEFAULT_MAX_LOG_FILE_SIZE,
            duplicate_policy: DuplicatePolicy::default(),
            log_level: None,
        }
    }
}

/// Outcome of config loading.
///
/// Loading happens before tracing is initialised (the config carries the log
/// level), so everything worth reporting is returned here and logged by the
/// caller once the subscriber is installed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadedConfig {
    /// Validated settings.
    pub config: AppConfig,
    /// File the settings were read from; `None` means built-in defaults.
    pub path: Option<PathBuf>,
    /// Non-fatal problems found while loading or validating.
    pub warnings: Vec<String>,
}

/// Load `config.toml` from the platform config directory.
///
/// A missing file means defaults with no warnings. A file that cannot be read
/// or parsed also yields defaults, with a warning explaining why.
pub fn load_config(config_dir: &Path) -> LoadedConfig {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        return LoadedConfig::default();
    }

    match load_config_file(&config_path) {
        Ok(loaded) => loaded,
        Err(e) => LoadedConfig {
            warnings: vec![format!("{e}. Using defaults.")],
            ..Default::default()
        },
    }
}

/// Load a config file the user named explicitly.
///
/// Unlike [`load_config`], a missing or unparseable file is an error.
/// Out-of-range values are still only warnings.
pub fn load_config_file(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let raw: RawConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    let (config, warnings) = validate(raw);
    Ok(LoadedConfig {
        config,
        path: Some(path.to_path_buf()),
        warnings,
    })
}

/// Check each raw value against its allowed range, accumulating warnings.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Input: max_file_size_bytes --
    if let Some(size) = raw.input.max_file_size_bytes {
        if (constants::MIN_MAX_LOG_FILE_SIZE..=constants::ABSOLUTE_MAX_LOG_FILE_SIZE)
            .contains(&size)
        {
            config.max_log_file_size = size;
        } else {
            let err = ConfigError::ValueOutOfRange {
                field: "[input] max_file_size_bytes".to_string(),
                value: size.to_string(),
                expected: format!(
                    "{}-{}",
                    constants::MIN_MAX_LOG_FILE_SIZE,
                    constants::ABSOLUTE_MAX_LOG_FILE_SIZE
                ),
            };
            warnings.push(format!(
                "{err}. Using default ({}).",
                constants::DEFAULT_MAX_LOG_FILE_SIZE
            ));
        }
    }

    // -- Table: duplicate_ids --
    if let Some(ref policy) = raw.table.duplicate_ids {
        match DuplicatePolicy::from_str_loose(policy) {
            Some(p) => config.duplicate_policy = p,
            None => warnings.push(format!(
                "[table] duplicate_ids = \"{policy}\" is not recognised. \
                 Expected \"overwrite\" or \"reject\". Using default ({}).",
                DuplicatePolicy::default().label()
            )),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: {}. Using default ({}).",
                constants::VALID_LOG_LEVELS.join(", "),
                constants::DEFAULT_LOG_LEVEL
            ));
        }
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn parse(toml_text: &str) -> (AppConfig, Vec<String>) {
        validate(toml::from_str(toml_text).unwrap())
    }

    #[test]
    fn test_empty_config_is_default() {
        let (config, warnings) = parse("");
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_all_sections_applied() {
        let (config, warnings) = parse(
            r#"
            [input]
            max_file_size_bytes = 4096

            [table]
            duplicate_ids = "Reject"

            [logging]
            level = "DEBUG"
            "#,
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.max_log_file_size, 4096);
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let (config, warnings) = parse("[future]\nflag = true\n[input]\nother = 1\n");
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_out_of_range_values_fall_back_with_warnings() {
        let (config, warnings) = parse(
            r#"
            [input]
            max_file_size_bytes = 0

            [table]
            duplicate_ids = "merge"

            [logging]
            level = "loud"
            "#,
        );
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 3, "{warnings:?}");
        assert!(warnings[0].contains("max_file_size_bytes"));
        assert!(warnings[1].contains("merge"));
        assert!(warnings[2].contains("loud"));
    }

    #[test]
    fn test_missing_default_config_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(dir.path());
        assert_eq!(loaded, LoadedConfig::default());
        assert!(loaded.path.is_none());
    }

    #[test]
    fn test_default_config_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(constants::CONFIG_FILE_NAME);
        fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        let loaded = load_config(dir.path());
        assert_eq!(loaded.path, Some(path));
        assert_eq!(loaded.config.log_level.as_deref(), Some("warn"));
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_broken_default_config_warns() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(constants::CONFIG_FILE_NAME), "[input\n").unwrap();
        let loaded = load_config(dir.path());
        assert_eq!(loaded.config, AppConfig::default());
        assert!(loaded.path.is_none());
        assert_eq!(loaded.warnings.len(), 1);
    }

    #[test]
    fn test_explicit_config_errors_are_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = load_config_file(&dir.path().join("absent.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "max_file_size_bytes = ").unwrap();
        assert!(matches!(
            load_config_file(&broken),
            Err(ConfigError::TomlParse { .. })
        ));
    }

    #[test]
    fn test_explicit_config_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("peakqc.toml");
        fs::write(&path, "[table]\nduplicate_ids = \"reject\"\n").unwrap();
        let loaded = load_config_file(&path).unwrap();
        assert_eq!(loaded.config.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(loaded.path, Some(path));
        assert!(loaded.warnings.is_empty());
    }
}
