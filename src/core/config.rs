//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.sermon/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::scrollback;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SermonConfig {
    #[serde(default)]
    pub serial: SerialSection,
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SerialSection {
    pub baud: Option<u32>,
    pub data_bits: Option<u8>,
    pub stop_bits: Option<u8>,
    pub read_timeout_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplaySection {
    pub scrollback_lines: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BAUD: u32 = 9600;
pub const DEFAULT_DATA_BITS: u8 = 8;
pub const DEFAULT_STOP_BITS: u8 = 1;
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 100;
pub const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_FILE_NAME: &str = "sermon.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

/// Everything needed to open the port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialSettings {
    pub device: String,
    pub baud: u32,
    pub data_bits: u8,
    pub stop_bits: u8,
    pub read_timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub serial: SerialSettings,
    pub scrollback_lines: usize,
    pub log_level: String,
    pub log_file: PathBuf,
}

/// Flag values from the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub baud: Option<u32>,
    pub data_bits: Option<u8>,
    pub stop_bits: Option<u8>,
    pub scrollback_lines: Option<usize>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns `~/.sermon`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".sermon"))
}

/// Returns the path to `~/.sermon/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.sermon/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SermonConfig::default()`.
pub fn load_config() -> Result<SermonConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(SermonConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<SermonConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(SermonConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SermonConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Sermon Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [serial]
# baud = 9600                # Or set SERMON_BAUD
# data_bits = 8              # 5, 6, 7 or 8
# stop_bits = 1              # 1 or 2
# read_timeout_ms = 100

# [display]
# scrollback_lines = 10000

# [logging]
# level = "info"             # Or set SERMON_LOG
# file = "/tmp/sermon.log"   # Defaults to ~/.sermon/sermon.log
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Collapse defaults → config file → env vars → CLI into concrete values.
pub fn resolve(
    config: &SermonConfig,
    device: String,
    cli: &CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    // Baud: CLI → env → config → default
    let baud = match cli.baud {
        Some(baud) => baud,
        None => match std::env::var("SERMON_BAUD") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("SERMON_BAUD={raw} is not a number")))?,
            Err(_) => config.serial.baud.unwrap_or(DEFAULT_BAUD),
        },
    };
    if baud == 0 {
        return Err(ConfigError::Invalid("baud rate must be positive".to_string()));
    }

    let data_bits = cli
        .data_bits
        .or(config.serial.data_bits)
        .unwrap_or(DEFAULT_DATA_BITS);
    if !(5..=8).contains(&data_bits) {
        return Err(ConfigError::Invalid(format!(
            "data bits must be 5-8, got {data_bits}"
        )));
    }

    let stop_bits = cli
        .stop_bits
        .or(config.serial.stop_bits)
        .unwrap_or(DEFAULT_STOP_BITS);
    if !matches!(stop_bits, 1 | 2) {
        return Err(ConfigError::Invalid(format!(
            "stop bits must be 1 or 2, got {stop_bits}"
        )));
    }

    // Log level: env → config → default
    let log_level = std::env::var("SERMON_LOG")
        .ok()
        .or_else(|| config.logging.level.clone())
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

    let log_file = config
        .logging
        .file
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| config_dir().map(|d| d.join(LOG_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME));

    Ok(ResolvedConfig {
        serial: SerialSettings {
            device,
            baud,
            data_bits,
            stop_bits,
            read_timeout_ms: config
                .serial
                .read_timeout_ms
                .unwrap_or(DEFAULT_READ_TIMEOUT_MS),
        },
        scrollback_lines: cli
            .scrollback_lines
            .or(config.display.scrollback_lines)
            .unwrap_or(scrollback::DEFAULT_CAPACITY),
        log_level,
        log_file,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = SermonConfig::default();
        assert!(config.serial.baud.is_none());
        assert!(config.display.scrollback_lines.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = SermonConfig::default();
        let resolved = resolve(&config, "/dev/ttyUSB0".to_string(), &CliOverrides::default())
            .unwrap();
        assert_eq!(resolved.serial.device, "/dev/ttyUSB0");
        assert_eq!(resolved.serial.data_bits, DEFAULT_DATA_BITS);
        assert_eq!(resolved.serial.stop_bits, DEFAULT_STOP_BITS);
        assert_eq!(resolved.serial.read_timeout_ms, DEFAULT_READ_TIMEOUT_MS);
        assert_eq!(resolved.scrollback_lines, scrollback::DEFAULT_CAPACITY);
    }

    #[test]
    fn test_cli_wins_over_config() {
        let config = SermonConfig {
            serial: SerialSection {
                baud: Some(57600),
                data_bits: Some(7),
                ..Default::default()
            },
            display: DisplaySection {
                scrollback_lines: Some(500),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            baud: Some(115200),
            scrollback_lines: Some(42),
            ..Default::default()
        };
        let resolved = resolve(&config, "COM3".to_string(), &cli).unwrap();
        assert_eq!(resolved.serial.baud, 115200);
        assert_eq!(resolved.serial.data_bits, 7);
        assert_eq!(resolved.scrollback_lines, 42);
    }

    #[test]
    fn test_invalid_serial_framing_is_rejected() {
        let config = SermonConfig::default();
        let bad_data = CliOverrides {
            data_bits: Some(9),
            ..Default::default()
        };
        assert!(matches!(
            resolve(&config, "x".to_string(), &bad_data),
            Err(ConfigError::Invalid(_))
        ));

        let bad_stop = CliOverrides {
            stop_bits: Some(3),
            ..Default::default()
        };
        assert!(matches!(
            resolve(&config, "x".to_string(), &bad_stop),
            Err(ConfigError::Invalid(_))
        ));

        let zero_baud = CliOverrides {
            baud: Some(0),
            ..Default::default()
        };
        assert!(resolve(&config, "x".to_string(), &zero_baud).is_err());
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[serial]
baud = 115200
"#;
        let config: SermonConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.serial.baud, Some(115200));
        assert!(config.serial.stop_bits.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[serial]
baud = 19200
data_bits = 7
stop_bits = 2
read_timeout_ms = 50

[display]
scrollback_lines = 2000

[logging]
level = "debug"
file = "/tmp/sermon-test.log"
"#;
        let config: SermonConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.serial.data_bits, Some(7));
        assert_eq!(config.serial.read_timeout_ms, Some(50));
        assert_eq!(config.display.scrollback_lines, Some(2000));
        assert_eq!(config.logging.file.as_deref(), Some("/tmp/sermon-test.log"));

        let resolved = resolve(&config, "x".to_string(), &CliOverrides::default()).unwrap();
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/sermon-test.log"));
        assert_eq!(resolved.serial.stop_bits, 2);
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.serial.baud.is_none());
        assert!(path.exists());

        // The generated file is all comments, so it loads back as defaults
        let reloaded = load_config_from(&path).unwrap();
        assert!(reloaded.serial.baud.is_none());
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[serial\nbaud = ").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
