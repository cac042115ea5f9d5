// ChatScribe - platform/config.rs
//
// Platform-specific directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::naming;
use crate::util::constants;
use std::path::{Path, PathBuf};

/// Resolved platform paths for ChatScribe data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/chatscribe/ or %APPDATA%\ChatScribe\)
    pub config_dir: PathBuf,

    /// Data directory holding the transcript store.
    pub data_dir: PathBuf,

    /// Default transcript directory (overridable via config or CLI).
    pub transcript_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();
            let transcript_dir = data_dir.join(constants::TRANSCRIPTS_DIR_NAME);

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                transcripts = %transcript_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
                transcript_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback.clone(),
                transcript_dir: fallback.join(constants::TRANSCRIPTS_DIR_NAME),
            }
        }
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility -- a newer
/// config file can be used with an older binary without crashing.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[history]` section.
    pub history: HistorySection,
    /// `[naming]` section.
    pub naming: NamingSection,
    /// `[stamp]` section.
    pub stamp: StampSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[history]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct HistorySection {
    /// Trailing lines recalled by default.
    pub lines: Option<u32>,
    /// Skip tail limiting and always recall the whole transcript.
    pub full_history: Option<bool>,
}

/// `[naming]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct NamingSection {
    /// Append a date suffix to transcript file names.
    pub file_date: Option<bool>,
    /// strftime suffix for local chat transcripts.
    pub local_chat_date_format: Option<String>,
    /// strftime suffix for instant message transcripts.
    pub im_date_format: Option<String>,
    /// Transcript directory override.
    pub transcript_dir: Option<String>,
}

/// `[stamp]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StampSection {
    /// Include the date in record timestamps.
    pub with_date: Option<bool>,
    /// Include seconds in record timestamps.
    pub with_seconds: Option<bool>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// All values are validated against named constants at load time. Invalid
/// values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // -- History --
    /// Trailing lines recalled by default.
    pub history_lines: u32,
    /// Skip tail limiting and always recall the whole transcript.
    pub full_history: bool,

    // -- Naming --
    /// Append a date suffix to transcript file names.
    pub file_date: bool,
    /// strftime suffix for local chat transcripts.
    pub local_chat_date_format: String,
    /// strftime suffix for instant message transcripts.
    pub im_date_format: String,
    /// Transcript directory override.
    pub transcript_dir: Option<PathBuf>,

    // -- Stamp --
    /// Include the date in record timestamps.
    pub stamp_with_date: bool,
    /// Include seconds in record timestamps.
    pub stamp_with_seconds: bool,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_lines: constants::DEFAULT_HISTORY_LINES,
            full_history: false,
            file_date: false,
            local_chat_date_format: constants::DEFAULT_LOCAL_CHAT_DATE_FORMAT.to_string(),
            im_date_format: constants::DEFAULT_IM_DATE_FORMAT.to_string(),
            transcript_dir: None,
            stamp_with_date: false,
            stamp_with_seconds: false,
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal
/// warnings. If the file does not exist, returns defaults with no warnings
/// (first-run). If the file is unparseable, returns defaults with an error
/// warning -- the application still starts but the user is informed.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    let mut warnings: Vec<String> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&config_path) {
        Ok(c) => c,
        Err(e) => {
            let msg = format!(
                "Could not read config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let msg = format!(
                "Failed to parse config file '{}': {e}. Using defaults.",
                config_path.display()
            );
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    // Validate each field against named constants, accumulating all warnings.
    let mut config = AppConfig::default();

    // -- History: lines --
    if let Some(lines) = raw.history.lines {
        if (constants::MIN_HISTORY_LINES..=constants::MAX_HISTORY_LINES).contains(&lines) {
            config.history_lines = lines;
        } else {
            warnings.push(format!(
                "[history] lines = {lines} is out of range ({}-{}). Using default ({}).",
                constants::MIN_HISTORY_LINES,
                constants::MAX_HISTORY_LINES,
                constants::DEFAULT_HISTORY_LINES,
            ));
        }
    }

    // -- History: full_history --
    if let Some(full) = raw.history.full_history {
        config.full_history = full;
    }

    // -- Naming: file_date --
    if let Some(dated) = raw.naming.file_date {
        config.file_date = dated;
    }

    // -- Naming: date formats --
    if let Some(ref format) = raw.naming.local_chat_date_format {
        match naming::validate_date_format(format) {
            Ok(()) => config.local_chat_date_format = format.clone(),
            Err(_) => warnings.push(format!(
                "[naming] local_chat_date_format = \"{format}\" is not a valid strftime \
                 string. Using default (\"{}\").",
                constants::DEFAULT_LOCAL_CHAT_DATE_FORMAT,
            )),
        }
    }
    if let Some(ref format) = raw.naming.im_date_format {
        match naming::validate_date_format(format) {
            Ok(()) => config.im_date_format = format.clone(),
            Err(_) => warnings.push(format!(
                "[naming] im_date_format = \"{format}\" is not a valid strftime string. \
                 Using default (\"{}\").",
                constants::DEFAULT_IM_DATE_FORMAT,
            )),
        }
    }

    // -- Naming: transcript_dir --
    if let Some(ref dir) = raw.naming.transcript_dir {
        if !dir.is_empty() {
            config.transcript_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Stamp --
    if let Some(with_date) = raw.stamp.with_date {
        config.stamp_with_date = with_date;
    }
    if let Some(with_seconds) = raw.stamp.with_seconds {
        config.stamp_with_seconds = with_seconds;
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.clone());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(count = warnings.len(), "Config validation produced warnings");
    }

    (config, warnings)
}
