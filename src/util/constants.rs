// ChatScribe - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "ChatScribe";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "ChatScribe";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// History recall limits
// =============================================================================

/// Scan window capacity in bytes for the backward tail scan.
///
/// Each iteration of the locate loop reads at most this many bytes, so the
/// memory cost of recalling a small tail from a multi-gigabyte transcript
/// stays constant.
pub const RECALL_WINDOW_BYTES: usize = 2_048;

/// Default number of trailing lines recalled from a transcript.
pub const DEFAULT_HISTORY_LINES: u32 = 100;

/// Minimum user-configurable history line count (0 would mean "no history"
/// and is expressed by the `full_history`/CLI surface instead).
pub const MIN_HISTORY_LINES: u32 = 1;

/// Maximum user-configurable history line count.
pub const MAX_HISTORY_LINES: u32 = 100_000;

// =============================================================================
// Transcript naming
// =============================================================================

/// File extension for transcript files.
pub const TRANSCRIPT_EXTENSION: &str = "txt";

/// Default strftime suffix appended to local chat transcripts when
/// `[naming] file_date` is enabled. One file per day.
pub const DEFAULT_LOCAL_CHAT_DATE_FORMAT: &str = "-%Y-%m-%d";

/// Default strftime suffix appended to instant message transcripts when
/// `[naming] file_date` is enabled. One file per month.
pub const DEFAULT_IM_DATE_FORMAT: &str = "-%Y-%m";

/// Characters that are replaced with `_` in transcript names. Cannot match
/// glob or illegal filename characters.
pub const INVALID_NAME_CHARS: &str = "\"'\\/?*:<>|[]{}~";

/// Subdirectory of the platform data dir holding transcript files.
pub const TRANSCRIPTS_DIR_NAME: &str = "transcripts";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
