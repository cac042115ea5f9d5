// ChatScribe - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all ChatScribe operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum ChatScribeError {
    /// Transcript name resolution or validation failed.
    Naming(NamingError),

    /// History recall (locate or forward read) failed.
    Recall(RecallError),

    /// Appending a record to a transcript failed.
    Record(RecordError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for ChatScribeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Naming(e) => write!(f, "Naming error: {e}"),
            Self::Recall(e) => write!(f, "Recall error: {e}"),
            Self::Record(e) => write!(f, "Record error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ChatScribeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Naming(e) => Some(e),
            Self::Recall(e) => Some(e),
            Self::Record(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Naming errors
// ---------------------------------------------------------------------------

/// Errors related to transcript file naming.
#[derive(Debug)]
pub enum NamingError {
    /// The transcript name is empty after sanitisation.
    EmptyName,

    /// A strftime date-suffix format string contains invalid specifiers.
    InvalidDateFormat { format: String },

    /// Glob pattern error while listing transcripts.
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    /// I/O error while listing transcripts.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for NamingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Transcript name is empty"),
            Self::InvalidDateFormat { format } => {
                write!(f, "Invalid date-suffix format '{format}'")
            }
            Self::Pattern { pattern, source } => {
                write!(f, "Invalid transcript glob '{pattern}': {source}")
            }
            Self::Io { path, source } => {
                write!(
                    f,
                    "I/O error listing transcripts in '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for NamingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pattern { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<NamingError> for ChatScribeError {
    fn from(e: NamingError) -> Self {
        Self::Naming(e)
    }
}

// ---------------------------------------------------------------------------
// Recall errors
// ---------------------------------------------------------------------------

/// Errors related to history recall.
///
/// Per the recall contract these never surface partial history: the line
/// sink observes the empty signal and the error is kept for logging only.
#[derive(Debug)]
pub enum RecallError {
    /// The transcript could not be opened.
    Open { path: PathBuf, source: io::Error },

    /// Seek or read failed while locating the tail offset.
    Locate { path: PathBuf, source: io::Error },

    /// Read failed during the forward line scan.
    Read { path: PathBuf, source: io::Error },
}

impl fmt::Display for RecallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "Cannot open transcript '{}': {source}", path.display())
            }
            Self::Locate { path, source } => {
                write!(
                    f,
                    "Tail scan failed on '{}': {source}",
                    path.display()
                )
            }
            Self::Read { path, source } => {
                write!(
                    f,
                    "Forward read failed on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for RecallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Locate { source, .. } => Some(source),
            Self::Read { source, .. } => Some(source),
        }
    }
}

impl From<RecallError> for ChatScribeError {
    fn from(e: RecallError) -> Self {
        Self::Recall(e)
    }
}

// ---------------------------------------------------------------------------
// Record errors
// ---------------------------------------------------------------------------

/// Errors related to appending records to a transcript.
#[derive(Debug)]
pub enum RecordError {
    /// The transcript (or its parent directory) could not be opened/created.
    Open { path: PathBuf, source: io::Error },

    /// Writing the record failed.
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(
                    f,
                    "Cannot open transcript '{}' for append: {source}",
                    path.display()
                )
            }
            Self::Write { path, source } => {
                write!(f, "Cannot append to '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Write { source, .. } => Some(source),
        }
    }
}

impl From<RecordError> for ChatScribeError {
    fn from(e: RecordError) -> Self {
        Self::Record(e)
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

impl From<ConfigError> for ChatScribeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for ChatScribe results.
pub type Result<T> = std::result::Result<T, ChatScribeError>;
