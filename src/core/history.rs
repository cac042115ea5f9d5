// ChatScribe - core/history.rs
//
// History recall and record append for a single transcript file.
//
// Recall is a two-phase operation: locate the tail offset (core/tail.rs),
// then stream newline-delimited records forward into a LineSink. Failures
// never surface partial garbage to the sink -- the sink observes the empty
// signal and the typed error is returned for logging only.
//
// Encoding: records are decoded as lossy UTF-8. Transcripts are written by
// this crate as UTF-8, but recall tolerates foreign bytes in hand-edited
// or legacy files.

use crate::core::model::{LineSink, RecallOutcome, TailStart};
use crate::core::tail::locate_tail;
use crate::util::constants;
use crate::util::error::{RecallError, RecordError, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

// =============================================================================
// Recall configuration
// =============================================================================

/// Configuration for a history recall, passed explicitly per call.
#[derive(Debug, Clone)]
pub struct RecallConfig {
    /// Number of trailing lines to recall.
    pub lines: u32,
    /// When true, tail limiting is skipped entirely and the whole
    /// transcript is read from offset 0.
    pub full_history: bool,
    /// Scan window capacity for the backward tail scan.
    pub window_bytes: usize,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            lines: constants::DEFAULT_HISTORY_LINES,
            full_history: false,
            window_bytes: constants::RECALL_WINDOW_BYTES,
        }
    }
}

// =============================================================================
// Recall
// =============================================================================

/// Recall the tail of the transcript at `path` into `sink`.
///
/// Signal order follows the sink contract: `on_line` per record then one
/// `on_end`, or a single `on_empty`. The file handle is scoped to this
/// call and closed on every exit path.
///
/// Errors are resolved for the sink (it sees `on_empty`) but still
/// returned so the caller can log the distinction between "no history"
/// and "recall failed".
pub fn load_history(
    path: &Path,
    config: &RecallConfig,
    sink: &mut impl LineSink,
) -> Result<RecallOutcome> {
    if config.lines == 0 && !config.full_history {
        sink.on_empty();
        return Ok(RecallOutcome::Empty);
    }

    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            sink.on_empty();
            return Err(RecallError::Open {
                path: path.to_path_buf(),
                source: e,
            }
            .into());
        }
    };

    let start = if config.full_history {
        // Tail limiting disabled: read everything. An empty file simply
        // produces zero records before the end signal.
        TailStart::Offset(0)
    } else {
        match locate_tail(&mut file, config.lines, config.window_bytes) {
            Ok(start) => start,
            Err(e) => {
                sink.on_empty();
                return Err(RecallError::Locate {
                    path: path.to_path_buf(),
                    source: e,
                }
                .into());
            }
        }
    };

    let offset = match start {
        TailStart::Empty => {
            sink.on_empty();
            return Ok(RecallOutcome::Empty);
        }
        TailStart::Offset(off) => off,
    };

    tracing::debug!(
        file = %path.display(),
        offset,
        lines = config.lines,
        full = config.full_history,
        "Recall: reading forward"
    );

    match stream_lines(&mut file, offset, sink) {
        Ok(count) => {
            sink.on_end();
            Ok(RecallOutcome::Lines(count))
        }
        Err(e) => {
            // No end signal after a read failure; the sink must not treat
            // a truncated recall as complete history.
            sink.on_empty();
            Err(RecallError::Read {
                path: path.to_path_buf(),
                source: e,
            }
            .into())
        }
    }
}

/// Read newline-delimited records from `offset` to end-of-file, invoking
/// `sink.on_line` for each. Returns the record count; emits no end/empty
/// signal itself.
fn stream_lines<R: Read + Seek>(
    reader: &mut R,
    offset: u64,
    sink: &mut impl LineSink,
) -> io::Result<u64> {
    reader.seek(SeekFrom::Start(offset))?;
    let mut reader = BufReader::new(reader);
    let mut raw: Vec<u8> = Vec::new();
    let mut count: u64 = 0;

    loop {
        raw.clear();
        let n = reader.read_until(b'\n', &mut raw)?;
        if n == 0 {
            return Ok(count);
        }

        // Strip the terminator; tolerate CRLF from foreign editors.
        if raw.last() == Some(&b'\n') {
            raw.pop();
            if raw.last() == Some(&b'\r') {
                raw.pop();
            }
        }

        sink.on_line(String::from_utf8_lossy(&raw).into_owned());
        count += 1;
    }
}

// =============================================================================
// Record
// =============================================================================

/// Append one newline-terminated record to the transcript at `path`,
/// creating the file if needed.
///
/// An empty record is skipped with a warning rather than producing a blank
/// line in the transcript.
pub fn append_line(path: &Path, text: &str) -> Result<()> {
    if text.is_empty() {
        tracing::warn!(file = %path.display(), "Skipping empty record");
        return Ok(());
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| RecordError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;

    file.write_all(text.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .map_err(|e| RecordError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
