// ChatScribe - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no platform
// dependencies. These types are the shared vocabulary across all layers.

use serde::Serialize;

// =============================================================================
// Tail locate result
// =============================================================================

/// Where a history recall should start reading, as resolved by the tail scan.
///
/// `Empty` is distinct from `Offset(0)`: the former means "nothing to read"
/// (zero-length transcript or zero lines requested), the latter means "read
/// the whole file from the first byte".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailStart {
    /// No lines to produce; the sink receives only the empty signal.
    Empty,

    /// Byte offset of the first line to read. Always 0 or the byte
    /// immediately following a newline.
    Offset(u64),
}

impl TailStart {
    /// Returns `true` for the `Empty` variant.
    pub fn is_empty(&self) -> bool {
        matches!(self, TailStart::Empty)
    }
}

// =============================================================================
// Recall outcome
// =============================================================================

/// Summary of a completed history recall, for callers that want more than
/// the sink's signals (e.g. logging line counts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecallOutcome {
    /// The transcript had no history to produce; the sink saw `on_empty`.
    Empty,

    /// `lines` records were delivered to the sink, followed by `on_end`.
    Lines(u64),
}

// =============================================================================
// Transcript kind
// =============================================================================

/// Which kind of conversation a transcript records.
///
/// The kind selects the date-suffix format used when dated file naming is
/// enabled: local chat rolls over daily, instant message threads monthly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranscriptKind {
    /// Open local chat around the user.
    LocalChat,

    /// A one-to-one or group instant message thread.
    Instant,
}

// =============================================================================
// Line sink
// =============================================================================

/// Consumer-side interface receiving recalled history, one method per
/// signal kind. Signals arrive in order: zero or more `on_line` calls, then
/// exactly one `on_end`, or exactly one `on_empty` and nothing else.
pub trait LineSink {
    /// One recalled record, without its line terminator. The sink owns the
    /// text for the duration of the call chain.
    fn on_line(&mut self, line: String);

    /// End of history; no further signals follow.
    fn on_end(&mut self);

    /// No history available (empty transcript, zero lines requested, or a
    /// recall failure resolved to "nothing to show").
    fn on_empty(&mut self);
}

/// A `LineSink` that collects records into a `Vec`, used by the CLI and
/// by tests.
#[derive(Debug, Default)]
pub struct VecSink {
    /// Recalled records in delivery order.
    pub lines: Vec<String>,
    /// Whether `on_end` fired.
    pub ended: bool,
    /// Whether `on_empty` fired.
    pub empty: bool,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineSink for VecSink {
    fn on_line(&mut self, line: String) {
        self.lines.push(line);
    }

    fn on_end(&mut self) {
        self.ended = true;
    }

    fn on_empty(&mut self) {
        self.empty = true;
    }
}
