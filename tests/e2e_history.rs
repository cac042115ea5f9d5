// ChatScribe - tests/e2e_history.rs
//
// End-to-end tests for the record -> recall pipeline.
//
// These tests exercise the real filesystem, real transcript naming, real
// chrono date formatting, and real config.toml loading -- no mocks, no
// stubs. This exercises the full path from an appended record on disk to
// lines delivered through a LineSink.

use chatscribe::core::history::{append_line, load_history, RecallConfig};
use chatscribe::core::model::{RecallOutcome, TranscriptKind, VecSink};
use chatscribe::core::naming::{list_transcripts, log_file_path, NamingConfig};
use chatscribe::core::stamp::stamp;
use chatscribe::platform::config::load_config;
use chrono::{Local, TimeZone};
use std::fs;

// =============================================================================
// Helpers
// =============================================================================

fn fixed_now() -> chrono::DateTime<Local> {
    Local.with_ymd_and_hms(2024, 1, 15, 14, 30, 22).unwrap()
}

fn recall_lines(path: &std::path::Path, lines: u32) -> VecSink {
    let config = RecallConfig {
        lines,
        ..Default::default()
    };
    let mut sink = VecSink::new();
    load_history(path, &config, &mut sink).unwrap();
    sink
}

// =============================================================================
// Record -> recall E2E
// =============================================================================

/// Stamped records written through the library come back byte-identical
/// through a tail-limited recall.
#[test]
fn e2e_record_then_recall_tail() {
    let dir = tempfile::tempdir().unwrap();
    let naming = NamingConfig::default();
    let path = log_file_path(
        dir.path(),
        "Ratany Resident",
        TranscriptKind::Instant,
        fixed_now(),
        &naming,
    )
    .unwrap();

    for i in 1..=5 {
        let record = format!("{}message {i}", stamp(fixed_now(), false, true));
        append_line(&path, &record).unwrap();
    }

    let sink = recall_lines(&path, 2);
    assert_eq!(
        sink.lines,
        vec!["[14:30:22]  message 4", "[14:30:22]  message 5"]
    );
    assert!(sink.ended);
    assert!(!sink.empty);
}

/// The documented locate scenario: four lines, recall two.
#[test]
fn e2e_recall_last_two_of_four() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.txt");
    fs::write(&path, "a\nb\nc\nd\n").unwrap();

    let sink = recall_lines(&path, 2);
    assert_eq!(sink.lines, vec!["c", "d"]);
}

/// A final line without a trailing newline is still recalled as a line.
#[test]
fn e2e_recall_partial_final_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.txt");
    fs::write(&path, "a\nb").unwrap();

    let sink = recall_lines(&path, 1);
    assert_eq!(sink.lines, vec!["b"]);
    assert!(sink.ended);
}

/// A zero-byte transcript produces only the empty signal.
#[test]
fn e2e_recall_empty_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.txt");
    fs::write(&path, "").unwrap();

    let sink = recall_lines(&path, 10);
    assert!(sink.lines.is_empty());
    assert!(sink.empty);
    assert!(!sink.ended);
}

/// Recalling a large transcript touches only the tail windows, and the
/// result matches a plain forward read of the same lines.
#[test]
fn e2e_recall_from_large_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.txt");

    let mut content = String::new();
    for i in 0..10_000 {
        content.push_str(&format!("[12:00]  line number {i}\n"));
    }
    fs::write(&path, &content).unwrap();

    let sink = recall_lines(&path, 3);
    assert_eq!(
        sink.lines,
        vec![
            "[12:00]  line number 9997",
            "[12:00]  line number 9998",
            "[12:00]  line number 9999"
        ]
    );
}

/// Recall is idempotent on an unmodified transcript.
#[test]
fn e2e_recall_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.txt");
    fs::write(&path, "a\nb\nc\nd\ne\n").unwrap();

    let first = recall_lines(&path, 3);
    let second = recall_lines(&path, 3);
    assert_eq!(first.lines, second.lines);
}

/// `full_history` recalls everything regardless of the line limit.
#[test]
fn e2e_full_history_reads_whole_transcript() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.txt");
    fs::write(&path, "a\nb\nc\n").unwrap();

    let config = RecallConfig {
        lines: 1,
        full_history: true,
        ..Default::default()
    };
    let mut sink = VecSink::new();
    let outcome = load_history(&path, &config, &mut sink).unwrap();
    assert_eq!(outcome, RecallOutcome::Lines(3));
    assert_eq!(sink.lines, vec!["a", "b", "c"]);
}

// =============================================================================
// Dated naming E2E
// =============================================================================

/// Dated naming rolls instant message transcripts over monthly and lists
/// them back in order.
#[test]
fn e2e_dated_naming_and_listing() {
    let dir = tempfile::tempdir().unwrap();
    let naming = NamingConfig {
        file_date: true,
        ..Default::default()
    };

    let january = Local.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
    let february = Local.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap();

    for now in [january, february] {
        let path = log_file_path(
            dir.path(),
            "Ratany Resident",
            TranscriptKind::Instant,
            now,
            &naming,
        )
        .unwrap();
        append_line(&path, "hello").unwrap();
    }

    let listed = list_transcripts(dir.path()).unwrap();
    let names: Vec<_> = listed
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec!["Ratany Resident-2024-01.txt", "Ratany Resident-2024-02.txt"]
    );
}

// =============================================================================
// Configuration E2E
// =============================================================================

/// A valid config.toml round-trips into AppConfig.
#[test]
fn e2e_config_loads_values() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        r#"
[history]
lines = 42
full_history = true

[naming]
file_date = true
im_date_format = "-%Y-%m-%d"

[stamp]
with_seconds = true

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let (config, warnings) = load_config(dir.path());
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    assert_eq!(config.history_lines, 42);
    assert!(config.full_history);
    assert!(config.file_date);
    assert_eq!(config.im_date_format, "-%Y-%m-%d");
    assert!(config.stamp_with_seconds);
    assert_eq!(config.log_level.as_deref(), Some("debug"));
}

/// Out-of-range and invalid values fall back to defaults with warnings.
#[test]
fn e2e_config_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.toml"),
        r#"
[history]
lines = 0

[naming]
local_chat_date_format = "-%Q"

[logging]
level = "verbose"
"#,
    )
    .unwrap();

    let (config, warnings) = load_config(dir.path());
    assert_eq!(warnings.len(), 3, "expected 3 warnings: {warnings:?}");
    assert_eq!(
        config.history_lines,
        chatscribe::util::constants::DEFAULT_HISTORY_LINES
    );
    assert_eq!(
        config.local_chat_date_format,
        chatscribe::util::constants::DEFAULT_LOCAL_CHAT_DATE_FORMAT
    );
    assert!(config.log_level.is_none());
}

/// A missing config file is a clean first-run: defaults, no warnings.
#[test]
fn e2e_config_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (config, warnings) = load_config(dir.path());
    assert!(warnings.is_empty());
    assert_eq!(
        config.history_lines,
        chatscribe::util::constants::DEFAULT_HISTORY_LINES
    );
    assert!(!config.full_history);
}

/// An unparseable config file degrades to defaults with a warning.
#[test]
fn e2e_config_unparseable_file_warns() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "not [ valid = toml").unwrap();

    let (config, warnings) = load_config(dir.path());
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        config.history_lines,
        chatscribe::util::constants::DEFAULT_HISTORY_LINES
    );
}
