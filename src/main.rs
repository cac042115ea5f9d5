// ChatScribe - main.rs
//
// CLI entry point. Handles:
// 1. CLI argument parsing
// 2. Logging initialisation (debug mode support)
// 3. Configuration loading and validation
// 4. Subcommand dispatch over the library surface

use chatscribe::core::history::{self, RecallConfig};
use chatscribe::core::model::{TranscriptKind, VecSink};
use chatscribe::core::naming::{self, NamingConfig};
use chatscribe::core::stamp;
use chatscribe::platform::config::{load_config, AppConfig, PlatformPaths};
use chatscribe::util::error::Result;
use chatscribe::util::{constants, logging};
use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// ChatScribe - chat transcript recorder with tail-limited history recall.
///
/// Records conversation lines to append-only text transcripts and recalls
/// the last N lines of a transcript without reading the whole file.
#[derive(Parser, Debug)]
#[command(name = "chatscribe", version, about)]
struct Cli {
    /// Transcript directory (overrides config and the platform default).
    #[arg(short = 't', long = "transcript-dir", global = true)]
    transcript_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recall the last lines of a conversation transcript.
    Tail {
        /// Conversation name (avatar or group name; "chat" for local chat).
        name: String,

        /// Number of trailing lines to recall.
        #[arg(short = 'n', long = "lines")]
        lines: Option<u32>,

        /// Recall the whole transcript, ignoring the line limit.
        #[arg(long = "full")]
        full: bool,

        /// Treat the conversation as an instant message thread.
        #[arg(long = "im")]
        im: bool,

        /// Emit records as a JSON array instead of plain lines.
        #[arg(long = "json")]
        json: bool,
    },

    /// Append a timestamped record to a conversation transcript.
    Say {
        /// Conversation name (avatar or group name; "chat" for local chat).
        name: String,

        /// Record text to append.
        message: String,

        /// Treat the conversation as an instant message thread.
        #[arg(long = "im")]
        im: bool,

        /// Write the record without a timestamp prefix.
        #[arg(long = "no-stamp")]
        no_stamp: bool,
    },

    /// Print the resolved transcript path for a conversation.
    Path {
        /// Conversation name (avatar or group name; "chat" for local chat).
        name: String,

        /// Treat the conversation as an instant message thread.
        #[arg(long = "im")]
        im: bool,
    },

    /// List transcripts in the transcript directory.
    List,
}

fn kind_for(im: bool) -> TranscriptKind {
    if im {
        TranscriptKind::Instant
    } else {
        TranscriptKind::LocalChat
    }
}

fn naming_config(config: &AppConfig) -> NamingConfig {
    NamingConfig {
        file_date: config.file_date,
        local_chat_date_format: config.local_chat_date_format.clone(),
        im_date_format: config.im_date_format.clone(),
    }
}

fn run(cli: Cli, config: &AppConfig, transcript_dir: &Path) -> Result<()> {
    match cli.command {
        Command::Tail {
            name,
            lines,
            full,
            im,
            json,
        } => {
            let path = naming::log_file_path(
                transcript_dir,
                &name,
                kind_for(im),
                Local::now(),
                &naming_config(config),
            )?;

            let recall = RecallConfig {
                lines: lines.unwrap_or(config.history_lines),
                full_history: full || config.full_history,
                window_bytes: constants::RECALL_WINDOW_BYTES,
            };

            let mut sink = VecSink::new();
            if let Err(e) = history::load_history(&path, &recall, &mut sink) {
                // Recall failures degrade to "no history shown"; the error
                // is logged but the command still succeeds.
                tracing::warn!(error = %e, file = %path.display(), "No history recalled");
            }

            if json {
                // serde_json cannot fail on a Vec<String>.
                println!(
                    "{}",
                    serde_json::to_string_pretty(&sink.lines)
                        .unwrap_or_else(|_| "[]".to_string())
                );
            } else {
                for line in &sink.lines {
                    println!("{line}");
                }
            }
            Ok(())
        }

        Command::Say {
            name,
            message,
            im,
            no_stamp,
        } => {
            let now = Local::now();
            let path = naming::log_file_path(
                transcript_dir,
                &name,
                kind_for(im),
                now,
                &naming_config(config),
            )?;

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    chatscribe::util::error::ChatScribeError::Io {
                        path: parent.to_path_buf(),
                        operation: "create transcript directory",
                        source: e,
                    }
                })?;
            }

            let record = if no_stamp {
                message
            } else {
                format!(
                    "{}{message}",
                    stamp::stamp(now, config.stamp_with_date, config.stamp_with_seconds)
                )
            };

            history::append_line(&path, &record)?;
            tracing::debug!(file = %path.display(), "Record appended");
            Ok(())
        }

        Command::Path { name, im } => {
            let path = naming::log_file_path(
                transcript_dir,
                &name,
                kind_for(im),
                Local::now(),
                &naming_config(config),
            )?;
            println!("{}", path.display());
            Ok(())
        }

        Command::List => {
            let transcripts = naming::list_transcripts(transcript_dir)?;
            for path in transcripts {
                println!("{}", path.display());
            }
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialise logging subsystem
    logging::init(cli.debug, None);

    tracing::debug!(
        version = constants::APP_VERSION,
        debug = cli.debug,
        "ChatScribe starting"
    );

    // Resolve platform paths and load configuration
    let platform_paths = PlatformPaths::resolve();
    let (config, warnings) = load_config(&platform_paths.config_dir);
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    // Transcript directory: CLI override > config > platform default
    let transcript_dir = cli
        .transcript_dir
        .clone()
        .or_else(|| config.transcript_dir.clone())
        .unwrap_or(platform_paths.transcript_dir);

    if let Err(e) = run(cli, &config, &transcript_dir) {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
