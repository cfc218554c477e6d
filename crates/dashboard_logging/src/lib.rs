#![deny(missing_docs)]
//! Shared logging utilities for the dashboard workspace.
//!
//! Provides the `dash_*` logging macros, a per-thread "current user action"
//! number that the macros stamp on every line, and the logger initialisers
//! used by the app and by tests.

use std::cell::Cell;
use std::fs::File;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

thread_local! {
    /// Sequence number of the user action currently being handled.
    static ACTION_SEQ: Cell<u64> = const { Cell::new(0) };
}

/// Records which user action the current thread is handling.
///
/// The UI loop bumps this for every gesture so that every line logged while
/// reacting to it (including a whole batch) carries the same number.
pub fn set_action_seq(seq: u64) {
    ACTION_SEQ.with(|v| v.set(seq));
}

/// Returns the action number of the current thread, 0 outside any action.
pub fn action_seq() -> u64 {
    ACTION_SEQ.with(|v| v.get())
}

/// Future that runs `inner` as part of action `seq`.
///
/// The action number is installed around every poll and the previous value
/// restored afterwards, so it follows the task across runtime worker threads.
pub struct WithActionSeq<F> {
    seq: u64,
    inner: Pin<Box<F>>,
}

/// Tags every log line written while `future` runs with action `seq`.
pub fn with_action_seq<F: Future>(seq: u64, future: F) -> WithActionSeq<F> {
    WithActionSeq {
        seq,
        inner: Box::pin(future),
    }
}

impl<F: Future> Future for WithActionSeq<F> {
    type Output = F::Output;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let previous = action_seq();
        set_action_seq(self.seq);
        let poll = self.inner.as_mut().poll(cx);
        set_action_seq(previous);
        poll
    }
}

/// Logs a trace-level message tagged with the current action.
#[macro_export]
macro_rules! dash_trace {
    ($($arg:tt)*) => {{
        log::trace!("[a{}] {}", $crate::action_seq(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message tagged with the current action.
#[macro_export]
macro_rules! dash_debug {
    ($($arg:tt)*) => {{
        log::debug!("[a{}] {}", $crate::action_seq(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message tagged with the current action.
#[macro_export]
macro_rules! dash_info {
    ($($arg:tt)*) => {{
        log::info!("[a{}] {}", $crate::action_seq(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message tagged with the current action.
#[macro_export]
macro_rules! dash_warn {
    ($($arg:tt)*) => {{
        log::warn!("[a{}] {}", $crate::action_seq(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message tagged with the current action.
#[macro_export]
macro_rules! dash_error {
    ($($arg:tt)*) => {{
        log::error!("[a{}] {}", $crate::action_seq(), format_args!($($arg)*));
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    /// Write to the log file only.
    #[default]
    File,
    /// Write to the terminal (stderr/stdout).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Initialises the global logger.
///
/// File output goes to `log_path`; if the file cannot be created the file
/// logger is skipped with a warning on stderr. Calling this twice is a no-op.
pub fn initialize(destination: LogDestination, level: LevelFilter, log_path: &Path) {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        if let Some(file_logger) = create_file_logger(level, config, log_path) {
            loggers.push(file_logger);
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
