//! Conversion progress log.
//!
//! Entries are broadcast to every subscriber (tests, embedding callers).
//! Warnings and errors are also echoed to stderr; stdout is left to the
//! binary's confirmation line.

use once_cell::sync::Lazy;
use serde::Serialize;
use tokio::sync::broadcast;

/// Severity of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Nesting depth, for details under a step
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }
}

/// Global log broadcaster
pub static LOG_BROADCASTER: Lazy<LogBroadcaster> = Lazy::new(LogBroadcaster::new);

/// Fans log entries out to subscribers
pub struct LogBroadcaster {
    sender: broadcast::Sender<LogEntry>,
    echo_level: LogLevel,
}

impl LogBroadcaster {
    pub fn new() -> Self {
        Self::with_echo_level(LogLevel::Warning)
    }

    /// Broadcaster that echoes entries at or above `level` to stderr.
    pub fn with_echo_level(level: LogLevel) -> Self {
        let (sender, _) = broadcast::channel(1024);
        Self { sender, echo_level: level }
    }

    /// Send a log entry to all subscribers
    pub fn log(&self, entry: LogEntry) {
        if entry.level >= self.echo_level {
            let prefix = match entry.level {
                LogLevel::Info | LogLevel::Success => "",
                LogLevel::Warning => "warning: ",
                LogLevel::Error => "error: ",
            };
            let indent = "   ".repeat(entry.indent as usize);
            eprintln!("{}{}{}", indent, prefix, entry.message);
        }

        // No receivers is fine
        let _ = self.sender.send(entry);
    }

    /// Receiver for entries logged from now on
    pub fn subscribe(&self) -> broadcast::Receiver<LogEntry> {
        self.sender.subscribe()
    }
}

impl Default for LogBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

pub fn log_info(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOG_BROADCASTER.log(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOG_BROADCASTER.log(LogEntry::info(msg).with_indent(indent));
}

/// Drain whatever a receiver has buffered.
pub fn drain(rx: &mut broadcast::Receiver<LogEntry>) -> Vec<LogEntry> {
    let mut entries = Vec::new();
    loop {
        match rx.try_recv() {
            Ok(entry) => entries.push(entry),
            Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
            Err(_) => break,
        }
    }
    entries
}
