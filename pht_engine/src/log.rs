//! Internal logging system for the Pht engine
//!
//! This module provides a small pluggable logging layer:
//! - Customizable logger via Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default, with a minimum severity
//! - File and line information for detailed ERROR logs
//!
//! Messages are routed through `Engine::log` by the `engine_*!` macros.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to redirect engine output (file logging,
/// an in-game console, a test capture buffer, etc.)
///
/// # Example
///
/// ```no_run
/// use pht_engine::pht::log::{Logger, LogEntry};
///
/// struct ConsoleOverlay;
///
/// impl Logger for ConsoleOverlay {
///     fn log(&self, entry: &LogEntry) {
///         // Push to the debug overlay...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level (Trace, Debug, Info, Warn, Error)
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "pht::Scene", "pht::RenderQueue")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Per-frame details (render queue builds, propagation passes)
    Trace,

    /// Development/debugging information
    Debug,

    /// Lifecycle events (scenes, managers)
    Info,

    /// Recoverable problems (refused static batch, etc.)
    Warn,

    /// Errors returned to the caller (with file:line details)
    Error,
}

impl LogSeverity {
    fn label(self) -> ColoredString {
        match self {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        }
    }
}

/// Default logger: colored console output.
///
/// Entries below `min_severity` are dropped. The default threshold is
/// `Debug`, so the per-frame TRACE output of the render queue stays quiet.
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
#[derive(Debug, Clone, Copy)]
pub struct DefaultLogger {
    min_severity: LogSeverity,
}

impl DefaultLogger {
    /// Create a console logger that prints entries at or above `min_severity`
    pub fn new(min_severity: LogSeverity) -> Self {
        Self { min_severity }
    }

    /// Minimum severity printed by this logger
    pub fn min_severity(&self) -> LogSeverity {
        self.min_severity
    }

    /// Whether an entry of this severity would be printed
    pub fn accepts(&self, severity: LogSeverity) -> bool {
        severity >= self.min_severity
    }
}

impl Default for DefaultLogger {
    fn default() -> Self {
        Self::new(LogSeverity::Debug)
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        if !self.accepts(entry.severity) {
            return;
        }

        // YYYY-MM-DD HH:MM:SS.mmm
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();
        let source = entry.source.bright_blue();

        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp,
                entry.severity.label(),
                source,
                entry.message,
                file,
                line
            );
        } else {
            println!(
                "[{}] [{}] [{}] {}",
                timestamp,
                entry.severity.label(),
                source,
                entry.message
            );
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (per-frame, typically filtered out)
///
/// ```ignore
/// engine_trace!("pht::RenderQueue", "Built {} entries", count);
/// ```
#[macro_export]
macro_rules! engine_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::pht::Engine::log(
            $crate::pht::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message (development information)
#[macro_export]
macro_rules! engine_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::pht::Engine::log(
            $crate::pht::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message (lifecycle events)
///
/// ```ignore
/// engine_info!("pht::SceneManager", "Scene '{}' created", name);
/// ```
#[macro_export]
macro_rules! engine_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::pht::Engine::log(
            $crate::pht::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message (potential issues)
#[macro_export]
macro_rules! engine_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::pht::Engine::log(
            $crate::pht::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
#[macro_export]
macro_rules! engine_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::pht::Engine::log_detailed(
            $crate::pht::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
