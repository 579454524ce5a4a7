//! Unit tests for log.rs
//!
//! Tests Logger trait, LogEntry, LogSeverity, and DefaultLogger filtering.

use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
use std::time::SystemTime;

fn entry(severity: LogSeverity, file: Option<&'static str>, line: Option<u32>) -> LogEntry {
    LogEntry {
        severity,
        timestamp: SystemTime::now(),
        source: "pht::test".to_string(),
        message: format!("{:?} message", severity),
        file,
        line,
    }
}

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_debug() {
    assert_eq!(format!("{:?}", LogSeverity::Trace), "Trace");
    assert_eq!(format!("{:?}", LogSeverity::Error), "Error");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_with_file_line() {
    let e = entry(LogSeverity::Error, Some("render_queue.rs"), Some(42));
    assert_eq!(e.source, "pht::test");
    assert_eq!(e.file, Some("render_queue.rs"));
    assert_eq!(e.line, Some(42));
}

#[test]
fn test_log_entry_clone() {
    let e1 = entry(LogSeverity::Warn, None, None);
    let e2 = e1.clone();
    assert_eq!(e1.severity, e2.severity);
    assert_eq!(e1.message, e2.message);
    assert!(e2.file.is_none());
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_threshold() {
    let logger = DefaultLogger::default();
    assert_eq!(logger.min_severity(), LogSeverity::Debug);
    assert!(!logger.accepts(LogSeverity::Trace));
    assert!(logger.accepts(LogSeverity::Debug));
    assert!(logger.accepts(LogSeverity::Error));

    let quiet = DefaultLogger::new(LogSeverity::Warn);
    assert!(!quiet.accepts(LogSeverity::Info));
    assert!(quiet.accepts(LogSeverity::Warn));
}

#[test]
fn test_default_logger_all_severities() {
    // Printing must not panic, filtered or not, with or without location
    let logger = DefaultLogger::new(LogSeverity::Trace);
    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        logger.log(&entry(severity, None, None));
        logger.log(&entry(severity, Some("scene.rs"), Some(7)));
    }
}

// ============================================================================
// LOGGER TRAIT TESTS
// ============================================================================

struct CountingLogger {
    logged_count: std::sync::Mutex<usize>,
}

impl Logger for CountingLogger {
    fn log(&self, _entry: &LogEntry) {
        *self.logged_count.lock().unwrap() += 1;
    }
}

#[test]
fn test_custom_logger_implementation() {
    let logger = CountingLogger { logged_count: std::sync::Mutex::new(0) };
    logger.log(&entry(LogSeverity::Info, None, None));
    logger.log(&entry(LogSeverity::Trace, None, None));
    assert_eq!(*logger.logged_count.lock().unwrap(), 2);
}

#[test]
fn test_logger_trait_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DefaultLogger>();
}
