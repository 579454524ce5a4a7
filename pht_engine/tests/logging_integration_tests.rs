//! Integration tests for Engine logging system
//!
//! These tests verify the logging system functionality and the entries the
//! scene graph and render queue emit through it. No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests


use std::sync::{Arc, Mutex};
use pht_engine::glam::Mat4;
use pht_engine::pht::Engine;
use pht_engine::pht::log::{DefaultLogger, Logger, LogEntry, LogSeverity};
use pht_engine::pht::scene::{
    DistanceFunction, RenderOrder, RenderQueue, SceneDesc, SceneManager,
};
use serial_test::serial;
use test_renderer::TestRenderer;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn scene_manager() -> SceneManager {
    let (renderer, _stats) = TestRenderer::new();
    SceneManager::new(Arc::new(Mutex::new(renderer)))
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());
    Engine::log(LogSeverity::Error, "test::module", "Test error message".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 3);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].source, "test::module");
        assert_eq!(captured[0].message, "Test info message");
        assert_eq!(captured[1].severity, LogSeverity::Warn);
        assert_eq!(captured[2].severity, LogSeverity::Error);
        assert!(captured.iter().all(|e| e.file.is_none() && e.line.is_none()));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].file, Some("test_file.rs"));
        assert_eq!(captured[0].line, Some(42));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);

    Engine::reset_logger();

    // Goes to the default logger, not captured
    Engine::log(LogSeverity::Info, "test", "Message 2".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);
}

#[test]
#[serial]
fn test_integration_custom_logger_receives_every_severity() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    for severity in [
        LogSeverity::Trace,
        LogSeverity::Debug,
        LogSeverity::Info,
        LogSeverity::Warn,
        LogSeverity::Error,
    ] {
        Engine::log(severity, "test", format!("{:?} message", severity));
    }

    {
        let captured = entries.lock().unwrap();
        let severities: Vec<_> = captured.iter().map(|e| e.severity).collect();
        assert_eq!(
            severities,
            vec![LogSeverity::Trace, LogSeverity::Debug, LogSeverity::Info, LogSeverity::Warn, LogSeverity::Error]
        );
    }

    Engine::reset_logger();
}

#[test]
fn test_integration_default_logger_threshold() {
    let logger = DefaultLogger::default();
    assert_eq!(logger.min_severity(), LogSeverity::Debug);
    assert!(!logger.accepts(LogSeverity::Trace));
    assert!(logger.accepts(LogSeverity::Error));
}

// ============================================================================
// ENGINE SUBSYSTEM ENTRIES
// ============================================================================

#[test]
#[serial]
fn test_integration_scene_errors_carry_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut sm = scene_manager();
    let scene = sm.create_scene(SceneDesc::new("errors")).unwrap();
    let root = scene.root();
    let child = scene.create_child_scene_object(root).unwrap();
    assert!(scene.add_child(child, root).is_err());

    {
        let captured = entries.lock().unwrap();
        let error = captured
            .iter()
            .find(|e| e.severity == LogSeverity::Error)
            .expect("cycle rejection should be logged");
        assert_eq!(error.source, "pht::Scene");
        assert!(error.file.is_some());
        assert!(error.line.is_some());

        assert!(captured
            .iter()
            .any(|e| e.severity == LogSeverity::Info && e.source == "pht::SceneManager"));
    }

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_render_queue_traces_builds() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let mut sm = scene_manager();
    let scene = sm.create_scene(SceneDesc::new("traced")).unwrap();
    let mut queue = RenderQueue::new();

    assert!(queue
        .build(scene, &Mat4::IDENTITY, RenderOrder::StateOptimized, DistanceFunction::WorldZ, 1)
        .is_err());
    queue.init(scene);
    queue
        .build(scene, &Mat4::IDENTITY, RenderOrder::StateOptimized, DistanceFunction::WorldZ, 1)
        .unwrap();

    {
        let captured = entries.lock().unwrap();
        let from_queue: Vec<_> = captured
            .iter()
            .filter(|e| e.source == "pht::RenderQueue")
            .map(|e| e.severity)
            .collect();
        assert_eq!(from_queue, vec![LogSeverity::Error, LogSeverity::Debug, LogSeverity::Trace]);
    }

    Engine::reset_logger();
}
