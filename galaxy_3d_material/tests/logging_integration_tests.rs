//! Integration tests for the Engine logging facade
//!
//! These tests swap the global logger and must run serially.
//! No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests

use galaxy_3d_material::galaxy3d::{Engine, Galaxy3dError};
use galaxy_3d_material::galaxy3d::log::{Logger, LogEntry, LogSeverity};
use galaxy_3d_material::{engine_err, engine_warn};
use std::sync::{Arc, Mutex};
use serial_test::serial;

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

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "galaxy3d::Test", "Material attached".to_string());
    Engine::log(LogSeverity::Warn, "galaxy3d::Test", "View left empty".to_string());

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].severity, LogSeverity::Info);
    assert_eq!(captured[0].source, "galaxy3d::Test");
    assert_eq!(captured[0].message, "Material attached");
    assert_eq!(captured[1].severity, LogSeverity::Warn);
    assert_eq!(captured[1].file, None);

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_engine_err_logs_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    let err = engine_err!("galaxy3d::Test", "Sampler creation failed: {}", 7);

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].severity, LogSeverity::Error);
    assert_eq!(captured[0].message, "Sampler creation failed: 7");
    assert!(captured[0].file.is_some_and(|f| f.ends_with("logging_integration_tests.rs")));
    assert!(captured[0].line.is_some());
    assert!(matches!(err, Galaxy3dError::BackendError(ref msg) if msg == "Sampler creation failed: 7"));

    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_warn_macro() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    engine_warn!("galaxy3d::TextureView", "Image has zero size ({}x{})", 0, 4);

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].message, "Image has zero size (0x4)");

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
fn test_integration_logging_different_severities() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Trace, "test", "Trace message".to_string());
    Engine::log(LogSeverity::Debug, "test", "Debug message".to_string());
    Engine::log(LogSeverity::Info, "test", "Info message".to_string());
    Engine::log(LogSeverity::Warn, "test", "Warn message".to_string());
    Engine::log(LogSeverity::Error, "test", "Error message".to_string());

    let captured = entries.lock().unwrap();
    let severities: Vec<_> = captured.iter().map(|e| e.severity).collect();
    assert_eq!(
        severities,
        vec![
            LogSeverity::Trace,
            LogSeverity::Debug,
            LogSeverity::Info,
            LogSeverity::Warn,
            LogSeverity::Error,
        ]
    );

    Engine::reset_logger();
}
