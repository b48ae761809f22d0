//! Integration test for file logging.
//!
//! Installs the process-wide subscriber, so this is the only test in the
//! binary that calls `init_logging`.

use std::collections::HashMap;

use tempfile::TempDir;

use telemetry_facade::logging::{init_logging, LoggingConfig};

use crate::integration::test_utils::harness;

#[test]
fn file_logging_records_facade_events() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("logs").join("telemetry.log");
    let config = LoggingConfig {
        level: "info".to_string(),
        format: "text".to_string(),
        output: "file".to_string(),
        file: log_file.clone(),
        color: false,
        modules: HashMap::from([("telemetry_facade".to_string(), "debug".to_string())]),
    };

    init_logging(Some(&config)).unwrap();
    // Only one global subscriber can be installed per process.
    assert!(init_logging(Some(&config)).is_err());

    let h = harness();
    h.facade.add_to_histogram("logged", 1);
    assert_eq!(h.facade.mark_engine_ready(), 1);

    let contents = std::fs::read_to_string(&log_file).unwrap();
    assert!(
        contents.contains("telemetry engine ready"),
        "log file should contain the ready transition: {:?}",
        contents
    );
    assert!(contents.contains("engine not ready, deferring call"));
    assert!(contents.contains("replayed=1"));
}
