//! Tests with tracing feature enabled

use std::sync::Arc;

use appendx::{Contention, RacyBuffer, SyncBuffer};
use tracing_subscriber::{fmt, EnvFilter};

#[test]
fn test_tracing_with_subscriber() {
    // Initialize tracing subscriber for this test
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let buffer = Arc::new(SyncBuffer::new());
    let report = Contention::new(16, 100).run(&buffer).unwrap();

    assert!(report.is_exact());
}

#[test]
fn test_tracing_with_all_scenarios() {
    // Initialize tracing subscriber
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let config = Contention::new(8, 50);

    let racy = Arc::new(RacyBuffer::with_capacity(config.expected()));
    let report = config.run(&racy).unwrap();
    assert!(report.observed <= report.expected);

    let per_call = Arc::new(SyncBuffer::new());
    assert!(config.run(&per_call).unwrap().is_exact());

    let coarse = Arc::new(SyncBuffer::new());
    assert!(config.run_coarse(&coarse).unwrap().is_exact());
}
