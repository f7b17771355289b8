//! Shared fixtures for integration tests
//!
//! Provides a comparable leaf error, a foreign wrapper that exposes its cause the way
//! third-party error types do, and a tracing subscriber for tests that log.

#![allow(dead_code)]

use predicates::prelude::*;
use std::sync::Once;

/// A comparable root cause with no source of its own.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct Leaf(pub &'static str);

/// A non-enriched wrapper in the middle of a chain.
#[derive(Debug, thiserror::Error)]
#[error("other error: {source}")]
pub struct Foreign {
    pub source: errs::Error,
}

impl Foreign {
    pub fn new(source: errs::Error) -> Self {
        Self { source }
    }
}

/// A foreign wrapper around an arbitrary boxed cause.
#[derive(Debug, thiserror::Error)]
#[error("opaque: {source}")]
pub struct Opaque {
    pub source: errs::BoxError,
}

static TRACING: Once = Once::new();

/// Installs a test-writer fmt subscriber once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Assertion helpers over rendered text
pub mod assertions {
    use super::*;

    pub fn assert_contains(text: &str, needle: &str) {
        assert!(
            predicate::str::contains(needle).eval(text),
            "expected {text:?} to contain {needle:?}"
        );
    }

    pub fn assert_ends_with(text: &str, suffix: &str) {
        assert!(
            predicate::str::ends_with(suffix).eval(text),
            "expected {text:?} to end with {suffix:?}"
        );
    }

    pub fn assert_json_eq(actual: &errs::Values, expected: serde_json::Value) {
        assert_eq!(serde_json::Value::Object(actual.clone()), expected);
    }
}
