//! Emitting enriched errors as `tracing` events
//!
//! The library never installs a subscriber; applications choose where the events go.

use crate::config;
use crate::error::Error;

/// Logs `error` as one `ERROR` event with the merged values and stack depth as fields,
/// followed by a `DEBUG` event carrying the verbose rendering.
pub fn log_error(error: &Error) {
    let values = match serde_json::to_string(&error.values()) {
        Ok(json) => json,
        Err(err) => err.to_string(),
    };
    let stack = error.stack_trace();

    tracing::error!(
        error = %error,
        values = %values,
        stack_depth = stack.len(),
        origin = stack.first().map(|frame| frame.func()).unwrap_or_default(),
        "enriched error"
    );
    tracing::debug!(
        verbose = %error.verbose(config::settings().frame_paths),
        "enriched error detail"
    );
}

impl Error {
    /// Logs this error through [`log_error`] and returns it for further propagation.
    pub fn report(self) -> Self {
        log_error(&self);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_returns_same_error() {
        let err = Error::new("boom").with("k", "v");
        let frames = err.stack_trace().as_ptr();

        let err = err.report();

        assert_eq!(err.to_string(), "boom");
        assert_eq!(err.stack_trace().as_ptr(), frames);
    }

    #[test]
    fn log_error_without_stack() {
        let err = Error::from_json(r#"{"message":"detached"}"#).unwrap();
        log_error(&err);
    }
}
