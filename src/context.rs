//! Wrapping errors at `Result` boundaries
//!
//! [`ResultExt`] turns any `Result` whose error converts into [`BoxError`] into a
//! `Result<T, Error>`, capturing a stack unless the chain already has one. With the
//! `anyhow` feature this covers `anyhow::Result` as well.
//! [`ValueExt`] attaches attributes to the error of a `Result<T, Error>` in flight.

use serde_json::Value;
use std::fmt::Display;

use crate::error::{BoxError, Error};

/// Extension trait for wrapping the error of a `Result` in an [`Error`].
pub trait ResultExt<T> {
    /// Wrap the error without a message.
    fn wrap_err(self) -> Result<T, Error>;

    /// Wrap the error with a message.
    fn wrap_err_msg<M: Display>(self, message: M) -> Result<T, Error>;

    /// Wrap the error with a message built only on failure.
    fn wrap_err_with<M, F>(self, f: F) -> Result<T, Error>
    where
        M: Display,
        F: FnOnce() -> M;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<BoxError> + 'static,
{
    fn wrap_err(self) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Error::wrap(err)),
        }
    }

    fn wrap_err_msg<M: Display>(self, message: M) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Error::wrap_with(err, [message])),
        }
    }

    fn wrap_err_with<M, F>(self, f: F) -> Result<T, Error>
    where
        M: Display,
        F: FnOnce() -> M,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(Error::wrap_with(err, [f()])),
        }
    }
}

/// Extension trait for attaching attributes to a failed `Result<T, Error>`.
pub trait ValueExt<T> {
    fn with_value(self, key: impl Into<String>, value: impl Into<Value>) -> Result<T, Error>;
}

impl<T> ValueExt<T> for Result<T, Error> {
    fn with_value(self, key: impl Into<String>, value: impl Into<Value>) -> Result<T, Error> {
        self.map_err(|err| err.with(key, value))
    }
}

/// Wraps a cause with optional message parts, each formatted with `Display`.
///
/// ```rust
/// let io = std::io::Error::other("disk full");
/// let err = errs::wrap!(io, "save", 3);
/// assert_eq!(err.to_string(), "save: 3: disk full");
///
/// let err = errs::wrap!(err);
/// assert_eq!(err.to_string(), "save: 3: disk full");
/// ```
#[macro_export]
macro_rules! wrap {
    ($cause:expr $(,)?) => {
        $crate::Error::wrap($cause)
    };
    ($cause:expr, $($part:expr),+ $(,)?) => {
        $crate::Error::wrap_with(
            $cause,
            [$(::std::string::ToString::to_string(&$part)),+],
        )
    };
}
