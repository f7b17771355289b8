//! Sentinel string errors
//!
//! A [`StringError`] is a named, comparable error constant:
//!
//! ```rust
//! use errs::{chain, StringError};
//!
//! pub const ERR_NOT_FOUND: StringError = StringError::new("ErrNotFound");
//!
//! fn lookup(id: u32) -> Result<(), errs::Error> {
//!     Err(ERR_NOT_FOUND.new_error().with("id", id))
//! }
//!
//! let err = lookup(7).unwrap_err();
//! assert_eq!(err.to_string(), "ErrNotFound");
//! assert!(chain::matches(&err, &ERR_NOT_FOUND));
//! ```

use std::any::Any;
use thiserror::Error;

use crate::chain::Interpose;
use crate::error::{BoxError, Error};
use crate::interop::into_cause;

/// An error identified by its text. Two values are equal when their text is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[error("{0}")]
pub struct StringError(&'static str);

impl StringError {
    pub const fn new(text: &'static str) -> Self {
        Self(text)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// An enriched error whose cause is this sentinel. It renders as the sentinel's text.
    pub fn new_error(self) -> Error {
        Error::with_cause(String::new(), Box::new(self))
    }

    /// An enriched error rendering as `"<sentinel>: <cause>"`.
    ///
    /// The result matches both this sentinel and `cause` under
    /// [`chain::matches`](crate::chain::matches), and yields this sentinel under
    /// [`chain::extract`](crate::chain::extract).
    pub fn wrap(self, cause: impl Into<BoxError> + 'static) -> Error {
        let wrapper = SentinelCause {
            sentinel: self,
            cause: into_cause(cause),
        };
        Error::with_cause(String::new(), Box::new(wrapper))
    }
}

/// Pairs a sentinel with the cause it was raised for.
#[derive(Error, Debug)]
#[error("{sentinel}: {cause}")]
pub(crate) struct SentinelCause {
    sentinel: StringError,
    #[source]
    cause: BoxError,
}

impl Interpose for SentinelCause {
    fn is_match(&self, target: &dyn Any) -> bool {
        target.downcast_ref::<StringError>() == Some(&self.sentinel)
    }

    fn carried(&self) -> &dyn Any {
        &self.sentinel
    }
}
