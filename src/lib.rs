//! Enriched errors
//!
//! This library augments ordinary errors with a call stack captured at the first
//! point of enrichment, key/value attributes that merge through chains of wrapping,
//! and a structured JSON form for logging pipelines. Sentinel [`StringError`]
//! constants give comparable error identities that still wrap and capture stacks.
//!
//! ```rust
//! use errs::{chain, Error, ResultExt, StringError};
//!
//! const ERR_NOT_FOUND: StringError = StringError::new("ErrNotFound");
//!
//! fn open(path: &str) -> Result<String, Error> {
//!     let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
//!     Err(ERR_NOT_FOUND.wrap(io).with("path", path))
//! }
//!
//! fn load() -> Result<String, Error> {
//!     open("config.toml").wrap_err_msg("load config")
//! }
//!
//! let err = load().unwrap_err();
//! assert_eq!(err.to_string(), "load config: ErrNotFound: no such file");
//! assert_eq!(err.values()["path"], "config.toml");
//! assert!(chain::matches(&err, &ERR_NOT_FOUND));
//! ```

pub mod chain;
pub mod config;
pub mod context;
pub mod error;
mod interop;
pub mod render;
pub mod report;
pub mod stack;
pub mod string;

pub use context::{ResultExt, ValueExt};
pub use error::{BoxError, Cause, Error, Values};
pub use render::{FramePaths, Verbose};
pub use stack::{StackFrame, StackTrace};
pub use string::StringError;

/// Convenience alias for results carrying an enriched [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
