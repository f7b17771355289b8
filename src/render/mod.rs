//! Textual and structured renderings of [`Error`](crate::Error)
//!
//! - `{}` — the composed message
//! - `{:?}` — the composed message, quoted
//! - `{:#}` / `{:#?}` — the message, merged values as JSON, then one line per stack frame
//! - `serde` — `{"message", "values", "stackTrace"}`

pub mod json;
pub mod text;

pub use text::{FramePaths, Verbose};
