use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Error;

/// How stack frame locations are printed by the verbose form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FramePaths {
    /// `function` on one line, then a tab-indented `file:line`.
    #[default]
    Full,
    /// `basename:line` only.
    Base,
}

/// Verbose rendering of an [`Error`]: the message, `values=<json>`, then the stack.
///
/// A failure to encode the values is rendered inline in place of the JSON.
pub struct Verbose<'a> {
    error: &'a Error,
    paths: FramePaths,
}

impl<'a> Verbose<'a> {
    pub fn new(error: &'a Error, paths: FramePaths) -> Self {
        Self { error, paths }
    }
}

impl fmt::Display for Verbose<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        match serde_json::to_string(&self.error.values()) {
            Ok(json) => write!(f, "\nvalues={json}")?,
            Err(err) => write!(f, "\nvalues={err}")?,
        }

        let stack = self.error.stack_trace();
        match self.paths {
            FramePaths::Full => write!(f, "{stack:#}"),
            FramePaths::Base => write!(f, "{stack}"),
        }
    }
}

/// `{:?}` quotes the composed message; `{:#?}` is the verbose form.
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{self:#}")
        } else {
            write!(f, "{:?}", self.to_string())
        }
    }
}
