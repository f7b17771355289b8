//! Call-stack capture
//!
//! Snapshots the current thread's call stack as a list of symbolicated frames.
//! Frames that belong to the capture machinery (the unwinder and this crate's
//! constructors) are dropped so that frame 0 is the caller that created the error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::path::Path;

use crate::config;

/// Frames skipped when no symbol names are available to locate the constructors.
const FALLBACK_CALLER_DEPTH: usize = 3;

/// Extra frames scanned beyond `max_depth` to make room for the skipped prefix.
const SCAN_SLACK: usize = 32;

/// Symbol fragments identifying frames of the capture machinery.
const INTERNAL_MARKERS: &[&str] = &[
    "backtrace::",
    "errs::stack::capture",
    "errs::stack::collect",
    "errs::error::Error",
    "errs::string::StringError",
    "errs::context::ResultExt",
];

const UNKNOWN: &str = "unknown";

/// A single symbolicated call-stack frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackFrame {
    func: String,
    file: String,
    line: u32,
}

impl StackFrame {
    pub fn new(func: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            func: func.into(),
            file: file.into(),
            line,
        }
    }

    /// Frame emitted when the platform cannot resolve a program counter.
    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN, 0)
    }

    pub fn func(&self) -> &str {
        &self.func
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Final path component of [`file`](Self::file), or the whole path when it has none.
    pub fn base_name(&self) -> &str {
        Path::new(&self.file)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.file)
    }

    fn from_symbol(symbol: &backtrace::Symbol) -> Self {
        let func = symbol
            .name()
            .map(|name| format!("{name:#}"))
            .unwrap_or_else(|| UNKNOWN.to_string());
        let file = symbol
            .filename()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            func,
            file,
            line: symbol.lineno().unwrap_or(0),
        }
    }

    fn is_internal(&self) -> bool {
        INTERNAL_MARKERS.iter().any(|marker| self.func.contains(marker))
    }
}

/// `{}` renders `basename:line`, `{:#}` renders `func\n\tfile:line`.
impl fmt::Display for StackFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}\n\t{}:{}", self.func, self.file, self.line)
        } else {
            write!(f, "{}:{}", self.base_name(), self.line)
        }
    }
}

/// Ordered frames, frame 0 closest to the capture point.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackTrace(Vec<StackFrame>);

pub(crate) static EMPTY_STACK: StackTrace = StackTrace(Vec::new());

impl StackTrace {
    pub fn frames(&self) -> &[StackFrame] {
        &self.0
    }

    pub fn into_frames(self) -> Vec<StackFrame> {
        self.0
    }
}

impl Deref for StackTrace {
    type Target = [StackFrame];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<StackFrame>> for StackTrace {
    fn from(frames: Vec<StackFrame>) -> Self {
        Self(frames)
    }
}

impl FromIterator<StackFrame> for StackTrace {
    fn from_iter<I: IntoIterator<Item = StackFrame>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One line per frame, each prefixed by a newline; alternate mode uses the full frame form.
impl fmt::Display for StackTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in &self.0 {
            if f.alternate() {
                write!(f, "\n{frame:#}")?;
            } else {
                write!(f, "\n{frame}")?;
            }
        }
        Ok(())
    }
}

/// Captures the call stack of the current thread.
///
/// At most [`Settings::max_depth`](crate::config::Settings) frames are kept; deeper
/// stacks are truncated. Frames the platform cannot symbolicate become
/// [`StackFrame::unknown`]. Never fails: the degenerate result is an empty trace.
pub fn capture() -> StackTrace {
    let max_depth = config::settings().max_depth;
    let (mut frames, exhausted) = collect(max_depth + SCAN_SLACK);

    let start = match frames.iter().position(StackFrame::is_internal) {
        Some(first) => {
            first
                + frames[first..]
                    .iter()
                    .take_while(|frame| frame.is_internal())
                    .count()
        }
        None => FALLBACK_CALLER_DEPTH.min(frames.len()),
    };
    frames.drain(..start);

    if frames.len() > max_depth || !exhausted {
        tracing::trace!(max_depth, "stack trace truncated");
    }
    frames.truncate(max_depth);

    StackTrace(frames)
}

/// Walks raw frames, one `StackFrame` per resolved symbol so inlined calls stay visible.
/// Returns the frames and whether the walk reached the bottom of the stack.
fn collect(limit: usize) -> (Vec<StackFrame>, bool) {
    let mut frames = Vec::with_capacity(limit.min(128));
    let mut exhausted = true;

    backtrace::trace(|raw| {
        if frames.len() >= limit {
            exhausted = false;
            return false;
        }

        let mut resolved = false;
        backtrace::resolve_frame(raw, |symbol| {
            resolved = true;
            frames.push(StackFrame::from_symbol(symbol));
        });

        if !resolved {
            tracing::trace!(ip = ?raw.ip(), "unresolvable stack frame");
            frames.push(StackFrame::unknown());
        }
        true
    });

    frames.truncate(limit);
    (frames, exhausted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_display_short_and_full() {
        let frame = StackFrame::new("app::handler::run", "/srv/app/src/handler.rs", 42);

        assert_eq!(frame.to_string(), "handler.rs:42");
        assert_eq!(
            format!("{frame:#}"),
            "app::handler::run\n\t/srv/app/src/handler.rs:42"
        );
    }

    #[test]
    fn unknown_frame_uses_sentinels() {
        let frame = StackFrame::unknown();
        assert_eq!(frame.func(), "unknown");
        assert_eq!(frame.file(), "unknown");
        assert_eq!(frame.line(), 0);
        assert_eq!(frame.base_name(), "unknown");
    }

    #[test]
    fn trace_display_prefixes_each_frame() {
        let trace: StackTrace = vec![
            StackFrame::new("a::one", "/x/one.rs", 1),
            StackFrame::new("a::two", "/x/two.rs", 2),
        ]
        .into();

        assert_eq!(trace.to_string(), "\none.rs:1\ntwo.rs:2");
        assert_eq!(
            format!("{trace:#}"),
            "\na::one\n\t/x/one.rs:1\na::two\n\t/x/two.rs:2"
        );
        assert_eq!(StackTrace::default().to_string(), "");
    }

    #[test]
    fn capture_omits_internal_frames() {
        let trace = capture();

        assert!(!trace.is_empty());
        assert!(trace.len() <= config::settings().max_depth);
        assert!(trace
            .iter()
            .all(|frame| !frame.func().contains("errs::stack::capture")));
    }

    #[test]
    fn serializes_frame_fields() {
        let frame = StackFrame::new("f", "/a/b.rs", 7);
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json, serde_json::json!({"func": "f", "file": "/a/b.rs", "line": 7}));
    }
}
