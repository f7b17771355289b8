//! The enriched error type
//!
//! [`Error`] carries an optional message, an optional shared cause, a map of
//! diagnostic attributes and, for the first enriched error in a chain, a captured
//! call stack. Attributes merge through the whole cause chain, including through
//! foreign error types that expose their cause via [`std::error::Error::source`].

use serde_json::Value;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::chain;
use crate::interop::into_cause;
use crate::render::Verbose;
use crate::stack::{self, StackTrace, EMPTY_STACK};

/// Owned, type-erased error accepted as a cause.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Shared handle to a cause. Other code may hold clones of the same cause.
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

/// Attribute map. Values are JSON values so that every attribute stays encodable.
pub type Values = serde_json::Map<String, Value>;

/// Message of a wrapping node created without message parts.
const WRAP_MESSAGE: &str = "wrap";

/// Error enriched with attributes and a call stack.
///
/// # Concurrency
///
/// Attribute mutation ([`with`](Self::with), [`insert`](Self::insert)) needs
/// ownership or `&mut`; an instance shared between threads must be guarded by
/// the caller (e.g. `Mutex<Error>`). All read accessors are safe to call
/// concurrently.
///
/// # Example
///
/// ```rust
/// use errs::Error;
///
/// let err = Error::new("record not found").with("id", 42);
/// let err = errs::wrap!(err, "load user");
///
/// assert_eq!(err.to_string(), "load user: record not found");
/// assert_eq!(err.values()["id"], 42);
/// assert!(!err.stack_trace().is_empty());
/// ```
pub struct Error {
    message: String,
    cause: Option<Cause>,
    values: Values,
    stack: Option<StackTrace>,
}

impl Error {
    /// Creates an error with the given message and captures the call stack.
    pub fn new(message: impl Into<String>) -> Self {
        Self::build(message.into(), None, false)
    }

    /// Wraps `cause` without adding a message.
    ///
    /// When `cause` is already an [`Error`] and a stack exists somewhere in its
    /// chain, the cause is returned as is. A `Box<Error>` and, with the `anyhow`
    /// feature, an `anyhow::Error` holding an [`Error`] count as that [`Error`].
    pub fn wrap(cause: impl Into<BoxError> + 'static) -> Self {
        Self::wrap_with(cause, std::iter::empty::<&str>())
    }

    /// Wraps `cause`, joining `parts` with `": "` into the new message.
    ///
    /// A stack is captured only when no [`Error`] in the cause chain carries one.
    /// With no parts the message defaults to `"wrap"`, unless the short-circuit
    /// described on [`wrap`](Self::wrap) applies.
    pub fn wrap_with<I>(cause: impl Into<BoxError> + 'static, parts: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let cause = into_cause(cause);
        let have_stack = chain::has_stack_trace(&*cause);
        let parts: Vec<String> = parts.into_iter().map(|part| part.to_string()).collect();

        let cause = if parts.is_empty() && have_stack {
            match cause.downcast::<Error>() {
                Ok(err) => return *err,
                Err(other) => other,
            }
        } else {
            cause
        };

        Self::build(compose(parts), Some(Arc::from(cause)), have_stack)
    }

    /// Wraps a cause that is shared with other code.
    ///
    /// The shared cause cannot be handed back unchanged, so where [`wrap`](Self::wrap)
    /// would short-circuit this creates a forwarding node with an empty message.
    /// Its rendering, values and stack are those of the cause.
    pub fn wrap_shared<I>(cause: Cause, parts: I) -> Self
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let have_stack = chain::has_stack_trace(&*cause);
        let parts: Vec<String> = parts.into_iter().map(|part| part.to_string()).collect();

        let message = if parts.is_empty() && have_stack && cause.is::<Error>() {
            String::new()
        } else {
            compose(parts)
        };

        Self::build(message, Some(cause), have_stack)
    }

    /// Wraps an optional cause.
    ///
    /// # Panics
    ///
    /// Panics when `cause` is `None`: wrapping nothing is a caller bug.
    pub fn wrap_some<E, I>(cause: Option<E>, parts: I) -> Self
    where
        E: Into<BoxError> + 'static,
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        match cause {
            Some(cause) => Self::wrap_with(cause, parts),
            None => panic!("nil error"),
        }
    }

    /// Builds a node around `cause` with an explicit (possibly empty) message.
    pub(crate) fn with_cause(message: String, cause: BoxError) -> Self {
        let have_stack = chain::has_stack_trace(&*cause);
        Self::build(message, Some(Arc::from(cause)), have_stack)
    }

    /// Rebuilds a detached error from its rendered parts. The cause is not restored.
    pub(crate) fn from_parts(message: String, values: Values, stack: StackTrace) -> Self {
        Self {
            message,
            cause: None,
            values,
            stack: if stack.is_empty() { None } else { Some(stack) },
        }
    }

    fn build(message: String, cause: Option<Cause>, have_stack: bool) -> Self {
        let stack = if have_stack {
            None
        } else {
            Some(stack::capture())
        };

        Self {
            message,
            cause,
            values: Values::new(),
            stack,
        }
    }

    /// Sets an attribute on this node and returns it, so calls can be chained.
    /// An existing value for `key` is replaced.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// In-place form of [`with`](Self::with).
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// This node's own message, without the cause's text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped cause, if any.
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Attributes set on this node only.
    pub fn own_values(&self) -> &Values {
        &self.values
    }

    /// Stack captured by this node itself, if it captured one.
    pub fn own_stack(&self) -> Option<&StackTrace> {
        self.stack.as_ref()
    }

    /// Attributes merged across the cause chain.
    ///
    /// The nearest [`Error`] below this one supplies its own merged values as the
    /// base; foreign errors in between are looked through. This node's attributes
    /// are laid over the base, so the outermost value for a key wins.
    pub fn values(&self) -> Values {
        let mut merged = self
            .source()
            .and_then(chain::find_error)
            .map(Error::values)
            .unwrap_or_default();

        for (key, value) in &self.values {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    /// The nearest captured stack, searching this node first and then its causes.
    /// Empty when no error in the chain captured one.
    pub fn stack_trace(&self) -> &StackTrace {
        chain::nearest_stack(self).unwrap_or(&EMPTY_STACK)
    }

    /// Display adapter for the verbose form with an explicit frame path style.
    pub fn verbose(&self, paths: crate::render::FramePaths) -> Verbose<'_> {
        Verbose::new(self, paths)
    }
}

fn compose(parts: Vec<String>) -> String {
    if parts.is_empty() {
        WRAP_MESSAGE.to_string()
    } else {
        parts.join(": ")
    }
}

/// `{}` renders the composed message; `{:#}` renders the verbose form.
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return fmt::Display::fmt(
                &Verbose::new(self, crate::config::settings().frame_paths),
                f,
            );
        }

        match &self.cause {
            None => f.write_str(&self.message),
            Some(cause) if self.message.is_empty() => write!(f, "{cause}"),
            Some(cause) => write!(f, "{}: {cause}", self.message),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn StdError + 'static))
    }
}
