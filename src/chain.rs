//! Cause-chain inspection
//!
//! Everything here is written against [`std::error::Error::source`], so chains may
//! freely mix [`Error`] with foreign error types. [`matches`] and [`extract`] are the
//! identity-match and type-extraction predicates; they additionally consult the
//! crate's own interposing wrappers (see [`string`](crate::string)), which match
//! on behalf of a value they carry rather than on their own type.

use std::any::Any;
use std::error::Error as StdError;

use crate::error::Error;
use crate::stack::StackTrace;
use crate::string::SentinelCause;

/// Hook for wrappers that answer identity/type queries for a value they carry.
pub(crate) trait Interpose {
    /// Whether `target` is the value this wrapper stands for.
    fn is_match(&self, target: &dyn Any) -> bool;

    /// The carried value offered to type extraction.
    fn carried(&self) -> &dyn Any;
}

fn interposer<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a dyn Interpose> {
    err.downcast_ref::<SentinelCause>()
        .map(|wrapper| wrapper as &dyn Interpose)
}

/// Iterator over an error and its causes, outermost first.
#[derive(Clone)]
pub struct Iter<'a> {
    next: Option<&'a (dyn StdError + 'static)>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.source();
        Some(current)
    }
}

/// Walks `err` and then each successive `source()`.
pub fn iter<'a>(err: &'a (dyn StdError + 'static)) -> Iter<'a> {
    Iter { next: Some(err) }
}

/// The first error of type `T` in the chain, `err` included.
pub fn find<'a, T>(err: &'a (dyn StdError + 'static)) -> Option<&'a T>
where
    T: StdError + 'static,
{
    iter(err).find_map(|link| link.downcast_ref::<T>())
}

/// The nearest enriched [`Error`] in the chain, `err` included.
pub fn find_error<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a Error> {
    find::<Error>(err)
}

/// The nearest non-empty stack captured by an [`Error`] in the chain.
pub fn nearest_stack<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a StackTrace> {
    iter(err)
        .filter_map(|link| link.downcast_ref::<Error>())
        .find_map(|enriched| enriched.own_stack().filter(|stack| !stack.is_empty()))
}

/// Whether some [`Error`] in the chain already captured a stack.
pub fn has_stack_trace(err: &(dyn StdError + 'static)) -> bool {
    nearest_stack(err).is_some()
}

/// Identity match: whether a value equal to `target` appears anywhere in the chain.
///
/// ```rust
/// use errs::{chain, StringError};
///
/// const ERR_NOT_FOUND: StringError = StringError::new("not found");
///
/// let io = std::io::Error::other("disk");
/// let err = ERR_NOT_FOUND.wrap(io);
/// assert!(chain::matches(&err, &ERR_NOT_FOUND));
/// ```
pub fn matches<T>(err: &(dyn StdError + 'static), target: &T) -> bool
where
    T: StdError + PartialEq + 'static,
{
    iter(err).any(|link| {
        link.downcast_ref::<T>() == Some(target)
            || interposer(link).is_some_and(|hook| hook.is_match(target))
    })
}

/// Type extraction: the first value of type `T` the chain yields.
///
/// Unlike [`find`], an interposing wrapper contributes the value it carries.
pub fn extract<'a, T>(err: &'a (dyn StdError + 'static)) -> Option<&'a T>
where
    T: StdError + 'static,
{
    iter(err).find_map(|link| {
        link.downcast_ref::<T>()
            .or_else(|| interposer(link).and_then(|hook| hook.carried().downcast_ref::<T>()))
    })
}
