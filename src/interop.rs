//! Cause conversion
//!
//! Some containers hide the error they hold from `source()` once boxed: a
//! `Box<Error>` boxed again forwards straight to the inner cause, and a bare
//! `anyhow::Error` converts into a box that does the same. Both are unpacked here
//! so that the enriched [`Error`] stays the outermost link of the cause.

use std::any::Any;

use crate::error::{BoxError, Error};

/// Boxes `cause`, unpacking containers that would otherwise hide an [`Error`].
pub(crate) fn into_cause<E>(cause: E) -> BoxError
where
    E: Into<BoxError> + 'static,
{
    let mut slot = Some(cause);
    let any: &mut dyn Any = &mut slot;

    if let Some(err) = any
        .downcast_mut::<Option<Box<Error>>>()
        .and_then(Option::take)
    {
        return err;
    }
    if let Some(cause) = take_anyhow(any) {
        return cause;
    }

    match slot {
        Some(cause) => cause.into(),
        None => Box::from(String::new()),
    }
}

#[cfg(feature = "anyhow")]
fn take_anyhow(any: &mut dyn Any) -> Option<BoxError> {
    any.downcast_mut::<Option<anyhow::Error>>()
        .and_then(Option::take)
        .map(unpack_anyhow)
}

#[cfg(not(feature = "anyhow"))]
fn take_anyhow(_: &mut dyn Any) -> Option<BoxError> {
    None
}

/// Only an [`Error`] held directly is taken out. Context layers already expose
/// the error they wrap through `source()` and are kept as they are.
#[cfg(feature = "anyhow")]
fn unpack_anyhow(err: anyhow::Error) -> BoxError {
    let direct = err.chain().next().is_some_and(|link| link.is::<Error>());
    if !direct {
        return err.into();
    }

    match err.downcast::<Error>() {
        Ok(inner) => Box::new(inner),
        Err(err) => err.into(),
    }
}
