//! Bridges from host failures into outcomes.
//!
//! Rust code reports recoverable errors with `Result` and defects with panics.
//! These adapters run a computation and turn either kind of host failure into a
//! modeled [`Failure`](Outcome::Failure) through a caller-supplied conversion. They
//! are the only place the crate crosses from one channel to the other.
//!
//! ```rust
//! use outcome::{Outcome, boundary::from_fallible};
//!
//! let r: Outcome<i32, String> = from_fallible(|| "4x".parse::<i32>(), |e| format!("parse_error: {e}"));
//! assert_eq!(r, Outcome::Failure("parse_error: invalid digit found in string".to_string()));
//! ```

use std::{
    any::{Any, type_name},
    future::{Future, IntoFuture, poll_fn},
    panic::{self, AssertUnwindSafe},
    pin::pin,
    task::Poll,
};

use thiserror::Error;
use tracing::{debug, trace};

use crate::outcome::Outcome;

/// A panic captured by [`from_panicking`] or [`from_panicking_future`].
///
/// Keeps the panic message when the payload was a string, which is the case for
/// every `panic!` with a format string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("computation panicked: {message}")]
pub struct Panic {
    message: String,
}

impl Panic {
    fn from_payload(payload: Box<dyn Any + Send>) -> Self {
        let message = match payload.downcast::<String>() {
            Ok(message) => *message,
            Err(payload) => match payload.downcast_ref::<&'static str>() {
                Some(message) => (*message).to_string(),
                None => "Box<dyn Any>".to_string(),
            },
        };
        Panic { message }
    }

    /// The panic message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Runs `f`, mapping `Ok` to a success and `Err` to a failure built by `convert`.
pub fn from_fallible<T, X, E, F, C>(f: F, convert: C) -> Outcome<T, E>
where
    F: FnOnce() -> Result<T, X>,
    C: FnOnce(X) -> E,
{
    convert_result(f(), convert)
}

/// Runs `f`, capturing a panic and handing it to `convert` as a [`Panic`].
///
/// The panic hook still runs, so the message is printed as usual.
pub fn from_panicking<T, E, F, C>(f: F, convert: C) -> Outcome<T, E>
where
    F: FnOnce() -> T,
    C: FnOnce(Panic) -> E,
{
    convert_panic(panic::catch_unwind(AssertUnwindSafe(f)), convert)
}

/// Awaits a fallible future, mapping `Ok` to a success and `Err` through `convert`.
pub async fn from_fallible_future<D, T, X, E, C>(deferred: D, convert: C) -> Outcome<T, E>
where
    D: IntoFuture<Output = Result<T, X>>,
    C: FnOnce(X) -> E,
{
    convert_result(deferred.await, convert)
}

/// Awaits `deferred`, capturing a panic raised while polling it.
pub async fn from_panicking_future<D, T, E, C>(deferred: D, convert: C) -> Outcome<T, E>
where
    D: IntoFuture<Output = T>,
    C: FnOnce(Panic) -> E,
{
    let mut pending = pin!(deferred.into_future());
    let caught = poll_fn(|cx| {
        match panic::catch_unwind(AssertUnwindSafe(|| pending.as_mut().poll(cx))) {
            Ok(Poll::Ready(value)) => Poll::Ready(Ok(value)),
            Ok(Poll::Pending) => Poll::Pending,
            Err(payload) => Poll::Ready(Err(payload)),
        }
    })
    .await;
    convert_panic(caught, convert)
}

fn convert_result<T, X, E, C>(result: Result<T, X>, convert: C) -> Outcome<T, E>
where
    C: FnOnce(X) -> E,
{
    match result {
        Ok(value) => Outcome::Success(value),
        Err(error) => {
            trace!(error_type = type_name::<X>(), "converting host error into a failure");
            Outcome::Failure(convert(error))
        }
    }
}

fn convert_panic<T, E, C>(caught: Result<T, Box<dyn Any + Send>>, convert: C) -> Outcome<T, E>
where
    C: FnOnce(Panic) -> E,
{
    match caught {
        Ok(value) => Outcome::Success(value),
        Err(payload) => {
            let panic = Panic::from_payload(payload);
            debug!(message = %panic.message, "captured panic at the outcome boundary");
            Outcome::Failure(convert(panic))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Variant, test_util::{Yield, block_on}, variants};

    variants! {
        #[derive(Debug, Clone, PartialEq)]
        enum DecodeError: DecodeErrorCases {
            parse_error => ParseError(String),
            crashed => Crashed(String),
        }
    }

    #[test]
    fn test_from_fallible_converts_host_error() {
        let r: Outcome<serde_json::Value, DecodeError> =
            from_fallible(|| serde_json::from_str("bad"), |e| DecodeError::ParseError(e.to_string()));
        assert_eq!(r.tag(), Some("parse_error"));

        let r: Outcome<u8, DecodeError> = from_fallible(|| "7".parse::<u8>(), |e| DecodeError::ParseError(e.to_string()));
        assert_eq!(r, Outcome::Success(7));
    }

    #[test]
    fn test_from_panicking_captures_message() {
        let r: Outcome<u8, DecodeError> =
            from_panicking(|| panic!("index {} out of range", 9), |p| DecodeError::Crashed(p.message().to_string()));
        assert_eq!(r, Outcome::Failure(DecodeError::Crashed("index 9 out of range".to_string())));

        let r: Outcome<u8, Panic> = from_panicking(|| panic!("static message"), |p| p);
        let panic = r.failure_value().unwrap();
        assert_eq!(panic.message(), "static message");
        assert_eq!(panic.to_string(), "computation panicked: static message");
    }

    #[test]
    fn test_from_panicking_passes_value_through() {
        let r: Outcome<u8, Panic> = from_panicking(|| 5, |p| p);
        assert_eq!(r, Outcome::Success(5));
    }

    #[test]
    fn test_from_fallible_future() {
        let r: Outcome<u16, DecodeError> = block_on(from_fallible_future(
            async {
                Yield::once().await;
                "65536".parse::<u16>()
            },
            |e| DecodeError::ParseError(e.to_string()),
        ));
        assert_eq!(DecodeError::TAGS[0], r.tag().unwrap());
    }

    #[test]
    fn test_from_panicking_future_captures_panic_after_suspension() {
        let r: Outcome<u8, DecodeError> = block_on(from_panicking_future(
            async {
                Yield::once().await;
                panic!("socket closed")
            },
            |p| DecodeError::Crashed(p.message().to_string()),
        ));
        assert_eq!(r, Outcome::Failure(DecodeError::Crashed("socket closed".to_string())));

        let r: Outcome<u8, Panic> = block_on(from_panicking_future(async { 3 }, |p| p));
        assert_eq!(r, Outcome::Success(3));
    }
}
