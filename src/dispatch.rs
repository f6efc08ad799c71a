//! Terminal pattern dispatch.
//!
//! [`match_outcome`] reduces an outcome with one handler per branch.
//! [`match_nested`] goes one step further and routes a failure to the handler for
//! its tag, using the handler struct generated by [`variants!`](crate::variants):
//!
//! ```rust
//! use outcome::{Outcome, dispatch::match_nested, variants};
//!
//! variants! {
//!     #[derive(Debug)]
//!     pub enum ParseError: ParseErrorCases {
//!         invalid_number => InvalidNumber(String),
//!         negative => Negative(i64),
//!     }
//! }
//!
//! let r: Outcome<u64, ParseError> = Outcome::failure(ParseError::Negative(-3));
//! let text = match_nested(r, |n| format!("ok:{n}"), ParseErrorCases {
//!     invalid_number: |raw: String| format!("bad:{raw}"),
//!     negative: |n: i64| format!("neg:{n}"),
//! });
//! assert_eq!(text, "neg:-3");
//! ```

use std::future::IntoFuture;

use crate::{algebra, outcome::Outcome, variant::Cases};

/// Calls exactly one of the handlers and returns its result.
#[inline]
pub fn match_outcome<V, E, R, S, F>(outcome: Outcome<V, E>, on_success: S, on_failure: F) -> R
where
    S: FnOnce(V) -> R,
    F: FnOnce(E) -> R,
{
    algebra::map_or_else(outcome, on_failure, on_success)
}

/// Like [`match_outcome`], but a failure is routed to the per-tag handler in `cases`.
#[inline]
pub fn match_nested<V, E, R, S, C>(outcome: Outcome<V, E>, on_success: S, cases: C) -> R
where
    S: FnOnce(V) -> R,
    C: Cases<E, R>,
{
    algebra::map_or_else(outcome, |e| cases.dispatch(e), on_success)
}

/// [`match_outcome`] over a deferred outcome.
pub async fn match_deferred<D, V, E, R, S, F>(deferred: D, on_success: S, on_failure: F) -> R
where
    D: IntoFuture<Output = Outcome<V, E>>,
    S: FnOnce(V) -> R,
    F: FnOnce(E) -> R,
{
    match_outcome(deferred.await, on_success, on_failure)
}

/// [`match_nested`] over a deferred outcome.
pub async fn match_nested_deferred<D, V, E, R, S, C>(deferred: D, on_success: S, cases: C) -> R
where
    D: IntoFuture<Output = Outcome<V, E>>,
    S: FnOnce(V) -> R,
    C: Cases<E, R>,
{
    match_nested(deferred.await, on_success, cases)
}
