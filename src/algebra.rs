//! Combinators over immediate outcomes.
//!
//! Every function here consumes one [`Outcome`] and returns a new one (or a plain
//! value, for the extractors). None of them mutate their input and none of them
//! panic, except the four documented extractors [`unwrap`], [`unwrap_err`],
//! [`expect`] and [`expect_err`].
//!
//! These free functions are the single definition of the outcome laws. The
//! [`deferred`](crate::deferred) module awaits its input and then calls back into
//! this module, and [`Pipe`](crate::pipe::Pipe) is a method-call veneer over it.
//!
//! # Examples
//!
//! ```rust
//! use outcome::{Outcome, algebra};
//!
//! let parsed: Outcome<i32, String> = Outcome::failure("abc".to_string());
//! let doubled = algebra::map(parsed, |n| n * 2);
//! assert_eq!(algebra::unwrap_or(doubled, 0), 0);
//!
//! let doubled = algebra::map(Outcome::<i32, String>::success(21), |n| n * 2);
//! assert_eq!(algebra::unwrap(doubled), 42);
//! ```

use std::fmt;

use crate::outcome::Outcome;

/// Returns `other` if `outcome` is a success, otherwise the failure of `outcome`.
///
/// `other` is evaluated eagerly by the caller; use [`and_then`] to defer it.
#[inline]
pub fn and<V, U, E>(outcome: Outcome<V, E>, other: Outcome<U, E>) -> Outcome<U, E> {
    match outcome {
        Outcome::Success(_) => other,
        Outcome::Failure(e) => Outcome::Failure(e),
    }
}

/// Calls `f` with the success value and returns its outcome; failures pass through.
///
/// # Examples
///
/// ```rust
/// use outcome::{Outcome, algebra};
///
/// fn half(n: i32) -> Outcome<i32, &'static str> {
///     if n % 2 == 0 { Outcome::success(n / 2) } else { Outcome::failure("odd") }
/// }
///
/// assert_eq!(algebra::and_then(Outcome::success(8), half), Outcome::Success(4));
/// assert_eq!(algebra::and_then(Outcome::success(3), half), Outcome::Failure("odd"));
/// ```
#[inline]
pub fn and_then<V, U, E, F>(outcome: Outcome<V, E>, f: F) -> Outcome<U, E>
where
    F: FnOnce(V) -> Outcome<U, E>,
{
    match outcome {
        Outcome::Success(v) => f(v),
        Outcome::Failure(e) => Outcome::Failure(e),
    }
}

/// Returns `outcome` if it is a success, otherwise `other`.
///
/// `other` is evaluated eagerly by the caller; use [`or_else`] to defer it.
#[inline]
pub fn or<V, E, E2>(outcome: Outcome<V, E>, other: Outcome<V, E2>) -> Outcome<V, E2> {
    match outcome {
        Outcome::Success(v) => Outcome::Success(v),
        Outcome::Failure(_) => other,
    }
}

/// Calls `f` with the failure and returns its outcome; successes pass through.
#[inline]
pub fn or_else<V, E, E2, F>(outcome: Outcome<V, E>, f: F) -> Outcome<V, E2>
where
    F: FnOnce(E) -> Outcome<V, E2>,
{
    match outcome {
        Outcome::Success(v) => Outcome::Success(v),
        Outcome::Failure(e) => f(e),
    }
}

/// Maps the success value through `f`, leaving a failure untouched.
#[inline]
pub fn map<V, U, E, F>(outcome: Outcome<V, E>, f: F) -> Outcome<U, E>
where
    F: FnOnce(V) -> U,
{
    match outcome {
        Outcome::Success(v) => Outcome::Success(f(v)),
        Outcome::Failure(e) => Outcome::Failure(e),
    }
}

/// Maps the failure through `f`, leaving a success untouched.
///
/// # Examples
///
/// ```rust
/// use outcome::{Outcome, algebra};
///
/// let r: Outcome<u8, &str> = Outcome::failure("disk");
/// assert_eq!(algebra::map_err(r, str::len), Outcome::Failure(4));
/// ```
#[inline]
pub fn map_err<V, E, E2, F>(outcome: Outcome<V, E>, f: F) -> Outcome<V, E2>
where
    F: FnOnce(E) -> E2,
{
    match outcome {
        Outcome::Success(v) => Outcome::Success(v),
        Outcome::Failure(e) => Outcome::Failure(f(e)),
    }
}

/// Returns `f(value)` for a success, `default` for a failure.
#[inline]
pub fn map_or<V, U, E, F>(outcome: Outcome<V, E>, default: U, f: F) -> U
where
    F: FnOnce(V) -> U,
{
    match outcome {
        Outcome::Success(v) => f(v),
        Outcome::Failure(_) => default,
    }
}

/// Returns `f(value)` for a success, `default(error)` for a failure.
#[inline]
pub fn map_or_else<V, U, E, D, F>(outcome: Outcome<V, E>, default: D, f: F) -> U
where
    D: FnOnce(E) -> U,
    F: FnOnce(V) -> U,
{
    match outcome {
        Outcome::Success(v) => f(v),
        Outcome::Failure(e) => default(e),
    }
}

/// Removes one level of nesting from a success.
///
/// # Examples
///
/// ```rust
/// use outcome::{Outcome, algebra};
///
/// let nested: Outcome<Outcome<i32, &str>, &str> = Outcome::success(Outcome::success(1));
/// assert_eq!(algebra::flatten(nested), Outcome::Success(1));
///
/// let nested: Outcome<Outcome<i32, &str>, &str> = Outcome::success(Outcome::failure("inner"));
/// assert_eq!(algebra::flatten(nested), Outcome::Failure("inner"));
/// ```
#[inline]
pub fn flatten<V, E>(outcome: Outcome<Outcome<V, E>, E>) -> Outcome<V, E> {
    and_then(outcome, |inner| inner)
}

/// Removes one level of nesting from a failure. The dual of [`flatten`].
#[inline]
pub fn flatten_err<V, E>(outcome: Outcome<V, Outcome<V, E>>) -> Outcome<V, E> {
    or_else(outcome, |inner| inner)
}

/// Calls `f` with a reference to the success value and returns `outcome` unchanged.
#[inline]
pub fn inspect<V, E, F>(outcome: Outcome<V, E>, f: F) -> Outcome<V, E>
where
    F: FnOnce(&V),
{
    if let Outcome::Success(v) = &outcome {
        f(v);
    }
    outcome
}

/// Calls `f` with a reference to the failure and returns `outcome` unchanged.
#[inline]
pub fn inspect_err<V, E, F>(outcome: Outcome<V, E>, f: F) -> Outcome<V, E>
where
    F: FnOnce(&E),
{
    if let Outcome::Failure(e) = &outcome {
        f(e);
    }
    outcome
}

/// Returns `true` for a success.
#[inline]
pub const fn is_ok<V, E>(outcome: &Outcome<V, E>) -> bool {
    outcome.is_success()
}

/// Returns `true` for a failure.
#[inline]
pub const fn is_err<V, E>(outcome: &Outcome<V, E>) -> bool {
    outcome.is_failure()
}

/// Returns `true` for a success whose value satisfies `f`.
#[inline]
pub fn is_ok_and<V, E, F>(outcome: Outcome<V, E>, f: F) -> bool
where
    F: FnOnce(V) -> bool,
{
    map_or(outcome, false, f)
}

/// Returns `true` for a failure whose error satisfies `f`.
#[inline]
pub fn is_err_and<V, E, F>(outcome: Outcome<V, E>, f: F) -> bool
where
    F: FnOnce(E) -> bool,
{
    map_or_else(outcome, f, |_| false)
}

/// Returns the success value.
///
/// # Panics
///
/// Panics with the failure's `Debug` rendering if `outcome` is a `Failure`.
///
/// ```should_panic
/// use outcome::{Outcome, algebra};
///
/// let r: Outcome<i32, &str> = Outcome::failure("emergency failure");
/// algebra::unwrap(r); // panics with `emergency failure`
/// ```
#[inline]
#[track_caller]
pub fn unwrap<V, E>(outcome: Outcome<V, E>) -> V
where
    E: fmt::Debug,
{
    match outcome {
        Outcome::Success(v) => v,
        Outcome::Failure(e) => failed("called `Outcome::unwrap()` on a `Failure` value", &e),
    }
}

/// Returns the failure.
///
/// # Panics
///
/// Panics if `outcome` is a `Success`. The success value is not rendered, so no
/// `Debug` bound is needed on `V`.
#[inline]
#[track_caller]
pub fn unwrap_err<V, E>(outcome: Outcome<V, E>) -> E {
    match outcome {
        Outcome::Success(_) => panic!("called `Outcome::unwrap_err()` on a `Success` value"),
        Outcome::Failure(e) => e,
    }
}

/// Returns the success value.
///
/// # Panics
///
/// Panics with `msg` followed by the failure's `Debug` rendering if `outcome` is a `Failure`.
#[inline]
#[track_caller]
pub fn expect<V, E>(outcome: Outcome<V, E>, msg: &str) -> V
where
    E: fmt::Debug,
{
    match outcome {
        Outcome::Success(v) => v,
        Outcome::Failure(e) => failed(msg, &e),
    }
}

/// Returns the failure.
///
/// # Panics
///
/// Panics with `msg` if `outcome` is a `Success`.
#[inline]
#[track_caller]
pub fn expect_err<V, E>(outcome: Outcome<V, E>, msg: &str) -> E {
    match outcome {
        Outcome::Success(_) => panic!("{msg}"),
        Outcome::Failure(e) => e,
    }
}

/// Returns the success value or `default`.
#[inline]
pub fn unwrap_or<V, E>(outcome: Outcome<V, E>, default: V) -> V {
    match outcome {
        Outcome::Success(v) => v,
        Outcome::Failure(_) => default,
    }
}

/// Returns the success value or computes one from the failure.
#[inline]
pub fn unwrap_or_else<V, E, F>(outcome: Outcome<V, E>, f: F) -> V
where
    F: FnOnce(E) -> V,
{
    match outcome {
        Outcome::Success(v) => v,
        Outcome::Failure(e) => f(e),
    }
}

/// Returns the success value, if any.
#[inline]
pub fn ok<V, E>(outcome: Outcome<V, E>) -> Option<V> {
    outcome.success_value()
}

/// Returns the failure, if any.
#[inline]
pub fn err<V, E>(outcome: Outcome<V, E>) -> Option<E> {
    outcome.failure_value()
}

#[cold]
#[inline(never)]
#[track_caller]
fn failed(msg: &str, error: &dyn fmt::Debug) -> ! {
    panic!("{msg}: {error:?}")
}
