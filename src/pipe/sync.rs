use std::{fmt, future::Ready};

use super::AsyncPipe;
use crate::{algebra, dispatch, outcome::Outcome, variant::Cases};

/// A fluent chain over an immediate [`Outcome`].
///
/// Each method hands the current outcome to the matching [`algebra`] function and
/// wraps the result. The pipe holds nothing but that outcome, so cloning it and
/// calling the same method twice gives equal results.
///
/// # Examples
///
/// ```rust
/// use outcome::{Outcome, pipe::pipe};
///
/// let r: Outcome<i32, String> = Outcome::failure("abc".to_string());
/// assert_eq!(pipe(r).map(|n| n * 2).unwrap_or(0), 0);
///
/// let r: Outcome<i32, String> = Outcome::success(21);
/// assert_eq!(pipe(r).map(|n| n * 2).unwrap(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[must_use = "a pipe does nothing until its outcome is extracted"]
pub struct Pipe<V, E> {
    outcome: Outcome<V, E>,
}

/// Starts a fluent chain over `outcome`.
#[inline]
pub fn pipe<V, E>(outcome: Outcome<V, E>) -> Pipe<V, E> {
    Pipe::new(outcome)
}

impl<V, E> Pipe<V, E> {
    /// Wraps `outcome`.
    #[inline]
    pub const fn new(outcome: Outcome<V, E>) -> Self {
        Pipe { outcome }
    }

    /// Borrows the current outcome.
    #[inline]
    pub const fn outcome(&self) -> &Outcome<V, E> {
        &self.outcome
    }

    /// Ends the chain, returning the current outcome.
    #[inline]
    pub fn into_outcome(self) -> Outcome<V, E> {
        self.outcome
    }

    /// Continues the chain in async context.
    #[inline]
    pub fn into_async(self) -> AsyncPipe<Ready<Outcome<V, E>>> {
        super::pipe_async(self.outcome)
    }

    /// See [`algebra::and`].
    #[inline]
    pub fn and<U>(self, other: Outcome<U, E>) -> Pipe<U, E> {
        Pipe::new(algebra::and(self.outcome, other))
    }

    /// See [`algebra::and_then`].
    #[inline]
    pub fn and_then<U, F>(self, f: F) -> Pipe<U, E>
    where
        F: FnOnce(V) -> Outcome<U, E>,
    {
        Pipe::new(algebra::and_then(self.outcome, f))
    }

    /// See [`algebra::or`].
    #[inline]
    pub fn or<E2>(self, other: Outcome<V, E2>) -> Pipe<V, E2> {
        Pipe::new(algebra::or(self.outcome, other))
    }

    /// See [`algebra::or_else`].
    #[inline]
    pub fn or_else<E2, F>(self, f: F) -> Pipe<V, E2>
    where
        F: FnOnce(E) -> Outcome<V, E2>,
    {
        Pipe::new(algebra::or_else(self.outcome, f))
    }

    /// See [`algebra::map`].
    #[inline]
    pub fn map<U, F>(self, f: F) -> Pipe<U, E>
    where
        F: FnOnce(V) -> U,
    {
        Pipe::new(algebra::map(self.outcome, f))
    }

    /// See [`algebra::map_err`].
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Pipe<V, E2>
    where
        F: FnOnce(E) -> E2,
    {
        Pipe::new(algebra::map_err(self.outcome, f))
    }

    /// See [`algebra::inspect`].
    #[inline]
    pub fn inspect<F>(self, f: F) -> Self
    where
        F: FnOnce(&V),
    {
        Pipe::new(algebra::inspect(self.outcome, f))
    }

    /// See [`algebra::inspect_err`].
    #[inline]
    pub fn inspect_err<F>(self, f: F) -> Self
    where
        F: FnOnce(&E),
    {
        Pipe::new(algebra::inspect_err(self.outcome, f))
    }

    /// See [`algebra::map_or`].
    #[inline]
    pub fn map_or<U, F>(self, default: U, f: F) -> U
    where
        F: FnOnce(V) -> U,
    {
        algebra::map_or(self.outcome, default, f)
    }

    /// See [`algebra::map_or_else`].
    #[inline]
    pub fn map_or_else<U, D, F>(self, default: D, f: F) -> U
    where
        D: FnOnce(E) -> U,
        F: FnOnce(V) -> U,
    {
        algebra::map_or_else(self.outcome, default, f)
    }

    /// See [`algebra::is_ok`].
    #[inline]
    pub const fn is_ok(&self) -> bool {
        algebra::is_ok(&self.outcome)
    }

    /// See [`algebra::is_err`].
    #[inline]
    pub const fn is_err(&self) -> bool {
        algebra::is_err(&self.outcome)
    }

    /// See [`algebra::is_ok_and`].
    #[inline]
    pub fn is_ok_and<F>(self, f: F) -> bool
    where
        F: FnOnce(V) -> bool,
    {
        algebra::is_ok_and(self.outcome, f)
    }

    /// See [`algebra::is_err_and`].
    #[inline]
    pub fn is_err_and<F>(self, f: F) -> bool
    where
        F: FnOnce(E) -> bool,
    {
        algebra::is_err_and(self.outcome, f)
    }

    /// See [`algebra::unwrap`].
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a `Failure`.
    #[inline]
    #[track_caller]
    pub fn unwrap(self) -> V
    where
        E: fmt::Debug,
    {
        algebra::unwrap(self.outcome)
    }

    /// See [`algebra::unwrap_err`].
    ///
    /// # Panics
    ///
    /// Panics if the outcome is a `Success`.
    #[inline]
    #[track_caller]
    pub fn unwrap_err(self) -> E {
        algebra::unwrap_err(self.outcome)
    }

    /// See [`algebra::expect`].
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the outcome is a `Failure`.
    #[inline]
    #[track_caller]
    pub fn expect(self, msg: &str) -> V
    where
        E: fmt::Debug,
    {
        algebra::expect(self.outcome, msg)
    }

    /// See [`algebra::expect_err`].
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the outcome is a `Success`.
    #[inline]
    #[track_caller]
    pub fn expect_err(self, msg: &str) -> E {
        algebra::expect_err(self.outcome, msg)
    }

    /// See [`algebra::unwrap_or`].
    #[inline]
    pub fn unwrap_or(self, default: V) -> V {
        algebra::unwrap_or(self.outcome, default)
    }

    /// See [`algebra::unwrap_or_else`].
    #[inline]
    pub fn unwrap_or_else<F>(self, f: F) -> V
    where
        F: FnOnce(E) -> V,
    {
        algebra::unwrap_or_else(self.outcome, f)
    }

    /// See [`algebra::ok`].
    #[inline]
    pub fn ok(self) -> Option<V> {
        algebra::ok(self.outcome)
    }

    /// See [`algebra::err`].
    #[inline]
    pub fn err(self) -> Option<E> {
        algebra::err(self.outcome)
    }

    /// See [`dispatch::match_outcome`].
    #[inline]
    pub fn match_with<R, S, F>(self, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(V) -> R,
        F: FnOnce(E) -> R,
    {
        dispatch::match_outcome(self.outcome, on_success, on_failure)
    }

    /// See [`dispatch::match_nested`].
    #[inline]
    pub fn match_nested<R, S, C>(self, on_success: S, cases: C) -> R
    where
        S: FnOnce(V) -> R,
        C: Cases<E, R>,
    {
        dispatch::match_nested(self.outcome, on_success, cases)
    }
}

impl<V, E> Pipe<Outcome<V, E>, E> {
    /// See [`algebra::flatten`].
    #[inline]
    pub fn flatten(self) -> Pipe<V, E> {
        Pipe::new(algebra::flatten(self.outcome))
    }
}

impl<V, E> From<Outcome<V, E>> for Pipe<V, E> {
    fn from(outcome: Outcome<V, E>) -> Self {
        Pipe::new(outcome)
    }
}

impl<V, E> From<Pipe<V, E>> for Outcome<V, E> {
    fn from(pipe: Pipe<V, E>) -> Self {
        pipe.outcome
    }
}
