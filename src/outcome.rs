//! The two-shape value at the center of the crate.
//!
//! An [`Outcome`] is either a [`Success`](Outcome::Success) carrying a value or a
//! [`Failure`](Outcome::Failure) carrying an error drawn from a closed domain. Error
//! domains are usually declared with [`variants!`](crate::variants), which gives every
//! failure a tag and a per-tag detail payload.
//!
//! The combinators that operate on outcomes live in [`algebra`](crate::algebra)
//! (immediate values) and [`deferred`](crate::deferred) (futures). This module only
//! holds construction, inspection, and conversion.

use std::future::{IntoFuture, Ready, ready};

use either::Either;

use crate::{pipe::Pipe, variant::Variant};

/// Result of a fallible operation: a success value or a typed failure.
///
/// The discriminant is fixed at construction and decides which payload exists;
/// there is no placeholder for the other side.
///
/// # Examples
///
/// ```rust
/// use outcome::Outcome;
///
/// let ok: Outcome<i32, String> = Outcome::success(42);
/// let failed: Outcome<i32, String> = Outcome::failure("boom".to_string());
///
/// assert!(ok.is_success());
/// assert_eq!(failed.failure_value(), Some("boom".to_string()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[must_use = "this `Outcome` may be a `Failure`, which should be handled"]
pub enum Outcome<V, E> {
    /// The operation produced a value
    Success(V),
    /// The operation failed with a modeled error
    Failure(E),
}

impl<V, E> Outcome<V, E> {
    /// Wraps `value` verbatim as a success.
    #[inline]
    pub const fn success(value: V) -> Self {
        Outcome::Success(value)
    }

    /// Wraps `error` as a failure.
    ///
    /// With a [`variants!`](crate::variants) domain the variant is the tag and its
    /// field is the detail, so `Outcome::failure(ParseError::Negative(-3))` is the
    /// failure tagged `negative` with detail `-3`.
    #[inline]
    pub const fn failure(error: E) -> Self {
        Outcome::Failure(error)
    }

    /// Returns `true` if the outcome is `Success`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::Outcome;
    ///
    /// let x: Outcome<i32, &str> = Outcome::Success(2);
    /// assert!(x.is_success());
    ///
    /// let y: Outcome<i32, &str> = Outcome::Failure("nope");
    /// assert!(!y.is_success());
    /// ```
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns `true` if the outcome is `Failure`.
    #[inline]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    /// Converts from `Outcome<V, E>` to `Option<V>`, discarding the failure, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::Outcome;
    ///
    /// let x: Outcome<i32, &str> = Outcome::Success(2);
    /// assert_eq!(x.success_value(), Some(2));
    ///
    /// let y: Outcome<i32, &str> = Outcome::Failure("nope");
    /// assert_eq!(y.success_value(), None);
    /// ```
    #[inline]
    pub fn success_value(self) -> Option<V> {
        match self {
            Outcome::Success(v) => Some(v),
            Outcome::Failure(_) => None,
        }
    }

    /// Converts from `Outcome<V, E>` to `Option<E>`, discarding the success value, if any.
    #[inline]
    pub fn failure_value(self) -> Option<E> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(e) => Some(e),
        }
    }

    /// Converts from `&Outcome<V, E>` to `Outcome<&V, &E>`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use outcome::Outcome;
    ///
    /// let x: Outcome<String, u8> = Outcome::Success("hi".to_string());
    /// assert_eq!(x.as_ref(), Outcome::Success(&"hi".to_string()));
    /// ```
    #[inline]
    pub const fn as_ref(&self) -> Outcome<&V, &E> {
        match self {
            Outcome::Success(v) => Outcome::Success(v),
            Outcome::Failure(e) => Outcome::Failure(e),
        }
    }

    /// Converts from `&mut Outcome<V, E>` to `Outcome<&mut V, &mut E>`.
    #[inline]
    pub fn as_mut(&mut self) -> Outcome<&mut V, &mut E> {
        match self {
            Outcome::Success(v) => Outcome::Success(v),
            Outcome::Failure(e) => Outcome::Failure(e),
        }
    }

    /// Returns `true` if the outcome is a `Success` holding a value equal to `value`.
    #[inline]
    pub fn contains<U>(&self, value: &U) -> bool
    where
        U: PartialEq<V>,
    {
        matches!(self, Outcome::Success(v) if value == v)
    }

    /// Returns `true` if the outcome is a `Failure` holding an error equal to `error`.
    #[inline]
    pub fn contains_err<U>(&self, error: &U) -> bool
    where
        U: PartialEq<E>,
    {
        matches!(self, Outcome::Failure(e) if error == e)
    }

    /// Converts into the standard library's `Result`, so `?` can be used at the edge.
    #[inline]
    pub fn into_result(self) -> Result<V, E> {
        match self {
            Outcome::Success(v) => Ok(v),
            Outcome::Failure(e) => Err(e),
        }
    }

    /// Converts into an [`Either`] with the failure on the left.
    #[inline]
    pub fn into_either(self) -> Either<E, V> {
        match self {
            Outcome::Success(v) => Either::Right(v),
            Outcome::Failure(e) => Either::Left(e),
        }
    }

    /// Starts a fluent chain over this outcome.
    ///
    /// ```rust
    /// use outcome::Outcome;
    ///
    /// let doubled = Outcome::<i32, String>::success(21).pipe().map(|n| n * 2).unwrap();
    /// assert_eq!(doubled, 42);
    /// ```
    #[inline]
    pub fn pipe(self) -> Pipe<V, E> {
        Pipe::new(self)
    }
}

impl<V, E: Variant> Outcome<V, E> {
    /// Returns the failure tag, or `None` for a success.
    ///
    /// ```rust
    /// use outcome::{Outcome, variants};
    ///
    /// variants! {
    ///     #[derive(Debug)]
    ///     pub enum LookupError: LookupErrorCases {
    ///         missing => Missing,
    ///     }
    /// }
    ///
    /// let r: Outcome<u8, LookupError> = Outcome::failure(LookupError::Missing);
    /// assert_eq!(r.tag(), Some("missing"));
    /// ```
    #[inline]
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure(e) => Some(e.tag()),
        }
    }
}

impl<V: Copy, E> Outcome<&V, E> {
    /// Maps an `Outcome<&V, E>` to an `Outcome<V, E>` by copying the success value.
    #[inline]
    pub fn copied(self) -> Outcome<V, E> {
        match self {
            Outcome::Success(v) => Outcome::Success(*v),
            Outcome::Failure(e) => Outcome::Failure(e),
        }
    }
}

impl<V: Clone, E> Outcome<&V, E> {
    /// Maps an `Outcome<&V, E>` to an `Outcome<V, E>` by cloning the success value.
    #[inline]
    pub fn cloned(self) -> Outcome<V, E> {
        match self {
            Outcome::Success(v) => Outcome::Success(v.clone()),
            Outcome::Failure(e) => Outcome::Failure(e),
        }
    }
}

impl<V, E> From<Result<V, E>> for Outcome<V, E> {
    #[inline]
    fn from(result: Result<V, E>) -> Self {
        match result {
            Ok(v) => Outcome::Success(v),
            Err(e) => Outcome::Failure(e),
        }
    }
}

impl<V, E> From<Outcome<V, E>> for Result<V, E> {
    #[inline]
    fn from(outcome: Outcome<V, E>) -> Self {
        outcome.into_result()
    }
}

impl<V, E> From<Either<E, V>> for Outcome<V, E> {
    #[inline]
    fn from(either: Either<E, V>) -> Self {
        match either {
            Either::Left(e) => Outcome::Failure(e),
            Either::Right(v) => Outcome::Success(v),
        }
    }
}

/// An outcome is a deferred outcome that has already resolved.
///
/// This lets every [`deferred`](crate::deferred) combinator accept plain outcomes,
/// and lets `and_then`/`or_else` callbacks return either an outcome or a future of one.
impl<V, E> IntoFuture for Outcome<V, E> {
    type Output = Self;
    type IntoFuture = Ready<Self>;

    #[inline]
    fn into_future(self) -> Self::IntoFuture {
        ready(self)
    }
}
