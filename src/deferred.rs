//! Combinators over deferred outcomes.
//!
//! A deferred outcome is anything that implements
//! [`IntoFuture<Output = Outcome<V, E>>`](IntoFuture): an `async` block, a hand-written
//! future, or a plain [`Outcome`], which counts as already resolved.
//!
//! Each function mirrors its namesake in [`algebra`] and obeys the same laws. It
//! awaits its input once, hands the resolved outcome to [`algebra`], and, only on
//! the matching branch, awaits the callback's own future. Nothing here spawns,
//! races, or polls two futures at once; an `other` argument that is short-circuited
//! is dropped without ever being polled.
//!
//! Callbacks that return an outcome (`and_then`, `or_else`) may return either an
//! [`Outcome`] or a future of one. Callbacks that return a plain value have an
//! `_async` twin that accepts a future instead.
//!
//! A panic inside the underlying future is not turned into a failure here; use
//! [`boundary::from_panicking_future`](crate::boundary::from_panicking_future) at the
//! edge for that.
//!
//! # Examples
//!
//! ```rust
//! use outcome::{Outcome, deferred};
//!
//! async fn fetch(id: u32) -> Outcome<String, &'static str> {
//!     if id == 0 { Outcome::failure("not_found") } else { Outcome::success(format!("user-{id}")) }
//! }
//!
//! # async fn run() {
//! let name = deferred::map(fetch(7), |s| s.to_uppercase()).await;
//! assert_eq!(name, Outcome::Success("USER-7".to_string()));
//!
//! let fallback = deferred::unwrap_or(fetch(0), "guest".to_string()).await;
//! assert_eq!(fallback, "guest");
//! # }
//! ```

use std::{fmt, future::IntoFuture};

use either::Either;

use crate::{algebra, outcome::Outcome};

/// Awaits the future held by a success; a failure passes through untouched.
pub async fn resolve<T, E>(outcome: Outcome<T, E>) -> Outcome<T::Output, E>
where
    T: IntoFuture,
{
    match outcome {
        Outcome::Success(pending) => Outcome::Success(pending.await),
        Outcome::Failure(e) => Outcome::Failure(e),
    }
}

/// Awaits the future held by a failure; a success passes through untouched.
pub async fn resolve_err<V, T>(outcome: Outcome<V, T>) -> Outcome<V, T::Output>
where
    T: IntoFuture,
{
    match outcome {
        Outcome::Success(v) => Outcome::Success(v),
        Outcome::Failure(pending) => Outcome::Failure(pending.await),
    }
}

/// Async [`algebra::and`]. `other` is awaited only if `deferred` succeeds.
pub async fn and<D, O, V, U, E>(deferred: D, other: O) -> Outcome<U, E>
where
    D: IntoFuture<Output = Outcome<V, E>>,
    O: IntoFuture<Output = Outcome<U, E>>,
{
    let next = algebra::map(deferred.await, |_| other);
    algebra::flatten(resolve(next).await)
}

/// Async [`algebra::and_then`]. `f` may return an [`Outcome`] or a future of one.
///
/// # Examples
///
/// ```rust
/// use outcome::{Outcome, deferred};
///
/// # async fn run() {
/// let start: Outcome<u32, &str> = Outcome::success(2);
/// let r = deferred::and_then(start, |n| async move { Outcome::success(n * 10) }).await;
/// assert_eq!(r, Outcome::Success(20));
///
/// let r = deferred::and_then(r, |n| Outcome::<u32, &str>::success(n + 1)).await;
/// assert_eq!(r, Outcome::Success(21));
/// # }
/// ```
pub async fn and_then<D, F, T, V, U, E>(deferred: D, f: F) -> Outcome<U, E>
where
    D: IntoFuture<Output = Outcome<V, E>>,
    F: FnOnce(V) -> T,
    T: IntoFuture<Output = Outcome<U, E>>,
{
    let next = algebra::map(deferred.await, f);
    algebra::flatten(resolve(next).await)
}

/// Async [`algebra::or`]. `other` is awaited only if `deferred` fails.
pub async fn or<D, O, V, E, E2>(deferred: D, other: O) -> Outcome<V, E2>
where
    D: IntoFuture<Output = Outcome<V, E>>,
    O: IntoFuture<Output = Outcome<V, E2>>,
{
    let next = algebra::map_err(deferred.await, |_| other);
    algebra::flatten_err(resolve_err(next).await)
}

/// Async [`algebra::or_else`]. `f` may return an [`Outcome`] or a future of one.
pub async fn or_else<D, F, T, V, E, E2>(deferred: D, f: F) -> Outcome<V, E2>
where
    D: IntoFuture<Output = Outcome<V, E>>,
    F: FnOnce(E) -> T,
    T: IntoFuture<Output = Outcome<V, E2>>,
{
    let next = algebra::map_err(deferred.await, f);
    algebra::flatten_err(resolve_err(next).await)
}

/// Async [`algebra::map`].
pub async fn map<D, F, V, U, E>(deferred: D, f: F) -> Outcome<U, E>
where
    D: IntoFuture<Output = Outcome<V, E>>,
    F: FnOnce(V) -> U,
{
    algebra::map(deferred.await, f)
}

/// Like [`map`], with a callback that returns a future.
pub async fn map_async<D, F, T, V, E>(deferred: D, f: F) -> Outcome<T::Output, E>
where
    D: IntoFuture<Output = Outcome<V, E>>,
    F: FnOnce(V) -> T,
    T: IntoFuture,
{
    resolve(algebra::map(deferred.await, f)).await
}

/// Async [`algebra::map_err`].
pub async fn map_err<D, F, V, E, E2>(deferred: D, f: F) -> Outcome<V, E2>
where
    D: IntoFuture<Output = Outcome<V, E>>,
    F: FnOnce(E) -> E2,
{
    algebra::map_err(deferred.await, f)
}

/// Like [`map_err`], with a callback that returns a future.
pub async fn map_err_async<D, F, T, V, E>(deferred: D, f: F) -> Outcome<V, T::Output>
where
    D: IntoFuture<Output = Outcome<V, E>>,
    F: FnOnce(E) -> T,
    T: IntoFuture,
{
    resolve_err(algebra::map_err(deferred.await, f)).await
}

/// Async [`algebra::map_or`].
pub async fn map_or<D, F, V, U, E>(deferred: D, default: U, f: F) -> U
where
    D: IntoFuture<Output = Outcome<V, E>>,
    F: FnOnce(V) -> U,
{
    algebra::map_or(deferred.await, default, f)
}

/// Async [`algebra::map_or_else`].
pub async fn map_or_else<D, G, F, V, U, E>(deferred: D, default: G, f: F) -> U
where
    D: IntoFuture<Output = Outcome<V, E>>,
    G: FnOnce(E) -> U,
    F: FnOnce(V) -> U,
{
    algebra::map_or_else(deferred.await, default, f)
}

/// Like [`map_or_else`], with callbacks that return futures. Only the callback for
/// the resolved branch is called and awaited.
pub async fn map_or_else_async<D, G, TG, F, TF, V, E>(deferred: D, default: G, f: F) -> TF::Output
where
    D: IntoFuture<Output = Outcome<V, E>>,
    G: FnOnce(E) -> TG,
    TG: IntoFuture<Output = TF::Output>,
    F: FnOnce(V) -> TF,
    TF: IntoFuture,
{
    let pending = algebra::map_or_else(
        deferred.await,
        |e| Either::Left(default(e).into_future()),
        |v| Either::Right(f(v).into_future()),
    );
    pending.await
}

/// Async [`algebra::flatten`].
pub async fn flatten<D, V, E>(deferred: D) -> Outcome<V, E>
where
    D: IntoFuture<Output = Outcome<Outcome<V, E>, E>>,
{
    algebra::flatten(deferred.await)
}

/// Async [`algebra::inspect`].
pub async fn inspect<D, F, V, E>(deferred: D, f: F) -> Outcome<V, E>
where
    D: IntoFuture<Output = Outcome<V, E>>,
    F: FnOnce(&V),
{
    algebra::inspect(deferred.await, f)
}

/// Like [`inspect`], with a callback that returns a future. The future is awaited
/// before the outcome is handed on.
pub async fn inspect_async<D, F, T, V, E>(deferred: D, f: F) -> Outcome<V, E>
where
    D: IntoFuture<Output = Outcome<V, E>>,
    F: FnOnce(&V) -> T,
    T: IntoFuture<Output = ()>,
{
    let outcome = deferred.await;
    if let Outcome::Success(v) = &outcome {
        f(v).await;
    }
    outcome
}

/// Async [`algebra::inspect_err`].
pub async fn inspect_err<D, F, V, E>(deferred: D, f: F) -> Outcome<V, E>
where
    D: IntoFuture<Output = Outcome<V, E>>,
    F: FnOnce(&E),
{
    algebra::inspect_err(deferred.await, f)
}

/// Like [`inspect_err`], with a callback that returns a future.
pub async fn inspect_err_async<D, F, T, V, E>(deferred: D, f: F) -> Outcome<V, E>
where
    D: IntoFuture<Output = Outcome<V, E>>,
    F: FnOnce(&E) -> T,
    T: IntoFuture<Output = ()>,
{
    let outcome = deferred.await;
    if let Outcome::Failure(e) = &outcome {
        f(e).await;
    }
    outcome
}

/// Async [`algebra::is_ok`].
pub async fn is_ok<D, V, E>(deferred: D) -> bool
where
    D: IntoFuture<Output = Outcome<V, E>>,
{
    algebra::is_ok(&deferred.await)
}

/// Async [`algebra::is_err`].
pub async fn is_err<D, V, E>(deferred: D) -> bool
where
    D: IntoFuture<Output = Outcome<V, E>>,
{
    algebra::is_err(&deferred.await)
}

/// Async [`algebra::is_ok_and`].
pub async fn is_ok_and<D, F, V, E>(deferred: D, f: F) -> bool
where
    D: IntoFuture<Output = Outcome<V, E>>,
    F: FnOnce(V) -> bool,
{
    algebra::is_ok_and(deferred.await, f)
}

/// Async [`algebra::is_err_and`].
pub async fn is_err_and<D, F, V, E>(deferred: D, f: F) -> bool
where
    D: IntoFuture<Output = Outcome<V, E>>,
    F: FnOnce(E) -> bool,
{
    algebra::is_err_and(deferred.await, f)
}

/// Async [`algebra::unwrap`].
///
/// # Panics
///
/// Panics if the resolved outcome is a `Failure`.
pub async fn unwrap<D, V, E>(deferred: D) -> V
where
    D: IntoFuture<Output = Outcome<V, E>>,
    E: fmt::Debug,
{
    algebra::unwrap(deferred.await)
}

/// Async [`algebra::unwrap_err`].
///
/// # Panics
///
/// Panics if the resolved outcome is a `Success`.
pub async fn unwrap_err<D, V, E>(deferred: D) -> E
where
    D: IntoFuture<Output = Outcome<V, E>>,
{
    algebra::unwrap_err(deferred.await)
}

/// Async [`algebra::expect`].
///
/// # Panics
///
/// Panics with `msg` if the resolved outcome is a `Failure`.
pub async fn expect<D, V, E>(deferred: D, msg: &str) -> V
where
    D: IntoFuture<Output = Outcome<V, E>>,
    E: fmt::Debug,
{
    algebra::expect(deferred.await, msg)
}

/// Async [`algebra::expect_err`].
///
/// # Panics
///
/// Panics with `msg` if the resolved outcome is a `Success`.
pub async fn expect_err<D, V, E>(deferred: D, msg: &str) -> E
where
    D: IntoFuture<Output = Outcome<V, E>>,
{
    algebra::expect_err(deferred.await, msg)
}

/// Async [`algebra::unwrap_or`].
pub async fn unwrap_or<D, V, E>(deferred: D, default: V) -> V
where
    D: IntoFuture<Output = Outcome<V, E>>,
{
    algebra::unwrap_or(deferred.await, default)
}

/// Async [`algebra::unwrap_or_else`].
pub async fn unwrap_or_else<D, F, V, E>(deferred: D, f: F) -> V
where
    D: IntoFuture<Output = Outcome<V, E>>,
    F: FnOnce(E) -> V,
{
    algebra::unwrap_or_else(deferred.await, f)
}

/// Like [`unwrap_or_else`], with a callback that returns a future.
pub async fn unwrap_or_else_async<D, F, T, V, E>(deferred: D, f: F) -> V
where
    D: IntoFuture<Output = Outcome<V, E>>,
    F: FnOnce(E) -> T,
    T: IntoFuture<Output = V>,
{
    match resolve_err(algebra::map_err(deferred.await, f)).await {
        Outcome::Success(v) | Outcome::Failure(v) => v,
    }
}

/// Async [`algebra::ok`].
pub async fn ok<D, V, E>(deferred: D) -> Option<V>
where
    D: IntoFuture<Output = Outcome<V, E>>,
{
    algebra::ok(deferred.await)
}

/// Async [`algebra::err`].
pub async fn err<D, V, E>(deferred: D) -> Option<E>
where
    D: IntoFuture<Output = Outcome<V, E>>,
{
    algebra::err(deferred.await)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, future::ready, rc::Rc};

    use proptest::prelude::*;

    use super::*;
    use crate::test_util::{Yield, block_on};

    type Parsed = Outcome<i64, String>;

    fn outcomes() -> impl Strategy<Value = Parsed> {
        prop_oneof![
            any::<i64>().prop_map(Outcome::<i64, String>::Success),
            "[a-z]{0,8}".prop_map(Outcome::<i64, String>::Failure),
        ]
    }

    async fn later(outcome: Parsed) -> Parsed {
        Yield::once().await;
        outcome
    }

    async fn never() -> Parsed {
        panic!("short-circuited sibling must not be polled")
    }

    async fn untouched<T>() -> T {
        panic!("callback must not run on this branch")
    }

    #[test]
    fn test_and_does_not_poll_other_on_failure() {
        let f: Parsed = Outcome::failure("early".into());
        assert_eq!(block_on(and(f, never())), Outcome::Failure("early".to_string()));

        let s: Parsed = Outcome::success(1);
        let other = later(Outcome::success(2));
        assert_eq!(block_on(and(s, other)), Outcome::Success(2));
    }

    #[test]
    fn test_or_does_not_poll_other_on_success() {
        let s: Parsed = Outcome::success(5);
        assert_eq!(block_on(or(s, never())), Outcome::Success(5));

        let f: Parsed = Outcome::failure("late".into());
        assert_eq!(block_on(or(later(f), later(Outcome::success(0)))), Outcome::Success(0));
    }

    #[test]
    fn test_and_then_accepts_plain_and_deferred_callbacks() {
        let r = block_on(and_then(later(Outcome::success(20)), |n| later(Outcome::success(n + 1))));
        assert_eq!(r, Outcome::Success(21));

        let r = block_on(and_then(r, |n| Outcome::<i64, String>::success(n * 2)));
        assert_eq!(r, Outcome::Success(42));
    }

    #[test]
    fn test_or_else_recovers_with_deferred_callback() {
        let f: Parsed = Outcome::failure("abc".into());
        let r = block_on(or_else(later(f), |e| async move {
            Outcome::<i64, String>::success(e.len() as i64)
        }));
        assert_eq!(r, Outcome::Success(3));
    }

    #[test]
    fn test_async_callbacks_only_fire_on_matching_branch() {
        let s: Parsed = Outcome::success(4);
        let f: Parsed = Outcome::failure("x".into());

        assert_eq!(block_on(map_async(s.clone(), |n| ready(n * 3))), Outcome::Success(12));
        assert_eq!(block_on(map_async(f.clone(), |_: i64| untouched::<i64>())), f);

        assert_eq!(block_on(map_err_async(f.clone(), |e| ready(e + "!"))), Outcome::Failure("x!".into()));
        assert_eq!(block_on(map_err_async(s.clone(), |_: String| untouched::<String>())), s);

        let total = block_on(map_or_else_async(f.clone(), |e| ready(e.len() as i64), |n| ready(n)));
        assert_eq!(total, 1);
        assert_eq!(block_on(unwrap_or_else_async(f, |_| ready(-1))), -1);
        assert_eq!(block_on(unwrap_or_else_async(s, |_| ready(-1))), 4);
    }

    #[test]
    fn test_inspect_async_awaits_before_returning() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let s: Parsed = Outcome::success(9);

        let r = block_on(inspect_async(later(s), {
            let log = Rc::clone(&log);
            move |n: &i64| {
                let n = *n;
                async move {
                    Yield::once().await;
                    log.borrow_mut().push(format!("ok:{n}"));
                }
            }
        }));
        let r = block_on(inspect_err_async(r, {
            let log = Rc::clone(&log);
            move |e: &String| {
                let e = e.clone();
                async move { log.borrow_mut().push(format!("err:{e}")) }
            }
        }));

        assert_eq!(r, Outcome::Success(9));
        assert_eq!(&*log.borrow(), &["ok:9".to_string()]);
    }

    #[test]
    fn test_chain_runs_in_call_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let step = |name: &'static str| {
            let log = Rc::clone(&log);
            move |n: i64| {
                let log = Rc::clone(&log);
                async move {
                    Yield::once().await;
                    log.borrow_mut().push(name);
                    Outcome::<i64, String>::success(n + 1)
                }
            }
        };

        let chain = and_then(and_then(and_then(later(Outcome::success(0)), step("a")), step("b")), step("c"));
        assert_eq!(block_on(chain), Outcome::Success(3));
        assert_eq!(&*log.borrow(), &["a", "b", "c"]);
    }

    #[test]
    fn test_extractors() {
        let s: Parsed = Outcome::success(7);
        let f: Parsed = Outcome::failure("no".into());

        assert!(block_on(is_ok(later(s.clone()))));
        assert!(block_on(is_err(later(f.clone()))));
        assert!(block_on(is_ok_and(s.clone(), |n| n == 7)));
        assert!(block_on(is_err_and(f.clone(), |e| e == "no")));
        assert_eq!(block_on(unwrap(later(s.clone()))), 7);
        assert_eq!(block_on(unwrap_err(f.clone())), "no");
        assert_eq!(block_on(expect(s.clone(), "present")), 7);
        assert_eq!(block_on(expect_err(f.clone(), "absent")), "no");
        assert_eq!(block_on(ok(f.clone())), None);
        assert_eq!(block_on(err(f)), Some("no".to_string()));
        assert_eq!(block_on(ok(s)), Some(7));
    }

    #[test]
    #[should_panic(expected = "called `Outcome::unwrap()` on a `Failure` value")]
    fn test_unwrap_panics_after_resolution() {
        let f: Parsed = Outcome::failure("no".into());
        block_on(unwrap(later(f)));
    }

    proptest! {
        #[test]
        fn matches_sync_map(r in outcomes()) {
            let sync = algebra::map(r.clone(), |n| n.wrapping_mul(2));
            prop_assert_eq!(block_on(map(later(r), |n| n.wrapping_mul(2))), sync);
        }

        #[test]
        fn matches_sync_and_then(r in outcomes()) {
            let f = |n: i64| if n % 2 == 0 { Outcome::success(n / 2) } else { Outcome::failure("odd".to_string()) };
            let sync = algebra::and_then(r.clone(), f);
            prop_assert_eq!(block_on(and_then(later(r), f)), sync);
        }

        #[test]
        fn matches_sync_or_else(r in outcomes()) {
            let f = |e: String| Outcome::<i64, usize>::failure(e.len());
            let sync = algebra::or_else(r.clone(), f);
            prop_assert_eq!(block_on(or_else(later(r), f)), sync);
        }

        #[test]
        fn matches_sync_and_or(r in outcomes(), other in outcomes()) {
            prop_assert_eq!(block_on(and(later(r.clone()), other.clone())), algebra::and(r.clone(), other.clone()));
            prop_assert_eq!(block_on(or(later(r.clone()), other.clone())), algebra::or(r, other));
        }

        #[test]
        fn matches_sync_flatten(r in outcomes(), wrap in any::<bool>()) {
            let nested: Outcome<Parsed, String> = if wrap { Outcome::success(r) } else { algebra::map(r, Outcome::success) };
            prop_assert_eq!(block_on(flatten(ready(nested.clone()))), algebra::flatten(nested));
        }

        #[test]
        fn matches_sync_extractors(r in outcomes()) {
            prop_assert_eq!(block_on(unwrap_or(later(r.clone()), 0)), algebra::unwrap_or(r.clone(), 0));
            prop_assert_eq!(block_on(map_or(r.clone(), -1, |n| n / 2)), algebra::map_or(r.clone(), -1, |n| n / 2));
            prop_assert_eq!(
                block_on(map_or_else(r.clone(), |e| e.len() as i64, |n| n)),
                algebra::map_or_else(r.clone(), |e| e.len() as i64, |n| n)
            );
            prop_assert_eq!(block_on(map_err(r.clone(), |e| e.len())), algebra::map_err(r, |e| e.len()));
        }
    }
}
