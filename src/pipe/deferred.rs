use std::{
    fmt,
    future::{Future, IntoFuture},
};

use crate::{deferred, dispatch, outcome::Outcome, variant::Cases};

/// A fluent chain over a deferred outcome.
///
/// Every step wraps the previous future in the matching [`deferred`] combinator,
/// so nothing runs until the pipe is awaited. Awaiting drives the steps strictly in
/// the order they were written.
///
/// ```rust
/// use outcome::{Outcome, pipe::pipe_async};
///
/// async fn load(id: u32) -> Outcome<u32, String> {
///     if id == 0 { Outcome::failure("not_found".into()) } else { Outcome::success(id * 10) }
/// }
///
/// # async fn run() {
/// let r = pipe_async(load(4)).and_then(|n| load(n + 1)).map(|n| n + 1).await;
/// assert_eq!(r, Outcome::Success(411));
///
/// let name = pipe_async(load(0)).map(|n| n.to_string()).unwrap_or("guest".into()).await;
/// assert_eq!(name, "guest");
/// # }
/// ```
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct AsyncPipe<F> {
    future: F,
}

/// Starts a fluent chain over a deferred outcome.
#[inline]
pub fn pipe_async<D>(deferred: D) -> AsyncPipe<D::IntoFuture>
where
    D: IntoFuture,
{
    AsyncPipe { future: deferred.into_future() }
}

impl<F> AsyncPipe<F> {
    /// Ends the chain, returning the composed future.
    #[inline]
    pub fn into_deferred(self) -> F {
        self.future
    }
}

impl<F, V, E> AsyncPipe<F>
where
    F: Future<Output = Outcome<V, E>>,
{
    /// See [`deferred::and`].
    pub fn and<O, U>(self, other: O) -> AsyncPipe<impl Future<Output = Outcome<U, E>>>
    where
        O: IntoFuture<Output = Outcome<U, E>>,
    {
        pipe_async(deferred::and(self.future, other))
    }

    /// See [`deferred::and_then`].
    pub fn and_then<G, T, U>(self, f: G) -> AsyncPipe<impl Future<Output = Outcome<U, E>>>
    where
        G: FnOnce(V) -> T,
        T: IntoFuture<Output = Outcome<U, E>>,
    {
        pipe_async(deferred::and_then(self.future, f))
    }

    /// See [`deferred::or`].
    pub fn or<O, E2>(self, other: O) -> AsyncPipe<impl Future<Output = Outcome<V, E2>>>
    where
        O: IntoFuture<Output = Outcome<V, E2>>,
    {
        pipe_async(deferred::or(self.future, other))
    }

    /// See [`deferred::or_else`].
    pub fn or_else<G, T, E2>(self, f: G) -> AsyncPipe<impl Future<Output = Outcome<V, E2>>>
    where
        G: FnOnce(E) -> T,
        T: IntoFuture<Output = Outcome<V, E2>>,
    {
        pipe_async(deferred::or_else(self.future, f))
    }

    /// See [`deferred::map`].
    pub fn map<G, U>(self, f: G) -> AsyncPipe<impl Future<Output = Outcome<U, E>>>
    where
        G: FnOnce(V) -> U,
    {
        pipe_async(deferred::map(self.future, f))
    }

    /// See [`deferred::map_async`].
    pub fn map_async<G, T>(self, f: G) -> AsyncPipe<impl Future<Output = Outcome<T::Output, E>>>
    where
        G: FnOnce(V) -> T,
        T: IntoFuture,
    {
        pipe_async(deferred::map_async(self.future, f))
    }

    /// See [`deferred::map_err`].
    pub fn map_err<G, E2>(self, f: G) -> AsyncPipe<impl Future<Output = Outcome<V, E2>>>
    where
        G: FnOnce(E) -> E2,
    {
        pipe_async(deferred::map_err(self.future, f))
    }

    /// See [`deferred::map_err_async`].
    pub fn map_err_async<G, T>(self, f: G) -> AsyncPipe<impl Future<Output = Outcome<V, T::Output>>>
    where
        G: FnOnce(E) -> T,
        T: IntoFuture,
    {
        pipe_async(deferred::map_err_async(self.future, f))
    }

    /// See [`deferred::inspect`].
    pub fn inspect<G>(self, f: G) -> AsyncPipe<impl Future<Output = Outcome<V, E>>>
    where
        G: FnOnce(&V),
    {
        pipe_async(deferred::inspect(self.future, f))
    }

    /// See [`deferred::inspect_async`].
    pub fn inspect_async<G, T>(self, f: G) -> AsyncPipe<impl Future<Output = Outcome<V, E>>>
    where
        G: FnOnce(&V) -> T,
        T: IntoFuture<Output = ()>,
    {
        pipe_async(deferred::inspect_async(self.future, f))
    }

    /// See [`deferred::inspect_err`].
    pub fn inspect_err<G>(self, f: G) -> AsyncPipe<impl Future<Output = Outcome<V, E>>>
    where
        G: FnOnce(&E),
    {
        pipe_async(deferred::inspect_err(self.future, f))
    }

    /// See [`deferred::inspect_err_async`].
    pub fn inspect_err_async<G, T>(self, f: G) -> AsyncPipe<impl Future<Output = Outcome<V, E>>>
    where
        G: FnOnce(&E) -> T,
        T: IntoFuture<Output = ()>,
    {
        pipe_async(deferred::inspect_err_async(self.future, f))
    }

    /// See [`deferred::map_or`].
    pub async fn map_or<G, U>(self, default: U, f: G) -> U
    where
        G: FnOnce(V) -> U,
    {
        deferred::map_or(self.future, default, f).await
    }

    /// See [`deferred::map_or_else`].
    pub async fn map_or_else<D, G, U>(self, default: D, f: G) -> U
    where
        D: FnOnce(E) -> U,
        G: FnOnce(V) -> U,
    {
        deferred::map_or_else(self.future, default, f).await
    }

    /// See [`deferred::is_ok`].
    pub async fn is_ok(self) -> bool {
        deferred::is_ok(self.future).await
    }

    /// See [`deferred::is_err`].
    pub async fn is_err(self) -> bool {
        deferred::is_err(self.future).await
    }

    /// See [`deferred::is_ok_and`].
    pub async fn is_ok_and<G>(self, f: G) -> bool
    where
        G: FnOnce(V) -> bool,
    {
        deferred::is_ok_and(self.future, f).await
    }

    /// See [`deferred::is_err_and`].
    pub async fn is_err_and<G>(self, f: G) -> bool
    where
        G: FnOnce(E) -> bool,
    {
        deferred::is_err_and(self.future, f).await
    }

    /// See [`deferred::unwrap`].
    ///
    /// # Panics
    ///
    /// Panics if the resolved outcome is a `Failure`.
    pub async fn unwrap(self) -> V
    where
        E: fmt::Debug,
    {
        deferred::unwrap(self.future).await
    }

    /// See [`deferred::unwrap_err`].
    ///
    /// # Panics
    ///
    /// Panics if the resolved outcome is a `Success`.
    pub async fn unwrap_err(self) -> E {
        deferred::unwrap_err(self.future).await
    }

    /// See [`deferred::expect`].
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the resolved outcome is a `Failure`.
    pub async fn expect(self, msg: &str) -> V
    where
        E: fmt::Debug,
    {
        deferred::expect(self.future, msg).await
    }

    /// See [`deferred::expect_err`].
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the resolved outcome is a `Success`.
    pub async fn expect_err(self, msg: &str) -> E {
        deferred::expect_err(self.future, msg).await
    }

    /// See [`deferred::unwrap_or`].
    pub async fn unwrap_or(self, default: V) -> V {
        deferred::unwrap_or(self.future, default).await
    }

    /// See [`deferred::unwrap_or_else`].
    pub async fn unwrap_or_else<G>(self, f: G) -> V
    where
        G: FnOnce(E) -> V,
    {
        deferred::unwrap_or_else(self.future, f).await
    }

    /// See [`deferred::unwrap_or_else_async`].
    pub async fn unwrap_or_else_async<G, T>(self, f: G) -> V
    where
        G: FnOnce(E) -> T,
        T: IntoFuture<Output = V>,
    {
        deferred::unwrap_or_else_async(self.future, f).await
    }

    /// See [`deferred::ok`].
    pub async fn ok(self) -> Option<V> {
        deferred::ok(self.future).await
    }

    /// See [`deferred::err`].
    pub async fn err(self) -> Option<E> {
        deferred::err(self.future).await
    }

    /// See [`dispatch::match_deferred`].
    pub async fn match_with<R, S, G>(self, on_success: S, on_failure: G) -> R
    where
        S: FnOnce(V) -> R,
        G: FnOnce(E) -> R,
    {
        dispatch::match_deferred(self.future, on_success, on_failure).await
    }

    /// See [`dispatch::match_nested_deferred`].
    pub async fn match_nested<R, S, C>(self, on_success: S, cases: C) -> R
    where
        S: FnOnce(V) -> R,
        C: Cases<E, R>,
    {
        dispatch::match_nested_deferred(self.future, on_success, cases).await
    }
}

impl<F, V, E> AsyncPipe<F>
where
    F: Future<Output = Outcome<Outcome<V, E>, E>>,
{
    /// See [`deferred::flatten`].
    pub fn flatten(self) -> AsyncPipe<impl Future<Output = Outcome<V, E>>> {
        pipe_async(deferred::flatten(self.future))
    }
}

impl<F> IntoFuture for AsyncPipe<F>
where
    F: Future,
{
    type Output = F::Output;
    type IntoFuture = F;

    fn into_future(self) -> Self::IntoFuture {
        self.future
    }
}

impl<F> fmt::Debug for AsyncPipe<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncPipe").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, future::ready, rc::Rc};

    use proptest::prelude::*;

    use super::*;
    use crate::{
        pipe::pipe,
        test_util::{Yield, block_on},
        variant::Variant,
        variants,
    };

    variants! {
        #[derive(Debug, Clone, PartialEq)]
        enum LoadError: LoadErrorCases {
            not_found => NotFound(u32),
            timeout => Timeout,
        }
    }

    async fn load(id: u32) -> Outcome<u32, LoadError> {
        Yield::once().await;
        match id {
            0 => Outcome::failure(LoadError::NotFound(id)),
            13 => Outcome::failure(LoadError::Timeout),
            _ => Outcome::success(id * 10),
        }
    }

    #[test]
    fn test_chain_resolves_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let r = block_on(
            pipe_async(load(2))
                .inspect({
                    let log = Rc::clone(&log);
                    move |n| log.borrow_mut().push(format!("loaded {n}"))
                })
                .and_then(|n| load(n + 1))
                .inspect_async({
                    let log = Rc::clone(&log);
                    move |n: &u32| {
                        let n = *n;
                        async move {
                            Yield::once().await;
                            log.borrow_mut().push(format!("reloaded {n}"));
                        }
                    }
                })
                .map(|n| n + 1),
        );
        assert_eq!(r, Outcome::Success(211));
        assert_eq!(&*log.borrow(), &["loaded 20".to_string(), "reloaded 210".to_string()]);
    }

    #[test]
    fn test_failure_short_circuits_later_steps() {
        let r = block_on(
            pipe_async(load(0))
                .and_then(|_| -> Outcome<u32, LoadError> { panic!("and_then must not run after a failure") })
                .map(|n| n + 1)
                .into_deferred(),
        );
        assert_eq!(r, Outcome::Failure(LoadError::NotFound(0)));
    }

    #[test]
    fn test_recovery_and_terminal_steps() {
        let recovered = block_on(
            pipe_async(load(13))
                .or_else(|e| match e {
                    LoadError::Timeout => Outcome::<u32, LoadError>::success(0),
                    other => Outcome::failure(other),
                })
                .unwrap(),
        );
        assert_eq!(recovered, 0);

        let text = block_on(pipe_async(load(13)).match_nested(|n| n.to_string(), LoadErrorCases {
            not_found: |id: u32| format!("missing {id}"),
            timeout: || "timed out".to_string(),
        }));
        assert_eq!(text, "timed out");

        assert!(block_on(pipe_async(load(1)).is_ok()));
        assert!(block_on(pipe_async(load(0)).is_err_and(|e| e == LoadError::NotFound(0))));
        assert_eq!(block_on(pipe_async(load(0)).unwrap_or_else_async(|_| ready(7))), 7);
        assert_eq!(block_on(pipe_async(load(0)).map_err(|e| e.tag()).err()), Some("not_found"));
    }

    #[test]
    fn test_flatten_and_async_mapping() {
        let nested: Outcome<Outcome<u32, LoadError>, LoadError> = Outcome::success(Outcome::success(4));
        let r = block_on(pipe(nested).into_async().flatten().map_async(load));
        assert_eq!(r, Outcome::Success(Outcome::Success(40)));

        let r = block_on(
            pipe_async(load(0))
                .map_err_async(|e| async move { format!("{e:?}") })
                .map_or_else(|e| e.len(), |n| n as usize),
        );
        assert_eq!(r, "NotFound(0)".len());
    }

    #[test]
    fn test_and_or_with_deferred_siblings() {
        assert_eq!(block_on(pipe_async(load(1)).and(load(2))), Outcome::Success(20));
        assert_eq!(block_on(pipe_async(load(0)).or(load(3))), Outcome::Success(30));
    }

    type Parsed = Outcome<i64, String>;

    fn outcomes() -> impl Strategy<Value = Parsed> {
        prop_oneof![
            any::<i64>().prop_map(Outcome::<i64, String>::Success),
            "[a-z]{0,8}".prop_map(Outcome::<i64, String>::Failure),
        ]
    }

    async fn halve(n: i64) -> Parsed {
        Yield::once().await;
        if n % 2 == 0 { Outcome::success(n / 2) } else { Outcome::failure("odd".into()) }
    }

    proptest! {
        #[test]
        fn async_pipe_matches_free_functions(r in outcomes(), other in outcomes()) {
            prop_assert_eq!(
                block_on(pipe_async(r.clone()).map(|n| n / 3)),
                block_on(deferred::map(r.clone(), |n| n / 3))
            );
            prop_assert_eq!(
                block_on(pipe_async(r.clone()).map_err(|e| e.len())),
                block_on(deferred::map_err(r.clone(), |e| e.len()))
            );
            prop_assert_eq!(
                block_on(pipe_async(r.clone()).and(other.clone())),
                block_on(deferred::and(r.clone(), other.clone()))
            );
            prop_assert_eq!(
                block_on(pipe_async(r.clone()).or(other.clone())),
                block_on(deferred::or(r.clone(), other.clone()))
            );
            prop_assert_eq!(
                block_on(pipe_async(r.clone()).and_then(halve)),
                block_on(deferred::and_then(r.clone(), halve))
            );
            prop_assert_eq!(
                block_on(pipe_async(r.clone()).or_else(|e| Outcome::<i64, usize>::failure(e.len()))),
                block_on(deferred::or_else(r.clone(), |e| Outcome::<i64, usize>::failure(e.len())))
            );
            prop_assert_eq!(
                block_on(pipe_async(r.clone()).map_or_else(|e| e.len() as i64, |n| n)),
                block_on(deferred::map_or_else(r.clone(), |e| e.len() as i64, |n| n))
            );
            prop_assert_eq!(block_on(pipe_async(r.clone()).unwrap_or(-1)), block_on(deferred::unwrap_or(r.clone(), -1)));
            prop_assert_eq!(block_on(pipe_async(r.clone()).err()), block_on(deferred::err(r)));
        }

        #[test]
        fn async_pipe_agrees_with_sync_pipe(r in outcomes()) {
            let sync = pipe(r.clone()).map(|n| n.wrapping_mul(3)).and_then(|n| Outcome::success(n % 11));
            let chained = block_on(pipe_async(r).map(|n| n.wrapping_mul(3)).and_then(|n| Outcome::success(n % 11)));
            prop_assert_eq!(chained, sync.into_outcome());
        }
    }
}
