//! Fluent chaining over outcomes.
//!
//! [`Pipe`] wraps an immediate outcome and [`AsyncPipe`] wraps a deferred one. Both
//! are thin: every method forwards to the free function of the same name in
//! [`algebra`](crate::algebra) or [`deferred`](crate::deferred), so a chain and the
//! equivalent nested calls always agree.

mod deferred;
mod sync;

pub use deferred::{AsyncPipe, pipe_async};
pub use sync::{Pipe, pipe};
