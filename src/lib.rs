//! # Outcome: Typed Success and Failure
//!
//! Model the result of a computation as a value that is either a success or a
//! failure from a closed, tagged set of error variants, and compose such values
//! the same way whether they are available now or only later.
//!
//! ## Core Types
//!
//! - **[`Outcome<V, E>`]**: An immediate success or failure
//! - **[`Variant`]**: A closed error domain declared with [`variants!`]
//! - **[`Pipe`] / [`AsyncPipe`]**: Fluent chains over immediate and deferred outcomes
//!
//! ## Key Features
//!
//! - **Algebraic**: [`algebra`] holds the combinators as free functions with the usual laws
//! - **Async Support**: [`deferred`] mirrors every combinator over `IntoFuture` values
//! - **Exhaustive**: [`match_nested`](dispatch::match_nested) needs a handler for every tag
//! - **Bridged**: [`boundary`] turns `Result`s and panics into failures
//! - **Serializable**: with the `serde` feature, outcomes and `#[wire]` domains round trip
//!
//! ## Example
//!
//! ```
//! use outcome::prelude::*;
//!
//! variants! {
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub enum ParseError: ParseErrorCases {
//!         invalid_number => InvalidNumber(String),
//!         negative => Negative(i64),
//!     }
//! }
//!
//! fn parse(input: &str) -> Outcome<u64, ParseError> {
//!     match input.parse::<i64>() {
//!         Ok(n) if n < 0 => Outcome::failure(ParseError::Negative(n)),
//!         Ok(n) => Outcome::success(n as u64),
//!         Err(_) => Outcome::failure(ParseError::InvalidNumber(input.to_string())),
//!     }
//! }
//!
//! assert_eq!(pipe(parse("21")).map(|n| n * 2).unwrap(), 42);
//! assert_eq!(pipe(parse("abc")).map(|n| n * 2).unwrap_or(0), 0);
//!
//! let text = pipe(parse("-3")).match_nested(|n| format!("ok:{n}"), ParseErrorCases {
//!     invalid_number: |raw: String| format!("bad:{raw}"),
//!     negative: |n: i64| format!("neg:{n}"),
//! });
//! assert_eq!(text, "neg:-3");
//! ```
//!
//! ## Modules
//!
//! - [`algebra`] - Sync combinators and extractors
//! - [`deferred`] - The same combinators over deferred outcomes
//! - [`dispatch`] - Terminal two-way and per-tag matching
//! - [`boundary`] - Adapters from `Result` and panics
//! - [`pipe`] - Method-chaining wrappers

pub mod algebra;
pub mod boundary;
pub mod deferred;
pub mod dispatch;
mod outcome;
pub mod pipe;
pub mod prelude;
pub mod variant;

#[cfg(feature = "serde")]
mod wire;

#[cfg(test)]
mod test_util;

pub use boundary::Panic;
pub use outcome::Outcome;
pub use pipe::{AsyncPipe, Pipe, pipe, pipe_async};
pub use variant::{Cases, Factory, Handler, Variant, factory};

#[doc(hidden)]
pub mod __private {
    #[cfg(feature = "serde")]
    pub use serde;
    #[cfg(feature = "serde")]
    pub use serde_json;
}
