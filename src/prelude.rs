//! Commonly used imports
//!
//! Use `use outcome::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{Outcome, Variant, Cases, Factory, Panic};

// Declaring domains
pub use crate::{variants, factory};

// Fluent chains
pub use crate::pipe::{pipe, pipe_async, Pipe, AsyncPipe};

// Dispatch
pub use crate::dispatch::{match_outcome, match_nested, match_deferred, match_nested_deferred};

// Boundary adapters
pub use crate::boundary::{from_fallible, from_panicking, from_fallible_future, from_panicking_future};
