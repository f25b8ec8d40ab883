//! Shared types for the SAT practice platform
//!
//! Contains the domain model (questions, test configuration, attempts) and the
//! test-flow state machine consumed by both the server core and its API layer.
//! Server-internal types (handlers, session bookkeeping) are kept in the
//! server crate.

pub mod errors;
pub mod flow;
pub mod logging;
pub mod types;

pub use errors::*;
pub use flow::*;
pub use types::*;
