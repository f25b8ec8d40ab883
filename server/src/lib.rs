//! Server library for the SAT practice platform
//!
//! This library provides the adaptive test assembler, the test-flow session
//! controller and the HTTP API used by the practice frontend, with question
//! and attempt storage abstracted behind service traits.

pub mod core;
pub mod error;
pub mod server_impl;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;
pub mod web;

// Re-export main types
pub use error::{ServerError, ServerResult};
pub use server_impl::PlatformServer;
pub use state::ServerState;
pub use types::*;

// Re-export trait definitions
pub use traits::{AttemptStore, QuestionStore};

// Re-export service implementations
pub use services::{RealAttemptLog, RealQuestionBank};
