//! Service tests for the practice server
//!
//! Tests for the real store implementations, with shared fixtures.

pub mod fixtures;
pub mod helpers;

mod attempt_log;
