//! Service implementations
//!
//! Real implementations of the store traits for production use

pub mod attempt_log;
pub mod question_bank;

#[cfg(test)]
pub mod tests;

// Re-export service implementations
pub use attempt_log::RealAttemptLog;
pub use question_bank::RealQuestionBank;
