//! Core business logic modules
//!
//! The adaptive assembler and scoring rules; pure logic apart from the store
//! round-trips the assembler makes.

pub mod assembler;
pub mod scoring;

// Re-export commonly used types
pub use assembler::{adapt_difficulty, TestAssembler};
pub use scoring::{answer_matches, score_answers};
