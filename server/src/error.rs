//! Server-specific error types

use shared::{Difficulty, SharedError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("HTTP server startup failed: {0}")]
    ServerStartup(String),

    #[error("Question pool exhausted for {requested} difficulty (adapted: {adapted})")]
    QuestionPoolExhausted {
        requested: Difficulty,
        adapted: Difficulty,
    },

    #[error("Question bank error: {message}")]
    QuestionBankError { message: String },

    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: String },

    #[error("Attempt not found: {attempt_id}")]
    AttemptNotFound { attempt_id: String },

    #[error("Attempt already scored: {attempt_id}")]
    AttemptAlreadyScored { attempt_id: String },

    #[error("Invalid request: {details}")]
    InvalidRequest { details: String },

    #[error("Shared component error")]
    SharedError(#[from] SharedError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type ServerResult<T> = Result<T, ServerError>;
