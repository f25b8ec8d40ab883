//! Service trait definitions for dependency injection
//!
//! The question and attempt stores are external collaborators; all access
//! goes through these traits so the assembler and handlers stay testable.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::ServerResult;
use shared::{AttemptId, AttemptRecord, Difficulty, QuestionSet, Section, UserId};

/// Read-only question bank service trait
///
/// The bank stores question-set documents keyed by difficulty and section,
/// each with an embedded question array. The assembler treats it as an opaque
/// filter-and-fetch collaborator.
#[mockall::automock]
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Fetch all question sets matching a difficulty and any of the sections
    async fn fetch_sets(
        &self,
        difficulty: Difficulty,
        sections: Vec<Section>,
    ) -> ServerResult<Vec<QuestionSet>>;

    /// Number of question sets currently loaded
    async fn set_count(&self) -> usize;
}

/// Attempt record storage service trait
#[mockall::automock]
#[async_trait]
pub trait AttemptStore: Send + Sync {
    /// Create a new attempt record (write-once)
    async fn create_attempt(&self, record: AttemptRecord) -> ServerResult<()>;

    /// Look up a single attempt by id
    async fn get_attempt(&self, id: AttemptId) -> ServerResult<AttemptRecord>;

    /// Complete an attempt with the submitted answers and score
    async fn complete_attempt(
        &self,
        id: AttemptId,
        answers: HashMap<String, String>,
        correct_count: u32,
        time_taken_seconds: u32,
    ) -> ServerResult<AttemptRecord>;

    /// Most recent completed attempts for a user, newest first
    async fn recent_completed(&self, user_id: UserId, limit: usize) -> ServerResult<Vec<AttemptRecord>>;

    /// All attempts for a user, newest first
    async fn attempts_for_user(&self, user_id: UserId) -> ServerResult<Vec<AttemptRecord>>;
}
