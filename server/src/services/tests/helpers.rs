//! Test helpers for server service tests

use std::collections::HashMap;

use super::fixtures;
use crate::services::{RealAttemptLog, RealQuestionBank};
use crate::traits::AttemptStore;
use shared::UserId;

/// Build a question bank seeded with the full fixture set
pub fn seeded_bank() -> RealQuestionBank {
    RealQuestionBank::with_sets(fixtures::create_test_bank_sets())
}

/// Build an attempt log holding `count` completed attempts for `user_id`
///
/// Each attempt scores `correct` of 10 questions in `seconds` total.
pub async fn log_with_completed_attempts(
    user_id: UserId,
    count: usize,
    correct: u32,
    seconds: u32,
) -> RealAttemptLog {
    let log = RealAttemptLog::new();
    for _ in 0..count {
        let attempt = fixtures::create_test_attempt(user_id);
        let attempt_id = attempt.id;
        log.create_attempt(attempt).await.unwrap();
        log.complete_attempt(attempt_id, HashMap::new(), correct, seconds)
            .await
            .unwrap();
    }
    log
}
