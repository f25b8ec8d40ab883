//! Tests for the attempt log service

use std::collections::HashMap;

use super::fixtures;
use super::helpers;
use crate::error::ServerError;
use crate::services::RealAttemptLog;
use crate::traits::AttemptStore;
use shared::{AttemptId, UserId};

#[tokio::test]
async fn test_create_and_get_attempt() {
    let log = RealAttemptLog::new();
    let user = UserId::new();
    let attempt = fixtures::create_test_attempt(user);
    let attempt_id = attempt.id;

    log.create_attempt(attempt).await.unwrap();
    assert_eq!(log.attempt_count().await, 1);

    let fetched = log.get_attempt(attempt_id).await.unwrap();
    assert_eq!(fetched.user_id, user);
    assert!(!fetched.is_completed());
    assert_eq!(fetched.total_questions, 10);
}

#[tokio::test]
async fn test_get_unknown_attempt_is_an_error() {
    let log = RealAttemptLog::new();
    let result = log.get_attempt(AttemptId::new()).await;
    assert!(matches!(result, Err(ServerError::AttemptNotFound { .. })));
}

#[tokio::test]
async fn test_complete_attempt_records_score() {
    let log = RealAttemptLog::new();
    let user = UserId::new();
    let attempt = fixtures::create_test_attempt(user);
    let attempt_id = attempt.id;
    log.create_attempt(attempt).await.unwrap();

    let answers = fixtures::create_test_answers("normal-math", 7, 10);
    let completed = log
        .complete_attempt(attempt_id, answers, 7, 900)
        .await
        .unwrap();

    assert!(completed.is_completed());
    assert_eq!(completed.correct_count, Some(7));
    assert_eq!(completed.accuracy(), Some(0.7));
    assert_eq!(completed.time_taken_seconds, Some(900));
}

#[tokio::test]
async fn test_double_completion_is_rejected() {
    let log = RealAttemptLog::new();
    let user = UserId::new();
    let attempt = fixtures::create_test_attempt(user);
    let attempt_id = attempt.id;
    log.create_attempt(attempt).await.unwrap();

    log.complete_attempt(attempt_id, HashMap::new(), 5, 600)
        .await
        .unwrap();

    let second = log.complete_attempt(attempt_id, HashMap::new(), 9, 600).await;
    assert!(matches!(
        second,
        Err(ServerError::AttemptAlreadyScored { .. })
    ));

    // The original score stands.
    let record = log.get_attempt(attempt_id).await.unwrap();
    assert_eq!(record.correct_count, Some(5));
}

#[tokio::test]
async fn test_recent_completed_filters_and_limits() {
    let user = UserId::new();
    let other = UserId::new();
    let log = helpers::log_with_completed_attempts(user, 12, 8, 600).await;

    // One unscored attempt and one for another user must not appear.
    log.create_attempt(fixtures::create_test_attempt(user))
        .await
        .unwrap();
    let foreign = fixtures::create_test_attempt(other);
    let foreign_id = foreign.id;
    log.create_attempt(foreign).await.unwrap();
    log.complete_attempt(foreign_id, HashMap::new(), 3, 300)
        .await
        .unwrap();

    let recent = log.recent_completed(user, 10).await.unwrap();
    assert_eq!(recent.len(), 10);
    assert!(recent.iter().all(|a| a.user_id == user && a.is_completed()));
}

#[tokio::test]
async fn test_attempts_for_user_includes_unscored() {
    let user = UserId::new();
    let log = helpers::log_with_completed_attempts(user, 2, 8, 600).await;
    log.create_attempt(fixtures::create_test_attempt(user))
        .await
        .unwrap();

    let all = log.attempts_for_user(user).await.unwrap();
    assert_eq!(all.len(), 3);
}
