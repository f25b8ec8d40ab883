//! Attempt log service implementation
//!
//! In-memory attempt store: write-once creation at assembly time, completion
//! with a score later, and history queries feeding the adaptive rule and the
//! dashboard.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ServerError, ServerResult};
use crate::traits::AttemptStore;
use shared::{AttemptId, AttemptRecord, UserId};

/// Real attempt log implementation
#[derive(Clone)]
pub struct RealAttemptLog {
    attempts: Arc<RwLock<HashMap<AttemptId, AttemptRecord>>>,
}

impl RealAttemptLog {
    /// Create an empty attempt log
    pub fn new() -> Self {
        Self {
            attempts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Total number of stored attempts
    pub async fn attempt_count(&self) -> usize {
        let attempts = self.attempts.read().await;
        attempts.len()
    }
}

impl Default for RealAttemptLog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AttemptStore for RealAttemptLog {
    async fn create_attempt(&self, record: AttemptRecord) -> ServerResult<()> {
        let mut attempts = self.attempts.write().await;
        attempts.insert(record.id, record);
        Ok(())
    }

    async fn get_attempt(&self, id: AttemptId) -> ServerResult<AttemptRecord> {
        let attempts = self.attempts.read().await;
        attempts
            .get(&id)
            .cloned()
            .ok_or(ServerError::AttemptNotFound {
                attempt_id: id.to_string(),
            })
    }

    async fn complete_attempt(
        &self,
        id: AttemptId,
        answers: HashMap<String, String>,
        correct_count: u32,
        time_taken_seconds: u32,
    ) -> ServerResult<AttemptRecord> {
        let mut attempts = self.attempts.write().await;
        let record = attempts.get_mut(&id).ok_or(ServerError::AttemptNotFound {
            attempt_id: id.to_string(),
        })?;

        if record.is_completed() {
            return Err(ServerError::AttemptAlreadyScored {
                attempt_id: id.to_string(),
            });
        }

        record.answers = answers;
        record.correct_count = Some(correct_count);
        record.completed_at = Some(Utc::now());
        record.time_taken_seconds = Some(time_taken_seconds);

        Ok(record.clone())
    }

    async fn recent_completed(
        &self,
        user_id: UserId,
        limit: usize,
    ) -> ServerResult<Vec<AttemptRecord>> {
        let attempts = self.attempts.read().await;
        let mut completed: Vec<AttemptRecord> = attempts
            .values()
            .filter(|a| a.user_id == user_id && a.is_completed())
            .cloned()
            .collect();
        completed.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        completed.truncate(limit);
        Ok(completed)
    }

    async fn attempts_for_user(&self, user_id: UserId) -> ServerResult<Vec<AttemptRecord>> {
        let attempts = self.attempts.read().await;
        let mut all: Vec<AttemptRecord> = attempts
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        all.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        Ok(all)
    }
}
