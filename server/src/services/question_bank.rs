//! Question bank service implementation
//!
//! In-memory question store loaded from a JSON file of question-set
//! documents. Read-only after loading.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ServerError, ServerResult};
use crate::traits::QuestionStore;
use shared::{Difficulty, QuestionSet, Section};

/// Real question bank implementation
#[derive(Clone)]
pub struct RealQuestionBank {
    sets: Arc<RwLock<Vec<QuestionSet>>>,
}

impl RealQuestionBank {
    /// Create an empty question bank
    pub fn new() -> Self {
        Self {
            sets: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Create a bank pre-seeded with question sets
    pub fn with_sets(sets: Vec<QuestionSet>) -> Self {
        Self {
            sets: Arc::new(RwLock::new(sets)),
        }
    }

    /// Load question sets from a JSON file (an array of set documents)
    pub fn load_from_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ServerError::QuestionBankError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        let sets: Vec<QuestionSet> =
            serde_json::from_str(&content).map_err(|e| ServerError::QuestionBankError {
                message: format!("cannot parse {}: {}", path.display(), e),
            })?;

        let total_questions: usize = sets.iter().map(|s| s.questions.len()).sum();
        tracing::info!(
            "📚 Loaded {} question sets ({} questions) from {}",
            sets.len(),
            total_questions,
            path.display()
        );

        Ok(Self::with_sets(sets))
    }

    /// Add question sets to an existing bank
    pub async fn add_sets(&self, new_sets: Vec<QuestionSet>) {
        let mut sets = self.sets.write().await;
        sets.extend(new_sets);
    }
}

impl Default for RealQuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionStore for RealQuestionBank {
    async fn fetch_sets(
        &self,
        difficulty: Difficulty,
        sections: Vec<Section>,
    ) -> ServerResult<Vec<QuestionSet>> {
        let sets = self.sets.read().await;
        Ok(sets
            .iter()
            .filter(|set| set.difficulty == difficulty && sections.contains(&set.section))
            .cloned()
            .collect())
    }

    async fn set_count(&self) -> usize {
        let sets = self.sets.read().await;
        sets.len()
    }
}
