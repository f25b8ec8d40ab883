//! Adaptive test assembler
//!
//! Builds one practice test for one attempt: picks a target question count
//! from the requested length, nudges the difficulty one step based on recent
//! performance, pulls a candidate pool from the question bank (falling back to
//! the requested difficulty when the adapted pool is empty), then shuffles,
//! truncates and section-balances the selection. The attempt record is
//! created up front and its id becomes the test id.

use rand::seq::SliceRandom;
use std::sync::Arc;

use crate::error::{ServerError, ServerResult};
use crate::traits::{AttemptStore, QuestionStore};
use shared::{
    AttemptRecord, Difficulty, GeneratedTest, Question, Section, TestConfig, UserId,
};

/// How many completed attempts feed the difficulty adjustment
const HISTORY_WINDOW: usize = 10;

/// Minimum completed attempts before the difficulty adapts at all
const MIN_HISTORY: usize = 3;

/// Step up above this mean accuracy
const STEP_UP_ACCURACY: f64 = 0.8;

/// Step down below this mean accuracy
const STEP_DOWN_ACCURACY: f64 = 0.5;

/// Step up only when the mean pace is faster than this (seconds per question)
const STEP_UP_PACE_SECS: f64 = 90.0;

/// Seconds allotted per question when the timer is enabled
const SECONDS_PER_QUESTION: u32 = 90;

/// Compute the difficulty actually used to fetch questions
///
/// A one-step, hysteresis-free walk: consistently accurate and fast users get
/// one level harder, struggling users one level easier, everyone else keeps
/// the requested level. With fewer than three completed attempts the
/// requested difficulty is returned unchanged.
pub fn adapt_difficulty(requested: Difficulty, history: &[AttemptRecord]) -> Difficulty {
    if history.len() < MIN_HISTORY {
        return requested;
    }

    let accuracies: Vec<f64> = history.iter().filter_map(|a| a.accuracy()).collect();
    if accuracies.len() < MIN_HISTORY {
        return requested;
    }
    let mean_accuracy = accuracies.iter().sum::<f64>() / accuracies.len() as f64;

    // Untimed attempts carry no pace; without any pace data the step-up
    // condition cannot be verified, so it never fires.
    let paces: Vec<f64> = history.iter().filter_map(|a| a.seconds_per_question()).collect();
    let mean_pace = if paces.is_empty() {
        f64::INFINITY
    } else {
        paces.iter().sum::<f64>() / paces.len() as f64
    };

    if mean_accuracy > STEP_UP_ACCURACY && mean_pace < STEP_UP_PACE_SECS {
        requested.step_up()
    } else if mean_accuracy < STEP_DOWN_ACCURACY {
        requested.step_down()
    } else {
        requested
    }
}

/// Rebalance a combined selection to roughly half per section
///
/// Takes questions per section from the already-shuffled pool. The balanced
/// set replaces the original selection only when it is at least as large;
/// otherwise the unbalanced selection stands.
fn rebalance_combined(pool: &[Question], selection: Vec<Question>, target: usize) -> Vec<Question> {
    let math_half = target / 2;
    let rw_half = target - math_half;

    let mut balanced: Vec<Question> = pool
        .iter()
        .filter(|q| q.section == Section::ReadingWriting)
        .take(rw_half)
        .cloned()
        .collect();
    balanced.extend(
        pool.iter()
            .filter(|q| q.section == Section::Math)
            .take(math_half)
            .cloned(),
    );

    if balanced.len() >= selection.len() {
        balanced
    } else {
        selection
    }
}

/// Assembles practice tests from the question bank, one attempt at a time
pub struct TestAssembler<Q, A>
where
    Q: QuestionStore,
    A: AttemptStore,
{
    question_store: Arc<Q>,
    attempt_store: Arc<A>,
}

impl<Q, A> TestAssembler<Q, A>
where
    Q: QuestionStore,
    A: AttemptStore,
{
    /// Create a new assembler over the given stores
    pub fn new(question_store: Arc<Q>, attempt_store: Arc<A>) -> Self {
        Self {
            question_store,
            attempt_store,
        }
    }

    /// Assemble a test for one user and create its attempt record
    ///
    /// Every failure path (store error, exhausted pool, insert failure)
    /// surfaces as an error the caller treats as "cannot start test".
    pub async fn generate_test(
        &self,
        user_id: UserId,
        config: TestConfig,
    ) -> ServerResult<GeneratedTest> {
        let target = config.length.question_count();

        let history = self
            .attempt_store
            .recent_completed(user_id, HISTORY_WINDOW)
            .await?;
        let adapted = adapt_difficulty(config.difficulty, &history);
        if adapted != config.difficulty {
            tracing::info!(
                "🎚️ Adapted difficulty for user {}: {} -> {}",
                user_id,
                config.difficulty,
                adapted
            );
        }

        let sections = config.test_type.sections();
        let mut pool = self.fetch_pool(adapted, &sections).await?;
        if pool.is_empty() && adapted != config.difficulty {
            tracing::warn!(
                "⚠️ No questions at {} difficulty, falling back to requested {}",
                adapted,
                config.difficulty
            );
            pool = self.fetch_pool(config.difficulty, &sections).await?;
        }
        if pool.is_empty() {
            return Err(ServerError::QuestionPoolExhausted {
                requested: config.difficulty,
                adapted,
            });
        }

        // Scoped so the thread-local rng is gone before the store await;
        // handler futures must stay Send.
        {
            let mut rng = rand::thread_rng();
            pool.shuffle(&mut rng);
        }

        let mut selection: Vec<Question> = pool.iter().take(target).cloned().collect();
        if config.test_type.is_combined() {
            selection = rebalance_combined(&pool, selection, target);
        }

        let time_limit_seconds = config
            .timer_enabled
            .then(|| selection.len() as u32 * SECONDS_PER_QUESTION);

        let attempt = AttemptRecord::begin(user_id, config, selection.len() as u32);
        let attempt_id = attempt.id;
        self.attempt_store.create_attempt(attempt).await?;

        tracing::info!(
            "📝 Assembled {}-question test {} for user {}",
            selection.len(),
            attempt_id,
            user_id
        );

        Ok(GeneratedTest {
            id: attempt_id,
            questions: selection,
            time_limit_seconds,
            config,
        })
    }

    /// Fetch and flatten all candidate questions for the given sections
    async fn fetch_pool(
        &self,
        difficulty: Difficulty,
        sections: &[Section],
    ) -> ServerResult<Vec<Question>> {
        let sets = self
            .question_store
            .fetch_sets(difficulty, sections.to_vec())
            .await?;

        Ok(sets
            .into_iter()
            .flat_map(|set| set.questions)
            .filter(|q| sections.contains(&q.section))
            .collect())
    }
}
