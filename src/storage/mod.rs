// src/storage/mod.rs

//! Persistence behind a single trait.
//!
//! Scoring operations (`apply_points`, `toggle_challenge`, `record_quiz_answer`)
//! are atomic: the progress/result row and the ledger update are committed
//! together or not at all.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        challenge::{Challenge, ChallengeFilter, ChallengeProgress, NewChallenge},
        content::{Article, CollectionPoint, DailyPhrase, SeedContent, SeedReport},
        quiz::{NewQuizQuestion, QuizAnswerResult, QuizQuestion},
        score::{PointCategory, UserScore},
    },
    scoring::answer::Grade,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Store handle shared by all handlers.
pub type SharedStore = Arc<dyn Store>;

/// Result of a challenge toggle.
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    pub progress: ChallengeProgress,
    /// Present only when the toggle moved points.
    pub score: Option<UserScore>,
}

/// Result of a quiz submission.
#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub result: QuizAnswerResult,
    /// Present only when the answer was correct.
    pub score: Option<UserScore>,
}

#[async_trait]
pub trait Store: Send + Sync {
    /// Returns the user's score, creating the zero/bronze row on first read.
    async fn get_or_create_score(&self, user_id: &str) -> Result<UserScore, AppError>;

    /// The ledger's single update operation.
    async fn apply_points(
        &self,
        user_id: &str,
        delta: i32,
        category: PointCategory,
    ) -> Result<UserScore, AppError>;

    /// Lists challenges in creation order.
    async fn list_challenges(&self, filter: ChallengeFilter) -> Result<Vec<Challenge>, AppError>;

    async fn create_challenge(&self, new: NewChallenge) -> Result<Challenge, AppError>;

    /// Flips completion for the pair. Fails with `NotFound` (and mutates nothing)
    /// if the challenge does not exist.
    async fn toggle_challenge(
        &self,
        user_id: &str,
        challenge_id: Uuid,
    ) -> Result<ToggleOutcome, AppError>;

    async fn list_progress(&self, user_id: &str) -> Result<Vec<ChallengeProgress>, AppError>;

    /// Deletes every non-fixed challenge (and its progress rows), then inserts `new`.
    async fn replace_generated_challenges(
        &self,
        new: Vec<NewChallenge>,
    ) -> Result<Vec<Challenge>, AppError>;

    async fn list_quiz_questions(&self) -> Result<Vec<QuizQuestion>, AppError>;

    async fn create_quiz_question(&self, new: NewQuizQuestion) -> Result<QuizQuestion, AppError>;

    /// Deletes every question (and its results), then inserts `new`.
    async fn replace_quiz_questions(
        &self,
        new: Vec<NewQuizQuestion>,
    ) -> Result<Vec<QuizQuestion>, AppError>;

    /// Appends a graded submission, crediting the quiz ledger when correct.
    /// Fails with `NotFound` if the question does not exist.
    async fn record_quiz_answer(
        &self,
        user_id: &str,
        question_id: Uuid,
        grade: Grade,
    ) -> Result<AnswerOutcome, AppError>;

    async fn list_quiz_results(&self, user_id: &str) -> Result<Vec<QuizAnswerResult>, AppError>;

    /// Newest first.
    async fn list_articles(&self) -> Result<Vec<Article>, AppError>;

    /// Ordered by name.
    async fn list_collection_points(&self) -> Result<Vec<CollectionPoint>, AppError>;

    /// Creation order.
    async fn list_daily_phrases(&self) -> Result<Vec<DailyPhrase>, AppError>;

    /// Fills each table of `content` only if that table is empty.
    async fn seed_if_empty(&self, content: SeedContent) -> Result<SeedReport, AppError>;
}
