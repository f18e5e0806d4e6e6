// src/storage/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        challenge::{Challenge, ChallengeFilter, ChallengeProgress, NewChallenge},
        content::{Article, CollectionPoint, DailyPhrase, SeedContent, SeedReport},
        quiz::{NewQuizQuestion, QuizAnswerResult, QuizQuestion},
        score::{PointCategory, UserScore},
    },
    scoring::{answer, answer::Grade, ledger, progress},
    storage::{AnswerOutcome, Store, ToggleOutcome},
};

#[derive(Default)]
struct Tables {
    scores: HashMap<String, UserScore>,
    challenges: Vec<Challenge>,
    progress: Vec<ChallengeProgress>,
    questions: Vec<QuizQuestion>,
    results: Vec<QuizAnswerResult>,
    articles: Vec<Article>,
    collection_points: Vec<CollectionPoint>,
    phrases: Vec<DailyPhrase>,
}

impl Tables {
    fn apply_points(&mut self, user_id: &str, delta: i32, category: PointCategory) -> UserScore {
        let now = Utc::now();
        let score = self
            .scores
            .entry(user_id.to_string())
            .or_insert_with(|| UserScore::new(user_id, now));
        ledger::apply_points(score, delta, category, now);
        score.clone()
    }
}

/// Process-local store. Used when no `DATABASE_URL` is configured and by the tests.
///
/// One mutex guards all tables, so every operation is atomic with respect to the others.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_or_create_score(&self, user_id: &str) -> Result<UserScore, AppError> {
        let mut tables = self.tables.lock().await;
        let score = tables
            .scores
            .entry(user_id.to_string())
            .or_insert_with(|| UserScore::new(user_id, Utc::now()));
        Ok(score.clone())
    }

    async fn apply_points(
        &self,
        user_id: &str,
        delta: i32,
        category: PointCategory,
    ) -> Result<UserScore, AppError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.apply_points(user_id, delta, category))
    }

    async fn list_challenges(&self, filter: ChallengeFilter) -> Result<Vec<Challenge>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .challenges
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }

    async fn create_challenge(&self, new: NewChallenge) -> Result<Challenge, AppError> {
        let mut tables = self.tables.lock().await;
        let challenge = Challenge::from_new(new, Utc::now());
        tables.challenges.push(challenge.clone());
        Ok(challenge)
    }

    async fn toggle_challenge(
        &self,
        user_id: &str,
        challenge_id: Uuid,
    ) -> Result<ToggleOutcome, AppError> {
        let mut tables = self.tables.lock().await;

        let challenge = tables
            .challenges
            .iter()
            .find(|c| c.id == challenge_id)
            .cloned()
            .ok_or(AppError::NotFound("Challenge not found".to_string()))?;

        let position = tables
            .progress
            .iter()
            .position(|p| p.user_id == user_id && p.challenge_id == challenge_id);
        let existing = position.map(|i| tables.progress[i].clone());

        let toggle = progress::toggle(existing, user_id, &challenge, Utc::now());

        match position {
            Some(i) => tables.progress[i] = toggle.progress.clone(),
            None => tables.progress.push(toggle.progress.clone()),
        }

        let score = (toggle.points_delta != 0)
            .then(|| tables.apply_points(user_id, toggle.points_delta, PointCategory::Challenge));

        Ok(ToggleOutcome {
            progress: toggle.progress,
            score,
        })
    }

    async fn list_progress(&self, user_id: &str) -> Result<Vec<ChallengeProgress>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .progress
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn replace_generated_challenges(
        &self,
        new: Vec<NewChallenge>,
    ) -> Result<Vec<Challenge>, AppError> {
        let mut tables = self.tables.lock().await;

        let Tables {
            challenges,
            progress,
            ..
        } = &mut *tables;
        challenges.retain(|c| c.is_fixed);
        progress.retain(|p| challenges.iter().any(|c| c.id == p.challenge_id));

        let now = Utc::now();
        let created: Vec<Challenge> = new
            .into_iter()
            .map(|n| Challenge::from_new(n, now))
            .collect();
        challenges.extend(created.iter().cloned());

        Ok(created)
    }

    async fn list_quiz_questions(&self) -> Result<Vec<QuizQuestion>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.questions.clone())
    }

    async fn create_quiz_question(&self, new: NewQuizQuestion) -> Result<QuizQuestion, AppError> {
        let mut tables = self.tables.lock().await;
        let question = QuizQuestion::from_new(new, Utc::now());
        tables.questions.push(question.clone());
        Ok(question)
    }

    async fn replace_quiz_questions(
        &self,
        new: Vec<NewQuizQuestion>,
    ) -> Result<Vec<QuizQuestion>, AppError> {
        let mut tables = self.tables.lock().await;
        tables.results.clear();

        let now = Utc::now();
        let created: Vec<QuizQuestion> = new
            .into_iter()
            .map(|n| QuizQuestion::from_new(n, now))
            .collect();
        tables.questions = created.clone();

        Ok(created)
    }

    async fn record_quiz_answer(
        &self,
        user_id: &str,
        question_id: Uuid,
        grade: Grade,
    ) -> Result<AnswerOutcome, AppError> {
        let mut tables = self.tables.lock().await;

        if !tables.questions.iter().any(|q| q.id == question_id) {
            return Err(AppError::NotFound("Quiz question not found".to_string()));
        }

        let score = grade
            .awards_points()
            .then(|| tables.apply_points(user_id, grade.points_earned, PointCategory::Quiz));

        let result = answer::result_row(user_id, question_id, grade, Utc::now());
        tables.results.push(result.clone());

        Ok(AnswerOutcome { result, score })
    }

    async fn list_quiz_results(&self, user_id: &str) -> Result<Vec<QuizAnswerResult>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .results
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_articles(&self) -> Result<Vec<Article>, AppError> {
        let tables = self.tables.lock().await;
        // Inserted oldest first.
        Ok(tables.articles.iter().rev().cloned().collect())
    }

    async fn list_collection_points(&self) -> Result<Vec<CollectionPoint>, AppError> {
        let tables = self.tables.lock().await;
        let mut points = tables.collection_points.clone();
        points.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(points)
    }

    async fn list_daily_phrases(&self) -> Result<Vec<DailyPhrase>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.phrases.clone())
    }

    async fn seed_if_empty(&self, content: SeedContent) -> Result<SeedReport, AppError> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let mut report = SeedReport::default();

        if tables.challenges.is_empty() {
            report.challenges = content
                .challenges
                .into_iter()
                .map(|n| Challenge::from_new(n, now))
                .collect();
            tables.challenges.extend(report.challenges.iter().cloned());
        }

        if tables.questions.is_empty() {
            report.questions = content
                .questions
                .into_iter()
                .map(|n| QuizQuestion::from_new(n, now))
                .collect();
            tables.questions.extend(report.questions.iter().cloned());
        }

        if tables.phrases.is_empty() {
            report.daily_phrases = content
                .phrases
                .into_iter()
                .map(|p| DailyPhrase::from_new(p, now))
                .collect();
            tables.phrases.extend(report.daily_phrases.iter().cloned());
        }

        if tables.articles.is_empty() {
            report.articles = content
                .articles
                .into_iter()
                .map(|a| Article::from_new(a, now))
                .collect();
            tables.articles.extend(report.articles.iter().cloned());
        }

        if tables.collection_points.is_empty() {
            report.collection_points = content
                .collection_points
                .into_iter()
                .map(|c| CollectionPoint::from_new(c, now))
                .collect();
            tables
                .collection_points
                .extend(report.collection_points.iter().cloned());
        }

        Ok(report)
    }
}
