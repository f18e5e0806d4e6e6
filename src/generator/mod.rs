// src/generator/mod.rs

//! Optional AI content generation with a mandatory built-in fallback.

pub mod catalog;
pub mod openai;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use validator::Validate;

use crate::{
    config::{
        GENERATED_CHALLENGE_MAX_POINTS, GENERATED_CHALLENGE_MIN_POINTS, GENERATED_QUESTION_COUNT,
    },
    error::AppError,
    models::{challenge::NewChallenge, content::SeedReport, quiz::NewQuizQuestion},
    storage::Store,
    utils::{
        html::sanitize_text,
        sampling::{content_rng, sample_without_replacement},
    },
};

pub use openai::OpenAiGenerator;

pub type SharedGenerator = Arc<dyn ContentGenerator>;

/// A challenge as proposed by the generator, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct ChallengeDraft {
    pub challenge: String,
    pub points: i32,
}

#[derive(Debug)]
pub enum GenerationError {
    Request(reqwest::Error),
    Status(u16, String),
    EmptyResponse,
    Malformed(serde_json::Error),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Request(e) => write!(f, "generation request failed: {}", e),
            GenerationError::Status(code, body) => {
                write!(f, "generation service returned {}: {}", code, body)
            }
            GenerationError::EmptyResponse => write!(f, "generation service returned no content"),
            GenerationError::Malformed(e) => write!(f, "generated content is malformed: {}", e),
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Request(err)
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::Malformed(err)
    }
}

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_challenges(&self, count: usize)
    -> Result<Vec<ChallengeDraft>, GenerationError>;

    async fn generate_quiz_questions(
        &self,
        count: usize,
    ) -> Result<Vec<NewQuizQuestion>, GenerationError>;
}

/// Cleans generated challenges: plain text only, points clamped, blanks dropped.
pub fn normalize_challenges(drafts: Vec<ChallengeDraft>, count: usize) -> Vec<NewChallenge> {
    drafts
        .into_iter()
        .filter_map(|draft| {
            let challenge = sanitize_text(&draft.challenge);
            let new = NewChallenge {
                challenge,
                is_fixed: false,
                points: draft
                    .points
                    .clamp(GENERATED_CHALLENGE_MIN_POINTS, GENERATED_CHALLENGE_MAX_POINTS),
            };
            new.validate().is_ok().then_some(new)
        })
        .take(count)
        .collect()
}

/// Cleans generated questions and drops the ones that fail validation.
pub fn normalize_questions(drafts: Vec<NewQuizQuestion>, count: usize) -> Vec<NewQuizQuestion> {
    drafts
        .into_iter()
        .map(|mut q| {
            q.question = sanitize_text(&q.question);
            q.options = q.options.iter().map(|o| sanitize_text(o)).collect();
            q
        })
        .filter(|q| q.validate().is_ok())
        .take(count)
        .collect()
}

/// Generated challenges, or a sample of the fallback pool when generation is
/// unavailable, fails, or yields nothing usable.
pub async fn challenges_or_fallback(
    generator: Option<&dyn ContentGenerator>,
    count: usize,
    seed: Option<u64>,
) -> Vec<NewChallenge> {
    if let Some(generator) = generator {
        match generator.generate_challenges(count).await {
            Ok(drafts) => {
                let challenges = normalize_challenges(drafts, count);
                if !challenges.is_empty() {
                    return challenges;
                }
                tracing::warn!("Generator returned no usable challenges, using fallback list");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Challenge generation failed, using fallback list");
            }
        }
    }

    sample_without_replacement(&catalog::fallback_challenges(), count, &mut content_rng(seed))
}

/// Generated questions, or a sample of the built-in pool.
pub async fn questions_or_fallback(
    generator: Option<&dyn ContentGenerator>,
    count: usize,
    seed: Option<u64>,
) -> Vec<NewQuizQuestion> {
    if let Some(generator) = generator {
        match generator.generate_quiz_questions(count).await {
            Ok(drafts) => {
                let questions = normalize_questions(drafts, count);
                if !questions.is_empty() {
                    return questions;
                }
                tracing::warn!("Generator returned no usable questions, using fallback pool");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Question generation failed, using fallback pool");
            }
        }
    }

    sample_without_replacement(&catalog::question_pool(), count, &mut content_rng(seed))
}

/// Fills empty tables with the built-in catalog and a sample of the question pool.
pub async fn seed_store(store: &dyn Store, seed: Option<u64>) -> Result<SeedReport, AppError> {
    let questions = sample_without_replacement(
        &catalog::question_pool(),
        GENERATED_QUESTION_COUNT,
        &mut content_rng(seed),
    );
    let report = store.seed_if_empty(catalog::seed_content(questions)).await?;
    tracing::info!(
        challenges = report.challenges.len(),
        questions = report.questions.len(),
        phrases = report.daily_phrases.len(),
        articles = report.articles.len(),
        collection_points = report.collection_points.len(),
        "Seeding finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    #[async_trait]
    impl ContentGenerator for Failing {
        async fn generate_challenges(
            &self,
            _count: usize,
        ) -> Result<Vec<ChallengeDraft>, GenerationError> {
            Err(GenerationError::EmptyResponse)
        }

        async fn generate_quiz_questions(
            &self,
            _count: usize,
        ) -> Result<Vec<NewQuizQuestion>, GenerationError> {
            Err(GenerationError::Status(429, "quota exceeded".to_string()))
        }
    }

    #[test]
    fn challenge_points_are_clamped_and_markup_removed() {
        let drafts = vec![
            ChallengeDraft {
                challenge: "<i>Leve</i> sua própria caneca".to_string(),
                points: 40,
            },
            ChallengeDraft {
                challenge: "   ".to_string(),
                points: 8,
            },
            ChallengeDraft {
                challenge: "Recuse canudos plásticos".to_string(),
                points: 1,
            },
        ];

        let normalized = normalize_challenges(drafts, 5);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].challenge, "Leve sua própria caneca");
        assert_eq!(normalized[0].points, GENERATED_CHALLENGE_MAX_POINTS);
        assert_eq!(normalized[1].points, GENERATED_CHALLENGE_MIN_POINTS);
        assert!(normalized.iter().all(|c| !c.is_fixed));
    }

    #[test]
    fn invalid_questions_are_dropped() {
        let mut pool = catalog::question_pool();
        pool[0].options.pop();
        pool[1].correct_answer = 9;

        let normalized = normalize_questions(pool, 30);
        assert_eq!(normalized.len(), 18);
    }

    #[tokio::test]
    async fn failing_generator_falls_back() {
        let failing: &dyn ContentGenerator = &Failing;
        let challenges = challenges_or_fallback(Some(failing), 5, Some(3)).await;
        assert_eq!(challenges.len(), 5);
        let pool = catalog::fallback_challenges();
        assert!(challenges.iter().all(|c| pool.iter().any(|p| p.challenge == c.challenge)));

        let questions = questions_or_fallback(Some(failing), 5, Some(3)).await;
        assert_eq!(questions.len(), 5);
    }

    #[tokio::test]
    async fn no_generator_uses_fallback() {
        let questions = questions_or_fallback(None, 5, None).await;
        assert_eq!(questions.len(), 5);
    }
}
