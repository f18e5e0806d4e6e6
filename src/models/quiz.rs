// src/models/quiz.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::score::{UserScore, validate_user_id};

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

/// Represents the 'quiz_questions' table in the database.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct QuizQuestion {
    pub id: Uuid,

    pub question: String,

    /// Ordered list of 4 options.
    /// Stored as a JSON array in the database.
    #[sqlx(json)]
    pub options: Vec<String>,

    /// Index (0-3) of the correct option.
    pub correct_answer: i32,

    /// Nominal value of the question. Answers are scored with a fixed constant instead.
    pub points: i32,

    pub created_at: DateTime<Utc>,
}

impl QuizQuestion {
    pub fn from_new(new: NewQuizQuestion, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            question: new.question,
            options: new.options,
            correct_answer: new.correct_answer,
            points: new.points,
            created_at: now,
        }
    }
}

/// Represents the 'user_quiz_results' table. Append-only.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct QuizAnswerResult {
    pub id: Uuid,
    pub user_id: String,
    pub question_id: Uuid,
    pub is_correct: bool,
    pub points_earned: i32,
    pub answered_at: DateTime<Utc>,
}

/// DTO for creating a question. Also the shape the content generator returns.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewQuizQuestion {
    #[validate(length(min = 1, max = 1000))]
    pub question: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    #[validate(range(min = 0, max = 3))]
    pub correct_answer: i32,
    #[serde(default = "default_points")]
    #[validate(range(min = 1, max = 100))]
    pub points: i32,
}

fn default_points() -> i32 {
    10
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() != OPTION_COUNT {
        return Err(validator::ValidationError::new("options_must_have_four_entries"));
    }
    for opt in options {
        if opt.trim().is_empty() {
            return Err(validator::ValidationError::new("option_cannot_be_empty"));
        }
        if opt.len() > 500 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

/// DTO for submitting one quiz answer.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuizAnswerRequest {
    #[validate(custom(function = validate_user_id))]
    pub user_id: String,
    pub question_id: Uuid,
    #[validate(range(min = 0, max = 3))]
    pub selected_answer: i32,
    #[validate(range(min = 0, max = 3))]
    pub correct_answer: i32,
}

/// Result of a submission: the appended row plus the score when points were awarded.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuizAnswerResponse {
    #[serde(flatten)]
    pub result: QuizAnswerResult,
    pub score: Option<UserScore>,
}
