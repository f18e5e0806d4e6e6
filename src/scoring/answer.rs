// src/scoring/answer.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{config::QUIZ_CORRECT_ANSWER_POINTS, models::quiz::QuizAnswerResult};

/// Grading of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grade {
    pub is_correct: bool,
    pub points_earned: i32,
}

impl Grade {
    /// Whether this grade moves the quiz ledger.
    pub fn awards_points(&self) -> bool {
        self.is_correct && self.points_earned > 0
    }
}

/// Strict index comparison. A correct answer is always worth
/// `QUIZ_CORRECT_ANSWER_POINTS`, independent of the question's stored points.
pub fn grade(selected_answer: i32, correct_answer: i32) -> Grade {
    let is_correct = selected_answer == correct_answer;
    Grade {
        is_correct,
        points_earned: if is_correct { QUIZ_CORRECT_ANSWER_POINTS } else { 0 },
    }
}

/// Builds the append-only result row for a graded submission.
pub fn result_row(
    user_id: &str,
    question_id: Uuid,
    grade: Grade,
    now: DateTime<Utc>,
) -> QuizAnswerResult {
    QuizAnswerResult {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        question_id,
        is_correct: grade.is_correct,
        points_earned: grade.points_earned,
        answered_at: now,
    }
}
