// src/models/challenge.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::score::{UserScore, validate_user_id};

/// Represents the 'challenges' table in the database.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Challenge {
    pub id: Uuid,

    /// The action the user is asked to take.
    pub challenge: String,

    /// Curated challenges are fixed; generated ones can be replaced in bulk.
    pub is_fixed: bool,

    /// Reward credited to the challenge ledger on completion.
    pub points: i32,

    pub created_at: DateTime<Utc>,
}

impl Challenge {
    pub fn from_new(new: NewChallenge, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            challenge: new.challenge,
            is_fixed: new.is_fixed,
            points: new.points,
            created_at: now,
        }
    }
}

/// Represents the 'user_challenge_progress' table.
/// Unique per (user_id, challenge_id); toggles update the row in place.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct ChallengeProgress {
    pub id: Uuid,
    pub user_id: String,
    pub challenge_id: Uuid,
    pub is_completed: bool,

    /// The challenge's points while completed, 0 otherwise.
    pub points_earned: i32,

    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a challenge (also the shape of seed and fallback content).
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewChallenge {
    #[validate(length(min = 1, max = 500))]
    pub challenge: String,
    #[serde(default = "default_fixed")]
    pub is_fixed: bool,
    #[validate(range(min = 1, max = 1000))]
    pub points: i32,
}

fn default_fixed() -> bool {
    true
}

/// Filter applied when listing challenges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeFilter {
    All,
    Fixed,
    Generated,
}

impl ChallengeFilter {
    pub fn matches(&self, challenge: &Challenge) -> bool {
        match self {
            ChallengeFilter::All => true,
            ChallengeFilter::Fixed => challenge.is_fixed,
            ChallengeFilter::Generated => !challenge.is_fixed,
        }
    }
}

/// DTO for toggling a challenge.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleChallengeRequest {
    #[validate(custom(function = validate_user_id))]
    pub user_id: String,
    pub challenge_id: Uuid,
}

/// Result of a toggle: the progress row plus the score when points moved.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ToggleChallengeResponse {
    #[serde(flatten)]
    pub progress: ChallengeProgress,
    pub score: Option<UserScore>,
}

/// The "random challenge of the day" shown on the home page.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DailyChallengeResponse {
    /// Empty when no generated challenges exist.
    pub challenge: String,
    pub id: Option<Uuid>,
    pub points: Option<i32>,
}
