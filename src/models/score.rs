// src/models/score.rs

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::scoring::rank::Rank;

/// User ids come from the external auth provider and are opaque to us,
/// but must be a plain token.
static USER_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.:@-]{1,128}$").expect("user id pattern is valid")
});

/// Represents the 'user_scores' table in the database.
/// One row per user, created lazily with zero points.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct UserScore {
    pub user_id: String,

    /// Always `challenge_points + quiz_points`.
    pub total_points: i32,

    pub challenge_points: i32,

    pub quiz_points: i32,

    /// Always `Rank::for_points(total_points)`.
    #[sqlx(try_from = "String")]
    pub rank: Rank,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl UserScore {
    /// A fresh bronze record with every counter at zero.
    pub fn new(user_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            total_points: 0,
            challenge_points: 0,
            quiz_points: 0,
            rank: Rank::Bronze,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Which counter of the ledger a point change belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PointCategory {
    Challenge,
    Quiz,
}

pub fn validate_user_id(user_id: &str) -> Result<(), validator::ValidationError> {
    if !USER_ID_PATTERN.is_match(user_id) {
        return Err(validator::ValidationError::new("invalid_user_id"));
    }
    Ok(())
}
