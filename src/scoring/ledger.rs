// src/scoring/ledger.rs

use chrono::{DateTime, Utc};

use crate::{
    models::score::{PointCategory, UserScore},
    scoring::rank::Rank,
};

/// Applies a point change to one category of the ledger.
///
/// * `delta` may be negative (un-completing a challenge).
/// * The touched counter is clamped at zero.
/// * `total_points` and `rank` are recomputed from the counters, never adjusted directly.
pub fn apply_points(
    score: &mut UserScore,
    delta: i32,
    category: PointCategory,
    now: DateTime<Utc>,
) {
    let counter = match category {
        PointCategory::Challenge => &mut score.challenge_points,
        PointCategory::Quiz => &mut score.quiz_points,
    };
    *counter = counter.saturating_add(delta).max(0);

    score.total_points = score.challenge_points.saturating_add(score.quiz_points);
    score.rank = Rank::for_points(score.total_points);
    score.updated_at = now;
}
