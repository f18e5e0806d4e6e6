// src/scoring/progress.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::challenge::{Challenge, ChallengeProgress};

/// Outcome of flipping one (user, challenge) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Toggle {
    /// The row to upsert.
    pub progress: ChallengeProgress,
    /// Change to apply to the challenge ledger; 0 means no ledger write.
    pub points_delta: i32,
}

/// Computes the next progress state for a toggle.
///
/// A missing row counts as "not completed yet", so the first toggle always completes.
/// Un-completing subtracts what was actually earned, not the challenge's current points.
pub fn toggle(
    existing: Option<ChallengeProgress>,
    user_id: &str,
    challenge: &Challenge,
    now: DateTime<Utc>,
) -> Toggle {
    match existing {
        Some(mut progress) => {
            let completed = !progress.is_completed;
            let points_delta = if completed {
                challenge.points
            } else {
                -progress.points_earned
            };

            progress.is_completed = completed;
            progress.points_earned = if completed { challenge.points } else { 0 };
            progress.completed_at = if completed { Some(now) } else { None };

            Toggle {
                progress,
                points_delta,
            }
        }
        None => Toggle {
            progress: ChallengeProgress {
                id: Uuid::new_v4(),
                user_id: user_id.to_string(),
                challenge_id: challenge.id,
                is_completed: true,
                points_earned: challenge.points,
                completed_at: Some(now),
                created_at: now,
            },
            points_delta: challenge.points,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn challenge(points: i32) -> Challenge {
        Challenge {
            id: Uuid::new_v4(),
            challenge: "Caminhe ou use bicicleta para uma viagem curta".to_string(),
            is_fixed: true,
            points,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn first_toggle_completes() {
        let c = challenge(10);
        let t = toggle(None, "u1", &c, Utc::now());

        assert!(t.progress.is_completed);
        assert_eq!(t.progress.points_earned, 10);
        assert!(t.progress.completed_at.is_some());
        assert_eq!(t.progress.challenge_id, c.id);
        assert_eq!(t.points_delta, 10);
    }

    #[test]
    fn second_toggle_reverts_exactly() {
        let c = challenge(10);
        let first = toggle(None, "u1", &c, Utc::now());
        let second = toggle(Some(first.progress.clone()), "u1", &c, Utc::now());

        assert!(!second.progress.is_completed);
        assert_eq!(second.progress.points_earned, 0);
        assert_eq!(second.progress.completed_at, None);
        assert_eq!(second.progress.id, first.progress.id);
        assert_eq!(first.points_delta + second.points_delta, 0);
    }

    #[test]
    fn uncompleting_subtracts_what_was_earned() {
        let mut c = challenge(10);
        let first = toggle(None, "u1", &c, Utc::now());

        // Reward changed after completion.
        c.points = 25;
        let second = toggle(Some(first.progress), "u1", &c, Utc::now());
        assert_eq!(second.points_delta, -10);

        let third = toggle(Some(second.progress), "u1", &c, Utc::now());
        assert_eq!(third.points_delta, 25);
        assert_eq!(third.progress.points_earned, 25);
    }
}
