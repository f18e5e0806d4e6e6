// src/scoring/rank.rs

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{GOLD_THRESHOLD, SILVER_THRESHOLD};

/// Medal tier derived solely from a user's cumulative points.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    #[default]
    Bronze,
    Silver,
    Gold,
}

impl Rank {
    pub fn for_points(total_points: i32) -> Rank {
        if total_points >= GOLD_THRESHOLD {
            Rank::Gold
        } else if total_points >= SILVER_THRESHOLD {
            Rank::Silver
        } else {
            Rank::Bronze
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Bronze => "bronze",
            Rank::Silver => "silver",
            Rank::Gold => "gold",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct UnknownRank(pub String);

impl fmt::Display for UnknownRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown rank '{}'", self.0)
    }
}

impl std::error::Error for UnknownRank {}

impl FromStr for Rank {
    type Err = UnknownRank;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bronze" => Ok(Rank::Bronze),
            "silver" => Ok(Rank::Silver),
            "gold" => Ok(Rank::Gold),
            other => Err(UnknownRank(other.to_string())),
        }
    }
}

/// Lets `FromRow` decode the `rank` TEXT column.
impl TryFrom<String> for Rank {
    type Error = UnknownRank;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
