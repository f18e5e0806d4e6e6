// src/models/content.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{
    challenge::{Challenge, NewChallenge},
    quiz::{NewQuizQuestion, QuizQuestion},
};

/// Represents the 'articles' table: awareness reading material.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// URL of the cover image, if any.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Represents the 'collection_points' table: where recyclables can be dropped off.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct CollectionPoint {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    /// Accepted waste types (e.g. "Papel", "Vidro").
    /// Stored as a JSON array in the database.
    #[sqlx(json)]
    pub waste_types: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize, ToSchema)]
pub struct DailyPhrase {
    pub id: Uuid,
    pub phrase: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewCollectionPoint {
    pub name: String,
    pub address: String,
    pub waste_types: Vec<String>,
}

impl Article {
    pub fn from_new(new: NewArticle, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            image: new.image,
            created_at: now,
        }
    }
}

impl CollectionPoint {
    pub fn from_new(new: NewCollectionPoint, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            address: new.address,
            waste_types: new.waste_types,
            created_at: now,
        }
    }
}

impl DailyPhrase {
    pub fn from_new(phrase: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            phrase,
            created_at: now,
        }
    }
}

/// Everything `seed_if_empty` may insert. Each table is only filled when empty.
#[derive(Debug, Clone, Default)]
pub struct SeedContent {
    pub challenges: Vec<NewChallenge>,
    pub questions: Vec<NewQuizQuestion>,
    pub phrases: Vec<String>,
    pub articles: Vec<NewArticle>,
    pub collection_points: Vec<NewCollectionPoint>,
}

/// Rows actually inserted by a seeding run. Empty lists mean the table already had data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SeedReport {
    pub challenges: Vec<Challenge>,
    pub questions: Vec<QuizQuestion>,
    pub daily_phrases: Vec<DailyPhrase>,
    pub articles: Vec<Article>,
    pub collection_points: Vec<CollectionPoint>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DailyPhraseResponse {
    /// Empty when no phrases exist.
    pub phrase: String,
}
