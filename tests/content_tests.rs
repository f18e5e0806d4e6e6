// tests/content_tests.rs

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use ecoquest::{
    config::Config,
    generator::{ChallengeDraft, ContentGenerator, GenerationError, SharedGenerator},
    models::quiz::NewQuizQuestion,
    routes,
    state::AppState,
    storage::{MemoryStore, SharedStore},
};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Always fails, as an unreachable provider would.
struct FailingGenerator;

#[async_trait]
impl ContentGenerator for FailingGenerator {
    async fn generate_challenges(
        &self,
        _count: usize,
    ) -> Result<Vec<ChallengeDraft>, GenerationError> {
        Err(GenerationError::Status(503, "unavailable".to_string()))
    }

    async fn generate_quiz_questions(
        &self,
        _count: usize,
    ) -> Result<Vec<NewQuizQuestion>, GenerationError> {
        Err(GenerationError::EmptyResponse)
    }
}

/// Returns fixed drafts, including markup and out-of-range points.
struct StubGenerator;

#[async_trait]
impl ContentGenerator for StubGenerator {
    async fn generate_challenges(
        &self,
        _count: usize,
    ) -> Result<Vec<ChallengeDraft>, GenerationError> {
        Ok(vec![
            ChallengeDraft {
                challenge: "<b>Leve</b> sua própria sacola".to_string(),
                points: 50,
            },
            ChallengeDraft {
                challenge: "Desligue o carregador da tomada".to_string(),
                points: 7,
            },
        ])
    }

    async fn generate_quiz_questions(
        &self,
        _count: usize,
    ) -> Result<Vec<NewQuizQuestion>, GenerationError> {
        Ok(vec![NewQuizQuestion {
            question: "Qual destes materiais é compostável?".to_string(),
            options: vec![
                "Casca de fruta".to_string(),
                "Vidro".to_string(),
                "Isopor".to_string(),
                "Alumínio".to_string(),
            ],
            correct_answer: 0,
            points: 10,
        }])
    }
}

fn test_state(generator: Option<SharedGenerator>) -> AppState {
    let store: SharedStore = Arc::new(MemoryStore::new());
    AppState {
        store,
        generator,
        config: Config {
            rust_log: "error".to_string(),
            content_rng_seed: Some(7),
            ..Config::default()
        },
    }
}

async fn spawn_app(generator: Option<SharedGenerator>) -> String {
    let app = routes::create_router(test_state(generator));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn get_json(client: &reqwest::Client, url: String) -> Value {
    let response = client.get(url).send().await.expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
    response.json().await.unwrap()
}

async fn post_json(client: &reqwest::Client, url: String) -> Value {
    let response = client.post(url).send().await.expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
    response.json().await.unwrap()
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let address = spawn_app(None).await;
    let client = reqwest::Client::new();

    // Act 1: first run fills every table
    let first = post_json(&client, format!("{}/api/seed-data", address)).await;
    assert_eq!(first["challenges"].as_array().unwrap().len(), 8);
    assert_eq!(first["questions"].as_array().unwrap().len(), 5);
    assert!(!first["daily_phrases"].as_array().unwrap().is_empty());
    assert!(!first["articles"].as_array().unwrap().is_empty());
    assert!(!first["collection_points"].as_array().unwrap().is_empty());

    // Act 2: second run inserts nothing
    let second = post_json(&client, format!("{}/api/seed-data", address)).await;
    assert!(second["challenges"].as_array().unwrap().is_empty());
    assert!(second["questions"].as_array().unwrap().is_empty());
    assert!(second["daily_phrases"].as_array().unwrap().is_empty());

    let fixed = get_json(&client, format!("{}/api/challenges/fixed", address)).await;
    assert_eq!(fixed.as_array().unwrap().len(), 8);
    let questions = get_json(&client, format!("{}/api/quiz-questions", address)).await;
    assert_eq!(questions.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn daily_phrase_is_empty_until_seeded() {
    let address = spawn_app(None).await;
    let client = reqwest::Client::new();

    let before = get_json(&client, format!("{}/api/daily-phrase", address)).await;
    assert_eq!(before["phrase"], "");

    post_json(&client, format!("{}/api/seed-data", address)).await;

    let after = get_json(&client, format!("{}/api/daily-phrase", address)).await;
    assert!(!after["phrase"].as_str().unwrap().is_empty());

    // Same day, same phrase
    let again = get_json(&client, format!("{}/api/daily-phrase", address)).await;
    assert_eq!(after["phrase"], again["phrase"]);
}

#[tokio::test]
async fn generation_replaces_only_generated_challenges() {
    // Arrange: no generator configured, so the fallback list is used
    let address = spawn_app(None).await;
    let client = reqwest::Client::new();
    let user = "gen_user";
    post_json(&client, format!("{}/api/seed-data", address)).await;

    let first_batch = post_json(&client, format!("{}/api/generate-challenges", address)).await;
    let first_batch = first_batch.as_array().unwrap().clone();
    assert_eq!(first_batch.len(), 5);
    assert!(first_batch.iter().all(|c| c["is_fixed"] == false));

    // Complete one generated challenge
    let response = client
        .post(format!("{}/api/toggle-challenge", address))
        .json(&json!({ "userId": user, "challengeId": first_batch[0]["id"] }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    // Act: regenerate
    let second_batch = post_json(&client, format!("{}/api/generate-challenges", address)).await;
    assert_eq!(second_batch.as_array().unwrap().len(), 5);

    // Assert: fixed kept, old generated gone with their progress
    let all = get_json(&client, format!("{}/api/challenges", address)).await;
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 13);
    assert!(!all.iter().any(|c| c["id"] == first_batch[0]["id"]));

    let random = get_json(&client, format!("{}/api/challenges/random", address)).await;
    assert_eq!(random, second_batch);

    let progress = get_json(&client, format!("{}/api/user-progress/{}", address, user)).await;
    assert!(progress.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn failing_generator_falls_back_to_catalog() {
    let address = spawn_app(Some(Arc::new(FailingGenerator))).await;
    let client = reqwest::Client::new();

    let challenges = post_json(&client, format!("{}/api/generate-challenges", address)).await;
    assert_eq!(challenges.as_array().unwrap().len(), 5);

    let questions = post_json(&client, format!("{}/api/generate-quiz-questions", address)).await;
    let questions = questions.as_array().unwrap();
    assert_eq!(questions.len(), 5);
    assert!(questions.iter().all(|q| q["options"].as_array().unwrap().len() == 4));
}

#[tokio::test]
async fn generated_content_is_cleaned() {
    let address = spawn_app(Some(Arc::new(StubGenerator))).await;
    let client = reqwest::Client::new();

    let challenges = post_json(&client, format!("{}/api/generate-challenges", address)).await;
    let challenges = challenges.as_array().unwrap();
    assert_eq!(challenges.len(), 2);
    assert_eq!(challenges[0]["challenge"], "Leve sua própria sacola");
    assert_eq!(challenges[0]["points"], 15);
    assert_eq!(challenges[1]["points"], 7);

    let questions = post_json(&client, format!("{}/api/generate-quiz-questions", address)).await;
    let questions = questions.as_array().unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0]["correct_answer"], 0);
}

#[tokio::test]
async fn daily_challenge_picks_a_generated_one() {
    let address = spawn_app(None).await;
    let client = reqwest::Client::new();

    let empty = get_json(&client, format!("{}/api/challenges/daily", address)).await;
    assert_eq!(empty["challenge"], "");
    assert!(empty["id"].is_null());

    let batch = post_json(&client, format!("{}/api/generate-challenges", address)).await;
    let daily = get_json(&client, format!("{}/api/challenges/daily", address)).await;

    assert!(
        batch
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c["id"] == daily["id"] && c["challenge"] == daily["challenge"])
    );
}

#[tokio::test]
async fn content_lists_are_ordered() {
    let address = spawn_app(None).await;
    let client = reqwest::Client::new();
    post_json(&client, format!("{}/api/seed-data", address)).await;

    let points = get_json(&client, format!("{}/api/collection-points", address)).await;
    let names: Vec<&str> = points
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    let articles = get_json(&client, format!("{}/api/articles", address)).await;
    assert!(!articles.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn openapi_document_lists_scoring_routes() {
    let app = routes::create_router(test_state(None));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let doc: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(doc["paths"]["/api/toggle-challenge"]["post"].is_object());
    assert!(doc["paths"]["/api/user-score/{user_id}"]["get"].is_object());
    assert!(doc["components"]["schemas"]["UserScore"].is_object());
}
