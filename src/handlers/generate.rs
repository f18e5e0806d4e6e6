// src/handlers/generate.rs

use axum::{Json, extract::State};

use crate::{
    config::{GENERATED_CHALLENGE_COUNT, GENERATED_QUESTION_COUNT},
    error::AppError,
    generator::{challenges_or_fallback, questions_or_fallback, seed_store},
    models::{challenge::Challenge, content::SeedReport, quiz::QuizQuestion},
    state::AppState,
};

/// Replaces every generated challenge with a fresh batch.
///
/// Fixed challenges are kept. Progress on the removed challenges is deleted
/// with them; scores already earned are left as they are.
#[utoipa::path(
    post,
    path = "/api/generate-challenges",
    responses((status = 200, description = "The new generated challenges", body = [Challenge])),
    tag = "generation"
)]
pub async fn generate_challenges(
    State(state): State<AppState>,
) -> Result<Json<Vec<Challenge>>, AppError> {
    let batch = challenges_or_fallback(
        state.generator.as_deref(),
        GENERATED_CHALLENGE_COUNT,
        state.config.content_rng_seed,
    )
    .await;

    let created = state.store.replace_generated_challenges(batch).await?;
    tracing::info!(count = created.len(), "Generated challenges replaced");

    Ok(Json(created))
}

/// Replaces the whole question bank. Existing answers go with it.
#[utoipa::path(
    post,
    path = "/api/generate-quiz-questions",
    responses((status = 200, description = "The new question bank", body = [QuizQuestion])),
    tag = "generation"
)]
pub async fn generate_quiz_questions(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuizQuestion>>, AppError> {
    let batch = questions_or_fallback(
        state.generator.as_deref(),
        GENERATED_QUESTION_COUNT,
        state.config.content_rng_seed,
    )
    .await;

    let created = state.store.replace_quiz_questions(batch).await?;
    tracing::info!(count = created.len(), "Quiz questions replaced");

    Ok(Json(created))
}

/// Fills empty tables with the built-in content. Tables that already hold
/// rows are left untouched, so repeated calls insert nothing.
#[utoipa::path(
    post,
    path = "/api/seed-data",
    responses((status = 200, description = "Rows inserted by this run", body = SeedReport)),
    tag = "generation"
)]
pub async fn seed_data(State(state): State<AppState>) -> Result<Json<SeedReport>, AppError> {
    let report = seed_store(state.store.as_ref(), state.config.content_rng_seed).await?;
    Ok(Json(report))
}
