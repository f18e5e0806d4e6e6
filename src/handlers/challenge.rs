// src/handlers/challenge.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    error::{AppError, ErrorBody},
    extractors::ValidatedJson,
    handlers::check_user_id,
    models::challenge::{
        Challenge, ChallengeFilter, ChallengeProgress, DailyChallengeResponse, NewChallenge,
        ToggleChallengeRequest, ToggleChallengeResponse,
    },
    storage::SharedStore,
    utils::daily::{select_for_today, today},
};

/// Lists every challenge in creation order.
#[utoipa::path(
    get,
    path = "/api/challenges",
    responses((status = 200, body = [Challenge])),
    tag = "challenges"
)]
pub async fn list_challenges(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<Challenge>>, AppError> {
    Ok(Json(store.list_challenges(ChallengeFilter::All).await?))
}

/// Lists the curated challenges.
#[utoipa::path(
    get,
    path = "/api/challenges/fixed",
    responses((status = 200, body = [Challenge])),
    tag = "challenges"
)]
pub async fn list_fixed_challenges(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<Challenge>>, AppError> {
    Ok(Json(store.list_challenges(ChallengeFilter::Fixed).await?))
}

/// Lists the generated challenges.
#[utoipa::path(
    get,
    path = "/api/challenges/random",
    responses((status = 200, body = [Challenge])),
    tag = "challenges"
)]
pub async fn list_random_challenges(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<Challenge>>, AppError> {
    Ok(Json(store.list_challenges(ChallengeFilter::Generated).await?))
}

/// Picks today's challenge among the generated ones.
#[utoipa::path(
    get,
    path = "/api/challenges/daily",
    responses((status = 200, body = DailyChallengeResponse)),
    tag = "challenges"
)]
pub async fn get_daily_challenge(
    State(store): State<SharedStore>,
) -> Result<Json<DailyChallengeResponse>, AppError> {
    let generated = store.list_challenges(ChallengeFilter::Generated).await?;
    let response = match select_for_today(&generated, today()) {
        Some(c) => DailyChallengeResponse {
            challenge: c.challenge.clone(),
            id: Some(c.id),
            points: Some(c.points),
        },
        None => DailyChallengeResponse {
            challenge: String::new(),
            id: None,
            points: None,
        },
    };
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/challenges",
    request_body = NewChallenge,
    responses(
        (status = 201, body = Challenge),
        (status = 400, body = ErrorBody)
    ),
    tag = "challenges"
)]
pub async fn create_challenge(
    State(store): State<SharedStore>,
    ValidatedJson(payload): ValidatedJson<NewChallenge>,
) -> Result<impl IntoResponse, AppError> {
    let challenge = store.create_challenge(payload).await?;
    tracing::info!(challenge_id = %challenge.id, is_fixed = challenge.is_fixed, "Challenge created");
    Ok((StatusCode::CREATED, Json(challenge)))
}

/// Marks a challenge completed, or reverts a completed one.
///
/// The ledger moves by the challenge's points on completion and by exactly
/// the points previously earned on reversal.
#[utoipa::path(
    post,
    path = "/api/toggle-challenge",
    request_body = ToggleChallengeRequest,
    responses(
        (status = 200, body = ToggleChallengeResponse),
        (status = 400, body = ErrorBody),
        (status = 404, description = "Challenge not found", body = ErrorBody)
    ),
    tag = "challenges"
)]
pub async fn toggle_challenge(
    State(store): State<SharedStore>,
    ValidatedJson(req): ValidatedJson<ToggleChallengeRequest>,
) -> Result<Json<ToggleChallengeResponse>, AppError> {
    let outcome = store.toggle_challenge(&req.user_id, req.challenge_id).await?;

    tracing::info!(
        user_id = %req.user_id,
        challenge_id = %req.challenge_id,
        completed = outcome.progress.is_completed,
        total_points = outcome.score.as_ref().map(|s| s.total_points),
        "Challenge toggled"
    );

    Ok(Json(ToggleChallengeResponse {
        progress: outcome.progress,
        score: outcome.score,
    }))
}

#[utoipa::path(
    get,
    path = "/api/user-progress/{user_id}",
    params(("user_id" = String, Path, description = "Opaque user identifier")),
    responses(
        (status = 200, body = [ChallengeProgress]),
        (status = 400, body = ErrorBody)
    ),
    tag = "challenges"
)]
pub async fn get_user_progress(
    State(store): State<SharedStore>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<ChallengeProgress>>, AppError> {
    check_user_id(&user_id)?;
    Ok(Json(store.list_progress(&user_id).await?))
}
