// src/handlers/score.rs

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::{AppError, ErrorBody},
    handlers::check_user_id,
    models::score::UserScore,
    storage::SharedStore,
};

/// Returns the user's score, creating the zeroed bronze row on first access.
#[utoipa::path(
    get,
    path = "/api/user-score/{user_id}",
    params(("user_id" = String, Path, description = "Opaque user identifier")),
    responses(
        (status = 200, description = "Current score", body = UserScore),
        (status = 400, description = "Invalid user id", body = ErrorBody)
    ),
    tag = "score"
)]
pub async fn get_user_score(
    State(store): State<SharedStore>,
    Path(user_id): Path<String>,
) -> Result<Json<UserScore>, AppError> {
    check_user_id(&user_id)?;
    let score = store.get_or_create_score(&user_id).await?;
    Ok(Json(score))
}
