// src/handlers/content.rs

use axum::{Json, extract::State};

use crate::{
    error::AppError,
    models::content::{Article, CollectionPoint, DailyPhraseResponse},
    storage::SharedStore,
    utils::daily::{select_for_today, today},
};

#[utoipa::path(
    get,
    path = "/api/articles",
    responses((status = 200, body = [Article])),
    tag = "content"
)]
pub async fn list_articles(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<Article>>, AppError> {
    Ok(Json(store.list_articles().await?))
}

#[utoipa::path(
    get,
    path = "/api/collection-points",
    responses((status = 200, body = [CollectionPoint])),
    tag = "content"
)]
pub async fn list_collection_points(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<CollectionPoint>>, AppError> {
    Ok(Json(store.list_collection_points().await?))
}

/// Phrase of the day; empty string when none are stored.
#[utoipa::path(
    get,
    path = "/api/daily-phrase",
    responses((status = 200, body = DailyPhraseResponse)),
    tag = "content"
)]
pub async fn get_daily_phrase(
    State(store): State<SharedStore>,
) -> Result<Json<DailyPhraseResponse>, AppError> {
    let phrases = store.list_daily_phrases().await?;
    let phrase = select_for_today(&phrases, today())
        .map(|p| p.phrase.clone())
        .unwrap_or_default();
    Ok(Json(DailyPhraseResponse { phrase }))
}
