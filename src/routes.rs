// src/routes.rs

use axum::{
    Json, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{
    handlers::{challenge, content, generate, quiz, score},
    openapi::ApiDoc,
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges the sub-routers (challenges, quiz, generation, content).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store, generator, config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let challenge_routes = Router::new()
        .route(
            "/challenges",
            get(challenge::list_challenges).post(challenge::create_challenge),
        )
        .route("/challenges/fixed", get(challenge::list_fixed_challenges))
        .route("/challenges/random", get(challenge::list_random_challenges))
        .route("/challenges/daily", get(challenge::get_daily_challenge))
        .route("/toggle-challenge", post(challenge::toggle_challenge))
        .route("/user-progress/{user_id}", get(challenge::get_user_progress));

    let quiz_routes = Router::new()
        .route(
            "/quiz-questions",
            get(quiz::list_quiz_questions).post(quiz::create_quiz_question),
        )
        .route("/submit-quiz-answer", post(quiz::submit_quiz_answer))
        .route("/user-quiz-results/{user_id}", get(quiz::get_user_quiz_results));

    let generation_routes = Router::new()
        .route("/generate-challenges", post(generate::generate_challenges))
        .route("/generate-quiz-questions", post(generate::generate_quiz_questions))
        .route("/seed-data", post(generate::seed_data));

    let content_routes = Router::new()
        .route("/user-score/{user_id}", get(score::get_user_score))
        .route("/articles", get(content::list_articles))
        .route("/collection-points", get(content::list_collection_points))
        .route("/daily-phrase", get(content::get_daily_phrase));

    let api_routes = Router::new()
        .merge(challenge_routes)
        .merge(quiz_routes)
        .merge(generation_routes)
        .merge(content_routes);

    Router::new()
        .nest("/api", api_routes)
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
