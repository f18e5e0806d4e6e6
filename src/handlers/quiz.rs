// src/handlers/quiz.rs

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
    models::quiz::{
        NewQuizQuestion, QuizAnswerResponse, QuizAnswerResult, QuizQuestion,
        SubmitQuizAnswerRequest,
    },
    scoring::answer::grade,
    storage::SharedStore,
};

#[utoipa::path(
    get,
    path = "/api/quiz-questions",
    responses((status = 200, body = [QuizQuestion])),
    tag = "quiz"
)]
pub async fn list_quiz_questions(
    State(store): State<SharedStore>,
) -> Result<Json<Vec<QuizQuestion>>, AppError> {
    Ok(Json(store.list_quiz_questions().await?))
}

#[utoipa::path(
    post,
    path = "/api/quiz-questions",
    request_body = NewQuizQuestion,
    responses(
        (status = 201, body = QuizQuestion),
        (status = 400, body = ErrorBody)
    ),
    tag = "quiz"
)]
pub async fn create_quiz_question(
    State(store): State<SharedStore>,
    ValidatedJson(payload): ValidatedJson<NewQuizQuestion>,
) -> Result<impl IntoResponse, AppError> {
    let question = store.create_quiz_question(payload).await?;
    tracing::info!(question_id = %question.id, "Quiz question created");
    Ok((StatusCode::CREATED, Json(question)))
}

/// Grades one answer and appends it to the user's results.
///
/// A correct answer credits a fixed amount to the quiz ledger,
/// independent of the question's own `points`.
#[utoipa::path(
    post,
    path = "/api/submit-quiz-answer",
    request_body = SubmitQuizAnswerRequest,
    responses(
        (status = 200, body = QuizAnswerResponse),
        (status = 400, body = ErrorBody),
        (status = 404, description = "Question not found", body = ErrorBody)
    ),
    tag = "quiz"
)]
pub async fn submit_quiz_answer(
    State(store): State<SharedStore>,
    ValidatedJson(req): ValidatedJson<SubmitQuizAnswerRequest>,
) -> Result<Json<QuizAnswerResponse>, AppError> {
    let grade = grade(req.selected_answer, req.correct_answer);
    let outcome = store
        .record_quiz_answer(&req.user_id, req.question_id, grade)
        .await?;

    tracing::info!(
        user_id = %req.user_id,
        question_id = %req.question_id,
        is_correct = grade.is_correct,
        "Quiz answer recorded"
    );

    Ok(Json(QuizAnswerResponse {
        result: outcome.result,
        score: outcome.score,
    }))
}

#[utoipa::path(
    get,
    path = "/api/user-quiz-results/{user_id}",
    params(("user_id" = String, Path, description = "Opaque user identifier")),
    responses(
        (status = 200, body = [QuizAnswerResult]),
        (status = 400, body = ErrorBody)
    ),
    tag = "quiz"
)]
pub async fn get_user_quiz_results(
    State(store): State<SharedStore>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<QuizAnswerResult>>, AppError> {
    check_user_id(&user_id)?;
    Ok(Json(store.list_quiz_results(&user_id).await?))
}
