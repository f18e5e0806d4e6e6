// src/openapi.rs

use utoipa::OpenApi;

use crate::{
    error::ErrorBody,
    handlers::{challenge, content, generate, quiz, score},
    models::{
        challenge::{
            Challenge, ChallengeProgress, DailyChallengeResponse, NewChallenge,
            ToggleChallengeRequest, ToggleChallengeResponse,
        },
        content::{Article, CollectionPoint, DailyPhrase, DailyPhraseResponse, SeedReport},
        quiz::{
            NewQuizQuestion, QuizAnswerResponse, QuizAnswerResult, QuizQuestion,
            SubmitQuizAnswerRequest,
        },
        score::UserScore,
    },
    scoring::rank::Rank,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "EcoQuest API", description = "Challenges, quizzes and the points ledger"),
    paths(
        score::get_user_score,
        challenge::list_challenges,
        challenge::list_fixed_challenges,
        challenge::list_random_challenges,
        challenge::get_daily_challenge,
        challenge::create_challenge,
        challenge::toggle_challenge,
        challenge::get_user_progress,
        quiz::list_quiz_questions,
        quiz::create_quiz_question,
        quiz::submit_quiz_answer,
        quiz::get_user_quiz_results,
        generate::generate_challenges,
        generate::generate_quiz_questions,
        generate::seed_data,
        content::list_articles,
        content::list_collection_points,
        content::get_daily_phrase,
    ),
    components(schemas(
        ErrorBody,
        Rank,
        UserScore,
        Challenge,
        ChallengeProgress,
        NewChallenge,
        ToggleChallengeRequest,
        ToggleChallengeResponse,
        DailyChallengeResponse,
        QuizQuestion,
        QuizAnswerResult,
        NewQuizQuestion,
        SubmitQuizAnswerRequest,
        QuizAnswerResponse,
        Article,
        CollectionPoint,
        DailyPhrase,
        DailyPhraseResponse,
        SeedReport,
    ))
)]
pub struct ApiDoc;
