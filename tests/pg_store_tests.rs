// tests/pg_store_tests.rs

//! Runs against the Postgres database in `DATABASE_URL`; skipped when it is unset.

use ecoquest::{
    error::AppError,
    generator::catalog,
    models::{
        challenge::{ChallengeFilter, NewChallenge},
        quiz::NewQuizQuestion,
    },
    scoring::{answer::grade, rank::Rank},
    storage::{PgStore, Store},
};
use tokio::sync::Mutex;

// Replacement and seeding touch whole tables, so tests sharing the database run one at a time.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

async fn store() -> Option<PgStore> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping Postgres store test");
        return None;
    };

    let store = PgStore::connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing.");
    Some(store)
}

fn unique_user() -> String {
    format!("pg_{}", &uuid::Uuid::new_v4().to_string()[..8])
}

fn new_challenge(text: &str, points: i32, is_fixed: bool) -> NewChallenge {
    NewChallenge {
        challenge: text.to_string(),
        is_fixed,
        points,
    }
}

fn new_question(text: &str) -> NewQuizQuestion {
    NewQuizQuestion {
        question: text.to_string(),
        options: vec![
            "Verde".to_string(),
            "Azul".to_string(),
            "Amarelo".to_string(),
            "Vermelho".to_string(),
        ],
        correct_answer: 0,
        points: 10,
    }
}

#[tokio::test]
async fn toggle_round_trip_updates_score_and_rank() {
    let _guard = DB_LOCK.lock().await;
    let Some(store) = store().await else { return };
    let user = unique_user();
    let challenge = store
        .create_challenge(new_challenge("Plante uma árvore", 100, true))
        .await
        .unwrap();

    // Act 1: complete
    let first = store.toggle_challenge(&user, challenge.id).await.unwrap();
    assert!(first.progress.is_completed);
    assert_eq!(first.progress.points_earned, 100);
    assert!(first.progress.completed_at.is_some());
    let score = first.score.unwrap();
    assert_eq!(score.total_points, 100);
    assert_eq!(score.challenge_points, 100);
    assert_eq!(score.rank, Rank::Silver);

    // Act 2: revert on the same row
    let second = store.toggle_challenge(&user, challenge.id).await.unwrap();
    assert_eq!(second.progress.id, first.progress.id);
    assert!(!second.progress.is_completed);
    assert_eq!(second.progress.points_earned, 0);
    assert!(second.progress.completed_at.is_none());
    assert_eq!(second.score.unwrap().total_points, 0);

    // Rank is read back from its TEXT column
    let stored = store.get_or_create_score(&user).await.unwrap();
    assert_eq!(stored.total_points, 0);
    assert_eq!(stored.rank, Rank::Bronze);
    assert_eq!(store.list_progress(&user).await.unwrap().len(), 1);
}

#[tokio::test]
async fn concurrent_first_toggles_credit_once_per_completion() {
    let _guard = DB_LOCK.lock().await;
    let Some(store) = store().await else { return };
    let user = unique_user();
    let challenge = store
        .create_challenge(new_challenge("Use uma garrafa reutilizável", 10, true))
        .await
        .unwrap();
    let challenge_id = challenge.id;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = store.clone();
        let user = user.clone();
        handles.push(tokio::spawn(async move {
            store.toggle_challenge(&user, challenge_id).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // Eight serialized flips end uncompleted with nothing credited.
    let progress = store.list_progress(&user).await.unwrap();
    assert_eq!(progress.len(), 1);
    assert!(!progress[0].is_completed);

    let score = store.get_or_create_score(&user).await.unwrap();
    assert_eq!(score.challenge_points, progress[0].points_earned);
    assert_eq!(score.total_points, 0);
}

#[tokio::test]
async fn unknown_ids_are_not_found_and_change_nothing() {
    let _guard = DB_LOCK.lock().await;
    let Some(store) = store().await else { return };
    let user = unique_user();

    let toggled = store.toggle_challenge(&user, uuid::Uuid::new_v4()).await;
    assert!(matches!(toggled, Err(AppError::NotFound(_))));

    let answered = store
        .record_quiz_answer(&user, uuid::Uuid::new_v4(), grade(1, 1))
        .await;
    assert!(matches!(answered, Err(AppError::NotFound(_))));

    assert!(store.list_progress(&user).await.unwrap().is_empty());
    assert!(store.list_quiz_results(&user).await.unwrap().is_empty());
    assert_eq!(store.get_or_create_score(&user).await.unwrap().total_points, 0);
}

#[tokio::test]
async fn quiz_answers_append_and_credit_quiz_ledger() {
    let _guard = DB_LOCK.lock().await;
    let Some(store) = store().await else { return };
    let user = unique_user();
    let question = store
        .create_quiz_question(new_question("Qual cor de lixeira é do vidro?"))
        .await
        .unwrap();

    let right = store.record_quiz_answer(&user, question.id, grade(0, 0)).await.unwrap();
    assert!(right.result.is_correct);
    assert_eq!(right.score.unwrap().quiz_points, 10);

    let wrong = store.record_quiz_answer(&user, question.id, grade(2, 0)).await.unwrap();
    assert!(!wrong.result.is_correct);
    assert!(wrong.score.is_none());

    store.record_quiz_answer(&user, question.id, grade(0, 0)).await.unwrap();

    let results = store.list_quiz_results(&user).await.unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[1].id, wrong.result.id);

    let score = store.get_or_create_score(&user).await.unwrap();
    assert_eq!(score.quiz_points, 20);
    assert_eq!(score.total_points, 20);
}

#[tokio::test]
async fn replacing_generated_challenges_keeps_order_and_drops_their_progress() {
    let _guard = DB_LOCK.lock().await;
    let Some(store) = store().await else { return };
    let user = unique_user();
    let fixed = store
        .create_challenge(new_challenge("Apague as luzes", 6, true))
        .await
        .unwrap();

    let batch: Vec<NewChallenge> = (0..8)
        .map(|i| new_challenge(&format!("ordered-{}", i), 5, false))
        .collect();
    let created = store.replace_generated_challenges(batch).await.unwrap();
    assert_eq!(created.len(), 8);

    // Same timestamp for the whole batch, still listed in insertion order
    let listed: Vec<String> = store
        .list_challenges(ChallengeFilter::Generated)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.challenge)
        .collect();
    let expected: Vec<String> = (0..8).map(|i| format!("ordered-{}", i)).collect();
    assert_eq!(listed, expected);

    store.toggle_challenge(&user, fixed.id).await.unwrap();
    store.toggle_challenge(&user, created[0].id).await.unwrap();
    assert_eq!(store.list_progress(&user).await.unwrap().len(), 2);

    // Act: replace again
    store
        .replace_generated_challenges(vec![new_challenge("Doe roupas", 8, false)])
        .await
        .unwrap();

    let progress = store.list_progress(&user).await.unwrap();
    assert_eq!(progress.len(), 1);
    assert_eq!(progress[0].challenge_id, fixed.id);

    let all = store.list_challenges(ChallengeFilter::All).await.unwrap();
    assert!(all.iter().any(|c| c.id == fixed.id));
    assert!(!all.iter().any(|c| c.id == created[0].id));

    // Earned points stay on the score
    assert_eq!(store.get_or_create_score(&user).await.unwrap().total_points, 11);
}

#[tokio::test]
async fn replacing_questions_drops_their_results() {
    let _guard = DB_LOCK.lock().await;
    let Some(store) = store().await else { return };
    let user = unique_user();
    let question = store.create_quiz_question(new_question("Antiga?")).await.unwrap();
    store.record_quiz_answer(&user, question.id, grade(0, 0)).await.unwrap();

    let batch: Vec<NewQuizQuestion> = (0..5).map(|i| new_question(&format!("q-{}", i))).collect();
    store.replace_quiz_questions(batch).await.unwrap();

    let listed: Vec<String> = store
        .list_quiz_questions()
        .await
        .unwrap()
        .into_iter()
        .map(|q| q.question)
        .collect();
    let expected: Vec<String> = (0..5).map(|i| format!("q-{}", i)).collect();
    assert_eq!(listed, expected);

    assert!(store.list_quiz_results(&user).await.unwrap().is_empty());
    assert_eq!(store.get_or_create_score(&user).await.unwrap().quiz_points, 10);
}

#[tokio::test]
async fn seeding_twice_inserts_nothing_the_second_time() {
    let _guard = DB_LOCK.lock().await;
    let Some(store) = store().await else { return };
    let questions = catalog::question_pool().into_iter().take(5).collect();
    let content = catalog::seed_content(questions);

    let first = store.seed_if_empty(content.clone()).await.unwrap();
    let second = store.seed_if_empty(content).await.unwrap();

    assert!(second.challenges.is_empty());
    assert!(second.questions.is_empty());
    assert!(second.daily_phrases.is_empty());
    assert!(second.articles.is_empty());
    assert!(second.collection_points.is_empty());

    // Compared by text: timestamps lose precision in the round trip
    let phrases: Vec<String> = store
        .list_daily_phrases()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.phrase)
        .collect();
    assert!(!phrases.is_empty());
    if !first.daily_phrases.is_empty() {
        let inserted: Vec<String> = first.daily_phrases.into_iter().map(|p| p.phrase).collect();
        assert_eq!(phrases, inserted);
    }

    let titles: Vec<String> = store
        .list_articles()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.title)
        .collect();
    assert!(!titles.is_empty());
    if !first.articles.is_empty() {
        let newest_first: Vec<String> = first.articles.into_iter().rev().map(|a| a.title).collect();
        assert_eq!(titles, newest_first);
    }
}
