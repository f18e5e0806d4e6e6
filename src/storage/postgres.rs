// src/storage/postgres.rs

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgConnection, PgPool, postgres::PgPoolOptions, types::Json};
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        challenge::{Challenge, ChallengeFilter, ChallengeProgress, NewChallenge},
        content::{Article, CollectionPoint, DailyPhrase, SeedContent, SeedReport},
        quiz::{NewQuizQuestion, QuizAnswerResult, QuizQuestion},
        score::{PointCategory, UserScore},
    },
    scoring::{answer, answer::Grade, ledger, progress},
    storage::{AnswerOutcome, Store, ToggleOutcome},
};

const SCORE_COLUMNS: &str =
    "user_id, total_points, challenge_points, quiz_points, rank, created_at, updated_at";

const CONNECT_ATTEMPTS: u32 = 5;

/// Postgres-backed store. Scoring operations run in one transaction each and
/// lock the rows they read with `FOR UPDATE`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects with retry (the database container may still be starting) and
    /// applies the embedded migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let mut retry_count = 0;
        let pool = loop {
            match PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(3))
                .connect(database_url)
                .await
            {
                Ok(pool) => break pool,
                Err(e) => {
                    retry_count += 1;
                    if retry_count > CONNECT_ATTEMPTS {
                        return Err(AppError::InternalServerError(format!(
                            "Failed to connect to database after {} retries: {}",
                            CONNECT_ATTEMPTS, e
                        )));
                    }
                    tracing::warn!(
                        attempt = retry_count,
                        "Database not ready, retrying in 2s..."
                    );
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
            }
        };
        tracing::info!("Database connected...");

        tracing::info!("Running migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Migrations applied successfully.");

        Ok(Self::new(pool))
    }
}

/// Creates the user's score row if needed and locks it until the transaction ends.
///
/// Every scoring transaction for a user starts here, so they serialize on this
/// row even when the rows they touch next do not exist yet.
async fn lock_score(conn: &mut PgConnection, user_id: &str) -> Result<UserScore, AppError> {
    sqlx::query("INSERT INTO user_scores (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    let score = sqlx::query_as::<_, UserScore>(&format!(
        "SELECT {} FROM user_scores WHERE user_id = $1 FOR UPDATE",
        SCORE_COLUMNS
    ))
    .bind(user_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(score)
}

/// Ledger update inside an open transaction.
///
/// Locks the row, applies the delta in Rust and writes the whole row back,
/// so the rank rule lives in one place.
async fn apply_points_in(
    conn: &mut PgConnection,
    user_id: &str,
    delta: i32,
    category: PointCategory,
) -> Result<UserScore, AppError> {
    let mut score = lock_score(&mut *conn, user_id).await?;

    ledger::apply_points(&mut score, delta, category, Utc::now());

    sqlx::query(
        r#"
        UPDATE user_scores
        SET total_points = $2,
            challenge_points = $3,
            quiz_points = $4,
            rank = $5,
            updated_at = $6
        WHERE user_id = $1
        "#,
    )
    .bind(&score.user_id)
    .bind(score.total_points)
    .bind(score.challenge_points)
    .bind(score.quiz_points)
    .bind(score.rank.as_str())
    .bind(score.updated_at)
    .execute(&mut *conn)
    .await?;

    Ok(score)
}

async fn insert_challenge(conn: &mut PgConnection, challenge: &Challenge) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO challenges (id, challenge, is_fixed, points, created_at) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(challenge.id)
    .bind(&challenge.challenge)
    .bind(challenge.is_fixed)
    .bind(challenge.points)
    .bind(challenge.created_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn insert_question(conn: &mut PgConnection, question: &QuizQuestion) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO quiz_questions (id, question, options, correct_answer, points, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(question.id)
    .bind(&question.question)
    .bind(Json(&question.options))
    .bind(question.correct_answer)
    .bind(question.points)
    .bind(question.created_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

async fn table_is_empty(conn: &mut PgConnection, table: &str) -> Result<bool, AppError> {
    let (exists,): (bool,) = sqlx::query_as(&format!("SELECT EXISTS (SELECT 1 FROM {})", table))
        .fetch_one(&mut *conn)
        .await?;
    Ok(!exists)
}

#[async_trait]
impl Store for PgStore {
    async fn get_or_create_score(&self, user_id: &str) -> Result<UserScore, AppError> {
        sqlx::query("INSERT INTO user_scores (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        let score = sqlx::query_as::<_, UserScore>(&format!(
            "SELECT {} FROM user_scores WHERE user_id = $1",
            SCORE_COLUMNS
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(score)
    }

    async fn apply_points(
        &self,
        user_id: &str,
        delta: i32,
        category: PointCategory,
    ) -> Result<UserScore, AppError> {
        let mut tx = self.pool.begin().await?;
        let score = apply_points_in(&mut tx, user_id, delta, category).await?;
        tx.commit().await?;
        Ok(score)
    }

    async fn list_challenges(&self, filter: ChallengeFilter) -> Result<Vec<Challenge>, AppError> {
        let condition = match filter {
            ChallengeFilter::All => "",
            ChallengeFilter::Fixed => "WHERE is_fixed = TRUE",
            ChallengeFilter::Generated => "WHERE is_fixed = FALSE",
        };

        let challenges = sqlx::query_as::<_, Challenge>(&format!(
            "SELECT id, challenge, is_fixed, points, created_at FROM challenges {} ORDER BY seq ASC",
            condition
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(challenges)
    }

    async fn create_challenge(&self, new: NewChallenge) -> Result<Challenge, AppError> {
        let challenge = Challenge::from_new(new, Utc::now());
        let mut conn = self.pool.acquire().await?;
        insert_challenge(&mut conn, &challenge).await?;
        Ok(challenge)
    }

    async fn toggle_challenge(
        &self,
        user_id: &str,
        challenge_id: Uuid,
    ) -> Result<ToggleOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        // 1. The challenge must exist; dropping `tx` rolls back.
        let challenge = sqlx::query_as::<_, Challenge>(
            "SELECT id, challenge, is_fixed, points, created_at FROM challenges WHERE id = $1 FOR SHARE",
        )
        .bind(challenge_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound("Challenge not found".to_string()))?;

        // 2. Serialize with other scoring transactions of this user. The progress
        //    row may not exist yet, so locking it alone is not enough.
        lock_score(&mut tx, user_id).await?;

        // 3. Current state of the pair.
        let existing = sqlx::query_as::<_, ChallengeProgress>(
            r#"
            SELECT id, user_id, challenge_id, is_completed, points_earned, completed_at, created_at
            FROM user_challenge_progress
            WHERE user_id = $1 AND challenge_id = $2
            FOR UPDATE
            "#,
        )
        .bind(user_id)
        .bind(challenge_id)
        .fetch_optional(&mut *tx)
        .await?;

        let toggle = progress::toggle(existing, user_id, &challenge, Utc::now());

        // 4. Upsert keyed by the pair.
        let progress = sqlx::query_as::<_, ChallengeProgress>(
            r#"
            INSERT INTO user_challenge_progress
                (id, user_id, challenge_id, is_completed, points_earned, completed_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id, challenge_id) DO UPDATE SET
                is_completed = EXCLUDED.is_completed,
                points_earned = EXCLUDED.points_earned,
                completed_at = EXCLUDED.completed_at
            RETURNING id, user_id, challenge_id, is_completed, points_earned, completed_at, created_at
            "#,
        )
        .bind(toggle.progress.id)
        .bind(&toggle.progress.user_id)
        .bind(toggle.progress.challenge_id)
        .bind(toggle.progress.is_completed)
        .bind(toggle.progress.points_earned)
        .bind(toggle.progress.completed_at)
        .bind(toggle.progress.created_at)
        .fetch_one(&mut *tx)
        .await?;

        // 5. Ledger, same transaction.
        let score = if toggle.points_delta != 0 {
            Some(
                apply_points_in(&mut tx, user_id, toggle.points_delta, PointCategory::Challenge)
                    .await?,
            )
        } else {
            None
        };

        tx.commit().await?;

        Ok(ToggleOutcome { progress, score })
    }

    async fn list_progress(&self, user_id: &str) -> Result<Vec<ChallengeProgress>, AppError> {
        let rows = sqlx::query_as::<_, ChallengeProgress>(
            r#"
            SELECT id, user_id, challenge_id, is_completed, points_earned, completed_at, created_at
            FROM user_challenge_progress
            WHERE user_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn replace_generated_challenges(
        &self,
        new: Vec<NewChallenge>,
    ) -> Result<Vec<Challenge>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Progress rows go with their challenge (ON DELETE CASCADE).
        sqlx::query("DELETE FROM challenges WHERE is_fixed = FALSE")
            .execute(&mut *tx)
            .await?;

        let now = Utc::now();
        let mut created = Vec::with_capacity(new.len());
        for n in new {
            let challenge = Challenge::from_new(n, now);
            insert_challenge(&mut tx, &challenge).await?;
            created.push(challenge);
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn list_quiz_questions(&self) -> Result<Vec<QuizQuestion>, AppError> {
        let questions = sqlx::query_as::<_, QuizQuestion>(
            r#"
            SELECT id, question, options, correct_answer, points, created_at
            FROM quiz_questions
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    async fn create_quiz_question(&self, new: NewQuizQuestion) -> Result<QuizQuestion, AppError> {
        let question = QuizQuestion::from_new(new, Utc::now());
        let mut conn = self.pool.acquire().await?;
        insert_question(&mut conn, &question).await?;
        Ok(question)
    }

    async fn replace_quiz_questions(
        &self,
        new: Vec<NewQuizQuestion>,
    ) -> Result<Vec<QuizQuestion>, AppError> {
        let mut tx = self.pool.begin().await?;

        // Results go with their question (ON DELETE CASCADE).
        sqlx::query("DELETE FROM quiz_questions")
            .execute(&mut *tx)
            .await?;

        let now = Utc::now();
        let mut created = Vec::with_capacity(new.len());
        for n in new {
            let question = QuizQuestion::from_new(n, now);
            insert_question(&mut tx, &question).await?;
            created.push(question);
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn record_quiz_answer(
        &self,
        user_id: &str,
        question_id: Uuid,
        grade: Grade,
    ) -> Result<AnswerOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT id FROM quiz_questions WHERE id = $1")
            .bind(question_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(AppError::NotFound("Quiz question not found".to_string()))?;

        let score = if grade.awards_points() {
            Some(apply_points_in(&mut tx, user_id, grade.points_earned, PointCategory::Quiz).await?)
        } else {
            None
        };

        let row = answer::result_row(user_id, question_id, grade, Utc::now());
        let result = sqlx::query_as::<_, QuizAnswerResult>(
            r#"
            INSERT INTO user_quiz_results (id, user_id, question_id, is_correct, points_earned, answered_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, question_id, is_correct, points_earned, answered_at
            "#,
        )
        .bind(row.id)
        .bind(&row.user_id)
        .bind(row.question_id)
        .bind(row.is_correct)
        .bind(row.points_earned)
        .bind(row.answered_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(AnswerOutcome { result, score })
    }

    async fn list_quiz_results(&self, user_id: &str) -> Result<Vec<QuizAnswerResult>, AppError> {
        let rows = sqlx::query_as::<_, QuizAnswerResult>(
            r#"
            SELECT id, user_id, question_id, is_correct, points_earned, answered_at
            FROM user_quiz_results
            WHERE user_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_articles(&self) -> Result<Vec<Article>, AppError> {
        let rows = sqlx::query_as::<_, Article>(
            "SELECT id, title, description, image, created_at FROM articles ORDER BY seq DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_collection_points(&self) -> Result<Vec<CollectionPoint>, AppError> {
        let rows = sqlx::query_as::<_, CollectionPoint>(
            "SELECT id, name, address, waste_types, created_at FROM collection_points ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_daily_phrases(&self) -> Result<Vec<DailyPhrase>, AppError> {
        let rows = sqlx::query_as::<_, DailyPhrase>(
            "SELECT id, phrase, created_at FROM daily_phrases ORDER BY seq ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn seed_if_empty(&self, content: SeedContent) -> Result<SeedReport, AppError> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();
        let mut report = SeedReport::default();

        if table_is_empty(&mut tx, "challenges").await? {
            for n in content.challenges {
                let challenge = Challenge::from_new(n, now);
                insert_challenge(&mut tx, &challenge).await?;
                report.challenges.push(challenge);
            }
        }

        if table_is_empty(&mut tx, "quiz_questions").await? {
            for n in content.questions {
                let question = QuizQuestion::from_new(n, now);
                insert_question(&mut tx, &question).await?;
                report.questions.push(question);
            }
        }

        if table_is_empty(&mut tx, "daily_phrases").await? {
            for p in content.phrases {
                let phrase = DailyPhrase::from_new(p, now);
                sqlx::query("INSERT INTO daily_phrases (id, phrase, created_at) VALUES ($1, $2, $3)")
                    .bind(phrase.id)
                    .bind(&phrase.phrase)
                    .bind(phrase.created_at)
                    .execute(&mut *tx)
                    .await?;
                report.daily_phrases.push(phrase);
            }
        }

        if table_is_empty(&mut tx, "articles").await? {
            for a in content.articles {
                let article = Article::from_new(a, now);
                sqlx::query(
                    "INSERT INTO articles (id, title, description, image, created_at) VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(article.id)
                .bind(&article.title)
                .bind(&article.description)
                .bind(&article.image)
                .bind(article.created_at)
                .execute(&mut *tx)
                .await?;
                report.articles.push(article);
            }
        }

        if table_is_empty(&mut tx, "collection_points").await? {
            for c in content.collection_points {
                let point = CollectionPoint::from_new(c, now);
                sqlx::query(
                    "INSERT INTO collection_points (id, name, address, waste_types, created_at) VALUES ($1, $2, $3, $4, $5)",
                )
                .bind(point.id)
                .bind(&point.name)
                .bind(&point.address)
                .bind(Json(&point.waste_types))
                .bind(point.created_at)
                .execute(&mut *tx)
                .await?;
                report.collection_points.push(point);
            }
        }

        tx.commit().await?;
        Ok(report)
    }
}
