//! PostgreSQL database operations

use chrono::{Duration, NaiveDate, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Create a new user with generated token
    pub async fn create_user(&self, name: Option<&str>) -> Result<User> {
        let token = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (token, name)
            VALUES ($1, $2)
            RETURNING id, token, name, created_at, last_seen_at
            "#,
        )
        .bind(&token)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by token
    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, token, name, created_at, last_seen_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user last_seen_at timestamp
    pub async fn update_last_seen(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Catalog Repository (read-only) ===

    /// Get grammar points, optionally filtered, in stable catalog order.
    /// The quiz generator's option ordering depends on this order being
    /// deterministic.
    pub async fn get_grammar_points(
        &self,
        week: Option<i32>,
        day: Option<i32>,
        group_id: Option<&str>,
    ) -> Result<Vec<DbGrammarPoint>> {
        let points = sqlx::query_as::<_, DbGrammarPoint>(
            r#"
            SELECT id, week, day, group_id, title, meaning, formation,
                   formation_list, examples, notes, nuance, sort_order
            FROM grammar_points
            WHERE ($1::int IS NULL OR week = $1)
              AND ($2::int IS NULL OR day = $2)
              AND ($3::text IS NULL OR group_id = $3)
            ORDER BY week, day, sort_order, id
            "#,
        )
        .bind(week)
        .bind(day)
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(points)
    }

    /// Get all grammar groups in catalog order
    pub async fn get_grammar_groups(&self) -> Result<Vec<DbGrammarGroup>> {
        let groups = sqlx::query_as::<_, DbGrammarGroup>(
            r#"
            SELECT id, label, week, day, sort_order
            FROM grammar_groups
            ORDER BY week, day, sort_order, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(groups)
    }

    /// Get one grammar group
    pub async fn get_grammar_group(&self, group_id: &str) -> Result<Option<DbGrammarGroup>> {
        let group = sqlx::query_as::<_, DbGrammarGroup>(
            r#"
            SELECT id, label, week, day, sort_order
            FROM grammar_groups
            WHERE id = $1
            "#,
        )
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(group)
    }

    /// Get all conjunctions in catalog order
    pub async fn get_conjunctions(&self) -> Result<Vec<DbConjunction>> {
        let conjunctions = sqlx::query_as::<_, DbConjunction>(
            r#"
            SELECT id, kana, kanji, meaning, sort_order
            FROM conjunctions
            ORDER BY sort_order, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(conjunctions)
    }

    /// Get stored baseline quiz questions, optionally scoped to a group
    pub async fn get_quiz_questions(&self, group_id: Option<&str>) -> Result<Vec<DbQuizQuestion>> {
        let questions = sqlx::query_as::<_, DbQuizQuestion>(
            r#"
            SELECT id, group_id, question, options, correct_index
            FROM quiz_questions
            WHERE ($1::text IS NULL OR group_id = $1)
            ORDER BY id
            "#,
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }

    // === Mastery Store ===

    /// Upsert the current mark for an item. Last write wins.
    pub async fn upsert_mark(
        &self,
        user_id: Uuid,
        item_kind: ItemKind,
        item_id: i64,
        level: MarkLevel,
    ) -> Result<DbCardMark> {
        let mark = sqlx::query_as::<_, DbCardMark>(
            r#"
            INSERT INTO card_marks (user_id, item_kind, item_id, mark_level, marked_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (user_id, item_kind, item_id) DO UPDATE SET
                mark_level = EXCLUDED.mark_level,
                marked_at = NOW()
            RETURNING id, user_id, item_kind, item_id, mark_level, marked_at
            "#,
        )
        .bind(user_id)
        .bind(item_kind.as_str())
        .bind(item_id)
        .bind(level.to_value() as i32)
        .fetch_one(&self.pool)
        .await?;

        Ok(mark)
    }

    /// Get all current marks for a user
    pub async fn get_marks(&self, user_id: Uuid) -> Result<Vec<DbCardMark>> {
        let marks = sqlx::query_as::<_, DbCardMark>(
            r#"
            SELECT id, user_id, item_kind, item_id, mark_level, marked_at
            FROM card_marks
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(marks)
    }

    /// Get the current mark for one item
    pub async fn get_mark(
        &self,
        user_id: Uuid,
        item_kind: ItemKind,
        item_id: i64,
    ) -> Result<Option<DbCardMark>> {
        let mark = sqlx::query_as::<_, DbCardMark>(
            r#"
            SELECT id, user_id, item_kind, item_id, mark_level, marked_at
            FROM card_marks
            WHERE user_id = $1 AND item_kind = $2 AND item_id = $3
            "#,
        )
        .bind(user_id)
        .bind(item_kind.as_str())
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(mark)
    }

    // === Activity Log ===

    /// Record an activity tag for today. Idempotent per day+tag: the
    /// day's tag set grows monotonically.
    pub async fn record_activity(
        &self,
        user_id: Uuid,
        study_date: NaiveDate,
        tag: &str,
    ) -> Result<DbActivity> {
        let entry = sqlx::query_as::<_, DbActivity>(
            r#"
            INSERT INTO study_activity (user_id, study_date, activities)
            VALUES ($1, $2, ARRAY[$3::text])
            ON CONFLICT (user_id, study_date) DO UPDATE SET
                activities = CASE
                    WHEN study_activity.activities @> ARRAY[$3::text]
                        THEN study_activity.activities
                    ELSE array_append(study_activity.activities, $3::text)
                END
            RETURNING id, user_id, study_date, activities
            "#,
        )
        .bind(user_id)
        .bind(study_date)
        .bind(tag)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Distinct study dates within the trailing window, newest first
    pub async fn get_activity_dates(
        &self,
        user_id: Uuid,
        window_days: u32,
    ) -> Result<Vec<NaiveDate>> {
        let cutoff = Utc::now().date_naive() - Duration::days(window_days as i64);

        let dates = sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT study_date
            FROM study_activity
            WHERE user_id = $1 AND study_date >= $2
            ORDER BY study_date DESC
            "#,
        )
        .bind(user_id)
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(dates)
    }

    // === Quiz Result Log (append-only) ===

    /// Append a completed quiz attempt
    pub async fn insert_quiz_result(
        &self,
        user_id: Uuid,
        quiz_mode: &str,
        group_id: Option<&str>,
        total_questions: i32,
        correct_answers: i32,
        answers: &[AnswerOutcome],
    ) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO quiz_results (user_id, quiz_mode, group_id, total_questions,
                                      correct_answers, answers)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(quiz_mode)
        .bind(group_id)
        .bind(total_questions)
        .bind(correct_answers)
        .bind(Json(answers))
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    /// Recent quiz results, most recent first
    pub async fn get_recent_results(&self, user_id: Uuid, limit: i64) -> Result<Vec<DbQuizResult>> {
        let results = sqlx::query_as::<_, DbQuizResult>(
            r#"
            SELECT id, user_id, quiz_mode, group_id, total_questions,
                   correct_answers, answers, completed_at
            FROM quiz_results
            WHERE user_id = $1
            ORDER BY completed_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }
}
