//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up test environment with database
//! - Helper functions for seeding catalog data
//! - Authentication helpers
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL
//! env var). Each test seeds its own catalog rows under unique group
//! ids and cleans them up afterward, so tests can share one database.

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use sqlx::types::Json;
use uuid::Uuid;

use bunpo_backend::db::Database;
use bunpo_backend::{build_router, AppState};

/// Test context containing database connection and test server.
///
/// Use this to set up integration tests with a real database connection.
/// Requires DATABASE_URL environment variable to be set.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations().await.expect("Failed to run migrations");

        let db = Arc::new(db);
        let app = build_router(AppState { db: db.clone() });

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a test user and return its ID and token.
    pub async fn create_test_user(&self, name: Option<&str>) -> (Uuid, String) {
        let user = self
            .db
            .create_user(name)
            .await
            .expect("Failed to create test user");
        (user.id, user.token)
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> axum::http::HeaderValue {
        format!("Bearer {}", token)
            .parse()
            .expect("token is valid header text")
    }

    /// Insert a grammar group.
    pub async fn seed_group(&self, group_id: &str, label: &str) {
        sqlx::query(
            "INSERT INTO grammar_groups (id, label, week, day, sort_order) VALUES ($1, $2, 1, 1, 0)",
        )
        .bind(group_id)
        .bind(label)
        .execute(self.db.pool())
        .await
        .expect("Failed to seed group");
    }

    /// Insert a grammar point and return its id. Examples are (jp, en)
    /// pairs.
    pub async fn seed_point(
        &self,
        group_id: Option<&str>,
        title: &str,
        meaning: &str,
        examples: &[(&str, &str)],
        sort_order: i32,
    ) -> i64 {
        let examples: Vec<serde_json::Value> = examples
            .iter()
            .map(|(jp, en)| serde_json::json!({ "jp": jp, "en": en }))
            .collect();

        sqlx::query_scalar(
            r#"
            INSERT INTO grammar_points (week, day, group_id, title, meaning, examples, sort_order)
            VALUES (1, 1, $1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(group_id)
        .bind(title)
        .bind(meaning)
        .bind(Json(examples))
        .bind(sort_order)
        .fetch_one(self.db.pool())
        .await
        .expect("Failed to seed grammar point")
    }

    /// Insert a conjunction and return its id.
    pub async fn seed_conjunction(&self, kana: &str, meaning: &str) -> i64 {
        sqlx::query_scalar(
            "INSERT INTO conjunctions (kana, meaning, sort_order) VALUES ($1, $2, 0) RETURNING id",
        )
        .bind(kana)
        .bind(meaning)
        .fetch_one(self.db.pool())
        .await
        .expect("Failed to seed conjunction")
    }

    /// Insert a stored quiz question and return its id.
    pub async fn seed_stored_question(
        &self,
        group_id: Option<&str>,
        question: &str,
        options: &[&str],
        correct_index: i32,
    ) -> i64 {
        sqlx::query_scalar(
            r#"
            INSERT INTO quiz_questions (group_id, question, options, correct_index)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(group_id)
        .bind(question)
        .bind(Json(options.to_vec()))
        .bind(correct_index)
        .fetch_one(self.db.pool())
        .await
        .expect("Failed to seed stored question")
    }

    /// Clean up all data belonging to a user.
    pub async fn cleanup_user(&self, user_id: Uuid) {
        // Delete in order due to foreign keys
        let _ = sqlx::query("DELETE FROM card_marks WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM study_activity WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM quiz_results WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;
    }

    /// Clean up catalog rows seeded under a group id.
    pub async fn cleanup_group(&self, group_id: &str) {
        let _ = sqlx::query("DELETE FROM quiz_results WHERE group_id = $1")
            .bind(group_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM quiz_questions WHERE group_id = $1")
            .bind(group_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM grammar_points WHERE group_id = $1")
            .bind(group_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM grammar_groups WHERE id = $1")
            .bind(group_id)
            .execute(self.db.pool())
            .await;
    }

    /// Clean up a grammar point seeded without a group.
    pub async fn cleanup_point(&self, point_id: i64) {
        let _ = sqlx::query("DELETE FROM grammar_points WHERE id = $1")
            .bind(point_id)
            .execute(self.db.pool())
            .await;
    }

    /// Clean up a seeded conjunction.
    pub async fn cleanup_conjunction(&self, conjunction_id: i64) {
        let _ = sqlx::query("DELETE FROM conjunctions WHERE id = $1")
            .bind(conjunction_id)
            .execute(self.db.pool())
            .await;
    }
}
