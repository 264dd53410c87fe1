//! Test fixtures and factory functions for creating test data.

use serde_json::json;
use uuid::Uuid;

/// Generate a unique group id to avoid collisions between parallel tests.
pub fn unique_group_id(prefix: &str) -> String {
    format!("{}_{}", prefix, &Uuid::new_v4().to_string()[..8])
}

/// Create a user register request body.
pub fn user_register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "name": n }),
        None => json!({}),
    }
}

/// Create an upsert mark request body.
pub fn mark_request(item_kind: &str, item_id: i64, level: u8) -> serde_json::Value {
    json!({
        "item_kind": item_kind,
        "item_id": item_id,
        "level": level
    })
}

/// Create a record activity request body.
pub fn activity_request(activity: &str) -> serde_json::Value {
    json!({ "activity": activity })
}

/// Create a submit quiz result request body.
pub fn quiz_result_request(
    quiz_mode: &str,
    group_id: Option<&str>,
    total: i32,
    correct: i32,
) -> serde_json::Value {
    json!({
        "quiz_mode": quiz_mode,
        "group_id": group_id,
        "total_questions": total,
        "correct_answers": correct,
        "answers": []
    })
}

/// Seed data for a three-member confusable group. Every example
/// sentence literally contains its pattern, so each yields a question.
pub fn appearance_group_points() -> Vec<(&'static str, &'static str, (&'static str, &'static str))>
{
    vec![
        (
            "〜みたい",
            "seems like; looks like",
            ("彼は学生みたいだ。", "He seems like a student."),
        ),
        (
            "〜らしい",
            "apparently; seems (hearsay)",
            ("明日は雨らしい。", "Apparently it will rain tomorrow."),
        ),
        (
            "〜っぽい",
            "-ish; typical of",
            ("この服は子供っぽい。", "These clothes are childish."),
        ),
    ]
}
