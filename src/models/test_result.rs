// src/models/test_result.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;
use validator::Validate;

use super::prep_pilot::QuestionOptions;

/// Upper bound on the time recorded for a single answer.
pub const MAX_TIME_SPENT_SECS: i64 = 86_400;

/// A single answered question inside a test submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TestAnswer {
    pub question: String,
    #[serde(default)]
    pub options: QuestionOptions,
    pub correct_answer: String,
    pub user_answer: String,

    /// Always recomputed by the server; any client value is discarded.
    #[serde(default)]
    pub is_correct: bool,

    #[serde(default)]
    pub chapter_title: String,
    #[serde(default)]
    pub explanation: String,

    /// Seconds spent on this question, at most one day.
    #[serde(default)]
    #[validate(range(
        min = 0,
        max = MAX_TIME_SPENT_SECS,
        message = "time_spent must be between 0 and 86400 seconds"
    ))]
    pub time_spent: i64,
}

/// Represents the 'test_results' table in the database.
/// A graded attempt of one user on one notebook's quiz.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct TestResult {
    pub id: Uuid,
    pub user_id: Uuid,
    pub notebook_id: Uuid,
    pub prep_pilot_id: Uuid,

    /// Stored as a JSON array in the database.
    pub test_answers: Json<Vec<TestAnswer>>,

    /// Percentage score (0-100), two decimals.
    pub score: f64,
    pub total_questions: i64,
    pub correct_answers: i64,
    /// Seconds.
    pub total_time_spent: i64,

    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// A fully graded attempt that has not been persisted yet.
/// The store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewTestResult {
    pub user_id: Uuid,
    pub notebook_id: Uuid,
    pub prep_pilot_id: Uuid,
    pub test_answers: Vec<TestAnswer>,
    pub score: f64,
    pub total_questions: i64,
    pub correct_answers: i64,
    pub total_time_spent: i64,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl NewTestResult {
    pub fn into_persisted(self, id: Uuid, created_at: DateTime<Utc>) -> TestResult {
        TestResult {
            id,
            user_id: self.user_id,
            notebook_id: self.notebook_id,
            prep_pilot_id: self.prep_pilot_id,
            test_answers: Json(self.test_answers),
            score: self.score,
            total_questions: self.total_questions,
            correct_answers: self.correct_answers,
            total_time_spent: self.total_time_spent,
            started_at: self.started_at,
            completed_at: self.completed_at,
            created_at,
        }
    }
}

/// DTO for submitting a test attempt.
///
/// References arrive as strings so that malformed ids surface as a
/// bad request rather than a body-parsing failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SubmitTestResultRequest {
    pub notebook_id: Option<String>,
    pub prep_pilot_id: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub test_answers: Vec<TestAnswer>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Minimal confirmation returned after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedTestResult {
    pub id: Uuid,
    pub score: f64,
    pub correct_answers: i64,
    pub total_questions: i64,
    pub total_time_spent: i64,
}

impl From<&TestResult> for SubmittedTestResult {
    fn from(result: &TestResult) -> Self {
        Self {
            id: result.id,
            score: result.score,
            correct_answers: result.correct_answers,
            total_questions: result.total_questions,
            total_time_spent: result.total_time_spent,
        }
    }
}

/// Aggregated statistics over a user's attempts on one notebook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestStats {
    pub total_tests: i64,
    pub average_score: f64,
    pub best_score: f64,
    pub worst_score: f64,
    pub total_time_spent: i64,
    pub average_time: f64,
    /// Percentage change from the oldest to the newest attempt.
    pub improvement_rate: f64,
}
