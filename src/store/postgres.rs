// src/store/postgres.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, types::Json};
use uuid::Uuid;

use super::EntityStore;
use crate::{
    error::AppError,
    models::{
        notebook::Notebook,
        prep_pilot::PrepPilot,
        test_result::{NewTestResult, TestResult},
    },
};

const TEST_RESULT_COLUMNS: &str = r#"
    id, user_id, notebook_id, prep_pilot_id, test_answers,
    score, total_questions, correct_answers, total_time_spent,
    started_at, completed_at, created_at
"#;

/// Postgres-backed store. Ids and `created_at` are assigned by column defaults.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityStore for PgStore {
    async fn get_notebook(&self, id: Uuid) -> Result<Option<Notebook>, AppError> {
        let notebook = sqlx::query_as::<_, Notebook>(
            r#"
            SELECT id, user_id, prep_pilot_id, name, icon, color, type, created_at, updated_at
            FROM notebooks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch notebook {}: {:?}", id, e);
            AppError::from(e)
        })?;

        Ok(notebook)
    }

    async fn get_prep_pilot(&self, id: Uuid) -> Result<Option<PrepPilot>, AppError> {
        let prep_pilot = sqlx::query_as::<_, PrepPilot>(
            "SELECT id, notebook_id, chapters FROM prep_pilots WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch prep pilot {}: {:?}", id, e);
            AppError::from(e)
        })?;

        Ok(prep_pilot)
    }

    async fn create_test_result(&self, result: NewTestResult) -> Result<TestResult, AppError> {
        let (id, created_at): (Uuid, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO test_results (
                user_id, notebook_id, prep_pilot_id, test_answers,
                score, total_questions, correct_answers, total_time_spent,
                started_at, completed_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, created_at
            "#,
        )
        .bind(result.user_id)
        .bind(result.notebook_id)
        .bind(result.prep_pilot_id)
        .bind(Json(&result.test_answers))
        .bind(result.score)
        .bind(result.total_questions)
        .bind(result.correct_answers)
        .bind(result.total_time_spent)
        .bind(result.started_at)
        .bind(result.completed_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert test result: {:?}", e);
            AppError::from(e)
        })?;

        Ok(result.into_persisted(id, created_at))
    }

    async fn get_test_result(&self, id: Uuid) -> Result<Option<TestResult>, AppError> {
        let sql = format!("SELECT {} FROM test_results WHERE id = $1", TEST_RESULT_COLUMNS);
        let result = sqlx::query_as::<_, TestResult>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch test result {}: {:?}", id, e);
                AppError::from(e)
            })?;

        Ok(result)
    }

    async fn list_test_results_by_user(&self, user_id: Uuid) -> Result<Vec<TestResult>, AppError> {
        let sql = format!(
            "SELECT {} FROM test_results WHERE user_id = $1 ORDER BY created_at DESC",
            TEST_RESULT_COLUMNS
        );
        let results = sqlx::query_as::<_, TestResult>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list test results for user {}: {:?}", user_id, e);
                AppError::from(e)
            })?;

        Ok(results)
    }

    async fn list_test_results(
        &self,
        user_id: Uuid,
        notebook_id: Uuid,
    ) -> Result<Vec<TestResult>, AppError> {
        let sql = format!(
            "SELECT {} FROM test_results WHERE user_id = $1 AND notebook_id = $2 ORDER BY created_at DESC",
            TEST_RESULT_COLUMNS
        );
        let results = sqlx::query_as::<_, TestResult>(&sql)
            .bind(user_id)
            .bind(notebook_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list test results for notebook {}: {:?}", notebook_id, e);
                AppError::from(e)
            })?;

        Ok(results)
    }

    async fn insert_notebook(&self, notebook: Notebook) -> Result<Notebook, AppError> {
        sqlx::query(
            r#"
            INSERT INTO notebooks (id, user_id, prep_pilot_id, name, icon, color, type, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(notebook.id)
        .bind(notebook.user_id)
        .bind(notebook.prep_pilot_id)
        .bind(&notebook.name)
        .bind(&notebook.icon)
        .bind(&notebook.color)
        .bind(&notebook.notebook_type)
        .bind(notebook.created_at)
        .bind(notebook.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert notebook {}: {:?}", notebook.id, e);
            AppError::from(e)
        })?;

        Ok(notebook)
    }

    async fn insert_prep_pilot(&self, prep_pilot: PrepPilot) -> Result<PrepPilot, AppError> {
        sqlx::query("INSERT INTO prep_pilots (id, notebook_id, chapters) VALUES ($1, $2, $3)")
            .bind(prep_pilot.id)
            .bind(prep_pilot.notebook_id)
            .bind(&prep_pilot.chapters)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert prep pilot {}: {:?}", prep_pilot.id, e);
                AppError::from(e)
            })?;

        Ok(prep_pilot)
    }
}
