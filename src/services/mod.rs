// src/services/mod.rs

//! The test-result engine: ownership checks, grading, submission and statistics.
//!
//! `TestResultService` is cheap to clone and holds no mutable state of its own;
//! every operation scopes its reads and writes to one user/notebook/attempt key set.

pub mod grading;
pub mod ownership;
pub mod stats;
pub mod submission;

use uuid::Uuid;

use crate::{error::AppError, models::test_result::TestResult, store::Store};

#[derive(Clone)]
pub struct TestResultService {
    store: Store,
}

impl TestResultService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Loads one attempt, provided it belongs to `user_id`.
    pub async fn get(&self, user_id: Uuid, test_result_id: &str) -> Result<TestResult, AppError> {
        let test_result_id = Uuid::parse_str(test_result_id)
            .map_err(|_| AppError::BadRequest("Invalid test result id format".to_string()))?;

        ownership::validate_test_result_ownership(&self.store, user_id, test_result_id).await
    }

    /// Every attempt of the user across notebooks, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<TestResult>, AppError> {
        self.store.list_test_results_by_user(user_id).await
    }

    /// Attempts on one notebook, newest first. The notebook must belong to the user.
    pub async fn list_for_notebook(
        &self,
        user_id: Uuid,
        notebook_id: &str,
    ) -> Result<Vec<TestResult>, AppError> {
        let notebook_id = parse_notebook_id(notebook_id)?;
        ownership::validate_notebook_ownership(&self.store, user_id, notebook_id).await?;
        self.store.list_test_results(user_id, notebook_id).await
    }
}

pub(crate) fn parse_notebook_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::BadRequest("Invalid notebook_id format".to_string()))
}
