// src/store/mod.rs

//! Persistence seam for notebooks, quizzes and test results.
//!
//! Services never talk to an `EntityStore` directly. They go through
//! [`Store`], which bounds every call with the configured timeout.

pub mod memory;
pub mod postgres;

use std::{future::Future, sync::Arc, time::Duration};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        notebook::Notebook,
        prep_pilot::PrepPilot,
        test_result::{NewTestResult, TestResult},
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait EntityStore: Send + Sync {
    async fn get_notebook(&self, id: Uuid) -> Result<Option<Notebook>, AppError>;

    async fn get_prep_pilot(&self, id: Uuid) -> Result<Option<PrepPilot>, AppError>;

    /// Persists a graded attempt in a single call, assigning `id` and `created_at`.
    async fn create_test_result(&self, result: NewTestResult) -> Result<TestResult, AppError>;

    async fn get_test_result(&self, id: Uuid) -> Result<Option<TestResult>, AppError>;

    /// All attempts of a user, newest `created_at` first.
    async fn list_test_results_by_user(&self, user_id: Uuid) -> Result<Vec<TestResult>, AppError>;

    /// All attempts of a user on one notebook, newest `created_at` first.
    async fn list_test_results(
        &self,
        user_id: Uuid,
        notebook_id: Uuid,
    ) -> Result<Vec<TestResult>, AppError>;

    async fn insert_notebook(&self, notebook: Notebook) -> Result<Notebook, AppError>;

    async fn insert_prep_pilot(&self, prep_pilot: PrepPilot) -> Result<PrepPilot, AppError>;
}

/// Shared handle to the configured backend with a per-call timeout.
#[derive(Clone)]
pub struct Store {
    inner: Arc<dyn EntityStore>,
    timeout: Duration,
}

impl Store {
    pub fn new(inner: Arc<dyn EntityStore>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                tracing::error!("store call {} exceeded {:?}", op, self.timeout);
                Err(AppError::StoreUnavailable(format!(
                    "{} timed out after {:?}",
                    op, self.timeout
                )))
            }
        }
    }

    pub async fn get_notebook(&self, id: Uuid) -> Result<Option<Notebook>, AppError> {
        self.bounded("get_notebook", self.inner.get_notebook(id)).await
    }

    pub async fn get_prep_pilot(&self, id: Uuid) -> Result<Option<PrepPilot>, AppError> {
        self.bounded("get_prep_pilot", self.inner.get_prep_pilot(id))
            .await
    }

    pub async fn create_test_result(&self, result: NewTestResult) -> Result<TestResult, AppError> {
        self.bounded("create_test_result", self.inner.create_test_result(result))
            .await
    }

    pub async fn get_test_result(&self, id: Uuid) -> Result<Option<TestResult>, AppError> {
        self.bounded("get_test_result", self.inner.get_test_result(id))
            .await
    }

    pub async fn list_test_results_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TestResult>, AppError> {
        self.bounded(
            "list_test_results_by_user",
            self.inner.list_test_results_by_user(user_id),
        )
        .await
    }

    pub async fn list_test_results(
        &self,
        user_id: Uuid,
        notebook_id: Uuid,
    ) -> Result<Vec<TestResult>, AppError> {
        self.bounded(
            "list_test_results",
            self.inner.list_test_results(user_id, notebook_id),
        )
        .await
    }

    pub async fn insert_notebook(&self, notebook: Notebook) -> Result<Notebook, AppError> {
        self.bounded("insert_notebook", self.inner.insert_notebook(notebook))
            .await
    }

    pub async fn insert_prep_pilot(&self, prep_pilot: PrepPilot) -> Result<PrepPilot, AppError> {
        self.bounded("insert_prep_pilot", self.inner.insert_prep_pilot(prep_pilot))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    /// Never answers within any reasonable timeout.
    struct StalledStore;

    #[async_trait]
    impl EntityStore for StalledStore {
        async fn get_notebook(&self, _id: Uuid) -> Result<Option<Notebook>, AppError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(None)
        }

        async fn get_prep_pilot(&self, _id: Uuid) -> Result<Option<PrepPilot>, AppError> {
            unimplemented!()
        }

        async fn create_test_result(&self, _r: NewTestResult) -> Result<TestResult, AppError> {
            unimplemented!()
        }

        async fn get_test_result(&self, _id: Uuid) -> Result<Option<TestResult>, AppError> {
            unimplemented!()
        }

        async fn list_test_results_by_user(&self, _u: Uuid) -> Result<Vec<TestResult>, AppError> {
            unimplemented!()
        }

        async fn list_test_results(&self, _u: Uuid, _n: Uuid) -> Result<Vec<TestResult>, AppError> {
            unimplemented!()
        }

        async fn insert_notebook(&self, _n: Notebook) -> Result<Notebook, AppError> {
            unimplemented!()
        }

        async fn insert_prep_pilot(&self, _p: PrepPilot) -> Result<PrepPilot, AppError> {
            unimplemented!()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn slow_store_fails_with_store_unavailable() {
        let store = Store::new(Arc::new(StalledStore), Duration::from_secs(10));

        let err = store.get_notebook(Uuid::new_v4()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    }
}
