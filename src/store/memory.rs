// src/store/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
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

/// Process-local store used when no database is configured, and in tests.
#[derive(Default)]
pub struct MemoryStore {
    notebooks: RwLock<HashMap<Uuid, Notebook>>,
    prep_pilots: RwLock<HashMap<Uuid, PrepPilot>>,
    test_results: RwLock<HashMap<Uuid, TestResult>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn collect_newest_first(&self, keep: impl Fn(&TestResult) -> bool) -> Vec<TestResult> {
        let mut results: Vec<TestResult> = self
            .test_results
            .read()
            .await
            .values()
            .filter(|r| keep(r))
            .cloned()
            .collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        results
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn get_notebook(&self, id: Uuid) -> Result<Option<Notebook>, AppError> {
        Ok(self.notebooks.read().await.get(&id).cloned())
    }

    async fn get_prep_pilot(&self, id: Uuid) -> Result<Option<PrepPilot>, AppError> {
        Ok(self.prep_pilots.read().await.get(&id).cloned())
    }

    async fn create_test_result(&self, result: NewTestResult) -> Result<TestResult, AppError> {
        let mut results = self.test_results.write().await;

        // created_at is the sort key for history; keep it strictly increasing
        // so two submissions in the same clock tick still order deterministically.
        let mut created_at = Utc::now();
        if let Some(latest) = results.values().map(|r| r.created_at).max() {
            if created_at <= latest {
                created_at = latest + chrono::Duration::microseconds(1);
            }
        }

        let persisted = result.into_persisted(Uuid::new_v4(), created_at);
        results.insert(persisted.id, persisted.clone());
        Ok(persisted)
    }

    async fn get_test_result(&self, id: Uuid) -> Result<Option<TestResult>, AppError> {
        Ok(self.test_results.read().await.get(&id).cloned())
    }

    async fn list_test_results_by_user(&self, user_id: Uuid) -> Result<Vec<TestResult>, AppError> {
        Ok(self.collect_newest_first(|r| r.user_id == user_id).await)
    }

    async fn list_test_results(
        &self,
        user_id: Uuid,
        notebook_id: Uuid,
    ) -> Result<Vec<TestResult>, AppError> {
        Ok(self
            .collect_newest_first(|r| r.user_id == user_id && r.notebook_id == notebook_id)
            .await)
    }

    async fn insert_notebook(&self, notebook: Notebook) -> Result<Notebook, AppError> {
        self.notebooks
            .write()
            .await
            .insert(notebook.id, notebook.clone());
        Ok(notebook)
    }

    async fn insert_prep_pilot(&self, prep_pilot: PrepPilot) -> Result<PrepPilot, AppError> {
        self.prep_pilots
            .write()
            .await
            .insert(prep_pilot.id, prep_pilot.clone());
        Ok(prep_pilot)
    }
}
