// src/services/ownership.rs

//! Resolve-and-authorize for the User -> Notebook -> PrepPilot -> TestResult chain.
//!
//! Every link is checked the same way: fetch the entity, then compare its
//! parent reference with the expected parent. A missing entity and a foreign
//! one produce different error kinds but the same caller-facing message.

use uuid::Uuid;

use crate::{
    error::AppError,
    models::{notebook::Notebook, prep_pilot::PrepPilot, test_result::TestResult},
    store::Store,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Notebook,
    PrepPilot,
    TestResult,
}

impl EntityKind {
    pub fn denial_message(self) -> &'static str {
        match self {
            EntityKind::Notebook => "notebook not found or does not belong to user",
            EntityKind::PrepPilot => "prep pilot not found or does not belong to notebook",
            EntityKind::TestResult => "test result not found or does not belong to user",
        }
    }
}

/// An entity whose parent must match before it can be used.
pub trait Owned {
    const KIND: EntityKind;

    fn parent_id(&self) -> Uuid;
}

impl Owned for Notebook {
    const KIND: EntityKind = EntityKind::Notebook;

    fn parent_id(&self) -> Uuid {
        self.user_id
    }
}

impl Owned for PrepPilot {
    const KIND: EntityKind = EntityKind::PrepPilot;

    fn parent_id(&self) -> Uuid {
        self.notebook_id
    }
}

impl Owned for TestResult {
    const KIND: EntityKind = EntityKind::TestResult;

    fn parent_id(&self) -> Uuid {
        self.user_id
    }
}

#[derive(Debug)]
pub enum Authorization<T> {
    Granted(T),
    NotFound,
    Forbidden,
}

pub fn authorize<T: Owned>(entity: Option<T>, expected_parent: Uuid) -> Authorization<T> {
    match entity {
        None => Authorization::NotFound,
        Some(e) if e.parent_id() != expected_parent => Authorization::Forbidden,
        Some(e) => Authorization::Granted(e),
    }
}

impl<T: Owned> Authorization<T> {
    pub fn into_result(self) -> Result<T, AppError> {
        let message = T::KIND.denial_message().to_string();
        match self {
            Authorization::Granted(entity) => Ok(entity),
            Authorization::NotFound => Err(AppError::NotFound(message)),
            Authorization::Forbidden => {
                tracing::warn!("{:?} ownership mismatch", T::KIND);
                Err(AppError::Forbidden(message))
            }
        }
    }
}

pub async fn validate_notebook_ownership(
    store: &Store,
    user_id: Uuid,
    notebook_id: Uuid,
) -> Result<Notebook, AppError> {
    let notebook = store.get_notebook(notebook_id).await?;
    authorize(notebook, user_id).into_result()
}

pub async fn validate_prep_pilot_belongs_to_notebook(
    store: &Store,
    prep_pilot_id: Uuid,
    notebook_id: Uuid,
) -> Result<PrepPilot, AppError> {
    let prep_pilot = store.get_prep_pilot(prep_pilot_id).await?;
    authorize(prep_pilot, notebook_id).into_result()
}

pub async fn validate_test_result_ownership(
    store: &Store,
    user_id: Uuid,
    test_result_id: Uuid,
) -> Result<TestResult, AppError> {
    let test_result = store.get_test_result(test_result_id).await?;
    authorize(test_result, user_id).into_result()
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::{error::ErrorKind, store::MemoryStore};

    fn store() -> Store {
        Store::new(Arc::new(MemoryStore::new()), Duration::from_secs(10))
    }

    #[test]
    fn authorize_distinguishes_missing_from_foreign() {
        let owner = Uuid::new_v4();
        let notebook = Notebook::new(owner, "Biology");

        assert!(matches!(
            authorize(Some(notebook.clone()), owner),
            Authorization::Granted(_)
        ));
        assert!(matches!(
            authorize(Some(notebook), Uuid::new_v4()),
            Authorization::Forbidden
        ));
        assert!(matches!(
            authorize::<Notebook>(None, owner),
            Authorization::NotFound
        ));
    }

    #[tokio::test]
    async fn foreign_notebook_is_forbidden_with_generic_message() {
        let store = store();
        let notebook = store
            .insert_notebook(Notebook::new(Uuid::new_v4(), "Someone else's"))
            .await
            .unwrap();

        let err = validate_notebook_ownership(&store, Uuid::new_v4(), notebook.id)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(err.message(), "notebook not found or does not belong to user");
    }

    #[tokio::test]
    async fn missing_notebook_is_not_found() {
        let err = validate_notebook_ownership(&store(), Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "notebook not found or does not belong to user");
    }

    #[tokio::test]
    async fn prep_pilot_must_belong_to_the_notebook() {
        let store = store();
        let user = Uuid::new_v4();
        let mine = store.insert_notebook(Notebook::new(user, "Mine")).await.unwrap();
        let other = store.insert_notebook(Notebook::new(user, "Other")).await.unwrap();
        let quiz = store
            .insert_prep_pilot(PrepPilot::new(other.id, vec![]))
            .await
            .unwrap();

        let linked = validate_prep_pilot_belongs_to_notebook(&store, quiz.id, other.id).await;
        assert!(linked.is_ok());

        let err = validate_prep_pilot_belongs_to_notebook(&store, quiz.id, mine.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }
}
