// src/models/notebook.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Represents the 'notebooks' table in the database.
/// A user-owned container for study material and a generated quiz.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Notebook {
    pub id: Uuid,

    /// Owner of the notebook. First link of the ownership chain.
    pub user_id: Uuid,

    /// The quiz generated for this notebook, if any.
    pub prep_pilot_id: Option<Uuid>,

    pub name: String,
    pub icon: String,
    pub color: String,

    /// Mapped from the database column 'type' since `type` is a reserved keyword in Rust.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notebook_type: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notebook {
    /// A blank notebook owned by `user_id`.
    pub fn new(user_id: Uuid, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            prep_pilot_id: None,
            name: name.into(),
            icon: String::new(),
            color: String::new(),
            notebook_type: String::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
