// src/models/prep_pilot.rs

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

/// The four labeled choices of a multiple-choice question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOptions {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: QuestionOptions,
    /// The correct option label.
    pub answer: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    #[serde(rename = "chapterTitle")]
    pub chapter_title: String,
    pub questions: Vec<Question>,
}

/// Represents the 'prep_pilots' table: a generated quiz tied to exactly one notebook.
///
/// Chapters are stored as a JSON document in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PrepPilot {
    pub id: Uuid,
    pub notebook_id: Uuid,
    pub chapters: Json<Vec<Chapter>>,
}

impl PrepPilot {
    pub fn new(notebook_id: Uuid, chapters: Vec<Chapter>) -> Self {
        Self {
            id: Uuid::new_v4(),
            notebook_id,
            chapters: Json(chapters),
        }
    }

    /// Looks up a question by its text, preferring the named chapter.
    pub fn find_question(&self, chapter_title: &str, text: &str) -> Option<&Question> {
        let in_chapter = self
            .chapters
            .iter()
            .filter(|c| c.chapter_title == chapter_title)
            .flat_map(|c| c.questions.iter())
            .find(|q| q.question == text);

        in_chapter.or_else(|| {
            self.chapters
                .iter()
                .flat_map(|c| c.questions.iter())
                .find(|q| q.question == text)
        })
    }
}
