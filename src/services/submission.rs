// src/services/submission.rs

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use super::{TestResultService, grading, ownership};
use crate::{
    error::AppError,
    models::test_result::{NewTestResult, SubmitTestResultRequest, SubmittedTestResult},
};

fn parse_reference(raw: Option<&str>, field: &str) -> Result<Uuid, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("{} is required", field)))?;

    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid {} format", field)))
}

impl TestResultService {
    /// Validates, grades and persists one attempt.
    ///
    /// * Both references must parse and there must be at least one answer.
    /// * The notebook must belong to the user and the quiz to the notebook.
    /// * Correctness and aggregates are always recomputed here.
    /// * Missing `started_at`/`completed_at` default to now, independently of each other.
    ///
    /// Everything is checked before the single create call, so a failure never
    /// leaves a partial attempt behind.
    pub async fn submit(
        &self,
        user_id: Uuid,
        request: SubmitTestResultRequest,
    ) -> Result<SubmittedTestResult, AppError> {
        let notebook_id = parse_reference(request.notebook_id.as_deref(), "notebook_id")?;
        let prep_pilot_id = parse_reference(request.prep_pilot_id.as_deref(), "prep_pilot_id")?;
        if request.test_answers.is_empty() {
            return Err(AppError::BadRequest(
                "test_answers cannot be empty".to_string(),
            ));
        }
        request.validate()?;

        ownership::validate_notebook_ownership(self.store(), user_id, notebook_id).await?;
        let prep_pilot =
            ownership::validate_prep_pilot_belongs_to_notebook(self.store(), prep_pilot_id, notebook_id)
                .await?;

        let mut answers = request.test_answers;
        let matched = grading::apply_answer_key(&prep_pilot, &mut answers);
        if matched < answers.len() {
            tracing::debug!(
                "{} of {} answers not found in prep pilot {}, grading against submitted key",
                answers.len() - matched,
                answers.len(),
                prep_pilot_id
            );
        }

        let graded = grading::grade(answers);
        let score = graded.score();

        // TODO: reject completed_at < started_at once product signs off; stored as given for now.
        let now = Utc::now();
        let started_at = request.started_at.unwrap_or(now);
        let completed_at = request.completed_at.unwrap_or(now);

        let persisted = self
            .store()
            .create_test_result(NewTestResult {
                user_id,
                notebook_id,
                prep_pilot_id,
                test_answers: graded.answers,
                score,
                total_questions: graded.total_questions,
                correct_answers: graded.correct_answers,
                total_time_spent: graded.total_time_spent,
                started_at,
                completed_at,
            })
            .await?;

        tracing::info!(
            "Test result {} submitted by user {} for notebook {}: {}/{} ({}%)",
            persisted.id,
            user_id,
            notebook_id,
            persisted.correct_answers,
            persisted.total_questions,
            persisted.score
        );

        Ok(SubmittedTestResult::from(&persisted))
    }
}
