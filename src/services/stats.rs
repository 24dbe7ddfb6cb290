// src/services/stats.rs

use uuid::Uuid;

use super::{TestResultService, ownership, parse_notebook_id};
use crate::{
    error::AppError,
    models::test_result::{TestResult, TestStats},
    utils::rounding::round2,
};

impl TestResultService {
    /// Summary of a user's attempts on one notebook.
    ///
    /// Reads a snapshot at call time; concurrent submissions may or may not be included.
    pub async fn stats(&self, user_id: Uuid, notebook_id: &str) -> Result<TestStats, AppError> {
        let notebook_id = parse_notebook_id(notebook_id)?;
        ownership::validate_notebook_ownership(self.store(), user_id, notebook_id).await?;

        let results = self.store().list_test_results(user_id, notebook_id).await?;
        Ok(compute_stats(&results))
    }
}

/// Reduces attempts to a [`TestStats`]. `results` must be ordered newest first.
///
/// No attempts is not an error: every counter is zero.
pub fn compute_stats(results: &[TestResult]) -> TestStats {
    let (Some(newest), Some(oldest)) = (results.first(), results.last()) else {
        return TestStats::default();
    };

    let total_tests = results.len();
    let total_score: f64 = results.iter().map(|r| r.score).sum();
    // Saturates rather than wrapping; averages come from the f64 sum.
    let total_time = results
        .iter()
        .fold(0i64, |acc, r| acc.saturating_add(r.total_time_spent));
    let total_time_f64: f64 = results.iter().map(|r| r.total_time_spent as f64).sum();
    let best_score = results.iter().map(|r| r.score).fold(f64::MIN, f64::max);
    let worst_score = results.iter().map(|r| r.score).fold(f64::MAX, f64::min);

    TestStats {
        total_tests: total_tests as i64,
        average_score: round2(total_score / total_tests as f64),
        best_score,
        worst_score,
        total_time_spent: total_time,
        average_time: round2(total_time_f64 / total_tests as f64),
        improvement_rate: if total_tests >= 2 {
            improvement_rate(oldest.score, newest.score)
        } else {
            0.0
        },
    }
}

/// Percentage change from `oldest` to `newest`. A zero baseline has no defined rate.
pub fn improvement_rate(oldest: f64, newest: f64) -> f64 {
    if oldest > 0.0 {
        round2((newest - oldest) / oldest * 100.0)
    } else {
        0.0
    }
}
