// src/services/grading.rs

//! Scores a submitted attempt.
//!
//! Correctness is exact, case-sensitive string equality between the chosen
//! option and the correct option. Nothing is trimmed or normalized: changing
//! that policy would rescore every stored attempt.

use crate::{
    models::{prep_pilot::PrepPilot, test_result::TestAnswer},
    utils::rounding::round2,
};

/// Answers with server-computed correctness plus the aggregates derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedAnswers {
    pub answers: Vec<TestAnswer>,
    pub correct_answers: i64,
    pub total_questions: i64,
    pub total_time_spent: i64,
}

impl GradedAnswers {
    pub fn score(&self) -> f64 {
        score_percentage(self.correct_answers, self.total_questions)
    }
}

pub fn is_correct(answer: &TestAnswer) -> bool {
    answer.user_answer == answer.correct_answer
}

/// Grades every item. Never rejects: an unknown choice is simply incorrect.
/// Any client-supplied `is_correct` is overwritten.
pub fn grade(mut answers: Vec<TestAnswer>) -> GradedAnswers {
    let mut correct_answers = 0;
    let mut total_time_spent: i64 = 0;

    for answer in answers.iter_mut() {
        answer.is_correct = is_correct(answer);
        if answer.is_correct {
            correct_answers += 1;
        }
        total_time_spent = total_time_spent.saturating_add(answer.time_spent);
    }

    GradedAnswers {
        total_questions: answers.len() as i64,
        correct_answers,
        total_time_spent,
        answers,
    }
}

/// `round2(100 * correct / total)`, or 0 for an empty attempt.
pub fn score_percentage(correct_answers: i64, total_questions: i64) -> f64 {
    if total_questions <= 0 {
        return 0.0;
    }
    round2(correct_answers as f64 / total_questions as f64 * 100.0)
}

/// Replaces each item's answer key with the quiz's own where the question can be found.
///
/// Items are matched by question text, preferring the item's chapter. Unmatched
/// items keep the key they were submitted with.
pub fn apply_answer_key(quiz: &PrepPilot, answers: &mut [TestAnswer]) -> usize {
    let mut matched = 0;
    for answer in answers.iter_mut() {
        if let Some(question) = quiz.find_question(&answer.chapter_title, &answer.question) {
            answer.correct_answer = question.answer.clone();
            answer.explanation = question.explanation.clone();
            matched += 1;
        }
    }
    matched
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::models::prep_pilot::{Chapter, Question, QuestionOptions};

    fn answer(question: &str, correct: &str, chosen: &str, time_spent: i64) -> TestAnswer {
        TestAnswer {
            question: question.to_string(),
            options: QuestionOptions::default(),
            correct_answer: correct.to_string(),
            user_answer: chosen.to_string(),
            is_correct: false,
            chapter_title: "Chapter 1".to_string(),
            explanation: String::new(),
            time_spent,
        }
    }

    #[test]
    fn three_of_four_scores_seventy_five() {
        let graded = grade(vec![
            answer("q1", "A", "A", 10),
            answer("q2", "B", "B", 20),
            answer("q3", "C", "C", 30),
            answer("q4", "D", "A", 40),
        ]);

        assert_eq!(graded.correct_answers, 3);
        assert_eq!(graded.total_questions, 4);
        assert_eq!(graded.total_time_spent, 100);
        assert_eq!(graded.score(), 75.0);
        let flags: Vec<bool> = graded.answers.iter().map(|a| a.is_correct).collect();
        assert_eq!(flags, vec![true, true, true, false]);
    }

    #[test]
    fn matching_is_exact_and_case_sensitive() {
        let graded = grade(vec![
            answer("q1", "A", "a", 0),
            answer("q2", "B", "B ", 0),
            answer("q3", "C", "Z", 0),
        ]);

        assert_eq!(graded.correct_answers, 0);
        assert!(graded.answers.iter().all(|a| !a.is_correct));
    }

    #[test]
    fn client_supplied_correctness_is_discarded() {
        let mut lying = answer("q1", "A", "B", 5);
        lying.is_correct = true;

        let graded = grade(vec![lying]);

        assert!(!graded.answers[0].is_correct);
        assert_eq!(graded.score(), 0.0);
    }

    #[test]
    fn empty_attempt_scores_zero() {
        let graded = grade(Vec::new());
        assert_eq!(graded.total_questions, 0);
        assert_eq!(graded.score(), 0.0);
    }

    #[test]
    fn score_is_rounded_to_two_decimals() {
        assert_eq!(score_percentage(2, 3), 66.67);
        assert_eq!(score_percentage(1, 3), 33.33);
        assert_eq!(score_percentage(3, 3), 100.0);
    }

    #[test]
    fn grading_is_deterministic() {
        let items = vec![answer("q1", "A", "A", 3), answer("q2", "B", "C", 4)];
        assert_eq!(grade(items.clone()), grade(items));
    }

    #[test]
    fn answer_key_comes_from_the_quiz_when_the_question_is_known() {
        let quiz = PrepPilot::new(
            Uuid::new_v4(),
            vec![Chapter {
                chapter_title: "Chapter 1".to_string(),
                questions: vec![Question {
                    question: "q1".to_string(),
                    options: QuestionOptions::default(),
                    answer: "C".to_string(),
                    explanation: "because C".to_string(),
                }],
            }],
        );
        // The client claims "A" is correct and answered "A".
        let mut items = vec![answer("q1", "A", "A", 0), answer("unknown", "B", "B", 0)];

        let matched = apply_answer_key(&quiz, &mut items);
        let graded = grade(items);

        assert_eq!(matched, 1);
        assert_eq!(graded.answers[0].correct_answer, "C");
        assert_eq!(graded.answers[0].explanation, "because C");
        assert!(!graded.answers[0].is_correct);
        assert!(graded.answers[1].is_correct);
    }
}
