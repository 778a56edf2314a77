//! Answer scoring.
//!
//! Multiple-choice and true/false questions are worth one point for an exact,
//! type-strict match. Short answers earn the point once at least half of the
//! expected keywords (rounded down) appear in the text, but only count as
//! fully correct when every keyword does. Both flags are kept on the record.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::model::{
    AnswerDetail, AnswerRecord, Question, QuestionKind, Quiz, ScoredResult, Submission,
    SubmittedAnswer,
};

/// Keyword tally for a short-answer response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch {
    pub found: usize,
    pub expected: usize,
}

impl KeywordMatch {
    /// Count the keywords that occur, case-insensitively, anywhere in `text`.
    pub fn count(text: &str, keywords: &[String]) -> Self {
        let haystack = text.to_lowercase();
        let found = keywords
            .iter()
            .filter(|kw| haystack.contains(&kw.to_lowercase()))
            .count();

        Self {
            found,
            expected: keywords.len(),
        }
    }

    /// Earns the point: half the keywords, rounded down, and at least one keyword expected.
    pub fn awards_point(&self) -> bool {
        self.expected > 0 && self.found >= self.expected / 2
    }

    /// Every keyword was found.
    pub fn is_complete(&self) -> bool {
        self.awards_point() && self.found == self.expected
    }
}

/// Score a submission against a quiz.
///
/// Unanswered questions are scored as incorrect. `completed_at` is stamped
/// onto the result.
pub fn score_submission(
    quiz: &Quiz,
    submission: &Submission,
    completed_at: DateTime<Utc>,
) -> ScoredResult {
    let answers_by_id: HashMap<&str, &SubmittedAnswer> = submission
        .answers
        .iter()
        .map(|a| (a.question_id.as_str(), a))
        .collect();

    let answers: Vec<AnswerRecord> = quiz
        .questions
        .iter()
        .map(|q| score_question(q, answers_by_id.get(q.id.as_str()).copied()))
        .collect();

    let score = answers.iter().filter(|a| a.score_awarded).count() as u32;
    let total = quiz.questions.len() as u32;

    tracing::debug!("scored quiz {}: {}/{}", quiz.id, score, total);

    ScoredResult {
        quiz_id: quiz.id.clone(),
        completed: completed_at,
        answers,
        score,
        total,
        percentage: percentage(score, total),
        total_time_sec: submission.total_time_sec,
    }
}

/// Score a single question. `answer` is `None` when the question was skipped.
pub fn score_question(question: &Question, answer: Option<&SubmittedAnswer>) -> AnswerRecord {
    let selected = answer.and_then(|a| a.selected.clone());

    let (detail, is_correct, score_awarded) = match &question.kind {
        QuestionKind::MultipleChoice { correct, .. } => {
            let hit = selected.as_ref().is_some_and(|s| s.is_index(*correct));
            (
                AnswerDetail::MultipleChoice {
                    selected,
                    correct_index: *correct,
                },
                hit,
                hit,
            )
        }
        QuestionKind::TrueFalse { correct } => {
            let hit = selected.as_ref().is_some_and(|s| s.is_flag(*correct));
            (
                AnswerDetail::TrueFalse {
                    selected,
                    correct_value: *correct,
                },
                hit,
                hit,
            )
        }
        QuestionKind::ShortAnswer { expected_keywords } => {
            let text = answer.and_then(|a| a.text.clone()).unwrap_or_default();
            let tally = KeywordMatch::count(&text, expected_keywords);
            (
                AnswerDetail::ShortAnswer {
                    text,
                    keywords_found: tally.found,
                    keywords_expected: tally.expected,
                },
                tally.is_complete(),
                tally.awards_point(),
            )
        }
    };

    AnswerRecord {
        question_id: question.id.clone(),
        topic: question.topic.clone().unwrap_or_default(),
        slide_ref: question.slide_ref.clone().unwrap_or_default(),
        detail,
        is_correct,
        score_awarded,
        time_spent_sec: answer.map_or(0.0, |a| a.time_spent_sec),
    }
}

/// Rounded percentage with ties to even; 0 when there is nothing to score.
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (f64::from(score) / f64::from(total) * 100.0).round_ties_even() as u32
}
