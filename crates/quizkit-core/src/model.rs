//! Core data model types for quizkit.
//!
//! These types mirror the JSON documents on disk: quiz definitions written
//! by authors, submissions sent by quiz takers, and the scored results the
//! scorer produces.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named collection of questions tied to a lecture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    /// Identifier; equals the storage key (file stem).
    pub id: String,
    /// Lecture code, e.g. "pcv5".
    pub lecture: String,
    /// Human-readable topic.
    pub topic: String,
    /// Questions in presentation order.
    pub questions: Vec<Question>,
    /// Source document the quiz was written from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_pdf: Option<String>,
    /// Creation timestamp. Only compared as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

impl Quiz {
    /// Find a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// The summary the grouper works with.
    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            id: self.id.clone(),
            lecture: self.lecture.clone(),
            topic: self.topic.clone(),
            num_questions: self.questions.len(),
            created: self
                .created
                .clone()
                .unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

/// A single question within a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique within the quiz.
    pub id: String,
    /// The question text.
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Where in the lecture slides the answer can be found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_ref: Option<String>,
    /// Type tag plus the type-specific answer key.
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// The three supported question types and their answer keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice {
        options: Vec<String>,
        /// Index into `options`.
        correct: usize,
    },
    TrueFalse {
        correct: bool,
    },
    ShortAnswer {
        expected_keywords: Vec<String>,
    },
}

impl QuestionKind {
    /// The `type` tag as it appears in JSON.
    pub fn type_name(&self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice { .. } => "multiple_choice",
            QuestionKind::TrueFalse { .. } => "true_false",
            QuestionKind::ShortAnswer { .. } => "short_answer",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

const UNKNOWN: &str = "Unknown";

/// Listing entry for a quiz, as consumed by the grouper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub id: String,
    pub lecture: String,
    pub topic: String,
    pub num_questions: usize,
    pub created: String,
}

impl QuizSummary {
    /// Build a summary from a raw quiz document, tolerating missing fields.
    ///
    /// `stem` is used when the document has no `id`.
    pub fn from_value(value: &Value, stem: &str) -> Self {
        let text = |key: &str, default: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or(default)
                .to_string()
        };

        Self {
            id: text("id", stem),
            lecture: text("lecture", UNKNOWN),
            topic: text("topic", UNKNOWN),
            num_questions: value
                .get("questions")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
            created: text("created", UNKNOWN),
        }
    }
}

/// A quiz taker's answers for one quiz.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub answers: Vec<SubmittedAnswer>,
    /// Wall-clock time for the whole quiz.
    #[serde(default)]
    pub total_time_sec: f64,
}

/// The answer given for a single question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    pub question_id: String,
    /// Option index (multiple choice) or boolean (true/false).
    #[serde(default)]
    pub selected: Option<Selection>,
    /// Free text (short answer).
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub time_spent_sec: f64,
}

/// Whatever the client sent as `selected`.
///
/// Only `Index` can match a multiple-choice key and only `Flag` can match a
/// true/false key; `Other` never matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    Flag(bool),
    Index(i64),
    Other(Value),
}

impl Selection {
    /// True if this is an integer selection equal to `index`.
    pub fn is_index(&self, index: usize) -> bool {
        matches!(self, Selection::Index(i) if usize::try_from(*i).is_ok_and(|i| i == index))
    }

    /// True if this is a boolean selection equal to `value`.
    pub fn is_flag(&self, value: bool) -> bool {
        matches!(self, Selection::Flag(b) if *b == value)
    }
}

/// The outcome of scoring one submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResult {
    pub quiz_id: String,
    /// When the submission was scored.
    pub completed: DateTime<Utc>,
    /// One record per question, in quiz order.
    pub answers: Vec<AnswerRecord>,
    pub score: u32,
    pub total: u32,
    /// `score / total` as a rounded percentage, 0 when `total` is 0.
    pub percentage: u32,
    #[serde(default)]
    pub total_time_sec: f64,
}

/// Per-question scoring detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub slide_ref: String,
    #[serde(flatten)]
    pub detail: AnswerDetail,
    /// Fully correct. For short answers this requires every keyword.
    pub is_correct: bool,
    /// Whether the question contributed a point to the score.
    pub score_awarded: bool,
    #[serde(default)]
    pub time_spent_sec: f64,
}

/// Type-specific part of an [`AnswerRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerDetail {
    MultipleChoice {
        selected: Option<Selection>,
        correct_index: usize,
    },
    TrueFalse {
        selected: Option<Selection>,
        correct_value: bool,
    },
    ShortAnswer {
        text: String,
        keywords_found: usize,
        keywords_expected: usize,
    },
}
