//! Answer-free views of quizzes for quiz takers.
//!
//! These types have no field for `correct` or `expected_keywords`, so
//! serializing them cannot leak an answer key.

use serde::Serialize;

use crate::model::{QuestionKind, Quiz};

/// A quiz as shown to someone taking it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientQuiz {
    pub id: String,
    pub lecture: String,
    pub topic: String,
    pub questions: Vec<ClientQuestion>,
}

/// A question without its answer key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub question: String,
    pub topic: String,
    /// Present for multiple-choice questions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl Quiz {
    /// Strip every answer key from the quiz.
    pub fn client_view(&self) -> ClientQuiz {
        ClientQuiz {
            id: self.id.clone(),
            lecture: self.lecture.clone(),
            topic: self.topic.clone(),
            questions: self
                .questions
                .iter()
                .map(|q| ClientQuestion {
                    id: q.id.clone(),
                    kind: q.kind.type_name(),
                    question: q.question.clone(),
                    topic: q.topic.clone().unwrap_or_default(),
                    options: match &q.kind {
                        QuestionKind::MultipleChoice { options, .. } => Some(options.clone()),
                        _ => None,
                    },
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn client_view_has_no_answer_keys() {
        let quiz: Quiz = serde_json::from_value(json!({
            "id": "pcv5_dlt",
            "lecture": "pcv5",
            "topic": "DLT",
            "questions": [
                {"id": "q1", "type": "multiple_choice", "question": "?",
                 "options": ["a", "b"], "correct": 1, "topic": "basics"},
                {"id": "q2", "type": "true_false", "question": "?", "correct": true},
                {"id": "q3", "type": "short_answer", "question": "?",
                 "expected_keywords": ["secret"]}
            ]
        }))
        .unwrap();

        let view = quiz.client_view();
        let text = serde_json::to_string(&view).unwrap();
        assert!(!text.contains("correct"));
        assert!(!text.contains("expected_keywords"));
        assert!(!text.contains("secret"));

        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["questions"][0]["type"], "multiple_choice");
        assert_eq!(value["questions"][0]["options"], json!(["a", "b"]));
        assert_eq!(value["questions"][0]["topic"], "basics");
        assert!(value["questions"][1].get("options").is_none());
        assert_eq!(value["questions"][1]["topic"], "");
    }
}
