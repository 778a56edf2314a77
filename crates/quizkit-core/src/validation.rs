//! Quiz schema validation.
//!
//! Works on raw JSON so that structural mistakes (a string where an index is
//! expected, a missing list) can be reported instead of failing to parse.
//! Every violation is collected; validity is strict, so advisory findings
//! such as "recommend 10+ questions" also make a quiz invalid.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

const REQUIRED_QUIZ_FIELDS: [&str; 4] = ["id", "lecture", "topic", "questions"];
const REQUIRED_QUESTION_FIELDS: [&str; 3] = ["id", "type", "question"];
const VALID_QUESTION_TYPES: [&str; 3] = ["multiple_choice", "true_false", "short_answer"];

const MIN_OPTIONS: usize = 2;
const MAX_OPTIONS: usize = 6;
const RECOMMENDED_MIN_QUESTIONS: usize = 5;

/// Question counts by type. Counted regardless of validity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuizStats {
    pub question_count: usize,
    pub mc_count: usize,
    pub tf_count: usize,
    pub sa_count: usize,
}

impl std::ops::AddAssign for QuizStats {
    fn add_assign(&mut self, other: Self) {
        self.question_count += other.question_count;
        self.mc_count += other.mc_count;
        self.tf_count += other.tf_count;
        self.sa_count += other.sa_count;
    }
}

/// Outcome of validating one quiz document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub stats: QuizStats,
}

impl ValidationReport {
    fn finish(errors: Vec<String>, stats: QuizStats) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            stats,
        }
    }
}

/// Validate a quiz record whose storage key is `filename_stem`.
pub fn validate_quiz(record: &Value, filename_stem: &str) -> ValidationReport {
    let mut errors = Vec::new();
    let mut stats = QuizStats::default();
    let prefix = format!("Quiz '{filename_stem}'");

    let Some(quiz) = record.as_object() else {
        errors.push(format!(
            "{prefix}: Expected a JSON object, got {}",
            json_type_name(record)
        ));
        return ValidationReport::finish(errors, stats);
    };

    for field in REQUIRED_QUIZ_FIELDS {
        if !quiz.contains_key(field) {
            errors.push(format!("{prefix}: Missing required field '{field}'"));
        }
    }

    if let Some(id) = quiz.get("id") {
        if id.as_str() != Some(filename_stem) {
            errors.push(format!(
                "{prefix}: ID in file ({}) doesn't match filename",
                display_value(id)
            ));
        }
    }

    if let Some(lecture) = quiz.get("lecture") {
        let well_formed = lecture
            .as_str()
            .and_then(|l| l.chars().next())
            .is_some_and(char::is_alphabetic);
        if !well_formed {
            errors.push(format!(
                "{prefix}: Invalid lecture format {}",
                display_value(lecture)
            ));
        }
    }

    let Some(questions) = quiz.get("questions") else {
        return ValidationReport::finish(errors, stats);
    };

    let Some(questions) = questions.as_array() else {
        errors.push(format!("{prefix}: 'questions' must be an array"));
        return ValidationReport::finish(errors, stats);
    };

    stats.question_count = questions.len();

    if questions.is_empty() {
        errors.push(format!("{prefix}: No questions in quiz"));
    } else if questions.len() < RECOMMENDED_MIN_QUESTIONS {
        errors.push(format!(
            "{prefix}: Only {} questions (recommend 10+)",
            questions.len()
        ));
    }

    let mut seen_ids = HashSet::new();
    let has_duplicates = questions
        .iter()
        .filter_map(|q| q.get("id"))
        .any(|id| !seen_ids.insert(id.to_string()));
    if has_duplicates {
        errors.push(format!("{prefix}: Duplicate question IDs detected"));
    }

    for (idx, question) in questions.iter().enumerate() {
        let q_prefix = format!("{prefix}, Question {}", idx + 1);
        let Some(question) = question.as_object() else {
            errors.push(format!(
                "{q_prefix}: Expected a JSON object, got {}",
                json_type_name(question)
            ));
            continue;
        };

        errors.extend(validate_question(question, &q_prefix));

        match question.get("type").and_then(Value::as_str) {
            Some("multiple_choice") => stats.mc_count += 1,
            Some("true_false") => stats.tf_count += 1,
            Some("short_answer") => stats.sa_count += 1,
            _ => {}
        }
    }

    ValidationReport::finish(errors, stats)
}

fn validate_question(q: &Map<String, Value>, prefix: &str) -> Vec<String> {
    let mut errors = Vec::new();

    for field in REQUIRED_QUESTION_FIELDS {
        if !q.contains_key(field) {
            errors.push(format!("{prefix}: Missing required field '{field}'"));
        }
    }

    let Some(q_type) = q.get("type") else {
        return errors;
    };

    match q_type.as_str() {
        Some("multiple_choice") => check_multiple_choice(q, prefix, &mut errors),
        Some("true_false") => check_true_false(q, prefix, &mut errors),
        Some("short_answer") => check_short_answer(q, prefix, &mut errors),
        _ => {
            errors.push(format!(
                "{prefix}: Invalid question type {}. Must be one of {}",
                display_value(q_type),
                VALID_QUESTION_TYPES.join(", ")
            ));
            return errors;
        }
    }

    match q.get("question") {
        None => {}
        Some(Value::Null) => errors.push(format!("{prefix}: Question text is empty")),
        Some(Value::String(text)) if text.trim().is_empty() => {
            errors.push(format!("{prefix}: Question text is empty"));
        }
        Some(Value::String(_)) => {}
        Some(other) => errors.push(format!(
            "{prefix}: Question text must be a string, got {}",
            json_type_name(other)
        )),
    }

    errors
}

fn check_multiple_choice(q: &Map<String, Value>, prefix: &str, errors: &mut Vec<String>) {
    let options = q.get("options");
    match options {
        None => errors.push(format!(
            "{prefix}: Multiple choice question missing 'options' array"
        )),
        Some(Value::Array(opts)) if opts.len() < MIN_OPTIONS => errors.push(format!(
            "{prefix}: Multiple choice needs at least {MIN_OPTIONS} options, has {}",
            opts.len()
        )),
        Some(Value::Array(opts)) if opts.len() > MAX_OPTIONS => errors.push(format!(
            "{prefix}: Multiple choice has {} options (recommend 4)",
            opts.len()
        )),
        Some(Value::Array(_)) => {}
        Some(_) => errors.push(format!("{prefix}: 'options' must be an array")),
    }

    match q.get("correct") {
        None => errors.push(format!(
            "{prefix}: Multiple choice question missing 'correct' index"
        )),
        Some(correct) if !is_integer(correct) => errors.push(format!(
            "{prefix}: 'correct' must be an integer index, got {}",
            json_type_name(correct)
        )),
        Some(correct) => {
            if let Some(Value::Array(opts)) = options {
                let in_range = correct
                    .as_u64()
                    .is_some_and(|i| (i as usize) < opts.len());
                if !in_range {
                    errors.push(format!(
                        "{prefix}: 'correct' index {correct} out of range for {} options",
                        opts.len()
                    ));
                }
            }
        }
    }
}

fn check_true_false(q: &Map<String, Value>, prefix: &str, errors: &mut Vec<String>) {
    match q.get("correct") {
        None => errors.push(format!("{prefix}: True/false question missing 'correct' value")),
        Some(Value::Bool(_)) => {}
        Some(other) => errors.push(format!(
            "{prefix}: True/false 'correct' must be boolean, got {}",
            json_type_name(other)
        )),
    }
}

fn check_short_answer(q: &Map<String, Value>, prefix: &str, errors: &mut Vec<String>) {
    match q.get("expected_keywords") {
        None => errors.push(format!(
            "{prefix}: Short answer question missing 'expected_keywords' array"
        )),
        Some(Value::Array(keywords)) if keywords.is_empty() => {
            errors.push(format!("{prefix}: 'expected_keywords' is empty"));
        }
        Some(Value::Array(keywords)) => {
            if keywords.iter().any(|k| !k.is_string()) {
                errors.push(format!(
                    "{prefix}: 'expected_keywords' must contain only strings"
                ));
            }
        }
        Some(_) => errors.push(format!("{prefix}: 'expected_keywords' must be an array")),
    }
}

fn is_integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Strings are shown quoted with single quotes, everything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}

/// Validate a quiz file. The file stem is the expected quiz id.
///
/// An unreadable file or one that is not JSON yields a single error.
pub fn validate_file(path: &Path) -> ValidationReport {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("cannot read {}: {}", path.display(), e);
            return ValidationReport::finish(
                vec![format!("Quiz '{stem}': Cannot read file: {e}")],
                QuizStats::default(),
            );
        }
    };

    match serde_json::from_str::<Value>(&content) {
        Ok(record) => validate_quiz(&record, &stem),
        Err(e) => {
            tracing::debug!("{} is not a JSON document: {}", path.display(), e);
            ValidationReport::finish(
                vec![format!("Quiz '{stem}': Invalid JSON: {e}")],
                QuizStats::default(),
            )
        }
    }
}

/// Aggregate validation outcome for a directory of quiz files.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryReport {
    /// Files that were validated, in the order they were checked.
    pub files: Vec<PathBuf>,
    pub total_quizzes: usize,
    pub valid_quizzes: usize,
    pub stats: QuizStats,
    /// Errors from every invalid quiz, in file order.
    pub errors: Vec<String>,
}

impl DirectoryReport {
    /// True when every quiz in the directory is valid.
    pub fn all_valid(&self) -> bool {
        self.valid_quizzes == self.total_quizzes
    }
}

/// Validate every `*.json` file directly inside `dir`, in sorted order.
pub fn validate_dir(dir: &Path) -> std::io::Result<DirectoryReport> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();

    let mut report = DirectoryReport::default();
    for path in &files {
        let quiz_report = validate_file(path);
        tracing::debug!(
            "validated {}: {} error(s)",
            path.display(),
            quiz_report.errors.len()
        );
        report.total_quizzes += 1;
        report.stats += quiz_report.stats;
        if quiz_report.is_valid {
            report.valid_quizzes += 1;
        } else {
            report.errors.extend(quiz_report.errors);
        }
    }
    report.files = files;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mc(id: &str, correct: Value) -> Value {
        json!({
            "id": id,
            "type": "multiple_choice",
            "question": "Which one?",
            "options": ["a", "b", "c", "d"],
            "correct": correct
        })
    }

    fn valid_quiz() -> Value {
        json!({
            "id": "pcv5_dlt",
            "lecture": "pcv5",
            "topic": "Direct Linear Transform",
            "created": "2024-01-01T10:00:00",
            "questions": [
                mc("q1", json!(2)),
                {"id": "q2", "type": "true_false", "question": "H has 8 DOF.", "correct": true},
                {"id": "q3", "type": "short_answer", "question": "How is H solved?",
                 "expected_keywords": ["svd", "null space"]},
                mc("q4", json!(0)),
                {"id": "q5", "type": "true_false", "question": "DLT needs 3 points.", "correct": false}
            ]
        })
    }

    #[test]
    fn valid_quiz_has_no_errors() {
        let report = validate_quiz(&valid_quiz(), "pcv5_dlt");
        assert!(report.is_valid, "{:?}", report.errors);
        assert!(report.errors.is_empty());
        assert_eq!(
            report.stats,
            QuizStats {
                question_count: 5,
                mc_count: 2,
                tf_count: 2,
                sa_count: 1
            }
        );
    }

    #[test]
    fn missing_top_level_fields_are_named() {
        for field in REQUIRED_QUIZ_FIELDS {
            let mut quiz = valid_quiz();
            quiz.as_object_mut().unwrap().remove(field);
            let report = validate_quiz(&quiz, "pcv5_dlt");
            assert!(!report.is_valid);
            assert!(
                report.errors.iter().any(|e| e.contains(&format!("'{field}'"))),
                "no error names {field}: {:?}",
                report.errors
            );
        }
    }

    #[test]
    fn missing_questions_stops_but_keeps_earlier_errors() {
        let quiz = json!({"id": "other", "lecture": "5pcv", "topic": "t"});
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 3);
        assert!(report.errors[1].contains("doesn't match filename"));
        assert!(report.errors[2].contains("Invalid lecture format '5pcv'"));
        assert_eq!(report.stats.question_count, 0);
    }

    #[test]
    fn questions_not_an_array() {
        let mut quiz = valid_quiz();
        quiz["questions"] = json!("q1,q2");
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert!(!report.is_valid);
        assert_eq!(report.errors, vec!["Quiz 'pcv5_dlt': 'questions' must be an array"]);
    }

    #[test]
    fn empty_lecture_is_invalid() {
        let mut quiz = valid_quiz();
        quiz["lecture"] = json!("");
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert!(report.errors.iter().any(|e| e.contains("Invalid lecture format")));
    }

    #[test]
    fn question_count_thresholds() {
        let mut quiz = valid_quiz();
        quiz["questions"] = json!([]);
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert!(report.errors.iter().any(|e| e.contains("No questions in quiz")));

        quiz["questions"] = json!([mc("q1", json!(1)), mc("q2", json!(1))]);
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e.contains("Only 2 questions (recommend 10+)")));
    }

    #[test]
    fn duplicate_ids_reported_once() {
        let mut quiz = valid_quiz();
        let questions = quiz["questions"].as_array_mut().unwrap();
        questions[1]["id"] = json!("q1");
        questions[2]["id"] = json!("q1");
        let report = validate_quiz(&quiz, "pcv5_dlt");
        let dupes = report
            .errors
            .iter()
            .filter(|e| e.contains("Duplicate question IDs"))
            .count();
        assert_eq!(dupes, 1);
    }

    #[test]
    fn correct_index_range() {
        let mut quiz = valid_quiz();
        quiz["questions"][0] = mc("q1", json!(3));
        assert!(validate_quiz(&quiz, "pcv5_dlt").is_valid);

        quiz["questions"][0] = mc("q1", json!(4));
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("'correct' index 4 out of range for 4 options")));

        quiz["questions"][0] = mc("q1", json!(-1));
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert!(report.errors.iter().any(|e| e.contains("out of range")));
    }

    #[test]
    fn correct_index_must_be_integer() {
        let mut quiz = valid_quiz();
        quiz["questions"][0] = mc("q1", json!("2"));
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("must be an integer index, got string")));

        quiz["questions"][0] = mc("q1", json!(true));
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert!(report.errors.iter().any(|e| e.contains("got boolean")));
    }

    #[test]
    fn option_count_bounds() {
        let mut quiz = valid_quiz();
        quiz["questions"][0]["options"] = json!(["only"]);
        quiz["questions"][0]["correct"] = json!(0);
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert!(report.errors.iter().any(|e| e.contains("at least 2 options, has 1")));

        quiz["questions"][0]["options"] = json!(["a", "b", "c", "d", "e", "f", "g"]);
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e.contains("has 7 options (recommend 4)")));

        quiz["questions"][0]["options"] = json!("a,b");
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert!(report.errors.iter().any(|e| e.contains("'options' must be an array")));
    }

    #[test]
    fn missing_type_skips_remaining_checks() {
        let mut quiz = valid_quiz();
        quiz["questions"][0] = json!({"id": "q1", "question": "   "});
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert_eq!(
            report.errors,
            vec!["Quiz 'pcv5_dlt', Question 1: Missing required field 'type'"]
        );
        assert_eq!(report.stats.mc_count, 1);
    }

    #[test]
    fn unknown_type_skips_remaining_checks() {
        let mut quiz = valid_quiz();
        quiz["questions"][0] = json!({"id": "q1", "type": "essay", "question": ""});
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("Invalid question type 'essay'"));
    }

    #[test]
    fn type_specific_fields() {
        let mut quiz = valid_quiz();
        quiz["questions"][1]["correct"] = json!("true");
        quiz["questions"][2]["expected_keywords"] = json!([]);
        quiz["questions"][3] = json!({"id": "q4", "type": "true_false", "question": "?"});
        quiz["questions"][4] = json!({"id": "q5", "type": "short_answer", "question": "?",
                                      "expected_keywords": ["ok", 3]});
        let report = validate_quiz(&quiz, "pcv5_dlt");
        let has = |needle: &str| report.errors.iter().any(|e| e.contains(needle));
        assert!(has("True/false 'correct' must be boolean, got string"));
        assert!(has("'expected_keywords' is empty"));
        assert!(has("True/false question missing 'correct' value"));
        assert!(has("'expected_keywords' must contain only strings"));
    }

    #[test]
    fn blank_question_text() {
        let mut quiz = valid_quiz();
        quiz["questions"][1]["question"] = json!("  \n ");
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert_eq!(
            report.errors,
            vec!["Quiz 'pcv5_dlt', Question 2: Question text is empty"]
        );
    }

    #[test]
    fn stats_count_invalid_questions() {
        let mut quiz = valid_quiz();
        quiz["questions"][0]["correct"] = json!(99);
        let report = validate_quiz(&quiz, "pcv5_dlt");
        assert!(!report.is_valid);
        assert_eq!(report.stats.mc_count, 2);
    }

    #[test]
    fn invalid_json_file_is_a_single_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"id\": \"broken\",").unwrap();

        let report = validate_file(&path);
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].contains("Invalid JSON"));
    }

    #[test]
    fn unreadable_file_is_not_reported_as_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.json");
        std::fs::write(&path, [0xff, 0xfe, 0x7b, 0x7d]).unwrap();

        let report = validate_file(&path);
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Quiz 'latin1': Cannot read file:"));
        assert!(!report.errors[0].contains("Invalid JSON"));

        let missing = validate_file(&dir.path().join("gone.json"));
        assert!(missing.errors[0].contains("Cannot read file"));
    }

    #[test]
    fn directory_report_aggregates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("pcv5_dlt.json"),
            serde_json::to_string(&valid_quiz()).unwrap(),
        )
        .unwrap();
        std::fs::write(dir.path().join("bad.json"), "not json").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let report = validate_dir(dir.path()).unwrap();
        assert_eq!(report.total_quizzes, 2);
        assert_eq!(report.valid_quizzes, 1);
        assert!(!report.all_valid());
        assert_eq!(report.stats.question_count, 5);
        assert_eq!(report.errors.len(), 1);
    }
}
