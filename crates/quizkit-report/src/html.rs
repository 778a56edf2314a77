//! HTML page generation.
//!
//! Produces self-contained HTML files with all CSS/JS inlined.

use std::path::Path;

use anyhow::{Context, Result};

use quizkit_core::grouping::{CourseGroup, CourseIndex};
use quizkit_core::model::{AnswerDetail, ScoredResult, Selection};

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn page_head(html: &mut String, title: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
}

/// Generate the quiz index page, grouped by course and lecture.
pub fn generate_index_html(courses: &CourseIndex) -> String {
    let mut html = String::new();
    page_head(&mut html, "Quizzes");

    let total: usize = courses.values().map(|c| c.total_count).sum();
    let completed: usize = courses.values().map(|c| c.completed_count).sum();

    html.push_str("<header>\n<h1>Quizzes</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} courses | {completed}/{total} quizzes completed</p>\n",
        courses.len()
    ));
    html.push_str("</header>\n");

    if courses.is_empty() {
        html.push_str("<p>No quizzes available yet.</p>\n");
    } else {
        html.push_str(&generate_progress_chart(courses));
    }

    for (code, course) in courses {
        html.push_str(&format!(
            "<section class=\"course\">\n<h2>{} <span class=\"count\">{}/{}</span></h2>\n",
            html_escape(code),
            course.completed_count,
            course.total_count
        ));

        for lecture in &course.lectures {
            html.push_str(&format!(
                "<details open>\n<summary>{} <span class=\"count\">{}/{}</span></summary>\n",
                html_escape(&lecture.name),
                lecture.completed_count,
                lecture.total_count
            ));
            html.push_str("<table>\n");
            html.push_str(
                "<thead><tr><th>Quiz</th><th>Topic</th><th>Questions</th><th>Created</th><th>Status</th></tr></thead>\n",
            );
            html.push_str("<tbody>\n");
            for quiz in &lecture.quizzes {
                let (class, status) = if quiz.completed {
                    ("pass", "done")
                } else {
                    ("", "open")
                };
                html.push_str(&format!(
                    "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                    class,
                    html_escape(&quiz.summary.id),
                    html_escape(&quiz.summary.topic),
                    quiz.summary.num_questions,
                    html_escape(&quiz.summary.created),
                    status
                ));
            }
            html.push_str("</tbody></table>\n</details>\n");
        }

        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>");
    html
}

/// Generate a page summarising one scored result.
pub fn generate_result_html(result: &ScoredResult) -> String {
    let mut html = String::new();
    page_head(&mut html, &format!("Result: {}", result.quiz_id));

    html.push_str("<header>\n");
    html.push_str(&format!("<h1>{}</h1>\n", html_escape(&result.quiz_id)));
    html.push_str(&format!(
        "<p class=\"meta\">Score <strong>{}/{}</strong> ({}%) | {:.0}s | {}</p>\n",
        result.score,
        result.total,
        result.percentage,
        result.total_time_sec,
        result.completed.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    html.push_str("<section class=\"results\">\n");
    html.push_str("<table>\n");
    html.push_str("<thead><tr><th>Question</th><th>Topic</th><th>Answer</th><th>Expected</th><th>Result</th><th>Slide</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for record in &result.answers {
        let (answer, expected) = describe(&record.detail);
        let (class, verdict) = match (record.is_correct, record.score_awarded) {
            (true, _) => ("pass", "correct"),
            (false, true) => ("partial", "partial"),
            (false, false) => ("fail", "incorrect"),
        };
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            class,
            html_escape(&record.question_id),
            html_escape(&record.topic),
            html_escape(&answer),
            html_escape(&expected),
            verdict,
            html_escape(&record.slide_ref)
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(result).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// The given answer and the expected one, as display strings.
fn describe(detail: &AnswerDetail) -> (String, String) {
    match detail {
        AnswerDetail::MultipleChoice {
            selected,
            correct_index,
        } => (describe_selection(selected.as_ref()), format!("option {correct_index}")),
        AnswerDetail::TrueFalse {
            selected,
            correct_value,
        } => (describe_selection(selected.as_ref()), correct_value.to_string()),
        AnswerDetail::ShortAnswer {
            text,
            keywords_found,
            keywords_expected,
        } => (
            text.clone(),
            format!("{keywords_found}/{keywords_expected} keywords"),
        ),
    }
}

fn describe_selection(selected: Option<&Selection>) -> String {
    match selected {
        None => "-".to_string(),
        Some(Selection::Index(i)) => format!("option {i}"),
        Some(Selection::Flag(b)) => b.to_string(),
        Some(Selection::Other(v)) => v.to_string(),
    }
}

/// Write an HTML page to a file, creating parent directories.
pub fn write_html(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Horizontal bars showing the completed share of each course.
fn generate_progress_chart(courses: &CourseIndex) -> String {
    let bar_height = 24;
    let max_width = 400;
    let padding = 8;
    let label_width = 120;

    let total_height = courses.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (code, course)) in courses.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let share = completion_share(course);
        let width = (share * max_width as f64) as usize;

        let color = if share >= 0.8 {
            "#22c55e"
        } else if share >= 0.5 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(code)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"var(--border)\" rx=\"4\"/>\n",
            label_width, y, max_width, bar_height
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.0}%</text>\n",
            label_width + max_width + 8,
            y + bar_height / 2,
            share * 100.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

fn completion_share(course: &CourseGroup) -> f64 {
    if course.total_count == 0 {
        0.0
    } else {
        course.completed_count as f64 / course.total_count as f64
    }
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --partial: #fef9c3; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --partial: #713f12; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta, .count { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.pass { background: var(--pass); }
.partial { background: var(--partial); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use quizkit_core::grouping::group_quizzes;
    use quizkit_core::model::{Quiz, QuizSummary, Submission};
    use quizkit_core::scoring::score_submission;

    fn summary(id: &str, lecture: &str) -> QuizSummary {
        QuizSummary {
            id: id.into(),
            lecture: lecture.into(),
            topic: "Homographies & <DLT>".into(),
            num_questions: 10,
            created: "2024-01-01".into(),
        }
    }

    fn make_result() -> ScoredResult {
        let quiz: Quiz = serde_json::from_value(serde_json::json!({
            "id": "pcv5_dlt",
            "lecture": "pcv5",
            "topic": "DLT",
            "questions": [
                {"id": "q1", "type": "multiple_choice", "question": "?",
                 "options": ["a", "b"], "correct": 1},
                {"id": "q2", "type": "short_answer", "question": "?",
                 "expected_keywords": ["alpha", "beta", "gamma", "delta"]}
            ]
        }))
        .unwrap();
        let submission: Submission = serde_json::from_value(serde_json::json!({
            "answers": [
                {"question_id": "q1", "selected": 1},
                {"question_id": "q2", "text": "alpha <beta>"}
            ]
        }))
        .unwrap();
        score_submission(&quiz, &submission, chrono::Utc::now())
    }

    #[test]
    fn index_contains_courses_and_lectures() {
        let quizzes = vec![summary("pcv5_a", "pcv5"), summary("ml1_a", "ml1")];
        let completed: HashSet<String> = ["pcv5_a".to_string()].into_iter().collect();
        let html = generate_index_html(&group_quizzes(&quizzes, &completed));

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("PCV"));
        assert!(html.contains("ML"));
        assert!(html.contains("pcv5_a"));
        assert!(html.contains("1/2 quizzes completed"));
        assert!(html.contains("Homographies &amp; &lt;DLT&gt;"));
        assert!(!html.contains("<DLT>"));
    }

    #[test]
    fn empty_index() {
        let html = generate_index_html(&CourseIndex::new());
        assert!(html.contains("No quizzes available yet."));
        assert!(!html.contains("<svg"));
    }

    #[test]
    fn result_page_marks_partial_credit() {
        let html = generate_result_html(&make_result());
        assert!(html.contains("pcv5_dlt"));
        assert!(html.contains("2/2"));
        assert!(html.contains("100%"));
        assert!(html.contains("class=\"partial\""));
        assert!(html.contains("2/4 keywords"));
        assert!(html.contains("alpha &lt;beta&gt;"));
    }

    #[test]
    fn write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site").join("index.html");

        write_html(&path, &generate_index_html(&CourseIndex::new())).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}
