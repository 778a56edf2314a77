//! The `quizkit score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use quizkit_core::model::Submission;
use quizkit_core::scoring::score_submission;

use crate::config::QuizkitConfig;

/// What gets echoed back after a submission is stored.
#[derive(Serialize)]
struct ScoreSummary<'a> {
    success: bool,
    quiz_id: &'a str,
    score: u32,
    total: u32,
    percentage: u32,
}

pub fn execute(
    config: &QuizkitConfig,
    quiz_id: String,
    answers_path: PathBuf,
    format: String,
) -> Result<()> {
    let store = config.store();
    let quiz = super::require_quiz(&store, &quiz_id)?;

    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read submission: {}", answers_path.display()))?;
    let submission: Submission = serde_json::from_str(&content)
        .with_context(|| format!("invalid submission: {}", answers_path.display()))?;

    let mut result = score_submission(&quiz, &submission, chrono::Utc::now());
    // Results are keyed by the storage id, not the id written inside the file.
    result.quiz_id = quiz_id;
    store.save_result(&result)?;

    match format.as_str() {
        "json" => {
            let summary = ScoreSummary {
                success: true,
                quiz_id: &result.quiz_id,
                score: result.score,
                total: result.total,
                percentage: result.percentage,
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ => {
            println!(
                "{}: {}/{} ({}%)",
                result.quiz_id, result.score, result.total, result.percentage
            );
            for record in &result.answers {
                let mark = match (record.is_correct, record.score_awarded) {
                    (true, _) => "correct",
                    (false, true) => "partial",
                    (false, false) => "incorrect",
                };
                println!("  {} {}", record.question_id, mark);
            }
        }
    }

    Ok(())
}
