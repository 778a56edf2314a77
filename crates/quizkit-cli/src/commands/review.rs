//! The `quizkit review` command.

use std::path::PathBuf;

use anyhow::Result;

use quizkit_report::{generate_result_html, write_html};

use crate::config::QuizkitConfig;

pub fn execute(config: &QuizkitConfig, quiz_id: String, html: Option<PathBuf>) -> Result<()> {
    let store = config.store();
    let Some(result) = store.load_result(&quiz_id)? else {
        anyhow::bail!("no result stored for quiz '{quiz_id}'");
    };

    println!(
        "{} completed {}: {}/{} ({}%)",
        result.quiz_id,
        result.completed.format("%Y-%m-%d %H:%M:%S UTC"),
        result.score,
        result.total,
        result.percentage
    );

    let missed: Vec<&str> = result
        .answers
        .iter()
        .filter(|a| !a.is_correct)
        .map(|a| a.question_id.as_str())
        .collect();
    if !missed.is_empty() {
        println!("Not fully correct: {}", missed.join(", "));
    }

    if let Some(path) = html {
        write_html(&path, &generate_result_html(&result))?;
        eprintln!("HTML result: {}", path.display());
    }

    Ok(())
}
