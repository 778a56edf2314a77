//! The `quizkit index` command.

use std::path::PathBuf;

use anyhow::Result;

use quizkit_core::grouping::group_quizzes;
use quizkit_report::{generate_index_html, write_html};

use crate::config::QuizkitConfig;

pub fn execute(config: &QuizkitConfig, output: PathBuf) -> Result<()> {
    let store = config.store();
    let quizzes = store.list_quizzes()?;
    let completed = store.completed_quizzes()?;
    let courses = group_quizzes(&quizzes, &completed);

    write_html(&output, &generate_index_html(&courses))?;
    println!(
        "Wrote index of {} quizzes in {} courses to {}",
        quizzes.len(),
        courses.len(),
        output.display()
    );

    Ok(())
}
