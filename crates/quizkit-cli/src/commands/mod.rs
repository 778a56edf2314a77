pub mod index;
pub mod init;
pub mod list;
pub mod review;
pub mod score;
pub mod show;
pub mod shuffle;
pub mod validate;

use anyhow::{Context, Result};

use quizkit_core::model::Quiz;
use quizkit_core::store::QuizStore;

/// Load a quiz or fail with a "not found" error.
pub(crate) fn require_quiz(store: &QuizStore, quiz_id: &str) -> Result<Quiz> {
    store
        .load_quiz(quiz_id)
        .with_context(|| format!("failed to load quiz '{quiz_id}'"))?
        .ok_or_else(|| {
            anyhow::anyhow!(
                "quiz not found: {quiz_id} (looked in {})",
                store.data_dir().display()
            )
        })
}
