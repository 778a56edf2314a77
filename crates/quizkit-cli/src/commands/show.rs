//! The `quizkit show` command.

use anyhow::Result;

use crate::config::QuizkitConfig;

pub fn execute(config: &QuizkitConfig, quiz_id: String) -> Result<()> {
    let quiz = super::require_quiz(&config.store(), &quiz_id)?;
    println!("{}", serde_json::to_string_pretty(&quiz.client_view())?);
    Ok(())
}
