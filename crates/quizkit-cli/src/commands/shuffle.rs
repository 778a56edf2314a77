//! The `quizkit shuffle` command.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizkit_core::authoring::shuffle_quiz;

use crate::config::QuizkitConfig;

pub fn execute(config: &QuizkitConfig, quiz_id: String, seed: Option<u64>) -> Result<()> {
    let store = config.store();
    let mut quiz = super::require_quiz(&store, &quiz_id)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let count = shuffle_quiz(&mut quiz, &mut rng)
        .with_context(|| format!("cannot shuffle quiz '{quiz_id}'"))?;
    let path = store.save_quiz_as(&quiz_id, &quiz)?;

    println!(
        "Shuffled {count} multiple-choice question(s) in {}",
        path.display()
    );
    Ok(())
}
