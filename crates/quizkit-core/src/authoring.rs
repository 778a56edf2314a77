//! Helpers for writing quizzes.
//!
//! Randomness is always passed in, so a seeded RNG reproduces the same
//! option order.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::QuizError;
use crate::model::{Question, QuestionKind, Quiz};

/// Shuffle multiple-choice options, returning the new options and the new
/// index of the correct answer.
///
/// The correct option is tracked by position, so repeated option strings
/// are handled.
pub fn shuffle_options<R: Rng + ?Sized>(
    options: &[String],
    correct_index: usize,
    rng: &mut R,
) -> Result<(Vec<String>, usize), QuizError> {
    if correct_index >= options.len() {
        return Err(QuizError::CorrectIndexOutOfRange {
            index: correct_index,
            len: options.len(),
        });
    }

    Ok(permute(options, correct_index, rng))
}

/// Caller guarantees `tracked < options.len()`.
fn permute<R: Rng + ?Sized>(
    options: &[String],
    tracked: usize,
    rng: &mut R,
) -> (Vec<String>, usize) {
    let mut order: Vec<usize> = (0..options.len()).collect();
    order.shuffle(rng);

    let new_index = order.iter().position(|&i| i == tracked).unwrap_or(tracked);
    let shuffled = order.into_iter().map(|i| options[i].clone()).collect();

    (shuffled, new_index)
}

/// Inputs for a new multiple-choice question.
#[derive(Debug, Clone, Default)]
pub struct McQuestionDraft {
    pub id: String,
    pub question: String,
    /// The right answer.
    pub correct: String,
    /// Wrong answers, typically three.
    pub distractors: Vec<String>,
    pub topic: Option<String>,
    pub slide_ref: Option<String>,
}

/// Build a multiple-choice question with the correct answer placed at a
/// random position among the distractors.
pub fn create_mc_question<R: Rng + ?Sized>(draft: McQuestionDraft, rng: &mut R) -> Question {
    let mut options = Vec::with_capacity(draft.distractors.len() + 1);
    options.push(draft.correct);
    options.extend(draft.distractors);

    let (options, correct) = permute(&options, 0, rng);

    Question {
        id: draft.id,
        question: draft.question,
        topic: draft.topic,
        slide_ref: draft.slide_ref,
        kind: QuestionKind::MultipleChoice { options, correct },
    }
}

/// Reshuffle the options of every multiple-choice question in a quiz.
///
/// Returns the number of questions that were shuffled. Fails without
/// modifying anything if a question's correct index is out of range.
pub fn shuffle_quiz<R: Rng + ?Sized>(quiz: &mut Quiz, rng: &mut R) -> Result<usize, QuizError> {
    for question in &quiz.questions {
        if let QuestionKind::MultipleChoice { options, correct } = &question.kind {
            if *correct >= options.len() {
                return Err(QuizError::CorrectIndexOutOfRange {
                    index: *correct,
                    len: options.len(),
                });
            }
        }
    }

    let mut shuffled = 0;
    for question in &mut quiz.questions {
        if let QuestionKind::MultipleChoice { options, correct } = &mut question.kind {
            let (new_options, new_correct) = shuffle_options(options, *correct, rng)?;
            *options = new_options;
            *correct = new_correct;
            shuffled += 1;
        }
    }

    tracing::debug!("shuffled {} question(s) in {}", shuffled, quiz.id);
    Ok(shuffled)
}
