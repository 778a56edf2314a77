//! quizkit-core: Quiz model, schema validation, grouping, and scoring.
//!
//! The validator, grouper, and scorer are pure transformations over
//! in-memory values. The [`store`] module is the file-backed shell that
//! feeds them and persists scored results.

pub mod authoring;
pub mod error;
pub mod grouping;
pub mod model;
pub mod redact;
pub mod scoring;
pub mod store;
pub mod validation;

pub use error::QuizError;
pub use grouping::{group_quizzes, CourseGroup, CourseIndex, LectureGroup};
pub use model::{Question, QuestionKind, Quiz, QuizSummary, ScoredResult, Submission};
pub use scoring::score_submission;
pub use validation::{validate_quiz, ValidationReport};
