//! File-backed quiz and result storage.
//!
//! Layout:
//! - `<data_dir>/<quiz_id>.json` holds a quiz definition.
//! - `<results_dir>/<quiz_id>_result.json` holds the latest scored result.
//!
//! Writes go through a temp file in the target directory and a rename, so a
//! reader never sees a half-written document. Concurrent submissions for the
//! same quiz are last-writer-wins.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::error::QuizError;
use crate::model::{Quiz, QuizSummary, ScoredResult};

const RESULT_SUFFIX: &str = "_result";

/// Quiz definitions and scored results on disk.
#[derive(Debug, Clone)]
pub struct QuizStore {
    data_dir: PathBuf,
    results_dir: PathBuf,
}

impl QuizStore {
    pub fn new(data_dir: impl Into<PathBuf>, results_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            results_dir: results_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn results_dir(&self) -> &Path {
        &self.results_dir
    }

    /// Create the data and results directories if they are missing.
    pub fn ensure_dirs(&self) -> Result<(), QuizError> {
        for dir in [&self.data_dir, &self.results_dir] {
            std::fs::create_dir_all(dir).map_err(|e| QuizError::io(dir, e))?;
        }
        Ok(())
    }

    /// Path of the quiz file for `id`.
    pub fn quiz_path(&self, id: &str) -> Result<PathBuf, QuizError> {
        check_id(id)?;
        Ok(self.data_dir.join(format!("{id}.json")))
    }

    /// Path of the result file for `quiz_id`.
    pub fn result_path(&self, quiz_id: &str) -> Result<PathBuf, QuizError> {
        check_id(quiz_id)?;
        Ok(self
            .results_dir
            .join(format!("{quiz_id}{RESULT_SUFFIX}.json")))
    }

    /// Load a quiz by id. Returns `Ok(None)` if there is no such quiz.
    pub fn load_quiz(&self, id: &str) -> Result<Option<Quiz>, QuizError> {
        read_json(&self.quiz_path(id)?)
    }

    /// Summaries of every quiz in the data directory, newest first.
    ///
    /// Files that cannot be read as UTF-8 text or parsed as JSON are skipped
    /// with a warning; missing fields
    /// fall back to defaults so partially written quizzes still show up.
    pub fn list_quizzes(&self) -> Result<Vec<QuizSummary>, QuizError> {
        let mut quizzes = Vec::new();

        for path in json_files(&self.data_dir)? {
            let stem = file_stem(&path);
            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            match serde_json::from_str::<Value>(&content) {
                Ok(value) => quizzes.push(QuizSummary::from_value(&value, &stem)),
                Err(e) => tracing::warn!("skipping {}: {}", path.display(), e),
            }
        }

        quizzes.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(quizzes)
    }

    /// Ids of quizzes that have a stored result.
    pub fn completed_quizzes(&self) -> Result<HashSet<String>, QuizError> {
        let completed = json_files(&self.results_dir)?
            .iter()
            .filter_map(|path| {
                file_stem(path)
                    .strip_suffix(RESULT_SUFFIX)
                    .map(str::to_string)
            })
            .collect();
        Ok(completed)
    }

    /// Persist a scored result, replacing any earlier result for the quiz.
    pub fn save_result(&self, result: &ScoredResult) -> Result<PathBuf, QuizError> {
        let path = self.result_path(&result.quiz_id)?;
        write_json_atomic(&path, result)?;
        tracing::info!("saved result for {} to {}", result.quiz_id, path.display());
        Ok(path)
    }

    /// Load the stored result for a quiz, if any.
    pub fn load_result(&self, quiz_id: &str) -> Result<Option<ScoredResult>, QuizError> {
        read_json(&self.result_path(quiz_id)?)
    }

    /// Write a quiz definition under its own id, replacing the existing file.
    pub fn save_quiz(&self, quiz: &Quiz) -> Result<PathBuf, QuizError> {
        self.save_quiz_as(&quiz.id, quiz)
    }

    /// Write a quiz definition to the file for `id`, whatever its `id` field says.
    pub fn save_quiz_as(&self, id: &str, quiz: &Quiz) -> Result<PathBuf, QuizError> {
        let path = self.quiz_path(id)?;
        write_json_atomic(&path, quiz)?;
        Ok(path)
    }
}

fn check_id(id: &str) -> Result<(), QuizError> {
    let bad = id.is_empty()
        || id == "."
        || id == ".."
        || id.contains(['/', '\\', '\0']);
    if bad {
        return Err(QuizError::InvalidId(id.to_string()));
    }
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `*.json` files directly inside `dir`, sorted. A missing directory is empty.
fn json_files(dir: &Path) -> Result<Vec<PathBuf>, QuizError> {
    if !dir.is_dir() {
        tracing::debug!("{} does not exist, treating as empty", dir.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| QuizError::io(dir, e))? {
        let path = entry.map_err(|e| QuizError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>, QuizError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(QuizError::io(path, e)),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| QuizError::json(path, e))
}

fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), QuizError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| QuizError::io(dir, e))?;

    let json = serde_json::to_string_pretty(value).map_err(|e| QuizError::json(path, e))?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| QuizError::io(dir, e))?;
    tmp.write_all(json.as_bytes())
        .and_then(|()| tmp.write_all(b"\n"))
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| QuizError::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| QuizError::io(path, e.error))?;
    Ok(())
}
