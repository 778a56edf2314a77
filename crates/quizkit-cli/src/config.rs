//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizkit_core::store::QuizStore;

/// Top-level quizkit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizkitConfig {
    /// Directory holding `<quiz_id>.json` files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory holding `<quiz_id>_result.json` files.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// How many validation errors `validate` prints before truncating.
    #[serde(default = "default_max_reported_errors")]
    pub max_reported_errors: usize,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_results_dir() -> PathBuf {
    PathBuf::from("./results")
}
fn default_max_reported_errors() -> usize {
    20
}

impl Default for QuizkitConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            results_dir: default_results_dir(),
            max_reported_errors: default_max_reported_errors(),
        }
    }
}

impl QuizkitConfig {
    /// Store rooted at the configured directories.
    pub fn store(&self) -> QuizStore {
        QuizStore::new(&self.data_dir, &self.results_dir)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizkit.toml` in the current directory
/// 2. `~/.config/quizkit/config.toml`
///
/// Environment variable overrides: `QUIZKIT_DATA_DIR`, `QUIZKIT_RESULTS_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizkitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizkit.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizkitConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizkitConfig::default(),
    };

    if let Ok(dir) = std::env::var("QUIZKIT_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var("QUIZKIT_RESULTS_DIR") {
        config.results_dir = PathBuf::from(dir);
    }

    config.data_dir = resolve_path(&config.data_dir);
    config.results_dir = resolve_path(&config.results_dir);

    tracing::debug!(
        "config from {}: {:?}",
        config_path
            .as_deref()
            .map_or_else(|| "defaults".to_string(), |p| p.display().to_string()),
        config
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizkit"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZKIT_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZKIT_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("/srv/${_QUIZKIT_TEST_VAR}/data"),
            "/srv/hello/data"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        assert_eq!(resolve_env_vars("${unterminated"), "${unterminated");
        std::env::remove_var("_QUIZKIT_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_QUIZKIT_SELF_REF", "a${_QUIZKIT_SELF_REF}b");
        assert_eq!(
            resolve_env_vars("${_QUIZKIT_SELF_REF}/data"),
            "a${_QUIZKIT_SELF_REF}b/data"
        );
        std::env::remove_var("_QUIZKIT_SELF_REF");
    }

    #[test]
    fn default_config() {
        let config = QuizkitConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.results_dir, PathBuf::from("./results"));
        assert_eq!(config.max_reported_errors, 20);
    }

    #[test]
    fn parse_partial_config() {
        let config: QuizkitConfig = toml::from_str(
            r#"
data_dir = "/var/www/quizzes/data"
max_reported_errors = 5
"#,
        )
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/www/quizzes/data"));
        assert_eq!(config.results_dir, PathBuf::from("./results"));
        assert_eq!(config.max_reported_errors, 5);
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }
}
