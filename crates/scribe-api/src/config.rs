use std::path::PathBuf;

use serde::Deserialize;

/// Deployment environment, read from `ENV`.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

fn default_port() -> u16 {
    3000
}

fn default_questions_path() -> PathBuf {
    PathBuf::from("data/questions.json")
}

fn default_allowed_origins() -> String {
    "http://localhost:8080".to_string()
}

fn default_max_submission_chars() -> u64 {
    2000
}

#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub env: Environment,
    #[serde(default = "default_port")]
    pub port: u16,
    /// JSON file holding the question bank
    #[serde(default = "default_questions_path")]
    pub questions_path: PathBuf,
    /// Comma separated list of origins allowed by CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: String,
    /// Longest submission, in characters, the classify endpoint accepts
    #[serde(default = "default_max_submission_chars")]
    pub max_submission_chars: u64,
}

impl ApiConfig {
    /// Load from the process environment, reading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    pub fn parsed_allowed_origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> ApiConfig {
        envy::from_iter(
            vars.iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string())),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.port, 3000);
        assert_eq!(config.questions_path, PathBuf::from("data/questions.json"));
        assert_eq!(config.max_submission_chars, 2000);
        assert_eq!(
            config.parsed_allowed_origins(),
            vec!["http://localhost:8080".to_string()]
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("ENV", "production"),
            ("PORT", "8081"),
            ("QUESTIONS_PATH", "/srv/bank.json"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("MAX_SUBMISSION_CHARS", "500"),
        ]);
        assert!(config.env.is_production());
        assert_eq!(config.port, 8081);
        assert_eq!(config.questions_path, PathBuf::from("/srv/bank.json"));
        assert_eq!(config.max_submission_chars, 500);
        assert_eq!(
            config.parsed_allowed_origins(),
            vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ]
        );
    }

    #[test]
    fn test_unknown_environment_is_rejected() {
        let result: Result<ApiConfig, _> =
            envy::from_iter([("ENV".to_string(), "staging".to_string())]);
        assert!(result.is_err());
    }
}
