//! Loads action inputs and run context.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::{ActionInputs, NotifierConfig, RepoRef};

/// Prefix the runner uses when exposing action inputs as environment variables.
pub const INPUT_ENV_PREFIX: &str = "INPUT_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `--inputs-file` points nowhere
    #[error("Inputs file not found: {}", .0.display())]
    MissingInputsFile(PathBuf),

    /// The inputs file could not be parsed
    #[error("Failed to read action inputs: {0}")]
    Inputs(#[from] Box<figment::Error>),

    /// `GITHUB_REPOSITORY` is not `owner/repo`
    #[error("Invalid repository '{0}': expected 'owner/repo'")]
    InvalidRepository(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Build the input provider stack.
    ///
    /// Precedence (lowest to highest):
    /// 1. YAML inputs file, when given
    /// 2. `INPUT_*` environment variables
    pub fn figment(inputs_file: Option<&Path>) -> Figment {
        let mut figment = Figment::new();
        if let Some(path) = inputs_file {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Serialized::defaults(Self::env_inputs()))
    }

    /// `INPUT_*` variables as raw strings, keyed by lowercase input name.
    ///
    /// `Env` as a provider would type-guess values (`007` → 7, `[x]` → array);
    /// inputs must reach the resolver exactly as written.
    fn env_inputs() -> BTreeMap<String, String> {
        Env::prefixed(INPUT_ENV_PREFIX)
            .iter()
            .map(|(key, value)| (key.as_str().to_ascii_lowercase(), value))
            .collect()
    }

    /// Read the raw named inputs.
    pub fn load_inputs(inputs_file: Option<&Path>) -> Result<ActionInputs, ConfigError> {
        if let Some(path) = inputs_file {
            if !path.exists() {
                return Err(ConfigError::MissingInputsFile(path.to_path_buf()));
            }
        }

        Self::figment(inputs_file)
            .extract()
            .map_err(|e| ConfigError::Inputs(Box::new(e)))
    }

    /// Load and resolve the run configuration.
    pub fn load(inputs_file: Option<&Path>) -> Result<NotifierConfig, ConfigError> {
        let inputs = Self::load_inputs(inputs_file)?;
        let config = NotifierConfig::from_inputs(&inputs);

        tracing::info!(
            slack = config.slack_webhook_url.is_some(),
            discord = config.discord_webhook_url.is_some(),
            keywords = config.filters.title_keywords.len(),
            required_labels = config.filters.required_labels.len(),
            excluded_labels = config.filters.excluded_labels.len(),
            issues_only = config.filters.issues_only,
            reaction_threshold = config.thresholds.reactions,
            comment_threshold = config.thresholds.comments,
            notify_on_create = config.notify_on_create,
            notify_on_threshold = config.notify_on_threshold,
            check_all_open_issues = config.batch.check_all_open_issues,
            max_issues_to_check = config.batch.max_issues_to_check,
            issue_state = %config.batch.issue_state,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Parse `GITHUB_REPOSITORY` (`owner/repo`), optionally on a custom web host.
    pub fn parse_repository(slug: &str, server_url: Option<&str>) -> Result<RepoRef, ConfigError> {
        let repo: RepoRef = slug
            .parse()
            .map_err(|_| ConfigError::InvalidRepository(slug.to_string()))?;
        Ok(match server_url.filter(|s| !s.trim().is_empty()) {
            Some(url) => repo.with_server_url(url),
            None => repo,
        })
    }
}
