//! Configuration handling
use std::{
    fs::{create_dir_all, read_to_string, File},
    io::Write,
    path::{Path, PathBuf},
};

use home::home_dir;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{cli::ReleaseCheckerCli, errors::ReleaseCheckerError};

/// Default GraphQL endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

/// Default owner of the checked repository
pub const DEFAULT_OWNER: &str = "lukaszraczylo";

/// Default name of the checked repository
pub const DEFAULT_REPOSITORY: &str = "semver-generator";

/// Default environment variable holding the access token
pub const DEFAULT_TOKEN_ENV: &str = "GHCR_TOKEN";

/// Configuration of a release check
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ReleaseCheckerConfig {
    /// GraphQL endpoint
    pub endpoint: String,

    /// Owner of the repository
    pub owner: String,

    /// Name of the repository
    pub repository: String,

    /// Environment variable holding the access token
    pub token_env: String,
}

impl Default for ReleaseCheckerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            repository: DEFAULT_REPOSITORY.to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
        }
    }
}

impl ReleaseCheckerConfig {
    /// Read a configuration file, missing keys keep their default
    /// # Errors
    /// Error if the file can't be read or isn't valid TOML
    pub fn try_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReleaseCheckerError> {
        let contents = read_to_string(path.as_ref())?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Build the configuration from defaults, config file and CLI overrides
    /// # Errors
    /// Error if the config file is invalid or the endpoint isn't a URL
    pub fn load(cli_args: &ReleaseCheckerCli) -> Result<Self, ReleaseCheckerError> {
        let config_path = match &cli_args.config {
            Some(p) => Some(PathBuf::from(p)),
            None => Self::default_config_path().filter(|p| p.exists()),
        };
        let mut config = match config_path {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                Self::try_from_path(path)?
            }
            None => Self::default(),
        };
        config.apply_overrides(cli_args);
        config.validate()?;
        Ok(config)
    }

    /// Replace the values given on the command line
    pub fn apply_overrides(&mut self, cli_args: &ReleaseCheckerCli) {
        if let Some(endpoint) = &cli_args.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(owner) = &cli_args.owner {
            self.owner = owner.clone();
        }
        if let Some(repository) = &cli_args.repository {
            self.repository = repository.clone();
        }
        if let Some(token_env) = &cli_args.token_env {
            self.token_env = token_env.clone();
        }
    }

    /// Check the values of the configuration
    /// # Errors
    /// Error if a value is empty, a name has characters GitHub doesn't allow
    /// or the endpoint isn't a URL
    pub fn validate(&self) -> Result<(), ReleaseCheckerError> {
        self.endpoint_url()?;
        if self.owner.is_empty() || self.repository.is_empty() {
            return Err("Repository owner and name can't be empty".into());
        }
        for name in [&self.owner, &self.repository] {
            if !is_valid_name(name) {
                return Err(format!(
                    "Invalid repository name '{name}', only letters, digits, '-', '_' and '.' are allowed"
                )
                .into());
            }
        }
        if self.token_env.is_empty() {
            return Err("Token environment variable name can't be empty".into());
        }
        Ok(())
    }

    /// Parsed endpoint
    /// # Errors
    /// Error if the endpoint isn't a URL
    pub fn endpoint_url(&self) -> Result<Url, ReleaseCheckerError> {
        Ok(Url::parse(&self.endpoint)?)
    }

    /// Save the configuration to `path`
    /// # Errors
    /// Error if the config file can't be created or written to
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ReleaseCheckerError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }
        let config_str = toml::to_string(self)?;
        let mut file = File::create(path)?;
        file.write_all(config_str.as_bytes())?;
        Ok(())
    }

    /// Default path of the config file
    pub fn default_config_path() -> Option<PathBuf> {
        match home_dir() {
            Some(path) if !path.as_os_str().is_empty() => Some(
                path.join(".config")
                    .join(".release-checker")
                    .join("config.toml"),
            ),
            _ => None,
        }
    }

    /// Get the path to the config file
    /// # Errors
    /// Error if the home directory can't be found
    pub fn get_config_path() -> Result<PathBuf, ReleaseCheckerError> {
        Self::default_config_path()
            .ok_or_else(|| "Unable to get your home dir! home::home_dir() isn't working".into())
    }
}

/// Whether `name` is usable as a GitHub owner or repository name
fn is_valid_name(name: &str) -> bool {
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
