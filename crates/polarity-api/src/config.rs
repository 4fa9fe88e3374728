//! Service configuration

use polarity_model::ArtifactPaths;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the persisted vectorizer and classifier artifacts
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: String,

    /// Behavior when the artifacts fail to load at startup
    #[serde(default)]
    pub on_load_failure: LoadFailureMode,
}

impl ServiceConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &crate::cli::Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(artifacts) = &cli.artifacts {
            config.artifacts_dir = artifacts.clone();
        }
        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }
        if let Some(port) = cli.port {
            config.port = port;
        }
        if cli.fail_on_load_error {
            config.on_load_failure = LoadFailureMode::Fail;
        }

        Ok(config)
    }

    /// Artifact file locations under the configured directory
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths::in_dir(&self.artifacts_dir)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            artifacts_dir: default_artifacts_dir(),
            on_load_failure: LoadFailureMode::default(),
        }
    }
}

/// What to do when model artifacts cannot be loaded at startup.
///
/// `Degrade` keeps the process up: `/` and `/health` still respond, and every
/// model-dependent route returns 503 until the process is restarted with
/// working artifacts. `Fail` aborts startup instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadFailureMode {
    #[default]
    Degrade,
    Fail,
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_artifacts_dir() -> String {
    "./artifacts".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.on_load_failure, LoadFailureMode::Degrade);
    }

    #[test]
    fn test_yaml_partial_override() {
        let config: ServiceConfig =
            serde_yaml::from_str("port: 9000\non_load_failure: fail\n").unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.on_load_failure, LoadFailureMode::Fail);
        assert_eq!(config.listen, "0.0.0.0");
    }
}
