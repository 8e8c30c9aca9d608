use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings substituted into the generated documents.
///
/// Every field may be omitted from a configuration file; the defaults reproduce the
/// stock InfraGraph output.
///
/// ```toml
/// project_name = "InfraGraph"
/// namespace = "infragraph"
/// aws_region = "eu-west-1"
/// environment = "staging"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Used in headers, the `ManagedBy` tag and the JSON metadata name.
    pub project_name: String,
    /// Kubernetes namespace every manifest is placed in.
    pub namespace: String,
    pub aws_region: String,
    pub environment: String,
    pub terraform_version: String,
    pub aws_provider_version: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            project_name: "InfraGraph".to_string(),
            namespace: "infragraph".to_string(),
            aws_region: "us-east-1".to_string(),
            environment: "dev".to_string(),
            terraform_version: ">= 1.0".to_string(),
            aws_provider_version: "~> 5.0".to_string(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParsingFailed(e.to_string()))
    }

    /// Loads a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                log::debug!("Loading generator configuration from '{}'", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }
}
