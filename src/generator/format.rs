use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The output representations the generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Terraform,
    Yaml,
    Json,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Terraform, Format::Yaml, Format::Json];

    /// Registry key of the format's emitter.
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Terraform => "terraform",
            Format::Yaml => "yaml",
            Format::Json => "json",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Format::Terraform => "Terraform",
            Format::Yaml => "YAML",
            Format::Json => "JSON",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Format::Terraform => "tf",
            Format::Yaml => "yml",
            Format::Json => "json",
        }
    }

    /// Suggested download name, `infrastructure.<ext>`.
    pub fn file_name(self) -> String {
        format!("infrastructure.{}", self.extension())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terraform" | "tf" => Ok(Format::Terraform),
            "yaml" | "yml" | "kubernetes" | "k8s" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            other => Err(format!(
                "Unknown format '{}'; expected one of terraform, yaml, json",
                other
            )),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
