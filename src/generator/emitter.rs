use super::format::Format;
use super::json::JsonEmitter;
use super::terraform::TerraformEmitter;
use super::yaml::YamlEmitter;
use crate::config::GeneratorConfig;
use crate::diagram::ComponentNode;
use ahash::AHashMap;
use chrono::{DateTime, Utc};
use std::fmt;

/// Everything an emitter may read besides the nodes themselves.
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    pub config: &'a GeneratorConfig,
    /// Timestamp embedded by formats that record one.
    pub generated_at: DateTime<Utc>,
}

/// Defines the contract for rendering a node list in one output format.
///
/// Emitters are pure: the same nodes and context always produce the same text.
pub trait Emitter: Send + Sync {
    /// Registry key, e.g. `"terraform"`.
    fn format_name(&self) -> &str;

    /// Minimal valid document shown while the canvas is empty.
    fn skeleton(&self, ctx: &EmitContext<'_>) -> String;

    /// Renders a non-empty node list, one block per node in input order.
    fn emit(&self, nodes: &[ComponentNode], ctx: &EmitContext<'_>) -> Result<String, fmt::Error>;
}

pub(super) fn register_default_emitters(registry: &mut AHashMap<String, Box<dyn Emitter>>) {
    for format in Format::ALL {
        registry.insert(format.as_str().to_string(), create_emitter(format));
    }
}

/// The built-in emitter for `format`.
pub fn create_emitter(format: Format) -> Box<dyn Emitter> {
    match format {
        Format::Terraform => Box::new(TerraformEmitter),
        Format::Yaml => Box::new(YamlEmitter),
        Format::Json => Box::new(JsonEmitter),
    }
}
