use super::emitter::{EmitContext, Emitter};
use crate::diagram::{ComponentNode, Position, Properties};
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Document format version written to `version`.
pub const DOCUMENT_VERSION: &str = "1.0";

/// Renders the node list as a machine-readable JSON document.
pub struct JsonEmitter;

/// Top-level shape of the JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureDocument {
    pub version: String,
    pub metadata: DocumentMetadata,
    pub infrastructure: Vec<InfrastructureEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub name: String,
    pub generated_at: String,
    pub components: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub position: Position,
    pub properties: Properties,
    pub metadata: EntryMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryMetadata {
    pub created_at: String,
    /// 1-based position of the node in the input list.
    pub index: usize,
}

impl InfrastructureDocument {
    pub fn build(nodes: &[ComponentNode], ctx: &EmitContext<'_>) -> Self {
        let timestamp = ctx
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        let infrastructure = nodes
            .iter()
            .enumerate()
            .map(|(index, node)| InfrastructureEntry {
                id: node.id.clone(),
                name: node.name.clone(),
                kind: node.kind.as_str().to_string(),
                position: node.position,
                properties: node.properties.clone(),
                metadata: EntryMetadata {
                    created_at: timestamp.clone(),
                    index: index + 1,
                },
            })
            .collect();

        Self {
            version: DOCUMENT_VERSION.to_string(),
            metadata: DocumentMetadata {
                name: format!("{} Configuration", ctx.config.project_name),
                generated_at: timestamp,
                components: nodes.len(),
            },
            infrastructure,
        }
    }
}

impl Emitter for JsonEmitter {
    fn format_name(&self) -> &str {
        "json"
    }

    fn skeleton(&self, ctx: &EmitContext<'_>) -> String {
        self.emit(&[], ctx).unwrap_or_else(|_| "{}".to_string())
    }

    fn emit(&self, nodes: &[ComponentNode], ctx: &EmitContext<'_>) -> Result<String, fmt::Error> {
        serde_json::to_string_pretty(&InfrastructureDocument::build(nodes, ctx)).map_err(|e| {
            log::error!("JSON serialization failed: {}", e);
            fmt::Error
        })
    }
}
