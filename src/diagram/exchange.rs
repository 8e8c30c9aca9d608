//! The diagram import/export file format.
//!
//! ```json
//! {
//!   "nodes": [
//!     { "id": "node-1", "position": { "x": 10, "y": 20 }, "type": "infra",
//!       "data": { "type": "server", "label": "EC2 Instance", "name": "Web",
//!                 "properties": { "instanceType": "t3.small" } } }
//!   ],
//!   "edges": [ { "id": "edge-node-1-node-2", "source": "node-1", "target": "node-2" } ]
//! }
//! ```
//!
//! The same document is what the workspace persists.

use super::conversion::IntoDiagram;
use super::definition::{ComponentNode, Connection, Diagram, Position};
use super::kind::ComponentKind;
use super::property::{Properties, lenient_properties};
use crate::error::{DiagramConversionError, ImportError};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Node renderer name used by the canvas for every infrastructure node.
pub const NODE_RENDERER: &str = "infra";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeDocument {
    pub nodes: Vec<ExchangeNode>,
    pub edges: Vec<Connection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeNode {
    pub id: String,
    #[serde(default)]
    pub position: Position,
    #[serde(rename = "type", default = "default_renderer")]
    pub renderer: String,
    pub data: ExchangeNodeData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeNodeData {
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// Icon reference resolved by the canvas. Transient: never produced on export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "lenient_properties")]
    pub properties: Properties,
}

fn default_renderer() -> String {
    NODE_RENDERER.to_string()
}

impl ExchangeDocument {
    pub fn from_diagram(diagram: &Diagram) -> Self {
        let nodes = diagram
            .nodes
            .iter()
            .map(|node| ExchangeNode {
                id: node.id.clone(),
                position: node.position,
                renderer: default_renderer(),
                data: ExchangeNodeData {
                    kind: node.kind.clone(),
                    label: node.label.clone(),
                    name: Some(node.name.clone()),
                    icon: None,
                    properties: node.properties.clone(),
                },
            })
            .collect();

        Self {
            nodes,
            edges: diagram.edges.clone(),
        }
    }
}

impl IntoDiagram for ExchangeDocument {
    fn into_diagram(self) -> Result<Diagram, DiagramConversionError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|raw| ComponentNode {
                id: raw.id,
                kind: raw.data.kind,
                name: raw.data.name.unwrap_or_default(),
                label: raw.data.label,
                position: raw.position,
                properties: raw.data.properties,
            })
            .collect();

        Ok(Diagram::new(nodes, self.edges))
    }
}

/// Serializes a diagram into the exchange format, pretty-printed.
pub fn export_json(diagram: &Diagram) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ExchangeDocument::from_diagram(diagram))
}

/// Parses and validates an exchange document.
///
/// Both `nodes` and `edges` must be present and be arrays; each node must carry an `id`
/// and a `data.type`, and node ids must be unique.
pub fn import_json(text: &str) -> Result<Diagram, ImportError> {
    let root: Value =
        serde_json::from_str(text).map_err(|e| ImportError::InvalidJson(e.to_string()))?;
    let Value::Object(mut root) = root else {
        return Err(ImportError::NotAnObject);
    };

    let raw_nodes = take_array(&mut root, "nodes")?;
    let raw_edges = take_array(&mut root, "edges")?;

    let mut nodes = Vec::with_capacity(raw_nodes.len());
    let mut seen = AHashSet::with_capacity(raw_nodes.len());
    for (index, value) in raw_nodes.into_iter().enumerate() {
        let node: ExchangeNode = serde_json::from_value(value).map_err(|e| {
            ImportError::InvalidNode {
                index,
                message: e.to_string(),
            }
        })?;
        if !seen.insert(node.id.clone()) {
            return Err(ImportError::DuplicateNodeId(node.id));
        }
        if !node.data.kind.is_known() {
            log::warn!(
                "Node '{}' has unknown type '{}'; it will render as a placeholder",
                node.id,
                node.data.kind
            );
        }
        nodes.push(node);
    }

    let mut edges = Vec::with_capacity(raw_edges.len());
    for (index, value) in raw_edges.into_iter().enumerate() {
        let edge: Connection =
            serde_json::from_value(value).map_err(|e| ImportError::InvalidEdge {
                index,
                message: e.to_string(),
            })?;
        if !seen.contains(&edge.source) || !seen.contains(&edge.target) {
            log::warn!(
                "Edge '{}' references a missing node ({} -> {})",
                edge.id,
                edge.source,
                edge.target
            );
        }
        edges.push(edge);
    }

    ExchangeDocument { nodes, edges }
        .into_diagram()
        .map_err(|e| ImportError::InvalidJson(e.to_string()))
}

fn take_array(
    root: &mut serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<Vec<Value>, ImportError> {
    match root.remove(field) {
        None => Err(ImportError::MissingCollection(field)),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(ImportError::NotAList {
            field,
            found: json_type_name(&other).to_string(),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
