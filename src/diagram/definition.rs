use super::kind::ComponentKind;
use super::property::{Properties, PropertyValue, default_properties};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// Canvas coordinate of a node. Ignored by code generation, preserved in JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// JSON has no NaN or infinity, so only finite positions survive a save.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One infrastructure component placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentNode {
    pub id: String,
    pub kind: ComponentKind,
    /// User-editable name; empty when the canvas never assigned one.
    pub name: String,
    /// Catalog label the node was created from.
    pub label: Option<String>,
    pub position: Position,
    pub properties: Properties,
}

impl ComponentNode {
    /// A node of `kind` with the kind's default properties.
    pub fn new(id: impl Into<String>, kind: ComponentKind, name: impl Into<String>) -> Self {
        let properties = default_properties(&kind);
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            label: None,
            position: Position::default(),
            properties,
        }
    }

    /// A node with no properties at all; every generated value comes from defaults.
    pub fn bare(id: impl Into<String>, kind: ComponentKind, name: impl Into<String>) -> Self {
        Self {
            properties: Properties::new(),
            ..Self::new(id, kind, name)
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_property(mut self, key: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Name as shown on the canvas: `name`, else `label`, else "Unnamed".
    pub fn display_name(&self) -> &str {
        if !self.name.trim().is_empty() {
            &self.name
        } else {
            match self.label.as_deref() {
                Some(label) if !label.trim().is_empty() => label,
                _ => "Unnamed",
            }
        }
    }
}

/// A directed connection between two nodes. Carried through persistence and export only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,
}

impl Connection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: make_edge_id(&source, &target),
            source,
            target,
            source_handle: None,
            target_handle: None,
            edge_type: None,
        }
    }

    /// Whether both connections join the same endpoints through the same handles.
    pub fn same_endpoints(&self, other: &Connection) -> bool {
        self.source == other.source
            && self.target == other.target
            && self.source_handle == other.source_handle
            && self.target_handle == other.target_handle
    }
}

/// The complete graph: the canonical input of the code generator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagram {
    pub nodes: Vec<ComponentNode>,
    pub edges: Vec<Connection>,
}

impl Diagram {
    pub fn new(nodes: Vec<ComponentNode>, edges: Vec<Connection>) -> Self {
        Self { nodes, edges }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&ComponentNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut ComponentNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// The next free `node-N` id: one past the highest, or the lowest gap once that
    /// would overflow.
    pub fn next_node_id(&self) -> String {
        let taken: AHashSet<u64> = self
            .nodes
            .iter()
            .filter_map(|n| n.id.strip_prefix("node-").and_then(|s| s.parse::<u64>().ok()))
            .collect();
        let max = taken.iter().copied().max().unwrap_or(0);
        let next = max
            .checked_add(1)
            .or_else(|| (1..u64::MAX).find(|n| !taken.contains(n)));
        match next {
            Some(n) => format!("node-{}", n),
            None => format!("node-{}-{}", u64::MAX, self.nodes.len()),
        }
    }

    /// Whether an edge already uses `id`.
    pub fn has_edge(&self, id: &str) -> bool {
        self.edges.iter().any(|e| e.id == id)
    }
}

/// Edge id for a connection from `source` to `target`.
pub fn make_edge_id(source: &str, target: &str) -> String {
    format!("edge-{}-{}", source, target)
}
