//! The editor shell around a diagram: mutations, persistence and the live preview.
//!
//! Every mutation is written through the [`DiagramStore`] before it becomes visible, so
//! a reopened workspace shows exactly what the last one did and a failed write changes
//! nothing.

use crate::config::GeneratorConfig;
use crate::diagram::{
    ComponentKind, ComponentNode, Connection, Diagram, Position, PropertyValue, export_json,
    import_json,
};
use crate::error::{StoreError, WorkspaceError};
use crate::generator::{Format, GeneratedDocument, Generator};

pub mod store;

pub use store::{DiagramStore, FileStore, MemoryStore, STORAGE_KEY};

/// Where [`Workspace::quick_add_server`] drops its node.
pub const QUICK_ADD_POSITION: Position = Position { x: 300.0, y: 300.0 };

pub struct Workspace<S: DiagramStore> {
    diagram: Diagram,
    format: Format,
    generator: Generator,
    store: S,
}

impl<S: DiagramStore> Workspace<S> {
    /// Opens the workspace backed by `store`, restoring whatever it holds.
    ///
    /// An unreadable persisted document is discarded with a warning; I/O failures are
    /// returned.
    pub fn open(store: S, config: GeneratorConfig) -> Result<Self, WorkspaceError> {
        let diagram = match store.load() {
            Ok(Some(diagram)) => {
                log::info!(
                    "Restored {} components and {} connections",
                    diagram.nodes.len(),
                    diagram.edges.len()
                );
                diagram
            }
            Ok(None) => Diagram::default(),
            Err(StoreError::Corrupt(reason)) => {
                log::warn!("Discarding unreadable saved diagram: {}", reason);
                Diagram::default()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            diagram,
            format: Format::default(),
            generator: Generator::new(config),
            store,
        })
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn nodes(&self) -> &[ComponentNode] {
        &self.diagram.nodes
    }

    pub fn edges(&self) -> &[Connection] {
        &self.diagram.edges
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    /// Places a new `kind` node at `position` and returns its id.
    pub fn add_component(
        &mut self,
        kind: ComponentKind,
        position: Position,
    ) -> Result<String, WorkspaceError> {
        check_position(position)?;
        self.update(|diagram| {
            let id = diagram.next_node_id();
            let label = kind.label().to_string();
            let node = ComponentNode::new(id.clone(), kind, label.clone())
                .with_label(label)
                .at(position);
            log::debug!("Adding {} component '{}'", node.kind, id);
            diagram.nodes.push(node);
            Ok(id)
        })
    }

    /// Adds a default server named "Server".
    pub fn quick_add_server(&mut self) -> Result<String, WorkspaceError> {
        self.update(|diagram| {
            let id = diagram.next_node_id();
            let node = ComponentNode::new(id.clone(), ComponentKind::Server, "Server")
                .with_label("New Server")
                .at(QUICK_ADD_POSITION);
            diagram.nodes.push(node);
            Ok(id)
        })
    }

    pub fn set_property(
        &mut self,
        id: &str,
        key: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<(), WorkspaceError> {
        let value = value.into();
        self.update(|diagram| {
            node_in(diagram, id)?.properties.insert(key.to_string(), value);
            Ok(())
        })
    }

    pub fn rename(&mut self, id: &str, name: impl Into<String>) -> Result<(), WorkspaceError> {
        let name = name.into();
        self.update(|diagram| {
            node_in(diagram, id)?.name = name;
            Ok(())
        })
    }

    pub fn move_to(&mut self, id: &str, position: Position) -> Result<(), WorkspaceError> {
        check_position(position)?;
        self.update(|diagram| {
            node_in(diagram, id)?.position = position;
            Ok(())
        })
    }

    /// Removes the node and every connection touching it.
    pub fn remove_component(&mut self, id: &str) -> Result<ComponentNode, WorkspaceError> {
        self.update(|diagram| {
            let index = diagram
                .nodes
                .iter()
                .position(|n| n.id == id)
                .ok_or_else(|| WorkspaceError::NodeNotFound(id.to_string()))?;
            let node = diagram.nodes.remove(index);

            let before = diagram.edges.len();
            diagram
                .edges
                .retain(|e| e.source != node.id && e.target != node.id);
            log::debug!(
                "Removed component '{}' and {} attached connections",
                node.id,
                before - diagram.edges.len()
            );
            Ok(node)
        })
    }

    /// Connects two existing nodes and returns the new edge id.
    ///
    /// The id is `edge-{source}-{target}`, suffixed with a counter when another edge
    /// already holds it.
    pub fn connect(
        &mut self,
        source: &str,
        target: &str,
        source_handle: Option<String>,
        target_handle: Option<String>,
    ) -> Result<String, WorkspaceError> {
        let invalid = |reason: &str| WorkspaceError::InvalidConnection {
            source_id: source.to_string(),
            target_id: target.to_string(),
            reason: reason.to_string(),
        };

        if source == target {
            return Err(invalid("a component cannot connect to itself"));
        }
        if self.diagram.node(source).is_none() {
            return Err(WorkspaceError::NodeNotFound(source.to_string()));
        }
        if self.diagram.node(target).is_none() {
            return Err(WorkspaceError::NodeNotFound(target.to_string()));
        }

        let mut edge = Connection {
            source_handle,
            target_handle,
            ..Connection::new(source, target)
        };
        if self.diagram.edges.iter().any(|e| e.same_endpoints(&edge)) {
            return Err(invalid("the components are already connected"));
        }
        if self.diagram.has_edge(&edge.id) {
            let base = edge.id.clone();
            let free = (2u64..)
                .map(|n| format!("{}-{}", base, n))
                .find(|candidate| !self.diagram.has_edge(candidate));
            edge.id = free.unwrap_or(base);
        }

        self.update(|diagram| {
            let id = edge.id.clone();
            diagram.edges.push(edge);
            Ok(id)
        })
    }

    pub fn disconnect(&mut self, edge_id: &str) -> Result<Connection, WorkspaceError> {
        self.update(|diagram| {
            let index = diagram
                .edges
                .iter()
                .position(|e| e.id == edge_id)
                .ok_or_else(|| WorkspaceError::EdgeNotFound(edge_id.to_string()))?;
            Ok(diagram.edges.remove(index))
        })
    }

    /// Empties the canvas and forgets the saved diagram. The canvas is kept when the
    /// store cannot be cleared.
    pub fn clear(&mut self) -> Result<(), WorkspaceError> {
        self.store.clear()?;
        self.diagram = Diagram::default();
        log::info!("Workspace cleared");
        Ok(())
    }

    pub fn select_format(&mut self, format: Format) {
        self.format = format;
    }

    /// The preview for the selected format.
    pub fn document(&self) -> GeneratedDocument {
        self.generator.document(&self.diagram.nodes, self.format)
    }

    /// Serializes the diagram for download. An empty canvas has nothing to export.
    pub fn export_json(&self) -> Result<String, WorkspaceError> {
        if self.diagram.nodes.is_empty() {
            return Err(WorkspaceError::NothingToExport);
        }
        let json = export_json(&self.diagram).map_err(|e| StoreError::Serialization(e.to_string()))?;
        log::info!("Exported {} components", self.diagram.nodes.len());
        Ok(json)
    }

    /// Replaces the diagram with an imported one. On error the current diagram is kept.
    pub fn import_json(&mut self, text: &str) -> Result<(), WorkspaceError> {
        let diagram = import_json(text)?;
        self.store.save(&diagram)?;
        log::info!(
            "Imported {} components and {} connections",
            diagram.nodes.len(),
            diagram.edges.len()
        );
        self.diagram = diagram;
        Ok(())
    }

    /// Applies `edit` to a copy of the diagram and keeps the copy once it is saved.
    fn update<T>(
        &mut self,
        edit: impl FnOnce(&mut Diagram) -> Result<T, WorkspaceError>,
    ) -> Result<T, WorkspaceError> {
        let mut next = self.diagram.clone();
        let value = edit(&mut next)?;
        self.store.save(&next)?;
        self.diagram = next;
        Ok(value)
    }
}

fn node_in<'a>(diagram: &'a mut Diagram, id: &str) -> Result<&'a mut ComponentNode, WorkspaceError> {
    diagram
        .node_mut(id)
        .ok_or_else(|| WorkspaceError::NodeNotFound(id.to_string()))
}

fn check_position(position: Position) -> Result<(), WorkspaceError> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(WorkspaceError::InvalidPosition {
            x: position.x,
            y: position.y,
        })
    }
}
