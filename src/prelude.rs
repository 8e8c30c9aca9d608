//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the infragraph crate.
//!
//! # Example
//!
//! ```rust
//! use infragraph::prelude::*;
//!
//! let nodes = vec![ComponentNode::new("node-1", ComponentKind::Server, "Web")];
//! let generator = Generator::new(GeneratorConfig::default());
//! let hcl = generator.generate(&nodes, Format::Terraform);
//! assert!(hcl.contains("resource \"aws_instance\" \"server_1\""));
//! ```

// Diagram model
pub use crate::diagram::{
    ComponentKind, ComponentNode, Connection, Diagram, IntoDiagram, Position, PropertyValue,
    export_json, import_json,
};

// Code generation
pub use crate::config::GeneratorConfig;
pub use crate::generator::{Format, GeneratedDocument, Generator};

// Editor shell
pub use crate::workspace::{DiagramStore, FileStore, MemoryStore, Workspace};

// Error types
pub use crate::error::{ImportError, WorkspaceError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
