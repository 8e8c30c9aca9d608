//! # InfraGraph - Infrastructure Diagram to Code Generator
//!
//! **InfraGraph** turns a diagram of cloud infrastructure components into
//! Infrastructure-as-Code text. Each component on the canvas is a typed node (server,
//! database, storage bucket, ...) with a small set of properties; the generator renders
//! the node list as Terraform HCL, Kubernetes YAML or a JSON description.
//!
//! ## Core Workflow
//!
//! The generator operates on a canonical model of a diagram. The primary workflow is:
//!
//! 1.  **Load Your Diagram**: Import an exchange document with [`diagram::import_json`], or
//!     parse your own format and implement [`diagram::IntoDiagram`] for it.
//! 2.  **Configure**: Build a [`config::GeneratorConfig`], either by hand or from a TOML file.
//! 3.  **Generate**: Use [`generator::Generator`] to render the nodes in any registered
//!     [`generator::Format`]. Generation is pure and never fails.
//! 4.  **Edit and Persist** (optional): Wrap the diagram in a [`workspace::Workspace`] to
//!     mutate it with automatic persistence through a [`workspace::DiagramStore`].
//!
//! ## Quick Start
//!
//! ```rust
//! use infragraph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let text = r#"{
//!         "nodes": [
//!             { "id": "node-1", "position": { "x": 0, "y": 0 },
//!               "data": { "type": "server", "name": "Web",
//!                         "properties": { "instanceType": "t3.small" } } },
//!             { "id": "node-2", "position": { "x": 200, "y": 0 },
//!               "data": { "type": "database", "name": "Orders" } }
//!         ],
//!         "edges": [ { "id": "edge-node-1-node-2", "source": "node-1", "target": "node-2" } ]
//!     }"#;
//!
//!     let diagram = import_json(text)?;
//!     let generator = Generator::new(GeneratorConfig::default());
//!
//!     let hcl = generator.generate(&diagram.nodes, Format::Terraform);
//!     assert!(hcl.contains("instance_type = \"t3.small\""));
//!     assert!(hcl.contains("resource \"aws_db_instance\" \"database_2\""));
//!
//!     for format in Format::ALL {
//!         let document = generator.document(&diagram.nodes, format);
//!         println!("{}: {} lines", document.file_name(), document.line_count());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod diagram;
pub mod error;
pub mod generator;
pub mod prelude;
pub mod workspace;
