use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating or converting a diagram exchange file.
///
/// An import that fails with any of these leaves the caller's current diagram untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    #[error("Invalid JSON file: {0}")]
    InvalidJson(String),

    #[error("Invalid JSON structure: the top level must be an object with 'nodes' and 'edges' arrays")]
    NotAnObject,

    #[error("Invalid JSON structure: missing '{0}' array")]
    MissingCollection(&'static str),

    #[error("Invalid JSON structure: '{field}' must be an array, but found {found}")]
    NotAList { field: &'static str, found: String },

    #[error("Node at index {index} is invalid: {message}")]
    InvalidNode { index: usize, message: String },

    #[error("Edge at index {index} is invalid: {message}")]
    InvalidEdge { index: usize, message: String },

    #[error("Node id '{0}' appears more than once")]
    DuplicateNodeId(String),
}

/// Errors that can occur when converting a custom caller format into a `Diagram`.
#[derive(Error, Debug, Clone)]
pub enum DiagramConversionError {
    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// Errors raised by a persistence port.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Could not access '{path}': {message}")]
    Io { path: PathBuf, message: String },

    #[error("Stored diagram is unreadable: {0}")]
    Corrupt(String),

    #[error("Could not serialize diagram: {0}")]
    Serialization(String),
}

/// Errors raised while loading a generator configuration file.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Could not read configuration file '{path}': {message}")]
    Unreadable { path: PathBuf, message: String },

    #[error("Configuration parsing failed: {0}")]
    ParsingFailed(String),
}

/// Errors surfaced by the editor workspace to its user.
#[derive(Error, Debug, Clone)]
pub enum WorkspaceError {
    #[error("Component '{0}' not found")]
    NodeNotFound(String),

    #[error("Connection '{0}' not found")]
    EdgeNotFound(String),

    #[error("Cannot connect '{source_id}' to '{target_id}': {reason}")]
    InvalidConnection {
        source_id: String,
        target_id: String,
        reason: String,
    },

    #[error("Position ({x}, {y}) is not a finite coordinate")]
    InvalidPosition { x: f64, y: f64 },

    #[error("No components to export.")]
    NothingToExport,

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
