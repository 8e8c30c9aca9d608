use super::definition::Diagram;
use crate::error::DiagramConversionError;

/// A trait for caller-side graph models that can be converted into an InfraGraph `Diagram`.
///
/// The generator only understands the canonical `Diagram`. Implement this trait on the
/// structs you parse your own canvas or storage format into, and the rest of the crate
/// (generation, export, the workspace) works unchanged.
///
/// # Example
///
/// ```rust
/// use infragraph::prelude::*;
/// use infragraph::error::DiagramConversionError;
///
/// struct Box2d { id: String, shape: String, caption: String }
/// struct Sketch { boxes: Vec<Box2d> }
///
/// impl IntoDiagram for Sketch {
///     fn into_diagram(self) -> std::result::Result<Diagram, DiagramConversionError> {
///         let nodes = self
///             .boxes
///             .into_iter()
///             .map(|b| ComponentNode::new(b.id, ComponentKind::parse(&b.shape), b.caption))
///             .collect();
///         Ok(Diagram::new(nodes, vec![]))
///     }
/// }
///
/// let sketch = Sketch { boxes: vec![Box2d { id: "a".into(), shape: "server".into(), caption: "Web".into() }] };
/// let diagram = sketch.into_diagram().unwrap();
/// assert_eq!(diagram.nodes[0].kind, ComponentKind::Server);
/// ```
pub trait IntoDiagram {
    /// Consumes the object and converts it into a diagram.
    fn into_diagram(self) -> Result<Diagram, DiagramConversionError>;
}

impl IntoDiagram for Diagram {
    fn into_diagram(self) -> Result<Diagram, DiagramConversionError> {
        Ok(self)
    }
}
