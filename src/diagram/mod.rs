pub mod conversion;
pub mod definition;
pub mod exchange;
pub mod kind;
pub mod property;

pub use conversion::*;
pub use definition::*;
pub use exchange::{ExchangeDocument, ExchangeNode, ExchangeNodeData, export_json, import_json};
pub use kind::*;
pub use property::{
    Properties, PropertyInput, PropertySpec, PropertyValue, default_properties,
};
