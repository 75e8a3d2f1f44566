mod catalog;
mod registry;
mod types;

pub use registry::{FieldRegistry, FieldRegistryBuilder};
pub use types::{FieldConfig, ValueKind};
