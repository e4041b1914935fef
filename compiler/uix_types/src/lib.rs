//! Type system interface for the markup compiler.
//!
//! The compiler never constructs types. It asks a [`TypeSystem`] to resolve
//! names, look up properties, check assignability and enumerate generic
//! interfaces, and holds the returned [`TypeId`]/[`PropertyId`] handles.
//!
//! [`TypeRegistry`] is the in-memory implementation used by `uixc` (loaded
//! from JSON) and by tests (built with the registry's builder methods).
//!
//! [`TypeId`]: uix_ir::TypeId
//! [`PropertyId`]: uix_ir::PropertyId

mod flags;
mod registry;
mod system;
mod well_known;

pub use flags::PropertyFlags;
pub use registry::{RegistryError, TypeRegistry};
pub use system::{GenericInterface, PropertyInfo, TypeSystem};
pub use well_known::{MissingWellKnownType, WellKnownTypeNames, WellKnownTypes};
