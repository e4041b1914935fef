//! JSON loading for [`TypeRegistry`].
//!
//! ```text
//! { "types": [
//!     { "name": "ItemsControl", "base": "Control",
//!       "properties": [ { "name": "ItemsSource", "type": "IEnumerable", "attached": true } ] },
//!     { "name": "ObservableCollection<vm:Person>", "base": "Object",
//!       "interfaces": [ { "definition": "IEnumerable`1", "arguments": ["vm:Person"] } ] }
//! ] }
//! ```
//!
//! Types may reference each other in any order: every name is declared
//! before any reference is resolved.

use serde::Deserialize;
use uix_ir::TypeId;

use super::TypeRegistry;
use crate::PropertyFlags;

/// Errors raised while loading a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("invalid type registry: {0}")]
    Json(#[from] serde_json::Error),

    #[error("type `{name}` is declared more than once")]
    DuplicateType { name: String },

    #[error("unknown type `{name}` referenced by `{referenced_by}`")]
    UnknownType { name: String, referenced_by: String },

    #[error("type `{name}` inherits from itself")]
    CyclicBase { name: String },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    types: Vec<TypeDecl>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TypeDecl {
    name: String,
    #[serde(default)]
    base: Option<String>,
    #[serde(default)]
    interfaces: Vec<InterfaceDecl>,
    /// Marks a constructed generic type.
    #[serde(default)]
    generic: Option<InterfaceDecl>,
    #[serde(default)]
    properties: Vec<PropertyDecl>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct InterfaceDecl {
    definition: String,
    #[serde(default)]
    arguments: Vec<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct PropertyDecl {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    attached: bool,
    #[serde(default)]
    resolve_by_name: bool,
}

impl TypeRegistry {
    /// Load a registry from its JSON description.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn from_json(text: &str) -> Result<Self, RegistryError> {
        let file: RegistryFile = serde_json::from_str(text)?;
        let mut registry = TypeRegistry::new();

        for decl in &file.types {
            if registry.by_name.contains_key(&decl.name) {
                return Err(RegistryError::DuplicateType {
                    name: decl.name.clone(),
                });
            }
            registry.add_type(decl.name.as_str());
        }

        for decl in &file.types {
            let id = registry.resolve_ref(&decl.name, &decl.name)?;
            if let Some(base) = &decl.base {
                let base = registry.resolve_ref(base, &decl.name)?;
                registry.set_base(id, base);
            }
            for iface in &decl.interfaces {
                let (definition, arguments) = registry.resolve_interface(iface, &decl.name)?;
                registry.add_interface(id, definition, arguments);
            }
            if let Some(generic) = &decl.generic {
                let (definition, arguments) = registry.resolve_interface(generic, &decl.name)?;
                registry.add_generic_instance(decl.name.as_str(), definition, arguments);
            }
            for prop in &decl.properties {
                let ty = registry.resolve_ref(&prop.ty, &decl.name)?;
                let mut flags = PropertyFlags::empty();
                flags.set(PropertyFlags::ATTACHED, prop.attached);
                flags.set(PropertyFlags::RESOLVE_BY_NAME, prop.resolve_by_name);
                registry.add_property(id, prop.name.as_str(), ty, flags);
            }
        }

        for decl in &file.types {
            let id = registry.resolve_ref(&decl.name, &decl.name)?;
            if registry.has_cyclic_base(id) {
                return Err(RegistryError::CyclicBase {
                    name: decl.name.clone(),
                });
            }
        }

        tracing::debug!(types = registry.len(), "loaded type registry");
        Ok(registry)
    }

    fn resolve_ref(&self, name: &str, referenced_by: &str) -> Result<TypeId, RegistryError> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownType {
                name: name.to_string(),
                referenced_by: referenced_by.to_string(),
            })
    }

    fn resolve_interface(
        &self,
        decl: &InterfaceDecl,
        referenced_by: &str,
    ) -> Result<(TypeId, Vec<TypeId>), RegistryError> {
        let definition = self.resolve_ref(&decl.definition, referenced_by)?;
        let arguments = decl
            .arguments
            .iter()
            .map(|a| self.resolve_ref(a, referenced_by))
            .collect::<Result<_, _>>()?;
        Ok((definition, arguments))
    }

    fn has_cyclic_base(&self, ty: TypeId) -> bool {
        let mut current = self.types[ty.index()].base;
        for _ in 0..self.types.len() {
            match current {
                None => return false,
                Some(t) if t == ty => return true,
                Some(t) => current = self.types[t.index()].base,
            }
        }
        current.is_some()
    }
}
