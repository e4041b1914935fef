//! In-memory type registry.
//!
//! Types are declared by name and addressed by `TypeId` (the index into the
//! registry). Properties are stored once and addressed by `PropertyId`.
//!
//! # Lookup Rules
//!
//! - Property lookups walk the base chain, nearest type first.
//! - Assignability is nominal: the source type, one of its bases, or one of
//!   its non-generic interfaces must equal the target.
//! - Names match exactly, so prefixed user types register as `vm:Person`.

mod load;

use rustc_hash::FxHashMap;
use uix_ir::{PropertyId, TypeId};

use crate::{GenericInterface, PropertyFlags, PropertyInfo, TypeSystem};

pub use load::RegistryError;

#[derive(Clone, Debug, PartialEq, Eq)]
struct TypeEntry {
    name: String,
    base: Option<TypeId>,
    interfaces: Vec<GenericInterface>,
    /// Set when this type is a constructed generic (`IEnumerable<Person>`).
    instance_of: Option<GenericInterface>,
    properties: Vec<PropertyId>,
}

/// Registry of the types visible to markup.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    types: Vec<TypeEntry>,
    by_name: FxHashMap<String, TypeId>,
    properties: Vec<PropertyInfo>,
}

fn to_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("type registry exceeded u32::MAX entries"))
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a type, returning the existing handle if the name is taken.
    pub fn add_type(&mut self, name: impl Into<String>) -> TypeId {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            return id;
        }
        let id = TypeId::new(to_u32(self.types.len()));
        self.types.push(TypeEntry {
            name: name.clone(),
            base: None,
            interfaces: Vec::new(),
            instance_of: None,
            properties: Vec::new(),
        });
        self.by_name.insert(name, id);
        id
    }

    /// Declare a type deriving from `base`.
    pub fn add_derived(&mut self, name: impl Into<String>, base: TypeId) -> TypeId {
        let id = self.add_type(name);
        self.set_base(id, base);
        id
    }

    pub fn set_base(&mut self, ty: TypeId, base: TypeId) {
        self.types[ty.index()].base = Some(base);
    }

    /// Record that `ty` implements `definition<arguments...>`.
    pub fn add_interface(&mut self, ty: TypeId, definition: TypeId, arguments: Vec<TypeId>) {
        self.types[ty.index()].interfaces.push(GenericInterface {
            definition,
            arguments,
        });
    }

    /// Declare the constructed generic type `name` = `definition<arguments...>`.
    pub fn add_generic_instance(
        &mut self,
        name: impl Into<String>,
        definition: TypeId,
        arguments: Vec<TypeId>,
    ) -> TypeId {
        let id = self.add_type(name);
        self.types[id.index()].instance_of = Some(GenericInterface {
            definition,
            arguments,
        });
        id
    }

    /// Declare a property on `owner`.
    pub fn add_property(
        &mut self,
        owner: TypeId,
        name: impl Into<String>,
        ty: TypeId,
        flags: PropertyFlags,
    ) -> PropertyId {
        let id = PropertyId::new(to_u32(self.properties.len()));
        self.properties.push(PropertyInfo {
            id,
            name: name.into(),
            owner,
            ty,
            flags,
        });
        self.types[owner.index()].properties.push(id);
        id
    }

    pub fn property(&self, id: PropertyId) -> &PropertyInfo {
        &self.properties[id.index()]
    }

    /// Number of declared types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// `ty` followed by its bases, nearest first. Bounded by the number of
    /// types so a malformed cycle cannot loop forever.
    fn base_chain(&self, ty: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        std::iter::successors(Some(ty), move |t| self.types[t.index()].base)
            .take(self.types.len())
    }

    fn lookup(&self, ty: TypeId, name: &str, attached: bool) -> Option<PropertyInfo> {
        self.base_chain(ty).find_map(|t| {
            self.types[t.index()]
                .properties
                .iter()
                .map(|&p| self.property(p))
                .find(|p| p.name == name && p.is_attached() == attached)
                .cloned()
        })
    }
}

impl TypeSystem for TypeRegistry {
    fn resolve_type(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    fn type_name(&self, ty: TypeId) -> &str {
        self.types
            .get(ty.index())
            .map_or("<unknown>", |t| t.name.as_str())
    }

    fn find_property(&self, ty: TypeId, name: &str) -> Option<PropertyInfo> {
        self.lookup(ty, name, false)
    }

    fn find_attached_property(&self, ty: TypeId, name: &str) -> Option<PropertyInfo> {
        self.lookup(ty, name, true)
    }

    fn is_assignable_from(&self, target: TypeId, source: TypeId) -> bool {
        self.base_chain(source).any(|t| {
            t == target
                || self.types[t.index()]
                    .interfaces
                    .iter()
                    .any(|i| i.definition == target && i.arguments.is_empty())
        })
    }

    fn generic_interfaces(&self, ty: TypeId) -> Vec<GenericInterface> {
        let mut result = Vec::new();
        for t in self.base_chain(ty) {
            let entry = &self.types[t.index()];
            result.extend(entry.instance_of.iter().cloned());
            result.extend(entry.interfaces.iter().filter(|i| !i.arguments.is_empty()).cloned());
        }
        result
    }
}
