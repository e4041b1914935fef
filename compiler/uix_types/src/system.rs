use uix_ir::{PropertyId, TypeId};

use crate::PropertyFlags;

/// A property as reported by the type system.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyInfo {
    pub id: PropertyId,
    pub name: String,
    /// Type the property is declared on.
    pub owner: TypeId,
    /// Type of the property's value.
    pub ty: TypeId,
    pub flags: PropertyFlags,
}

impl PropertyInfo {
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.flags.contains(PropertyFlags::ATTACHED)
    }

    #[inline]
    pub fn resolves_by_name(&self) -> bool {
        self.flags.contains(PropertyFlags::RESOLVE_BY_NAME)
    }
}

/// A constructed generic interface, e.g. `IEnumerable<Person>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GenericInterface {
    /// The open generic definition (`IEnumerable<T>`).
    pub definition: TypeId,
    pub arguments: Vec<TypeId>,
}

/// External type-resolution service.
///
/// Implementations must be deterministic: the pipeline caches answers for
/// the duration of one compile.
pub trait TypeSystem {
    /// Resolve a (possibly namespace-prefixed) type name.
    fn resolve_type(&self, name: &str) -> Option<TypeId>;

    /// Display name of a type.
    fn type_name(&self, ty: TypeId) -> &str;

    /// Plain member named `name` on `ty` or one of its base types.
    fn find_property(&self, ty: TypeId, name: &str) -> Option<PropertyInfo>;

    /// Attached or virtual property named `name` registered on `ty` or one
    /// of its base types.
    fn find_attached_property(&self, ty: TypeId, name: &str) -> Option<PropertyInfo>;

    /// Whether a value of type `source` can be stored where `target` is expected.
    fn is_assignable_from(&self, target: TypeId, source: TypeId) -> bool;

    /// Generic interfaces implemented by `ty`, including `ty` itself when it
    /// is a constructed generic type.
    fn generic_interfaces(&self, ty: TypeId) -> Vec<GenericInterface>;

    /// Attached property first, then plain member.
    fn find_any_property(&self, ty: TypeId, name: &str) -> Option<PropertyInfo> {
        self.find_attached_property(ty, name)
            .or_else(|| self.find_property(ty, name))
    }
}
