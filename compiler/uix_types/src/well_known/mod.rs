//! Types the pipeline recognizes by name.
//!
//! [`WellKnownTypeNames`] is configuration; [`WellKnownTypes::resolve`] turns
//! it into handles once per compile. The compiled-binding extension and the
//! boolean type are required. Every other entry is optional: a registry
//! without, say, an items control simply never triggers item-type inference.

use uix_ir::TypeId;

use crate::TypeSystem;

/// Names of the types the pipeline recognizes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WellKnownTypeNames {
    pub compiled_binding: String,
    pub relative_source: String,
    /// Base type of every logical-tree element.
    pub logical_element: String,
    pub data_template: String,
    pub control_template: String,
    pub style: String,
    pub items_control: String,
    /// Open generic sequence interface (`IEnumerable<T>`).
    pub enumerable: String,
    pub property_path: String,
    pub boolean: String,
    pub string: String,
}

impl Default for WellKnownTypeNames {
    fn default() -> Self {
        WellKnownTypeNames {
            compiled_binding: "CompiledBindingExtension".to_string(),
            relative_source: "RelativeSource".to_string(),
            logical_element: "StyledElement".to_string(),
            data_template: "DataTemplate".to_string(),
            control_template: "ControlTemplate".to_string(),
            style: "Style".to_string(),
            items_control: "ItemsControl".to_string(),
            enumerable: "IEnumerable`1".to_string(),
            property_path: "PropertyPath".to_string(),
            boolean: "Boolean".to_string(),
            string: "String".to_string(),
        }
    }
}

/// A required well-known type is missing from the type system.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("required type `{name}` is not known to the type system")]
pub struct MissingWellKnownType {
    pub name: String,
}

/// Resolved well-known types for one compile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WellKnownTypes {
    pub compiled_binding: TypeId,
    pub boolean: TypeId,
    pub relative_source: Option<TypeId>,
    pub logical_element: Option<TypeId>,
    pub data_template: Option<TypeId>,
    pub control_template: Option<TypeId>,
    pub style: Option<TypeId>,
    pub items_control: Option<TypeId>,
    pub enumerable: Option<TypeId>,
    pub property_path: Option<TypeId>,
    pub string: Option<TypeId>,
}

impl WellKnownTypes {
    pub fn resolve(
        types: &dyn TypeSystem,
        names: &WellKnownTypeNames,
    ) -> Result<Self, MissingWellKnownType> {
        let required = |name: &String| {
            types
                .resolve_type(name)
                .ok_or_else(|| MissingWellKnownType { name: name.clone() })
        };
        let optional = |name: &String| types.resolve_type(name);

        Ok(WellKnownTypes {
            compiled_binding: required(&names.compiled_binding)?,
            boolean: required(&names.boolean)?,
            relative_source: optional(&names.relative_source),
            logical_element: optional(&names.logical_element),
            data_template: optional(&names.data_template),
            control_template: optional(&names.control_template),
            style: optional(&names.style),
            items_control: optional(&names.items_control),
            enumerable: optional(&names.enumerable),
            property_path: optional(&names.property_path),
            string: optional(&names.string),
        })
    }

    /// Whether `ty` is `well_known` or derives from it.
    pub fn is(types: &dyn TypeSystem, well_known: Option<TypeId>, ty: TypeId) -> bool {
        well_known.is_some_and(|w| types.is_assignable_from(w, ty))
    }
}

#[cfg(test)]
mod tests;
