use super::*;
use crate::TypeRegistry;
use pretty_assertions::assert_eq;

#[test]
fn resolves_required_and_optional_types() {
    let mut registry = TypeRegistry::new();
    let binding = registry.add_type("CompiledBindingExtension");
    let boolean = registry.add_type("Boolean");
    let items = registry.add_type("ItemsControl");
    let list_box = registry.add_derived("ListBox", items);

    let wk = match WellKnownTypes::resolve(&registry, &WellKnownTypeNames::default()) {
        Ok(wk) => wk,
        Err(e) => panic!("{e}"),
    };
    assert_eq!(wk.compiled_binding, binding);
    assert_eq!(wk.boolean, boolean);
    assert_eq!(wk.items_control, Some(items));
    assert_eq!(wk.style, None);

    assert!(WellKnownTypes::is(&registry, wk.items_control, list_box));
    assert!(!WellKnownTypes::is(&registry, wk.style, list_box));
}

#[test]
fn missing_required_type_is_an_error() {
    let mut registry = TypeRegistry::new();
    registry.add_type("Boolean");
    let err = WellKnownTypes::resolve(&registry, &WellKnownTypeNames::default());
    assert_eq!(
        err.map_err(|e| e.to_string()),
        Err("required type `CompiledBindingExtension` is not known to the type system".to_string())
    );
}

#[test]
fn custom_names_are_honoured() {
    let mut registry = TypeRegistry::new();
    let binding = registry.add_type("Binding");
    registry.add_type("bool");
    let names = WellKnownTypeNames {
        compiled_binding: "Binding".to_string(),
        boolean: "bool".to_string(),
        ..WellKnownTypeNames::default()
    };
    let wk = WellKnownTypes::resolve(&registry, &names).map(|wk| wk.compiled_binding);
    assert_eq!(wk, Ok(binding));
}
