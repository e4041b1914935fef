//! Shared fixtures: a small UI type registry and a markup builder.

use uix_ir::{DirectiveNamespace, Document, Location, NodeId, NodeKind, ResolvedPath, TypeId};
use uix_types::{PropertyFlags, TypeRegistry};

use crate::resolve::binding_path_node;
use crate::{CompileContext, CompileError, CompileOptions};

/// Handles into [`ui_types`].
pub(crate) struct Ui {
    pub registry: TypeRegistry,
    pub string: TypeId,
    pub boolean: TypeId,
    pub int32: TypeId,
    pub binding: TypeId,
    pub relative_source: TypeId,
    pub window: TypeId,
    pub border: TypeId,
    pub button: TypeId,
    pub text_block: TypeId,
    pub stack_panel: TypeId,
    pub list_box: TypeId,
    pub label: TypeId,
    pub grid: TypeId,
    pub data_template: TypeId,
    pub control_template: TypeId,
    pub style: TypeId,
    pub trigger: TypeId,
    pub brush: TypeId,
    pub solid_brush: TypeId,
    pub color: TypeId,
    pub static_resource: TypeId,
    pub person: TypeId,
    pub people: TypeId,
    pub main_vm: TypeId,
}

pub(crate) fn ui_types() -> Ui {
    let mut r = TypeRegistry::new();
    let none = PropertyFlags::empty();
    let attached = PropertyFlags::ATTACHED;

    let object = r.add_type("Object");
    let string = r.add_derived("String", object);
    let boolean = r.add_derived("Boolean", object);
    let int32 = r.add_derived("Int32", object);
    let enumerable = r.add_type("IEnumerable`1");
    let property_path = r.add_derived("PropertyPath", object);

    let binding = r.add_derived("CompiledBindingExtension", object);
    r.add_property(binding, "Path", string, none);
    r.add_property(binding, "ElementName", string, none);
    r.add_property(binding, "Source", object, none);
    r.add_property(binding, "DataType", object, none);
    let static_resource = r.add_derived("StaticResourceExtension", object);

    let relative_source = r.add_derived("RelativeSource", object);
    r.add_property(relative_source, "Mode", string, none);
    r.add_property(relative_source, "AncestorType", object, none);
    r.add_property(relative_source, "AncestorLevel", int32, none);
    r.add_property(relative_source, "Tree", string, none);
    r.add_property(binding, "RelativeSource", relative_source, none);

    let brush = r.add_derived("Brush", object);
    let color = r.add_derived("Color", object);
    r.add_property(brush, "Color", color, attached);
    let solid_brush = r.add_derived("SolidColorBrush", brush);

    let styled = r.add_derived("StyledElement", object);
    r.add_property(styled, "DataContext", object, attached);
    r.add_property(styled, "Name", string, attached);
    r.add_property(styled, "Tag", object, attached);
    let control = r.add_derived("Control", styled);
    r.add_property(control, "Background", brush, attached);
    r.add_property(control, "IsEnabled", boolean, attached);
    let window = r.add_derived("Window", control);
    r.add_property(window, "Title", string, attached);
    let border = r.add_derived("Border", control);
    let button = r.add_derived("Button", control);
    r.add_property(button, "Content", object, attached);
    let text_block = r.add_derived("TextBlock", control);
    r.add_property(text_block, "Text", string, attached);
    let stack_panel = r.add_derived("StackPanel", control);
    let grid = r.add_derived("Grid", control);
    r.add_property(grid, "Row", int32, attached);
    let label = r.add_derived("Label", control);
    r.add_property(label, "Target", control, attached | PropertyFlags::RESOLVE_BY_NAME);

    let data_template = r.add_derived("DataTemplate", object);
    r.add_property(data_template, "DataType", object, none);
    let items_control = r.add_derived("ItemsControl", control);
    r.add_property(items_control, "ItemsSource", object, attached);
    r.add_property(items_control, "ItemTemplate", data_template, attached);
    let list_box = r.add_derived("ListBox", items_control);

    let control_template = r.add_derived("ControlTemplate", object);
    r.add_property(control_template, "TargetType", object, none);
    let style = r.add_derived("Style", object);
    r.add_property(style, "TargetType", object, none);
    let trigger = r.add_derived("Trigger", object);
    r.add_property(trigger, "Path", property_path, none);

    let person = r.add_derived("vm:Person", object);
    let people = r.add_generic_instance("vm:PersonList", enumerable, vec![person]);
    r.add_property(person, "Name", string, none);
    r.add_property(person, "Age", int32, none);
    r.add_property(person, "IsActive", boolean, none);
    r.add_property(person, "Friends", people, none);
    let main_vm = r.add_derived("vm:MainViewModel", object);
    r.add_property(main_vm, "Title", string, none);
    r.add_property(main_vm, "People", people, none);
    r.add_property(main_vm, "Selected", person, none);

    Ui {
        registry: r,
        string,
        boolean,
        int32,
        binding,
        relative_source,
        window,
        border,
        button,
        text_block,
        stack_panel,
        list_box,
        label,
        grid,
        data_template,
        control_template,
        style,
        trigger,
        brush,
        solid_brush,
        color,
        static_resource,
        person,
        people,
        main_vm,
    }
}

/// Builds documents one markup line per node.
pub(crate) struct Markup {
    pub doc: Document,
    line: u32,
}

impl Markup {
    pub fn new() -> Self {
        Markup {
            doc: Document::new(),
            line: 0,
        }
    }

    fn next(&mut self) -> Location {
        self.line += 1;
        Location::new(self.line, 5)
    }

    pub fn root(&mut self, ty: TypeId) -> NodeId {
        let loc = self.next();
        let root = self.doc.add_object(ty, loc);
        self.doc.set_root(root);
        root
    }

    /// `<parent.property><ty/></parent.property>`; returns the new object.
    pub fn child(&mut self, parent: NodeId, property: &str, ty: TypeId) -> NodeId {
        let loc = self.next();
        let object = self.doc.add_object(ty, loc);
        let pv = self.doc.add_property(property, None, vec![object], loc);
        self.doc.push_child(parent, pv);
        object
    }

    /// `property="text"`; returns the property node.
    pub fn text(&mut self, object: NodeId, property: &str, text: &str) -> NodeId {
        let loc = self.next();
        let value = self.doc.add_text(text, loc);
        let pv = self.doc.add_property(property, None, vec![value], loc);
        self.doc.push_child(object, pv);
        pv
    }

    /// `Owner.property="text"`.
    pub fn attached_text(&mut self, object: NodeId, owner: TypeId, property: &str, text: &str) -> NodeId {
        let loc = self.next();
        let value = self.doc.add_text(text, loc);
        let pv = self.doc.add_property(property, Some(owner), vec![value], loc);
        self.doc.push_child(object, pv);
        pv
    }

    /// `property="{x:Type name}"`.
    pub fn type_ref(&mut self, object: NodeId, property: &str, name: &str) -> NodeId {
        let loc = self.next();
        let value = self.doc.add_type_reference(name, loc);
        let pv = self.doc.add_property(property, None, vec![value], loc);
        self.doc.push_child(object, pv);
        pv
    }

    pub fn directive(&mut self, object: NodeId, ns: DirectiveNamespace, name: &str, text: &str) -> NodeId {
        let loc = self.next();
        let value = self.doc.add_text(text, loc);
        let d = self.doc.add_directive(ns, name, vec![value], loc);
        self.doc.push_child(object, d);
        d
    }

    /// `x:DataType="name"`.
    pub fn data_type(&mut self, object: NodeId, name: &str) {
        let loc = self.next();
        let value = self.doc.add_type_reference(name, loc);
        let d = self.doc.add_directive(DirectiveNamespace::Xaml, "DataType", vec![value], loc);
        self.doc.push_child(object, d);
    }

    /// `x:Name="name"`.
    pub fn name(&mut self, object: NodeId, name: &str) {
        self.directive(object, DirectiveNamespace::Xaml, "Name", name);
    }

    /// `property="{ext}"` for an extension of type `ty`; returns the
    /// extension object.
    pub fn extension(&mut self, object: NodeId, property: &str, ty: TypeId, argument: Option<&str>) -> NodeId {
        let loc = self.next();
        let ext = self.doc.add_object(ty, loc);
        if let Some(argument) = argument {
            let text = self.doc.add_text(argument, loc.offset_by(17));
            self.doc.push_argument(ext, text);
        }
        let value = self.doc.add_markup_extension(ext, loc);
        let pv = self.doc.add_property(property, None, vec![value], loc);
        self.doc.push_child(object, pv);
        ext
    }
}

/// Context over the fixture registry with default options.
pub(crate) fn context(ui: &Ui) -> CompileContext<'_> {
    context_with(ui, CompileOptions::default())
}

pub(crate) fn context_with(ui: &Ui, options: CompileOptions) -> CompileContext<'_> {
    match CompileContext::new(&ui.registry, options) {
        Ok(ctx) => ctx,
        Err(e) => panic!("fixture registry is missing a well-known type: {e}"),
    }
}

/// Run the whole pipeline over `markup`.
pub(crate) fn compile(ui: &Ui, markup: &mut Markup) -> Result<(), CompileError> {
    let mut ctx = context(ui);
    crate::run_pipeline(&mut ctx, &mut markup.doc)
}

/// The resolved path of `binding` after the pipeline ran.
pub(crate) fn resolved(doc: &Document, binding: NodeId) -> &ResolvedPath {
    let path = binding_path_node(doc, binding);
    match path.map(|p| doc.kind(p)) {
        Some(NodeKind::ResolvedBindingPath(resolved)) => resolved,
        other => panic!("binding was not resolved: {other:?}"),
    }
}
