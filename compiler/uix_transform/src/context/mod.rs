//! Per-compile state.
//!
//! A [`CompileContext`] is created for one document and threaded through
//! every pass and inference call. It owns every cache the pipeline uses
//! (type names, data-context memo, name table), so nothing is shared
//! between documents.

use rustc_hash::FxHashMap;
use uix_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use uix_ir::{DirectiveNamespace, Document, Location, NodeId, NodeKind, TypeId};
use uix_types::{TypeSystem, WellKnownTypeNames, WellKnownTypes};

use crate::infer::DataContextType;
use crate::stack::ensure_sufficient_stack;
use crate::{CompileError, CompileErrorKind};

/// Options for one compile.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Keep design-time (`d:`) directives as property assignments.
    pub design_mode: bool,
    pub well_known: WellKnownTypeNames,
}

/// An element registered under a name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamedElement {
    pub node: NodeId,
    pub ty: TypeId,
}

pub struct CompileContext<'a> {
    pub types: &'a dyn TypeSystem,
    pub well_known: WellKnownTypes,
    pub options: CompileOptions,
    /// Warnings raised while compiling. Errors are returned, not queued.
    pub diagnostics: DiagnosticQueue,
    type_cache: FxHashMap<String, Option<TypeId>>,
    data_contexts: FxHashMap<NodeId, Option<DataContextType>>,
    names: Option<FxHashMap<String, NamedElement>>,
}

impl<'a> CompileContext<'a> {
    /// Create a context, resolving the well-known types.
    pub fn new(types: &'a dyn TypeSystem, options: CompileOptions) -> Result<Self, CompileError> {
        let well_known = WellKnownTypes::resolve(types, &options.well_known).map_err(|e| {
            CompileError::new(CompileErrorKind::UnresolvedType, e.to_string(), Location::UNKNOWN)
        })?;
        Ok(CompileContext {
            types,
            well_known,
            options,
            diagnostics: DiagnosticQueue::new(),
            type_cache: FxHashMap::default(),
            data_contexts: FxHashMap::default(),
            names: None,
        })
    }

    /// Resolve a type name, caching the answer for the rest of the compile.
    pub fn resolve_type(&mut self, name: &str, location: Location) -> Result<TypeId, CompileError> {
        let types = self.types;
        let resolved = *self
            .type_cache
            .entry(name.to_string())
            .or_insert_with(|| types.resolve_type(name));
        resolved.ok_or_else(|| {
            CompileError::new(
                CompileErrorKind::UnresolvedType,
                format!("unknown type `{name}`"),
                location,
            )
        })
    }

    /// Resolve the type named by a `TypeReference` or text value node.
    pub fn resolve_type_value(
        &mut self,
        doc: &Document,
        value: NodeId,
    ) -> Result<TypeId, CompileError> {
        let location = doc.location(value);
        match doc.kind(value) {
            NodeKind::TypeReference(name) | NodeKind::Text(name) => {
                self.resolve_type(name, location)
            }
            _ => Err(CompileError::new(
                CompileErrorKind::InvalidValue,
                "expected a type name",
                location,
            )),
        }
    }

    pub fn type_name(&self, ty: TypeId) -> &str {
        self.types.type_name(ty)
    }

    pub fn is_assignable(&self, target: Option<TypeId>, ty: TypeId) -> bool {
        WellKnownTypes::is(self.types, target, ty)
    }

    pub(crate) fn memoized_data_context(&self, node: NodeId) -> Option<&Option<DataContextType>> {
        self.data_contexts.get(&node)
    }

    pub(crate) fn memoize_data_context(&mut self, node: NodeId, value: Option<DataContextType>) {
        self.data_contexts.insert(node, value);
    }

    /// Look up a named element, building the name table on first use.
    pub fn named_element(&mut self, doc: &Document, name: &str) -> Option<NamedElement> {
        if self.names.is_none() {
            let names = self.collect_names(doc);
            self.names = Some(names);
        }
        self.names.as_ref().and_then(|names| names.get(name).copied())
    }

    fn collect_names(&mut self, doc: &Document) -> FxHashMap<String, NamedElement> {
        let mut names = FxHashMap::default();
        if doc.root().is_valid() {
            self.collect_names_in(doc, doc.root(), &mut names);
        }
        tracing::trace!(count = names.len(), "collected element names");
        names
    }

    fn collect_names_in(
        &mut self,
        doc: &Document,
        node: NodeId,
        names: &mut FxHashMap<String, NamedElement>,
    ) {
        ensure_sufficient_stack(|| {
            if let Some(obj) = doc.as_object(node) {
                let declared = doc
                    .directive(node, &DirectiveNamespace::Xaml, "Name")
                    .and_then(|d| doc.first_value(d))
                    .and_then(|v| doc.text(v))
                    .or_else(|| doc.property_text(node, "Name"));
                if let Some(name) = declared {
                    let entry = NamedElement { node, ty: obj.ty };
                    if names.contains_key(name) {
                        self.diagnostics.add(
                            Diagnostic::warning(ErrorCode::W2001)
                                .with_message(format!("element name `{name}` is declared more than once"))
                                .with_label(doc.location(node), "later declaration ignored"),
                        );
                    } else {
                        names.insert(name.to_string(), entry);
                    }
                }
            }
            for child in doc.children(node) {
                self.collect_names_in(doc, child, names);
            }
        });
    }
}
