//! JSON markup input.
//!
//! The markup parser is external; `uixc` reads its output as a JSON tree:
//!
//! ```text
//! { "root": {
//!     "type": "Window", "line": 1, "column": 1,
//!     "children": [
//!       { "kind": "directive", "namespace": "x", "name": "DataType",
//!         "values": [ { "kind": "type", "name": "vm:MainViewModel" } ] },
//!       { "kind": "property", "name": "Title", "line": 1, "column": 30,
//!         "values": [ { "kind": "extension", "type": "CompiledBindingExtension",
//!                       "arguments": [ { "kind": "text", "text": "Title", "line": 1, "column": 55 } ] } ] }
//!     ] } }
//! ```

use serde::Deserialize;
use uix_ir::{DirectiveNamespace, Document, Location, NodeId};
use uix_types::TypeSystem;

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("invalid markup document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{location}: unknown type `{name}`")]
    UnknownType { name: String, location: Location },
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentFile {
    root: Option<ObjectDecl>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ObjectDecl {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    line: u32,
    #[serde(default)]
    column: u32,
    #[serde(default)]
    arguments: Vec<ValueDecl>,
    #[serde(default)]
    children: Vec<MemberDecl>,
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
enum ValueDecl {
    Object(ObjectDecl),
    Extension(ObjectDecl),
    Text {
        text: String,
        #[serde(default)]
        line: u32,
        #[serde(default)]
        column: u32,
    },
    Type {
        name: String,
        #[serde(default)]
        line: u32,
        #[serde(default)]
        column: u32,
    },
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
enum MemberDecl {
    Property {
        name: String,
        /// Owner type of an attached property assignment.
        #[serde(default)]
        owner: Option<String>,
        #[serde(default)]
        line: u32,
        #[serde(default)]
        column: u32,
        values: Vec<ValueDecl>,
    },
    Directive {
        namespace: String,
        name: String,
        #[serde(default)]
        line: u32,
        #[serde(default)]
        column: u32,
        values: Vec<ValueDecl>,
    },
}

/// Build a document from its JSON form, resolving object types through `types`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn load_document(text: &str, types: &dyn TypeSystem) -> Result<Document, InputError> {
    let file: DocumentFile = serde_json::from_str(text)?;
    let mut loader = Loader {
        doc: Document::new(),
        types,
    };
    if let Some(root) = &file.root {
        let root = loader.object(root)?;
        loader.doc.set_root(root);
    }
    tracing::debug!(nodes = loader.doc.len(), "loaded markup document");
    Ok(loader.doc)
}

struct Loader<'a> {
    doc: Document,
    types: &'a dyn TypeSystem,
}

impl Loader<'_> {
    fn resolve(&self, name: &str, location: Location) -> Result<uix_ir::TypeId, InputError> {
        self.types
            .resolve_type(name)
            .ok_or_else(|| InputError::UnknownType {
                name: name.to_string(),
                location,
            })
    }

    fn object(&mut self, decl: &ObjectDecl) -> Result<NodeId, InputError> {
        uix_transform::ensure_sufficient_stack(|| {
            let location = Location::new(decl.line, decl.column);
            let ty = self.resolve(&decl.ty, location)?;
            let object = self.doc.add_object(ty, location);
            for argument in &decl.arguments {
                let value = self.value(argument)?;
                self.doc.push_argument(object, value);
            }
            for member in &decl.children {
                let member = self.member(member)?;
                self.doc.push_child(object, member);
            }
            Ok(object)
        })
    }

    fn value(&mut self, decl: &ValueDecl) -> Result<NodeId, InputError> {
        match decl {
            ValueDecl::Object(object) => self.object(object),
            ValueDecl::Extension(object) => {
                let inner = self.object(object)?;
                let location = self.doc.location(inner);
                Ok(self.doc.add_markup_extension(inner, location))
            }
            ValueDecl::Text { text, line, column } => {
                Ok(self.doc.add_text(text.as_str(), Location::new(*line, *column)))
            }
            ValueDecl::Type { name, line, column } => {
                Ok(self.doc.add_type_reference(name.as_str(), Location::new(*line, *column)))
            }
        }
    }

    fn member(&mut self, decl: &MemberDecl) -> Result<NodeId, InputError> {
        match decl {
            MemberDecl::Property {
                name,
                owner,
                line,
                column,
                values,
            } => {
                let location = Location::new(*line, *column);
                let owner = owner
                    .as_deref()
                    .map(|o| self.resolve(o, location))
                    .transpose()?;
                let values = self.values(values)?;
                Ok(self.doc.add_property(name.as_str(), owner, values, location))
            }
            MemberDecl::Directive {
                namespace,
                name,
                line,
                column,
                values,
            } => {
                let namespace = match namespace.as_str() {
                    "x" => DirectiveNamespace::Xaml,
                    "d" => DirectiveNamespace::Design,
                    other => DirectiveNamespace::Other(other.to_string()),
                };
                let values = self.values(values)?;
                Ok(self
                    .doc
                    .add_directive(namespace, name.as_str(), values, Location::new(*line, *column)))
            }
        }
    }

    fn values(&mut self, decls: &[ValueDecl]) -> Result<Vec<NodeId>, InputError> {
        decls.iter().map(|v| self.value(v)).collect()
    }
}
