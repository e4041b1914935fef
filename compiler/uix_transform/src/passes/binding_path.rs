//! Parses compiled binding paths and folds long-form sources into them.

use smallvec::SmallVec;
use uix_ir::{Document, Location, NodeId, NodeKind, ParsedBindingPath, PathNode};
use uix_parse::{parse_binding_path, BindingSegment, SegmentKind};

use super::{is_compiled_binding, Transformer};
use crate::resolve::binding_path_node;
use crate::scope::Scope;
use crate::source::{convert_long_form_source, infer_logical_ancestor};
use crate::{CompileContext, CompileError};

/// Replaces the path text of every compiled binding with a
/// [`ParsedBindingPath`]. A binding without path text gets an empty one.
///
/// A source selected through `ElementName`, `Source` or `RelativeSource` is
/// inserted after the path's leading negations, and the property is removed.
pub struct BindingPathParser;

impl Transformer for BindingPathParser {
    fn name(&self) -> &'static str {
        "binding-path-parser"
    }

    #[tracing::instrument(level = "trace", skip_all, fields(?node))]
    fn transform(
        &self,
        ctx: &mut CompileContext<'_>,
        doc: &mut Document,
        scope: Scope<'_>,
        node: NodeId,
    ) -> Result<(), CompileError> {
        if !is_compiled_binding(ctx, doc, node) {
            return Ok(());
        }
        let path_node = binding_path_node(doc, node);
        let text = match path_node.map(|p| doc.kind(p)) {
            Some(NodeKind::Text(text)) => Some(text.clone()),
            Some(_) => return Ok(()),
            None => None,
        };

        let mut nodes: SmallVec<[PathNode; 4]> = SmallVec::new();
        let mut offsets: SmallVec<[u32; 4]> = SmallVec::new();
        if let (Some(text), Some(path_node)) = (&text, path_node) {
            let location = doc.location(path_node);
            let expr = parse_binding_path(text)
                .map_err(|e| CompileError::from_syntax(&e, text, location))?;
            for segment in expr.segments() {
                let at = location.offset_in(text, segment.span.start);
                nodes.push(convert_segment(ctx, doc, scope, segment, at)?);
                offsets.push(segment.span.start);
            }
        }

        let path_has_source = nodes.iter().any(PathNode::is_source);
        let mut parsed = ParsedBindingPath {
            text: text.unwrap_or_default(),
            nodes,
            offsets,
        };
        if let Some(source) = convert_long_form_source(ctx, doc, scope, node, path_has_source)? {
            parsed.insert_source(source);
        }
        tracing::trace!(path = %parsed.text, nodes = parsed.nodes.len(), "parsed binding path");

        match path_node {
            Some(path_node) => doc.replace(path_node, NodeKind::ParsedBindingPath(parsed)),
            None => {
                let argument = doc.alloc(NodeKind::ParsedBindingPath(parsed), doc.location(node));
                doc.push_argument(node, argument);
            }
        }
        Ok(())
    }
}

fn convert_segment(
    ctx: &mut CompileContext<'_>,
    doc: &Document,
    scope: Scope<'_>,
    segment: &BindingSegment,
    location: Location,
) -> Result<PathNode, CompileError> {
    Ok(match &segment.kind {
        SegmentKind::Not => PathNode::Not,
        SegmentKind::Property { name } => PathNode::PropertyAccess {
            name: name.clone(),
            owner: None,
        },
        SegmentKind::AttachedProperty { owner, name } => PathNode::PropertyAccess {
            name: name.clone(),
            owner: Some(ctx.resolve_type(owner, location)?),
        },
        SegmentKind::ElementName { name } => PathNode::Name {
            identifier: name.clone(),
        },
        SegmentKind::SelfSource => PathNode::SelfSource,
        SegmentKind::Parent { ty: Some(ty), level } => PathNode::LogicalAncestor {
            ty: ctx.resolve_type(ty, location)?,
            level: *level,
        },
        SegmentKind::Parent { ty: None, level } => PathNode::LogicalAncestor {
            ty: infer_logical_ancestor(ctx, doc, scope, *level, location)?,
            level: *level,
        },
    })
}
