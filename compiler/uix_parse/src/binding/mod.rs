//! Binding path grammar.
//!
//! ```text
//! binding  := ws* ( "." ws* EOF | EOF )            -> Empty
//!           | "!"* source? members ws* EOF
//! source   := "#" ident
//!           | "$self"
//!           | "$parent" ( "[" type ( ";" int )? "]" )?
//! members  := member ( "." member )*               (without a source)
//!           | ( "." member )*                      (after a source)
//! member   := ident | "(" type "." ident ")"
//! type     := ident ( ":" ident )?
//! ```
//!
//! `.` only separates members; it never produces a segment of its own. The
//! `$parent` level is a 0-based skip count.

use uix_ir::Span;

use crate::cursor::Cursor;
use crate::SyntaxError;

/// One parsed binding path segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Leading `!`: negate the final value.
    Not,
    Property {
        name: String,
    },
    /// `(Owner.Name)`.
    AttachedProperty {
        owner: String,
        name: String,
    },
    /// `#name`.
    ElementName {
        name: String,
    },
    /// `$self`.
    SelfSource,
    /// `$parent[Type;level]`. The type is inferred when omitted.
    Parent {
        ty: Option<String>,
        level: u32,
    },
}

impl SegmentKind {
    /// Whether this segment selects the path's start object.
    pub fn is_source(&self) -> bool {
        matches!(
            self,
            SegmentKind::ElementName { .. } | SegmentKind::SelfSource | SegmentKind::Parent { .. }
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BindingSegment {
    pub kind: SegmentKind,
    pub span: Span,
}

/// A parsed binding path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BindingExpr {
    /// `""` or `"."`: bind to the data context itself.
    Empty,
    Path(Vec<BindingSegment>),
}

impl BindingExpr {
    pub fn segments(&self) -> &[BindingSegment] {
        match self {
            BindingExpr::Empty => &[],
            BindingExpr::Path(segments) => segments,
        }
    }
}

/// Parse a binding path.
///
/// # Errors
///
/// Returns a [`SyntaxError`] whose span points at the offending character,
/// or at the dangling `.` when the path ends with a separator.
pub fn parse_binding_path(text: &str) -> Result<BindingExpr, SyntaxError> {
    let mut parser = BindingParser {
        cursor: Cursor::new(text),
        segments: Vec::new(),
    };
    let expr = parser.parse()?;
    tracing::trace!(text, segments = expr.segments().len(), "parsed binding path");
    Ok(expr)
}

struct BindingParser<'a> {
    cursor: Cursor<'a>,
    segments: Vec<BindingSegment>,
}

impl BindingParser<'_> {
    fn parse(&mut self) -> Result<BindingExpr, SyntaxError> {
        self.cursor.skip_whitespace();
        if self.cursor.is_eof() {
            return Ok(BindingExpr::Empty);
        }
        if self.cursor.peek() == Some('.') {
            let dot = self.cursor.next_span();
            self.cursor.bump();
            self.cursor.skip_whitespace();
            if self.cursor.is_eof() {
                return Ok(BindingExpr::Empty);
            }
            return Err(SyntaxError::new(
                "a path cannot start with `.`; use `.` alone to bind to the data context",
                dot,
            ));
        }

        while self.cursor.peek() == Some('!') {
            let span = self.cursor.next_span();
            self.cursor.bump();
            self.push(SegmentKind::Not, span);
        }

        let has_source = self.source()?;
        if !has_source && !self.at_end() {
            self.member()?;
        }

        while !self.at_end() {
            if self.cursor.peek() != Some('.') {
                return Err(self.cursor.unexpected("expected `.` between path segments"));
            }
            let dot = self.cursor.next_span();
            self.cursor.bump();
            if self.at_end() {
                return Err(SyntaxError::new("expected property name after `.`", dot));
            }
            self.member()?;
        }

        Ok(BindingExpr::Path(std::mem::take(&mut self.segments)))
    }

    /// End of the path, ignoring trailing whitespace.
    fn at_end(&self) -> bool {
        self.cursor.rest_is_whitespace()
    }

    fn push(&mut self, kind: SegmentKind, span: Span) {
        self.segments.push(BindingSegment { kind, span });
    }

    fn source(&mut self) -> Result<bool, SyntaxError> {
        let start = self.cursor.offset();
        match self.cursor.peek() {
            Some('#') => {
                self.cursor.bump();
                let name = self.cursor.expect_ident("element name after `#`")?;
                let span = self.cursor.span_from(start);
                self.push(SegmentKind::ElementName { name }, span);
                Ok(true)
            }
            Some('$') => {
                self.cursor.bump();
                let keyword = self.cursor.expect_ident("`self` or `parent` after `$`")?;
                match keyword.as_str() {
                    "self" => {
                        let span = self.cursor.span_from(start);
                        self.push(SegmentKind::SelfSource, span);
                    }
                    "parent" => {
                        let (ty, level) = self.parent_arguments()?;
                        let span = self.cursor.span_from(start);
                        self.push(SegmentKind::Parent { ty, level }, span);
                    }
                    other => {
                        return Err(SyntaxError::new(
                            format!("unknown binding source `${other}`"),
                            self.cursor.span_from(start),
                        ));
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn parent_arguments(&mut self) -> Result<(Option<String>, u32), SyntaxError> {
        if !self.cursor.eat('[') {
            return Ok((None, 0));
        }
        let ty = self.cursor.type_name()?;
        let mut level = 0;
        if self.cursor.eat(';') {
            level = self.level()?;
        }
        self.cursor.expect(']', "to close `$parent[...]`")?;
        Ok((Some(ty), level))
    }

    fn level(&mut self) -> Result<u32, SyntaxError> {
        let start = self.cursor.offset();
        let mut digits = String::new();
        while let Some(c) = self.cursor.peek().filter(char::is_ascii_digit) {
            digits.push(c);
            self.cursor.bump();
        }
        if digits.is_empty() {
            return Err(self.cursor.unexpected("expected ancestor level"));
        }
        digits.parse().map_err(|_| {
            SyntaxError::new(
                format!("ancestor level `{digits}` is too large"),
                self.cursor.span_from(start),
            )
        })
    }

    fn member(&mut self) -> Result<(), SyntaxError> {
        let start = self.cursor.offset();
        if self.cursor.eat('(') {
            let owner = self.cursor.type_name()?;
            self.cursor.expect('.', "between owner type and property name")?;
            let name = self.cursor.expect_ident("attached property name")?;
            self.cursor.expect(')', "to close attached property")?;
            let span = self.cursor.span_from(start);
            self.push(SegmentKind::AttachedProperty { owner, name }, span);
            return Ok(());
        }
        let name = self.cursor.expect_ident("property name")?;
        let span = self.cursor.span_from(start);
        self.push(SegmentKind::Property { name }, span);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
