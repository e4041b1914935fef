//! Property path grammar.
//!
//! ```text
//! path     := ws* EOF | ws* "." ws* EOF                 -> empty
//!           | token ( ws* token )* ws* EOF
//! token    := ident                                     property
//!           | "(" type "." ident ")"                     qualified property
//!           | "."                                       child traversal
//!           | ":as(" type ")" | ":is(" type ")"          soft / strict cast
//! ```
//!
//! Token order is enforced with three expectation flags. A property may only
//! appear where a property is expected (at the start or after `.`), a cast
//! only right after a property or another cast, and `.` only after a property
//! or a cast. Anything else is rejected at the offending token.

use std::fmt;

use uix_ir::Span;

use crate::cursor::Cursor;
use crate::SyntaxError;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyPathSegmentKind {
    Property { name: String },
    QualifiedProperty { owner: String, name: String },
    ChildTraversal,
    /// `:as(T)` when not strict, `:is(T)` when strict.
    Cast { ty: String, strict: bool },
}

impl fmt::Display for PropertyPathSegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyPathSegmentKind::Property { name } => f.write_str(name),
            PropertyPathSegmentKind::QualifiedProperty { owner, name } => {
                write!(f, "({owner}.{name})")
            }
            PropertyPathSegmentKind::ChildTraversal => f.write_str("."),
            PropertyPathSegmentKind::Cast { ty, strict: false } => write!(f, ":as({ty})"),
            PropertyPathSegmentKind::Cast { ty, strict: true } => write!(f, ":is({ty})"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyPathSegment {
    pub kind: PropertyPathSegmentKind,
    pub span: Span,
}

/// Print segments back to canonical text (no whitespace).
pub fn print_property_path(segments: &[PropertyPathSegment]) -> String {
    segments.iter().map(|s| s.kind.to_string()).collect()
}

#[derive(Copy, Clone, Debug)]
struct Expect {
    property: bool,
    cast: bool,
    traversal: bool,
}

impl Expect {
    const START: Expect = Expect {
        property: true,
        cast: false,
        traversal: false,
    };
    const AFTER_PROPERTY: Expect = Expect {
        property: false,
        cast: true,
        traversal: true,
    };
    const AFTER_TRAVERSAL: Expect = Expect {
        property: true,
        cast: false,
        traversal: false,
    };
    const AFTER_CAST: Expect = Expect {
        property: false,
        cast: true,
        traversal: true,
    };

    fn describe(self) -> &'static str {
        if self.property {
            "expected property name"
        } else {
            "expected `.` or a cast"
        }
    }
}

/// Parse a property path. Empty text and a lone `.` yield no segments.
///
/// # Errors
///
/// Returns a [`SyntaxError`] at the first token that violates the current
/// expectation, or at a dangling trailing `.`.
pub fn parse_property_path(text: &str) -> Result<Vec<PropertyPathSegment>, SyntaxError> {
    let mut cursor = Cursor::new(text);
    cursor.skip_whitespace();
    if cursor.rest_is_whitespace() {
        return Ok(Vec::new());
    }
    if cursor.peek() == Some('.') {
        let dot = cursor.next_span();
        cursor.bump();
        if cursor.rest_is_whitespace() {
            return Ok(Vec::new());
        }
        return Err(SyntaxError::new("expected property name, found `.`", dot));
    }

    let mut expect = Expect::START;
    let mut segments = Vec::new();

    loop {
        cursor.skip_whitespace();
        let Some(c) = cursor.peek() else { break };
        let start = cursor.offset();

        let kind = match c {
            '.' if expect.traversal => {
                cursor.bump();
                expect = Expect::AFTER_TRAVERSAL;
                PropertyPathSegmentKind::ChildTraversal
            }
            ':' if expect.cast => {
                let strict = if cursor.eat_str(":as(") {
                    false
                } else if cursor.eat_str(":is(") {
                    true
                } else {
                    return Err(SyntaxError::new(
                        "expected `:as(` or `:is(`",
                        cursor.next_span(),
                    ));
                };
                let ty = cursor.type_name()?;
                cursor.expect(')', "to close cast")?;
                expect = Expect::AFTER_CAST;
                PropertyPathSegmentKind::Cast { ty, strict }
            }
            '(' if expect.property => {
                cursor.bump();
                let owner = cursor.type_name()?;
                cursor.expect('.', "between owner type and property name")?;
                let name = cursor.expect_ident("property name")?;
                cursor.expect(')', "to close qualified property")?;
                expect = Expect::AFTER_PROPERTY;
                PropertyPathSegmentKind::QualifiedProperty { owner, name }
            }
            _ if expect.property => {
                let name = cursor.expect_ident("property name")?;
                expect = Expect::AFTER_PROPERTY;
                PropertyPathSegmentKind::Property { name }
            }
            _ => return Err(cursor.unexpected(expect.describe())),
        };
        segments.push(PropertyPathSegment {
            kind,
            span: cursor.span_from(start),
        });
    }

    if let Some(last) = segments.last() {
        if last.kind == PropertyPathSegmentKind::ChildTraversal {
            return Err(SyntaxError::new("expected property name after `.`", last.span));
        }
    }

    tracing::trace!(text, segments = segments.len(), "parsed property path");
    Ok(segments)
}
