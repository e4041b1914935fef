//! Compile errors.
//!
//! Every failure in the pipeline is a [`CompileError`] carrying the
//! triggering node's location. Errors propagate with `?`; no pass or
//! inference step catches one. The deferred data-context case is the only
//! error created ahead of time, and it is only returned when read.

use std::fmt;

use uix_diagnostic::{Diagnostic, ErrorCode};
use uix_ir::Location;
use uix_parse::SyntaxError;

/// Failure category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CompileErrorKind {
    /// Malformed binding or property path text.
    GrammarParse,
    /// More than one of ElementName, Source and RelativeSource.
    AmbiguousSource,
    /// Ancestor type or level could not be resolved.
    UnresolvedAncestor,
    /// TemplatedParent or a property path outside its required scope.
    MissingScope,
    /// Named property absent on the resolved type.
    UnknownMember,
    /// Data context type read where it could not be inferred.
    UninferrableDataContext,
    UnresolvedType,
    UnresolvedName,
    /// Malformed value for a binding-source property.
    InvalidValue,
    /// Broken pipeline invariant.
    Internal,
}

impl CompileErrorKind {
    pub fn code(self) -> ErrorCode {
        match self {
            CompileErrorKind::GrammarParse => ErrorCode::E1001,
            CompileErrorKind::AmbiguousSource => ErrorCode::E2001,
            CompileErrorKind::UnresolvedAncestor => ErrorCode::E2002,
            CompileErrorKind::InvalidValue => ErrorCode::E2003,
            CompileErrorKind::UnresolvedName => ErrorCode::E2004,
            CompileErrorKind::MissingScope => ErrorCode::E3001,
            CompileErrorKind::UnknownMember => ErrorCode::E3002,
            CompileErrorKind::UnresolvedType => ErrorCode::E3003,
            CompileErrorKind::UninferrableDataContext => ErrorCode::E4001,
            CompileErrorKind::Internal => ErrorCode::E9001,
        }
    }
}

impl fmt::Display for CompileErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().description())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{location}: {message}")]
pub struct CompileError {
    pub kind: CompileErrorKind,
    pub message: String,
    pub location: Location,
    pub notes: Vec<String>,
}

impl CompileError {
    #[cold]
    pub fn new(kind: CompileErrorKind, message: impl Into<String>, location: Location) -> Self {
        CompileError {
            kind,
            message: message.into(),
            location,
            notes: Vec::new(),
        }
    }

    #[cold]
    pub fn internal(message: impl Into<String>, location: Location) -> Self {
        Self::new(CompileErrorKind::Internal, message, location)
    }

    /// Lift a grammar error raised on text that starts at `text_location`.
    #[cold]
    pub fn from_syntax(error: &SyntaxError, text: &str, text_location: Location) -> Self {
        Self::new(
            CompileErrorKind::GrammarParse,
            error.message.clone(),
            text_location.offset_in(text, error.span.start),
        )
        .with_note(format!("while parsing `{text}`"))
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self.kind {
            CompileErrorKind::Internal => "this is a compiler bug".to_string(),
            kind => kind.to_string(),
        };
        self.notes.iter().fold(
            Diagnostic::error(self.code())
                .with_message(self.message.clone())
                .with_label(self.location, label),
            |diag, note| diag.with_note(note.clone()),
        )
    }
}
