use uix_ir::Span;

/// Malformed binding or property path text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    /// Offending range, relative to the start of the parsed text.
    pub span: Span,
}

impl SyntaxError {
    #[cold]
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        SyntaxError {
            message: message.into(),
            span,
        }
    }
}
