//! Error codes for markup compiler diagnostics.
//!
//! Each code is a unique identifier (e.g., `E2001`); the first digit names
//! the phase that raised it.

use std::fmt;

/// Error codes for all markup compiler diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Binding and property path grammar errors
/// - E2xxx: Binding source errors (element name, source, relative source)
/// - E3xxx: Scope and type resolution errors
/// - E4xxx: Data context inference errors
/// - E9xxx: Internal compiler errors
///
/// Warnings use a W prefix with the same phase digit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Grammar Errors (E1xxx)
    /// Malformed binding or property path
    E1001,

    // Binding Source Errors (E2xxx)
    /// More than one of ElementName, Source and RelativeSource
    E2001,
    /// Ancestor lookup failed
    E2002,
    /// Invalid value for a binding source property
    E2003,
    /// Unknown element name
    E2004,

    // Scope and Type Errors (E3xxx)
    /// Construct used outside its required scope
    E3001,
    /// Unknown property on a resolved type
    E3002,
    /// Unknown type name
    E3003,

    // Data Context Errors (E4xxx)
    /// Data context type could not be inferred
    E4001,

    // Internal Errors (E9xxx)
    /// Internal compiler error
    E9001,

    // Warnings
    /// Element name declared more than once
    W2001,
}

impl ErrorCode {
    /// All error codes, in declaration order.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E4001,
        ErrorCode::E9001,
        ErrorCode::W2001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E9001 => "E9001",
            ErrorCode::W2001 => "W2001",
        }
    }

    /// One-line description, used by `uixc --explain`.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "malformed binding or property path",
            ErrorCode::E2001 => "more than one binding source specified",
            ErrorCode::E2002 => "ancestor binding source could not be resolved",
            ErrorCode::E2003 => "invalid binding source value",
            ErrorCode::E2004 => "unknown element name",
            ErrorCode::E3001 => "construct used outside its required scope",
            ErrorCode::E3002 => "unknown property",
            ErrorCode::E3003 => "unknown type",
            ErrorCode::E4001 => "data context type could not be inferred",
            ErrorCode::E9001 => "internal compiler error",
            ErrorCode::W2001 => "element name declared more than once",
        }
    }

    pub fn is_grammar_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_internal(&self) -> bool {
        self.as_str().starts_with("E9")
    }

    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E2001"` or `"W2001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
