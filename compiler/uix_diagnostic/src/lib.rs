//! Diagnostic system for markup compile errors.
//!
//! Every diagnostic carries:
//! - An error code for searchability (`E2001`)
//! - A message saying what went wrong
//! - A primary label at the markup location where it went wrong
//! - Notes with context
//!
//! Locations are line/column pairs supplied by the external markup parser;
//! the file name is attached by the emitter, not the diagnostic, so the same
//! diagnostic can be rendered for any document.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod queue;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;
pub use queue::{DiagnosticConfig, DiagnosticQueue};
