//! UIXML markup compiler driver.
//!
//! Loads a type registry and markup documents from JSON, runs the
//! transformer pipeline and the accessor chain generator over each document,
//! and reports chains and diagnostics. Documents are compiled in parallel;
//! each gets its own [`CompileContext`], so one document's failure never
//! affects another's output.

use std::sync::Once;

use rayon::prelude::*;
use uix_diagnostic::Diagnostic;
use uix_emit::{emit_document, CompiledDocument};
use uix_ir::Document;
use uix_transform::{run_pipeline, CompileContext, CompileError, CompileOptions};
use uix_types::TypeSystem;

pub mod commands;
pub mod input;
pub mod report;

pub use input::{load_document, InputError};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=uix_transform=debug`
/// or `RUST_LOG=uixc=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Outcome of compiling one document.
#[derive(Clone, Debug)]
pub struct DocumentReport {
    pub name: String,
    /// Chains on success. On failure no chain is produced for any binding in
    /// the document.
    pub result: Result<CompiledDocument, CompileError>,
    /// Warnings raised before the pipeline finished or failed.
    pub warnings: Vec<Diagnostic>,
}

impl DocumentReport {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Warnings plus the error, if any, ordered by location.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = self.warnings.clone();
        if let Err(error) = &self.result {
            out.push(error.to_diagnostic());
        }
        out.sort_by_key(|d| d.primary_location().unwrap_or(uix_ir::Location::UNKNOWN));
        out
    }
}

/// Run the transformer pipeline and the generator over one document.
#[tracing::instrument(level = "debug", skip(types, doc, options))]
pub fn compile_document(
    types: &dyn TypeSystem,
    name: String,
    doc: &mut Document,
    options: &CompileOptions,
) -> DocumentReport {
    let mut ctx = match CompileContext::new(types, options.clone()) {
        Ok(ctx) => ctx,
        Err(error) => {
            return DocumentReport {
                name,
                result: Err(error),
                warnings: Vec::new(),
            }
        }
    };
    let result = run_pipeline(&mut ctx, doc).and_then(|()| emit_document(doc));
    match &result {
        Ok(compiled) => tracing::debug!(chains = compiled.chains.len(), "document compiled"),
        Err(error) => tracing::debug!(code = %error.code(), "document failed"),
    }
    DocumentReport {
        name,
        result,
        warnings: ctx.diagnostics.flush(),
    }
}

/// Compile independent documents in parallel. Reports keep input order.
pub fn compile_documents(
    types: &(dyn TypeSystem + Sync),
    documents: Vec<(String, Document)>,
    options: &CompileOptions,
) -> Vec<DocumentReport> {
    documents
        .into_par_iter()
        .map(|(name, mut doc)| compile_document(types, name, &mut doc, options))
        .collect()
}
