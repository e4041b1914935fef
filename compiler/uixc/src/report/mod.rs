//! Machine-readable compile reports.

use serde::Serialize;
use uix_diagnostic::Diagnostic;
use uix_emit::{AccessorChain, ChainKind};
use uix_ir::PostConstructStep;
use uix_types::TypeSystem;

use crate::DocumentReport;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentJson {
    pub name: String,
    pub ok: bool,
    pub root_steps: Vec<&'static str>,
    pub chains: Vec<ChainJson>,
    pub diagnostics: Vec<DiagnosticJson>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainJson {
    pub line: u32,
    pub column: u32,
    pub kind: &'static str,
    pub result: String,
    pub ops: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticJson {
    pub code: &'static str,
    pub severity: String,
    pub message: String,
    pub line: u32,
    pub column: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl DocumentJson {
    pub fn new(types: &dyn TypeSystem, report: &DocumentReport) -> Self {
        let (root_steps, chains) = match &report.result {
            Ok(compiled) => (
                compiled.root_steps.iter().map(|s| step_name(*s)).collect(),
                compiled.chains.iter().map(|c| ChainJson::new(types, c)).collect(),
            ),
            Err(_) => (Vec::new(), Vec::new()),
        };
        DocumentJson {
            name: report.name.clone(),
            ok: report.is_ok(),
            root_steps,
            chains,
            diagnostics: report.diagnostics().iter().map(DiagnosticJson::new).collect(),
        }
    }
}

impl ChainJson {
    fn new(types: &dyn TypeSystem, chain: &AccessorChain) -> Self {
        ChainJson {
            line: chain.location.line,
            column: chain.location.column,
            kind: match chain.kind {
                ChainKind::Binding => "binding",
                ChainKind::PropertyPath => "property-path",
            },
            result: types.type_name(chain.result_type).to_string(),
            ops: chain
                .ops
                .iter()
                .map(|op| op.display(types).to_string())
                .collect(),
        }
    }
}

impl DiagnosticJson {
    fn new(diag: &Diagnostic) -> Self {
        let location = diag.primary_location().unwrap_or(uix_ir::Location::UNKNOWN);
        DiagnosticJson {
            code: diag.code.as_str(),
            severity: diag.severity.to_string(),
            message: diag.message.clone(),
            line: location.line,
            column: location.column,
            notes: diag.notes.clone(),
        }
    }
}

pub fn step_name(step: PostConstructStep) -> &'static str {
    match step {
        PostConstructStep::RegisterNameScope => "register-name-scope",
        PostConstructStep::CompleteNameScope => "complete-name-scope",
    }
}

/// Render reports as a pretty-printed JSON array.
pub fn render_json(
    types: &dyn TypeSystem,
    reports: &[DocumentReport],
) -> Result<String, serde_json::Error> {
    let documents: Vec<DocumentJson> = reports
        .iter()
        .map(|r| DocumentJson::new(types, r))
        .collect();
    serde_json::to_string_pretty(&documents)
}
