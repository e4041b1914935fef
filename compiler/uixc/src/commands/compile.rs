//! The `compile` and `check` commands.
//!
//! Both load every document, run the full pipeline and report diagnostics
//! per document. `compile` additionally prints the generated accessor chains.
//! A document that fails to load or compile never stops the others.

use uix_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use uix_diagnostic::DiagnosticQueue;
use uix_emit::{ChainKind, CompiledDocument};
use uix_ir::Document;
use uix_transform::CompileOptions;
use uix_types::TypeSystem;

use super::{load_registry, read_file, CompileArgs};
use crate::report::{render_json, step_name};
use crate::{compile_documents, load_document, DocumentReport};

/// Compile every file and print its accessor chains.
pub fn compile_files(args: &CompileArgs) {
    let outcome = run(args);
    if args.json {
        match render_json(&outcome.registry, &outcome.reports) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: failed to render report: {e}");
                std::process::exit(1);
            }
        }
    } else {
        for report in &outcome.reports {
            if let Ok(compiled) = &report.result {
                print_chains(&outcome.registry, &report.name, compiled);
            }
        }
    }
    if outcome.failed {
        std::process::exit(1);
    }
}

/// Compile every file, reporting diagnostics only.
pub fn check_files(args: &CompileArgs) {
    let outcome = run(args);
    if outcome.failed {
        std::process::exit(1);
    }
    for report in &outcome.reports {
        if let Ok(compiled) = &report.result {
            println!("OK: {} ({} bindings)", report.name, compiled.chains.len());
        }
    }
}

struct Outcome {
    registry: uix_types::TypeRegistry,
    reports: Vec<DocumentReport>,
    failed: bool,
}

fn run(args: &CompileArgs) -> Outcome {
    if args.files.is_empty() {
        eprintln!("error: no markup documents given");
        std::process::exit(1);
    }
    let registry = load_registry(args.types.as_deref());
    let options = CompileOptions {
        design_mode: args.design_mode,
        ..CompileOptions::default()
    };

    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let mut emitter = TerminalEmitter::with_color_mode(std::io::stderr(), args.color, is_tty);
    let mut errors = 0;

    let mut documents: Vec<(String, Document)> = Vec::with_capacity(args.files.len());
    for path in &args.files {
        match load_document(&read_file(path), &registry) {
            Ok(doc) => documents.push((path.clone(), doc)),
            Err(e) => {
                eprintln!("error: {path}: {e}");
                errors += 1;
            }
        }
    }

    let reports = compile_documents(&registry, documents, &options);
    let mut warnings = 0;
    for report in &reports {
        let mut queue = DiagnosticQueue::new();
        for diag in report.diagnostics() {
            queue.add(diag);
        }
        errors += queue.error_count();
        let diagnostics = queue.flush();
        warnings += diagnostics.iter().filter(|d| !d.is_error()).count();
        if !diagnostics.is_empty() {
            emitter.set_file(report.name.as_str());
            emitter.emit_all(&diagnostics);
        }
    }
    if errors > 0 || warnings > 0 {
        emitter.emit_summary(errors, warnings);
    }
    emitter.flush();

    Outcome {
        registry,
        reports,
        failed: errors > 0,
    }
}

fn print_chains(types: &dyn TypeSystem, name: &str, compiled: &CompiledDocument) {
    println!("{name}:");
    for step in &compiled.root_steps {
        println!("  root: {}", step_name(*step));
    }
    for chain in &compiled.chains {
        let kind = match chain.kind {
            ChainKind::Binding => "binding",
            ChainKind::PropertyPath => "property path",
        };
        println!(
            "  {} {kind} -> {}",
            chain.location,
            types.type_name(chain.result_type)
        );
        for op in &chain.ops {
            println!("    {}", op.display(types));
        }
    }
}
