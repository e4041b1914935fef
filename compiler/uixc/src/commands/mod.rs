//! Command handlers for the `uixc` CLI.
//!
//! Each submodule implements one command. Argument parsing and file loading
//! shared between commands live here.

use uix_diagnostic::emitter::ColorMode;
use uix_types::TypeRegistry;

mod compile;
mod explain;

pub use compile::{check_files, compile_files};
pub use explain::explain_error;

/// Options shared by `compile` and `check`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileArgs {
    pub files: Vec<String>,
    pub types: Option<String>,
    pub design_mode: bool,
    pub json: bool,
    pub color: ColorMode,
}

/// Parse `compile`/`check` arguments (everything after the command name).
///
/// # Errors
///
/// Returns a message for unknown flags and malformed values.
pub fn parse_compile_args(args: &[String]) -> Result<CompileArgs, String> {
    let mut out = CompileArgs::default();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if arg == "--types" || arg == "-t" {
            let Some(path) = args.get(i + 1) else {
                return Err(format!("missing value for `{arg}`"));
            };
            out.types = Some(path.clone());
            i += 2;
            continue;
        }
        if let Some(path) = arg.strip_prefix("--types=") {
            out.types = Some(path.to_string());
        } else if arg == "--design" {
            out.design_mode = true;
        } else if arg == "--json" {
            out.json = true;
        } else if let Some(mode) = arg.strip_prefix("--color=") {
            out.color = match mode {
                "auto" => ColorMode::Auto,
                "always" => ColorMode::Always,
                "never" => ColorMode::Never,
                _ => return Err(format!("invalid color mode `{mode}`; expected auto, always or never")),
            };
        } else if arg.starts_with('-') {
            return Err(format!("unknown option `{arg}`"));
        } else {
            out.files.push(arg.to_string());
        }
        i += 1;
    }
    Ok(out)
}

pub(super) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Load the type registry named by `--types`, exiting on failure.
pub(super) fn load_registry(path: Option<&str>) -> TypeRegistry {
    let Some(path) = path else {
        eprintln!("error: missing type registry");
        eprintln!("Pass the registry with `--types <types.json>`.");
        std::process::exit(1);
    };
    match TypeRegistry::from_json(&read_file(path)) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("error: {path}: {e}");
            std::process::exit(1);
        }
    }
}
