//! UIXML Compiler CLI

use uixc::commands::{check_files, compile_files, explain_error, parse_compile_args};

fn main() {
    uixc::init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "compile" | "check" => {
            if args.len() < 3 {
                eprintln!("Usage: uixc {command} <doc.json>... --types <types.json> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  -t, --types <path>   Type registry (JSON)");
                eprintln!("  --design             Keep design-time (d:) properties");
                eprintln!("  --json               Print a JSON report to stdout");
                eprintln!("  --color=<mode>       Diagnostics color: auto, always, never");
                std::process::exit(1);
            }

            let options = match parse_compile_args(&args[2..]) {
                Ok(options) => options,
                Err(message) => {
                    eprintln!("error: {message}");
                    std::process::exit(1);
                }
            };

            if command == "compile" {
                compile_files(&options);
            } else {
                check_files(&options);
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("UIXML Compiler {}", env!("CARGO_PKG_VERSION"));
        }
        "--explain" | "explain" => {
            if args.len() < 3 {
                eprintln!("Usage: uixc --explain <ERROR_CODE>");
                eprintln!("Example: uixc --explain E2001");
                std::process::exit(1);
            }
            explain_error(&args[2]);
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("UIXML Compiler");
    println!();
    println!("Usage: uixc <command> [options]");
    println!();
    println!("Commands:");
    println!("  compile <doc.json>...  Compile bindings and print accessor chains");
    println!("  check <doc.json>...    Compile bindings, reporting diagnostics only");
    println!("  --explain <code>       Explain an error code (e.g., E2001)");
    println!("  help                   Show this help message");
    println!("  version                Show version information");
    println!();
    println!("Compile options:");
    println!("  -t, --types <path>     Type registry (JSON)");
    println!("  --design               Keep design-time (d:) properties");
    println!("  --json                 Print a JSON report to stdout");
    println!("  --color=<mode>         Diagnostics color: auto, always, never");
}
