//! The `explain` command: describe a diagnostic code.

use uix_diagnostic::ErrorCode;

pub fn explain_error(code_str: &str) {
    let Ok(code) = code_str.parse::<ErrorCode>() else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX (errors) or WXXXX (warnings) where X is a digit.");
        eprintln!("Examples: E1001, E2001, E4001, W2001");
        std::process::exit(1);
    };

    let kind = if code.is_warning() { "warning" } else { "error" };
    println!("{code}: {}", code.description());
    println!();
    println!("{}", details(code));
    println!();
    println!("This {kind} is reported at the markup location that triggered it.");
}

fn details(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::E1001 => {
            "A binding path or property path does not follow the path grammar. \
             Check for unbalanced parentheses or brackets, a stray `.`, or a \
             cast without a type."
        }
        ErrorCode::E2001 => {
            "A binding names more than one source. `ElementName`, `Source`, \
             `RelativeSource` and a source written in the path (`#name`, \
             `$self`, `$parent`) are mutually exclusive."
        }
        ErrorCode::E2002 => {
            "An ancestor source could not be resolved. Set `AncestorType`, or \
             make sure the markup tree has enough ancestors of that type."
        }
        ErrorCode::E2003 => {
            "A binding source property has a value of the wrong shape, such as \
             an unknown `RelativeSource` mode or a negative `AncestorLevel`."
        }
        ErrorCode::E2004 => "No element in the document declares the referenced name.",
        ErrorCode::E3001 => {
            "`TemplatedParent` is only valid inside a control template, and a \
             property path needs an enclosing element that declares a target type."
        }
        ErrorCode::E3002 => "The property does not exist on the type the path has reached.",
        ErrorCode::E3003 => "The type name is not known to the type registry.",
        ErrorCode::E4001 => {
            "The binding reads its data context, but no data context type is \
             known. Add `x:DataType` to the element or to an enclosing element."
        }
        ErrorCode::E9001 => "The compiler reached an inconsistent state. Please report it.",
        ErrorCode::W2001 => {
            "Two elements declare the same name. Bindings by name resolve to \
             the first declaration."
        }
    }
}
