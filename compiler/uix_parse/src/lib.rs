//! Grammars for the text embedded in markup attributes.
//!
//! Two independent mini-languages:
//! - [`parse_binding_path`]: compiled binding paths (`!#input.Text`,
//!   `$parent[ListBox].(Grid.Row)`).
//! - [`parse_property_path`]: style and template property paths
//!   (`Background.Color`, `Content:as(TextBlock).Text`).
//!
//! Both are pure: the same text always yields the same syntax. Neither
//! touches the type system; type names are kept as written and resolved by
//! the transformer pipeline. Spans are byte offsets into the parsed text.

mod binding;
mod cursor;
mod error;
mod property_path;

pub use binding::{parse_binding_path, BindingExpr, BindingSegment, SegmentKind};
pub use error::SyntaxError;
pub use property_path::{
    parse_property_path, print_property_path, PropertyPathSegment, PropertyPathSegmentKind,
};
