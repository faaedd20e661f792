//! Stylesheet parsing, cascade, and display snapshots for the editor.

mod cascade;
mod names;
mod snapshot;
mod syntax;

pub use cascade::attach_styles;
pub use names::{camel_to_kebab, kebab_to_camel};
pub use snapshot::{is_snapshot_property, snapshot};
pub use syntax::{Declaration, Rule, Selector, Stylesheet, parse_declarations, parse_stylesheet};
