//! Canonical element addressing for the style editor.
//!
//! `resolve` turns a targeted element into a stable, minimal selector string;
//! `query` is the inverse, used both by the mutation log and by tests to
//! verify the round trip. Both are pure over a fixed tree.

mod classes;
mod escape;
mod query;
mod resolve;

pub use classes::{eligible_classes, is_selector_eligible};
pub use escape::{escape_attr_value, escape_ident};
pub use query::{Compound, SimpleSelector, parse_selector, query};
pub use resolve::resolve;

/// Author-assigned stable targeting attribute, checked before any structural
/// path is built.
pub const STABLE_TARGET_ATTR: &str = "data-restyle-id";

/// Test-targeting attribute, third in the priority order.
pub const TEST_TARGET_ATTR: &str = "data-testid";

/// Ancestor levels a path selector may span.
pub const MAX_PATH_DEPTH: usize = 5;

/// Class tokens kept per path segment.
pub const MAX_CLASSES_PER_SEGMENT: usize = 2;
