//! The mutation history stack: a command-pattern log of (target, before,
//! after) triples over string-addressed elements. Undo restores exact prior
//! inline state, including the absent-vs-empty distinction.

mod record;
mod stack;

pub use record::{PersistEntry, StyleChangeRecord};
pub use stack::{HistoryError, MutationLog, apply_persisted};
