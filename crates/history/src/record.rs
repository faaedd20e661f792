use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One apply operation's before/after state for a single element.
///
/// Records are immutable once pushed onto the log; they leave it only by
/// truncation. Property keys are camelCase. An `original_styles` value of
/// `""` means "no inline declaration existed", which reverts to *removing*
/// the property, not writing an empty value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleChangeRecord {
    pub selector: String,
    pub original_styles: BTreeMap<String, String>,
    pub applied_styles: BTreeMap<String, String>,
}

/// The minimal round-trippable unit sent to the persistence backend:
/// originals are session-local and never leave the process.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistEntry {
    pub selector: String,
    pub styles: BTreeMap<String, String>,
}
