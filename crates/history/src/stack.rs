use crate::record::{PersistEntry, StyleChangeRecord};
use dom::{Node, find_node_by_id_mut, inline_style_value, remove_inline_style, set_inline_style};
use selector::query;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryError {
    /// The selector no longer resolves to a live element.
    ElementNotFound { selector: String },
    /// Nothing to revert.
    Empty,
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::ElementNotFound { selector } => {
                write!(f, "element not found: {selector}")
            }
            HistoryError::Empty => write!(f, "no style changes to revert"),
        }
    }
}

impl std::error::Error for HistoryError {}

/// Append-only ledger of style mutations for one editing session.
///
/// Insertion order is application order; reverting strictly in reverse order
/// restores every touched property to the value it held before the reverted
/// suffix first touched it. The log is the only component that writes inline
/// styles during editing; loaded persisted styles go through
/// [`apply_persisted`] and never enter the log.
#[derive(Debug, Default)]
pub struct MutationLog {
    records: Vec<StyleChangeRecord>,
}

impl MutationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[StyleChangeRecord] {
        &self.records
    }

    /// Apply a style-change map to the element addressed by `selector`.
    ///
    /// Captures each touched property's current inline value (missing
    /// declarations become `""`), writes the new values, and appends a
    /// record. On resolution failure nothing is mutated and nothing is
    /// recorded. Returns the number of properties changed.
    pub fn apply(
        &mut self,
        dom: &mut Node,
        selector: &str,
        changes: &BTreeMap<String, String>,
    ) -> Result<usize, HistoryError> {
        let Some(id) = query(dom, selector) else {
            return Err(HistoryError::ElementNotFound {
                selector: selector.to_string(),
            });
        };
        let Some(element) = find_node_by_id_mut(dom, id) else {
            return Err(HistoryError::ElementNotFound {
                selector: selector.to_string(),
            });
        };

        let mut original_styles = BTreeMap::new();
        for (camel, value) in changes {
            let kebab = style::camel_to_kebab(camel);
            let original = inline_style_value(element, &kebab).unwrap_or_default();
            original_styles.insert(camel.clone(), original);
            set_inline_style(element, &kebab, value);
        }
        let count = changes.len();
        log::debug!(
            target: "history.log",
            "applied {count} properties to {selector}"
        );
        self.records.push(StyleChangeRecord {
            selector: selector.to_string(),
            original_styles,
            applied_styles: changes.clone(),
        });
        Ok(count)
    }

    /// Revert the most recent record.
    ///
    /// The record is removed from the log even when its selector no longer
    /// resolves: the target is gone, so there is nothing left to restore and
    /// keeping the record would wedge the stack.
    pub fn revert_last(&mut self, dom: &mut Node) -> Result<(), HistoryError> {
        let record = self.records.pop().ok_or(HistoryError::Empty)?;
        revert_record(dom, &record)
    }

    /// Revert every record from the end of the log down to and including
    /// `index`, in strict reverse order, truncating the log to `index`.
    ///
    /// Resolution failures are reported (first one wins) but do not stop the
    /// cascade; the log is always truncated.
    pub fn revert_to_index(&mut self, dom: &mut Node, index: usize) -> Result<usize, HistoryError> {
        let mut first_error = None;
        let mut reverted = 0;
        while self.records.len() > index {
            let record = match self.records.pop() {
                Some(r) => r,
                None => break,
            };
            match revert_record(dom, &record) {
                Ok(()) => reverted += 1,
                Err(e) => {
                    log::warn!(target: "history.log", "revert skipped: {e}");
                    first_error.get_or_insert(e);
                }
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(reverted),
        }
    }

    /// Render the log as stylesheet text: a timestamp header, then one
    /// single-line block per record with kebab-cased property names. Pure
    /// serialization; the live DOM is not consulted.
    pub fn export_stylesheet(&self, unix_ts: u64) -> String {
        let mut out = format!("/* style edits exported at {unix_ts} (unix) */\n");
        for record in &self.records {
            let body = record
                .applied_styles
                .iter()
                .map(|(camel, value)| format!("{}: {value};", style::camel_to_kebab(camel)))
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(&format!("{} {{ {body} }}\n", record.selector));
        }
        out
    }

    /// Minimal round-trippable state for the persistence backend.
    pub fn serialize(&self) -> Vec<PersistEntry> {
        self.records
            .iter()
            .map(|r| PersistEntry {
                selector: r.selector.clone(),
                styles: r.applied_styles.clone(),
            })
            .collect()
    }
}

fn revert_record(dom: &mut Node, record: &StyleChangeRecord) -> Result<(), HistoryError> {
    let Some(id) = query(dom, &record.selector) else {
        return Err(HistoryError::ElementNotFound {
            selector: record.selector.clone(),
        });
    };
    let Some(element) = find_node_by_id_mut(dom, id) else {
        return Err(HistoryError::ElementNotFound {
            selector: record.selector.clone(),
        });
    };
    for (camel, original) in &record.original_styles {
        let kebab = style::camel_to_kebab(camel);
        if original.is_empty() {
            remove_inline_style(element, &kebab);
        } else {
            set_inline_style(element, &kebab, original);
        }
    }
    Ok(())
}

/// Direct apply of persisted entries, bypassing the log: restored state is
/// the session's new baseline and is not individually undoable. Returns the
/// number of entries that resolved and applied; failures are logged.
pub fn apply_persisted(dom: &mut Node, entries: &[PersistEntry]) -> usize {
    let mut applied = 0;
    for entry in entries {
        let Some(id) = query(dom, &entry.selector) else {
            log::warn!(
                target: "history.persist",
                "persisted selector did not resolve: {}",
                entry.selector
            );
            continue;
        };
        let Some(element) = find_node_by_id_mut(dom, id) else {
            continue;
        };
        for (camel, value) in &entry.styles {
            set_inline_style(element, &style::camel_to_kebab(camel), value);
        }
        applied += 1;
    }
    applied
}
