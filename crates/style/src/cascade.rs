//! Cascade resolution: write each element's winning stylesheet declarations
//! into its `style` slot.
//!
//! Inline styles are intentionally not folded in here: the snapshot overlays
//! the *current* inline value at read time, so cascade results stay valid
//! across inline mutations.

use crate::syntax::{Selector, Stylesheet};
use dom::Node;
use std::collections::BTreeMap;

/// Walk the tree and resolve the sheet against every element.
pub fn attach_styles(dom: &mut Node, sheet: &Stylesheet) {
    if dom.is_element() {
        let resolved = winning_declarations(dom, sheet);
        if let Node::Element { style, .. } = dom {
            *style = resolved;
        }
    }
    if let Some(children) = dom.children_mut() {
        for child in children {
            attach_styles(child, sheet);
        }
    }
}

// Per property: highest specificity wins, later rule breaks ties. A rule
// matching through several of its selectors counts once, at its strongest.
fn winning_declarations(element: &Node, sheet: &Stylesheet) -> Vec<(String, String)> {
    let mut winners: BTreeMap<&str, ((u8, u8, u8), usize, &str)> = BTreeMap::new();
    for (order, rule) in sheet.rules.iter().enumerate() {
        let strongest = rule
            .selectors
            .iter()
            .filter(|s| s.matches(element))
            .map(Selector::specificity)
            .max();
        let Some(specificity) = strongest else {
            continue;
        };
        for declaration in &rule.declarations {
            let incumbent = winners.get(declaration.name.as_str());
            if incumbent.is_none_or(|&(s, o, _)| (specificity, order) >= (s, o)) {
                winners.insert(
                    declaration.name.as_str(),
                    (specificity, order, declaration.value.as_str()),
                );
            }
        }
    }
    winners
        .into_iter()
        .map(|(name, (_, _, value))| (name.to_string(), value.to_string()))
        .collect()
}
