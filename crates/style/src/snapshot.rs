//! Display-oriented style snapshots.
//!
//! A snapshot is a compact summary of what visibly styles an element right
//! now, keyed by camelCase property name. It feeds the selection context and
//! the suggestion bridge; it is never the basis for undo, which works from
//! inline values captured at mutation time.

use crate::names::{camel_to_kebab, kebab_to_camel};
use dom::{Node, inline_style_value};
use std::collections::BTreeMap;

/// Properties worth showing, spanning layout, spacing, sizing, visual,
/// typography, and effects. Kebab-case, matching markup.
const SNAPSHOT_PROPERTIES: &[&str] = &[
    // layout
    "display",
    "position",
    "top",
    "left",
    "z-index",
    "overflow",
    "flex-direction",
    "justify-content",
    "align-items",
    "gap",
    // spacing
    "margin",
    "margin-top",
    "margin-bottom",
    "padding",
    "padding-top",
    "padding-bottom",
    // sizing
    "width",
    "height",
    "min-width",
    "max-width",
    "min-height",
    "max-height",
    // visual
    "background-color",
    "background-image",
    "border",
    "border-radius",
    "box-shadow",
    "filter",
    "opacity",
    // typography
    "color",
    "font-size",
    "font-weight",
    "font-family",
    "line-height",
    "text-align",
    "letter-spacing",
    "text-decoration",
    // effects
    "transform",
    "transition",
];

/// Values that carry no information in a summary.
const UNINTERESTING_DEFAULTS: &[&str] = &["none", "normal", "auto"];

fn is_interesting(value: &str) -> bool {
    !value.is_empty() && !UNINTERESTING_DEFAULTS.contains(&value)
}

fn cascade_value<'a>(node: &'a Node, prop: &str) -> Option<&'a str> {
    match node {
        Node::Element { style, .. } => style
            .iter()
            .find(|(k, _)| k == prop)
            .map(|(_, v)| v.as_str()),
        _ => None,
    }
}

/// Capture the allow-listed style summary for one element. Resolution per
/// property: current inline value first, then the cascaded stylesheet value.
/// Keys are camelCase; uninteresting defaults are dropped.
pub fn snapshot(element: &Node) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for prop in SNAPSHOT_PROPERTIES {
        let resolved = inline_style_value(element, prop)
            .or_else(|| cascade_value(element, prop).map(str::to_string));
        if let Some(value) = resolved
            && is_interesting(&value)
        {
            out.insert(kebab_to_camel(prop), value);
        }
    }
    out
}

/// `true` when a camelCase property name is on the snapshot allow-list.
pub fn is_snapshot_property(camel_name: &str) -> bool {
    let kebab = camel_to_kebab(camel_name);
    SNAPSHOT_PROPERTIES.contains(&kebab.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascade::attach_styles;
    use crate::syntax::parse_stylesheet;
    use dom::{find_node_by_id, for_each_element, parse_document};

    fn snapshot_of(markup: &str, sheet: &str, tag: &str) -> BTreeMap<String, String> {
        let mut dom = parse_document(markup);
        attach_styles(&mut dom, &parse_stylesheet(sheet));
        let mut id = None;
        for_each_element(&dom, &mut |el| {
            if el.tag_name() == Some(tag) {
                id = Some(el.id());
                return false;
            }
            true
        });
        snapshot(find_node_by_id(&dom, id.expect("tag in fixture")).unwrap())
    }

    #[test]
    fn inline_value_overrides_cascade() {
        let snap = snapshot_of(
            r#"<div style="color: red"></div>"#,
            "div { color: blue; font-size: 14px }",
            "div",
        );
        assert_eq!(snap.get("color").map(String::as_str), Some("red"));
        assert_eq!(snap.get("fontSize").map(String::as_str), Some("14px"));
    }

    #[test]
    fn uninteresting_defaults_are_dropped() {
        let snap = snapshot_of(
            "<div></div>",
            "div { filter: none; font-weight: normal; width: auto; color: black }",
            "div",
        );
        assert!(!snap.contains_key("filter"));
        assert!(!snap.contains_key("fontWeight"));
        assert!(!snap.contains_key("width"));
        assert_eq!(snap.get("color").map(String::as_str), Some("black"));
    }

    #[test]
    fn properties_off_the_allow_list_are_ignored() {
        let snap = snapshot_of("<div></div>", "div { cursor: pointer }", "div");
        assert!(snap.is_empty());
    }

    #[test]
    fn keys_are_camel_case() {
        let snap = snapshot_of(
            "<div></div>",
            "div { background-color: teal; border-radius: 8px }",
            "div",
        );
        assert!(snap.contains_key("backgroundColor"));
        assert!(snap.contains_key("borderRadius"));
    }
}
