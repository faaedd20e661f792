//! Inline style access: the `style` attribute is the only presentation state
//! the editor mutates, and this module is the only place it is interpreted.
//!
//! Property names are kebab-case, as written in markup. An absent property is
//! distinct from one set to an empty value; callers that need "unset" must
//! use [`remove_inline_style`], not write `""`.

use crate::types::Node;

fn parse_style_attr(raw: &str) -> Vec<(String, String)> {
    raw.split(';')
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            Some((name, v.trim().to_string()))
        })
        .collect()
}

fn serialize_style_attr(entries: &[(String, String)]) -> String {
    entries
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join("; ")
}

fn set_attr(node: &mut Node, key: &str, value: String) {
    if let Node::Element { attributes, .. } = node {
        match attributes.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(key)) {
            Some((_, v)) => *v = Some(value),
            None => attributes.push((key.to_string(), Some(value))),
        }
    }
}

fn remove_attr(node: &mut Node, key: &str) {
    if let Node::Element { attributes, .. } = node {
        attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(key));
    }
}

/// All inline declarations on this element, in attribute order.
pub fn inline_style_entries(node: &Node) -> Vec<(String, String)> {
    crate::attr(node, "style").map(parse_style_attr).unwrap_or_default()
}

/// The inline value of one property, `None` when no inline declaration exists.
pub fn inline_style_value(node: &Node, prop: &str) -> Option<String> {
    inline_style_entries(node)
        .into_iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(prop))
        .map(|(_, v)| v)
}

/// Set one inline property, preserving the order of existing declarations.
pub fn set_inline_style(node: &mut Node, prop: &str, value: &str) {
    let mut entries = inline_style_entries(node);
    let prop = prop.to_ascii_lowercase();
    match entries.iter_mut().find(|(k, _)| *k == prop) {
        Some((_, v)) => *v = value.trim().to_string(),
        None => entries.push((prop, value.trim().to_string())),
    }
    set_attr(node, "style", serialize_style_attr(&entries));
}

/// Remove one inline property. Dropping the last declaration removes the
/// `style` attribute itself, so "no inline override" round-trips as absence.
pub fn remove_inline_style(node: &mut Node, prop: &str) {
    let mut entries = inline_style_entries(node);
    entries.retain(|(k, _)| !k.eq_ignore_ascii_case(prop));
    if entries.is_empty() {
        remove_attr(node, "style");
    } else {
        set_attr(node, "style", serialize_style_attr(&entries));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;
    use crate::utils::{find_node_by_id_mut, for_each_element};
    use crate::types::Id;

    fn first_div_id(dom: &Node) -> Id {
        let mut id = None;
        for_each_element(dom, &mut |el| {
            if el.tag_name() == Some("div") {
                id = Some(el.id());
                return false;
            }
            true
        });
        id.expect("div in fixture")
    }

    #[test]
    fn set_then_read_round_trips() {
        let mut dom = parse_document("<div></div>");
        let id = first_div_id(&dom);
        let el = find_node_by_id_mut(&mut dom, id).unwrap();
        set_inline_style(el, "color", "red");
        assert_eq!(inline_style_value(el, "color").as_deref(), Some("red"));
        assert_eq!(crate::attr(el, "style"), Some("color: red"));
    }

    #[test]
    fn set_overwrites_existing_declaration_in_place() {
        let mut dom = parse_document(r#"<div style="color: blue; margin: 4px"></div>"#);
        let id = first_div_id(&dom);
        let el = find_node_by_id_mut(&mut dom, id).unwrap();
        set_inline_style(el, "color", "red");
        assert_eq!(crate::attr(el, "style"), Some("color: red; margin: 4px"));
    }

    #[test]
    fn remove_last_declaration_drops_style_attribute() {
        let mut dom = parse_document(r#"<div style="color: blue"></div>"#);
        let id = first_div_id(&dom);
        let el = find_node_by_id_mut(&mut dom, id).unwrap();
        remove_inline_style(el, "color");
        assert_eq!(crate::attr(el, "style"), None);
        assert_eq!(inline_style_value(el, "color"), None);
    }

    #[test]
    fn absent_property_is_none_not_empty() {
        let dom = parse_document(r#"<div style="color: blue"></div>"#);
        let id = first_div_id(&dom);
        let el = crate::find_node_by_id(&dom, id).unwrap();
        assert_eq!(inline_style_value(el, "background-color"), None);
    }
}
