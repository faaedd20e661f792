//! Bounded markup serialization for display snapshots.

use crate::tokenizer::is_void_element;
use crate::types::Node;

const TRUNCATION_MARKER: &str = "\u{2026}";

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Document { children, .. } => {
            for c in children {
                write_node(c, out);
            }
        }
        Node::Element {
            name,
            attributes,
            children,
            ..
        } => {
            out.push('<');
            out.push_str(name);
            for (k, v) in attributes {
                out.push(' ');
                out.push_str(k);
                if let Some(v) = v {
                    out.push_str("=\"");
                    out.push_str(&v.replace('"', "&quot;"));
                    out.push('"');
                }
            }
            out.push('>');
            if is_void_element(name) {
                return;
            }
            for c in children {
                write_node(c, out);
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        Node::Text { text, .. } => out.push_str(text),
        Node::Comment { text, .. } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

/// Serialize a subtree to markup, truncated to at most `byte_cap` bytes on a
/// char boundary. The cap keeps snapshots of huge subtrees bounded; truncated
/// output ends with an ellipsis and is for display only, never re-parsed.
pub fn serialize_markup(node: &Node, byte_cap: usize) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    if out.len() <= byte_cap {
        return out;
    }
    let mut cut = byte_cap.saturating_sub(TRUNCATION_MARKER.len());
    while cut > 0 && !out.is_char_boundary(cut) {
        cut -= 1;
    }
    out.truncate(cut);
    out.push_str(TRUNCATION_MARKER);
    out
}
