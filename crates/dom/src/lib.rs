//! DOM substrate for the in-page style editor.
//!
//! A forgiving tag-soup parser plus the handful of tree operations the editor
//! needs: stable node ids, ancestor paths, attribute lookup, inline-style
//! mutation, and bounded markup serialization. This is deliberately not a
//! spec-grade HTML5 pipeline; the editor targets and mutates a document, it
//! does not render one.

mod builder;
mod inline;
mod serialize;
mod tokenizer;
mod types;
mod utils;

pub use builder::build_dom;
pub use inline::{inline_style_entries, inline_style_value, remove_inline_style, set_inline_style};
pub use serialize::serialize_markup;
pub use tokenizer::tokenize;
pub use types::{Id, Node, NodeId, Token};
pub use utils::{
    assign_node_ids, attr, collect_style_texts, find_node_by_id, find_node_by_id_mut,
    find_path_to, for_each_element, has_attr,
};

/// Parse markup into a DOM tree with node ids already assigned.
pub fn parse_document(input: &str) -> Node {
    let mut dom = build_dom(tokenize(input));
    assign_node_ids(&mut dom);
    dom
}
