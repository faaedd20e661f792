use crate::classes::eligible_classes;
use crate::escape::{escape_attr_value, escape_ident};
use crate::{MAX_CLASSES_PER_SEGMENT, MAX_PATH_DEPTH, STABLE_TARGET_ATTR, TEST_TARGET_ATTR};
use dom::{Id, Node, attr, find_path_to};

/// Produce the canonical selector for the element with the given id.
///
/// Priority: unique `id` attribute, then the author-assigned stable targeting
/// attribute, then the test-targeting attribute, then a depth-capped path of
/// structural segments, then the bare tag name. Deterministic for a fixed
/// tree; not stable across structural edits.
///
/// Returns `None` when the id does not name an element in this tree.
pub fn resolve(root: &Node, target: Id) -> Option<String> {
    let path = find_path_to(root, target)?;
    let element = *path.last()?;
    let tag = element.tag_name()?;

    if let Some(id_attr) = attr(element, "id")
        && !id_attr.is_empty()
    {
        return Some(format!("#{}", escape_ident(id_attr)));
    }
    for attr_name in [STABLE_TARGET_ATTR, TEST_TARGET_ATTR] {
        if let Some(value) = attr(element, attr_name)
            && !value.is_empty()
        {
            return Some(format!("[{attr_name}=\"{}\"]", escape_attr_value(value)));
        }
    }

    let mut segments: Vec<String> = Vec::new();
    // path is root..=target; walk it backwards in (parent, child) pairs so
    // each level can see its siblings for nth-of-type.
    for pair in path.windows(2).rev() {
        let (parent, el) = (pair[0], pair[1]);
        let Some(tag) = el.tag_name() else { break };
        if tag == "body" || tag == "html" {
            break;
        }
        segments.push(path_segment(parent, el, tag));
        if segments.len() == MAX_PATH_DEPTH {
            break;
        }
    }

    if segments.is_empty() {
        return Some(tag.to_string());
    }
    segments.reverse();
    Some(segments.join(" "))
}

fn path_segment(parent: &Node, el: &Node, tag: &str) -> String {
    let class_attr = attr(el, "class").unwrap_or("");
    let classes = eligible_classes(class_attr);
    if !classes.is_empty() {
        let mut segment = tag.to_string();
        for class in classes.iter().take(MAX_CLASSES_PER_SEGMENT) {
            segment.push('.');
            segment.push_str(&escape_ident(class));
        }
        return segment;
    }

    let same_tag: Vec<&Node> = parent
        .children()
        .iter()
        .filter(|c| c.tag_name() == Some(tag))
        .collect();
    if same_tag.len() > 1 {
        let position = same_tag
            .iter()
            .position(|c| c.id() == el.id())
            .map(|i| i + 1)
            .unwrap_or(1);
        return format!("{tag}:nth-of-type({position})");
    }
    tag.to_string()
}
