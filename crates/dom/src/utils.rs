use crate::types::{Id, Node};

/// Assign fresh ids to every node that still carries `Id(0)`, in document order.
pub fn assign_node_ids(root: &mut Node) {
    fn walk(node: &mut Node, next: &mut u32) {
        if node.id() == Id(0) {
            *next = next.wrapping_add(1);
            node.set_id(Id(*next));
        }
        if let Some(children) = node.children_mut() {
            for c in children {
                walk(c, next);
            }
        }
    }
    let mut next = 0;
    walk(root, &mut next);
}

pub fn find_node_by_id<'a>(node: &'a Node, id: Id) -> Option<&'a Node> {
    if node.id() == id {
        return Some(node);
    }
    for c in node.children() {
        if let Some(found) = find_node_by_id(c, id) {
            return Some(found);
        }
    }
    None
}

pub fn find_node_by_id_mut<'a>(node: &'a mut Node, id: Id) -> Option<&'a mut Node> {
    if node.id() == id {
        return Some(node);
    }
    if let Some(children) = node.children_mut() {
        for c in children {
            if let Some(found) = find_node_by_id_mut(c, id) {
                return Some(found);
            }
        }
    }
    None
}

/// Root-to-target chain of nodes, target last. `None` if `id` is not in the tree.
pub fn find_path_to<'a>(root: &'a Node, id: Id) -> Option<Vec<&'a Node>> {
    fn walk<'a>(node: &'a Node, id: Id, path: &mut Vec<&'a Node>) -> bool {
        path.push(node);
        if node.id() == id {
            return true;
        }
        for c in node.children() {
            if walk(c, id, path) {
                return true;
            }
        }
        path.pop();
        false
    }
    let mut path = Vec::new();
    if walk(root, id, &mut path) { Some(path) } else { None }
}

/// Attribute lookup, ASCII case-insensitive on the name.
pub fn attr<'a>(node: &'a Node, key: &str) -> Option<&'a str> {
    match node {
        Node::Element { attributes, .. } => attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .and_then(|(_, v)| v.as_deref()),
        _ => None,
    }
}

/// `true` when the attribute is present, with or without a value.
pub fn has_attr(node: &Node, key: &str) -> bool {
    match node {
        Node::Element { attributes, .. } => {
            attributes.iter().any(|(k, _)| k.eq_ignore_ascii_case(key))
        }
        _ => false,
    }
}

/// Visit every element in document order until the visitor returns `false`.
pub fn for_each_element<'a>(node: &'a Node, visit: &mut dyn FnMut(&'a Node) -> bool) -> bool {
    if node.is_element() && !visit(node) {
        return false;
    }
    for c in node.children() {
        if !for_each_element(c, visit) {
            return false;
        }
    }
    true
}

/// Collect concatenated text from `<style>` elements.
pub fn collect_style_texts(node: &Node, out: &mut String) {
    match node {
        Node::Element { name, children, .. } if name == "style" => {
            for c in children {
                if let Node::Text { text, .. } = c {
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
        _ => {
            for c in node.children() {
                collect_style_texts(c, out);
            }
        }
    }
}
