use crate::types::{Id, Node, Token};

struct OpenElement {
    name: String,
    attributes: Vec<(String, Option<String>)>,
    children: Vec<Node>,
}

impl OpenElement {
    fn into_node(self) -> Node {
        Node::Element {
            id: Id(0),
            name: self.name,
            attributes: self.attributes,
            style: Vec::new(),
            children: self.children,
        }
    }
}

fn attach(open: &mut Vec<OpenElement>, document_children: &mut Vec<Node>, node: Node) {
    match open.last_mut() {
        Some(frame) => frame.children.push(node),
        None => document_children.push(node),
    }
}

fn close_top(open: &mut Vec<OpenElement>, document_children: &mut Vec<Node>) {
    if let Some(frame) = open.pop() {
        let node = frame.into_node();
        attach(open, document_children, node);
    }
}

/// Elements that implicitly close an open sibling of the same tag when a new
/// start tag arrives (`<li>a<li>b`, unclosed `<p>` runs).
fn closes_same_tag_sibling(name: &str) -> bool {
    matches!(name, "li" | "p" | "td" | "th" | "tr" | "option")
}

/// Build a DOM tree from a token list. Unclosed elements are closed at end of
/// input; end tags with no matching open element are dropped.
pub fn build_dom(tokens: Vec<Token>) -> Node {
    let mut doctype = None;
    let mut open: Vec<OpenElement> = Vec::new();
    let mut document_children: Vec<Node> = Vec::new();

    for token in tokens {
        match token {
            Token::Doctype(s) => {
                if doctype.is_none() {
                    doctype = Some(s);
                }
            }
            Token::Comment(text) => {
                attach(&mut open, &mut document_children, Node::Comment { id: Id(0), text });
            }
            Token::Text(text) => {
                if !text.is_empty() {
                    attach(&mut open, &mut document_children, Node::Text { id: Id(0), text });
                }
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                if closes_same_tag_sibling(&name)
                    && open.last().is_some_and(|f| f.name == name)
                {
                    close_top(&mut open, &mut document_children);
                }
                if self_closing {
                    attach(
                        &mut open,
                        &mut document_children,
                        Node::Element {
                            id: Id(0),
                            name,
                            attributes,
                            style: Vec::new(),
                            children: Vec::new(),
                        },
                    );
                } else {
                    open.push(OpenElement {
                        name,
                        attributes,
                        children: Vec::new(),
                    });
                }
            }
            Token::EndTag(name) => {
                let matches_open = open.iter().rev().any(|f| f.name == name);
                if !matches_open {
                    log::trace!(target: "dom.builder", "dropping unmatched end tag </{name}>");
                    continue;
                }
                loop {
                    let done = open.last().is_some_and(|f| f.name == name);
                    close_top(&mut open, &mut document_children);
                    if done {
                        break;
                    }
                }
            }
        }
    }

    while !open.is_empty() {
        close_top(&mut open, &mut document_children);
    }

    Node::Document {
        id: Id(0),
        doctype,
        children: document_children,
    }
}
