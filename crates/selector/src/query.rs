//! Inverse lookup: canonical selector string back to a live element.
//!
//! The grammar accepted here is exactly what `resolve` emits: a single id,
//! attribute-equality, or a descendant chain of compound segments built from
//! tag names, classes, and `:nth-of-type`. First match in document order wins.

use crate::escape::unescape_at;
use dom::{Id, Node, attr};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimpleSelector {
    Tag(String),
    Id(String),
    Class(String),
    AttrEquals { name: String, value: String },
    NthOfType(usize),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    pub parts: Vec<SimpleSelector>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// Parse a selector into descendant-combined compounds. `None` on anything
/// outside the emitted grammar.
pub fn parse_selector(input: &str) -> Option<Vec<Compound>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    let mut compounds = Vec::new();
    let mut current = Compound::default();
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < input.len() {
        match bytes[i] {
            b' ' | b'\t' => {
                if !current.is_empty() {
                    compounds.push(std::mem::take(&mut current));
                }
                i += 1;
            }
            b'#' => {
                let (ident, next) = read_ident(input, i + 1)?;
                current.parts.push(SimpleSelector::Id(ident));
                i = next;
            }
            b'.' => {
                let (ident, next) = read_ident(input, i + 1)?;
                current.parts.push(SimpleSelector::Class(ident));
                i = next;
            }
            b'[' => {
                let (part, next) = read_attr_equals(input, i + 1)?;
                current.parts.push(part);
                i = next;
            }
            b':' => {
                let rest = &input[i + 1..];
                let inner = rest.strip_prefix("nth-of-type(")?;
                let close = inner.find(')')?;
                let n: usize = inner[..close].trim().parse().ok()?;
                if n == 0 {
                    return None;
                }
                current.parts.push(SimpleSelector::NthOfType(n));
                i += 1 + "nth-of-type(".len() + close + 1;
            }
            _ => {
                let (ident, next) = read_ident(input, i)?;
                current.parts.push(SimpleSelector::Tag(ident.to_ascii_lowercase()));
                i = next;
            }
        }
    }
    if !current.is_empty() {
        compounds.push(current);
    }
    if compounds.is_empty() { None } else { Some(compounds) }
}

/// Read an identifier (honoring escapes) starting at `i`; stops at selector
/// structure characters. Empty identifiers are a parse error.
fn read_ident(input: &str, i: usize) -> Option<(String, usize)> {
    let mut out = String::new();
    let mut i = i;
    while i < input.len() {
        let b = input.as_bytes()[i];
        if b == b'\\' {
            let (ch, next) = unescape_at(input, i);
            out.push(ch);
            i = next;
            continue;
        }
        if matches!(b, b' ' | b'\t' | b'.' | b'#' | b'[' | b':') {
            break;
        }
        let ch = input[i..].chars().next()?;
        out.push(ch);
        i += ch.len_utf8();
    }
    if out.is_empty() { None } else { Some((out, i)) }
}

fn read_attr_equals(input: &str, i: usize) -> Option<(SimpleSelector, usize)> {
    let eq = input[i..].find('=')? + i;
    let name = input[i..eq].trim().to_ascii_lowercase();
    if name.is_empty() {
        return None;
    }
    let mut j = eq + 1;
    if input.as_bytes().get(j) != Some(&b'"') {
        return None;
    }
    j += 1;
    let mut value = String::new();
    while j < input.len() {
        let b = input.as_bytes()[j];
        if b == b'\\' && j + 1 < input.len() {
            let next = input[j + 1..].chars().next()?;
            value.push(next);
            j += 1 + next.len_utf8();
            continue;
        }
        if b == b'"' {
            j += 1;
            if input.as_bytes().get(j) != Some(&b']') {
                return None;
            }
            return Some((SimpleSelector::AttrEquals { name, value }, j + 1));
        }
        let ch = input[j..].chars().next()?;
        value.push(ch);
        j += ch.len_utf8();
    }
    None
}

struct ElementCtx<'a> {
    node: &'a Node,
    /// 1-based position among same-tag element siblings.
    nth_of_type: usize,
}

fn matches_compound(ctx: &ElementCtx<'_>, compound: &Compound) -> bool {
    let el = ctx.node;
    compound.parts.iter().all(|part| match part {
        SimpleSelector::Tag(tag) => el.tag_name() == Some(tag.as_str()),
        SimpleSelector::Id(want) => attr(el, "id") == Some(want.as_str()),
        SimpleSelector::Class(want) => attr(el, "class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == want)),
        SimpleSelector::AttrEquals { name, value } => attr(el, name) == Some(value.as_str()),
        SimpleSelector::NthOfType(n) => ctx.nth_of_type == *n,
    })
}

/// Ancestors run nearest-first; descendant combinators match greedily.
fn ancestors_match(ancestors: &[ElementCtx<'_>], compounds: &[Compound]) -> bool {
    let mut remaining = compounds.iter().rev();
    let mut want = remaining.next();
    for ancestor in ancestors.iter().rev() {
        let Some(compound) = want else { return true };
        if matches_compound(ancestor, compound) {
            want = remaining.next();
        }
    }
    want.is_none()
}

/// Find the first element in document order matching `selector`.
pub fn query(root: &Node, selector: &str) -> Option<Id> {
    let compounds = parse_selector(selector)?;
    let (last, prefix) = compounds.split_last()?;

    fn walk<'a>(
        node: &'a Node,
        chain: &mut Vec<ElementCtx<'a>>,
        last: &Compound,
        prefix: &[Compound],
    ) -> Option<Id> {
        let mut same_tag_seen: std::collections::HashMap<&str, usize> =
            std::collections::HashMap::new();
        for child in node.children() {
            let Some(tag) = child.tag_name() else { continue };
            let nth = same_tag_seen.entry(tag).and_modify(|n| *n += 1).or_insert(1);
            let ctx = ElementCtx {
                node: child,
                nth_of_type: *nth,
            };
            if matches_compound(&ctx, last) && ancestors_match(chain, prefix) {
                return Some(child.id());
            }
            chain.push(ctx);
            if let Some(found) = walk(child, chain, last, prefix) {
                return Some(found);
            }
            chain.pop();
        }
        None
    }

    let mut chain = Vec::new();
    walk(root, &mut chain, last, prefix)
}
