//! Stylesheet syntax for the cascade the snapshot reads from.
//!
//! Embedded sheets are parsed into flat rules over the selector forms that
//! matter for per-element resolution: universal, tag, class, and id. Anything
//! richer (combinators, pseudo-classes, at-rules) is skipped rather than
//! rejected; a block that yields no usable selectors or declarations simply
//! contributes nothing. Declarations use the same `name: value` splitting as
//! the inline `style` attribute, kebab-case names lowercased.

use dom::Node;

/// One `name: value` pair, kebab-case name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

/// A selector form the cascade can match against a single element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Universal,
    Type(String),
    Class(String),
    Id(String),
}

impl Selector {
    /// (id, class, type) counts; for these flat forms each is 0 or 1.
    pub fn specificity(&self) -> (u8, u8, u8) {
        match self {
            Selector::Universal => (0, 0, 0),
            Selector::Type(_) => (0, 0, 1),
            Selector::Class(_) => (0, 1, 0),
            Selector::Id(_) => (1, 0, 0),
        }
    }

    pub fn matches(&self, element: &Node) -> bool {
        match self {
            Selector::Universal => element.is_element(),
            Selector::Type(tag) => element.tag_name() == Some(tag.as_str()),
            Selector::Id(want) => dom::attr(element, "id") == Some(want.as_str()),
            Selector::Class(want) => dom::attr(element, "class")
                .is_some_and(|list| list.split_whitespace().any(|c| c == want)),
        }
    }

    fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token == "*" {
            return Some(Selector::Universal);
        }
        if let Some(id) = token.strip_prefix('#') {
            return (!id.is_empty()).then(|| Selector::Id(id.to_string()));
        }
        if let Some(class) = token.strip_prefix('.') {
            return (!class.is_empty()).then(|| Selector::Class(class.to_string()));
        }
        let plain_tag = !token.is_empty()
            && token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        plain_tag.then(|| Selector::Type(token.to_ascii_lowercase()))
    }
}

#[derive(Debug)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

#[derive(Debug, Default)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
}

pub fn parse_stylesheet(input: &str) -> Stylesheet {
    // every rule block ends at '}', so splitting there makes each candidate
    // "selector-list { declarations" or garbage to be skipped
    Stylesheet {
        rules: input.split('}').filter_map(parse_rule).collect(),
    }
}

fn parse_rule(block: &str) -> Option<Rule> {
    let (selector_list, body) = block.split_once('{')?;
    let selectors: Vec<Selector> = selector_list.split(',').filter_map(Selector::parse).collect();
    let declarations = parse_declarations(body);
    if selectors.is_empty() || declarations.is_empty() {
        return None;
    }
    Some(Rule {
        selectors,
        declarations,
    })
}

pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            (!name.is_empty()).then(|| Declaration {
                name,
                value: value.trim().to_string(),
            })
        })
        .collect()
}
