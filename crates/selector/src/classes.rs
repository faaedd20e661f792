//! Utility-class filtering for path segments.
//!
//! Breakpoint/variant-prefixed classes (`sm:hidden`, `hover:scale-105`) and
//! arbitrary-value utility classes (`bg-[#fff]`, `w-1/2`) encode presentation
//! state, not identity, and shift freely between builds. They never make it
//! into a path selector.

/// Characters that disqualify a class token from selector use. The colon
/// covers every breakpoint and variant prefix.
const DISQUALIFYING: &[char] = &[':', '[', ']', '(', ')', '/', '#'];

pub fn is_selector_eligible(class: &str) -> bool {
    !class.is_empty() && !class.contains(DISQUALIFYING)
}

/// Split a `class` attribute value into selector-eligible tokens, in order.
pub fn eligible_classes(class_attr: &str) -> Vec<&str> {
    class_attr
        .split_whitespace()
        .filter(|c| is_selector_eligible(c))
        .collect()
}
