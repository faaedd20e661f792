use layout::Rect;
use std::collections::BTreeMap;

/// Everything captured about the selected element at click time.
///
/// The selector is the durable handle; the rest is display context. Only
/// `bounding_box` is refreshed afterwards (on scroll and resize), the
/// snapshots stay as taken.
#[derive(Clone, Debug)]
pub struct TargetedElement {
    pub selector: String,
    pub tag_name: String,
    pub bounding_box: Rect,
    pub markup_snapshot: String,
    pub style_snapshot: BTreeMap<String, String>,
}
