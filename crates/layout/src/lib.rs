//! Geometry for the editor: a coarse block layout that gives every rendered
//! element a document-space rectangle, plus viewport-relative bounds and hit
//! testing on top of it.
//!
//! The editor needs geometry for highlight positioning and pointer targeting,
//! not for faithful rendering, so the model is deliberately simple: block
//! stacking, a fixed default row height, and explicit pixel heights when an
//! element declares one.

use dom::{Id, Node, inline_style_value};
use std::collections::HashMap;

const DEFAULT_BLOCK_HEIGHT: f32 = 24.0;

/// A rectangle in CSS px units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Scroll offset and size of the visible window into the document.
#[derive(Clone, Copy, Debug, Default)]
pub struct Viewport {
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

/// Document-space rectangles keyed by node id. Valid only for the tree state
/// it was computed from; callers recompute per event rather than caching.
pub type LayoutMap = HashMap<Id, Rect>;

fn is_non_rendering_element(name: &str) -> bool {
    matches!(name, "head" | "style" | "script" | "title" | "meta" | "link")
}

fn explicit_px_height(node: &Node) -> Option<f32> {
    let value = inline_style_value(node, "height").or_else(|| match node {
        Node::Element { style, .. } => style
            .iter()
            .find(|(k, _)| k == "height")
            .map(|(_, v)| v.clone()),
        _ => None,
    })?;
    value.trim().strip_suffix("px")?.trim().parse::<f32>().ok()
}

/// Compute block layout for the whole document at the given content width.
pub fn layout_document(dom: &Node, page_width: f32) -> LayoutMap {
    let mut map = LayoutMap::new();
    layout_subtree(dom, 0.0, 0.0, page_width, &mut map);
    map
}

// Returns the y cursor below this node.
fn layout_subtree(node: &Node, x: f32, y: f32, width: f32, map: &mut LayoutMap) -> f32 {
    match node {
        Node::Document { children, .. } => {
            let mut cursor = y;
            for c in children {
                cursor = layout_subtree(c, x, cursor, width, map);
            }
            cursor
        }
        Node::Element { name, children, .. } => {
            if is_non_rendering_element(name) {
                return y;
            }
            // <html> and <body> are pure containers: no own row.
            let own_row = if name == "html" || name == "body" {
                0.0
            } else {
                DEFAULT_BLOCK_HEIGHT
            };
            let mut cursor = y + own_row;
            for c in children {
                cursor = layout_subtree(c, x, cursor, width, map);
            }
            let mut height = cursor - y;
            if let Some(px) = explicit_px_height(node) {
                height = height.max(px);
            }
            if height <= 0.0 {
                height = DEFAULT_BLOCK_HEIGHT;
            }
            map.insert(node.id(), Rect { x, y, width, height });
            y + height
        }
        Node::Text { text, .. } => {
            if text.trim().is_empty() {
                y
            } else {
                y + DEFAULT_BLOCK_HEIGHT
            }
        }
        Node::Comment { .. } => y,
    }
}

/// Viewport-relative bounds of one element: its document rect shifted by the
/// current scroll offset. `None` when the element has no rendered box.
pub fn bounds_of(map: &LayoutMap, id: Id, viewport: &Viewport) -> Option<Rect> {
    map.get(&id).map(|r| Rect {
        x: r.x - viewport.scroll_x,
        y: r.y - viewport.scroll_y,
        width: r.width,
        height: r.height,
    })
}

/// Deepest element whose rect contains the viewport point.
pub fn hit_test(dom: &Node, map: &LayoutMap, viewport: &Viewport, x: f32, y: f32) -> Option<Id> {
    let doc_x = x + viewport.scroll_x;
    let doc_y = y + viewport.scroll_y;

    fn walk(node: &Node, map: &LayoutMap, x: f32, y: f32, best: &mut Option<Id>) {
        for child in node.children() {
            if child.is_element() {
                if let Some(rect) = map.get(&child.id())
                    && rect.contains(x, y)
                {
                    *best = Some(child.id());
                }
            }
            walk(child, map, x, y, best);
        }
    }

    let mut best = None;
    walk(dom, map, doc_x, doc_y, &mut best);
    best
}
