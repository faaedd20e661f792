//! Undo semantics over a live tree: exact restoration, cascading reverts,
//! and the persistence/export serializations.

use dom::{Node, attr, find_node_by_id, for_each_element, inline_style_value, parse_document};
use history::{HistoryError, MutationLog, PersistEntry, apply_persisted};
use std::collections::BTreeMap;

fn changes(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn element<'a>(dom: &'a Node, selector_str: &str) -> &'a Node {
    let id = selector::query(dom, selector_str).expect("selector resolves");
    find_node_by_id(dom, id).unwrap()
}

#[test]
fn apply_mutates_inline_style_and_records() {
    let mut dom = parse_document(r#"<body><div id="a"></div></body>"#);
    let mut log = MutationLog::new();
    let n = log
        .apply(&mut dom, "#a", &changes(&[("backgroundColor", "red")]))
        .unwrap();
    assert_eq!(n, 1);
    assert_eq!(log.len(), 1);
    assert_eq!(
        inline_style_value(element(&dom, "#a"), "background-color").as_deref(),
        Some("red")
    );
}

#[test]
fn apply_to_missing_element_is_rejected_without_mutation() {
    let mut dom = parse_document(r#"<body><div id="a"></div></body>"#);
    let mut log = MutationLog::new();
    let err = log
        .apply(&mut dom, "#missing", &changes(&[("color", "red")]))
        .unwrap_err();
    assert!(matches!(err, HistoryError::ElementNotFound { .. }));
    assert!(log.is_empty());
}

#[test]
fn revert_removes_property_that_had_no_inline_value() {
    let mut dom = parse_document(r#"<body><div id="a"></div></body>"#);
    let mut log = MutationLog::new();
    log.apply(&mut dom, "#a", &changes(&[("color", "red")])).unwrap();
    log.revert_last(&mut dom).unwrap();
    let el = element(&dom, "#a");
    // absent, not "": the style attribute itself is gone
    assert_eq!(inline_style_value(el, "color"), None);
    assert_eq!(attr(el, "style"), None);
    assert!(log.is_empty());
}

#[test]
fn revert_restores_prior_inline_value_exactly() {
    let mut dom = parse_document(r#"<body><div id="a" style="color: blue"></div></body>"#);
    let mut log = MutationLog::new();
    log.apply(&mut dom, "#a", &changes(&[("color", "red")])).unwrap();
    log.revert_last(&mut dom).unwrap();
    assert_eq!(
        inline_style_value(element(&dom, "#a"), "color").as_deref(),
        Some("blue")
    );
}

#[test]
fn stacked_records_on_one_property_unwind_in_order() {
    let mut dom = parse_document(r#"<body><div id="a"></div></body>"#);
    let mut log = MutationLog::new();
    log.apply(&mut dom, "#a", &changes(&[("color", "red")])).unwrap();
    log.apply(&mut dom, "#a", &changes(&[("color", "green")])).unwrap();
    log.apply(&mut dom, "#a", &changes(&[("color", "blue")])).unwrap();

    log.revert_last(&mut dom).unwrap();
    assert_eq!(
        inline_style_value(element(&dom, "#a"), "color").as_deref(),
        Some("green")
    );
    log.revert_last(&mut dom).unwrap();
    assert_eq!(
        inline_style_value(element(&dom, "#a"), "color").as_deref(),
        Some("red")
    );
    log.revert_last(&mut dom).unwrap();
    assert_eq!(inline_style_value(element(&dom, "#a"), "color"), None);
}

#[test]
fn revert_to_index_cascades_and_truncates() {
    let mut dom = parse_document(r#"<body><div id="a"></div></body>"#);
    let mut log = MutationLog::new();
    log.apply(&mut dom, "#a", &changes(&[("color", "red")])).unwrap(); // R1
    log.apply(&mut dom, "#a", &changes(&[("margin", "4px")])).unwrap(); // R2
    log.apply(&mut dom, "#a", &changes(&[("color", "blue")])).unwrap(); // R3

    let reverted = log.revert_to_index(&mut dom, 1).unwrap();
    assert_eq!(reverted, 2); // R3 then R2
    assert_eq!(log.len(), 1);
    let el = element(&dom, "#a");
    assert_eq!(inline_style_value(el, "color").as_deref(), Some("red"));
    assert_eq!(inline_style_value(el, "margin"), None);
}

#[test]
fn revert_to_zero_restores_pre_session_state() {
    let mut dom =
        parse_document(r#"<body><div id="a" style="padding: 2px"></div></body>"#);
    let mut log = MutationLog::new();
    log.apply(&mut dom, "#a", &changes(&[("padding", "8px"), ("color", "red")]))
        .unwrap();
    log.apply(&mut dom, "#a", &changes(&[("padding", "16px")])).unwrap();

    log.revert_to_index(&mut dom, 0).unwrap();
    let el = element(&dom, "#a");
    assert_eq!(attr(el, "style"), Some("padding: 2px"));
}

#[test]
fn revert_of_vanished_element_still_pops_the_record() {
    let mut dom = parse_document(r#"<body><div id="a"></div></body>"#);
    let mut log = MutationLog::new();
    log.apply(&mut dom, "#a", &changes(&[("color", "red")])).unwrap();

    // simulate an unrelated content change removing the element
    let mut dom = parse_document("<body><p>replaced</p></body>");
    let err = log.revert_last(&mut dom).unwrap_err();
    assert!(matches!(err, HistoryError::ElementNotFound { .. }));
    assert!(log.is_empty());
}

#[test]
fn export_hyphenates_property_names() {
    let mut dom = parse_document(r#"<body><div class="a"></div></body>"#);
    let mut log = MutationLog::new();
    log.apply(&mut dom, ".a", &changes(&[("backgroundColor", "red")]))
        .unwrap();
    let text = log.export_stylesheet(1_700_000_000);
    assert!(text.contains(".a { background-color: red; }"), "got: {text}");
    assert!(text.starts_with("/*"));
    assert!(text.contains("1700000000"));
}

#[test]
fn serialize_carries_applied_styles_only() {
    let mut dom = parse_document(r#"<body><div id="a" style="color: blue"></div></body>"#);
    let mut log = MutationLog::new();
    log.apply(&mut dom, "#a", &changes(&[("color", "red")])).unwrap();
    let entries = log.serialize();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].selector, "#a");
    assert_eq!(entries[0].styles.get("color").map(String::as_str), Some("red"));

    let json = serde_json::to_string(&entries).unwrap();
    let back: Vec<PersistEntry> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, entries);
}

#[test]
fn persisted_entries_apply_directly_without_records() {
    let mut dom = parse_document(r#"<body><div id="a"></div><p id="b"></p></body>"#);
    let entries = vec![
        PersistEntry {
            selector: "#a".to_string(),
            styles: changes(&[("color", "red")]),
        },
        PersistEntry {
            selector: "#gone".to_string(),
            styles: changes(&[("color", "blue")]),
        },
    ];
    let applied = apply_persisted(&mut dom, &entries);
    assert_eq!(applied, 1);
    assert_eq!(
        inline_style_value(element(&dom, "#a"), "color").as_deref(),
        Some("red")
    );

    // a fresh log knows nothing about loaded styles
    let mut log = MutationLog::new();
    assert!(matches!(log.revert_last(&mut dom), Err(HistoryError::Empty)));
}
