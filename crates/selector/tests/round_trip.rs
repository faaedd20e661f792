//! Resolve → query round trips over realistic documents.

use dom::{Id, Node, for_each_element, parse_document};
use selector::{query, resolve};

fn element_by_tag(dom: &Node, tag: &str) -> Id {
    let mut found = None;
    for_each_element(dom, &mut |el| {
        if el.tag_name() == Some(tag) {
            found = Some(el.id());
            return false;
        }
        true
    });
    found.unwrap_or_else(|| panic!("no <{tag}> in fixture"))
}

fn element_with_text_parent(dom: &Node, text: &str) -> Id {
    let mut found = None;
    for_each_element(dom, &mut |el| {
        let direct_text = el.children().iter().any(|c| match c {
            Node::Text { text: t, .. } => t == text,
            _ => false,
        });
        if direct_text {
            found = Some(el.id());
            return false;
        }
        true
    });
    found.unwrap_or_else(|| panic!("no element containing {text:?}"))
}

#[test]
fn id_attribute_wins_and_round_trips() {
    let dom = parse_document(r#"<body><div id="hero" class="card"><p>x</p></div></body>"#);
    let target = element_by_tag(&dom, "div");
    let sel = resolve(&dom, target).unwrap();
    assert_eq!(sel, "#hero");
    assert_eq!(query(&dom, &sel), Some(target));
}

#[test]
fn stable_targeting_attribute_beats_testid_and_path() {
    let dom = parse_document(
        r#"<body><section data-restyle-id="promo" data-testid="promo-test"><p>x</p></section></body>"#,
    );
    let target = element_by_tag(&dom, "section");
    let sel = resolve(&dom, target).unwrap();
    assert_eq!(sel, r#"[data-restyle-id="promo"]"#);
    assert_eq!(query(&dom, &sel), Some(target));
}

#[test]
fn testid_attribute_is_used_when_no_stable_attr() {
    let dom = parse_document(r#"<body><button data-testid="buy-now">Buy</button></body>"#);
    let target = element_by_tag(&dom, "button");
    let sel = resolve(&dom, target).unwrap();
    assert_eq!(sel, r#"[data-testid="buy-now"]"#);
    assert_eq!(query(&dom, &sel), Some(target));
}

#[test]
fn path_selector_uses_filtered_classes() {
    let dom = parse_document(
        r#"<body><main class="sm:hidden page-shell"><div class="bg-[#fff] card hover:x wide">a</div></main></body>"#,
    );
    let target = element_by_tag(&dom, "div");
    let sel = resolve(&dom, target).unwrap();
    assert_eq!(sel, "main.page-shell div.card.wide");
    assert_eq!(query(&dom, &sel), Some(target));
}

#[test]
fn positional_segment_disambiguates_same_tag_siblings() {
    let dom = parse_document("<body><ul><li>a</li><li>b</li><li>c</li></ul></body>");
    let second = element_with_text_parent(&dom, "b");
    let sel = resolve(&dom, second).unwrap();
    assert_eq!(sel, "ul li:nth-of-type(2)");
    assert_eq!(query(&dom, &sel), Some(second));
}

#[test]
fn lone_child_without_classes_uses_bare_tag() {
    let dom = parse_document("<body><article><h1>t</h1></article></body>");
    let target = element_by_tag(&dom, "h1");
    let sel = resolve(&dom, target).unwrap();
    assert_eq!(sel, "article h1");
    assert_eq!(query(&dom, &sel), Some(target));
}

#[test]
fn depth_is_capped_at_five_segments() {
    let mut input = String::from("<body>");
    for i in 0..10 {
        input.push_str(&format!("<div class=\"level-{i}\">"));
    }
    input.push_str("<span>deep</span>");
    for _ in 0..10 {
        input.push_str("</div>");
    }
    input.push_str("</body>");
    let dom = parse_document(&input);
    let target = element_by_tag(&dom, "span");
    let sel = resolve(&dom, target).unwrap();
    assert_eq!(sel.split(' ').count(), 5);
    assert_eq!(query(&dom, &sel), Some(target));
}

#[test]
fn special_characters_in_id_stay_resolvable() {
    let dom = parse_document(r#"<body><div id="a.b:c"><p>x</p></div></body>"#);
    let target = element_by_tag(&dom, "div");
    let sel = resolve(&dom, target).unwrap();
    assert_eq!(sel, "#a\\.b\\:c");
    assert_eq!(query(&dom, &sel), Some(target));
}

#[test]
fn quotes_in_targeting_attribute_stay_resolvable() {
    let dom = parse_document(r#"<body><div data-testid='say "hi"'>x</div></body>"#);
    let target = element_by_tag(&dom, "div");
    let sel = resolve(&dom, target).unwrap();
    assert_eq!(query(&dom, &sel), Some(target));
}

#[test]
fn body_and_html_are_excluded_from_paths() {
    let dom = parse_document("<html><body><div class=\"x\">a</div></body></html>");
    let target = element_by_tag(&dom, "div");
    let sel = resolve(&dom, target).unwrap();
    assert_eq!(sel, "div.x");
    assert_eq!(query(&dom, &sel), Some(target));
}

#[test]
fn unknown_id_does_not_resolve() {
    let dom = parse_document("<body><div>a</div></body>");
    assert_eq!(resolve(&dom, Id(9999)), None);
    assert_eq!(query(&dom, "#missing"), None);
}
