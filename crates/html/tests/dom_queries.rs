//! Parsing, querying and printing documents end to end.

use html::{DOM, DOMError, parse_html};
use serde_json::json;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn body_of(dom: &DOM) -> html::NodeId {
    dom.query_selector(dom.root(), "body").unwrap().unwrap()
}

#[test]
fn serializes_parsed_markup_back() {
    init_logging();
    let dom = parse_html(
        r#"<ul class="menu"><li data-x="a&amp;b">One &lt;1&gt;</li><li><br><img src="x.png"></li></ul><!--note-->"#,
    )
    .unwrap();
    let body = body_of(&dom);
    assert_eq!(
        dom.inner_html(body),
        r#"<ul class="menu"><li data-x="a&amp;b">One &lt;1&gt;</li><li><br><img src="x.png"></li></ul><!--note-->"#
    );
}

#[test]
fn raw_text_is_not_escaped() {
    init_logging();
    let dom = parse_html("<script>if (a < b && c) {}</script>").unwrap();
    let script = dom.query_selector(dom.root(), "script").unwrap().unwrap();
    assert_eq!(dom.to_html(script), "<script>if (a < b && c) {}</script>");
}

#[test]
fn default_selector_is_a_substring_match() {
    init_logging();
    let dom = parse_html(
        r#"<div class="js-with-js--remove"></div>
           <div class="prefix-js-with-js--x"></div>
           <div class="js-with-js-"></div>
           <p class="other"><span class="a js-with-js--addClass__b"></span></p>"#,
    )
    .unwrap();
    let found = dom
        .query_selector_all(dom.root(), r#"[class*="js-with-js--"]"#)
        .unwrap();
    let tags: Vec<&str> = found
        .iter()
        .map(|&node| dom.tag_name(node).unwrap())
        .collect();
    assert_eq!(tags, vec!["div", "div", "span"]);
}

#[test]
fn queries_are_scoped_to_the_root() {
    init_logging();
    let dom = parse_html(
        r#"<section id="one"><b class="x"></b></section><section id="two"><b class="x"></b></section>"#,
    )
    .unwrap();
    let two = dom.query_selector(dom.root(), "#two").unwrap().unwrap();
    let inside = dom.query_selector_all(two, ".x").unwrap();
    assert_eq!(inside.len(), 1);
    assert_eq!(dom.parent(inside[0]), Some(two));
    // The root itself is never part of its own result.
    assert!(dom.query_selector_all(two, "#two").unwrap().is_empty());
    assert!(dom.matches(two, "section#two").unwrap());
}

#[test]
fn invalid_selectors_are_syntax_errors() {
    init_logging();
    let dom = parse_html("<p></p>").unwrap();
    assert!(matches!(
        dom.query_selector_all(dom.root(), "p:first-child"),
        Err(DOMError::Syntax(_))
    ));
    assert!(matches!(
        dom.query_selector_all(dom.root(), "p, p:first-child"),
        Err(DOMError::Syntax(_))
    ));
}

#[test]
fn quoted_commas_stay_inside_attribute_values() {
    init_logging();
    let dom = parse_html(r#"<p data-x="a,b"></p><p data-x="a"></p><i></i>"#).unwrap();
    let found = dom
        .query_selector_all(dom.root(), r#"[data-x="a,b"], i"#)
        .unwrap();
    let tags: Vec<&str> = found
        .iter()
        .map(|&node| dom.tag_name(node).unwrap())
        .collect();
    assert_eq!(tags, vec!["p", "i"]);
}

#[test]
fn json_snapshot_is_deterministic() {
    init_logging();
    let dom = parse_html(r#"<div title="t" id="d">  a <i>b</i></div>"#).unwrap();
    let div = dom.query_selector(dom.root(), "div").unwrap().unwrap();
    assert_eq!(
        dom.to_json(div),
        json!({
            "type": "element",
            "tag": "div",
            "attrs": { "id": "d", "title": "t" },
            "children": [
                { "type": "text", "text": "  a " },
                { "type": "element", "tag": "i", "attrs": {}, "children": [ { "type": "text", "text": "b" } ] },
            ],
        })
    );
}

#[test]
fn debug_output_lists_the_tree() {
    init_logging();
    let dom = parse_html(r#"<p class="c">x</p>"#).unwrap();
    let printed = format!("{dom:?}");
    assert!(printed.starts_with("DOM\n#document\n"));
    assert!(printed.contains(r#"<p class="c">"#));
    assert!(printed.contains(r##"#text "x""##));
}
