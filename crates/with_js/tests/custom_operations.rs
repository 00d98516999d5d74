use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use html::parse_html;
use with_js::{
    BuiltinOperation, OperationTable, RunOptions, Target, Update, WithJsConfig, apply,
    apply_with_config, run,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn table_with_only_remove_skips_everything_else() {
    init();
    let mut dom = parse_html("<div><span></span></div>").unwrap();
    let div = dom.query_selector(dom.root(), "div").unwrap().unwrap();
    let span = dom.query_selector(div, "span").unwrap().unwrap();
    let table = OperationTable::empty().with_operation("remove", BuiltinOperation::Remove);

    run(
        &mut dom,
        &[Update::new("addClass", &["x"]), Update::new("remove", &[])],
        span,
        &RunOptions::with_operations(&table),
    )
    .unwrap();

    assert!(!dom.has_attribute(span, "class"));
    assert_eq!(dom.children(div).count(), 0);
}

#[test]
fn superset_table_adds_operations() {
    init();
    let mut dom = parse_html(
        r#"<ol><li class="js-with-js--number"></li><li class="js-with-js--number js-with-js--addClass__last"></li></ol>"#,
    )
    .unwrap();
    let counter = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&counter);
    let table = OperationTable::builtin().with_fn("number", move |dom, target, _arguments| {
        let position = seen.fetch_add(1, Ordering::SeqCst) + 1;
        dom.set_attribute(target, "data-n", &position.to_string())?;
        Ok(())
    });

    apply(&mut dom, Target::default(), &RunOptions::with_operations(&table)).unwrap();

    let items = dom.query_selector_all(dom.root(), "li").unwrap();
    assert_eq!(dom.get_attribute(items[0], "data-n"), Some("1"));
    assert_eq!(dom.get_attribute(items[1], "data-n"), Some("2"));
    assert!(dom.class_list(items[1]).contains("last"));
    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[test]
fn overriding_a_builtin_replaces_it() {
    init();
    let mut dom = parse_html(r#"<p class="js-with-js--remove"></p>"#).unwrap();
    let para = dom.query_selector(dom.root(), "p").unwrap().unwrap();
    let table = OperationTable::builtin().with_fn("remove", |dom, target, _arguments| {
        dom.set_attribute(target, "hidden", "")?;
        Ok(())
    });

    apply(&mut dom, Target::Element(para), &RunOptions::with_operations(&table)).unwrap();

    assert!(dom.parent(para).is_some());
    assert!(dom.has_attribute(para, "hidden"));
}

#[test]
fn config_allowlist_sandboxes_operations() {
    init();
    let mut dom = parse_html(
        r#"<div class="js-with-js--addClass__on js-with-js--removeAttribute__hidden js-with-js--remove" hidden></div>"#,
    )
    .unwrap();
    let div = dom.query_selector(dom.root(), "div").unwrap().unwrap();
    let config = WithJsConfig::from_json_str(r#"{ "operations": ["addClass"] }"#).unwrap();

    apply_with_config(&mut dom, &config).unwrap();

    assert!(dom.class_list(div).contains("on"));
    assert!(dom.has_attribute(div, "hidden"));
    assert!(dom.parent(div).is_some());
}

#[test]
fn config_selector_narrows_the_scan() {
    init();
    let mut dom = parse_html(
        r#"<p class="scan js-with-js--addClass__hit"></p><p class="js-with-js--addClass__hit"></p>"#,
    )
    .unwrap();
    let config = WithJsConfig::from_json_str(r#"{ "selector": ".scan" }"#).unwrap();

    apply_with_config(&mut dom, &config).unwrap();

    let hits = dom.query_selector_all(dom.root(), ".hit").unwrap();
    assert_eq!(hits.len(), 1);
    assert!(dom.class_list(hits[0]).contains("scan"));
}

#[test]
fn config_with_empty_selector_is_rejected() {
    init();
    let mut dom = parse_html("<p></p>").unwrap();
    let config = WithJsConfig::new(String::new(), None);
    assert!(apply_with_config(&mut dom, &config).is_err());
}
