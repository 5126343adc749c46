use expaaand::{Breakpoint, Options, ResolvedOptions};
use expaaand_dom::Document;

#[test]
fn test_defaults() {
    let doc = Document::new();
    let trigger = doc.create_element("button");
    let resolved = ResolvedOptions::resolve(&trigger, &doc, Options::new());

    assert!(resolved.target_elm.is_none());
    assert!(resolved.close_elm.is_none());
    assert_eq!(resolved.group, "global");
    assert_eq!(resolved.body_class, "expaaand-active-global");
    assert_eq!(resolved.active_class, "is-active");
    assert_eq!(resolved.init_class, "is-expaaand-init");
    assert!(!resolved.enable_toggle);
    assert_eq!(resolved.breakpoints.len(), 5);
}

#[test]
fn test_options_override_defaults() {
    let doc = Document::new();
    let trigger = doc.create_element("button");
    let target = doc.create_element("div");
    let options = Options::new()
        .with_target(target.clone())
        .with_group("nav")
        .with_active_class("open")
        .with_toggle(true)
        .with_breakpoints(vec![Breakpoint::new("all", 0)]);

    let resolved = ResolvedOptions::resolve(&trigger, &doc, options);
    assert_eq!(resolved.target_elm, Some(target));
    assert_eq!(resolved.group, "nav");
    assert_eq!(resolved.body_class, "expaaand-active-nav");
    assert_eq!(resolved.active_class, "open");
    assert!(resolved.enable_toggle);
    assert_eq!(resolved.breakpoints.len(), 1);
}

#[test]
fn test_data_attributes_override_options() {
    let doc = Document::new();
    let from_attr = doc.create_element("div").with_attribute("id", "panel");
    let close = doc.create_element("a").with_class("close");
    let from_option = doc.create_element("div");
    let trigger = doc
        .create_element("button")
        .with_attribute("data-expaaand", "#panel")
        .with_attribute("data-expaaand-close", "a.close")
        .with_attribute("data-expaaand-group", "sidebar")
        .with_attribute("data-expaaand-active", "sidebar-open")
        .with_attribute("data-expaaand-toggle", "true");

    let options = Options::new()
        .with_target(from_option)
        .with_group("nav")
        .with_body_class("nav-open")
        .with_toggle(false);
    let resolved = ResolvedOptions::resolve(&trigger, &doc, options);

    assert_eq!(resolved.target_elm, Some(from_attr));
    assert_eq!(resolved.close_elm, Some(close));
    assert_eq!(resolved.group, "sidebar");
    assert_eq!(resolved.body_class, "sidebar-open");
    assert!(resolved.enable_toggle);
}

#[test]
fn test_unresolvable_selectors_fall_back() {
    let doc = Document::new();
    let fallback = doc.create_element("div");
    let trigger = doc
        .create_element("button")
        .with_attribute("data-expaaand", "#missing")
        .with_attribute("data-expaaand-close", "a > b")
        .with_attribute("data-expaaand-group", "")
        .with_attribute("data-expaaand-toggle", "yes");

    let resolved = ResolvedOptions::resolve(&trigger, &doc, Options::new().with_target(fallback.clone()));
    assert_eq!(resolved.target_elm, Some(fallback));
    assert!(resolved.close_elm.is_none());
    assert_eq!(resolved.group, "global");
    assert!(!resolved.enable_toggle);
}

#[test]
fn test_deserialize_options() {
    let options: Options = serde_json::from_str(
        r#"{
            "group": "faq",
            "bodyClass": "faq-open",
            "enableToggle": true,
            "breakpoints": [
                {"md": {"active": true, "size": 768}},
                {"xs": {"active": false, "size": 0}}
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(options.group.as_deref(), Some("faq"));
    assert_eq!(options.body_class.as_deref(), Some("faq-open"));
    assert_eq!(options.enable_toggle, Some(true));
    assert!(options.active_class.is_none());
    assert!(options.target_elm.is_none());

    let bps = options.breakpoints.unwrap();
    assert_eq!(bps.len(), 2);
    assert!(!bps[1].active);
}
