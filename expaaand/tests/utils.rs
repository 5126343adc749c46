use std::sync::{Arc, Mutex};
use std::time::Duration;

use expaaand::{DEFAULT_DEBOUNCE_DELAY, Debounce, ExpaaandError, debounce, has_class};
use expaaand_dom::Element;
use tokio::time::sleep;

// =============================================================================
// has_class
// =============================================================================

#[test]
fn test_has_class_native_path() {
    let el = Element::new("div").with_class("menu").with_class("is-active");
    assert!(has_class(&el, "menu").unwrap());
    assert!(has_class(&el, "is-active").unwrap());
    assert!(!has_class(&el, "is").unwrap());
    assert!(!has_class(&el, "Menu").unwrap());
}

#[test]
fn test_has_class_fallback_matches_native() {
    let el = Element::new("div");
    el.set_attribute("class", "nav  is-active\tdark");
    let raw = el.class_name();

    for name in ["nav", "is-active", "dark", "active", "is", "NAV", "nav-is"] {
        assert_eq!(
            has_class(&el, name).unwrap(),
            has_class(raw.as_str(), name).unwrap(),
            "mismatch for {name}"
        );
    }
}

#[test]
fn test_has_class_fallback_on_raw_string_with_tabs() {
    assert!(has_class("nav\tis-active", "is-active").unwrap());
    assert!(!has_class(&String::from("navigation"), "nav").unwrap());
}

#[test]
fn test_has_class_empty_name_is_false() {
    let el = Element::new("div").with_class("a");
    assert!(!has_class(&el, "").unwrap());
    assert!(!has_class(el.class_name().as_str(), "").unwrap());
}

#[test]
fn test_has_class_rejects_non_token_names() {
    let el = Element::new("div").with_class("a");
    for bad in [" ", "a b", "a\n"] {
        match has_class(&el, bad) {
            Err(ExpaaandError::InvalidClassName(name)) => assert_eq!(name, bad),
            other => panic!("expected InvalidClassName for {bad:?}, got {other:?}"),
        }
    }
}

// =============================================================================
// debounce
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_debounce_burst_fires_once_with_last_args() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = calls.clone();
    let debounced = debounce(
        move |n: u32| sink.lock().unwrap().push(n),
        DEFAULT_DEBOUNCE_DELAY,
    );

    debounced.trigger(1);
    sleep(Duration::from_millis(100)).await;
    debounced.trigger(2);
    sleep(Duration::from_millis(100)).await;
    debounced.trigger(3);

    sleep(Duration::from_millis(149)).await;
    assert!(calls.lock().unwrap().is_empty());
    assert!(debounced.is_pending());

    sleep(Duration::from_millis(2)).await;
    assert_eq!(*calls.lock().unwrap(), vec![3]);
    assert!(!debounced.is_pending());
}

#[tokio::test(start_paused = true)]
async fn test_debounce_separate_bursts_fire_separately() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = calls.clone();
    let debounced = debounce(
        move |s: &'static str| sink.lock().unwrap().push(s),
        Duration::from_millis(50),
    );

    debounced.trigger("a");
    sleep(Duration::from_millis(60)).await;
    debounced.trigger("b");
    sleep(Duration::from_millis(60)).await;

    assert_eq!(*calls.lock().unwrap(), vec!["a", "b"]);
}

#[tokio::test(start_paused = true)]
async fn test_debounce_clones_share_timer() {
    let calls = Arc::new(Mutex::new(0));
    let sink = calls.clone();
    let debounced = debounce(move |()| *sink.lock().unwrap() += 1, Duration::from_millis(10));
    let clone = debounced.clone();

    debounced.trigger(());
    clone.trigger(());
    sleep(Duration::from_millis(20)).await;

    assert_eq!(*calls.lock().unwrap(), 1);
    assert_eq!(clone.delay(), Duration::from_millis(10));
}

#[tokio::test(start_paused = true)]
async fn test_debounce_with_explicit_handle() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = calls.clone();
    let debounced = Debounce::with_handle(
        move |n: u32| sink.lock().unwrap().push(n),
        Duration::from_millis(30),
        tokio::runtime::Handle::current(),
    );

    debounced.trigger(1);
    debounced.trigger(2);
    assert!(calls.lock().unwrap().is_empty());

    sleep(Duration::from_millis(40)).await;
    assert_eq!(*calls.lock().unwrap(), vec![2]);
}
