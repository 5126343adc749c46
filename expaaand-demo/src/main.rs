//! Scripted walkthrough: builds a page with a few widgets, clicks and
//! resizes it, and prints what each widget looks like after every step.

use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use expaaand::prelude::*;
use expaaand::{DEFAULT_DEBOUNCE_DELAY, ExpaaandDetail, HIDDEN_EVENT};
use simplelog::{Config, LevelFilter, WriteLogger};

/// Two nav menus sharing a group, a toggling FAQ entry and a sidebar that is
/// disabled on small screens.
fn build_page(doc: &Document) {
    for (id, label) in [("products", "Products"), ("company", "Company")] {
        doc.create_element("ul").with_attribute("id", id);
        doc.create_element("button")
            .with_attribute("data-expaaand", format!("#{id}"))
            .with_attribute("data-expaaand-group", "nav")
            .with_attribute("aria-label", label);
    }

    doc.create_element("dd").with_attribute("id", "faq-1");
    doc.create_element("dt")
        .with_attribute("data-expaaand", "#faq-1")
        .with_attribute("data-expaaand-group", "faq")
        .with_attribute("data-expaaand-toggle", "true");

    doc.create_element("aside").with_attribute("id", "sidebar");
    doc.create_element("a").with_attribute("id", "sidebar-close");
    doc.create_element("button")
        .with_attribute("data-expaaand", "#sidebar")
        .with_attribute("data-expaaand-close", "#sidebar-close")
        .with_attribute("data-expaaand-group", "sidebar")
        .with_class("is-active");
}

fn report(step: &str, doc: &Document, widgets: &[Expaaand]) {
    println!("== {step} (viewport {}px)", doc.window().inner_width());
    for widget in widgets {
        let target = widget
            .target_elm()
            .and_then(|t| t.get_attribute("id"))
            .unwrap_or_default();
        let breakpoint = widget.breakpoint().map(|bp| bp.name).unwrap_or_default();
        println!(
            "   #{target:<10} group={:<8} active={:<5} breakpoint={breakpoint}",
            widget.group(),
            widget.is_active(),
        );
    }
    println!("   body: {}", doc.body().class_name());
}

async fn settle() {
    tokio::time::sleep(DEFAULT_DEBOUNCE_DELAY + Duration::from_millis(50)).await;
}

#[tokio::main]
async fn main() {
    let log_file = File::create("expaaand-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let doc = Document::with_viewport(Viewport {
        width: 1300,
        height: 900,
    });
    build_page(&doc);

    doc.body().add_event_listener(
        HIDDEN_EVENT,
        Arc::new(|evt: &Event| {
            if let Some(detail) = evt.detail::<ExpaaandDetail>() {
                log::info!("hidden: {} (group {})", detail.trigger_elm.id(), detail.group);
            }
        }),
    );

    let options = Options::new().with_breakpoints(
        Breakpoints::default()
            .with_active("xs", false)
            .iter()
            .cloned()
            .collect(),
    );
    let widgets = Expaaand::attach_all(&doc, options);
    report("initial", &doc, &widgets);

    let trigger = |i: usize| widgets[i].trigger_elm().clone();

    trigger(0).click();
    report("open products", &doc, &widgets);

    trigger(1).click();
    report("open company (products collapses)", &doc, &widgets);

    trigger(2).click();
    trigger(2).click();
    report("toggle faq twice", &doc, &widgets);

    doc.window().resize(700, 900);
    settle().await;
    report("resize to 700px", &doc, &widgets);

    doc.window().resize(300, 900);
    settle().await;
    report("resize to 300px (xs disables behavior)", &doc, &widgets);

    doc.window().resize(1300, 900);
    settle().await;
    trigger(3).click();
    if let Some(close) = widgets[3].close_elm() {
        close.click();
    }
    report("reopen and close sidebar", &doc, &widgets);

    for widget in &widgets {
        widget.destroy();
    }
}
