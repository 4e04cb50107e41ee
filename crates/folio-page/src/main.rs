//! folio - replay a scripted visit against a portfolio page
//!
//! Usage: `folio <page.html> [config.toml]`
//!
//! Loads the page, stacks its sections into a simple layout, then scrolls
//! through it, follows each nav link and submits the contact form, logging
//! what the page does in response. `RUST_LOG=debug` shows every behavior.

use std::path::Path;

use anyhow::{Context, Result, bail};
use folio_dom::{DOMRect, Document, NodeId, UiEvent};
use folio_page::{PageConfig, PageController, Window, contact::FIELD_NAMES};

const VIEWPORT_WIDTH: f64 = 1280.0;
const VIEWPORT_HEIGHT: f64 = 800.0;
/// Frame time between scroll samples
const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(page_path) = args.next() else {
        bail!("usage: folio <page.html> [config.toml]");
    };
    let config = match args.next() {
        Some(path) => PageConfig::load(&path).with_context(|| format!("loading config {path}"))?,
        None => PageConfig::default(),
    };

    let html = std::fs::read_to_string(&page_path).with_context(|| format!("reading {page_path}"))?;
    let url = format!("file://{}", Path::new(&page_path).display());
    let mut document = folio_html::HtmlLoader::new()
        .parse_with_url(&html, &url)
        .with_context(|| format!("parsing {page_path}"))?;

    let page_height = stack_sections(&mut document, VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
    tracing::info!("Loaded \"{}\" ({} px tall)", document.title(), page_height);

    let window = Window::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT, page_height);
    let mut page = PageController::new(document, window, config);

    page.dispatch(&mut UiEvent::load());
    page.advance(1500);

    scroll_sweep(&mut page);
    follow_nav_links(&mut page);
    submit_contact_form(&mut page);

    page.teardown();
    tracing::info!("Done at t={}ms", page.now());
    Ok(())
}

/// Lay sections out top to bottom; `data-height` overrides the default height
fn stack_sections(document: &mut Document, width: f64, default_height: f64) -> f64 {
    let sections = document.query_selector_all("section").unwrap_or_default();
    let tree = document.tree_mut();

    let mut top = 0.0;
    for section in sections {
        let height = tree
            .attr(section, "data-height")
            .and_then(|h| h.parse::<f64>().ok())
            .unwrap_or(default_height);
        tree.set_box(section, DOMRect::from_xywh(0.0, top, width, height));
        top += height;
    }
    top
}

fn scroll_sweep(page: &mut PageController) {
    let max = page.window().max_scroll();
    let mut y = 0.0;
    while y <= max {
        page.scroll_to(y);
        page.advance(FRAME_MS);
        y += 200.0;
    }
    page.advance(100);

    let tree = page.tree();
    let active: Vec<String> = page
        .bindings()
        .nav_links
        .iter()
        .filter(|&&link| tree.has_class(link, &page.config().classes.active))
        .filter_map(|&link| tree.attr(link, "href").map(str::to_string))
        .collect();
    tracing::info!(
        "Scrolled to {} ({:.0}%), active link {:?}, counters started: {}",
        page.window().scroll_y(),
        page.window().scroll_percent(),
        active,
        page.counters_started()
    );
}

fn follow_nav_links(page: &mut PageController) {
    for link in page.bindings().nav_links.clone() {
        let href = page.tree().attr(link, "href").unwrap_or_default().to_string();
        let mut click = UiEvent::click(link);
        page.dispatch(&mut click);

        for request in page.take_scroll_requests() {
            tracing::info!("{} -> scroll to {}", href, request.top);
            page.scroll_to(request.top);
        }
        page.advance(FRAME_MS);
    }
}

fn submit_contact_form(page: &mut PageController) {
    let Some(form) = page.bindings().contact_form else {
        tracing::info!("No contact form on this page");
        return;
    };

    let values = ["Visitor", "visitor@example.com", "Hello", "Nice portfolio!"];
    let controls: Vec<NodeId> = page.tree().descendants(form);
    for (name, value) in FIELD_NAMES.iter().zip(values) {
        let control = controls.iter().copied().find(|&c| page.tree().attr(c, "name") == Some(*name));
        if let Some(control) = control {
            page.tree_mut().set_control_value(control, value);
        }
    }

    let mut submit = UiEvent::submit(form);
    page.dispatch(&mut submit);
    tracing::info!("Submitting contact form (sending: {})", page.is_submitting());

    page.advance(page.config().contact.submit_delay_ms);
    if let Some(notification) = page.active_notification() {
        tracing::info!("Notification: {}", page.tree().text_content(notification).trim());
    }
}
