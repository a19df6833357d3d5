use std::fmt::Write as _;

use page_controller::{PageState, RequestState};
use shared::domain::PageWindow;

const TITLE_WIDTH: usize = 40;
const STATUS_WIDTH: usize = 10;

/// Renders the products table, the failure banner and the pager hints.
pub fn render_page(state: &PageState) -> String {
    let mut out = String::new();
    if let Some(banner) = state.request.banner() {
        let _ = writeln!(out, "! {banner}");
    }
    if matches!(state.request, RequestState::Loading) {
        let _ = writeln!(out, "(loading)");
    }
    match state.window() {
        Some(window) => render_window(&mut out, window),
        None => out.push_str("No page loaded.\n"),
    }
    if let Some(form) = state.modal.form() {
        let _ = writeln!(
            out,
            "Create product: title={:?} status={} sku={:?}",
            form.title, form.status, form.sku
        );
    }
    out
}

fn render_window(out: &mut String, window: &PageWindow) {
    let _ = writeln!(
        out,
        "{:<TITLE_WIDTH$} {:<STATUS_WIDTH$} SKU",
        "Title", "Status"
    );
    if window.products.is_empty() {
        out.push_str("(no products)\n");
    }
    for product in &window.products {
        let _ = writeln!(
            out,
            "{:<TITLE_WIDTH$} {:<STATUS_WIDTH$} {}",
            truncate(&product.title, TITLE_WIDTH),
            product.status.label(),
            product.sku().unwrap_or("-")
        );
    }
    let pager = match (window.has_previous_page, window.has_next_page) {
        (true, true) => "[p]revious | [n]ext",
        (true, false) => "[p]revious",
        (false, true) => "[n]ext",
        (false, false) => "",
    };
    if !pager.is_empty() {
        let _ = writeln!(out, "{pager}");
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
