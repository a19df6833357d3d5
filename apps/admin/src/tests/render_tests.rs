use super::*;
use page_controller::{CreateModal, CurrentPage};
use shared::domain::{
    FormValues, PageRequest, Product, ProductId, ProductStatus, ProductVariant, VariantId,
};

fn product(title: &str, sku: Option<&str>) -> Product {
    Product {
        id: ProductId::from("gid://shopify/Product/1"),
        title: title.to_string(),
        status: ProductStatus::Draft,
        primary_variant: Some(ProductVariant {
            id: VariantId::from("gid://shopify/ProductVariant/1"),
            barcode: sku.map(str::to_string),
        }),
    }
}

fn state_with(window: PageWindow) -> PageState {
    PageState {
        current: Some(CurrentPage {
            request: PageRequest::first(),
            window,
        }),
        ..Default::default()
    }
}

#[test]
fn renders_rows_with_sku_placeholder() {
    let state = state_with(PageWindow {
        products: vec![product("Red Shirt", Some("RTS001")), product("Mug", None)],
        has_next_page: true,
        ..Default::default()
    });

    let out = render_page(&state);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].starts_with("Title"));
    assert!(lines[1].starts_with("Red Shirt"));
    assert!(lines[1].contains("Draft"));
    assert!(lines[1].ends_with("RTS001"));
    assert!(lines[2].ends_with('-'));
    assert_eq!(lines[3], "[n]ext");
}

#[test]
fn shows_banner_above_stale_window() {
    let mut state = state_with(PageWindow {
        products: vec![product("Red Shirt", None)],
        ..Default::default()
    });
    state.request = RequestState::Error("Throttled".into());

    let out = render_page(&state);
    assert!(out.starts_with("! Something went wrong: Throttled"));
    assert!(out.contains("Red Shirt"));
}

#[test]
fn shows_open_form() {
    let state = PageState {
        modal: CreateModal::Open(FormValues {
            title: "Cap".into(),
            ..Default::default()
        }),
        ..Default::default()
    };

    let out = render_page(&state);
    assert!(out.contains("No page loaded."));
    assert!(out.contains("title=\"Cap\" status=ACTIVE"));
}

#[test]
fn long_titles_are_cut() {
    let long = "x".repeat(60);
    assert_eq!(truncate(&long, 10), "xxxxxxx...");
    assert_eq!(truncate("short", 10), "short");
}
