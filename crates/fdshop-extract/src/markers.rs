//! The marker-attribute contract shared with the page markup.
//!
//! These selectors and attribute names must match what the page builder
//! emits; changing one breaks existing pages.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

pub(crate) const INFO_ATTR: &str = "fd-product-info";
pub(crate) const BRAND_NAME_KEY: &str = "brand-name";
pub(crate) const ACTION_ITEM_ATTR: &str = "fd-filters-action-item";
pub(crate) const PINNED_ATTR: &str = "fd-filters-pinned";

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid marker selector")
}

pub(crate) static PRODUCT_ITEM: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"[fd-product="item"]"#));
pub(crate) static PRODUCT_NAME: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"[fd-product="name"]"#));
pub(crate) static PRODUCT_PRICE: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"[fd-product="price"]"#));
pub(crate) static PRODUCT_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"[fd-product="image"]"#));
pub(crate) static PRODUCT_INFO: LazyLock<Selector> =
    LazyLock::new(|| selector("[fd-product-info]"));
pub(crate) static BRAND_NAME: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"[fd-product-info="brand-name"]"#));
pub(crate) static LIST_ITEM: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"[role="listitem"]"#));

pub(crate) static DETAIL_NAME: LazyLock<Selector> =
    LazyLock::new(|| selector(".product-detail-head h1"));
pub(crate) static DETAIL_PRICE: LazyLock<Selector> =
    LazyLock::new(|| selector(".product-header3_price-wrapper .heading-style-h3"));
pub(crate) static DETAIL_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| selector(".product-header3_main-image"));
pub(crate) static DETAIL_TABLE_DATA: LazyLock<Selector> =
    LazyLock::new(|| selector(".product-details-table-data"));
pub(crate) static DETAIL_TABLE: LazyLock<Selector> =
    LazyLock::new(|| selector(".product-details-table"));

/// Trimmed text content of an element and all its descendants.
pub(crate) fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Image source, absolutized against `base` when one is known.
///
/// A missing `src` reads as empty; a `src` that cannot be joined is kept
/// verbatim.
pub(crate) fn image_src(el: ElementRef<'_>, base: Option<&url::Url>) -> String {
    let Some(src) = el.value().attr("src").map(str::trim) else {
        return String::new();
    };
    if src.is_empty() {
        return String::new();
    }
    match base {
        Some(base) => base
            .join(src)
            .map_or_else(|_| src.to_string(), |u| u.to_string()),
        None => src.to_string(),
    }
}
