//! Listing-page extraction: one record per `[fd-product="item"]` container.

use fdshop_core::products::parse_price;
use fdshop_core::ProductRecord;
use scraper::{ElementRef, Html};
use url::Url;

use crate::error::ExtractError;
use crate::info::{read_info, WriteMode};
use crate::markers::{
    image_src, text_of, ACTION_ITEM_ATTR, PINNED_ATTR, PRODUCT_IMAGE, PRODUCT_ITEM, PRODUCT_NAME,
    PRODUCT_PRICE,
};

/// Extracts every product container in document order.
///
/// Containers that cannot be read are logged and skipped; the remaining
/// records keep the container's document index as their `id`, so ids may
/// have gaps.
#[must_use]
pub fn extract_listing(html: &Html, base: Option<&Url>) -> Vec<ProductRecord> {
    let products: Vec<ProductRecord> = html
        .select(&PRODUCT_ITEM)
        .enumerate()
        .filter_map(|(index, el)| match extract_product(el, index, base) {
            Ok(product) => Some(product),
            Err(err) => {
                tracing::warn!(index, error = %err, "skipping product container");
                None
            }
        })
        .collect();

    tracing::debug!(count = products.len(), "extracted listing products");
    products
}

/// Reads a single product container.
///
/// Plain attribute keys use overwrite semantics: when a key appears more
/// than once inside the container, the last element wins.
///
/// # Errors
///
/// Returns [`ExtractError::MissingField`] if the container has no name or
/// no price element.
pub fn extract_product(
    el: ElementRef<'_>,
    index: usize,
    base: Option<&Url>,
) -> Result<ProductRecord, ExtractError> {
    let name_el = el
        .select(&PRODUCT_NAME)
        .next()
        .ok_or(ExtractError::MissingField {
            index,
            field: "name",
        })?;
    let price_el = el
        .select(&PRODUCT_PRICE)
        .next()
        .ok_or(ExtractError::MissingField {
            index,
            field: "price",
        })?;

    let price = text_of(price_el);
    let price_numeric = parse_price(&price);
    let image = el
        .select(&PRODUCT_IMAGE)
        .next()
        .map(|img| image_src(img, base))
        .unwrap_or_default();

    let info = read_info([el], WriteMode::Overwrite);

    let excluded = el.value().attr(ACTION_ITEM_ATTR) == Some("false");
    let pinned = el.value().attr(PINNED_ATTR) == Some("true");

    Ok(ProductRecord {
        id: index,
        name: text_of(name_el),
        price,
        price_numeric,
        image,
        info,
        always_visible: excluded || pinned,
        pinned,
        visible: true,
    })
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
