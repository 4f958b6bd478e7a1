use fdshop_core::ProductInfo;
use scraper::ElementRef;

use crate::markers::{text_of, BRAND_NAME, BRAND_NAME_KEY, INFO_ATTR, LIST_ITEM, PRODUCT_INFO};

/// What happens when a plain attribute key shows up more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteMode {
    /// Last element wins (listing page).
    Overwrite,
    /// First non-empty element wins (product-detail page).
    FirstWrite,
}

/// Builds the attribute bag from every `fd-product-info` element below the
/// given scopes, visited in scope order then document order.
pub(crate) fn read_info<'a, I>(scopes: I, mode: WriteMode) -> ProductInfo
where
    I: IntoIterator<Item = ElementRef<'a>>,
{
    let mut info = ProductInfo::default();

    for scope in scopes {
        for el in scope.select(&PRODUCT_INFO) {
            let Some(key) = el.value().attr(INFO_ATTR).filter(|k| !k.is_empty()) else {
                continue;
            };
            // consumed by the enclosing brand element
            if key == BRAND_NAME_KEY {
                continue;
            }

            if key == "brand" {
                let brands = brand_values(el);
                match mode {
                    WriteMode::Overwrite => info.brand = brands,
                    WriteMode::FirstWrite => {
                        for brand in &brands {
                            info.push_brand(brand);
                        }
                    }
                }
                tracing::debug!(brands = ?info.brand, "brands found");
                continue;
            }

            info.set_text(key, &text_of(el), mode == WriteMode::Overwrite);
        }
    }

    info
}

/// Distinct brand names under a `brand` element, in order of first appearance.
///
/// Nested `brand-name` markers take precedence, then dynamic-list items, then
/// the element's own text as a single entry.
fn brand_values(el: ElementRef<'_>) -> Vec<String> {
    let mut sources: Vec<ElementRef<'_>> = el.select(&BRAND_NAME).collect();
    if sources.is_empty() {
        sources = el.select(&LIST_ITEM).collect();
    }
    if sources.is_empty() {
        sources.push(el);
    }

    let mut brands: Vec<String> = Vec::new();
    for source in sources {
        let text = text_of(source);
        if !text.is_empty() && !brands.contains(&text) {
            brands.push(text);
        }
    }
    brands
}
