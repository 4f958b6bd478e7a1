//! Product-detail-page extraction.
//!
//! The detail page has a single product whose attributes are spread over
//! several tables. A key repeated across tables keeps its first non-empty
//! value, unlike the listing page.

use fdshop_core::products::parse_price;
use fdshop_core::ProductRecord;
use scraper::Html;
use url::Url;

use crate::error::ExtractError;
use crate::info::{read_info, WriteMode};
use crate::markers::{
    image_src, text_of, DETAIL_IMAGE, DETAIL_NAME, DETAIL_PRICE, DETAIL_TABLE, DETAIL_TABLE_DATA,
};

/// Reads the product shown on a product-detail page.
///
/// # Errors
///
/// Returns [`ExtractError::MissingDetailField`] if the heading or the price
/// element is absent.
pub fn extract_detail(html: &Html, base: Option<&Url>) -> Result<ProductRecord, ExtractError> {
    let name_el = html
        .select(&DETAIL_NAME)
        .next()
        .ok_or(ExtractError::MissingDetailField { field: "name" })?;
    let price_el = html
        .select(&DETAIL_PRICE)
        .next()
        .ok_or(ExtractError::MissingDetailField { field: "price" })?;

    let price = text_of(price_el);
    let price_numeric = parse_price(&price);
    let image = html
        .select(&DETAIL_IMAGE)
        .next()
        .map(|img| image_src(img, base))
        .unwrap_or_default();

    let tables = html
        .select(&DETAIL_TABLE_DATA)
        .take(1)
        .chain(html.select(&DETAIL_TABLE));
    let info = read_info(tables, WriteMode::FirstWrite);

    let product = ProductRecord {
        id: 0,
        name: text_of(name_el),
        price,
        price_numeric,
        image,
        info,
        always_visible: false,
        pinned: false,
        visible: true,
    };
    tracing::debug!(name = %product.name, "extracted detail product");
    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL_PAGE: &str = r#"
        <div class="product-header3_product-details">
          <div class="product-detail-head"><h1> Visa Contactless Set </h1></div>
          <div class="product-header3_price-wrapper">
            <div class="heading-style-h3">$249.00</div>
          </div>
          <img class="product-header3_main-image" src="/images/visa.png">
          <div class="product-details-table-data">
            <div fd-product-info="region">Europe</div>
            <div fd-product-info="card-type"></div>
            <div fd-product-info="brand">
              <div role="list">
                <div role="listitem">Visa</div>
                <div role="listitem">Visa</div>
                <div role="listitem">V Pay</div>
              </div>
            </div>
          </div>
          <table class="product-details-table">
            <tr><td fd-product-info="region">North America</td></tr>
            <tr><td fd-product-info="card-type">Debit</td></tr>
            <tr><td fd-product-info="sets-num">6</td></tr>
            <tr><td fd-product-info="interface-type">Contact</td></tr>
            <tr><td fd-product-info="interface-type">Contactless</td></tr>
            <tr><td fd-product-info="brand">Maestro</td></tr>
          </table>
        </div>
    "#;

    #[test]
    fn reads_heading_price_and_image() {
        let html = Html::parse_document(DETAIL_PAGE);
        let base = Url::parse("https://shop.example.com/cards/visa").unwrap();
        let product = extract_detail(&html, Some(&base)).unwrap();
        assert_eq!(product.name, "Visa Contactless Set");
        assert_eq!(product.price, "$249.00");
        assert!((product.price_numeric - 249.0).abs() < f64::EPSILON);
        assert_eq!(product.image, "https://shop.example.com/images/visa.png");
    }

    #[test]
    fn first_non_empty_value_wins_across_tables() {
        let html = Html::parse_document(DETAIL_PAGE);
        let product = extract_detail(&html, None).unwrap();
        assert_eq!(product.info.region.as_deref(), Some("Europe"));
        assert_eq!(product.info.card_type.as_deref(), Some("Debit"));
        assert_eq!(product.info.sets_num, Some(6));
    }

    #[test]
    fn brands_accumulate_with_list_item_and_own_text_fallbacks() {
        let html = Html::parse_document(DETAIL_PAGE);
        let product = extract_detail(&html, None).unwrap();
        assert_eq!(product.info.brand, vec!["Visa", "V Pay", "Maestro"]);
        assert_eq!(product.info.interface_type, vec!["Contact", "Contactless"]);
    }

    #[test]
    fn missing_price_is_an_error() {
        let html = Html::parse_document(
            r#"<div class="product-detail-head"><h1>Orphan</h1></div>"#,
        );
        let err = extract_detail(&html, None).unwrap_err();
        assert!(matches!(err, ExtractError::MissingDetailField { field: "price" }));
    }

    #[test]
    fn missing_heading_is_an_error() {
        let html = Html::parse_document("<main><p>No product here</p></main>");
        let err = extract_detail(&html, None).unwrap_err();
        assert!(matches!(err, ExtractError::MissingDetailField { field: "name" }));
    }
}
