use super::*;

const LISTING_PAGE: &str = r#"
<div class="product-item-grid">
  <div fd-product="item" fd-filters-pinned="true">
    <div fd-product="name">Starter Kit</div>
    <div fd-product="price">$0.00</div>
    <img fd-product="image" src="https://cdn.example.com/kit.png">
    <div fd-product-info="region">Global</div>
  </div>
  <div fd-product="item">
    <div fd-product="name"> Visa Credit Set </div>
    <div fd-product="price">$1,250.50 USD</div>
    <img fd-product="image" src="/img/visa.png">
    <div fd-product-info="region">Europe</div>
    <div fd-product-info="region">North America</div>
    <div fd-product-info="brand">
      <span fd-product-info="brand-name">Visa</span>
      <span fd-product-info="brand-name">Visa</span>
      <span fd-product-info="brand-name">Mastercard</span>
    </div>
    <div fd-product-info="card-type">Credit</div>
    <div fd-product-info="interface-type">Contact</div>
    <div fd-product-info="interface-type">Contactless</div>
    <div fd-product-info="interface-type">Contact</div>
    <div fd-product-info="sets-num">12</div>
    <div fd-product-info="mode-online">Yes</div>
    <div fd-product-info="mode-offline">No</div>
    <div fd-product-info="test-focus">Certification</div>
    <div fd-product-info="issuer">Acme Bank</div>
  </div>
  <div fd-product="item">
    <div fd-product="price">$5.00</div>
  </div>
  <div fd-product="item" fd-filters-action-item="false">
    <div fd-product="name">Custom Request</div>
    <div fd-product="price">Contact us</div>
    <div fd-product-info="sets-num">many</div>
    <div fd-product-info="brand">Amex</div>
  </div>
</div>
"#;

fn extract(page: &str) -> Vec<ProductRecord> {
    let html = Html::parse_document(page);
    let base = Url::parse("https://shop.example.com/merchant-test-cards").unwrap();
    extract_listing(&html, Some(&base))
}

#[test]
fn skips_containers_without_name_and_keeps_document_index() {
    let products = extract(LISTING_PAGE);
    let ids: Vec<usize> = products.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![0, 1, 3]);
}

#[test]
fn parses_display_and_numeric_price() {
    let products = extract(LISTING_PAGE);
    assert_eq!(products[1].name, "Visa Credit Set");
    assert_eq!(products[1].price, "$1,250.50 USD");
    assert!((products[1].price_numeric - 1250.5).abs() < f64::EPSILON);
    assert_eq!(products[2].price, "Contact us");
    assert!(products[2].price_numeric.abs() < f64::EPSILON);
}

#[test]
fn resolves_image_against_base_url() {
    let products = extract(LISTING_PAGE);
    assert_eq!(products[0].image, "https://cdn.example.com/kit.png");
    assert_eq!(products[1].image, "https://shop.example.com/img/visa.png");
    assert_eq!(products[2].image, "");
}

#[test]
fn plain_keys_overwrite_on_listing_page() {
    let products = extract(LISTING_PAGE);
    assert_eq!(products[1].info.region.as_deref(), Some("North America"));
    assert_eq!(products[1].info.card_type.as_deref(), Some("Credit"));
    assert_eq!(products[1].info.test_focus.as_deref(), Some("Certification"));
    assert_eq!(
        products[1].info.extra.get("issuer").map(String::as_str),
        Some("Acme Bank")
    );
}

#[test]
fn list_valued_keys_are_distinct_and_ordered() {
    let products = extract(LISTING_PAGE);
    assert_eq!(products[1].info.brand, vec!["Visa", "Mastercard"]);
    assert!(!products[1].info.extra.contains_key("brand-name"));
    assert_eq!(products[1].info.interface_type, vec!["Contact", "Contactless"]);
}

#[test]
fn brand_falls_back_to_own_text() {
    let products = extract(LISTING_PAGE);
    assert_eq!(products[2].info.brand, vec!["Amex"]);
}

#[test]
fn brand_and_interface_are_lists_even_when_absent() {
    let products = extract(LISTING_PAGE);
    assert!(products[0].info.brand.is_empty());
    assert!(products[0].info.interface_type.is_empty());
}

#[test]
fn sets_num_parses_or_defaults_to_zero() {
    let products = extract(LISTING_PAGE);
    assert_eq!(products[0].info.sets_num, None);
    assert_eq!(products[1].info.sets_num, Some(12));
    assert_eq!(products[2].info.sets_num, Some(0));
}

#[test]
fn pinned_and_excluded_containers_are_always_visible() {
    let products = extract(LISTING_PAGE);
    assert!(products[0].always_visible);
    assert!(products[0].pinned);
    assert!(!products[1].always_visible);
    assert!(products[2].always_visible);
    assert!(!products[2].pinned);
}

#[test]
fn reads_mode_flags() {
    let products = extract(LISTING_PAGE);
    let modes = &products[1].info.modes;
    assert_eq!(modes.online.as_deref(), Some("Yes"));
    assert_eq!(modes.offline.as_deref(), Some("No"));
    assert!(modes.online_pin.is_none());
}

#[test]
fn re_extraction_is_structurally_identical() {
    let first = extract(LISTING_PAGE);
    let second = extract(LISTING_PAGE);
    let a: Vec<ProductRecord> = first.iter().map(ProductRecord::structural).collect();
    let b: Vec<ProductRecord> = second.iter().map(ProductRecord::structural).collect();
    assert_eq!(a, b);
}

#[test]
fn page_without_containers_yields_nothing() {
    assert!(extract("<main><h1>About us</h1></main>").is_empty());
}

#[test]
fn extract_product_reports_missing_price() {
    let html = Html::parse_document(
        r#"<div fd-product="item"><div fd-product="name">No Price</div></div>"#,
    );
    let el = html.select(&PRODUCT_ITEM).next().unwrap();
    let err = extract_product(el, 7, None).unwrap_err();
    assert!(matches!(
        err,
        ExtractError::MissingField {
            index: 7,
            field: "price"
        }
    ));
}
