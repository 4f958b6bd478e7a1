use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::slider::{Handle, RangeSlider};

fn make_product(id: usize, name: &str, brand: &str, sets: Option<u32>) -> ProductRecord {
    let mut product = ProductRecord::new(id, name, "$10.00");
    product.info.push_brand(brand);
    product.info.sets_num = sets;
    product
}

fn make_pinned(id: usize, name: &str) -> ProductRecord {
    let mut product = ProductRecord::new(id, name, "$0.00");
    product.pinned = true;
    product.always_visible = true;
    product
}

/// Ids 0..=4: a filterable Visa, a pinned kit, a Mastercard, an excluded
/// item, another Visa with no set count.
fn fixture() -> Vec<ProductRecord> {
    let mut excluded = make_product(3, "Custom Request", "Amex", None);
    excluded.always_visible = true;
    vec![
        make_product(0, "Visa Credit", "Visa", Some(4)),
        make_pinned(1, "Starter Kit"),
        make_product(2, "Mastercard Debit", "Mastercard", Some(10)),
        excluded,
        make_product(4, "Visa Prepaid", "Visa", None),
    ]
}

fn make_engine() -> FilterEngine {
    FilterEngine::init(fixture(), EngineOptions::default()).unwrap()
}

#[test]
fn init_with_no_products_is_a_no_op() {
    assert!(FilterEngine::init(Vec::new(), EngineOptions::default()).is_none());
}

#[test]
fn initial_layout_shows_forced_first_then_everything() {
    let engine = make_engine();
    let layout = engine.layout();
    assert_eq!(layout.order, vec![1, 3, 0, 2, 4]);
    assert_eq!(layout.results_count, 5);
    assert_eq!(layout.items_count, 5);
    assert_eq!(engine.phase(), FilterPhase::Idle);
    assert!(engine.applied().is_none());
}

#[test]
fn options_come_from_filterable_products_only() {
    let engine = make_engine();
    let options = engine.options();
    assert_eq!(options.values(FilterField::Brand), ["Mastercard", "Visa"]);
}

#[test]
fn initial_sets_range_spans_positive_counts() {
    let engine = make_engine();
    assert_eq!(engine.live().sets_num, SetsRange { min: 4, max: 10 });
}

#[test]
fn initial_sets_range_without_counts_is_zero() {
    let products = vec![make_product(0, "A", "Visa", None)];
    let engine = FilterEngine::init(products, EngineOptions::default()).unwrap();
    assert_eq!(engine.live().sets_num, SetsRange { min: 0, max: 0 });
}

#[test]
fn live_edits_change_candidates_but_not_visibility() {
    let engine = make_engine();
    assert_eq!(engine.candidate_count(), 3);

    engine.toggle(FilterField::Brand, "Visa", true);
    assert_eq!(engine.candidate_count(), 2);
    assert_eq!(engine.phase(), FilterPhase::LiveEditing);
    assert!(engine.is_checked(FilterField::Brand, "Visa"));
    assert_eq!(engine.layout().order, vec![1, 3, 0, 2, 4]);
    assert_eq!(engine.is_visible(2), Some(true));
}

#[test]
fn apply_snapshots_live_and_orders_forced_first() {
    let engine = make_engine();
    engine.toggle(FilterField::Brand, "Mastercard", true);
    let layout = engine.apply_filters();

    assert_eq!(layout.order, vec![1, 3, 2]);
    assert_eq!(layout.results_count, 3);
    assert_eq!(layout.items_count, 5);
    assert_eq!(engine.phase(), FilterPhase::Applied);
    assert_eq!(engine.is_visible(0), Some(false));
    assert_eq!(engine.is_visible(3), Some(true));
}

#[test]
fn applied_snapshot_is_isolated_from_later_edits() {
    let engine = make_engine();
    engine.toggle(FilterField::Brand, "Visa", true);
    engine.apply_filters();

    engine.toggle(FilterField::Brand, "Visa", false);
    engine.set_search("mastercard");

    let applied = engine.applied().unwrap();
    assert!(applied.selections().brand.contains("Visa"));
    assert!(applied.selections().search.is_empty());
    assert_eq!(engine.layout().order, vec![1, 3, 0, 4]);
    assert_eq!(engine.candidate_count(), 1);
    assert_eq!(engine.phase(), FilterPhase::LiveEditing);
}

#[test]
fn unchecking_removes_the_value() {
    let engine = make_engine();
    engine.toggle(FilterField::Brand, "Visa", true);
    engine.toggle(FilterField::Brand, "Visa", false);
    assert!(!engine.is_checked(FilterField::Brand, "Visa"));
    assert_eq!(engine.candidate_count(), 3);
    assert_eq!(engine.phase(), FilterPhase::LiveEditing);
}

#[test]
fn sets_range_edits_filter_numeric_products_only() {
    let engine = make_engine();
    engine.set_sets_range(5, 10);
    assert_eq!(engine.candidate_count(), 2);
    engine.set_sets_max(9);
    assert_eq!(engine.live().sets_num, SetsRange { min: 5, max: 9 });
    assert_eq!(engine.candidate_count(), 1);
    engine.set_sets_min(4);
    assert_eq!(engine.candidate_count(), 2);
    let layout = engine.apply_filters();
    assert_eq!(layout.order, vec![1, 3, 0, 4]);
}

#[test]
fn slider_gestures_commit_ranges_to_the_engine() {
    let engine = make_engine();
    let mut slider = RangeSlider::new(0, 20);

    slider.start_drag(Handle::Right);
    assert!(slider.drag_to(25.0));
    let range = slider.stop_drag().unwrap();
    assert_eq!(range, SetsRange { min: 0, max: 5 });
    engine.set_sets_range(range.min, range.max);
    assert_eq!(engine.candidate_count(), 2);

    let range = slider.set_max_text("12");
    engine.set_sets_range(range.min, range.max);
    assert_eq!(engine.live().sets_num, SetsRange { min: 0, max: 12 });
    assert_eq!(engine.candidate_count(), 3);

    let layout = engine.apply_filters();
    assert_eq!(layout.order, vec![1, 3, 0, 2, 4]);
}

#[test]
fn clear_keeps_range_and_unchecks_everything() {
    let engine = make_engine();
    engine.set_sets_range(5, 10);
    engine.toggle(FilterField::Brand, "Visa", true);
    engine.set_search("visa");
    engine.clear_selections();

    let live = engine.live();
    assert!(live.has_no_choices());
    assert_eq!(live.sets_num, SetsRange { min: 5, max: 10 });
    assert!(!engine.is_checked(FilterField::Brand, "Visa"));
    assert_eq!(engine.candidate_count(), 2);
    assert!(engine.applied().is_none());
}

#[test]
fn individual_counts_ignore_forced_products() {
    let engine = make_engine();
    let counts = engine.individual_counts();
    assert_eq!(counts.get(FilterField::Brand, "Visa"), Some(2));
    assert_eq!(counts.get(FilterField::Brand, "Amex"), None);
}

#[test]
fn apply_notifies_and_subscribers_can_read_the_engine() {
    let engine = Rc::new(make_engine());
    let seen = Rc::new(Cell::new(0_usize));
    {
        let reader = Rc::downgrade(&engine);
        let seen = Rc::clone(&seen);
        engine.subscribe(move || {
            if let Some(engine) = reader.upgrade() {
                seen.set(engine.layout().results_count);
            }
        });
    }
    engine.toggle(FilterField::Brand, "Visa", true);
    assert_eq!(seen.get(), 0);
    engine.apply_filters();
    assert_eq!(seen.get(), 4);
}

#[test]
fn repeated_apply_is_deterministic() {
    let engine = make_engine();
    engine.set_search("visa");
    let first = engine.apply_filters();
    let second = engine.apply_filters();
    assert_eq!(first, second);
}

#[test]
fn joined_interface_matching_is_configurable() {
    let mut product = make_product(0, "Dual", "Visa", None);
    product.info.push_interface_type("Contact");
    product.info.push_interface_type("Contactless");
    let options = EngineOptions {
        interface_type_matching: InterfaceTypeMatching::Joined,
    };
    let engine = FilterEngine::init(vec![product], options).unwrap();
    assert_eq!(
        engine.options().values(FilterField::InterfaceType),
        ["Contact, Contactless"]
    );
    engine.toggle(FilterField::InterfaceType, "Contact, Contactless", true);
    assert_eq!(engine.candidate_count(), 1);
}

#[test]
fn layout_serializes_in_camel_case() {
    let engine = make_engine();
    let value = serde_json::to_value(engine.layout()).unwrap();
    assert_eq!(value["resultsCount"], 5);
    assert_eq!(value["itemsCount"], 5);
}
