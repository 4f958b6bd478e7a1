//! The visibility predicate and the per-field value readers it shares with
//! option building and counting.

use fdshop_core::{FilterField, FilterSelections, InterfaceTypeMatching, Mode, ProductRecord};

/// Values a product offers for a checkbox field.
///
/// These are the strings that appear as options and that a selected option
/// is compared against. Empty values are never offered.
#[must_use]
pub fn field_values(
    product: &ProductRecord,
    field: FilterField,
    matching: InterfaceTypeMatching,
) -> Vec<String> {
    let info = &product.info;
    let single = |v: &Option<String>| -> Vec<String> {
        v.iter().filter(|s| !s.is_empty()).cloned().collect()
    };
    match field {
        FilterField::Region => single(&info.region),
        FilterField::CardType => single(&info.card_type),
        FilterField::TestFocus => single(&info.test_focus),
        FilterField::Brand => info.brand.clone(),
        FilterField::InterfaceType => match matching {
            InterfaceTypeMatching::AnyOf => info.interface_type.clone(),
            InterfaceTypeMatching::Joined => {
                let joined = info.interface_type_joined();
                if joined.is_empty() {
                    Vec::new()
                } else {
                    vec![joined]
                }
            }
        },
        FilterField::Modes => info
            .modes
            .enabled()
            .map(|m| m.label().to_string())
            .collect(),
    }
}

/// Whether `product` carries `value` for `field`.
#[must_use]
pub fn has_value(
    product: &ProductRecord,
    field: FilterField,
    value: &str,
    matching: InterfaceTypeMatching,
) -> bool {
    let info = &product.info;
    match field {
        FilterField::Region => info.region.as_deref() == Some(value),
        FilterField::CardType => info.card_type.as_deref() == Some(value),
        FilterField::TestFocus => info.test_focus.as_deref() == Some(value),
        FilterField::Brand => info.brand.iter().any(|b| b == value),
        FilterField::InterfaceType => match matching {
            InterfaceTypeMatching::AnyOf => info.interface_type.iter().any(|t| t == value),
            InterfaceTypeMatching::Joined => {
                !info.interface_type.is_empty() && info.interface_type_joined() == value
            }
        },
        FilterField::Modes => Mode::from_label(value).is_some_and(|m| info.modes.has(m)),
    }
}

fn matches_search(product: &ProductRecord, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    product.name.to_lowercase().contains(query)
        || product
            .info
            .searchable_values()
            .iter()
            .any(|v| v.to_lowercase().contains(query))
}

fn matches_field(
    product: &ProductRecord,
    selections: &FilterSelections,
    field: FilterField,
    matching: InterfaceTypeMatching,
) -> bool {
    let selected = selections.field(field);
    selected.is_empty() || selected.iter().any(|v| has_value(product, field, v, matching))
}

/// Evaluates every filter against one product.
///
/// Checks run in a fixed order and stop at the first failure: search,
/// region, brand, card type, interface type, modes, test focus, then the
/// sets range. Products without a set count pass the range check.
#[must_use]
pub fn matches(
    product: &ProductRecord,
    selections: &FilterSelections,
    matching: InterfaceTypeMatching,
) -> bool {
    const ORDER: [FilterField; 6] = [
        FilterField::Region,
        FilterField::Brand,
        FilterField::CardType,
        FilterField::InterfaceType,
        FilterField::Modes,
        FilterField::TestFocus,
    ];

    matches_search(product, &selections.search)
        && ORDER
            .into_iter()
            .all(|field| matches_field(product, selections, field, matching))
        && product
            .info
            .sets_num
            .is_none_or(|n| selections.sets_num.contains(n))
}
