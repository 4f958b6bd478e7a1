use std::collections::{BTreeMap, BTreeSet};

use fdshop_core::{FilterField, InterfaceTypeMatching, ProductRecord};
use serde::Serialize;

use crate::predicate::{field_values, has_value};

/// Checkbox options per field: distinct values, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    lists: BTreeMap<FilterField, Vec<String>>,
}

impl FilterOptions {
    /// Collects options from the given products only.
    #[must_use]
    pub fn build(products: &[ProductRecord], matching: InterfaceTypeMatching) -> Self {
        let mut lists = BTreeMap::new();
        for field in FilterField::ALL {
            let distinct: BTreeSet<String> = products
                .iter()
                .flat_map(|p| field_values(p, field, matching))
                .collect();
            lists.insert(field, distinct.into_iter().collect());
        }
        Self { lists }
    }

    #[must_use]
    pub fn values(&self, field: FilterField) -> &[String] {
        self.lists.get(&field).map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterField, &[String])> {
        self.lists.iter().map(|(f, v)| (*f, v.as_slice()))
    }
}

/// Per-option product counts, each computed as if that option were the only
/// selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionCounts {
    counts: BTreeMap<FilterField, Vec<(String, usize)>>,
}

impl OptionCounts {
    #[must_use]
    pub fn compute(
        products: &[ProductRecord],
        options: &FilterOptions,
        matching: InterfaceTypeMatching,
    ) -> Self {
        let counts = options
            .iter()
            .map(|(field, values)| {
                let per_value = values
                    .iter()
                    .map(|value| {
                        let n = products
                            .iter()
                            .filter(|p| has_value(p, field, value, matching))
                            .count();
                        (value.clone(), n)
                    })
                    .collect();
                (field, per_value)
            })
            .collect();
        Self { counts }
    }

    #[must_use]
    pub fn get(&self, field: FilterField, value: &str) -> Option<usize> {
        self.counts
            .get(&field)?
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, n)| *n)
    }

    #[must_use]
    pub fn field(&self, field: FilterField) -> &[(String, usize)] {
        self.counts.get(&field).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(name: &str, brands: &[&str], interfaces: &[&str]) -> ProductRecord {
        let mut product = ProductRecord::new(0, name, "$1.00");
        for brand in brands {
            product.info.push_brand(brand);
        }
        for interface in interfaces {
            product.info.push_interface_type(interface);
        }
        product
    }

    fn fixture() -> Vec<ProductRecord> {
        let mut a = make_product("A", &["Visa", "Maestro"], &["Contact", "Contactless"]);
        a.info.region = Some("Europe".to_string());
        a.info.set_text("mode-online", "Yes", true);
        let mut b = make_product("B", &["Visa"], &["Contactless"]);
        b.info.region = Some("Asia".to_string());
        b.info.set_text("mode-offline", "Yes", true);
        b.info.set_text("mode-online", "Yes", true);
        let c = make_product("C", &["Amex"], &[]);
        vec![a, b, c]
    }

    #[test]
    fn options_are_sorted_and_distinct() {
        let options = FilterOptions::build(&fixture(), InterfaceTypeMatching::AnyOf);
        assert_eq!(options.values(FilterField::Brand), ["Amex", "Maestro", "Visa"]);
        assert_eq!(options.values(FilterField::Region), ["Asia", "Europe"]);
        assert_eq!(options.values(FilterField::Modes), ["Offline", "Online"]);
        assert_eq!(
            options.values(FilterField::InterfaceType),
            ["Contact", "Contactless"]
        );
        assert!(options.values(FilterField::TestFocus).is_empty());
    }

    #[test]
    fn joined_matching_offers_whole_values() {
        let options = FilterOptions::build(&fixture(), InterfaceTypeMatching::Joined);
        assert_eq!(
            options.values(FilterField::InterfaceType),
            ["Contact, Contactless", "Contactless"]
        );
    }

    #[test]
    fn counts_treat_each_option_in_isolation() {
        let products = fixture();
        let options = FilterOptions::build(&products, InterfaceTypeMatching::AnyOf);
        let counts = OptionCounts::compute(&products, &options, InterfaceTypeMatching::AnyOf);
        assert_eq!(counts.get(FilterField::Brand, "Visa"), Some(2));
        assert_eq!(counts.get(FilterField::Brand, "Amex"), Some(1));
        assert_eq!(counts.get(FilterField::Modes, "Online"), Some(2));
        assert_eq!(counts.get(FilterField::InterfaceType, "Contactless"), Some(2));
        assert_eq!(counts.get(FilterField::Brand, "Discover"), None);
    }

    #[test]
    fn joined_counts_match_whole_values() {
        let products = fixture();
        let options = FilterOptions::build(&products, InterfaceTypeMatching::Joined);
        let counts = OptionCounts::compute(&products, &options, InterfaceTypeMatching::Joined);
        assert_eq!(counts.get(FilterField::InterfaceType, "Contactless"), Some(1));
        assert_eq!(
            counts.get(FilterField::InterfaceType, "Contact, Contactless"),
            Some(1)
        );
    }
}
