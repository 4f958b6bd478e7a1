use std::collections::BTreeSet;

use serde::Serialize;

/// Checkbox filter groups, keyed by their `fd-filter-group` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterField {
    Region,
    Brand,
    CardType,
    InterfaceType,
    Modes,
    TestFocus,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Region,
        FilterField::Brand,
        FilterField::CardType,
        FilterField::InterfaceType,
        FilterField::Modes,
        FilterField::TestFocus,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            FilterField::Region => "region",
            FilterField::Brand => "brand",
            FilterField::CardType => "card-type",
            FilterField::InterfaceType => "interface-type",
            FilterField::Modes => "modes",
            FilterField::TestFocus => "test-focus",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl std::fmt::Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// How the interface-type filter reads a product's interface types.
///
/// Products carry a list of interface types. `AnyOf` treats the field like
/// `brand`: options are the individual values and a product matches when any
/// selected value is in its list. `Joined` treats the list as one raw value
/// (`", "`-joined) for options, counts and matching, which is how the field
/// behaved on the live listing page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterfaceTypeMatching {
    #[default]
    AnyOf,
    Joined,
}

/// Inclusive bounds on a product's set count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetsRange {
    pub min: u32,
    pub max: u32,
}

impl SetsRange {
    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }
}

impl Default for SetsRange {
    fn default() -> Self {
        Self { min: 0, max: 99_999 }
    }
}

/// One generation of filter choices. An empty set accepts everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterSelections {
    /// Lowercased search text.
    pub search: String,
    pub region: BTreeSet<String>,
    pub brand: BTreeSet<String>,
    #[serde(rename = "card-type")]
    pub card_type: BTreeSet<String>,
    #[serde(rename = "interface-type")]
    pub interface_type: BTreeSet<String>,
    pub modes: BTreeSet<String>,
    #[serde(rename = "test-focus")]
    pub test_focus: BTreeSet<String>,
    #[serde(rename = "sets-num")]
    pub sets_num: SetsRange,
}

impl FilterSelections {
    #[must_use]
    pub fn field(&self, field: FilterField) -> &BTreeSet<String> {
        match field {
            FilterField::Region => &self.region,
            FilterField::Brand => &self.brand,
            FilterField::CardType => &self.card_type,
            FilterField::InterfaceType => &self.interface_type,
            FilterField::Modes => &self.modes,
            FilterField::TestFocus => &self.test_focus,
        }
    }

    pub fn field_mut(&mut self, field: FilterField) -> &mut BTreeSet<String> {
        match field {
            FilterField::Region => &mut self.region,
            FilterField::Brand => &mut self.brand,
            FilterField::CardType => &mut self.card_type,
            FilterField::InterfaceType => &mut self.interface_type,
            FilterField::Modes => &mut self.modes,
            FilterField::TestFocus => &mut self.test_focus,
        }
    }

    /// Stores the search text lowercased.
    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_lowercase();
    }

    /// Empties every checkbox set and the search text; the sets range is kept.
    pub fn clear_choices(&mut self) {
        let sets_num = self.sets_num;
        *self = Self {
            sets_num,
            ..Self::default()
        };
    }

    /// `true` when no checkbox is selected and the search text is empty.
    #[must_use]
    pub fn has_no_choices(&self) -> bool {
        self.search.is_empty() && FilterField::ALL.iter().all(|f| self.field(*f).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_keys_roundtrip() {
        for field in FilterField::ALL {
            assert_eq!(FilterField::from_key(field.key()), Some(field));
        }
        assert_eq!(FilterField::from_key("sets-num"), None);
    }

    #[test]
    fn sets_range_is_inclusive() {
        let range = SetsRange { min: 5, max: 5 };
        assert!(range.contains(5));
        assert!(!range.contains(4));
        assert!(!range.contains(6));
    }

    #[test]
    fn default_sets_range_is_wide_open() {
        let range = SetsRange::default();
        assert_eq!(range.min, 0);
        assert_eq!(range.max, 99_999);
    }

    #[test]
    fn search_is_lowercased() {
        let mut sel = FilterSelections::default();
        sel.set_search("ViSa Debit");
        assert_eq!(sel.search, "visa debit");
    }

    #[test]
    fn clear_choices_keeps_range() {
        let mut sel = FilterSelections::default();
        sel.set_search("visa");
        sel.field_mut(FilterField::Brand).insert("Visa".to_string());
        sel.field_mut(FilterField::Modes).insert("Online".to_string());
        sel.sets_num = SetsRange { min: 2, max: 8 };

        sel.clear_choices();

        assert!(sel.has_no_choices());
        assert_eq!(sel.sets_num, SetsRange { min: 2, max: 8 });
    }
}
