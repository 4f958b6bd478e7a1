use std::cell::RefCell;

use fdshop_core::{
    FilterField, FilterSelections, InterfaceTypeMatching, Notifier, ProductRecord, SetsRange,
    SubscriptionId,
};
use serde::Serialize;

use crate::options::{FilterOptions, OptionCounts};
use crate::predicate::matches;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    pub interface_type_matching: InterfaceTypeMatching,
}

/// Where the engine is between edits and applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterPhase {
    /// Initialised, nothing edited or applied yet.
    Idle,
    /// Live selections edited since the last apply, even if an edit was
    /// undone.
    LiveEditing,
    /// The grid reflects the last applied snapshot.
    Applied,
}

/// Selections frozen by "View Items". Only [`AppliedSelections::from_live`]
/// creates one, so the grid can never observe in-progress edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedSelections(FilterSelections);

impl AppliedSelections {
    #[must_use]
    pub fn from_live(live: &FilterSelections) -> Self {
        Self(live.clone())
    }

    #[must_use]
    pub fn selections(&self) -> &FilterSelections {
        &self.0
    }
}

/// Grid order and counters after an apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayout {
    /// Product ids in display order: forced products, then visible
    /// filterable products, each in original order.
    pub order: Vec<usize>,
    /// Visible products, forced ones included.
    pub results_count: usize,
    /// All products.
    pub items_count: usize,
}

#[derive(Debug)]
struct EngineState {
    forced: Vec<ProductRecord>,
    filterable: Vec<ProductRecord>,
    options: FilterOptions,
    counts: OptionCounts,
    live: FilterSelections,
    applied: Option<AppliedSelections>,
    phase: FilterPhase,
    candidate_count: usize,
    layout: GridLayout,
}

impl EngineState {
    fn recount(&mut self, matching: InterfaceTypeMatching) {
        self.candidate_count = self
            .filterable
            .iter()
            .filter(|p| matches(p, &self.live, matching))
            .count();
        self.phase = FilterPhase::LiveEditing;
        tracing::debug!(candidates = self.candidate_count, "live selections changed");
    }

    fn relayout(&mut self) {
        let order: Vec<usize> = self
            .forced
            .iter()
            .chain(self.filterable.iter().filter(|p| p.visible))
            .map(|p| p.id)
            .collect();
        self.layout = GridLayout {
            results_count: order.len(),
            items_count: self.forced.len() + self.filterable.len(),
            order,
        };
    }
}

/// Checkbox, search and sets-range filtering over one page of products.
///
/// Edits go to the live selections and only change the candidate count.
/// [`FilterEngine::apply_filters`] snapshots them, recomputes visibility
/// and notifies subscribers. Methods take `&self` so subscribers may read
/// the engine while being notified.
#[derive(Debug)]
pub struct FilterEngine {
    options: EngineOptions,
    state: RefCell<EngineState>,
    notifier: Notifier,
}

impl FilterEngine {
    /// Builds the engine for a page. Returns `None` when there are no
    /// products.
    #[must_use]
    pub fn init(products: Vec<ProductRecord>, options: EngineOptions) -> Option<Self> {
        if products.is_empty() {
            return None;
        }
        let matching = options.interface_type_matching;
        let (forced, mut filterable): (Vec<_>, Vec<_>) =
            products.into_iter().partition(|p| p.always_visible);

        let filter_options = FilterOptions::build(&filterable, matching);
        let counts = OptionCounts::compute(&filterable, &filter_options, matching);
        let live = FilterSelections {
            sets_num: initial_sets_range(&filterable),
            ..FilterSelections::default()
        };
        let candidate_count = filterable
            .iter()
            .filter(|p| matches(p, &live, matching))
            .count();
        for product in &mut filterable {
            product.visible = true;
        }

        let mut state = EngineState {
            forced,
            filterable,
            options: filter_options,
            counts,
            live,
            applied: None,
            phase: FilterPhase::Idle,
            candidate_count,
            layout: GridLayout::default(),
        };
        for product in &mut state.forced {
            product.visible = true;
        }
        state.relayout();
        tracing::debug!(
            forced = state.forced.len(),
            filterable = state.filterable.len(),
            candidates = candidate_count,
            "filter engine initialised"
        );

        Some(Self {
            options,
            state: RefCell::new(state),
            notifier: Notifier::new(),
        })
    }

    pub fn toggle(&self, field: FilterField, value: &str, checked: bool) {
        let mut state = self.state.borrow_mut();
        let set = state.live.field_mut(field);
        if checked {
            set.insert(value.to_string());
        } else {
            set.remove(value);
        }
        state.recount(self.options.interface_type_matching);
    }

    pub fn set_search(&self, query: &str) {
        let mut state = self.state.borrow_mut();
        state.live.set_search(query);
        state.recount(self.options.interface_type_matching);
    }

    pub fn set_sets_range(&self, min: u32, max: u32) {
        let mut state = self.state.borrow_mut();
        state.live.sets_num = SetsRange { min, max };
        state.recount(self.options.interface_type_matching);
    }

    pub fn set_sets_min(&self, min: u32) {
        let max = self.state.borrow().live.sets_num.max;
        self.set_sets_range(min, max);
    }

    pub fn set_sets_max(&self, max: u32) {
        let min = self.state.borrow().live.sets_num.min;
        self.set_sets_range(min, max);
    }

    /// Empties checkboxes and search, keeping the sets range. The grid is
    /// left as it is until the next apply.
    pub fn clear_selections(&self) {
        let mut state = self.state.borrow_mut();
        state.live.clear_choices();
        state.recount(self.options.interface_type_matching);
    }

    /// Freezes the live selections, recomputes visibility and grid order,
    /// and notifies subscribers.
    pub fn apply_filters(&self) -> GridLayout {
        let layout = {
            let mut state = self.state.borrow_mut();
            let applied = AppliedSelections::from_live(&state.live);
            let matching = self.options.interface_type_matching;
            for product in &mut state.filterable {
                product.visible = matches(product, applied.selections(), matching);
            }
            state.applied = Some(applied);
            state.phase = FilterPhase::Applied;
            state.relayout();
            tracing::debug!(
                results = state.layout.results_count,
                items = state.layout.items_count,
                "filters applied"
            );
            state.layout.clone()
        };
        self.notifier.notify();
        layout
    }

    #[must_use]
    pub fn layout(&self) -> GridLayout {
        self.state.borrow().layout.clone()
    }

    /// Filterable products the live selections would show if applied now.
    #[must_use]
    pub fn candidate_count(&self) -> usize {
        self.state.borrow().candidate_count
    }

    #[must_use]
    pub fn phase(&self) -> FilterPhase {
        self.state.borrow().phase
    }

    #[must_use]
    pub fn options(&self) -> FilterOptions {
        self.state.borrow().options.clone()
    }

    /// Per-option counts over the filterable products, fixed at init.
    #[must_use]
    pub fn individual_counts(&self) -> OptionCounts {
        self.state.borrow().counts.clone()
    }

    #[must_use]
    pub fn is_checked(&self, field: FilterField, value: &str) -> bool {
        self.state.borrow().live.field(field).contains(value)
    }

    #[must_use]
    pub fn live(&self) -> FilterSelections {
        self.state.borrow().live.clone()
    }

    /// The last applied snapshot; `None` before the first apply.
    #[must_use]
    pub fn applied(&self) -> Option<AppliedSelections> {
        self.state.borrow().applied.clone()
    }

    /// Every product in grid-partition order (forced, then filterable) with
    /// its current `visible` flag.
    #[must_use]
    pub fn products(&self) -> Vec<ProductRecord> {
        let state = self.state.borrow();
        state
            .forced
            .iter()
            .chain(state.filterable.iter())
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn is_visible(&self, id: usize) -> Option<bool> {
        let state = self.state.borrow();
        state
            .forced
            .iter()
            .chain(state.filterable.iter())
            .find(|p| p.id == id)
            .map(|p| p.visible)
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static,
    {
        self.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }
}

/// Range spanning every positive set count; `{0, 0}` when there is none.
fn initial_sets_range(products: &[ProductRecord]) -> SetsRange {
    let counts = || {
        products
            .iter()
            .filter_map(|p| p.info.sets_num)
            .filter(|n| *n > 0)
    };
    match (counts().min(), counts().max()) {
        (Some(min), Some(max)) => SetsRange { min, max },
        _ => SetsRange { min: 0, max: 0 },
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
