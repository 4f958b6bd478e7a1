//! The slide-out cart panel.

use fdshop_cart::{CartStore, Storage};
use fdshop_core::CartLineItem;
use serde::Serialize;

use crate::quantity::parse_quantity;

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// One rendered cart row; optional fields are blank when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRow {
    pub name: String,
    pub price: String,
    pub image: String,
    pub quantity: u32,
    pub sets_num: String,
    pub card_type: String,
    pub brand: String,
    pub interface_type: String,
}

impl From<&CartLineItem> for CartRow {
    fn from(item: &CartLineItem) -> Self {
        Self {
            name: item.name.clone(),
            price: item.price.clone(),
            image: item.image.clone(),
            quantity: item.quantity,
            sets_num: item.sets_num_text(),
            card_type: item.card_type.clone(),
            brand: item.brand.clone(),
            interface_type: item.interface_type.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPanelView {
    pub rows: Vec<CartRow>,
    /// Set when the cart has no rows.
    pub empty_message: Option<&'static str>,
    pub items_count: String,
    /// With the currency sign, e.g. `"$25.50"`.
    pub subtotal: String,
}

/// Where the checkout button leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutGate {
    /// Nothing to check out; show [`EMPTY_CART_MESSAGE`].
    Empty,
    Redirect(String),
}

/// Reads the cart for display and routes row actions back into the store.
pub struct CartPanel<'a, S: Storage> {
    store: &'a CartStore<S>,
}

impl<'a, S: Storage> CartPanel<'a, S> {
    #[must_use]
    pub fn new(store: &'a CartStore<S>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn render(&self) -> CartPanelView {
        let items = self.store.cart();
        let totals = fdshop_core::CartTotals::from_items(&items);
        CartPanelView {
            empty_message: items.is_empty().then_some(EMPTY_CART_MESSAGE),
            rows: items.iter().map(CartRow::from).collect(),
            items_count: totals.item_count.to_string(),
            subtotal: format!("${}", totals.subtotal),
        }
    }

    /// One less, never below 1. Returns the quantity now shown.
    pub fn decrement(&self, name: &str) -> u32 {
        let next = self.current(name).saturating_sub(1).max(1);
        self.store.update_quantity(name, next);
        next
    }

    pub fn increment(&self, name: &str) -> u32 {
        let next = self.current(name).saturating_add(1);
        self.store.update_quantity(name, next);
        next
    }

    /// Applies typed quantity text (`parseInt || 1`).
    pub fn set_quantity_text(&self, name: &str, text: &str) -> u32 {
        let next = parse_quantity(text);
        self.store.update_quantity(name, next);
        next
    }

    pub fn remove(&self, name: &str) {
        self.store.remove_item(name);
    }

    fn current(&self, name: &str) -> u32 {
        self.store.find(name).map_or(1, |item| item.quantity)
    }
}

/// Decides what the panel's checkout button does.
#[must_use]
pub fn checkout_gate<S: Storage>(store: &CartStore<S>, checkout_path: &str) -> CheckoutGate {
    if store.cart().is_empty() {
        tracing::debug!("checkout blocked, cart is empty");
        CheckoutGate::Empty
    } else {
        CheckoutGate::Redirect(checkout_path.to_string())
    }
}
