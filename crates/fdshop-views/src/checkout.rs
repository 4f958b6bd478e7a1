//! The checkout page: line totals, tax summary, and the product-details
//! text submitted with the checkout form.

use std::cell::Cell;
use std::fmt::Write as _;

use fdshop_cart::{CartStore, Storage};
use fdshop_core::cart::{format_money, subtotal};
use fdshop_core::CartLineItem;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::quantity::parse_quantity;

const DETAILS_SEPARATOR: &str = "------------------------------";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRow {
    pub name: String,
    pub image: String,
    pub sets_num: String,
    pub interface_type: String,
    pub brand: String,
    pub quantity: u32,
    /// `price × quantity`, e.g. `"$20.00"`.
    pub line_total: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub rows: Vec<CheckoutRow>,
    pub subtotal: String,
    pub taxes: String,
    pub total: String,
    /// Plain-text cart listing for the hidden form field.
    pub details_text: String,
}

fn dollars(value: Decimal) -> String {
    format!("${}", format_money(value))
}

impl CheckoutSummary {
    #[must_use]
    pub fn from_cart(cart: &[CartLineItem], tax_rate: Decimal) -> Self {
        let rows = cart
            .iter()
            .map(|item| CheckoutRow {
                name: item.name.clone(),
                image: item.image.clone(),
                sets_num: item.sets_num_text(),
                interface_type: item.interface_type.clone(),
                brand: item.brand.clone(),
                quantity: item.quantity,
                line_total: dollars(item.line_total()),
            })
            .collect();

        let subtotal = subtotal(cart);
        let taxes = subtotal.saturating_mul(tax_rate);
        let total = subtotal.saturating_add(taxes);

        Self {
            rows,
            subtotal: dollars(subtotal),
            taxes: dollars(taxes),
            total: dollars(total),
            details_text: details_text(cart),
        }
    }
}

/// One block per line item, blocks separated by a dashed rule.
fn details_text(cart: &[CartLineItem]) -> String {
    let mut text = String::new();
    for item in cart {
        let _ = write!(
            text,
            "\n  Product: {}\n  Quantity: {}\n  Sets In Each: {}\n  Brand: {}\n  Interface Type: {}\n  \n  {DETAILS_SEPARATOR}\n  ",
            item.name,
            item.quantity,
            item.sets_num_text(),
            item.brand,
            item.interface_type,
        );
    }
    text.trim().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutView {
    /// Empty cart: show the empty state with a link back to browsing.
    Empty { browse_path: String },
    Items(CheckoutSummary),
}

/// Checkout page state bound to a cart.
pub struct CheckoutPage<'a, S: Storage> {
    store: &'a CartStore<S>,
    tax_rate: Decimal,
    browse_path: String,
    cleared: Cell<bool>,
}

impl<'a, S: Storage> CheckoutPage<'a, S> {
    pub fn new(store: &'a CartStore<S>, tax_rate: Decimal, browse_path: impl Into<String>) -> Self {
        Self {
            store,
            tax_rate,
            browse_path: browse_path.into(),
            cleared: Cell::new(false),
        }
    }

    #[must_use]
    pub fn render(&self) -> CheckoutView {
        let cart = self.store.cart();
        if cart.is_empty() {
            return CheckoutView::Empty {
                browse_path: self.browse_path.clone(),
            };
        }
        CheckoutView::Items(CheckoutSummary::from_cart(&cart, self.tax_rate))
    }

    /// Steps down from the displayed quantity text, never below 1.
    pub fn decrement(&self, name: &str, shown: &str) -> u32 {
        let next = parse_quantity(shown).saturating_sub(1).max(1);
        self.store.update_quantity(name, next);
        next
    }

    pub fn increment(&self, name: &str, shown: &str) -> u32 {
        let next = parse_quantity(shown).saturating_add(1);
        self.store.update_quantity(name, next);
        next
    }

    pub fn set_quantity_text(&self, name: &str, text: &str) -> u32 {
        let next = parse_quantity(text);
        self.store.update_quantity(name, next);
        next
    }

    pub fn remove(&self, name: &str) {
        self.store.remove_item(name);
    }

    /// Called when the form reports a successful submission. Clears the
    /// cart the first time only; returns whether it did.
    pub fn on_form_success(&self) -> bool {
        if self.cleared.replace(true) {
            return false;
        }
        tracing::info!("checkout submitted, clearing cart");
        self.store.clear();
        true
    }
}
