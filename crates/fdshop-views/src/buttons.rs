//! Add-to-cart buttons on the listing and product-detail pages.

use fdshop_cart::{CartStore, Storage};
use fdshop_core::ProductRecord;
use serde::Serialize;

use crate::quantity::QuantityInput;

pub const ADD_LABEL: &str = "Add to Cart";
pub const IN_CART_LABEL: &str = "Go to Cart";

/// Label, `in-cart` class and the quantity the detail page should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonState {
    pub label: &'static str,
    pub in_cart: bool,
    /// Cart quantity when in the cart, otherwise 1.
    pub quantity: u32,
}

pub struct AddToCartButton;

impl AddToCartButton {
    /// Button state for a product, re-read from the cart.
    #[must_use]
    pub fn state<S: Storage>(store: &CartStore<S>, name: &str) -> ButtonState {
        match store.find(name) {
            Some(item) => ButtonState {
                label: IN_CART_LABEL,
                in_cart: true,
                quantity: item.quantity,
            },
            None => ButtonState {
                label: ADD_LABEL,
                in_cart: false,
                quantity: 1,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingAddOutcome {
    /// Already in the cart; nothing changed and the panel should open.
    OpenCart,
    Added,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailAddOutcome {
    /// The existing line now holds `quantity`.
    Updated { quantity: u32 },
    Added { quantity: u32 },
}

/// Listing-page click: adds one unit unless the product is already in the
/// cart.
pub fn add_from_listing<S: Storage>(
    store: &CartStore<S>,
    product: &ProductRecord,
) -> ListingAddOutcome {
    if store.contains(&product.name) {
        return ListingAddOutcome::OpenCart;
    }
    store.add(product, 1);
    ListingAddOutcome::Added
}

/// Detail-page click: the stepper's quantity replaces the cart quantity
/// when the product is already there, otherwise it is added with that
/// quantity.
pub fn add_from_detail<S: Storage>(
    store: &CartStore<S>,
    product: &ProductRecord,
    input: &QuantityInput,
) -> DetailAddOutcome {
    let quantity = input.value();
    if store.contains(&product.name) {
        store.update_quantity(&product.name, quantity);
        DetailAddOutcome::Updated { quantity }
    } else {
        store.add(product, quantity);
        DetailAddOutcome::Added { quantity }
    }
}
