//! View models for the cart panel, add-to-cart buttons and checkout page.
//!
//! Each view re-reads the [`fdshop_cart::CartStore`] when rendering and
//! sends user actions back through it; none of them cache cart state.

pub mod buttons;
pub mod cart_panel;
pub mod checkout;
pub mod quantity;

pub use buttons::{
    add_from_detail, add_from_listing, AddToCartButton, ButtonState, DetailAddOutcome,
    ListingAddOutcome,
};
pub use cart_panel::{checkout_gate, CartPanel, CartPanelView, CartRow, CheckoutGate};
pub use checkout::{CheckoutPage, CheckoutRow, CheckoutSummary, CheckoutView};
pub use quantity::{parse_quantity, QuantityInput};
