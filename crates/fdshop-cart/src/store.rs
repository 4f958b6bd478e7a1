use fdshop_core::config::DEFAULT_CART_KEY;
use fdshop_core::{CartLineItem, CartTotals, Notifier, ProductRecord, SubscriptionId};

use crate::error::CartError;
use crate::storage::Storage;

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// The persisted shopping cart.
///
/// The whole cart is one JSON array stored under a single key. Every
/// successful write notifies subscribers exactly once; failed reads degrade
/// to an empty cart and failed writes are logged and dropped.
pub struct CartStore<S: Storage> {
    storage: S,
    key: String,
    notifier: Notifier,
    clock: fn() -> i64,
}

impl<S: Storage> CartStore<S> {
    /// Creates a store under the default `webflow_shopping_cart` key.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            notifier: Notifier::new(),
            clock: now_millis,
        }
    }

    /// Replaces the timestamp source used for `addedAt`.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the stored cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if storage cannot be read or the payload is not
    /// a list of line items. [`CartStore::cart`] is the non-failing variant.
    pub fn load(&self) -> Result<Vec<CartLineItem>, CartError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        let mut items: Vec<CartLineItem> = serde_json::from_str(&raw)?;
        for item in &mut items {
            item.quantity = item.quantity.max(1);
        }
        Ok(items)
    }

    /// The stored cart, or an empty cart if it cannot be read.
    #[must_use]
    pub fn cart(&self) -> Vec<CartLineItem> {
        self.load().unwrap_or_else(|e| {
            tracing::error!(key = %self.key, error = %e, "cart read failed, treating as empty");
            Vec::new()
        })
    }

    /// Adds `quantity` of `product`, merging into an existing line with the
    /// same name.
    pub fn add(&self, product: &ProductRecord, quantity: u32) {
        let mut items = self.cart();
        if let Some(existing) = items.iter_mut().find(|i| i.name == product.name) {
            existing.quantity = existing.quantity.saturating_add(quantity).max(1);
            tracing::debug!(name = %existing.name, quantity = existing.quantity, "cart line merged");
        } else {
            let item = CartLineItem::from_product(product, quantity, (self.clock)());
            tracing::debug!(name = %item.name, quantity = item.quantity, "cart line added");
            items.push(item);
        }
        self.save(&items);
    }

    /// Sets the quantity of an existing line (minimum 1). Unknown names are
    /// ignored without writing.
    pub fn update_quantity(&self, name: &str, quantity: u32) {
        let mut items = self.cart();
        let Some(item) = items.iter_mut().find(|i| i.name == name) else {
            tracing::debug!(name, "quantity update for item not in cart");
            return;
        };
        item.quantity = quantity.max(1);
        self.save(&items);
    }

    /// Removes every line with this name. Always writes.
    pub fn remove_item(&self, name: &str) {
        let mut items = self.cart();
        items.retain(|i| i.name != name);
        self.save(&items);
    }

    pub fn clear(&self) {
        self.save(&[]);
    }

    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::from_items(&self.cart())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<CartLineItem> {
        self.cart().into_iter().find(|i| i.name == name)
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

    fn save(&self, items: &[CartLineItem]) {
        let result = serde_json::to_string(items)
            .map_err(CartError::from)
            .and_then(|raw| {
                self.storage
                    .set_item(&self.key, &raw)
                    .map_err(CartError::from)
            });
        match result {
            Ok(()) => {
                tracing::debug!(key = %self.key, lines = items.len(), "cart saved");
                self.notifier.notify();
            }
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "cart write failed");
            }
        }
    }
}

impl<S: Storage + std::fmt::Debug> std::fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("storage", &self.storage)
            .field("key", &self.key)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
