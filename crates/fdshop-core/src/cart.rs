use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::products::ProductRecord;

/// One persisted cart row.
///
/// The JSON field names are shared with the page scripts already deployed,
/// so they must not change. Multi-valued product attributes are flattened to
/// `", "`-joined strings on entry; the list structure is not recoverable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Unique key within the cart. Two products sharing a display name merge.
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub price_numeric: f64,
    #[serde(default)]
    pub image: String,
    /// Written as a number when positive, `""` otherwise.
    #[serde(default, with = "sets_num_field")]
    pub sets_num: Option<u32>,
    #[serde(default)]
    pub card_type: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub interface_type: String,
    /// Never below 1; stored values below 1 read back as 1.
    #[serde(deserialize_with = "quantity_field::deserialize")]
    pub quantity: u32,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub added_at: i64,
}

impl CartLineItem {
    /// Flattens a product into a new line item. `quantity` is clamped to 1.
    #[must_use]
    pub fn from_product(product: &ProductRecord, quantity: u32, added_at: i64) -> Self {
        let info = &product.info;
        Self {
            name: product.name.clone(),
            price: product.price.clone(),
            price_numeric: product.price_numeric,
            image: product.image.clone(),
            sets_num: info.sets_num.filter(|n| *n > 0),
            card_type: info.card_type.clone().unwrap_or_default(),
            brand: info.brand.join(", "),
            interface_type: info.interface_type.join(", "),
            quantity: quantity.max(1),
            added_at,
        }
    }

    /// `price_numeric × quantity` as an exact decimal, saturating at
    /// [`Decimal::MAX`].
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        price_decimal(self.price_numeric).saturating_mul(Decimal::from(self.quantity))
    }

    /// Sets count as display text, empty when unknown.
    #[must_use]
    pub fn sets_num_text(&self) -> String {
        self.sets_num.map(|n| n.to_string()).unwrap_or_default()
    }
}

/// Item count and subtotal across a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of quantities.
    pub item_count: u64,
    /// Sum of line totals, two decimals, e.g. `"25.50"`.
    pub subtotal: String,
}

impl CartTotals {
    #[must_use]
    pub fn from_items(items: &[CartLineItem]) -> Self {
        let item_count = items.iter().map(|i| u64::from(i.quantity)).sum();
        Self {
            item_count,
            subtotal: format_money(subtotal(items)),
        }
    }
}

/// Sum of line totals, saturating at [`Decimal::MAX`].
#[must_use]
pub fn subtotal(items: &[CartLineItem]) -> Decimal {
    items
        .iter()
        .map(CartLineItem::line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Converts a parsed display price into a decimal. Prices too large to
/// represent clamp to [`Decimal::MAX`]; NaN counts as zero.
#[must_use]
pub fn price_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(if value > 0.0 {
        Decimal::MAX
    } else {
        Decimal::ZERO
    })
}

/// Formats a money amount with exactly two decimals, rounding half away
/// from zero.
#[must_use]
pub fn format_money(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// `setsNum` is a number or `""` on the wire; older writers may also have
/// stored the number as a string.
mod sets_num_field {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    #[allow(clippy::ref_option)]
    pub(super) fn serialize<S: Serializer>(value: &Option<u32>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => s.serialize_u32(*n),
            None => s.serialize_str(""),
        }
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        let raw = Option::<Raw>::deserialize(d)?;
        Ok(match raw {
            Some(Raw::Number(n)) if n.is_finite() && n >= 1.0 && n <= f64::from(u32::MAX) => {
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                Some(n.trunc() as u32)
            }
            Some(Raw::Text(t)) => t.trim().parse::<u32>().ok().filter(|n| *n > 0),
            _ => None,
        })
    }
}

mod quantity_field {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        let n = match Raw::deserialize(d)? {
            Raw::Number(n) => n,
            Raw::Text(t) => t.trim().parse::<f64>().unwrap_or(1.0),
        };
        if !n.is_finite() || n < 1.0 {
            return Ok(1);
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(n.min(f64::from(u32::MAX)).trunc() as u32)
    }
}
