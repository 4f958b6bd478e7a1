use std::collections::BTreeMap;

use serde::Serialize;

/// Value the page markup uses to flag a supported mode.
const MODE_ENABLED: &str = "Yes";

/// A product read from a decorated container on the current page.
///
/// Records are rebuilt on every page load; `id` is the container's position
/// in document order and is not stable across reloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: usize,
    pub name: String,
    /// Price exactly as displayed, e.g. `"$1,250.00 USD"`.
    pub price: String,
    /// Parsed price; `0.0` when the display text has no usable number.
    pub price_numeric: f64,
    /// Absolute image URL, or empty when the container has no image.
    pub image: String,
    pub info: ProductInfo,
    /// Exempt from filtering: pinned, or excluded from the filter action.
    pub always_visible: bool,
    pub pinned: bool,
    pub visible: bool,
}

impl ProductRecord {
    /// Builds a visible, filterable record with an empty info bag.
    #[must_use]
    pub fn new(id: usize, name: impl Into<String>, price: impl Into<String>) -> Self {
        let price = price.into();
        let price_numeric = parse_price(&price);
        Self {
            id,
            name: name.into(),
            price,
            price_numeric,
            image: String::new(),
            info: ProductInfo::default(),
            always_visible: false,
            pinned: false,
            visible: true,
        }
    }

    /// Same record with identity handles (`id`, `visible`) reset, for
    /// structural comparison across extractions.
    #[must_use]
    pub fn structural(&self) -> Self {
        Self {
            id: 0,
            visible: true,
            ..self.clone()
        }
    }
}

/// Parses a display price by dropping everything except digits and `.`.
///
/// `"$1,250.50"` → `1250.5`. Like `parseFloat`, only the leading number
/// counts (`"1.2.3"` → `1.2`); text with no digits yields `0.0`.
#[must_use]
pub fn parse_price(display: &str) -> f64 {
    let digits: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    match leading_float(&digits) {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// `parseFloat`-style prefix parse: the longest leading `digits[.digits]` run.
fn leading_float(s: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() {
            seen_digit = true;
            end = i + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            end = i + 1;
        } else {
            break;
        }
    }
    if !seen_digit {
        return None;
    }
    s[..end].parse().ok()
}

/// Purchase modes a test card can support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Mode {
    Online,
    Offline,
    OnlinePin,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Online, Mode::Offline, Mode::OnlinePin];

    /// Label used for the filter checkbox.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Mode::Online => "Online",
            Mode::Offline => "Offline",
            Mode::OnlinePin => "Online PIN",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.label() == label)
    }

    /// The `fd-product-info` key carrying this mode's flag.
    #[must_use]
    pub fn info_key(self) -> &'static str {
        match self {
            Mode::Online => "mode-online",
            Mode::Offline => "mode-offline",
            Mode::OnlinePin => "mode-online-pin",
        }
    }

    #[must_use]
    pub fn from_info_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.info_key() == key)
    }
}

/// Raw mode flag values as found in the markup. A mode is supported only when
/// its value is exactly `"Yes"`; other values are kept for text search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModeFlags {
    #[serde(rename = "mode-online", skip_serializing_if = "Option::is_none")]
    pub online: Option<String>,
    #[serde(rename = "mode-offline", skip_serializing_if = "Option::is_none")]
    pub offline: Option<String>,
    #[serde(rename = "mode-online-pin", skip_serializing_if = "Option::is_none")]
    pub online_pin: Option<String>,
}

impl ModeFlags {
    #[must_use]
    pub fn get(&self, mode: Mode) -> Option<&str> {
        match mode {
            Mode::Online => self.online.as_deref(),
            Mode::Offline => self.offline.as_deref(),
            Mode::OnlinePin => self.online_pin.as_deref(),
        }
    }

    fn slot_mut(&mut self, mode: Mode) -> &mut Option<String> {
        match mode {
            Mode::Online => &mut self.online,
            Mode::Offline => &mut self.offline,
            Mode::OnlinePin => &mut self.online_pin,
        }
    }

    #[must_use]
    pub fn has(&self, mode: Mode) -> bool {
        self.get(mode) == Some(MODE_ENABLED)
    }

    /// Supported modes in declaration order.
    pub fn enabled(&self) -> impl Iterator<Item = Mode> + '_ {
        Mode::ALL.into_iter().filter(|m| self.has(*m))
    }
}

/// Attribute bag read from `fd-product-info` elements.
///
/// Known keys get typed slots; anything else lands in `extra`. `brand` and
/// `interface_type` are always lists, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub brand: Vec<String>,
    #[serde(rename = "card-type", skip_serializing_if = "Option::is_none")]
    pub card_type: Option<String>,
    #[serde(rename = "interface-type")]
    pub interface_type: Vec<String>,
    #[serde(flatten)]
    pub modes: ModeFlags,
    #[serde(rename = "test-focus", skip_serializing_if = "Option::is_none")]
    pub test_focus: Option<String>,
    /// Present when the markup carried a `sets-num` element; non-numeric
    /// text reads as `Some(0)`.
    #[serde(rename = "sets-num", skip_serializing_if = "Option::is_none")]
    pub sets_num: Option<u32>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ProductInfo {
    /// Stores a plain string attribute.
    ///
    /// With `overwrite` the last value wins; without it the first non-empty
    /// value is kept. `brand`, `interface-type` and `sets-num` have their own
    /// setters and are routed there.
    pub fn set_text(&mut self, key: &str, value: &str, overwrite: bool) {
        match key {
            "brand" => {
                self.push_brand(value);
                return;
            }
            "interface-type" => {
                self.push_interface_type(value);
                return;
            }
            "sets-num" => {
                self.sets_num = Some(parse_leading_int(value));
                return;
            }
            _ => {}
        }

        let slot = if let Some(mode) = Mode::from_info_key(key) {
            self.modes.slot_mut(mode)
        } else {
            match key {
                "region" => &mut self.region,
                "card-type" => &mut self.card_type,
                "test-focus" => &mut self.test_focus,
                _ => {
                    let entry = self.extra.entry(key.to_string()).or_default();
                    if overwrite || entry.is_empty() {
                        *entry = value.to_string();
                    }
                    return;
                }
            }
        };
        if overwrite || slot.as_deref().is_none_or(str::is_empty) {
            *slot = Some(value.to_string());
        }
    }

    /// Appends a brand if non-empty and not yet present.
    pub fn push_brand(&mut self, value: &str) {
        push_unique(&mut self.brand, value);
    }

    /// Appends an interface type if non-empty and not yet present.
    pub fn push_interface_type(&mut self, value: &str) {
        push_unique(&mut self.interface_type, value);
    }

    /// Interface types as one scalar, `", "`-joined.
    #[must_use]
    pub fn interface_type_joined(&self) -> String {
        self.interface_type.join(", ")
    }

    /// Every value in the bag rendered as text; lists are space-joined.
    #[must_use]
    pub fn searchable_values(&self) -> Vec<String> {
        let mut out = Vec::new();
        out.extend(self.region.clone());
        out.push(self.brand.join(" "));
        out.extend(self.card_type.clone());
        if !self.interface_type.is_empty() {
            out.push(self.interface_type.join(" "));
        }
        for mode in Mode::ALL {
            out.extend(self.modes.get(mode).map(str::to_string));
        }
        out.extend(self.test_focus.clone());
        out.extend(self.sets_num.map(|n| n.to_string()));
        out.extend(self.extra.values().cloned());
        out
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

/// `parseInt(text, 10) || 0`: optional sign then leading digits. Runs too
/// long for `u32` saturate.
#[must_use]
pub fn parse_leading_int(text: &str) -> u32 {
    let trimmed = text.trim_start();
    let digits: String = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u32::MAX)
}
