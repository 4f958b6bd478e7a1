use fdshop_core::products::parse_leading_int;

/// Typed quantity text: leading integer, with anything below 1 read as 1.
#[must_use]
pub fn parse_quantity(text: &str) -> u32 {
    parse_leading_int(text).max(1)
}

/// The quantity stepper on the product-detail page. Never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityInput {
    value: u32,
}

impl Default for QuantityInput {
    fn default() -> Self {
        Self { value: 1 }
    }
}

impl QuantityInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn minus(&mut self) -> u32 {
        self.value = self.value.saturating_sub(1).max(1);
        self.value
    }

    pub fn plus(&mut self) -> u32 {
        self.value = self.value.saturating_add(1);
        self.value
    }

    pub fn set_text(&mut self, text: &str) -> u32 {
        self.value = parse_quantity(text);
        self.value
    }

    pub fn set(&mut self, value: u32) {
        self.value = value.max(1);
    }
}
