//! Two-handle range slider for the sets-count filter.
//!
//! The slider works in widget units between fixed bounds and only hands a
//! [`SetsRange`] to the engine when a gesture or a typed value commits.

use fdshop_core::products::parse_leading_int;
use fdshop_core::SetsRange;

pub const DEFAULT_MIN: i64 = 0;
pub const DEFAULT_MAX: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Left,
    Right,
}

/// Handle and fill geometry, in percent of the track width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderPositions {
    pub left: f64,
    pub right: f64,
    pub fill_left: f64,
    pub fill_width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeSlider {
    bound_min: i64,
    bound_max: i64,
    current_min: i64,
    current_max: i64,
    dragging: Option<Handle>,
}

/// `parseInt(text) || fallback`.
fn int_or(text: Option<&str>, fallback: i64) -> i64 {
    match text.map(parse_leading_int) {
        Some(n) if n > 0 => i64::from(n),
        _ => fallback,
    }
}

impl RangeSlider {
    /// Creates a slider with both handles at the bounds.
    #[must_use]
    pub fn new(bound_min: i64, bound_max: i64) -> Self {
        Self {
            bound_min,
            bound_max,
            current_min: bound_min,
            current_max: bound_max,
            dragging: None,
        }
    }

    /// Reads bounds from the widget's `fs-rangeslider-min` / `-max`
    /// attribute values, falling back to 0 and 100.
    #[must_use]
    pub fn from_attrs(min_attr: Option<&str>, max_attr: Option<&str>) -> Self {
        Self::new(int_or(min_attr, DEFAULT_MIN), int_or(max_attr, DEFAULT_MAX))
    }

    #[must_use]
    pub fn bounds(&self) -> (i64, i64) {
        (self.bound_min, self.bound_max)
    }

    /// Current handle values, as shown in the display labels and inputs.
    #[must_use]
    pub fn values(&self) -> (i64, i64) {
        (self.current_min, self.current_max)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging.is_some()
    }

    #[must_use]
    pub fn positions(&self) -> SliderPositions {
        let span = self.bound_max - self.bound_min;
        #[allow(clippy::cast_precision_loss)]
        let percent = |v: i64| {
            if span == 0 {
                0.0
            } else {
                (v - self.bound_min) as f64 / span as f64 * 100.0
            }
        };
        let left = percent(self.current_min);
        let right = percent(self.current_max);
        SliderPositions {
            left,
            right,
            fill_left: left,
            fill_width: right - left,
        }
    }

    pub fn start_drag(&mut self, handle: Handle) {
        self.dragging = Some(handle);
    }

    /// Moves the dragged handle to `percent` of the track (clamped to
    /// 0..=100). Returns `false` when no drag is in progress.
    pub fn drag_to(&mut self, percent: f64) -> bool {
        let Some(handle) = self.dragging else {
            return false;
        };
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 100.0)
        };
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let value = (self.bound_min as f64
            + percent / 100.0 * (self.bound_max - self.bound_min) as f64)
            .round() as i64;
        match handle {
            Handle::Left => self.current_min = value.min(self.current_max - 1),
            Handle::Right => self.current_max = value.max(self.current_min + 1),
        }
        true
    }

    /// Ends the gesture and returns the range to commit, or `None` when no
    /// drag was in progress.
    pub fn stop_drag(&mut self) -> Option<SetsRange> {
        self.dragging.take().map(|_| self.range())
    }

    /// Applies a typed minimum (`parseInt || bound_min`), kept within the
    /// lower bound and below the right handle.
    pub fn set_min_text(&mut self, text: &str) -> SetsRange {
        let typed = int_or(Some(text), self.bound_min);
        self.current_min = self.bound_min.max(typed.min(self.current_max - 1));
        self.range()
    }

    /// Applies a typed maximum (`parseInt || bound_max`), kept within the
    /// upper bound and above the left handle.
    pub fn set_max_text(&mut self, text: &str) -> SetsRange {
        let typed = int_or(Some(text), self.bound_max);
        self.current_max = self.bound_max.min(typed.max(self.current_min + 1));
        self.range()
    }

    /// Current values as a non-negative sets range.
    #[must_use]
    pub fn range(&self) -> SetsRange {
        let clamp = |v: i64| u32::try_from(v.max(0)).unwrap_or(u32::MAX);
        SetsRange {
            min: clamp(self.current_min),
            max: clamp(self.current_max),
        }
    }
}
