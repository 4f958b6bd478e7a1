//! Product filtering for the listing page.
//!
//! [`FilterEngine`] owns the page's products and two generations of
//! selections: live ones, which only drive the candidate count, and the
//! applied snapshot, which drives visibility and grid order.

pub mod engine;
pub mod options;
pub mod predicate;
pub mod slider;

pub use engine::{AppliedSelections, EngineOptions, FilterEngine, FilterPhase, GridLayout};
pub use options::{FilterOptions, OptionCounts};
pub use predicate::matches;
pub use slider::{Handle, RangeSlider, SliderPositions};
