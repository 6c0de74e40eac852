//! Hourly consumption and production synthesis.

/// Business categories and their load shapes.
pub mod category;
/// PV daily shape and seasonal curve.
pub mod solar;
pub mod series;

pub use category::{BusinessCategory, LoadShape, SeasonalMode, UnknownCategory};
pub use series::{HOURS_PER_YEAR, HourlySeries};
