//! Business categories and their daily load shapes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Seasonal adjustment applied to a category's consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalMode {
    /// Flat consumption across the year.
    None,
    /// Heating-driven load peaking in January.
    WinterPeak,
    /// Cooling or tourism load peaking in mid-July.
    SummerPeak,
    /// Holiday closure dip centred on late July.
    SummerLow,
}

impl SeasonalMode {
    /// Consumption multiplier for a 1-based day of the year.
    ///
    /// # Examples
    ///
    /// ```
    /// use bess_sizer::profile::SeasonalMode;
    ///
    /// assert_eq!(SeasonalMode::None.factor(100), 1.0);
    /// assert!((SeasonalMode::SummerPeak.factor(196) - 1.3).abs() < 1e-12);
    /// ```
    pub fn factor(self, day_of_year: u32) -> f64 {
        let d = f64::from(day_of_year);
        match self {
            Self::None => 1.0,
            Self::SummerPeak => 1.0 + 0.3 * annual_cosine(d, 196.0),
            Self::WinterPeak => 1.0 - 0.4 * annual_cosine(d, 196.0),
            Self::SummerLow => 1.0 - 0.9 * (-((d - 208.0) / 25.0).powi(2)).exp(),
        }
    }
}

/// Cosine over a 365-day period, equal to 1 on `peak_day`.
pub(crate) fn annual_cosine(day_of_year: f64, peak_day: f64) -> f64 {
    (2.0 * std::f64::consts::PI * (day_of_year - peak_day) / 365.0).cos()
}

/// Relative hourly weights plus weekend and seasonal modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadShape {
    /// Hourly multipliers, index 0 is 00:00-01:00.
    pub hourly: [f64; 24],
    /// Multiplier applied on Saturdays and Sundays.
    pub weekend_factor: f64,
    /// Seasonal curve applied on top of the daily shape.
    pub seasonal: SeasonalMode,
}

/// Commercial consumer categories with a known load shape.
///
/// Names round-trip through their German identifiers, which is what
/// scenario files and the CLI accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum BusinessCategory {
    #[default]
    General,
    PigletBreeding,
    TurkeyFarming,
    BroilerHouse,
    Butchery,
    Catering,
    Hotel,
    Logistics,
    PropertyManagement,
    Industrial,
    Administration,
    School,
    VocationalSchool,
}

impl BusinessCategory {
    /// Every category, in display order.
    pub const ALL: [Self; 13] = [
        Self::General,
        Self::PigletBreeding,
        Self::TurkeyFarming,
        Self::BroilerHouse,
        Self::Butchery,
        Self::Catering,
        Self::Hotel,
        Self::Logistics,
        Self::PropertyManagement,
        Self::Industrial,
        Self::Administration,
        Self::School,
        Self::VocationalSchool,
    ];

    /// Canonical identifier.
    pub fn name(self) -> &'static str {
        match self {
            Self::General => "Allgemein",
            Self::PigletBreeding => "Ferkelzucht",
            Self::TurkeyFarming => "Putenzucht",
            Self::BroilerHouse => "Hähnchenstall",
            Self::Butchery => "Fleischerei",
            Self::Catering => "Catering",
            Self::Hotel => "Hotel",
            Self::Logistics => "Logistikbetrieb",
            Self::PropertyManagement => "Immobilienverwalter",
            Self::Industrial => "Industriebetrieb",
            Self::Administration => "Verwaltung",
            Self::School => "Schule",
            Self::VocationalSchool => "BBZ",
        }
    }

    /// Resolves a name, falling back to [`BusinessCategory::General`].
    pub fn lookup(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(category = name, "unknown business category, using Allgemein");
            Self::default()
        })
    }

    /// One-line summary of what drives this category's load.
    pub fn description(self) -> &'static str {
        match self {
            Self::General => "business-hours load with a moderate around-the-clock base",
            Self::PigletBreeding => "constant ventilation and heating, winter heavy",
            Self::TurkeyFarming => "high constant climate control with feeding-cycle ripples",
            Self::BroilerHouse => "ventilation and heating base load varying by fattening phase",
            Self::Butchery => "morning peak from processing machines over a cooling base",
            Self::Catering => "bimodal: morning preparation and evening events",
            Self::Hotel => "morning and evening guest peaks over a large base load",
            Self::Logistics => "shift operation with an even, high load",
            Self::PropertyManagement => "office day profile, minimal at weekends",
            Self::Industrial => "two-shift production with a flat daytime plateau",
            Self::Administration => "sharp 8-17 office peak, near idle otherwise",
            Self::School => "teaching-hours peak, idle in holidays and weekends",
            Self::VocationalSchool => "school-like profile extending into the evening",
        }
    }

    /// Static load shape for this category.
    pub fn load_shape(self) -> LoadShape {
        use SeasonalMode::{None, SummerLow, SummerPeak, WinterPeak};

        let (hourly, weekend_factor, seasonal) = match self {
            Self::General => (
                [
                    0.6, 0.6, 0.6, 0.6, 0.7, 0.8, 1.2, 1.4, 1.5, 1.4, 1.3, 1.2, 1.2, 1.3, 1.4, 1.5,
                    1.6, 1.8, 2.0, 1.8, 1.6, 1.2, 0.9, 0.7,
                ],
                0.8,
                None,
            ),
            Self::PigletBreeding => (
                [
                    1.2, 1.2, 1.2, 1.2, 1.2, 1.2, 1.1, 1.0, 1.0, 0.9, 0.9, 0.9, 0.9, 0.9, 1.0, 1.0,
                    1.1, 1.2, 1.2, 1.2, 1.2, 1.2, 1.2, 1.2,
                ],
                1.0,
                WinterPeak,
            ),
            Self::TurkeyFarming => (
                [
                    1.1, 1.1, 1.1, 1.1, 1.1, 1.2, 1.2, 1.1, 1.0, 0.9, 0.8, 0.8, 0.8, 0.9, 1.0, 1.1,
                    1.2, 1.2, 1.2, 1.1, 1.1, 1.1, 1.1, 1.1,
                ],
                1.0,
                WinterPeak,
            ),
            Self::BroilerHouse => (
                [
                    1.3, 1.3, 1.2, 1.2, 1.2, 1.1, 1.0, 0.9, 0.8, 0.8, 0.8, 0.8, 0.8, 0.8, 0.9, 1.0,
                    1.1, 1.2, 1.2, 1.2, 1.3, 1.3, 1.3, 1.3,
                ],
                1.0,
                WinterPeak,
            ),
            Self::Butchery => (
                [
                    0.8, 0.8, 0.8, 0.9, 1.2, 1.8, 2.0, 1.9, 1.7, 1.5, 1.4, 1.3, 1.2, 1.1, 0.9, 0.8,
                    0.7, 0.7, 0.7, 0.7, 0.7, 0.7, 0.7, 0.8,
                ],
                0.3,
                None,
            ),
            Self::Catering => (
                [
                    0.5, 0.5, 0.5, 0.6, 0.8, 1.2, 1.5, 1.2, 1.0, 0.8, 0.9, 1.0, 1.2, 1.3, 1.5, 1.8,
                    2.2, 2.5, 2.0, 1.5, 0.8, 0.6, 0.5, 0.5,
                ],
                1.2,
                SummerPeak,
            ),
            Self::Hotel => (
                [
                    0.9, 0.8, 0.8, 0.8, 0.9, 1.2, 1.5, 1.6, 1.2, 1.0, 0.9, 0.9, 1.0, 1.1, 1.2, 1.4,
                    1.6, 1.8, 1.9, 1.7, 1.5, 1.2, 1.0, 0.9,
                ],
                1.1,
                SummerPeak,
            ),
            Self::Logistics => (
                [
                    1.1, 1.0, 1.0, 1.0, 1.1, 1.2, 1.2, 1.2, 1.2, 1.2, 1.2, 1.1, 1.1, 1.1, 1.1, 1.1,
                    1.1, 1.0, 1.0, 0.9, 0.9, 0.9, 0.9, 1.0,
                ],
                0.7,
                None,
            ),
            Self::PropertyManagement => (
                [
                    0.7, 0.6, 0.6, 0.6, 0.7, 0.9, 1.1, 1.3, 1.4, 1.5, 1.5, 1.4, 1.3, 1.3, 1.4, 1.4,
                    1.2, 1.1, 0.9, 0.8, 0.8, 0.7, 0.7, 0.7,
                ],
                0.2,
                SummerLow,
            ),
            Self::Industrial => (
                [
                    0.8, 0.8, 0.8, 0.8, 0.9, 1.2, 1.4, 1.5, 1.5, 1.5, 1.4, 1.4, 1.4, 1.4, 1.5, 1.5,
                    1.4, 1.2, 1.0, 0.9, 0.8, 0.8, 0.8, 0.8,
                ],
                0.4,
                None,
            ),
            Self::Administration => (
                [
                    0.4, 0.4, 0.4, 0.4, 0.5, 0.8, 1.2, 1.8, 1.9, 1.9, 1.8, 1.6, 1.6, 1.6, 1.8, 1.8,
                    1.2, 0.8, 0.6, 0.5, 0.4, 0.4, 0.4, 0.4,
                ],
                0.1,
                SummerLow,
            ),
            Self::School => (
                [
                    0.3, 0.3, 0.3, 0.3, 0.4, 0.6, 1.2, 2.0, 2.2, 2.0, 1.8, 1.5, 1.4, 1.2, 1.0, 0.8,
                    0.5, 0.4, 0.3, 0.3, 0.3, 0.3, 0.3, 0.3,
                ],
                0.05,
                SummerLow,
            ),
            Self::VocationalSchool => (
                [
                    0.3, 0.3, 0.3, 0.3, 0.5, 0.8, 1.5, 2.0, 2.1, 2.0, 1.9, 1.7, 1.6, 1.5, 1.4, 1.1,
                    0.7, 0.5, 0.4, 0.4, 0.3, 0.3, 0.3, 0.3,
                ],
                0.1,
                SummerLow,
            ),
        };

        LoadShape {
            hourly,
            weekend_factor,
            seasonal,
        }
    }
}

/// Error for a name that matches no category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown business category \"{0}\"")]
pub struct UnknownCategory(pub String);

impl FromStr for BusinessCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl From<String> for BusinessCategory {
    fn from(name: String) -> Self {
        Self::lookup(&name)
    }
}

impl From<BusinessCategory> for &'static str {
    fn from(category: BusinessCategory) -> Self {
        category.name()
    }
}

impl fmt::Display for BusinessCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
