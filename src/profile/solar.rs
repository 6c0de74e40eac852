//! Fixed PV generation shape.

use super::category::annual_cosine;

/// Relative PV output per hour of day, zero outside 05:00-18:00.
pub const SOLAR_DAILY_SHAPE: [f64; 24] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.1, 0.4, 0.7, 0.9, 1.0, 1.1, 1.2, 1.1, 1.0, 0.9, 0.7, 0.4, 0.1, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0,
];

/// Day of year (1-based) with the strongest production.
const SOLAR_PEAK_DAY: f64 = 172.0;

/// Seasonal swing of production around the annual mean.
const SOLAR_SEASONAL_AMPLITUDE: f64 = 0.4;

/// Production multiplier for a 1-based day of the year.
///
/// Peaks at 1.4 around the June solstice and bottoms out at 0.6 in
/// December.
pub fn seasonal_factor(day_of_year: u32) -> f64 {
    1.0 + SOLAR_SEASONAL_AMPLITUDE * annual_cosine(f64::from(day_of_year), SOLAR_PEAK_DAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_generation_at_night() {
        for h in (0..5).chain(18..24) {
            assert_eq!(SOLAR_DAILY_SHAPE[h], 0.0, "hour {h}");
        }
    }

    #[test]
    fn seasonal_peak_at_solstice() {
        assert!((seasonal_factor(172) - 1.4).abs() < 1e-12);
        assert!(seasonal_factor(355) < 0.61);
    }
}
