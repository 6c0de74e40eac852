//! Error types for input validation and cost-curve construction.

use thiserror::Error;

/// Reasons a simulation request is rejected before any hour is simulated.
///
/// Degenerate but valid inputs (zero consumption, zero capacity) are not
/// errors; they resolve to defined fallback values inside the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// A numeric input is outside its allowed domain.
    #[error("invalid input: {field} {message}")]
    InvalidInput {
        /// Name of the offending field (e.g. `"efficiency"`).
        field: &'static str,
        /// Human-readable constraint description.
        message: String,
    },

    /// The cost curve was built from an empty breakpoint table.
    #[error("cost curve needs at least one breakpoint")]
    EmptyCostCurve,

    /// Two breakpoints share the same capacity.
    #[error("duplicate cost breakpoint at {0} kWh")]
    DuplicateBreakpoint(f64),

    /// A capacity rescale factor that is not strictly positive.
    #[error("rescale factor must be > 0, got {0}")]
    InvalidScale(f64),
}

impl SimulationError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            message: message.into(),
        }
    }
}

/// Checks that `value` is finite and `>= 0`.
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<(), SimulationError> {
    if !value.is_finite() {
        return Err(SimulationError::invalid(field, "must be finite"));
    }
    if value < 0.0 {
        return Err(SimulationError::invalid(
            field,
            format!("must be >= 0, got {value}"),
        ));
    }
    Ok(())
}
