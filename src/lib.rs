//! Battery storage sizing for commercial PV sites.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
/// Storage investment from the unit-cost curve.
pub mod cost;
pub mod error;
pub mod io;
/// Synthetic hourly consumption and production profiles.
pub mod profile;
pub mod report;
/// Dispatch simulation, economics and size optimization.
pub mod sim;

pub use cost::investment;
pub use sim::{find_optimal_size, simulate};
