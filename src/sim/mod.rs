/// Hourly battery dispatch state machine.
pub mod dispatch;
/// Cost, savings and payback derivation.
pub mod economics;
pub mod engine;
/// Candidate sweep and best-size selection.
pub mod optimizer;
pub mod types;

pub use economics::{Payback, SimulationResult};
pub use engine::{Engine, simulate};
pub use optimizer::{CandidateSizes, Optimizer, find_optimal_size};
pub use types::{SimulationInput, SiteInput};
