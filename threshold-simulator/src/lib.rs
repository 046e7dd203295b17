//! Monte Carlo estimation of the bias between an observed event
//! magnitude and the noise-corrected detection threshold, used to reason
//! about the detector's false trigger risk.

pub mod error;
pub mod simulation;

pub use error::{SimulationError, SimulationResult};
pub use simulation::{CalibrationSample, SimulationResults, ThresholdSimulation};
