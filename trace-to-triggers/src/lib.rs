pub mod parameters;
pub mod processing;
pub mod synthetic;
pub mod trigger_detection;

pub use moonquake_common::{Real, SampleRate, SampleSeries};
