pub mod trigger_detector;

use super::{Real, trigger::Trigger};

/// A detector scans a trace point by point and emits an event whenever it
/// observes something notable.
pub trait Detector: Default + Clone {
    type EventType;

    fn signal(&mut self, time: Real, value: Real) -> Option<Self::EventType>;
}

/// An assembler pairs the events a detector emits into complete triggers.
pub trait Assembler: Default + Clone {
    type DetectorType: Detector;

    fn assemble(
        &mut self,
        event: <Self::DetectorType as Detector>::EventType,
    ) -> Option<Trigger>;
}
