//! This module provides tools for converting a raw seismic trace into a
//! list of trigger intervals, the spans over which the STA/LTA
//! characteristic function indicates seismic activity.
//!
//! A raw trace takes the form of a Vec (or some other similar container)
//! of scalar amplitudes. Typical usage of this module may look like:
//! ```rust,ignore
//! let triggers = trace.iter()
//!     .copied()
//!     .enumerate()
//!     .map(|(i, v)| (i as Real, v))
//!     .window(StaLtaWindow::new(795, 3975)?)  // The characteristic function,
//!                                             // short and long windows given
//!                                             // in samples
//!     .events(TriggerDetector::new(4.0, 1.5)) // Onset and offset crossings
//!     .assemble(TriggerAssembler::default()); // Paired into triggers
//! ```

pub mod detectors;
pub mod error;
pub mod iterators;
pub mod trigger;
pub mod window;

pub use detectors::{
    Assembler, Detector,
    trigger_detector::{TriggerAssembler, TriggerDetector},
};
pub use error::{TriggerError, TriggerResult};
pub use iterators::{AssembleFilter, EventFilter, SaveToFileFilter};
pub use trigger::{TimeValue, Trigger, TriggerInterval};
pub use window::{Window, WindowFilter, sta_lta::StaLtaWindow};

pub use moonquake_common::Real;
