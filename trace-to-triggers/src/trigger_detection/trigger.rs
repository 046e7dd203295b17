use super::Real;
use std::fmt::Display;

/// A point on the characteristic function.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct TimeValue {
    pub time: Real,
    pub value: Real,
}

impl Display for TimeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{0},{1}", self.time, self.value))
    }
}

/// A detected onset-to-offset span in trace time, carrying the
/// characteristic-function values at both crossings.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Trigger {
    pub onset: TimeValue,
    pub offset: TimeValue,
}

impl Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{0},{1}", self.onset, self.offset))
    }
}

/// A trigger reduced to sample indices into the source series.
/// Invariant: `onset < offset`; a list of intervals is sorted by onset
/// and pairwise non-overlapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriggerInterval {
    pub onset: usize,
    pub offset: usize,
}

impl Display for TriggerInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{0},{1}", self.onset, self.offset))
    }
}
