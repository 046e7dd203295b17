use super::{Real, Window};
use crate::trigger_detection::error::{TriggerError, TriggerResult};
use moonquake_common::SampleRate;
use std::collections::VecDeque;

/// Long-term RMS values below this are treated as a dead trace: the
/// ratio comes out as zero rather than NaN or infinity.
pub const LTA_EPSILON: Real = 1e-12;

/// The classic STA/LTA characteristic function as a window: the RMS
/// amplitude over the trailing short-term window divided by the RMS
/// amplitude over the trailing long-term window.
///
/// Both windows are clamped at the start of the trace, so until `lta_n`
/// samples have arrived each RMS is taken over all the history there is.
/// The output is therefore the same length as the input, with no warm-up
/// gap, and a constant trace gives a ratio of one from the first sample.
#[derive(Clone)]
pub struct StaLtaWindow {
    sta_n: usize,
    lta_n: usize,
    sta_sum_squares: Real,
    lta_sum_squares: Real,
    sta_window: VecDeque<Real>,
    lta_window: VecDeque<Real>,
}

impl StaLtaWindow {
    /// Window lengths are given in samples.
    pub fn new(sta_n: usize, lta_n: usize) -> TriggerResult<Self> {
        if sta_n < 1 || lta_n < 1 || sta_n >= lta_n {
            return Err(TriggerError::InvalidWindow { sta_n, lta_n });
        }
        Ok(Self {
            sta_n,
            lta_n,
            sta_sum_squares: Real::default(),
            lta_sum_squares: Real::default(),
            sta_window: VecDeque::with_capacity(sta_n),
            lta_window: VecDeque::with_capacity(lta_n),
        })
    }

    /// Window lengths are given in seconds and rounded to whole samples.
    pub fn from_seconds(
        sta_seconds: Real,
        lta_seconds: Real,
        sampling_rate: SampleRate,
    ) -> TriggerResult<Self> {
        Self::new(
            to_samples(sta_seconds, sampling_rate),
            to_samples(lta_seconds, sampling_rate),
        )
    }

    fn rms(sum_squares: Real, len: usize) -> Real {
        // The incremental sums can drift a hair below zero on cancellation.
        (sum_squares.max(0.0) / len as Real).sqrt()
    }
}

/// Degenerate lengths (non-positive, non-finite, or rounding to nothing)
/// map to zero samples and fail window validation.
fn to_samples(seconds: Real, sampling_rate: SampleRate) -> usize {
    let n = (seconds * sampling_rate).round();
    if n.is_finite() && n >= 1.0 {
        n as usize
    } else {
        0
    }
}

impl Window for StaLtaWindow {
    type OutputType = Real;

    fn push(&mut self, value: Real) -> bool {
        if self.sta_window.len() == self.sta_n {
            let old = self.sta_window.pop_front().unwrap_or_default();
            self.sta_sum_squares -= old * old;
        }
        if self.lta_window.len() == self.lta_n {
            let old = self.lta_window.pop_front().unwrap_or_default();
            self.lta_sum_squares -= old * old;
        }
        self.sta_window.push_back(value);
        self.lta_window.push_back(value);
        self.sta_sum_squares += value * value;
        self.lta_sum_squares += value * value;
        true
    }

    fn output(&self) -> Option<Real> {
        if self.lta_window.is_empty() {
            return None;
        }
        let lta = Self::rms(self.lta_sum_squares, self.lta_window.len());
        if lta < LTA_EPSILON {
            Some(0.0)
        } else {
            Some(Self::rms(self.sta_sum_squares, self.sta_window.len()) / lta)
        }
    }

    fn apply_time_shift(&self, time: Real) -> Real {
        // Trailing windows, output aligned to the current sample.
        time
    }
}
