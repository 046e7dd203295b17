use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

pub type Real = f64;

/// Sampling rate in Hz.
pub type SampleRate = f64;

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("Sampling rate must be positive and finite, got {0} Hz")]
    InvalidSamplingRate(SampleRate),
}

/// A waveform as delivered by an external loader: amplitude samples at a
/// constant sampling rate, anchored to an absolute start time. Immutable
/// once captured.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSeries {
    samples: Vec<Real>,
    sampling_rate: SampleRate,
    start_time: DateTime<Utc>,
}

impl SampleSeries {
    pub fn new(
        samples: Vec<Real>,
        sampling_rate: SampleRate,
        start_time: DateTime<Utc>,
    ) -> Result<Self, SeriesError> {
        if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
            return Err(SeriesError::InvalidSamplingRate(sampling_rate));
        }
        Ok(Self {
            samples,
            sampling_rate,
            start_time,
        })
    }

    pub fn samples(&self) -> &[Real] {
        &self.samples
    }

    pub fn sampling_rate(&self) -> SampleRate {
        self.sampling_rate
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Offset of the given sample from the start of the series, in seconds.
    pub fn time_of_sample(&self, index: usize) -> Real {
        index as Real / self.sampling_rate
    }

    /// Absolute timestamp of the given sample.
    pub fn timestamp_of_sample(&self, index: usize) -> DateTime<Utc> {
        let nanos = (self.time_of_sample(index) * 1_000_000_000.0).round() as i64;
        self.start_time + TimeDelta::nanoseconds(nanos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1971, 2, 9, 0, 0, 0).unwrap()
    }

    #[test]
    fn rejects_bad_sampling_rates() {
        assert!(SampleSeries::new(vec![0.0], 0.0, start()).is_err());
        assert!(SampleSeries::new(vec![0.0], -6.625, start()).is_err());
        assert!(SampleSeries::new(vec![0.0], Real::NAN, start()).is_err());
    }

    #[test]
    fn sample_times() {
        let series = SampleSeries::new(vec![0.0; 100], 4.0, start()).unwrap();
        assert_eq!(series.time_of_sample(0), 0.0);
        assert_eq!(series.time_of_sample(10), 2.5);
        assert_eq!(
            series.timestamp_of_sample(10),
            Utc.with_ymd_and_hms(1971, 2, 9, 0, 0, 2).unwrap() + TimeDelta::milliseconds(500)
        );
    }

    #[test]
    fn length() {
        let series = SampleSeries::new(vec![1.0, 2.0, 3.0], 1.0, start()).unwrap();
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
    }
}
