use crate::{
    parameters::DetectionParameters,
    trigger_detection::{
        AssembleFilter, EventFilter, Real, StaLtaWindow, TriggerAssembler, TriggerDetector,
        TriggerInterval, WindowFilter, error::TriggerResult,
    },
};
use chrono::{DateTime, Utc};
use moonquake_common::{SampleRate, SampleSeries};
use rayon::prelude::*;
use tracing::debug;

/// The detector output for one series: the characteristic function and
/// the intervals over which it exceeded threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerReport {
    characteristic_function: Vec<Real>,
    intervals: Vec<TriggerInterval>,
}

impl TriggerReport {
    pub fn characteristic_function(&self) -> &[Real] {
        &self.characteristic_function
    }

    pub fn intervals(&self) -> &[TriggerInterval] {
        &self.intervals
    }

    /// Mean and population standard deviation of the characteristic
    /// function, used by callers annotating detection plots.
    pub fn cf_stats(&self) -> (Real, Real) {
        let n = self.characteristic_function.len() as Real;
        if self.characteristic_function.is_empty() {
            return (0.0, 0.0);
        }
        let mean = self.characteristic_function.iter().sum::<Real>() / n;
        let variance = self
            .characteristic_function
            .iter()
            .map(|cf| (cf - mean).powi(2))
            .sum::<Real>()
            / n;
        (mean, variance.sqrt())
    }

    /// Per-sample activity mask: true inside a detected interval, onset
    /// inclusive, offset exclusive.
    pub fn span_mask(&self) -> Vec<bool> {
        let mut mask = vec![false; self.characteristic_function.len()];
        for interval in &self.intervals {
            for flag in mask
                .iter_mut()
                .take(interval.offset)
                .skip(interval.onset)
            {
                *flag = true;
            }
        }
        mask
    }

    /// Absolute timestamps of the interval onsets, for tabulating
    /// detections against a catalog.
    pub fn onset_times(&self, series: &SampleSeries) -> Vec<DateTime<Utc>> {
        self.intervals
            .iter()
            .map(|interval| series.timestamp_of_sample(interval.onset))
            .collect()
    }
}

/// Computes the STA/LTA characteristic function of a trace. The output
/// has the same length as the input; window lengths are validated before
/// any computation.
pub fn compute_characteristic_function(
    samples: &[Real],
    sampling_rate: SampleRate,
    sta_seconds: Real,
    lta_seconds: Real,
) -> TriggerResult<Vec<Real>> {
    let window = StaLtaWindow::from_seconds(sta_seconds, lta_seconds, sampling_rate)?;
    Ok(samples
        .iter()
        .copied()
        .enumerate()
        .map(|(i, v)| (i as Real, v))
        .window(window)
        .map(|(_, cf)| cf)
        .collect())
}

/// Runs the two-threshold trigger machine over a characteristic function.
/// An empty result is a normal outcome, not an error; an interval still
/// open at the end of the sequence is discarded.
pub fn detect_triggers(
    cf: &[Real],
    threshold_on: Real,
    threshold_off: Real,
) -> Vec<TriggerInterval> {
    cf.iter()
        .copied()
        .enumerate()
        .map(|(i, v)| (i as Real, v))
        .events(TriggerDetector::new(threshold_on, threshold_off))
        .assemble(TriggerAssembler::default())
        .map(|trigger| TriggerInterval {
            onset: trigger.onset.time as usize,
            offset: trigger.offset.time as usize,
        })
        .collect()
}

/// Full detection run over one series.
pub fn process(
    series: &SampleSeries,
    parameters: &DetectionParameters,
) -> TriggerResult<TriggerReport> {
    let characteristic_function = compute_characteristic_function(
        series.samples(),
        series.sampling_rate(),
        parameters.sta_seconds,
        parameters.lta_seconds,
    )?;
    let intervals = detect_triggers(
        &characteristic_function,
        parameters.threshold_on,
        parameters.threshold_off,
    );
    debug!("Found {} triggers", intervals.len());
    Ok(TriggerReport {
        characteristic_function,
        intervals,
    })
}

/// Detection across independent series. Each series is processed on its
/// own, so the batch parallelises without coordination.
pub fn process_batch(
    series: &[SampleSeries],
    parameters: &DetectionParameters,
) -> TriggerResult<Vec<TriggerReport>> {
    series
        .par_iter()
        .map(|series| process(series, parameters))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trigger_detection::TriggerError;
    use assert_approx_eq::assert_approx_eq;
    use chrono::{TimeZone, Utc};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn parameters() -> DetectionParameters {
        DetectionParameters {
            sta_seconds: 2.0,
            lta_seconds: 100.0,
            threshold_on: 4.0,
            threshold_off: 1.5,
        }
    }

    fn noisy_series_with_burst(seed: u64) -> SampleSeries {
        let mut rng = StdRng::seed_from_u64(seed);
        let samples = (0..4000)
            .map(|i| {
                let noise: Real = rng.random_range(-1.0..1.0);
                if (2000..2100).contains(&i) {
                    noise * 20.0
                } else {
                    noise
                }
            })
            .collect();
        SampleSeries::new(
            samples,
            10.0,
            Utc.with_ymd_and_hms(1971, 2, 9, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn characteristic_function_length_matches_input() {
        let samples = vec![1.0; 300];
        let cf = compute_characteristic_function(&samples, 10.0, 2.0, 20.0).unwrap();
        assert_eq!(cf.len(), samples.len());
    }

    #[test]
    fn invalid_windows_rejected_up_front() {
        let samples = vec![1.0; 300];
        assert!(matches!(
            compute_characteristic_function(&samples, 10.0, 20.0, 2.0),
            Err(TriggerError::InvalidWindow { .. })
        ));
        assert!(compute_characteristic_function(&samples, 10.0, 0.0, 2.0).is_err());
        assert!(compute_characteristic_function(&samples, 0.01, 2.0, 20.0).is_err());
    }

    #[test]
    fn reference_interval() {
        let cf = [0.0, 0.0, 5.0, 5.0, 5.0, 0.0, 0.0];
        assert_eq!(
            detect_triggers(&cf, 4.0, 1.0),
            vec![TriggerInterval { onset: 2, offset: 5 }]
        );
    }

    #[test]
    fn intervals_are_sorted_and_disjoint() {
        let mut rng = StdRng::seed_from_u64(7);
        let cf: Vec<Real> = (0..2000).map(|_| rng.random_range(0.0..6.0)).collect();
        let intervals = detect_triggers(&cf, 4.0, 1.0);
        assert!(!intervals.is_empty());
        for interval in &intervals {
            assert!(interval.onset < interval.offset);
        }
        for pair in intervals.windows(2) {
            assert!(pair[0].offset <= pair[1].onset);
        }
    }

    #[test]
    fn no_triggers_is_a_normal_result() {
        let cf = vec![1.0; 100];
        assert!(detect_triggers(&cf, 4.0, 1.5).is_empty());
    }

    #[test]
    fn burst_is_detected() {
        let series = noisy_series_with_burst(3);
        let report = process(&series, &parameters()).unwrap();
        assert_eq!(report.characteristic_function().len(), series.len());
        assert_eq!(report.intervals().len(), 1);
        let interval = report.intervals()[0];
        // Onset at the burst, within a short-term window of its start.
        assert!((2000..2120).contains(&interval.onset));
        assert!(interval.offset > interval.onset);
    }

    #[test]
    fn span_mask_marks_intervals() {
        let series = noisy_series_with_burst(3);
        let report = process(&series, &parameters()).unwrap();
        let interval = report.intervals()[0];
        let mask = report.span_mask();
        assert_eq!(mask.len(), series.len());
        assert!(!mask[interval.onset - 1]);
        assert!(mask[interval.onset]);
        assert!(mask[interval.offset - 1]);
        assert!(!mask[interval.offset]);
    }

    #[test]
    fn onset_times_follow_the_series_clock() {
        let series = noisy_series_with_burst(3);
        let report = process(&series, &parameters()).unwrap();
        let times = report.onset_times(&series);
        assert_eq!(times.len(), report.intervals().len());
        assert_eq!(
            times[0],
            series.timestamp_of_sample(report.intervals()[0].onset)
        );
    }

    #[test]
    fn cf_stats_on_constant_function() {
        let samples = vec![3.0; 500];
        let series = SampleSeries::new(
            samples,
            10.0,
            Utc.with_ymd_and_hms(1971, 2, 9, 0, 0, 0).unwrap(),
        )
        .unwrap();
        let report = process(&series, &parameters()).unwrap();
        let (mean, std) = report.cf_stats();
        assert_approx_eq!(mean, 1.0, 1e-10);
        assert_approx_eq!(std, 0.0, 1e-10);
    }

    #[test]
    fn batch_matches_individual_runs() {
        let batch = vec![
            noisy_series_with_burst(3),
            noisy_series_with_burst(5),
            noisy_series_with_burst(11),
        ];
        let reports = process_batch(&batch, &parameters()).unwrap();
        assert_eq!(reports.len(), batch.len());
        for (series, report) in batch.iter().zip(&reports) {
            assert_eq!(report, &process(series, &parameters()).unwrap());
        }
    }
}
