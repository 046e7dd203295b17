//! Synthetic trace generation for exercising the detector without a
//! waveform loader: a Gaussian noise floor with transient bursts of
//! band-limited energy injected on top.

use chrono::{DateTime, Utc};
use moonquake_common::{Real, SampleRate, SampleSeries};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// A transient burst of energy: a Gaussian envelope of scaled noise
/// centred on the middle of the given span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub start_seconds: Real,
    pub duration_seconds: Real,
    pub amplitude: Real,
}

impl Burst {
    fn envelope_at(&self, time_seconds: Real) -> Real {
        let centre = self.start_seconds + self.duration_seconds / 2.0;
        // Sigma of a quarter duration puts ~95% of the energy in the span.
        let sigma = self.duration_seconds / 4.0;
        if sigma <= 0.0 {
            return 0.0;
        }
        (-0.5 * ((time_seconds - centre) / sigma).powi(2)).exp()
    }
}

/// Generates a trace of Gaussian background noise with the given bursts
/// added. Deterministic for a given `rng` state.
pub fn generate_series<R: Rng>(
    length_seconds: Real,
    sampling_rate: SampleRate,
    noise_sd: Real,
    bursts: &[Burst],
    start_time: DateTime<Utc>,
    rng: &mut R,
) -> anyhow::Result<SampleSeries> {
    let count = (length_seconds * sampling_rate).round().max(0.0) as usize;
    let background = Normal::new(0.0, noise_sd)?;
    let unit = Normal::new(0.0, 1.0)?;

    let samples = (0..count)
        .map(|index| {
            let time_seconds = index as Real / sampling_rate;
            let mut value: Real = background.sample(rng);
            for burst in bursts {
                value += burst.amplitude * burst.envelope_at(time_seconds) * unit.sample(rng);
            }
            value
        })
        .collect();

    Ok(SampleSeries::new(samples, sampling_rate, start_time)?)
}
