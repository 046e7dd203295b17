use crate::error::{SimulationError, SimulationResult};
use clap::Parser;
use moonquake_common::Real;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Deserialize;
use std::fmt::Display;

/// One Monte Carlo trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationSample {
    pub observed_magnitude: Real,
    pub operational_threshold: Real,
    pub true_threshold: Real,
}

impl CalibrationSample {
    /// Difference between the observed magnitude and the reference
    /// threshold. The source model takes the true threshold to be the
    /// operational one, so this works out to the drawn noise value.
    pub fn bias(&self) -> Real {
        self.observed_magnitude - self.true_threshold
    }
}

impl Display for CalibrationSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{0},{1},{2}",
            self.observed_magnitude, self.operational_threshold, self.true_threshold
        ))
    }
}

/// A threshold-bias scenario: how many trials to run and the normal
/// distributions the observed magnitude and the noise are drawn from.
/// Defaults match the original Apollo 12 analysis scenario.
#[derive(Debug, Clone, Copy, Parser, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ThresholdSimulation {
    /// Number of Monte Carlo trials to run.
    #[clap(long, default_value = "1000")]
    pub trials: usize,

    /// Mean of the observed-magnitude distribution.
    #[clap(long, default_value = "3.0")]
    pub signal_mean: Real,

    /// Standard deviation of the observed-magnitude distribution.
    #[clap(long, default_value = "0.5")]
    pub signal_sd: Real,

    /// Mean of the noise distribution.
    #[clap(long, default_value = "1.0")]
    pub noise_mean: Real,

    /// Standard deviation of the noise distribution.
    #[clap(long, default_value = "0.2")]
    pub noise_sd: Real,
}

impl ThresholdSimulation {
    /// Runs the scenario against the given random source. The caller
    /// owns the source, so seeding it makes the run reproducible.
    /// Parameters are validated before any sampling takes place.
    pub fn run<R: Rng>(&self, rng: &mut R) -> SimulationResult<SimulationResults> {
        if self.trials < 1 {
            return Err(SimulationError::InvalidTrialCount(self.trials));
        }
        let signal = normal("signal", self.signal_mean, self.signal_sd)?;
        let noise = normal("noise", self.noise_mean, self.noise_sd)?;

        let samples = (0..self.trials)
            .map(|_| {
                let observed_magnitude = signal.sample(rng);
                let drawn_noise = noise.sample(rng);
                let operational_threshold = observed_magnitude - drawn_noise;
                CalibrationSample {
                    observed_magnitude,
                    operational_threshold,
                    // Deliberately identical to the operational threshold:
                    // the source model has no ground-truth offset.
                    true_threshold: operational_threshold,
                }
            })
            .collect();
        Ok(SimulationResults::new(samples))
    }
}

fn normal(name: &'static str, mean: Real, sd: Real) -> SimulationResult<Normal<Real>> {
    if sd < 0.0 {
        return Err(SimulationError::InvalidDistribution { name, sd });
    }
    Normal::new(mean, sd).map_err(|_| SimulationError::InvalidDistribution { name, sd })
}

/// Per-trial samples plus the bias summary statistics reported to the
/// caller. The standard deviation is the population form, matching the
/// summary the source scripts print.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResults {
    samples: Vec<CalibrationSample>,
    mean_bias: Real,
    std_bias: Real,
}

impl SimulationResults {
    fn new(samples: Vec<CalibrationSample>) -> Self {
        let count = samples.len() as Real;
        let mean_bias = samples.iter().map(CalibrationSample::bias).sum::<Real>() / count;
        let std_bias = (samples
            .iter()
            .map(|sample| (sample.bias() - mean_bias).powi(2))
            .sum::<Real>()
            / count)
            .sqrt();
        Self {
            samples,
            mean_bias,
            std_bias,
        }
    }

    pub fn samples(&self) -> &[CalibrationSample] {
        &self.samples
    }

    pub fn mean_bias(&self) -> Real {
        self.mean_bias
    }

    pub fn std_bias(&self) -> Real {
        self.std_bias
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::{SeedableRng, rngs::StdRng};

    fn scenario() -> ThresholdSimulation {
        ThresholdSimulation {
            trials: 1000,
            signal_mean: 3.0,
            signal_sd: 0.5,
            noise_mean: 1.0,
            noise_sd: 0.2,
        }
    }

    #[test]
    fn zero_trials_rejected() {
        let mut rng = StdRng::seed_from_u64(42);
        let results = ThresholdSimulation {
            trials: 0,
            ..scenario()
        }
        .run(&mut rng);
        assert_eq!(results, Err(SimulationError::InvalidTrialCount(0)));
    }

    #[test]
    fn negative_standard_deviation_rejected() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            ThresholdSimulation {
                signal_sd: -1.0,
                ..scenario()
            }
            .run(&mut rng),
            Err(SimulationError::InvalidDistribution {
                name: "signal",
                sd: -1.0
            })
        );
        assert!(
            ThresholdSimulation {
                noise_sd: -0.2,
                ..scenario()
            }
            .run(&mut rng)
            .is_err()
        );
    }

    #[test]
    fn one_sample_per_trial() {
        let mut rng = StdRng::seed_from_u64(42);
        let results = scenario().run(&mut rng).unwrap();
        assert_eq!(results.samples().len(), 1000);
    }

    #[test]
    fn reproducible_for_a_seed() {
        let mut first_rng = StdRng::seed_from_u64(42);
        let mut second_rng = StdRng::seed_from_u64(42);
        let first = scenario().run(&mut first_rng).unwrap();
        let second = scenario().run(&mut second_rng).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn bias_equals_drawn_noise_by_construction() {
        let mut rng = StdRng::seed_from_u64(7);
        let results = scenario().run(&mut rng).unwrap();
        for sample in results.samples() {
            assert_eq!(sample.true_threshold, sample.operational_threshold);
            assert_approx_eq!(
                sample.bias(),
                sample.observed_magnitude - sample.operational_threshold,
                1e-12
            );
        }
    }

    #[test]
    fn mean_bias_approaches_noise_mean() {
        let mut rng = StdRng::seed_from_u64(42);
        let results = ThresholdSimulation {
            trials: 100_000,
            ..scenario()
        }
        .run(&mut rng)
        .unwrap();
        // Standard error is noise_sd / sqrt(trials), well under this bound.
        assert_approx_eq!(results.mean_bias(), 1.0, 0.01);
        assert_approx_eq!(results.std_bias(), 0.2, 0.01);
    }

    #[test]
    fn zero_spread_gives_exact_bias() {
        let mut rng = StdRng::seed_from_u64(0);
        let results = ThresholdSimulation {
            trials: 10,
            signal_sd: 0.0,
            noise_sd: 0.0,
            ..scenario()
        }
        .run(&mut rng)
        .unwrap();
        assert_approx_eq!(results.mean_bias(), 1.0, 1e-12);
        assert_approx_eq!(results.std_bias(), 0.0, 1e-12);
    }
}
