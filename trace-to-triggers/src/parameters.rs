use crate::{synthetic::Burst, trigger_detection::Real};
use anyhow::{Error, anyhow};
use clap::Parser;
use std::str::FromStr;

/// Detection configuration: STA/LTA window lengths and the two trigger
/// thresholds. Defaults are the values used for the Apollo 12 Grade-A
/// catalog analysis.
#[derive(Debug, Clone, Copy, Parser)]
pub struct DetectionParameters {
    /// Short-term average window length, in seconds.
    #[clap(long, default_value = "120")]
    pub sta_seconds: Real,

    /// Long-term average window length, in seconds.
    #[clap(long, default_value = "600")]
    pub lta_seconds: Real,

    /// Characteristic-function value at which a trigger switches on.
    #[clap(long, default_value = "4")]
    pub threshold_on: Real,

    /// Characteristic-function value below which a trigger switches off.
    #[clap(long, default_value = "1.5")]
    pub threshold_off: Real,
}

#[derive(Debug, Clone, Copy)]
pub struct BurstWrapper(pub Burst);

impl FromStr for BurstWrapper {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let vals: Vec<_> = s.split(',').collect();
        if vals.len() == 3 {
            Ok(BurstWrapper(Burst {
                start_seconds: Real::from_str(vals[0])?,
                duration_seconds: Real::from_str(vals[1])?,
                amplitude: Real::from_str(vals[2])?,
            }))
        } else {
            Err(anyhow!(
                "Incorrect number of parameters in burst, expected pattern '*,*,*', got '{s}'"
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_burst() {
        let BurstWrapper(burst) = "1800,300,10".parse().unwrap();
        assert_eq!(burst.start_seconds, 1800.0);
        assert_eq!(burst.duration_seconds, 300.0);
        assert_eq!(burst.amplitude, 10.0);
    }

    #[test]
    fn reject_malformed_burst() {
        assert!("1800,300".parse::<BurstWrapper>().is_err());
        assert!("1800,300,10,4".parse::<BurstWrapper>().is_err());
        assert!("1800,x,10".parse::<BurstWrapper>().is_err());
    }
}
