use chrono::Utc;
use clap::Parser;
use moonquake_common::{Real, SampleRate};
use rand::{SeedableRng, rngs::StdRng};
use std::path::PathBuf;
use trace_to_triggers::{
    parameters::{BurstWrapper, DetectionParameters},
    processing,
    synthetic::generate_series,
    trigger_detection::SaveToFileFilter,
};
use tracing::info;

// cargo run --bin trace-to-triggers -- --sta-seconds 120 --lta-seconds 600 --threshold-on 4 --threshold-off 1.5 --burst 1800,300,10

#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Length of the synthesised trace, in seconds.
    #[clap(long, default_value = "3600")]
    length_seconds: Real,

    /// Sampling rate of the synthesised trace, in Hz.
    #[clap(long, default_value = "6.625")]
    sampling_rate: SampleRate,

    /// Standard deviation of the background noise.
    #[clap(long, default_value = "1.0")]
    noise_sd: Real,

    /// Burst to inject, as 'start_seconds,duration_seconds,amplitude'.
    /// May be given more than once.
    #[clap(long = "burst", default_value = "1800,300,10")]
    bursts: Vec<BurstWrapper>,

    /// Seed for the trace generator.
    #[clap(long, default_value = "0")]
    seed: u64,

    /// File to write the detected intervals to, one 'onset,offset' pair
    /// of sample indices per line.
    #[clap(long)]
    save_file: Option<PathBuf>,

    #[clap(flatten)]
    parameters: DetectionParameters,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Cli::parse();

    let bursts: Vec<_> = args.bursts.iter().map(|wrapper| wrapper.0).collect();
    let mut rng = StdRng::seed_from_u64(args.seed);
    let series = generate_series(
        args.length_seconds,
        args.sampling_rate,
        args.noise_sd,
        &bursts,
        Utc::now(),
        &mut rng,
    )?;

    let report = processing::process(&series, &args.parameters)?;

    let (cf_mean, cf_std) = report.cf_stats();
    info!("Characteristic function mean {cf_mean:.4}, std {cf_std:.4}");

    if report.intervals().is_empty() {
        info!("No seismic activity detected.");
    } else {
        info!("Detected {} seismic events.", report.intervals().len());
    }
    for (interval, onset_time) in report.intervals().iter().zip(report.onset_times(&series)) {
        info!(
            "Trigger at {onset_time}: samples {interval}, t = {:.2} s to {:.2} s",
            series.time_of_sample(interval.onset),
            series.time_of_sample(interval.offset),
        );
    }

    if let Some(path) = args.save_file {
        report.intervals().iter().copied().save_to_file(&path)?;
    }

    Ok(())
}
