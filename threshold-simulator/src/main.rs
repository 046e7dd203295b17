use clap::Parser;
use rand::{SeedableRng, rngs::StdRng};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};
use threshold_simulator::ThresholdSimulation;
use tracing::info;

// cargo run --bin threshold-simulator -- --trials 1000 --signal-mean 3.0 --signal-sd 0.5 --noise-mean 1.0 --noise-sd 0.2 --seed 42

#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    /// JSON scenario file; takes precedence over the scenario flags.
    #[clap(long)]
    path: Option<PathBuf>,

    /// Seed for the random source.
    #[clap(long, default_value = "0")]
    seed: u64,

    /// File to write the per-trial samples to, one
    /// 'observed,operational,true' triple per line.
    #[clap(long)]
    save_file: Option<PathBuf>,

    #[clap(flatten)]
    scenario: ThresholdSimulation,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let scenario: ThresholdSimulation = match &cli.path {
        Some(path) => serde_json::from_reader(File::open(path)?)?,
        None => cli.scenario,
    };

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let results = scenario.run(&mut rng)?;

    info!("Mean Bias: {}", results.mean_bias());
    info!("Standard Deviation of Bias: {}", results.std_bias());

    if let Some(path) = cli.save_file {
        let mut file = BufWriter::new(File::create(path)?);
        for sample in results.samples() {
            writeln!(file, "{sample}")?;
        }
    }

    Ok(())
}
