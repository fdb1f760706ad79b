use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use noise_core::{ClassicPerlin, FieldSampler, NoiseGenerator, utils::normalize};
use tracing_subscriber::EnvFilter;

mod capture;
mod config;

use config::{CaptureFormat, FractalKind, RenderConfig};

#[derive(Parser, Debug)]
#[command(
    name = "noise-cli",
    about = "Render a fractal Perlin noise field to a PNG or JPEG image"
)]
pub struct Cli {
    /// JSON file with render settings; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output path without extension
    #[arg(short, long, default_value = "noise")]
    output: PathBuf,

    /// Generator seed
    #[arg(short, long, allow_negative_numbers = true)]
    seed: Option<i32>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Accumulation strategy
    #[arg(short, long, value_enum)]
    fractal: Option<FractalKind>,

    #[arg(long)]
    octaves: Option<u32>,

    /// Frequency multiplier per octave
    #[arg(long)]
    lacunarity: Option<f64>,

    /// Amplitude multiplier per octave
    #[arg(long)]
    gain: Option<f64>,

    /// Ridge offset (ridged strategy only)
    #[arg(long, allow_negative_numbers = true)]
    offset: Option<f64>,

    /// Depth of the slice through the 3D noise
    #[arg(long, allow_negative_numbers = true)]
    z: Option<f64>,

    /// Rescale the field to [0, 1] before encoding
    #[arg(long, overrides_with = "no_normalize")]
    normalize: bool,

    /// Encode the raw values even if the config file asks to normalize
    #[arg(long, overrides_with = "normalize")]
    no_normalize: bool,

    #[arg(long, value_enum)]
    format: Option<CaptureFormat>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    // RUST_LOG wins over --verbose
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = RenderConfig::from_cli(&cli)?;
    tracing::debug!(?config, "render settings");

    let perlin = ClassicPerlin::new(config.seed);
    let sampler = FieldSampler::new(config.width, config.height, config.fractal()?)?
        .with_z(config.z);

    let mut field = sampler.sample(&perlin);
    if config.normalize {
        normalize(&mut field);
    }

    let path =
        capture::capture(&field, &cli.output, config.format).context("nothing was written")?;
    tracing::info!(
        generator = perlin.name(),
        seed = perlin.seed(),
        fractal = sampler.fractal().kind(),
        "saved {}",
        path.display()
    );

    Ok(())
}
