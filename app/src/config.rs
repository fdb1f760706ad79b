use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use noise_core::{Fractal, FractalParams, fractal};
use serde::{Deserialize, Serialize};

use crate::Cli;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FractalKind {
    Fbm,
    Ridged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CaptureFormat {
    Png,
    Jpeg,
}

impl CaptureFormat {
    pub fn extension(self) -> &'static str {
        match self {
            CaptureFormat::Png => "png",
            CaptureFormat::Jpeg => "jpg",
        }
    }
}

/// Everything needed to render one field. Loaded from JSON, then overridden by flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub seed: i32,
    pub width: usize,
    pub height: usize,
    pub fractal: FractalKind,
    pub octaves: u32,
    pub lacunarity: f64,
    pub gain: f64,
    // Only used by the ridged strategy
    pub offset: f64,
    pub z: f64,
    pub normalize: bool,
    pub format: CaptureFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            width: 256,
            height: 256,
            fractal: FractalKind::Fbm,
            octaves: 18,
            lacunarity: fractal::DEFAULT_LACUNARITY,
            gain: fractal::DEFAULT_GAIN,
            offset: 1.0,
            z: 0.0,
            normalize: false,
            format: CaptureFormat::Png,
        }
    }
}

impl RenderConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    // Config file (if any) first, then whatever flags were passed explicitly
    pub fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(v) = cli.seed {
            config.seed = v;
        }
        if let Some(v) = cli.width {
            config.width = v;
        }
        if let Some(v) = cli.height {
            config.height = v;
        }
        if let Some(v) = cli.fractal {
            config.fractal = v;
        }
        if let Some(v) = cli.octaves {
            config.octaves = v;
        }
        if let Some(v) = cli.lacunarity {
            config.lacunarity = v;
        }
        if let Some(v) = cli.gain {
            config.gain = v;
        }
        if let Some(v) = cli.offset {
            config.offset = v;
        }
        if let Some(v) = cli.z {
            config.z = v;
        }
        if let Some(v) = cli.format {
            config.format = v;
        }
        if cli.normalize {
            config.normalize = true;
        } else if cli.no_normalize {
            config.normalize = false;
        }

        Ok(config)
    }

    pub fn fractal(&self) -> noise_core::error::Result<Fractal> {
        let params = FractalParams::new(self.octaves, self.lacunarity, self.gain)?;
        Ok(match self.fractal {
            FractalKind::Fbm => Fractal::Fbm(params),
            FractalKind::Ridged => Fractal::Ridged {
                offset: self.offset,
                params,
            },
        })
    }
}
