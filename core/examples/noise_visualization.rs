use noise_core::{
    ClassicPerlin, FieldSampler, Fractal, FractalParams, NoiseGenerator, ScalarField,
    utils::{normalize, to_gray8},
};
use image::GrayImage;
use std::error::Error;
use std::path::Path;

fn save_field(mut field: ScalarField, filename: &str) -> Result<(), Box<dyn Error>> {
    // Stretch to the full gray range so both strategies are comparable
    normalize(&mut field);
    let (w, h) = (field.width() as u32, field.height() as u32);
    let img = GrayImage::from_raw(w, h, to_gray8(&field)).ok_or("buffer size mismatch")?;
    img.save(Path::new(filename))?;
    println!("Saved {}", filename);
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let size = 256;
    let perlin = ClassicPerlin::new(42);
    println!("{} seed={}", perlin.name(), perlin.seed());

    // FBm with the classic 18 octaves
    let fbm = FieldSampler::new(size, size, Fractal::Fbm(FractalParams::with_octaves(18)?))?;
    save_field(fbm.sample(&perlin), "fbm.png")?;

    // Ridged multifractal, sampled at a different depth
    let ridged = FieldSampler::new(
        size,
        size,
        Fractal::Ridged {
            offset: 1.0,
            params: FractalParams::with_octaves(8)?,
        },
    )?
    .with_z(0.5);
    save_field(ridged.sample(&perlin), "ridged.png")?;

    Ok(())
}
