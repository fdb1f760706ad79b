// core holds the noise, fractal and field sampling algorithms
pub mod error;
pub mod field;
pub mod fractal;
pub mod perlin3;
pub mod permutation;
pub mod utils;

pub use error::NoiseError;
pub use field::{FieldSampler, ScalarField, generate_field};
pub use fractal::{Fractal, FractalParams};
pub use perlin3::ClassicPerlin;
pub use permutation::PermutationTable;

// A seeded 3D noise source.
//
// Implementations hold only read-only state built at construction, so a single instance
// can be shared across threads and sampled concurrently. Callers own the generator and
// pass it to whatever needs it.
pub trait NoiseGenerator: Send + Sync {
    // Single-octave noise at (x, y, z). NaN or infinite input yields NaN or infinite output.
    fn generate(&self, x: f64, y: f64, z: f64) -> f64;

    // Name of the algorithm.
    fn name(&self) -> &'static str;

    // Seed the generator was built from.
    fn seed(&self) -> i32;

    // Fractal Brownian motion built on `generate`
    fn fbm(&self, x: f64, y: f64, z: f64, params: &FractalParams) -> f64 {
        fractal::fbm(self, x, y, z, params)
    }

    // Ridged multifractal built on `generate`
    fn ridged_multifractal(
        &self,
        x: f64,
        y: f64,
        z: f64,
        offset: f64,
        params: &FractalParams,
    ) -> f64 {
        fractal::ridged_multifractal(self, x, y, z, offset, params)
    }
}
