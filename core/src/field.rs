use rayon::prelude::*;

use crate::NoiseGenerator;
use crate::error::{NoiseError, Result};
use crate::fractal::{Fractal, FractalParams};

// Octave count the grayscale field has always been rendered with
pub const DEFAULT_FIELD_OCTAVES: u32 = 18;

// Row-major grid of samples: value (x, y) lives at `x + y * width`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl ScalarField {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[x + y * self.width])
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    // (min, max) over all samples, ignoring NaN
    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

// Rasterizes a fractal strategy over the unit square into a ScalarField
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSampler {
    width: usize,
    height: usize,
    z: f64,
    fractal: Fractal,
}

impl FieldSampler {
    pub fn new(width: usize, height: usize, fractal: Fractal) -> Result<Self> {
        if width == 0 {
            return Err(NoiseError::invalid("width", "field width must be positive"));
        }
        if height == 0 {
            return Err(NoiseError::invalid("height", "field height must be positive"));
        }
        if width.checked_mul(height).is_none() {
            return Err(NoiseError::invalid(
                "width",
                format!("{width}x{height} samples overflow the buffer size"),
            ));
        }
        Ok(Self {
            width,
            height,
            z: 0.0,
            fractal,
        })
    }

    // Depth of the slice through 3D noise, 0.0 unless set
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = z;
        self
    }

    pub fn fractal(&self) -> &Fractal {
        &self.fractal
    }

    pub fn sample<N: NoiseGenerator + ?Sized>(&self, noise: &N) -> ScalarField {
        let _span = tracing::debug_span!(
            "sample_field",
            width = self.width,
            height = self.height,
            fractal = self.fractal.kind(),
            octaves = self.fractal.params().octaves(),
        )
        .entered();

        let x_step = 1.0 / self.width as f64;
        let y_step = 1.0 / self.height as f64;
        let mut data = vec![0.0f32; self.width * self.height];

        // Rows are independent, so fill them in parallel
        data.par_chunks_mut(self.width)
            .enumerate()
            .for_each(|(y, row)| {
                let ny = y as f64 * y_step;
                for (x, cell) in row.iter_mut().enumerate() {
                    let nx = x as f64 * x_step;
                    *cell = self.fractal.sample(noise, nx, ny, self.z) as f32;
                }
            });

        let field = ScalarField {
            width: self.width,
            height: self.height,
            data,
        };
        let (min, max) = field.min_max();
        tracing::trace!(min, max, "field sampled");
        field
    }
}

// Grayscale field with the long-standing defaults: FBm, 18 octaves, z = 0.
pub fn generate_field<N: NoiseGenerator + ?Sized>(
    noise: &N,
    width: usize,
    height: usize,
) -> Result<ScalarField> {
    let params = FractalParams::with_octaves(DEFAULT_FIELD_OCTAVES)?;
    Ok(FieldSampler::new(width, height, Fractal::Fbm(params))?.sample(noise))
}

#[cfg(test)]
mod tests {
    use super::{FieldSampler, generate_field};
    use crate::fractal::{Fractal, FractalParams, fbm};
    use crate::{ClassicPerlin, NoiseError};

    #[test]
    fn field_dimensions() {
        let p = ClassicPerlin::new(5);
        let field = generate_field(&p, 8, 3).unwrap();
        assert_eq!(field.width(), 8);
        assert_eq!(field.height(), 3);
        assert_eq!(field.len(), 24);
        assert!(field.get(7, 2).is_some());
        assert!(field.get(8, 0).is_none());
        assert!(field.get(0, 3).is_none());
    }

    #[test]
    fn field_rejects_empty_dimensions() {
        let p = ClassicPerlin::new(5);
        assert!(matches!(
            generate_field(&p, 0, 4),
            Err(NoiseError::InvalidArgument { name: "width", .. })
        ));
        assert!(matches!(
            generate_field(&p, 4, 0),
            Err(NoiseError::InvalidArgument { name: "height", .. })
        ));
    }

    #[test]
    fn field_rejects_overflowing_dimensions() {
        let params = FractalParams::with_octaves(1).unwrap();
        assert!(matches!(
            FieldSampler::new(usize::MAX, 2, Fractal::Fbm(params)),
            Err(NoiseError::InvalidArgument { name: "width", .. })
        ));
        assert!(FieldSampler::new(2, usize::MAX, Fractal::Fbm(params)).is_err());
        assert!(generate_field(&ClassicPerlin::new(1), usize::MAX, usize::MAX).is_err());
    }

    #[test]
    fn field_row_major_layout() {
        let p = ClassicPerlin::new(11);
        let params = FractalParams::with_octaves(5).unwrap();
        let sampler = FieldSampler::new(5, 4, Fractal::Fbm(params))
            .unwrap()
            .with_z(0.25);
        let field = sampler.sample(&p);
        for y in 0..4 {
            for x in 0..5 {
                let (nx, ny) = (x as f64 * (1.0 / 5.0), y as f64 * (1.0 / 4.0));
                let expected = fbm(&p, nx, ny, 0.25, &params) as f32;
                assert_eq!(field.as_slice()[x + y * 5], expected);
            }
        }
    }

    #[test]
    fn field_origin_is_zero() {
        // (0, 0, 0) is a lattice point at every octave frequency
        let p = ClassicPerlin::new(1);
        let field = generate_field(&p, 4, 4).unwrap();
        assert_eq!(field.get(0, 0), Some(0.0));
    }

    #[test]
    fn min_max_spans_values() {
        let p = ClassicPerlin::new(8);
        let field = generate_field(&p, 16, 16).unwrap();
        let (min, max) = field.min_max();
        assert!(min <= max);
        assert!(field.as_slice().iter().all(|&v| v >= min && v <= max));
    }
}
