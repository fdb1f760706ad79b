use crate::NoiseGenerator;
use crate::error::{NoiseError, Result};

pub const DEFAULT_LACUNARITY: f64 = 2.0;
pub const DEFAULT_GAIN: f64 = 0.5;

// First octave weight for both strategies
const BASE_AMPLITUDE: f64 = 0.5;

// Octave layout shared by the fractal strategies.
//
// `lacunarity` multiplies the frequency and `gain` the amplitude after every octave.
// Neither is range-checked: non-finite values simply propagate into the output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FractalParams {
    octaves: u32,
    lacunarity: f64,
    gain: f64,
}

impl FractalParams {
    pub fn new(octaves: u32, lacunarity: f64, gain: f64) -> Result<Self> {
        if octaves == 0 {
            return Err(NoiseError::invalid("octaves", "at least one octave is required"));
        }
        Ok(Self {
            octaves,
            lacunarity,
            gain,
        })
    }

    // Default lacunarity (2.0) and gain (0.5)
    pub fn with_octaves(octaves: u32) -> Result<Self> {
        Self::new(octaves, DEFAULT_LACUNARITY, DEFAULT_GAIN)
    }

    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    pub fn lacunarity(&self) -> f64 {
        self.lacunarity
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    // (frequency, amplitude) for every octave, starting at (1.0, 0.5)
    fn octave_weights(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let mut frequency = 1.0;
        let mut amplitude = BASE_AMPLITUDE;
        (0..self.octaves).map(move |_| {
            let current = (frequency, amplitude);
            frequency *= self.lacunarity;
            amplitude *= self.gain;
            current
        })
    }
}

// Fractal Brownian motion: plain weighted sum of octaves.
pub fn fbm<N: NoiseGenerator + ?Sized>(
    noise: &N,
    x: f64,
    y: f64,
    z: f64,
    params: &FractalParams,
) -> f64 {
    let mut total = 0.0;
    for (frequency, amplitude) in params.octave_weights() {
        total += noise.generate(x * frequency, y * frequency, z * frequency) * amplitude;
    }
    total
}

// (offset - |h|)^2
#[inline]
fn ridge(h: f64, offset: f64) -> f64 {
    let r = offset - h.abs();
    r * r
}

// Ridged multifractal: each octave's ridge is weighted by the previous octave's ridge,
// so strong ridges reinforce detail on top of them.
pub fn ridged_multifractal<N: NoiseGenerator + ?Sized>(
    noise: &N,
    x: f64,
    y: f64,
    z: f64,
    offset: f64,
    params: &FractalParams,
) -> f64 {
    let mut total = 0.0;
    let mut prev = 1.0;
    for (frequency, amplitude) in params.octave_weights() {
        let r = ridge(
            noise.generate(x * frequency, y * frequency, z * frequency),
            offset,
        );
        total += r * amplitude * prev;
        prev = r;
    }
    total
}

// Which accumulation strategy a sampler runs per point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fractal {
    Fbm(FractalParams),
    Ridged { offset: f64, params: FractalParams },
}

impl Fractal {
    pub fn sample<N: NoiseGenerator + ?Sized>(&self, noise: &N, x: f64, y: f64, z: f64) -> f64 {
        match self {
            Fractal::Fbm(params) => fbm(noise, x, y, z, params),
            Fractal::Ridged { offset, params } => {
                ridged_multifractal(noise, x, y, z, *offset, params)
            }
        }
    }

    pub fn params(&self) -> &FractalParams {
        match self {
            Fractal::Fbm(params) | Fractal::Ridged { params, .. } => params,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Fractal::Fbm(_) => "fbm",
            Fractal::Ridged { .. } => "ridged",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Fractal, FractalParams, fbm, ridged_multifractal};
    use crate::{ClassicPerlin, NoiseError, NoiseGenerator};

    // Returns the same value everywhere, which makes the octave sums easy to predict
    struct Constant(f64);

    impl NoiseGenerator for Constant {
        fn generate(&self, _x: f64, _y: f64, _z: f64) -> f64 {
            self.0
        }

        fn name(&self) -> &'static str {
            "Constant"
        }

        fn seed(&self) -> i32 {
            0
        }
    }

    #[test]
    fn zero_octaves_rejected() {
        let err = FractalParams::with_octaves(0).unwrap_err();
        assert!(matches!(
            err,
            NoiseError::InvalidArgument {
                name: "octaves",
                ..
            }
        ));
    }

    #[test]
    fn fbm_single_octave_is_half_amplitude() {
        let p = ClassicPerlin::new(42);
        let params = FractalParams::with_octaves(1).unwrap();
        for &(x, y, z) in &[(0.25, 0.5, 0.75), (3.3, -1.1, 8.6)] {
            assert_eq!(fbm(&p, x, y, z, &params), p.generate(x, y, z) * 0.5);
        }
    }

    #[test]
    fn fbm_geometric_sum() {
        // 0.5 + 0.25 + 0.125 with a constant sample of 1.0
        let params = FractalParams::with_octaves(3).unwrap();
        assert_eq!(fbm(&Constant(1.0), 0.0, 0.0, 0.0, &params), 0.875);
    }

    #[test]
    fn ridged_single_octave() {
        let p = ClassicPerlin::new(42);
        let params = FractalParams::with_octaves(1).unwrap();
        let (x, y, z) = (0.3, 0.6, 0.9);
        let h = p.generate(x, y, z);
        let r = 1.0 - h.abs();
        let expected = r * r * 0.5 * 1.0;
        assert_eq!(ridged_multifractal(&p, x, y, z, 1.0, &params), expected);
    }

    #[test]
    fn ridged_reinforces_previous_octave() {
        // ridge = (2 - 0.5)^2 = 2.25 every octave
        // total = 2.25*0.5*1 + 2.25*0.25*2.25
        let params = FractalParams::with_octaves(2).unwrap();
        let v = ridged_multifractal(&Constant(-0.5), 0.0, 0.0, 0.0, 2.0, &params);
        assert_eq!(v, 2.25 * 0.5 + 2.25 * 0.25 * 2.25);
    }

    #[test]
    fn custom_lacunarity_and_gain() {
        // Frequency does not matter for a constant; gain 0.25 gives 0.5 + 0.125
        let params = FractalParams::new(2, 3.0, 0.25).unwrap();
        assert_eq!(fbm(&Constant(1.0), 1.0, 1.0, 1.0, &params), 0.625);
        assert_eq!(params.lacunarity(), 3.0);
        assert_eq!(params.gain(), 0.25);
    }

    #[test]
    fn fractal_dispatches_to_strategy() {
        let p = ClassicPerlin::new(3);
        let params = FractalParams::with_octaves(4).unwrap();
        let f = Fractal::Fbm(params);
        let r = Fractal::Ridged {
            offset: 1.0,
            params,
        };
        assert_eq!(f.sample(&p, 0.1, 0.2, 0.3), fbm(&p, 0.1, 0.2, 0.3, &params));
        assert_eq!(
            r.sample(&p, 0.1, 0.2, 0.3),
            ridged_multifractal(&p, 0.1, 0.2, 0.3, 1.0, &params)
        );
        assert_eq!(f.kind(), "fbm");
        assert_eq!(r.params().octaves(), 4);
    }

    #[test]
    fn non_finite_gain_propagates() {
        let params = FractalParams::new(2, 2.0, f64::NAN).unwrap();
        assert!(fbm(&Constant(1.0), 0.0, 0.0, 0.0, &params).is_nan());
    }
}
