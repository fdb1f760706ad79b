use crate::NoiseGenerator;
use crate::permutation::PermutationTable;

// Twelve gradient directions: the midpoints of a cube's edges
pub static GRADIENTS: [[i8; 3]; 12] = [
    [1, 1, 0],
    [-1, 1, 0],
    [1, -1, 0],
    [-1, -1, 0],
    [1, 0, 1],
    [-1, 0, 1],
    [1, 0, -1],
    [-1, 0, -1],
    [0, 1, 1],
    [0, -1, 1],
    [0, 1, -1],
    [0, -1, -1],
];

// Classic 3D Perlin gradient noise over a seeded permutation table
#[derive(Debug, Clone)]
pub struct ClassicPerlin {
    seed: i32,
    perm: PermutationTable,
}

impl ClassicPerlin {
    pub fn new(seed: i32) -> Self {
        Self {
            seed,
            perm: PermutationTable::new(seed),
        }
    }

    pub fn permutation(&self) -> &PermutationTable {
        &self.perm
    }

    // Truncate, then step down for anything that is not strictly positive.
    // Note this sends exact integers <= 0 one cell lower than floor() would;
    // the offset then lands on 1.0 instead of 0.0 and the result is unchanged.
    // Kept in f64 so finite coordinates of any magnitude get an exact cell.
    #[inline]
    fn fast_floor(v: f64) -> f64 {
        if v > 0.0 { v.trunc() } else { v.trunc() - 1.0 }
    }

    // Cell index modulo 256; NaN falls through the cast to 0
    #[inline]
    fn wrap(cell: f64) -> usize {
        cell.rem_euclid(256.0) as usize
    }

    // Fade function as defined by Ken Perlin: 6t^5 - 15t^4 + 10t^3
    #[inline]
    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    #[inline]
    fn lerp(a: f64, b: f64, t: f64) -> f64 {
        (1.0 - t) * a + t * b
    }

    #[inline]
    fn dot(g: &[i8; 3], x: f64, y: f64, z: f64) -> f64 {
        g[0] as f64 * x + g[1] as f64 * y + g[2] as f64 * z
    }

    // Three nested table lookups, folded onto the 12 gradients
    #[inline]
    fn gradient(&self, x: usize, y: usize, z: usize) -> &'static [i8; 3] {
        let p = &self.perm;
        &GRADIENTS[p.get(x + p.get(y + p.get(z))) % 12]
    }
}

impl NoiseGenerator for ClassicPerlin {
    // Raw single-octave Perlin noise at (x, y, z), roughly in [-1, 1]
    fn generate(&self, x: f64, y: f64, z: f64) -> f64 {
        // Unit cube that contains the point
        let cx = Self::fast_floor(x);
        let cy = Self::fast_floor(y);
        let cz = Self::fast_floor(z);

        // Position inside that cube
        let xf = x - cx;
        let yf = y - cy;
        let zf = z - cz;

        // Wrap the cell at 256
        let xi = Self::wrap(cx);
        let yi = Self::wrap(cy);
        let zi = Self::wrap(cz);

        let g000 = self.gradient(xi, yi, zi);
        let g001 = self.gradient(xi, yi, zi + 1);
        let g010 = self.gradient(xi, yi + 1, zi);
        let g011 = self.gradient(xi, yi + 1, zi + 1);
        let g100 = self.gradient(xi + 1, yi, zi);
        let g101 = self.gradient(xi + 1, yi, zi + 1);
        let g110 = self.gradient(xi + 1, yi + 1, zi);
        let g111 = self.gradient(xi + 1, yi + 1, zi + 1);

        // Contribution of each corner
        let n000 = Self::dot(g000, xf, yf, zf);
        let n100 = Self::dot(g100, xf - 1.0, yf, zf);
        let n010 = Self::dot(g010, xf, yf - 1.0, zf);
        let n110 = Self::dot(g110, xf - 1.0, yf - 1.0, zf);
        let n001 = Self::dot(g001, xf, yf, zf - 1.0);
        let n101 = Self::dot(g101, xf - 1.0, yf, zf - 1.0);
        let n011 = Self::dot(g011, xf, yf - 1.0, zf - 1.0);
        let n111 = Self::dot(g111, xf - 1.0, yf - 1.0, zf - 1.0);

        let u = Self::fade(xf);
        let v = Self::fade(yf);
        let w = Self::fade(zf);

        // Along x
        let nx00 = Self::lerp(n000, n100, u);
        let nx01 = Self::lerp(n001, n101, u);
        let nx10 = Self::lerp(n010, n110, u);
        let nx11 = Self::lerp(n011, n111, u);

        // Along y
        let nxy0 = Self::lerp(nx00, nx10, v);
        let nxy1 = Self::lerp(nx01, nx11, v);

        // Along z
        Self::lerp(nxy0, nxy1, w)
    }

    fn name(&self) -> &'static str {
        "ClassicPerlin"
    }

    fn seed(&self) -> i32 {
        self.seed
    }
}
