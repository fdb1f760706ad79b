use crate::field::ScalarField;

// Keeps a flat field from dividing by zero
const MIN_SPAN: f32 = 0.001;

// Convert one sample to a byte the way a float colour channel saturates:
// clamp to [0, 1], then scale onto 0..=255
#[inline]
fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

// One byte per sample, for grayscale image encoders
pub fn to_gray8(field: &ScalarField) -> Vec<u8> {
    field.as_slice().iter().map(|&v| to_byte(v)).collect()
}

// Same gray value replicated across R, G and B
pub fn to_rgb8(field: &ScalarField) -> Vec<u8> {
    let mut buf = Vec::with_capacity(field.len() * 3);
    for &v in field.as_slice() {
        let g = to_byte(v);
        buf.extend_from_slice(&[g, g, g]);
    }
    buf
}

// Rescale the field into [0, 1] using its own min and max.
// Raw fractal output is centred on zero, so without this half of it clips to black.
pub fn normalize(field: &mut ScalarField) {
    let (min, max) = field.min_max();
    let span = (max - min).max(MIN_SPAN);
    for v in field.as_mut_slice() {
        *v = (*v - min) / span;
    }
}
