//! Image decoding
//!
//! Maps bipolar states onto fixed-size grayscale images and back. Pixels are
//! rescaled from {-1, +1} to [0, 1] with `(v + 1) / 2`.

use crate::error::{HopfieldError, Result};
use crate::hopfield::validate_bipolar;
use ndarray::Array2;

/// Reshape a state into a `rows x cols` image in row-major order
///
/// A state shorter than `rows * cols` leaves the trailing pixels at zero.
pub fn decode_image(state: &[f64], rows: usize, cols: usize) -> Result<Array2<f64>> {
    let pixels = rows.checked_mul(cols).ok_or_else(|| {
        HopfieldError::InvalidParameter(format!("image of {} x {} pixels is too large", rows, cols))
    })?;
    if state.len() > pixels {
        return Err(HopfieldError::shape(pixels, state.len()));
    }

    let mut image = Array2::zeros((rows, cols));
    for (slot, &value) in image.iter_mut().zip(state.iter()) {
        *slot = (value + 1.0) / 2.0;
    }
    Ok(image)
}

/// Flatten an image into a bipolar state; pixels >= 0.5 become +1
pub fn encode_image(image: &Array2<f64>) -> Vec<f64> {
    image
        .iter()
        .map(|&p| if p >= 0.5 { 1.0 } else { -1.0 })
        .collect()
}

/// Render a bipolar state as text, one line per image row
pub fn render_ascii(state: &[f64], rows: usize, cols: usize) -> Result<String> {
    validate_bipolar(state)?;
    let image = decode_image(state, rows, cols)?;

    let mut out = String::with_capacity(rows * (cols + 1));
    for row in image.rows() {
        out.extend(row.iter().map(|&p| if p >= 0.5 { '#' } else { '.' }));
        out.push('\n');
    }
    Ok(out)
}
