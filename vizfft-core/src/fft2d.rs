//! # 2D Fourier Transform Module
//!
//! Separable 2D FFT for row-major image buffers, built on RustFFT:
//! every row is transformed, then every column. The column pass runs on a
//! transposed copy, which is transposed back so callers always get a
//! row-major buffer of the same shape.
//!
//! Only even, non-zero dimensions are accepted. The quadrant shift that
//! follows the transform is only an involution for even sizes, and the
//! viewer never needs anything else.

use anyhow::{anyhow, ensure, Result};
use rustfft::num_complex::Complex;
use rustfft::{FftDirection, FftPlanner};

/// Compute the forward 2D Fourier transform of a row-major buffer, in place.
///
/// The transformation is not normalized.
///
/// # Arguments
/// * `width` - Number of columns, even and non-zero
/// * `height` - Number of rows, even and non-zero
/// * `buffer` - `width * height` samples, row-major, overwritten with the spectrum
///
/// # Returns
/// * `Result<()>` - An error if the shape is invalid; the buffer is then untouched
pub fn fft_2d(width: usize, height: usize, buffer: &mut [Complex<f64>]) -> Result<()> {
    fft_2d_with_direction(width, height, buffer, FftDirection::Forward)
}

/// Compute the inverse 2D Fourier transform of a row-major buffer, in place.
///
/// The output is scaled by `1 / (width * height)`, so that `ifft_2d`
/// undoes `fft_2d` exactly (up to rounding).
///
/// # Arguments
/// Same as [`fft_2d`].
pub fn ifft_2d(width: usize, height: usize, buffer: &mut [Complex<f64>]) -> Result<()> {
    fft_2d_with_direction(width, height, buffer, FftDirection::Inverse)?;
    let scale = 1.0 / (width * height) as f64;
    for x in buffer.iter_mut() {
        *x *= scale;
    }
    Ok(())
}

/// Casts a real buffer to complex numbers with a zero imaginary part.
pub fn real_to_complex(values: &[f64]) -> Vec<Complex<f64>> {
    values.iter().map(|&re| Complex::new(re, 0.0)).collect()
}

fn check_shape(width: usize, height: usize, len: usize) -> Result<()> {
    ensure!(
        width > 0 && height > 0,
        "2D transform needs non-empty dimensions, got {}x{}",
        width,
        height
    );
    ensure!(
        width % 2 == 0 && height % 2 == 0,
        "2D transform needs even dimensions, got {}x{}",
        width,
        height
    );
    let expected = width
        .checked_mul(height)
        .ok_or_else(|| anyhow!("{}x{} samples overflow the address space", width, height))?;
    ensure!(
        len == expected,
        "buffer holds {} samples but {}x{} needs {}",
        len,
        width,
        height,
        expected
    );
    Ok(())
}

fn fft_2d_with_direction(
    width: usize,
    height: usize,
    buffer: &mut [Complex<f64>],
    direction: FftDirection,
) -> Result<()> {
    check_shape(width, height, buffer.len())?;

    // Rows first.
    let mut planner = FftPlanner::new();
    let fft_width = planner.plan_fft(width, direction);
    let mut scratch = vec![Complex::default(); fft_width.get_inplace_scratch_len()];
    for row in buffer.chunks_exact_mut(width) {
        fft_width.process_with_scratch(row, &mut scratch);
    }

    // Columns become rows of the transposed buffer.
    let mut transposed = transpose(width, height, buffer);
    let fft_height = planner.plan_fft(height, direction);
    scratch.resize(fft_height.get_inplace_scratch_len(), Complex::default());
    for column in transposed.chunks_exact_mut(height) {
        fft_height.process_with_scratch(column, &mut scratch);
    }

    // Back to row-major, `height` rows of `width`.
    let restored = transpose(height, width, &transposed);
    buffer.copy_from_slice(&restored);
    Ok(())
}

fn transpose<T: Copy + Default>(width: usize, height: usize, matrix: &[T]) -> Vec<T> {
    let mut transposed = vec![T::default(); matrix.len()];
    for (row, values) in matrix.chunks_exact(width).enumerate() {
        for (col, &value) in values.iter().enumerate() {
            transposed[col * height + row] = value;
        }
    }
    transposed
}

/// Shift the 4 quadrants of a Fourier transform in place so that the
/// zero frequency ends up at `(height / 2, width / 2)`.
pub fn fftshift<T: Copy>(width: usize, height: usize, matrix: &mut [T]) -> Result<()> {
    check_shape(width, height, matrix.len())?;
    let half_width = width / 2;
    let half_height = height / 2;
    let (top, bottom) = matrix.split_at_mut(half_height * width);
    for (top_row, bottom_row) in top
        .chunks_exact_mut(width)
        .zip(bottom.chunks_exact_mut(width))
    {
        // Swap top and bottom halves, then left and right halves of each row.
        top_row.swap_with_slice(bottom_row);
        top_row.rotate_left(half_width);
        bottom_row.rotate_left(half_width);
    }
    Ok(())
}

/// Inverse of [`fftshift`]. Identical to it since dimensions are even.
pub fn ifftshift<T: Copy>(width: usize, height: usize, matrix: &mut [T]) -> Result<()> {
    fftshift(width, height, matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn impulse_transforms_to_constant() {
        let (w, h) = (4, 6);
        let mut buffer = vec![Complex::default(); w * h];
        buffer[0] = Complex::new(1.0, 0.0);
        fft_2d(w, h, &mut buffer).unwrap();
        for c in &buffer {
            assert_abs_diff_eq!(c.re, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(c.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn constant_transforms_to_dc() {
        let (w, h) = (8, 4);
        let mut buffer = vec![Complex::new(1.0, 0.0); w * h];
        fft_2d(w, h, &mut buffer).unwrap();
        assert_abs_diff_eq!(buffer[0].re, (w * h) as f64, epsilon = 1e-9);
        for c in &buffer[1..] {
            assert_abs_diff_eq!(c.norm(), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn horizontal_cosine_hits_expected_bin() {
        // cos(2π·k·x/w) along rows puts energy at column bins k and w - k of row 0.
        let (w, h, k) = (8, 4, 2);
        let values: Vec<f64> = (0..h)
            .flat_map(|_| {
                (0..w).map(move |x| (2.0 * std::f64::consts::PI * k as f64 * x as f64 / w as f64).cos())
            })
            .collect();
        let mut buffer = real_to_complex(&values);
        fft_2d(w, h, &mut buffer).unwrap();
        let expected = (w * h) as f64 / 2.0;
        assert_abs_diff_eq!(buffer[k].norm(), expected, epsilon = 1e-9);
        assert_abs_diff_eq!(buffer[w - k].norm(), expected, epsilon = 1e-9);
        assert_abs_diff_eq!(buffer[w + k].norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn odd_dimensions_are_rejected() {
        let mut buffer = vec![Complex::default(); 5 * 4];
        assert!(fft_2d(5, 4, &mut buffer).is_err());
        assert!(fftshift(4, 5, &mut buffer).is_err());
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let mut buffer = vec![Complex::default(); 10];
        assert!(fft_2d(4, 4, &mut buffer).is_err());
        assert!(ifft_2d(0, 4, &mut []).is_err());
    }

    #[test]
    fn overflowing_shape_is_rejected() {
        let mut buffer = vec![Complex::<f64>::default(); 4];
        let err = fft_2d(1 << 32, 1 << 32, &mut buffer).unwrap_err();
        assert!(err.to_string().contains("overflow"));
        assert!(fftshift(usize::MAX - 1, 2, &mut buffer).is_err());
    }

    #[test]
    fn fftshift_moves_origin_to_center() {
        let (w, h) = (4, 2);
        let mut values: Vec<u32> = (0..(w * h) as u32).collect();
        fftshift(w, h, &mut values).unwrap();
        assert_eq!(values, vec![6, 7, 4, 5, 2, 3, 0, 1]);
        assert_eq!(values[(h / 2) * w + w / 2], 0);
    }

    #[test]
    fn ifftshift_undoes_fftshift() {
        let (w, h) = (6, 4);
        let original: Vec<i32> = (0..(w * h) as i32).collect();
        let mut values = original.clone();
        fftshift(w, h, &mut values).unwrap();
        assert_ne!(values, original);
        ifftshift(w, h, &mut values).unwrap();
        assert_eq!(values, original);
    }
}
