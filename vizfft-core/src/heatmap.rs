//! # Heatmap Module
//!
//! Turns real grids and complex spectra into values in `[0, 1]` ready to be
//! uploaded as an image.
//!
//! Normalization runs in two stages. The source is first brought to the
//! canonical range `[-1, 1]` around the midpoint of its own min/max. The
//! canonical values are then re-expressed in a caller-chosen display range
//! and clamped. Each stage is only recomputed when its input changes.

use rustfft::num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::signal::min_max;

/// Keeps the logarithm of empty frequency bins finite.
const EPSILON: f64 = 1e-12;

/// How a complex spectrum is turned into magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scale {
    /// `|z|`
    #[default]
    Linear,
    /// `|ln(|z|)|`, compresses the dynamic range.
    Log,
}

/// Color lookup used when converting normalized values to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Colormap {
    #[default]
    Gray,
    /// Black, red, yellow, white.
    Heat,
}

impl Colormap {
    /// Maps a value in `[0, 1]` to an opaque RGBA color.
    pub fn rgba(self, value: f64) -> [u8; 4] {
        let t = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        match self {
            Colormap::Gray => {
                let v = to_byte(t);
                [v, v, v, 255]
            }
            Colormap::Heat => {
                let r = to_byte(t * 3.0);
                let g = to_byte(t * 3.0 - 1.0);
                let b = to_byte(t * 3.0 - 2.0);
                [r, g, b, 255]
            }
        }
    }
}

fn to_byte(x: f64) -> u8 {
    (x.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Magnitude of every sample of a spectrum.
pub fn magnitudes(spectrum: &[Complex<f64>], scale: Scale) -> Vec<f64> {
    match scale {
        Scale::Linear => spectrum.iter().map(|c| c.norm()).collect(),
        Scale::Log => spectrum
            .iter()
            .map(|c| (c.norm() + EPSILON).ln().abs())
            .collect(),
    }
}

/// Phase (argument) of every sample of a spectrum, in `[-π, π]`.
pub fn phases(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum.iter().map(|c| c.arg()).collect()
}

/// A normalized image derived from a real-valued grid.
#[derive(Debug, Clone)]
pub struct Heatmap {
    width: usize,
    height: usize,
    /// Source values mapped to `[-1, 1]`.
    canonical: Vec<f64>,
    data_min: f64,
    data_max: f64,
    display_min: f64,
    display_max: f64,
    /// The display range was chosen by the caller rather than following the data.
    custom_range: bool,
    /// Canonical values mapped through the display range, in `[0, 1]`.
    values: Vec<f64>,
}

impl Heatmap {
    /// Builds a heatmap whose display range follows the data range.
    ///
    /// # Arguments
    /// * `width`, `height` - Shape of the image, only carried along for upload
    /// * `source` - Row-major values; NaNs are ignored when computing the range
    pub fn new(width: usize, height: usize, source: &[f64]) -> Self {
        let mut heatmap = Self {
            width,
            height,
            canonical: Vec::new(),
            data_min: 0.0,
            data_max: 0.0,
            display_min: 0.0,
            display_max: 0.0,
            custom_range: false,
            values: Vec::new(),
        };
        heatmap.set_source(width, height, source);
        heatmap
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw min/max of the source data.
    pub fn data_range(&self) -> (f64, f64) {
        (self.data_min, self.data_max)
    }

    /// Current display range, in source units.
    pub fn display_range(&self) -> (f64, f64) {
        (self.display_min, self.display_max)
    }

    /// Normalized values in `[0, 1]`, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Whether the display range was set explicitly with `set_display_range`.
    pub fn has_custom_range(&self) -> bool {
        self.custom_range
    }

    /// Replaces the source data.
    ///
    /// A display range chosen with `set_display_range` is kept; otherwise the
    /// display range follows the new data range.
    pub fn set_source(&mut self, width: usize, height: usize, source: &[f64]) {
        let (lo, hi) = min_max(source).unwrap_or((0.0, 0.0));
        let mid = (lo + hi) / 2.0;
        let half = (hi - lo) / 2.0;
        self.width = width;
        self.height = height;
        self.data_min = lo;
        self.data_max = hi;
        self.canonical = source
            .iter()
            .map(|&x| if half > 0.0 { (x - mid) / half } else { 0.0 })
            .collect();
        if !self.custom_range {
            self.display_min = lo;
            self.display_max = hi;
        }
        self.remap();
    }

    /// Chooses the display range, in source units. It is kept across later
    /// `set_source` calls until `reset_display_range`.
    ///
    /// # Returns
    /// * `true` if the range changed and the values were remapped
    pub fn set_display_range(&mut self, min: f64, max: f64) -> bool {
        self.custom_range = true;
        self.apply_display_range(min, max)
    }

    /// Makes the display range follow the data range again.
    pub fn reset_display_range(&mut self) -> bool {
        self.custom_range = false;
        self.apply_display_range(self.data_min, self.data_max)
    }

    fn apply_display_range(&mut self, min: f64, max: f64) -> bool {
        if min == self.display_min && max == self.display_max {
            return false;
        }
        self.display_min = min;
        self.display_max = max;
        self.remap();
        true
    }

    /// Converts the normalized values to RGBA pixels.
    pub fn to_rgba8(&self, colormap: Colormap) -> Vec<u8> {
        self.values.iter().flat_map(|&v| colormap.rgba(v)).collect()
    }

    fn remap(&mut self) {
        let mid = (self.data_min + self.data_max) / 2.0;
        let half = (self.data_max - self.data_min) / 2.0;
        let span = self.display_max - self.display_min;
        let display_min = self.display_min;
        self.values = self
            .canonical
            .iter()
            .map(|&c| {
                if span > 0.0 {
                    ((mid + c * half - display_min) / span).clamp(0.0, 1.0)
                } else {
                    0.0
                }
            })
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn data_range_maps_to_unit_interval() {
        let source = vec![-3.0, 1.0, 5.0, 2.0];
        let heatmap = Heatmap::new(2, 2, &source);
        assert_eq!(heatmap.data_range(), (-3.0, 5.0));
        assert_eq!(heatmap.display_range(), (-3.0, 5.0));
        let values = heatmap.values();
        assert_abs_diff_eq!(values[0], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(values[1], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(values[2], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(values[3], 0.625, epsilon = 1e-12);
    }

    #[test]
    fn narrower_display_range_clamps() {
        let source = vec![0.0, 2.5, 5.0, 10.0];
        let mut heatmap = Heatmap::new(4, 1, &source);
        assert!(heatmap.set_display_range(2.5, 5.0));
        assert_eq!(heatmap.values(), &[0.0, 0.0, 1.0, 1.0]);
        assert!(!heatmap.set_display_range(2.5, 5.0));
        assert!(heatmap.reset_display_range());
        assert_abs_diff_eq!(heatmap.values()[1], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn display_range_follows_data_until_chosen() {
        let mut heatmap = Heatmap::new(2, 1, &[0.0, 1.0]);
        assert!(!heatmap.has_custom_range());
        heatmap.set_source(2, 1, &[-4.0, 4.0]);
        assert_eq!(heatmap.display_range(), (-4.0, 4.0));

        heatmap.set_display_range(0.0, 2.0);
        heatmap.set_source(2, 1, &[0.0, 8.0]);
        assert!(heatmap.has_custom_range());
        assert_eq!(heatmap.display_range(), (0.0, 2.0));

        heatmap.reset_display_range();
        assert!(!heatmap.has_custom_range());
        assert_eq!(heatmap.display_range(), (0.0, 8.0));
    }

    #[test]
    fn constant_source_maps_to_zero() {
        let heatmap = Heatmap::new(2, 2, &[0.0; 4]);
        assert!(heatmap.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn new_source_keeps_display_range() {
        let mut heatmap = Heatmap::new(2, 1, &[0.0, 1.0]);
        heatmap.set_display_range(0.0, 2.0);
        heatmap.set_source(2, 1, &[0.0, 2.0]);
        assert_eq!(heatmap.data_range(), (0.0, 2.0));
        assert_abs_diff_eq!(heatmap.values()[1], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn log_scale_keeps_empty_bins_finite() {
        let spectrum = vec![Complex::new(0.0, 0.0), Complex::new(std::f64::consts::E, 0.0)];
        let logs = magnitudes(&spectrum, Scale::Log);
        assert!(logs.iter().all(|v| v.is_finite()));
        assert_abs_diff_eq!(logs[1], 1.0, epsilon = 1e-9);
        assert_eq!(magnitudes(&spectrum, Scale::Linear)[1], std::f64::consts::E);
    }

    #[test]
    fn phase_of_imaginary_unit() {
        let phase = phases(&[Complex::new(0.0, 1.0)]);
        assert_abs_diff_eq!(phase[0], std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn colormaps_span_black_to_white() {
        for colormap in [Colormap::Gray, Colormap::Heat] {
            assert_eq!(colormap.rgba(0.0), [0, 0, 0, 255]);
            assert_eq!(colormap.rgba(1.0), [255, 255, 255, 255]);
        }
        let pixels = Heatmap::new(2, 1, &[0.0, 1.0]).to_rgba8(Colormap::Gray);
        assert_eq!(pixels, vec![0, 0, 0, 255, 255, 255, 255, 255]);
    }
}
