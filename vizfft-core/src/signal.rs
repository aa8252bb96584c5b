//! # Signal Synthesis Module
//!
//! Builds the synthetic 2D test signal shown in the source pane.
//! Each sample is `sin(π·(a·u + b·v))` over the normalized mesh
//! `u, v ∈ [-1, 1]`, optionally tapered by a Gaussian window.

use anyhow::{ensure, Result};
use std::f64::consts::PI;

/// Default width of the Gaussian window, in units of the normalized mesh.
pub const DEFAULT_SIGMA: f64 = 0.5;

/// User-controlled inputs of the synthesis.
///
/// Compared by value each frame: any difference invalidates the cached spectrum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalParams {
    /// Frequency coefficient along the horizontal axis.
    pub a: f64,
    /// Frequency coefficient along the vertical axis.
    pub b: f64,
    /// Multiply the signal by a Gaussian window.
    pub window: bool,
    /// Window width, only used when `window` is set.
    pub sigma: f64,
}

impl Default for SignalParams {
    fn default() -> Self {
        Self {
            a: 4.0,
            b: 2.0,
            window: false,
            sigma: DEFAULT_SIGMA,
        }
    }
}

/// A row-major grid of real samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub data: Vec<f64>,
}

impl Grid {
    /// Creates a grid filled with zeros.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }
}

/// Smallest and largest value of a slice, ignoring NaNs.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// `n` evenly spaced values over `[-1, 1]`, endpoints included.
pub fn linspace(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![-1.0],
        _ => {
            let step = 2.0 / (n - 1) as f64;
            (0..n).map(|i| -1.0 + step * i as f64).collect()
        }
    }
}

/// Gaussian window `exp(-(u² + v²) / sigma)` over the normalized mesh.
///
/// # Returns
/// * `Result<Grid>` - The window, or an error if `sigma` is not positive
pub fn gaussian_window(width: usize, height: usize, sigma: f64) -> Result<Grid> {
    ensure!(sigma > 0.0, "Gaussian window width must be positive, got {}", sigma);
    let us = linspace(width);
    let vs = linspace(height);
    let mut grid = Grid::zeros(width, height);
    for (row, v) in grid.data.chunks_exact_mut(width.max(1)).zip(&vs) {
        for (sample, u) in row.iter_mut().zip(&us) {
            *sample = (-(u * u + v * v) / sigma).exp();
        }
    }
    Ok(grid)
}

/// Synthesizes the test signal for the given parameters.
///
/// `u` runs along the columns and `v` along the rows.
///
/// # Arguments
/// * `params` - Frequency coefficients and window settings
/// * `width` - Number of columns of the grid
/// * `height` - Number of rows of the grid
///
/// # Returns
/// * `Result<Grid>` - The samples, or an error if the window is enabled
///   with a non-positive `sigma`
pub fn synthesize(params: &SignalParams, width: usize, height: usize) -> Result<Grid> {
    let us = linspace(width);
    let vs = linspace(height);
    let mut grid = Grid::zeros(width, height);
    for (row, v) in grid.data.chunks_exact_mut(width.max(1)).zip(&vs) {
        for (sample, u) in row.iter_mut().zip(&us) {
            *sample = (PI * (params.a * u + params.b * v)).sin();
        }
    }

    if params.window {
        let window = gaussian_window(width, height, params.sigma)?;
        for (sample, w) in grid.data.iter_mut().zip(&window.data) {
            *sample *= w;
        }
    }

    Ok(grid)
}
