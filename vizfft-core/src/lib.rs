// vizfft-core/src/lib.rs

//! The numeric core of the vizfft Fourier viewer.
//! This crate is responsible for signal synthesis, the separable 2D FFT,
//! heatmap normalization and the small state machines the viewer needs.
//! It is completely headless and contains no GUI code.

pub mod drag;
pub mod fft2d;
pub mod heatmap;
pub mod pipeline;
pub mod settings;
pub mod signal;
pub mod texture;

pub use rustfft::num_complex::Complex;

/// Default side length of the square signal grid (`2 * nyquist`).
pub const DEFAULT_GRID_SIZE: usize = 256;

/// Largest accepted side length of the signal grid.
pub const MAX_GRID_SIZE: usize = 4096;
