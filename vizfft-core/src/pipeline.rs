//! # Pipeline Module
//!
//! Ties the numeric stages together and caches their results:
//! synthesis, 2D FFT, quadrant shift and the three heatmaps.
//!
//! The viewer calls [`SpectrumView::set_params`] every frame with whatever
//! the widgets currently show. The spectrum is only recomputed when the
//! parameters differ by value from the cached ones.

use anyhow::{ensure, Context, Result};
use log::{debug, info};
use rustfft::num_complex::Complex;

use crate::fft2d;
use crate::heatmap::{self, Colormap, Heatmap, Scale};
use crate::signal::{self, Grid, SignalParams};
use crate::texture::TextureData;
use crate::MAX_GRID_SIZE;

/// The images the viewer displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Plot {
    Source,
    Magnitude,
    Phase,
}

impl Plot {
    pub const ALL: [Plot; 3] = [Plot::Source, Plot::Magnitude, Plot::Phase];

    pub fn title(self) -> &'static str {
        match self {
            Plot::Source => "Source",
            Plot::Magnitude => "Magnitude",
            Plot::Phase => "Phase",
        }
    }
}

/// Cached signal, spectrum and heatmaps for one grid size.
#[derive(Debug, Clone)]
pub struct SpectrumView {
    width: usize,
    height: usize,
    params: Option<SignalParams>,
    scale: Scale,
    signal: Grid,
    spectrum: Vec<Complex<f64>>,
    source: Heatmap,
    magnitude: Heatmap,
    phase: Heatmap,
    computations: u64,
}

impl SpectrumView {
    /// Creates an empty view. Nothing is computed until the first `set_params`.
    ///
    /// # Arguments
    /// * `width`, `height` - Grid dimensions, even and at most [`MAX_GRID_SIZE`]
    pub fn new(width: usize, height: usize) -> Result<Self> {
        ensure!(
            width > 0 && height > 0 && width % 2 == 0 && height % 2 == 0,
            "grid must have even, non-zero dimensions, got {}x{}",
            width,
            height
        );
        ensure!(
            width <= MAX_GRID_SIZE && height <= MAX_GRID_SIZE,
            "grid of {}x{} exceeds the {} sample limit per side",
            width,
            height,
            MAX_GRID_SIZE
        );
        let zeros = vec![0.0; width * height];
        Ok(Self {
            width,
            height,
            params: None,
            scale: Scale::default(),
            signal: Grid::zeros(width, height),
            spectrum: vec![Complex::default(); width * height],
            source: Heatmap::new(width, height, &zeros),
            magnitude: Heatmap::new(width, height, &zeros),
            phase: Heatmap::new(width, height, &zeros),
            computations: 0,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Parameters of the cached spectrum, `None` before the first computation.
    pub fn params(&self) -> Option<&SignalParams> {
        self.params.as_ref()
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    pub fn signal(&self) -> &Grid {
        &self.signal
    }

    /// The quadrant-shifted spectrum, zero frequency at the center.
    pub fn spectrum(&self) -> &[Complex<f64>] {
        &self.spectrum
    }

    /// Number of times the spectrum has been computed.
    pub fn computations(&self) -> u64 {
        self.computations
    }

    pub fn heatmap(&self, plot: Plot) -> &Heatmap {
        match plot {
            Plot::Source => &self.source,
            Plot::Magnitude => &self.magnitude,
            Plot::Phase => &self.phase,
        }
    }

    fn heatmap_mut(&mut self, plot: Plot) -> &mut Heatmap {
        match plot {
            Plot::Source => &mut self.source,
            Plot::Magnitude => &mut self.magnitude,
            Plot::Phase => &mut self.phase,
        }
    }

    /// Recomputes everything if `params` changed. Returns whether it did.
    ///
    /// Display ranges chosen with `set_display_range` survive the
    /// recomputation; the others follow the new data. On error the previous
    /// results are left untouched.
    pub fn set_params(&mut self, params: SignalParams) -> Result<bool> {
        if self.params.as_ref() == Some(&params) {
            return Ok(false);
        }

        let signal = signal::synthesize(&params, self.width, self.height)
            .context("failed to synthesize signal")?;
        let mut spectrum = fft2d::real_to_complex(&signal.data);
        fft2d::fft_2d(self.width, self.height, &mut spectrum)
            .context("failed to transform signal")?;
        fft2d::fftshift(self.width, self.height, &mut spectrum)?;

        self.source.set_source(self.width, self.height, &signal.data);
        self.magnitude.set_source(
            self.width,
            self.height,
            &heatmap::magnitudes(&spectrum, self.scale),
        );
        self.phase
            .set_source(self.width, self.height, &heatmap::phases(&spectrum));

        self.signal = signal;
        self.spectrum = spectrum;
        self.params = Some(params);
        self.computations += 1;
        info!(
            "[PIPELINE] Recomputed spectrum #{} for a={} b={} window={}",
            self.computations, params.a, params.b, params.window
        );
        Ok(true)
    }

    /// Switches between linear and log magnitude. Only the magnitude
    /// heatmap is rebuilt; the spectrum itself is kept.
    pub fn set_scale(&mut self, scale: Scale) -> bool {
        if scale == self.scale {
            return false;
        }
        self.scale = scale;
        let magnitudes = heatmap::magnitudes(&self.spectrum, scale);
        self.magnitude.set_source(self.width, self.height, &magnitudes);
        self.magnitude.reset_display_range();
        debug!("[PIPELINE] Magnitude scale set to {:?}", scale);
        true
    }

    /// Changes the display range of one heatmap. Returns whether it changed.
    pub fn set_display_range(&mut self, plot: Plot, min: f64, max: f64) -> bool {
        self.heatmap_mut(plot).set_display_range(min, max)
    }

    /// Drops a chosen display range so the heatmap follows its data again.
    pub fn reset_display_range(&mut self, plot: Plot) -> bool {
        self.heatmap_mut(plot).reset_display_range()
    }

    /// Writes a heatmap into a texture as RGBA pixels. Returns the new revision.
    pub fn upload(&self, plot: Plot, colormap: Colormap, texture: &mut TextureData) -> Result<u64> {
        let heatmap = self.heatmap(plot);
        texture.reallocate(4, heatmap.height(), heatmap.width(), heatmap.to_rgba8(colormap))
    }
}
