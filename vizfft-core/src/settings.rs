//! # Settings Module
//!
//! Viewer settings that can be saved to and restored from a JSON file, so a
//! session can be reopened with the same grid, coefficients and display
//! options.

use anyhow::{ensure, Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::heatmap::{Colormap, Scale};
use crate::signal::{SignalParams, DEFAULT_SIGMA};
use crate::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE};

/// Default file name, relative to the working directory.
pub const SETTINGS_FILE: &str = "vizfft_settings.json";

/// Everything the viewer needs to restore a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    /// Side length of the square signal grid. Must be even and at most
    /// [`MAX_GRID_SIZE`].
    pub grid_size: usize,
    pub a: f64,
    pub b: f64,
    pub window: bool,
    pub sigma: f64,
    pub scale: Scale,
    pub colormap: Colormap,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        let params = SignalParams::default();
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            a: params.a,
            b: params.b,
            window: params.window,
            sigma: DEFAULT_SIGMA,
            scale: Scale::default(),
            colormap: Colormap::default(),
        }
    }
}

impl ViewerSettings {
    pub fn params(&self) -> SignalParams {
        SignalParams {
            a: self.a,
            b: self.b,
            window: self.window,
            sigma: self.sigma,
        }
    }

    pub fn set_params(&mut self, params: &SignalParams) {
        self.a = params.a;
        self.b = params.b;
        self.window = params.window;
        self.sigma = params.sigma;
    }

    /// Rejects settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.grid_size > 0 && self.grid_size % 2 == 0,
            "grid size must be even and non-zero, got {}",
            self.grid_size
        );
        ensure!(
            self.grid_size <= MAX_GRID_SIZE,
            "grid size {} exceeds the limit of {}",
            self.grid_size,
            MAX_GRID_SIZE
        );
        ensure!(self.sigma > 0.0, "window sigma must be positive, got {}", self.sigma);
        ensure!(
            self.a.is_finite() && self.b.is_finite(),
            "coefficients must be finite"
        );
        Ok(())
    }
}

/// Saves the settings as pretty-printed JSON.
///
/// # Arguments
/// * `settings` - The settings to write
/// * `path` - Destination file, created or truncated
///
/// # Returns
/// * `Result<()>` - An error if the file cannot be created or written
pub fn save_settings(settings: &ViewerSettings, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json_string = serde_json::to_string_pretty(settings)?;
    let mut file = File::create(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    file.write_all(json_string.as_bytes())?;
    info!("[SETTINGS] Saved settings to {}", path.display());
    Ok(())
}

/// Loads and validates settings from a JSON file. Missing fields take
/// their default value.
///
/// # Arguments
/// * `path` - File previously written by [`save_settings`]
///
/// # Returns
/// * `Result<ViewerSettings>` - The settings, or an error if the file is
///   missing, is not valid JSON, or fails [`ViewerSettings::validate`]
pub fn load_settings(path: impl AsRef<Path>) -> Result<ViewerSettings> {
    let path = path.as_ref();
    let mut file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let mut data = String::new();
    file.read_to_string(&mut data)?;
    let settings: ViewerSettings = serde_json::from_str(&data)
        .with_context(|| format!("invalid settings in {}", path.display()))?;
    settings.validate()?;
    info!("[SETTINGS] Loaded settings from {}", path.display());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = ViewerSettings::default();
        settings.validate().unwrap();
        assert_eq!(settings.params(), SignalParams::default());
    }

    #[test]
    fn odd_grid_size_is_invalid() {
        let settings = ViewerSettings { grid_size: 255, ..ViewerSettings::default() };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn oversized_grid_size_is_invalid() {
        let settings: ViewerSettings = serde_json::from_str(r#"{ "grid_size": 4294967296 }"#).unwrap();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("limit"));
        let largest = ViewerSettings { grid_size: MAX_GRID_SIZE, ..ViewerSettings::default() };
        largest.validate().unwrap();
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings: ViewerSettings = serde_json::from_str(r#"{ "a": 1.5, "scale": "Log" }"#).unwrap();
        assert_eq!(settings.a, 1.5);
        assert_eq!(settings.scale, Scale::Log);
        assert_eq!(settings.grid_size, DEFAULT_GRID_SIZE);
    }

    #[test]
    fn set_params_copies_all_fields() {
        let mut settings = ViewerSettings::default();
        let params = SignalParams { a: -3.0, b: 7.0, window: true, sigma: 0.1 };
        settings.set_params(&params);
        assert_eq!(settings.params(), params);
    }
}
