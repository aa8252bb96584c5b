//! Saving and loading viewer settings through real files.

use vizfft_core::heatmap::{Colormap, Scale};
use vizfft_core::settings::{load_settings, save_settings, ViewerSettings};

#[test]
fn settings_survive_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let settings = ViewerSettings {
        grid_size: 128,
        a: -2.5,
        b: 6.0,
        window: true,
        sigma: 0.25,
        scale: Scale::Log,
        colormap: Colormap::Heat,
    };
    save_settings(&settings, &path).unwrap();
    assert_eq!(load_settings(&path).unwrap(), settings);
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_settings(dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("cannot open"));
}

#[test]
fn invalid_grid_size_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("odd.json");
    std::fs::write(&path, r#"{ "grid_size": 33 }"#).unwrap();
    assert!(load_settings(&path).is_err());
}

#[test]
fn oversized_grid_size_is_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.json");
    std::fs::write(&path, r#"{ "grid_size": 4294967296 }"#).unwrap();
    let err = load_settings(&path).unwrap_err();
    assert!(err.to_string().contains("exceeds"));
}
