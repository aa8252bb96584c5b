//! # vizfft - 2D Fourier Transform Viewer
//!
//! Main GUI application. It synthesizes a 2D signal from two frequency
//! coefficients, transforms it, and shows the source, magnitude and phase
//! images side by side in resizable panes.
//!
//! ## Architecture
//! - **Main Thread**: Iced GUI application with dark theme, all computation runs here
//! - **Core**: `vizfft-core` owns the numeric pipeline and its cache
//! - **Updates**: 60 FPS tick; each tick hands the current widget values to the
//!   pipeline, which only recomputes when they changed

mod ui;
mod widgets;

use iced::widget::{image, pane_grid};
use iced::{keyboard, Element, Size, Subscription, Task, Theme};
use log::{debug, error, info, warn};
use std::collections::HashMap;
use vizfft_core::drag::DragEditor;
use vizfft_core::heatmap::{Colormap, Scale};
use vizfft_core::pipeline::{Plot, SpectrumView};
use vizfft_core::settings::{self, ViewerSettings, SETTINGS_FILE};
use vizfft_core::texture::TextureData;
use ui::main_display::create_main_view;

/// Range of both frequency coefficients, on sliders and on the drag pad.
pub const COEFFICIENT_LIMIT: f32 = 16.0;
/// Initial window size, 16:9.
const WINDOW_WIDTH: f32 = 1920.0;

/// Main entry point for the vizfft application.
pub fn main() -> iced::Result {
    env_logger::init();
    info!("[MAIN] Starting vizfft...");
    let result = iced::application("vizfft", VizApp::update, VizApp::view)
        .subscription(VizApp::subscription)
        .theme(VizApp::theme)
        .window_size(Size::new(WINDOW_WIDTH, WINDOW_WIDTH * 9.0 / 16.0))
        .run();
    info!("[MAIN] Application finished with result: {:?}", result);
    result
}

/// Application message types.
#[derive(Debug, Clone)]
pub enum Message {
    // Signal inputs
    CoefficientAChanged(f64), // Horizontal frequency slider
    CoefficientBChanged(f64), // Vertical frequency slider
    WindowToggled(bool),      // Gaussian window on/off
    SigmaChanged(f64),        // Gaussian window width

    // Display options
    LogScaleToggled(bool),    // Linear or log magnitude
    CycleColormap,            // Gray -> Heat -> Gray
    MagnitudeMinChanged(f64), // Lower bound of the magnitude display range
    MagnitudeMaxChanged(f64), // Upper bound of the magnitude display range
    ResetMagnitudeRange,      // Follow the magnitude data range again

    // Drag pad editing both coefficients
    DragPressed(iced::Point), // Cursor position when the pad is grabbed
    DragMoved(iced::Point),   // Cursor position while dragging
    DragReleased,             // Pad let go

    // Layout
    PaneResized(pane_grid::ResizeEvent), // Divider between two plot panes moved

    // Settings file
    SaveSettings, // Write current settings to SETTINGS_FILE
    LoadSettings, // Restore settings from SETTINGS_FILE

    // Frame tick, the spectrum is refreshed here
    Tick, // Hands widget values to the pipeline
    Exit, // Escape pressed
}

/// Image shown in one pane, rebuilt only when its texture revision changes.
#[derive(Debug, Default)]
pub struct PlotTexture {
    data: TextureData,
    handle: Option<image::Handle>,
    revision: u64,
}

impl PlotTexture {
    pub fn handle(&self) -> Option<&image::Handle> {
        self.handle.as_ref()
    }

    fn refresh_handle(&mut self) {
        if self.data.revision() == self.revision || self.data.is_empty() {
            return;
        }
        self.handle = Some(image::Handle::from_rgba(
            self.data.cols() as u32,
            self.data.rows() as u32,
            self.data.to_rgba8(),
        ));
        self.revision = self.data.revision();
    }
}

/// Main application state.
struct VizApp {
    /// Widget values; the pipeline catches up on the next tick.
    settings: ViewerSettings,
    view: SpectrumView,
    textures: HashMap<Plot, PlotTexture>,
    panes: pane_grid::State<Plot>,
    drag: DragEditor,
    last_error: Option<String>,
}

impl Default for VizApp {
    fn default() -> Self {
        info!("[MAIN] Creating VizApp...");
        let settings = ViewerSettings::default();
        let view = match SpectrumView::new(settings.grid_size, settings.grid_size) {
            Ok(view) => view,
            Err(e) => {
                // The default grid size is a constant, this only trips on a broken build.
                error!("[MAIN] Fatal error creating the pipeline: {:#}", e);
                std::process::exit(1);
            }
        };

        let mut app = Self {
            settings,
            view,
            textures: Plot::ALL.iter().map(|&p| (p, PlotTexture::default())).collect(),
            panes: create_panes(),
            drag: DragEditor::new(
                (-COEFFICIENT_LIMIT, -COEFFICIENT_LIMIT),
                (COEFFICIENT_LIMIT, COEFFICIENT_LIMIT),
            ),
            last_error: None,
        };
        app.view.set_scale(app.settings.scale);
        app.refresh_pipeline();
        info!("[MAIN] VizApp created successfully");
        app
    }
}

/// Three side-by-side panes of equal width.
fn create_panes() -> pane_grid::State<Plot> {
    let (mut panes, source) = pane_grid::State::new(Plot::Source);
    if let Some((magnitude, first_split)) =
        panes.split(pane_grid::Axis::Vertical, source, Plot::Magnitude)
    {
        panes.resize(first_split, 1.0 / 3.0);
        if let Some((_, second_split)) =
            panes.split(pane_grid::Axis::Vertical, magnitude, Plot::Phase)
        {
            panes.resize(second_split, 0.5);
        }
    }
    panes
}

impl VizApp {
    fn update(&mut self, message: Message) -> Task<Message> {
        if !matches!(message, Message::Tick | Message::DragMoved(_)) {
            debug!("[UPDATE] Received message: {:?}", message);
        }

        match message {
            Message::CoefficientAChanged(a) => self.settings.a = a,
            Message::CoefficientBChanged(b) => self.settings.b = b,
            Message::WindowToggled(window) => self.settings.window = window,
            Message::SigmaChanged(sigma) => self.settings.sigma = sigma,
            Message::LogScaleToggled(log_scale) => {
                self.settings.scale = if log_scale { Scale::Log } else { Scale::Linear };
                if self.view.set_scale(self.settings.scale) {
                    self.upload(&[Plot::Magnitude]);
                }
            }
            Message::CycleColormap => {
                self.settings.colormap = match self.settings.colormap {
                    Colormap::Gray => Colormap::Heat,
                    Colormap::Heat => Colormap::Gray,
                };
                self.upload(&Plot::ALL);
            }
            Message::MagnitudeMinChanged(min) => {
                let (_, max) = self.view.heatmap(Plot::Magnitude).display_range();
                self.set_magnitude_range(min, max.max(min));
            }
            Message::MagnitudeMaxChanged(max) => {
                let (min, _) = self.view.heatmap(Plot::Magnitude).display_range();
                self.set_magnitude_range(min.min(max), max);
            }
            Message::ResetMagnitudeRange => {
                if self.view.reset_display_range(Plot::Magnitude) {
                    self.upload(&[Plot::Magnitude]);
                }
            }
            Message::DragPressed(position) => {
                let value = (self.settings.a as f32, self.settings.b as f32);
                self.drag.press((position.x, position.y), value);
            }
            Message::DragMoved(position) => {
                if let Some((a, b)) = self.drag.drag_to((position.x, position.y)) {
                    self.settings.a = a as f64;
                    self.settings.b = b as f64;
                }
            }
            Message::DragReleased => self.drag.release(),
            Message::PaneResized(pane_grid::ResizeEvent { split, ratio }) => {
                self.panes.resize(split, ratio);
            }
            Message::SaveSettings => match settings::save_settings(&self.settings, SETTINGS_FILE) {
                Ok(()) => self.last_error = None,
                Err(e) => self.report(format!("Error saving settings: {:#}", e)),
            },
            Message::LoadSettings => match settings::load_settings(SETTINGS_FILE) {
                Ok(loaded) => self.apply_settings(loaded),
                Err(e) => self.report(format!("Error loading settings: {:#}", e)),
            },
            Message::Tick => self.refresh_pipeline(),
            Message::Exit => {
                info!("[MAIN] Exit requested");
                return iced::exit();
            }
        }
        Task::none()
    }

    /// Hands the widget values to the pipeline. Cheap when nothing changed.
    fn refresh_pipeline(&mut self) {
        match self.view.set_params(self.settings.params()) {
            Ok(true) => {
                self.last_error = None;
                self.upload(&Plot::ALL);
            }
            Ok(false) => {}
            Err(e) => {
                // Keep showing the last good images; report each new failure once.
                let message = format!("{:#}", e);
                if self.last_error.as_deref() != Some(message.as_str()) {
                    self.report(message);
                }
            }
        }
    }

    fn set_magnitude_range(&mut self, min: f64, max: f64) {
        if self.view.set_display_range(Plot::Magnitude, min, max) {
            self.upload(&[Plot::Magnitude]);
        }
    }

    fn apply_settings(&mut self, loaded: ViewerSettings) {
        if loaded.grid_size != self.view.width() {
            match SpectrumView::new(loaded.grid_size, loaded.grid_size) {
                Ok(view) => {
                    info!("[MAIN] Grid resized to {0}x{0}", loaded.grid_size);
                    self.view = view;
                }
                Err(e) => {
                    self.report(format!("Error applying settings: {:#}", e));
                    return;
                }
            }
        }
        self.view.set_scale(loaded.scale);
        self.settings = loaded;
        self.last_error = None;
        self.refresh_pipeline();
        // Scale and colormap may have changed without new parameters.
        self.upload(&Plot::ALL);
    }

    fn upload(&mut self, plots: &[Plot]) {
        for &plot in plots {
            if let Some(texture) = self.textures.get_mut(&plot) {
                match self.view.upload(plot, self.settings.colormap, &mut texture.data) {
                    Ok(_) => texture.refresh_handle(),
                    Err(e) => warn!("[MAIN] Could not upload {} texture: {:#}", plot.title(), e),
                }
            }
        }
    }

    fn report(&mut self, message: String) {
        error!("[MAIN] {}", message);
        self.last_error = Some(message);
    }

    fn view(&self) -> Element<'_, Message> {
        create_main_view(ui::main_display::DisplayData {
            settings: &self.settings,
            view: &self.view,
            textures: &self.textures,
            panes: &self.panes,
            dragging: self.drag.dragging(),
            last_error: self.last_error.as_deref(),
        })
    }

    /// Frame tick at ~60 FPS plus the Escape key to quit.
    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            iced::time::every(std::time::Duration::from_millis(16)).map(|_| Message::Tick),
            keyboard::on_key_press(|key, _modifiers| match key {
                keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::Exit),
                _ => None,
            }),
        ])
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}
