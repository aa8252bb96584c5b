//! # Main Display Module
//!
//! Layout of the main window: a controls sidebar on the left and the three
//! resizable plot panes on the right.

use iced::widget::{
    button, checkbox, column, container, image, pane_grid, row, slider, text, PaneGrid, Space,
};
use iced::{Alignment, Color, ContentFit, Element, Length};
use std::collections::HashMap;
use vizfft_core::heatmap::Scale;
use vizfft_core::pipeline::{Plot, SpectrumView};
use vizfft_core::settings::ViewerSettings;

use crate::widgets::drag_pad::DragPad;
use crate::{Message, PlotTexture, COEFFICIENT_LIMIT};

/// Number of slider steps across the magnitude data range.
const RANGE_STEPS: f64 = 200.0;

/// Everything the view reads from the application state.
#[derive(Clone, Copy)]
pub struct DisplayData<'a> {
    pub settings: &'a ViewerSettings,
    pub view: &'a SpectrumView,
    pub textures: &'a HashMap<Plot, PlotTexture>,
    pub panes: &'a pane_grid::State<Plot>,
    pub dragging: bool,
    pub last_error: Option<&'a str>,
}

/// Creates the complete main application view.
pub fn create_main_view(data: DisplayData<'_>) -> Element<'_, Message> {
    let plots = PaneGrid::new(data.panes, move |_pane, plot, _is_maximized| {
        let title_bar = pane_grid::TitleBar::new(text(pane_title(*plot, data)).size(16))
            .padding(8);
        pane_grid::Content::new(create_plot_body(*plot, data))
            .title_bar(title_bar)
            .style(container::bordered_box)
    })
    .width(Length::Fill)
    .height(Length::Fill)
    .spacing(10)
    .on_resize(10, Message::PaneResized);

    let main_content = row![
        create_sidebar(data),
        Space::with_width(10),
        plots,
    ]
    .align_y(Alignment::Start)
    .padding(20);

    container(main_content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Pane title with the data range of the plot.
fn pane_title(plot: Plot, data: DisplayData<'_>) -> String {
    let heatmap = data.view.heatmap(plot);
    let (lo, hi) = heatmap.data_range();
    let scale = match (plot, data.view.scale()) {
        (Plot::Magnitude, Scale::Log) => " (log)",
        _ => "",
    };
    format!("{}{}  [{:.3} .. {:.3}]", plot.title(), scale, lo, hi)
}

fn create_plot_body<'a>(plot: Plot, data: DisplayData<'a>) -> Element<'a, Message> {
    let body: Element<'a, Message> = match data.textures.get(&plot).and_then(PlotTexture::handle) {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Contain)
            .filter_method(image::FilterMethod::Nearest)
            .into(),
        None => text("No data").size(16).into(),
    };

    container(body)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .padding(5)
        .into()
}

/// Creates the controls sidebar.
fn create_sidebar(data: DisplayData<'_>) -> Element<'_, Message> {
    let settings = data.settings;
    let limit = COEFFICIENT_LIMIT as f64;

    let signal_section = column![
        text("Signal").size(18),
        text(format!("a = {:.2}", settings.a)).size(14),
        slider(-limit..=limit, settings.a, Message::CoefficientAChanged).step(0.05),
        text(format!("b = {:.2}", settings.b)).size(14),
        slider(-limit..=limit, settings.b, Message::CoefficientBChanged).step(0.05),
        text("Drag to edit a and b").size(14),
        DragPad::new(settings.a, settings.b, data.dragging).view(),
        checkbox("Gaussian window", settings.window).on_toggle(Message::WindowToggled),
        text(format!("sigma = {:.2}", settings.sigma)).size(14),
        slider(0.05..=2.0, settings.sigma, Message::SigmaChanged).step(0.01),
    ]
    .spacing(8);

    let display_section = column![
        text("Display").size(18),
        checkbox("Log magnitude", settings.scale == Scale::Log)
            .on_toggle(Message::LogScaleToggled),
        button(text(format!("Colormap: {:?}", settings.colormap)).size(14))
            .padding([6, 10])
            .on_press(Message::CycleColormap),
        create_range_controls(data.view),
    ]
    .spacing(8);

    let mut program_section = column![
        text("Program").size(18),
        button(text("Save Settings").size(14).width(Length::Fill))
            .padding([6, 10])
            .on_press(Message::SaveSettings),
        button(text("Load Settings").size(14).width(Length::Fill))
            .padding([6, 10])
            .on_press(Message::LoadSettings),
    ]
    .spacing(8);

    if let Some(error) = data.last_error {
        program_section = program_section.push(
            text(error.to_string())
                .size(14)
                .color(Color::from_rgb(0.9, 0.3, 0.3)),
        );
    }

    container(
        column![signal_section, display_section, program_section]
            .spacing(20)
            .padding(15),
    )
    .width(Length::Fixed(280.0))
    .height(Length::Fill)
    .into()
}

/// Sliders for the magnitude display range, in magnitude units.
fn create_range_controls(view: &SpectrumView) -> Element<'_, Message> {
    let heatmap = view.heatmap(Plot::Magnitude);
    let (lo, hi) = heatmap.data_range();
    if !(hi > lo) {
        return text("Magnitude range: flat").size(14).into();
    }
    let (min, max) = heatmap.display_range();
    let step = (hi - lo) / RANGE_STEPS;

    column![
        text(format!("Magnitude range {:.3} .. {:.3}", min, max)).size(14),
        slider(lo..=hi, min.clamp(lo, hi), Message::MagnitudeMinChanged).step(step),
        slider(lo..=hi, max.clamp(lo, hi), Message::MagnitudeMaxChanged).step(step),
        button(text("Reset range").size(14))
            .padding([6, 10])
            .on_press(Message::ResetMagnitudeRange),
    ]
    .spacing(6)
    .into()
}
