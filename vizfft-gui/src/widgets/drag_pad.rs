//! # Drag Pad Widget
//!
//! A small pad showing both frequency coefficients. Pressing on it and
//! moving the mouse edits the two values at once: horizontal motion changes
//! `a`, vertical motion changes `b`. The drag itself is tracked by
//! `vizfft_core::drag::DragEditor` in the application state; this widget only
//! forwards mouse events and draws the label.

use iced::widget::canvas::{self, event, Event, Geometry, Path, Stroke};
use iced::widget::container;
use iced::{alignment, mouse, Color, Element, Font, Pixels, Point, Rectangle, Renderer, Theme};
use vizfft_core::drag;

use crate::Message;

/// Height of the pad in logical pixels.
const PAD_HEIGHT: f32 = 90.0;

#[derive(Debug, Clone)]
pub struct DragPad {
    a: f32,
    b: f32,
    dragging: bool,
}

impl DragPad {
    pub fn new(a: f64, b: f64, dragging: bool) -> Self {
        Self {
            a: a as f32,
            b: b as f32,
            dragging,
        }
    }

    pub fn view(self) -> Element<'static, Message> {
        container(
            canvas::Canvas::new(self)
                .width(iced::Length::Fill)
                .height(iced::Length::Fixed(PAD_HEIGHT)),
        )
        .into()
    }
}

impl canvas::Program<Message> for DragPad {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (event::Status, Option<Message>) {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_over(bounds) {
                    return (event::Status::Captured, Some(Message::DragPressed(position)));
                }
            }
            // Moves and releases are followed outside the pad too, so a drag
            // keeps going when the cursor leaves it.
            Event::Mouse(mouse::Event::CursorMoved { position }) if self.dragging => {
                return (event::Status::Ignored, Some(Message::DragMoved(position)));
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) if self.dragging => {
                return (event::Status::Ignored, Some(Message::DragReleased));
            }
            _ => {}
        }
        (event::Status::Ignored, None)
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let background = Path::rectangle(Point::ORIGIN, bounds.size());
        let fill = if self.dragging {
            Color::from_rgb8(0x8A, 0x5A, 0x00)
        } else {
            Color::from_rgb8(0x40, 0x40, 0x40)
        };
        frame.fill(&background, fill);
        frame.stroke(
            &background,
            Stroke::default().with_width(1.0).with_color(Color::from_rgb8(0x90, 0x90, 0x90)),
        );

        let label = drag::label(self.a, self.b);
        let lines: Vec<&str> = label.lines().collect();
        let line_height = bounds.height / (lines.len() as f32 + 1.0);
        for (i, line) in lines.iter().enumerate() {
            frame.fill_text(canvas::Text {
                content: line.to_string(),
                position: Point::new(bounds.width / 2.0, line_height * (i as f32 + 1.0)),
                color: Color::WHITE,
                size: Pixels(20.0),
                font: Font::MONOSPACE,
                horizontal_alignment: alignment::Horizontal::Center,
                vertical_alignment: alignment::Vertical::Center,
                ..canvas::Text::default()
            });
        }

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.dragging {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}
