//! # Drag Editor Module
//!
//! State machine behind the drag pad: pressing the mouse on the pad starts a
//! drag, moving the mouse edits two values at once, releasing ends the drag.

/// Value change per pixel of mouse travel.
pub const SPEED: f32 = 0.25;

/// Where a drag started.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DragStart {
    mouse: (f32, f32),
    value: (f32, f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging(DragStart),
}

/// Edits an `(x, y)` pair from mouse movement, within fixed bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct DragEditor {
    state: DragState,
    bounds_min: (f32, f32),
    bounds_max: (f32, f32),
}

impl DragEditor {
    pub fn new(bounds_min: (f32, f32), bounds_max: (f32, f32)) -> Self {
        Self {
            state: DragState::Idle,
            bounds_min,
            bounds_max,
        }
    }

    pub fn dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Mouse pressed on the pad. Ignored while a drag is already running.
    pub fn press(&mut self, mouse: (f32, f32), value: (f32, f32)) {
        if !self.dragging() {
            self.state = DragState::Dragging(DragStart { mouse, value });
        }
    }

    /// Mouse released anywhere.
    pub fn release(&mut self) {
        self.state = DragState::Idle;
    }

    /// Mouse moved. Returns the edited values while dragging.
    ///
    /// Screen coordinates grow downward, so moving up increases `y`.
    pub fn drag_to(&self, mouse: (f32, f32)) -> Option<(f32, f32)> {
        let DragState::Dragging(start) = self.state else {
            return None;
        };
        let dx = mouse.0 - start.mouse.0;
        let dy = -(mouse.1 - start.mouse.1);
        let x = (start.value.0 + SPEED * dx).clamp(self.bounds_min.0, self.bounds_max.0);
        let y = (start.value.1 + SPEED * dy).clamp(self.bounds_min.1, self.bounds_max.1);
        Some((x, y))
    }
}

/// Two-line label shown on the pad, e.g. `"[04.0]\n[-2.5]"`.
pub fn label(x: f32, y: f32) -> String {
    format!("[{:04.1}]\n[{:04.1}]", x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> DragEditor {
        DragEditor::new((-10.0, -10.0), (10.0, 10.0))
    }

    #[test]
    fn idle_editor_ignores_motion() {
        let editor = editor();
        assert!(!editor.dragging());
        assert_eq!(editor.drag_to((100.0, 100.0)), None);
    }

    #[test]
    fn drag_scales_motion_and_inverts_y() {
        let mut editor = editor();
        editor.press((10.0, 10.0), (1.0, 2.0));
        assert!(editor.dragging());
        assert_eq!(editor.drag_to((14.0, 10.0)), Some((2.0, 2.0)));
        assert_eq!(editor.drag_to((10.0, 6.0)), Some((1.0, 3.0)));
        editor.release();
        assert!(!editor.dragging());
        assert_eq!(editor.drag_to((14.0, 6.0)), None);
    }

    #[test]
    fn second_press_keeps_original_anchor() {
        let mut editor = editor();
        editor.press((0.0, 0.0), (0.0, 0.0));
        editor.press((40.0, 40.0), (5.0, 5.0));
        assert_eq!(editor.drag_to((4.0, 0.0)), Some((1.0, 0.0)));
    }

    #[test]
    fn values_are_clamped_to_bounds() {
        let mut editor = editor();
        editor.press((0.0, 0.0), (9.0, -9.0));
        assert_eq!(editor.drag_to((400.0, 400.0)), Some((10.0, -10.0)));
    }

    #[test]
    fn label_is_zero_padded() {
        assert_eq!(label(4.0, 2.3), "[04.0]\n[02.3]");
        assert_eq!(label(-1.5, 12.0), "[-1.5]\n[12.0]");
    }
}
