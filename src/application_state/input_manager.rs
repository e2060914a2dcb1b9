//! # Input Manager
//!
//! Translates `winit` window events into the [`PointerEvent`]s the editor
//! understands:
//! - `CursorMoved` becomes `Move`
//! - a left-button press becomes `Down` at the last cursor position
//! - a left-button release becomes `Up` at the last cursor position
//!
//! Repeated presses without a release (which some platforms report when
//! focus changes) are collapsed so every `Down` is followed by at most one
//! `Up`.

use winit::event::{ElementState, MouseButton, WindowEvent};

use super::input_state::{PointerEvent, RawInputState};

/// Tracks the cursor and the primary button across window events.
#[derive(Debug, Default)]
pub struct InputManager {
    /// Last reported cursor position in physical pixels
    cursor_position: (f64, f64),
    /// Whether the left button was down before the latest button event
    left_button_old: bool,
    /// Whether the left button is down now
    left_button_new: bool,
}

impl InputManager {
    /// Creates a manager with the cursor at the origin and no button held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position.
    pub fn cursor_position(&self) -> (f64, f64) {
        self.cursor_position
    }

    /// Processes a window event.
    ///
    /// # Returns
    /// The pointer event it translates to, if any. Keyboard, wheel and
    /// non-left-button events yield `None`.
    pub fn intake_input(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.intake_cursor_moved(position.x, position.y))
            }
            WindowEvent::MouseInput { button, state, .. } => self.intake_mouse_button(*button, *state),
            _ => None,
        }
    }

    /// Records a cursor move.
    pub fn intake_cursor_moved(&mut self, x: f64, y: f64) -> PointerEvent {
        self.cursor_position = (x, y);
        PointerEvent::Move {
            x: x as f32,
            y: y as f32,
        }
    }

    /// Records a mouse button change.
    pub fn intake_mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
    ) -> Option<PointerEvent> {
        if button != MouseButton::Left {
            return None;
        }
        self.left_button_old = self.left_button_new;
        self.left_button_new = state == ElementState::Pressed;

        let (x, y) = (self.cursor_position.0 as f32, self.cursor_position.1 as f32);
        match RawInputState::from_raw_states(self.left_button_old, self.left_button_new) {
            RawInputState::Pressed => Some(PointerEvent::Down { x, y }),
            RawInputState::Released => Some(PointerEvent::Up { x, y }),
            RawInputState::Held | RawInputState::NotPressed => None,
        }
    }
}
