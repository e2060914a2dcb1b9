//! Click versus orbit classification.
//!
//! The same left-button drag that edits a voxel also orbits the camera, so a
//! press only becomes an edit if the pointer barely moved before release.
//! Movement is accumulated per axis as the sum of absolute deltas between
//! consecutive pointer positions; a release is a click when both sums stay
//! below the threshold.

use log::trace;

use crate::application_state::input_state::PointerEvent;

/// What a completed press/release turned out to be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// An edit at the release position
    Click { x: f32, y: f32 },
    /// A camera drag; the editor does nothing
    Orbit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum GestureState {
    Idle,
    Pressed {
        last: (f32, f32),
        moved: (f32, f32),
    },
}

/// Tracks one pointer from press to release.
#[derive(Debug, Clone)]
pub struct PointerGesture {
    click_threshold: f32,
    state: GestureState,
}

impl PointerGesture {
    /// Creates an idle classifier.
    ///
    /// # Arguments
    /// * `click_threshold` - Per-axis travel in pixels at or above which a
    ///   press counts as an orbit
    pub fn new(click_threshold: f32) -> Self {
        PointerGesture {
            click_threshold,
            state: GestureState::Idle,
        }
    }

    /// `true` between a press and its release.
    pub fn is_pressed(&self) -> bool {
        matches!(self.state, GestureState::Pressed { .. })
    }

    /// Accumulated travel of the current press, if any.
    pub fn movement(&self) -> Option<(f32, f32)> {
        match self.state {
            GestureState::Pressed { moved, .. } => Some(moved),
            GestureState::Idle => None,
        }
    }

    /// Feeds one pointer event.
    ///
    /// # Returns
    /// The outcome when `event` ends a press; `None` otherwise, including for
    /// moves and releases without a preceding press.
    pub fn handle(&mut self, event: PointerEvent) -> Option<GestureOutcome> {
        match (event, self.state) {
            (PointerEvent::Down { x, y }, _) => {
                self.state = GestureState::Pressed {
                    last: (x, y),
                    moved: (0.0, 0.0),
                };
                None
            }
            (PointerEvent::Move { x, y }, GestureState::Pressed { last, moved }) => {
                self.state = GestureState::Pressed {
                    last: (x, y),
                    moved: (moved.0 + (x - last.0).abs(), moved.1 + (y - last.1).abs()),
                };
                None
            }
            (PointerEvent::Up { x, y }, GestureState::Pressed { moved, .. }) => {
                self.state = GestureState::Idle;
                let outcome = if moved.0 < self.click_threshold && moved.1 < self.click_threshold {
                    GestureOutcome::Click { x, y }
                } else {
                    GestureOutcome::Orbit
                };
                trace!("Pointer released after moving {:?}: {:?}", moved, outcome);
                Some(outcome)
            }
            (PointerEvent::Move { .. } | PointerEvent::Up { .. }, GestureState::Idle) => None,
        }
    }
}
