//! # Application State Management
//!
//! This module connects a host window to the editor:
//! - Input translation from `winit` events to pointer events
//! - Resize handling
//! - Redraw ticks
//!
//! The host owns the event loop and the GPU surface. For each window event it
//! receives, it calls [`WindowBridge::handle_window_event`], and when the
//! bridge reports that a frame is wanted it asks the window for a redraw.

pub mod input_manager;
pub mod input_state;

use input_manager::InputManager;
use log::debug;
use winit::event::WindowEvent;

use crate::engine_state::{rendering::RenderSurface, StrokeOutcome, VoxelEditor};

/// What handling one window event did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowResponse {
    /// A brush stroke, if the event completed a click on a voxel
    pub stroke: Option<StrokeOutcome>,
    /// Whether a frame was drawn
    pub drew_frame: bool,
    /// Whether the window should be asked for a redraw
    pub redraw_requested: bool,
}

/// Routes window events for one window into one editor.
#[derive(Debug, Default)]
pub struct WindowBridge {
    /// Cursor and button tracking
    pub input_manager: InputManager,
}

impl WindowBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles one window event.
    ///
    /// # Arguments
    /// * `editor` - The editor bound to this window
    /// * `event` - The event the event loop delivered
    ///
    /// # Returns
    /// What happened, including whether the host should request a redraw.
    pub fn handle_window_event<S: RenderSurface>(
        &mut self,
        editor: &mut VoxelEditor<S>,
        event: &WindowEvent,
    ) -> WindowResponse {
        let mut response = WindowResponse::default();

        match event {
            WindowEvent::Resized(size) => {
                debug!("Window resized to {}x{}", size.width, size.height);
                editor.resize(size.width, size.height);
                response.redraw_requested = true;
            }
            WindowEvent::RedrawRequested => {
                response.drew_frame = editor.frame();
            }
            _ => {
                if let Some(pointer) = self.input_manager.intake_input(event) {
                    response.stroke = editor.handle_pointer(pointer);
                    response.redraw_requested = response
                        .stroke
                        .as_ref()
                        .is_some_and(|stroke| !stroke.rebuilt_chunks.is_empty());
                }
            }
        }

        response
    }
}
