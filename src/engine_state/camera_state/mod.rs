//! # Camera State
//!
//! This module holds the camera the editor unprojects clicks through.
//!
//! ## Core Components
//! - `Camera`: eye position, orbit target and projection
//! - `Projection`: perspective projection settings
//! - `CameraUniform`: GPU representation of camera data for shaders
//! - `screen_to_ndc`: pixel to normalized device coordinate conversion

pub mod camera;

pub use camera::{screen_to_ndc, Camera, CameraUniform, Projection};
