//! # Camera Implementation
//!
//! This module contains the camera the editor casts click rays from:
//! - Camera representation and the view matrix
//! - Projection matrix handling
//! - Screen to world unprojection
//! - GPU uniform packing
//!
//! ## Key Components
//! - `Camera`: eye position, orbit target and projection
//! - `Projection`: perspective projection settings
//! - `CameraUniform`: packed data structure for GPU shaders
//!
//! The editor does not move the camera itself. Orbit controls live with the
//! host application, which hands the editor each new pose through
//! `VoxelEditor::set_camera`.

use cgmath::*;

use crate::core::CameraConfig;

/// Transformation matrix to convert from OpenGL's coordinate system to WGPU's.
///
/// WGPU uses a coordinate system where:
/// - X is right
/// - Y is up
/// - NDC (Normalized Device Coordinates) range from -1 to 1 in X and Y, and 0 to 1 in Z
///
/// This matrix performs two main transformations:
/// 1. Scales the Z coordinate from [-1, 1] to [-0.5, 0.5]
/// 2. Translates the Z coordinate from [-0.5, 0.5] to [0, 1]
///
/// NDC depth 1 is the far plane under either convention, which is the depth
/// click rays are unprojected at.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,  // Scale Z from [-1,1] to [-0.5,0.5]
    0.0, 0.0, 0.5, 1.0,  // Translate Z from [-0.5,0.5] to [0,1]
);

/// Converts a pixel position to normalized device coordinates.
///
/// # Arguments
/// * `x`, `y` - Pixel position, origin at the top-left corner
/// * `width`, `height` - Viewport size in pixels
///
/// # Returns
/// `(x * 2 / w - 1, 1 - y * 2 / h)`, so the top-left corner maps to `(-1, 1)`.
pub fn screen_to_ndc(x: f32, y: f32, width: u32, height: u32) -> (f32, f32) {
    let width = width.max(1) as f32;
    let height = height.max(1) as f32;
    (x * 2.0 / width - 1.0, 1.0 - y * 2.0 / height)
}

/// A perspective camera looking from `position` at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// The point the camera looks at
    pub target: Point3<f32>,
    /// World up direction
    pub up: Vector3<f32>,
    /// Projection settings
    pub projection: Projection,
}

impl Camera {
    /// Creates a new camera with the specified pose and projection.
    ///
    /// # Example
    /// ```rust
    /// use cgmath::{Deg, Point3};
    /// use voxel_editor::engine_state::camera_state::camera::{Camera, Projection};
    ///
    /// let camera = Camera::new(
    ///     Point3::new(0.0, 10.0, 10.0),
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Projection::new(800, 600, Deg(75.0), 0.1, 1000.0),
    /// );
    /// assert_eq!(camera.position.y, 10.0);
    /// ```
    pub fn new<V: Into<Point3<f32>>, T: Into<Point3<f32>>>(
        position: V,
        target: T,
        projection: Projection,
    ) -> Self {
        Self {
            position: position.into(),
            target: target.into(),
            up: Vector3::unit_y(),
            projection,
        }
    }

    /// The starting pose of a fresh editor: above and behind the origin
    /// chunk, looking into it.
    ///
    /// # Arguments
    /// * `config` - Projection parameters
    /// * `width`, `height` - Viewport size in pixels
    /// * `cell_size` - Chunk edge length, which scales the pose
    pub fn for_chunk(config: &CameraConfig, width: u32, height: u32, cell_size: u32) -> Self {
        let s = cell_size as f32;
        Self::new(
            Point3::new(-s * 0.3, s * 0.8, -s * 0.3),
            Point3::new(s / 2.0, s / 3.0, s / 2.0),
            Projection::new(width, height, Deg(config.fov_degrees), config.near, config.far),
        )
    }

    /// Calculates the view matrix for this camera.
    ///
    /// The view matrix transforms world coordinates to view (camera) space.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.target, self.up)
    }

    /// Projection times view.
    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection.calc_matrix() * self.calc_matrix()
    }

    /// Maps a point in normalized device coordinates back to world space.
    ///
    /// # Returns
    /// `None` when the view-projection matrix is singular (for example when
    /// `position == target`).
    pub fn unproject(&self, ndc: Point3<f32>) -> Option<Point3<f32>> {
        if self.position == self.target {
            return None;
        }
        let inverse = self.view_projection().invert()?;
        let clip = inverse * ndc.to_homogeneous();
        if clip.w == 0.0 {
            return None;
        }
        let point = Point3::from_homogeneous(clip);
        (point.x.is_finite() && point.y.is_finite() && point.z.is_finite()).then_some(point)
    }

    /// The click ray through a pixel: from the camera position to the point
    /// on the far plane under that pixel.
    ///
    /// # Returns
    /// `(start, end)` in world space, or `None` for a degenerate camera.
    pub fn ray_through_pixel(
        &self,
        x: f32,
        y: f32,
        width: u32,
        height: u32,
    ) -> Option<(Point3<f32>, Point3<f32>)> {
        let (ndc_x, ndc_y) = screen_to_ndc(x, y, width, height);
        let end = self.unproject(Point3::new(ndc_x, ndc_y, 1.0))?;
        Some((self.position, end))
    }
}

/// Represents a camera's projection matrix and related parameters.
///
/// This handles the perspective projection used to render the 3D scene.
/// It manages the aspect ratio, field of view, and near/far clipping planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Aspect ratio (width / height)
    aspect: f32,
    /// Vertical field of view in radians
    fovy: Rad<f32>,
    /// Near clipping plane distance
    znear: f32,
    /// Far clipping plane distance
    zfar: f32,
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `width` - Viewport width in pixels
    /// * `height` - Viewport height in pixels
    /// * `fovy` - Vertical field of view (can be any type convertible to `Rad<f32>`)
    /// * `znear` - Near clipping plane distance
    /// * `zfar` - Far clipping plane distance
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width.max(1) as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Updates the projection's aspect ratio for viewport resizing.
    ///
    /// # Arguments
    /// * `width` - New viewport width in pixels
    /// * `height` - New viewport height in pixels
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Width over height.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Far clipping plane distance.
    pub fn far(&self) -> f32 {
        self.zfar
    }

    /// Calculates the projection matrix.
    ///
    /// Combines the perspective projection with the OpenGL to WGPU coordinate system transform.
    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// GPU-friendly representation of camera data for shaders.
///
/// This struct is used to pass camera data to the GPU in a format that matches
/// the layout expected by the shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    // cgmath matrices are not Pod, so they are stored as plain arrays
    pub view_proj: [[f32; 4]; 4],
    pub view_proj_inverse: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    /// Creates a new camera uniform with identity matrices and zero position.
    pub fn new() -> Self {
        Self {
            view_proj: cgmath::Matrix4::identity().into(),
            view_proj_inverse: cgmath::Matrix4::identity().into(),
            position: [0.0, 0.0, 0.0, 0.0],
        }
    }

    /// Builds the uniform for a camera's current pose.
    pub fn from_camera(camera: &Camera) -> Self {
        let mut uniform = Self::new();
        uniform.update_view_proj_and_pos(camera);
        uniform
    }

    /// Updates the view-projection matrix and position based on the current camera state.
    ///
    /// A singular view-projection leaves the previous inverse in place.
    pub fn update_view_proj_and_pos(&mut self, camera: &Camera) {
        let viewproj = camera.view_projection();
        self.view_proj = viewproj.into();
        if let Some(inverse) = viewproj.invert() {
            self.view_proj_inverse = inverse.into();
        }
        let pos3: [f32; 3] = camera.position.into();

        self.position = [pos3[0], pos3[1], pos3[2], 0.0];
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}
