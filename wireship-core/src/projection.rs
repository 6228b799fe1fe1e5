/// Camera and projection utilities
use nalgebra::{Matrix4, Vector3};

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    /// Window-sized 2D projection used by the text overlay
    Orthographic,
    Perspective,
}

/// Fixed camera looking down -Z at the origin
#[derive(Debug, Clone)]
pub struct Camera {
    /// Distance from the camera to the world origin
    pub distance: f32,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub width: u32,
    pub height: u32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            distance: 30.0,
            fov: 60.0,
            aspect: width as f32 / height.max(1) as f32,
            near: 0.1,
            far: 100.0,
            width,
            height,
        }
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(0.0, 0.0, -self.distance))
    }

    pub fn perspective_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov.to_radians(), self.near, self.far)
    }

    /// Pixel-space projection with the origin at the bottom-left corner
    pub fn overlay_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_orthographic(0.0, self.width as f32, 0.0, self.height as f32, -1.0, 1.0)
    }

    pub fn projection_matrix(&self, mode: ProjectionMode) -> Matrix4<f32> {
        match mode {
            ProjectionMode::Perspective => self.perspective_matrix(),
            ProjectionMode::Orthographic => self.overlay_matrix(),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(1000, 800)
    }
}
