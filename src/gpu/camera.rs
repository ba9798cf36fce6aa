//! Arcball camera orbiting the scene.

use glam::{Mat4, Vec3};

/// Orbit camera: yaw/pitch around a target point at a fixed distance.
///
/// The host feeds [`eye`](Camera::eye) and [`look_at`](Camera::look_at) to
/// the emitter for depth sorting, and the matrices to the renderer.
pub struct Camera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
}

/// Pitch limit, just short of the poles.
const PITCH_LIMIT: f32 = 1.5;

impl Camera {
    /// Create a camera with default positioning.
    pub fn new() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.3,
            distance: 3.0,
            target: Vec3::ZERO,
        }
    }

    /// Rotate by mouse-drag deltas in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.005;
        self.pitch = (self.pitch + dy * 0.005).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Move along the view axis by scroll units.
    pub fn dolly(&mut self, scroll: f32) {
        self.distance = (self.distance - scroll * 0.3).clamp(0.5, 20.0);
    }

    /// World-space eye position.
    pub fn eye(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Point the camera is aimed at.
    pub fn look_at(&self) -> Vec3 {
        self.target
    }

    /// View matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    /// Perspective projection for the given aspect ratio.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(45.0_f32.to_radians(), aspect, 0.1, 100.0)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eye_keeps_distance() {
        let camera = Camera::new();
        let dist = (camera.eye() - camera.target).length();
        assert!((dist - camera.distance).abs() < 1e-5);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut camera = Camera::new();
        camera.orbit(0.0, 10_000.0);
        assert!(camera.pitch <= PITCH_LIMIT);
        camera.orbit(0.0, -100_000.0);
        assert!(camera.pitch >= -PITCH_LIMIT);
    }

    #[test]
    fn test_dolly_clamps_distance() {
        let mut camera = Camera::new();
        camera.dolly(1_000.0);
        assert!(camera.distance >= 0.5);
        camera.dolly(-1_000.0);
        assert!(camera.distance <= 20.0);
    }
}
