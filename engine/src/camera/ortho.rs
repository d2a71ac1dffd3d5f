//! Orthographic 2D camera: window pixels to world plane.

use glam::Vec2;

/// Side-view orthographic camera.
///
/// `center` is the world point shown in the middle of the window and
/// `view_height` how many world units fit vertically; horizontal extent
/// follows the window aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoCamera2D {
    pub center: Vec2,
    pub view_height: f32,
    /// Window size in pixels
    pub viewport: Vec2,
}

impl Default for OrthoCamera2D {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            view_height: 20.0,
            viewport: Vec2::new(1280.0, 720.0),
        }
    }
}

impl OrthoCamera2D {
    pub fn new(center: Vec2, view_height: f32, viewport: Vec2) -> Self {
        Self {
            center,
            view_height,
            viewport,
        }
    }

    /// Update the window size after a resize event.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
    }

    /// World units per pixel.
    pub fn units_per_pixel(&self) -> f32 {
        self.view_height / self.viewport.y.max(1.0)
    }

    /// Convert a window position (pixels, origin top-left, Y down) to world
    /// coordinates (Y up).
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let scale = self.units_per_pixel();
        let offset = screen - self.viewport * 0.5;
        self.center + Vec2::new(offset.x, -offset.y) * scale
    }

    /// Inverse of [`OrthoCamera2D::screen_to_world`].
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let scale = self.units_per_pixel();
        let offset = (world - self.center) / scale;
        Vec2::new(offset.x, -offset.y) + self.viewport * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_center_maps_to_camera_center() {
        let cam = OrthoCamera2D::new(Vec2::new(4.0, 2.0), 10.0, Vec2::new(200.0, 100.0));
        assert_eq!(cam.screen_to_world(Vec2::new(100.0, 50.0)), Vec2::new(4.0, 2.0));
    }

    #[test]
    fn test_screen_y_points_down() {
        let cam = OrthoCamera2D::new(Vec2::ZERO, 10.0, Vec2::new(200.0, 100.0));
        let top_left = cam.screen_to_world(Vec2::ZERO);
        assert!((top_left - Vec2::new(-10.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_round_trip() {
        let cam = OrthoCamera2D::new(Vec2::new(-3.0, 1.0), 12.0, Vec2::new(640.0, 480.0));
        let screen = Vec2::new(17.0, 403.0);
        let back = cam.world_to_screen(cam.screen_to_world(screen));
        assert!((back - screen).length() < 1e-3);
    }
}
