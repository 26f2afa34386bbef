use glam::Vec2;

/// Visible world window, in world units (Y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBounds {
    pub min: Vec2,
    pub max: Vec2,
}

/// 2D camera describing which part of the world the host draws.
pub struct Camera2D {
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
    /// Camera center position in world space.
    pub center: [f32; 2],
}

impl Camera2D {
    /// Camera showing `[0, width] × [0, height]`.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            center: [width / 2.0, height / 2.0],
        }
    }

    /// Move camera center to the target position immediately.
    pub fn look_at(&mut self, target: Vec2) {
        self.center = [target.x, target.y];
    }

    /// Side-scroller follow: snap the horizontal center to `x` and pin the
    /// vertical range to `[0, height]`. No easing.
    pub fn track_x(&mut self, x: f32) {
        self.look_at(Vec2::new(x, self.height / 2.0));
    }

    pub fn view_bounds(&self) -> ViewBounds {
        let half = Vec2::new(self.width / 2.0, self.height / 2.0);
        let center = Vec2::from(self.center);
        ViewBounds {
            min: center - half,
            max: center + half,
        }
    }

    /// Check if a world-space rectangle overlaps the viewport.
    pub fn is_rect_visible(&self, rect_center: Vec2, rect_half_size: Vec2) -> bool {
        let view = self.view_bounds();
        let rect_min = rect_center - rect_half_size;
        let rect_max = rect_center + rect_half_size;

        rect_max.x >= view.min.x
            && rect_min.x <= view.max.x
            && rect_max.y >= view.min.y
            && rect_min.y <= view.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_camera_shows_origin_window() {
        let cam = Camera2D::new(1280.0, 720.0);
        let view = cam.view_bounds();
        assert_eq!(view.min, Vec2::ZERO);
        assert_eq!(view.max, Vec2::new(1280.0, 720.0));
    }

    #[test]
    fn track_x_snaps_and_pins_vertical_range() {
        let mut cam = Camera2D::new(1280.0, 720.0);
        cam.look_at(Vec2::new(10.0, -300.0));
        cam.track_x(812.5);
        let view = cam.view_bounds();
        assert_eq!(cam.center[0], 812.5);
        assert_eq!(view.min.y, 0.0);
        assert_eq!(view.max.y, 720.0);
        assert_eq!(view.min.x, 812.5 - 640.0);
        assert_eq!(view.max.x, 812.5 + 640.0);
    }

    #[test]
    fn is_rect_visible_detects_overlap() {
        let mut cam = Camera2D::new(100.0, 100.0);
        cam.center = [50.0, 50.0]; // Viewport: [0,100] x [0,100]

        assert!(cam.is_rect_visible(Vec2::new(50.0, 50.0), Vec2::new(10.0, 10.0)));
        assert!(cam.is_rect_visible(Vec2::new(-5.0, 50.0), Vec2::new(10.0, 10.0)));
        assert!(!cam.is_rect_visible(Vec2::new(-50.0, 50.0), Vec2::new(10.0, 10.0)));
        assert!(!cam.is_rect_visible(Vec2::new(50.0, 200.0), Vec2::new(10.0, 10.0)));
    }
}
