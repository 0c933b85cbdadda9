//! Viewport: pan offset, zoom level and visible surface size.

use crate::config::Config;
use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// The visible window onto the world.
///
/// `position` is the world-to-screen translation: `screen = world + position`.
/// Zoom is a stepped integer level consumed by the renderer; it does not take
/// part in pointer coordinate conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan).
    pub position: Vec2,
    /// Current zoom level.
    pub zoom_level: u32,
    /// Visible surface size.
    pub size: Size,
    /// Minimum allowed zoom level.
    pub min_zoom: u32,
    /// Maximum allowed zoom level.
    pub max_zoom: u32,
    /// Zoom change per step.
    pub zoom_step: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Viewport {
    /// Create an untranslated viewport using the configured zoom bounds.
    pub fn new(config: &Config) -> Self {
        Self {
            position: Vec2::ZERO,
            zoom_level: config.default_zoom,
            size: Size::new(800.0, 600.0),
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
            zoom_step: config.zoom_step,
        }
    }

    /// Convert a screen point to world coordinates.
    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        screen_point - self.position
    }

    /// Convert a world point to screen coordinates.
    pub fn world_to_screen(&self, world_point: Point) -> Point {
        world_point + self.position
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Set the zoom level, clamped to the allowed range.
    pub fn set_zoom_level(&mut self, level: u32) {
        self.zoom_level = level.clamp(self.min_zoom, self.max_zoom);
    }

    /// Step the zoom in. Returns false if already at the maximum.
    pub fn zoom_in(&mut self) -> bool {
        let next = self.zoom_level.saturating_add(self.zoom_step);
        if next > self.max_zoom {
            return false;
        }
        self.zoom_level = next;
        true
    }

    /// Step the zoom out. Returns false if already at the minimum.
    pub fn zoom_out(&mut self) -> bool {
        match self.zoom_level.checked_sub(self.zoom_step) {
            Some(next) if next >= self.min_zoom => {
                self.zoom_level = next;
                true
            }
            _ => false,
        }
    }

    /// The world-space rectangle currently on screen.
    pub fn visible_rect(&self) -> Rect {
        let origin = self.screen_to_world(Point::ZERO);
        Rect::from_origin_size(origin, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::default();
        assert_eq!(viewport.position, Vec2::ZERO);
        assert_eq!(viewport.zoom_level, 48);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut viewport = Viewport::default();
        viewport.pan(Vec2::new(30.0, -20.0));

        let original = Point::new(123.0, 456.0);
        let world = viewport.screen_to_world(original);
        assert_eq!(world, Point::new(93.0, 476.0));
        assert_eq!(viewport.world_to_screen(world), original);
    }

    #[test]
    fn test_zoom_steps_stop_at_bounds() {
        let mut viewport = Viewport::default();
        assert!(viewport.zoom_in());
        assert!(viewport.zoom_in());
        assert!(viewport.zoom_in());
        assert_eq!(viewport.zoom_level, 84);
        assert!(viewport.zoom_in());
        assert_eq!(viewport.zoom_level, 96);
        assert!(!viewport.zoom_in());
        assert_eq!(viewport.zoom_level, 96);

        viewport.set_zoom_level(30);
        assert!(!viewport.zoom_out());
        assert_eq!(viewport.zoom_level, 30);
    }

    #[test]
    fn test_set_zoom_clamps() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_level(1000);
        assert_eq!(viewport.zoom_level, 96);
        viewport.set_zoom_level(0);
        assert_eq!(viewport.zoom_level, 24);
    }

    #[test]
    fn test_visible_rect_follows_pan() {
        let mut viewport = Viewport::default();
        viewport.size = Size::new(100.0, 50.0);
        viewport.pan(Vec2::new(10.0, 20.0));
        let rect = viewport.visible_rect();
        assert_eq!(rect, Rect::new(-10.0, -20.0, 90.0, 30.0));
    }
}
