//! Rectangle payload.

use super::{Bounds, ShapeOptions};
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// A rectangle. Its geometry is the element's bounding box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    pub options: ShapeOptions,
    /// Seed for the hand-drawn jitter, stable for the element's lifetime.
    pub seed: u32,
}

impl Rectangle {
    pub fn new(options: ShapeOptions, seed: u32) -> Self {
        Self { options, seed }
    }

    /// The rectangle in element-local space (origin at the top-left corner).
    pub fn local_rect(bounds: &Bounds) -> Rect {
        Rect::new(0.0, 0.0, bounds.width(), bounds.height())
    }

    /// Whether a drag produced a rectangle big enough to keep.
    pub fn meets_min_size(bounds: &Bounds, min_size: f64) -> bool {
        bounds.width() >= min_size && bounds.height() >= min_size
    }
}
