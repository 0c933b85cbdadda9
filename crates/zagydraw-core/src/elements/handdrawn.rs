//! Freehand stroke payload.

use super::StrokeOptions;
use crate::geometry::point_to_polyline_dist;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A freehand stroke: the world-space points sampled while drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Handdrawn {
    pub paths: Vec<Point>,
    pub options: StrokeOptions,
}

impl Handdrawn {
    pub fn new(paths: Vec<Point>, options: StrokeOptions) -> Self {
        Self { paths, options }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Normalized box around every sample. Empty strokes have a zero box.
    pub fn hull(&self) -> Rect {
        let Some(first) = self.paths.first() else {
            return Rect::ZERO;
        };
        self.paths
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
    }

    /// True if `point` lies within `tolerance` of the sampled polyline.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_polyline_dist(point, &self.paths) < tolerance
    }

    pub fn translate(&mut self, offset: Vec2) {
        for point in &mut self.paths {
            *point += offset;
        }
    }
}
