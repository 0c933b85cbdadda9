//! Line payload.

use super::ShapeOptions;
use crate::geometry::point_to_segment_dist;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A straight line between two world-space endpoints.
///
/// The endpoints are authoritative for rendering and hit-testing; the
/// element's bounding box only tracks them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    pub point1: Point,
    pub point2: Point,
    pub options: ShapeOptions,
    pub seed: u32,
}

impl Line {
    pub fn new(point1: Point, point2: Point, options: ShapeOptions, seed: u32) -> Self {
        Self {
            point1,
            point2,
            options,
            seed,
        }
    }

    /// Normalized box around both endpoints.
    pub fn hull(&self) -> Rect {
        Rect::from_points(self.point1, self.point2)
    }

    pub fn length(&self) -> f64 {
        self.point1.distance(self.point2)
    }

    /// True if `point` lies within `tolerance` of the segment.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.point1, self.point2) < tolerance
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.point1 += offset;
        self.point2 += offset;
    }
}
