//! Coordinate normalization and low-level hit geometry.

use crate::elements::{Bounds, Element};
use kurbo::{Point, Rect, Vec2};

/// Convert a screen point to world space without snapping.
pub fn normalize_pos(position: Vec2, screen_point: Point) -> Point {
    Point::new(screen_point.x - position.x, screen_point.y - position.y)
}

/// Convert a screen point to world space and snap it to the grid.
pub fn normalize_to_grid(position: Vec2, screen_point: Point, grid_size: f64) -> Point {
    snap_to_grid(normalize_pos(position, screen_point), grid_size)
}

/// Snap a world point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> Point {
    Point::new(
        (point.x / grid_size).round() * grid_size,
        (point.y / grid_size).round() * grid_size,
    )
}

/// Inclusive containment of `inner` in `outer`. Both must be normalized.
pub fn rect_contains_rect(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.y0 >= outer.y0 && inner.x1 <= outer.x1 && inner.y1 <= outer.y1
}

/// Inclusive point-in-rect test. `rect` must be normalized.
pub fn rect_contains_point(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// True iff the element's bounding box lies entirely inside `rect`.
///
/// Either corner ordering is accepted for both boxes.
pub fn is_element_in_rect(element: &Element, rect: &Bounds) -> bool {
    rect_contains_rect(rect.normalized(), element.bounds().normalized())
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline.
///
/// A single-point polyline degenerates to point distance; an empty one is infinitely far.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => point.distance(*only),
        _ => points
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pos_subtracts_offset() {
        let world = normalize_pos(Vec2::new(30.0, -20.0), Point::new(100.0, 100.0));
        assert!((world.x - 70.0).abs() < f64::EPSILON);
        assert!((world.y - 120.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalize_to_grid_snaps() {
        let world = normalize_to_grid(Vec2::ZERO, Point::new(104.0, 96.0), 10.0);
        assert_eq!(world, Point::new(100.0, 100.0));

        let world = normalize_to_grid(Vec2::new(3.0, 0.0), Point::new(109.0, 0.0), 10.0);
        assert_eq!(world, Point::new(110.0, 0.0));
    }

    #[test]
    fn test_rect_containment_is_inclusive() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(rect_contains_rect(outer, Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(rect_contains_rect(outer, Rect::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!rect_contains_rect(outer, Rect::new(-1.0, 10.0, 20.0, 20.0)));
        assert!(!rect_contains_rect(outer, Rect::new(50.0, 50.0, 150.0, 60.0)));
    }

    #[test]
    fn test_segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(100.0, 0.0);
        assert!((point_to_segment_dist(Point::new(50.0, 3.0), a, b) - 3.0).abs() < 1e-10);
        // Beyond the end clamps to the endpoint
        assert!((point_to_segment_dist(Point::new(103.0, 4.0), a, b) - 5.0).abs() < 1e-10);
        // Degenerate segment
        assert!((point_to_segment_dist(Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_polyline_distance() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        assert!((point_to_polyline_dist(Point::new(12.0, 5.0), &points) - 2.0).abs() < 1e-10);
        assert!((point_to_polyline_dist(Point::new(3.0, 4.0), &points[..1]) - 5.0).abs() < 1e-10);
        assert!(point_to_polyline_dist(Point::ZERO, &[]).is_infinite());
    }
}
