//! Point and marquee hit-testing over element lists.

use crate::elements::{Bounds, Element, ElementId};
use crate::geometry::{is_element_in_rect, normalize_pos};
use crate::visual::TextMetrics;
use kurbo::{Point, Vec2};

/// Topmost element under a screen point, or `None` on a miss.
///
/// `elements` is walked back to front so the most recently added element wins.
pub fn get_hit_element<'a, I>(
    elements: I,
    metrics: &dyn TextMetrics,
    screen_point: Point,
    position: Vec2,
    tolerance: f64,
) -> Option<&'a Element>
where
    I: IntoIterator<Item = &'a Element>,
    I::IntoIter: DoubleEndedIterator,
{
    let point = normalize_pos(position, screen_point);
    elements
        .into_iter()
        .rev()
        .find(|el| el.hit_test(point, tolerance, metrics))
}

/// Ids of the elements whose bounding box lies fully inside `rect`.
pub fn elements_in_rect<'a, I>(elements: I, rect: &Bounds) -> Vec<ElementId>
where
    I: IntoIterator<Item = &'a Element>,
{
    elements
        .into_iter()
        .filter(|el| is_element_in_rect(el, rect))
        .map(Element::id)
        .collect()
}
