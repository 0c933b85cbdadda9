//! Scene elements: a closed union of the four drawable kinds.

mod handdrawn;
mod line;
mod rectangle;
mod style;
mod text;

pub use handdrawn::Handdrawn;
pub use line::Line;
pub use rectangle::Rectangle;
pub use style::{
    CurrentStyle, FillStyle, FontFamily, FontSize, SerializableColor, ShapeOptions,
    StrokeOptions, StrokeWidth, TextOptions,
};
pub use text::Text;

use crate::geometry::rect_contains_point;
use crate::visual::{CachedVisual, DrawableGenerator, TextMetrics};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Generate a seed for the hand-drawn jitter of a new shape.
/// Uses a counter + hash so it needs no platform entropy source.
pub fn generate_seed() -> u32 {
    use std::sync::atomic::{AtomicU32, Ordering};

    static SEED_COUNTER: AtomicU32 = AtomicU32::new(1);

    let counter = SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    // splitmix32-style mixing
    let mut x = counter.wrapping_mul(0x9E3779B9);
    x ^= x >> 16;
    x = x.wrapping_mul(0x85EBCA6B);
    x ^= x >> 13;
    x = x.wrapping_mul(0xC2B2AE35);
    x ^= x >> 16;
    x
}

/// Bounding geometry in world coordinates.
///
/// Corners are stored in drag order: `x <= end_x` is not guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, end_x: f64, end_y: f64) -> Self {
        Self { x, y, end_x, end_y }
    }

    /// Bounds spanning two corner points, keeping their order.
    pub fn from_corners(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    pub fn start(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.end_x, self.end_y)
    }

    /// Absolute horizontal extent.
    pub fn width(&self) -> f64 {
        (self.end_x - self.x).abs()
    }

    /// Absolute vertical extent.
    pub fn height(&self) -> f64 {
        (self.end_y - self.y).abs()
    }

    /// Min/max ordered rectangle.
    pub fn normalized(&self) -> Rect {
        Rect::from_points(self.start(), self.end())
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self::from_corners(self.start() + offset, self.end() + offset)
    }
}

impl From<Rect> for Bounds {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x0, rect.y0, rect.x1, rect.y1)
    }
}

/// Variant-specific payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle(Rectangle),
    Line(Line),
    Text(Text),
    Handdrawn(Handdrawn),
}

/// Geometry that lives outside the bounding box and is only reconciled
/// when a move gesture is committed.
#[derive(Debug, Clone, PartialEq)]
pub enum SecondaryGeometry {
    None,
    Endpoints { point1: Point, point2: Point },
    Path(Vec<Point>),
}

/// A committed or preview scene object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub(crate) id: ElementId,
    bounds: Bounds,
    /// Overall opacity (0.0 - 1.0).
    pub opacity: f64,
    /// Marked by an in-progress erase gesture.
    #[serde(default)]
    pub will_delete: bool,
    kind: ElementKind,
    /// Drawable and raster cache produced by the rendering backend.
    #[serde(skip)]
    visual: Option<CachedVisual>,
}

impl Element {
    fn with_kind(bounds: Bounds, opacity: f64, kind: ElementKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            bounds,
            opacity,
            will_delete: false,
            kind,
            visual: None,
        }
    }

    /// A rectangle spanning `start` to `end` in drag order.
    pub fn rectangle(start: Point, end: Point, options: ShapeOptions, seed: u32) -> Self {
        let opacity = options.stroke.opacity;
        Self::with_kind(
            Bounds::from_corners(start, end),
            opacity,
            ElementKind::Rectangle(Rectangle::new(options, seed)),
        )
    }

    /// A straight line. The bounding box is the normalized hull of the endpoints.
    pub fn line(point1: Point, point2: Point, options: ShapeOptions, seed: u32) -> Self {
        let opacity = options.stroke.opacity;
        let line = Line::new(point1, point2, options, seed);
        Self::with_kind(line.hull().into(), opacity, ElementKind::Line(line))
    }

    /// A text block anchored at its top-left corner, measured with `metrics`.
    pub fn text(
        anchor: Point,
        content: &str,
        options: TextOptions,
        metrics: &dyn TextMetrics,
    ) -> Self {
        let opacity = options.stroke.opacity;
        let text = Text::new(content, options);
        let size = text.measure(metrics);
        Self::with_kind(
            Bounds::new(anchor.x, anchor.y, anchor.x + size.width, anchor.y + size.height),
            opacity,
            ElementKind::Text(text),
        )
    }

    /// A freehand stroke through the sampled world points.
    pub fn handdrawn(points: Vec<Point>, options: StrokeOptions) -> Self {
        let opacity = options.opacity;
        let stroke = Handdrawn::new(points, options);
        Self::with_kind(stroke.hull().into(), opacity, ElementKind::Handdrawn(stroke))
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Short name of the variant.
    pub fn shape_name(&self) -> &'static str {
        match &self.kind {
            ElementKind::Rectangle(_) => "rectangle",
            ElementKind::Line(_) => "line",
            ElementKind::Text(_) => "text",
            ElementKind::Handdrawn(_) => "handdrawn",
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match &self.kind {
            ElementKind::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn as_handdrawn(&self) -> Option<&Handdrawn> {
        match &self.kind {
            ElementKind::Handdrawn(stroke) => Some(stroke),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match &self.kind {
            ElementKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Overwrite the bounding box only.
    ///
    /// Line endpoints and stroke paths are left untouched; a rectangle's
    /// cached visual is dropped if its size changed.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        let resized = (bounds.width() - self.bounds.width()).abs() > f64::EPSILON
            || (bounds.height() - self.bounds.height()).abs() > f64::EPSILON;
        self.bounds = bounds;
        if resized && matches!(self.kind, ElementKind::Rectangle(_)) {
            self.invalidate_visual();
        }
    }

    /// Copy of the geometry that [`set_bounds`](Self::set_bounds) does not touch.
    pub fn secondary_geometry(&self) -> SecondaryGeometry {
        match &self.kind {
            ElementKind::Line(line) => SecondaryGeometry::Endpoints {
                point1: line.point1,
                point2: line.point2,
            },
            ElementKind::Handdrawn(stroke) => SecondaryGeometry::Path(stroke.paths.clone()),
            ElementKind::Rectangle(_) | ElementKind::Text(_) => SecondaryGeometry::None,
        }
    }

    /// Put back a snapshot taken with [`secondary_geometry`](Self::secondary_geometry).
    pub fn restore_secondary_geometry(&mut self, geometry: SecondaryGeometry) {
        let restored = match (&mut self.kind, geometry) {
            (ElementKind::Line(line), SecondaryGeometry::Endpoints { point1, point2 }) => {
                line.point1 = point1;
                line.point2 = point2;
                true
            }
            (ElementKind::Handdrawn(stroke), SecondaryGeometry::Path(paths)) => {
                stroke.paths = paths;
                true
            }
            (_, SecondaryGeometry::None) => false,
            (_, other) => {
                log::warn!("Ignoring mismatched geometry snapshot {:?}", other);
                false
            }
        };
        if restored {
            self.invalidate_visual();
        }
    }

    /// Shift line endpoints or stroke points by `offset`.
    pub fn translate_secondary_geometry(&mut self, offset: Vec2) {
        match &mut self.kind {
            ElementKind::Line(line) => line.translate(offset),
            ElementKind::Handdrawn(stroke) => stroke.translate(offset),
            ElementKind::Rectangle(_) | ElementKind::Text(_) => return,
        }
        self.invalidate_visual();
    }

    /// Append a sample to a freehand stroke, growing its bounds.
    ///
    /// Returns false for every other kind.
    pub fn push_stroke_point(&mut self, point: Point) -> bool {
        let ElementKind::Handdrawn(stroke) = &mut self.kind else {
            return false;
        };
        let first = stroke.paths.is_empty();
        stroke.paths.push(point);
        self.bounds = if first {
            Bounds::from_corners(point, point)
        } else {
            self.bounds.normalized().union_pt(point).into()
        };
        self.visual = None;
        true
    }

    /// Shape-specific hit-test against a world point.
    pub fn hit_test(&self, point: Point, tolerance: f64, metrics: &dyn TextMetrics) -> bool {
        match &self.kind {
            ElementKind::Rectangle(_) => rect_contains_point(self.bounds.normalized(), point),
            ElementKind::Text(text) => {
                let rect = Rect::from_origin_size(self.bounds.start(), text.measure(metrics));
                rect_contains_point(rect, point)
            }
            ElementKind::Line(line) => line.hit_test(point, tolerance),
            ElementKind::Handdrawn(stroke) => stroke.hit_test(point, tolerance),
        }
    }

    /// The cached visual, if one has been generated.
    pub fn visual(&self) -> Option<&CachedVisual> {
        self.visual.as_ref()
    }

    /// Drop the cached visual so the next render regenerates it.
    pub fn invalidate_visual(&mut self) {
        self.visual = None;
    }

    /// Return the cached visual, generating it only if none is cached.
    pub fn ensure_visual(
        &mut self,
        generator: &mut dyn DrawableGenerator,
    ) -> Option<&CachedVisual> {
        if self.visual.is_none() {
            self.rebuild_visual(generator);
        }
        self.visual.as_ref()
    }

    /// Regenerate the cached visual unconditionally.
    pub fn rebuild_visual(&mut self, generator: &mut dyn DrawableGenerator) {
        self.visual = generator.generate(self).map(CachedVisual::new);
    }
}
