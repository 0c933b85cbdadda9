//! Backend-facing visual cache: drawables, raster sizing and text measuring.
//!
//! The core never rasterizes. It asks a [`DrawableGenerator`] for a vector
//! description of an element and keeps it, together with the size of the
//! offscreen surface a renderer would blit, until the element's geometry
//! changes.

use crate::elements::{Element, ElementKind, FillStyle, FontFamily, FontSize, Rectangle};
use kurbo::{BezPath, Point, Shape, Size};
use peniko::Color;

/// Coordinate space a drawable's path is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawableSpace {
    /// Relative to the element's normalized top-left corner.
    Local,
    /// Absolute world coordinates.
    World,
}

/// Vector description of an element, ready for a renderer.
#[derive(Debug, Clone)]
pub struct Drawable {
    pub path: BezPath,
    pub space: DrawableSpace,
    pub stroke: Color,
    pub stroke_width: f64,
    pub dash: Vec<f64>,
    pub fill: Option<Color>,
    pub fill_style: Option<FillStyle>,
    /// Jitter seed for sketchy renderers.
    pub seed: Option<u32>,
}

/// Size and placement of the offscreen surface for one drawable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterCache {
    /// Top-left corner in the drawable's own space.
    pub origin: Point,
    pub width: u32,
    pub height: u32,
}

impl RasterCache {
    /// Path bounds padded by the stroke width on every side.
    pub fn for_drawable(drawable: &Drawable) -> Self {
        let pad = drawable.stroke_width.max(1.0);
        let bbox = drawable.path.bounding_box().inflate(pad, pad);
        Self {
            origin: bbox.origin(),
            width: bbox.width().ceil().max(1.0) as u32,
            height: bbox.height().ceil().max(1.0) as u32,
        }
    }
}

/// A drawable plus its raster sizing, stored on the element.
#[derive(Debug, Clone)]
pub struct CachedVisual {
    pub drawable: Drawable,
    pub raster: RasterCache,
}

impl CachedVisual {
    pub fn new(drawable: Drawable) -> Self {
        let raster = RasterCache::for_drawable(&drawable);
        Self { drawable, raster }
    }
}

/// Produces drawables for elements. Implemented by rendering backends.
pub trait DrawableGenerator {
    /// Build a drawable for `element`, or `None` for kinds drawn directly (text).
    fn generate(&mut self, element: &Element) -> Option<Drawable>;
}

/// Plain vector generator: exact outlines, no sketch jitter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathGenerator;

impl DrawableGenerator for PathGenerator {
    fn generate(&mut self, element: &Element) -> Option<Drawable> {
        match element.kind() {
            ElementKind::Rectangle(rect) => {
                let path = Rectangle::local_rect(&element.bounds()).to_path(0.1);
                Some(Drawable {
                    path,
                    space: DrawableSpace::Local,
                    stroke: rect.options.stroke.stroke_with_opacity(),
                    stroke_width: rect.options.stroke.stroke_width.width(),
                    dash: rect.options.stroke.stroke_line_dash.clone(),
                    fill: rect.options.fill_with_opacity(),
                    fill_style: rect.options.fill.map(|_| rect.options.fill_style),
                    seed: Some(rect.seed),
                })
            }
            ElementKind::Line(line) => {
                let mut path = BezPath::new();
                path.move_to(line.point1);
                path.line_to(line.point2);
                Some(Drawable {
                    path,
                    space: DrawableSpace::World,
                    stroke: line.options.stroke.stroke_with_opacity(),
                    stroke_width: line.options.stroke.stroke_width.width(),
                    dash: line.options.stroke.stroke_line_dash.clone(),
                    fill: None,
                    fill_style: None,
                    seed: Some(line.seed),
                })
            }
            ElementKind::Handdrawn(stroke) => {
                let mut points = stroke.paths.iter();
                let first = points.next()?;
                let mut path = BezPath::new();
                path.move_to(*first);
                for point in points {
                    path.line_to(*point);
                }
                Some(Drawable {
                    path,
                    space: DrawableSpace::World,
                    stroke: stroke.options.stroke_with_opacity(),
                    stroke_width: stroke.options.stroke_width.width(),
                    dash: stroke.options.stroke_line_dash.clone(),
                    fill: None,
                    fill_style: None,
                    seed: None,
                })
            }
            ElementKind::Text(_) => None,
        }
    }
}

/// Measures text lines. Supplied by the surface that lays out glyphs.
pub trait TextMetrics {
    fn measure_line(&self, line: &str, font: FontFamily, size: FontSize) -> Size;
}

/// Fixed-advance estimate used when no real font backend is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMetrics;

impl TextMetrics for ApproxTextMetrics {
    fn measure_line(&self, line: &str, font: FontFamily, size: FontSize) -> Size {
        let advance = match font {
            FontFamily::Code => 0.6,
            FontFamily::Hand => 0.5,
            FontFamily::Minecraft => 0.7,
        };
        let px = size.px();
        Size::new(line.chars().count() as f64 * px * advance, px)
    }
}
