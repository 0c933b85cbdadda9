//! Style options shared by element kinds.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`. Anything else is `None`.
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => Some(Self::new(
                channel(&hex[0..1])? * 17,
                channel(&hex[1..2])? * 17,
                channel(&hex[2..3])? * 17,
                255,
            )),
            6 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            )),
            8 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => None,
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Fill pattern for closed shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillStyle {
    #[default]
    Solid,
    Zigzag,
    Dots,
    Hachure,
}

/// Allowed stroke widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StrokeWidth {
    #[default]
    Thin,
    Bold,
    Extra,
}

impl StrokeWidth {
    /// Width in world units.
    pub fn width(self) -> f64 {
        match self {
            StrokeWidth::Thin => 1.0,
            StrokeWidth::Bold => 3.0,
            StrokeWidth::Extra => 6.0,
        }
    }
}

/// Font families offered by the text tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Code,
    Hand,
    Minecraft,
}

impl FontFamily {
    /// Family name as the rendering backend knows it.
    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Code => "FiraCode",
            FontFamily::Hand => "HandWritten",
            FontFamily::Minecraft => "Minecraft",
        }
    }
}

/// Font sizes offered by the text tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
    Huge,
}

impl FontSize {
    /// Size in pixels.
    pub fn px(self) -> f64 {
        match self {
            FontSize::Small => 16.0,
            FontSize::Medium => 24.0,
            FontSize::Large => 32.0,
            FontSize::Huge => 48.0,
        }
    }
}

/// Stroke options common to every element kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeOptions {
    pub stroke: SerializableColor,
    pub stroke_width: StrokeWidth,
    /// Dash pattern (empty = solid).
    #[serde(default)]
    pub stroke_line_dash: Vec<f64>,
    pub opacity: f64,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            stroke: SerializableColor::black(),
            stroke_width: StrokeWidth::default(),
            stroke_line_dash: Vec::new(),
            opacity: 1.0,
        }
    }
}

impl StrokeOptions {
    /// Stroke color with opacity applied.
    pub fn stroke_with_opacity(&self) -> Color {
        with_opacity(self.stroke, self.opacity)
    }
}

/// Style for rectangles and lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeOptions {
    #[serde(flatten)]
    pub stroke: StrokeOptions,
    /// Fill color; `None` leaves the interior empty.
    pub fill: Option<SerializableColor>,
    #[serde(default)]
    pub fill_style: FillStyle,
}

impl Default for ShapeOptions {
    fn default() -> Self {
        Self {
            stroke: StrokeOptions::default(),
            fill: None,
            fill_style: FillStyle::default(),
        }
    }
}

impl ShapeOptions {
    /// Fill color with opacity applied.
    pub fn fill_with_opacity(&self) -> Option<Color> {
        self.fill.map(|c| with_opacity(c, self.stroke.opacity))
    }
}

/// Style for text elements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextOptions {
    #[serde(flatten)]
    pub stroke: StrokeOptions,
    pub font: FontFamily,
    pub font_size: FontSize,
}

/// The style applied to newly created elements.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CurrentStyle {
    pub shape: ShapeOptions,
    pub font: FontFamily,
    pub font_size: FontSize,
}

impl CurrentStyle {
    pub fn stroke_options(&self) -> StrokeOptions {
        self.shape.stroke.clone()
    }

    pub fn text_options(&self) -> TextOptions {
        TextOptions {
            stroke: self.shape.stroke.clone(),
            font: self.font,
            font_size: self.font_size,
        }
    }
}

fn with_opacity(color: SerializableColor, opacity: f64) -> Color {
    let alpha = (color.a as f64 * opacity.clamp(0.0, 1.0)) as u8;
    Color::from_rgba8(color.r, color.g, color.b, alpha)
}
