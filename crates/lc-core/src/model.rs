//! Drawable element model for the lesson canvas.
//!
//! The canvas holds a flat `Vec<Element>`. Each element is one shape or
//! stroke; its `id` equals its position in the vector, which is what
//! lets the interaction layer address elements by id without a map.
//!
//! Elements serialize to the same JSON shape the page stores under
//! `canvasElements`:
//!
//! ```json
//! {"id":0,"type":"rectangle","x1":10,"y1":10,"x2":60,"y2":40,"stroke":{"color":"#000000","width":5}}
//! ```

use crate::id::ElementId;
use kurbo::Point;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Build from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long =
            |i: usize| Some((hex_val(bytes[i])? << 4 | hex_val(bytes[i + 1])?) as f32 / 255.0);

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Parse any color string accepted by the color controls: hex,
    /// `rgb()`/`rgba()`, or one of the named palette colors.
    pub fn parse(input: &str) -> Option<Self> {
        crate::css::parse_color(input)
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = (
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.a),
        );
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: {s}")))
    }
}

// ─── Stroke ──────────────────────────────────────────────────────────────

/// Paint state captured by an element when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    /// Eraser strokes remove pixels instead of painting them.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub erase: bool,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            erase: false,
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new(Color::BLACK, 5.0)
    }
}

// ─── Geometry records ────────────────────────────────────────────────────

/// Two corner points of a shape element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coords {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Coords {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Same size, with (x1, y1) moved to `origin`.
    pub fn moved_to(&self, origin: Point) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x + self.width(),
            origin.y + self.height(),
        )
    }
}

/// Text payload and its measured box.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TextBox {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub text: String,
}

impl TextBox {
    pub fn coords(&self) -> Coords {
        Coords::new(self.x1, self.y1, self.x2, self.y2)
    }

    fn set_coords(&mut self, c: Coords) {
        self.x1 = c.x1;
        self.y1 = c.y1;
        self.x2 = c.x2;
        self.y2 = c.y2;
    }
}

// ─── Elements ────────────────────────────────────────────────────────────

/// The kinds of element a drawing tool can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Line,
    Rectangle,
    Circle,
    Pencil,
    Text,
}

impl ElementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Line => "line",
            ElementKind::Rectangle => "rectangle",
            ElementKind::Circle => "circle",
            ElementKind::Pencil => "pencil",
            ElementKind::Text => "text",
        }
    }
}

impl FromStr for ElementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "line" => Ok(ElementKind::Line),
            "rectangle" => Ok(ElementKind::Rectangle),
            "circle" => Ok(ElementKind::Circle),
            "pencil" => Ok(ElementKind::Pencil),
            "text" => Ok(ElementKind::Text),
            other => Err(format!("Type not recognized: {other}")),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-kind geometry. Serialized with a `"type"` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Line(Coords),
    Rectangle(Coords),
    /// Center at (x1, y1); the radius reaches (x2, y2).
    Circle(Coords),
    Pencil { points: Vec<Point> },
    Text(TextBox),
}

/// One drawable shape or stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(flatten)]
    pub shape: Shape,
    #[serde(default)]
    pub stroke: Stroke,
}

impl Element {
    /// Build a fresh element of `kind` spanning (x1, y1)-(x2, y2).
    ///
    /// Pencil strokes start with the single point (x1, y1); text starts
    /// with an empty payload.
    pub fn new(
        id: ElementId,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        kind: ElementKind,
        stroke: Stroke,
    ) -> Self {
        let coords = Coords::new(x1, y1, x2, y2);
        let shape = match kind {
            ElementKind::Line => Shape::Line(coords),
            ElementKind::Rectangle => Shape::Rectangle(coords),
            ElementKind::Circle => Shape::Circle(coords),
            ElementKind::Pencil => Shape::Pencil {
                points: vec![Point::new(x1, y1)],
            },
            ElementKind::Text => Shape::Text(TextBox {
                x1,
                y1,
                x2,
                y2,
                text: String::new(),
            }),
        };
        Self { id, shape, stroke }
    }

    pub fn kind(&self) -> ElementKind {
        match self.shape {
            Shape::Line(_) => ElementKind::Line,
            Shape::Rectangle(_) => ElementKind::Rectangle,
            Shape::Circle(_) => ElementKind::Circle,
            Shape::Pencil { .. } => ElementKind::Pencil,
            Shape::Text(_) => ElementKind::Text,
        }
    }

    /// Corner coordinates, or `None` for pencil strokes.
    pub fn coords(&self) -> Option<Coords> {
        match &self.shape {
            Shape::Line(c) | Shape::Rectangle(c) | Shape::Circle(c) => Some(*c),
            Shape::Text(t) => Some(t.coords()),
            Shape::Pencil { .. } => None,
        }
    }

    /// Replace the corner coordinates. No-op for pencil strokes.
    pub fn set_coords(&mut self, coords: Coords) {
        match &mut self.shape {
            Shape::Line(c) | Shape::Rectangle(c) | Shape::Circle(c) => *c = coords,
            Shape::Text(t) => t.set_coords(coords),
            Shape::Pencil { .. } => {}
        }
    }

    /// Freehand points, or an empty slice for non-pencil elements.
    pub fn points(&self) -> &[Point] {
        match &self.shape {
            Shape::Pencil { points } => points,
            _ => &[],
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text(t) => Some(&t.text),
            _ => None,
        }
    }
}

/// Construct an element from a string type tag.
///
/// # Errors
/// Returns `"Type not recognized: <tag>"` for tags outside the closed set.
pub fn create_element(
    id: ElementId,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    tag: &str,
    stroke: Stroke,
) -> Result<Element, String> {
    let kind = tag.parse::<ElementKind>()?;
    Ok(Element::new(id, x1, y1, x2, y2, kind, stroke))
}
