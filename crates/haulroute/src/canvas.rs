//! Drawing surface abstraction.
//!
//! Every paint operation becomes a [`DrawCommand`]. Hosts replay the
//! commands onto a real surface (a browser canvas, an SVG document), and
//! tests inspect them through [`RecordingCanvas`].

// Allow missing docs for geometry primitives - fields are self-explanatory
#![allow(missing_docs)]

use crate::geometry::{Point, Size};
use serde::{Deserialize, Serialize};

/// RGBA color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create from RGB with full opacity
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create from hex (0xRRGGBB)
    #[must_use]
    pub const fn from_hex(hex: u32) -> Self {
        Self::rgb(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }

    /// Same color with a different alpha
    #[must_use]
    pub const fn with_alpha(mut self, a: u8) -> Self {
        self.a = a;
        self
    }

    /// CSS color string, `#rrggbb` when opaque
    #[must_use]
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.r,
                self.g,
                self.b,
                f64::from(self.a) / 255.0
            )
        }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Stroke styling for lines and outlines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    pub width: f64,
    /// Dash pattern; empty means solid
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dash: Vec<f64>,
}

impl StrokeStyle {
    /// Solid stroke
    #[must_use]
    pub const fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: Vec::new(),
        }
    }

    /// Dashed stroke
    #[must_use]
    pub fn dashed(color: Color, width: f64, dash: &[f64]) -> Self {
        Self {
            color,
            width,
            dash: dash.to_vec(),
        }
    }

    /// Check if the stroke has a dash pattern
    #[must_use]
    pub fn is_dashed(&self) -> bool {
        !self.dash.is_empty()
    }
}

/// Horizontal text anchor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    /// Canvas `textAlign` keyword
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Text styling options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    pub color: Color,
    pub align: TextAlign,
}

impl TextStyle {
    /// Centered text in the default family
    #[must_use]
    pub fn new(font_size: f64, color: Color) -> Self {
        Self {
            font_family: "Arial".into(),
            font_size,
            color,
            align: TextAlign::Center,
        }
    }

    /// Canvas `font` shorthand, e.g. `14px Arial`
    #[must_use]
    pub fn font(&self) -> String {
        format!("{}px {}", self.font_size, self.font_family)
    }
}

/// 2D affine transformation matrix `[a, b, c, d, e, f]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub matrix: [f64; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    /// Identity transform
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    /// Translation transform
    #[must_use]
    pub const fn translate(x: f64, y: f64) -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    /// Rotation transform (radians)
    #[must_use]
    pub fn rotate(angle: f64) -> Self {
        let c = angle.cos();
        let s = angle.sin();
        Self {
            matrix: [c, s, -s, c, 0.0, 0.0],
        }
    }

    /// Apply `local` inside this transform, the way a canvas composes
    /// `translate()` followed by `rotate()`
    #[must_use]
    pub fn then(&self, local: &Self) -> Self {
        let [a1, b1, c1, d1, e1, f1] = self.matrix;
        let [a2, b2, c2, d2, e2, f2] = local.matrix;
        Self {
            matrix: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * e2 + c1 * f2 + e1,
                b1 * e2 + d1 * f2 + f1,
            ],
        }
    }

    /// Map a local point to surface coordinates
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        let [a, b, c, d, e, f] = self.matrix;
        Point::new(a * point.x + c * point.y + e, b * point.x + d * point.y + f)
    }
}

/// A single paint operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Clear the whole surface
    Clear { size: Size },
    /// Straight line segment
    Line {
        from: Point,
        to: Point,
        style: StrokeStyle,
    },
    /// Circle, filled and/or outlined
    Circle {
        center: Point,
        radius: f64,
        fill: Option<Color>,
        stroke: Option<StrokeStyle>,
    },
    /// Filled rectangle
    Rect { bounds: Rect, fill: Color },
    /// Text anchored at `position`
    Text {
        content: String,
        position: Point,
        style: TextStyle,
    },
    /// Group of commands drawn under a transform
    Group {
        children: Vec<DrawCommand>,
        transform: Transform2D,
    },
}

impl DrawCommand {
    /// Short operation name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Clear { .. } => "clear",
            Self::Line { .. } => "line",
            Self::Circle { .. } => "circle",
            Self::Rect { .. } => "rect",
            Self::Text { .. } => "text",
            Self::Group { .. } => "group",
        }
    }
}

/// Surface that accepts draw commands
pub trait Canvas {
    /// Paint a command
    fn draw(&mut self, command: DrawCommand);

    /// Current surface size
    fn size(&self) -> Size;
}

/// Canvas that records commands instead of painting.
///
/// Keeps the commands of the current frame (everything since the last
/// [`DrawCommand::Clear`]) plus a running count of every draw call.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    draw_calls: usize,
    size: Size,
}

impl RecordingCanvas {
    /// Create a new recording canvas
    #[must_use]
    pub const fn new(size: Size) -> Self {
        Self {
            commands: Vec::new(),
            draw_calls: 0,
            size,
        }
    }

    /// Commands of the current frame
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Every draw call since creation
    #[must_use]
    pub const fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    /// Change the reported surface size
    pub fn resize(&mut self, size: Size) {
        self.size = size;
    }

    /// Commands of the current frame matching a predicate
    pub fn filter<'a, F>(&'a self, predicate: F) -> impl Iterator<Item = &'a DrawCommand>
    where
        F: Fn(&DrawCommand) -> bool + 'a,
    {
        self.commands.iter().filter(move |c| predicate(c))
    }
}

impl Canvas for RecordingCanvas {
    fn draw(&mut self, command: DrawCommand) {
        self.draw_calls += 1;
        if matches!(command, DrawCommand::Clear { .. }) {
            self.commands.clear();
        }
        self.commands.push(command);
    }

    fn size(&self) -> Size {
        self.size
    }
}
