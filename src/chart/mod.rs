//! Hand-drawn dashboard charts
//!
//! Charts are drawn with immediate-mode calls on a [`Surface`]. This keeps the geometry (angles, heights, positions) independent of any actual 2D drawing API: a GUI can implement `Surface` on top of its canvas, while tests and tools use a [`DrawList`], which simply records what has been drawn.
//!
//! Every chart clears its surface before drawing, so that drawing the same data twice gives the same result.

pub mod pie;
pub mod bar;
pub mod line;

use std::fmt::{Display, Formatter};

use once_cell::sync::Lazy;

/// A position on a surface, in pixels. The origin is the top-left corner
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle, from its top-left corner
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}


/// A RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const BLACK: Rgba = Rgba([0, 0, 0, 255]);

    /// Parse a CSS color (`#4caf50`, `orange`, `rgb(...)`...)
    pub fn from_css(css: &str) -> Option<Self> {
        match csscolorparser::parse(css) {
            Ok(color) => Some(Rgba([
                channel(color.r as f64),
                channel(color.g as f64),
                channel(color.b as f64),
                channel(color.a as f64),
            ])),
            Err(err) => {
                log::warn!("Invalid color {:?}: {}", css, err);
                None
            },
        }
    }
}

fn channel(value: f64) -> u8 {
    (value.max(0.0).min(1.0) * 255.0).round() as u8
}

impl Display for Rgba {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }
}


/// The colors used by the dashboard
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub complete: Rgba,
    pub incomplete: Rgba,
    pub high_priority: Rgba,
    pub medium_priority: Rgba,
    pub low_priority: Rgba,
    pub line: Rgba,
    pub text: Rgba,
}

fn css_or_black(css: &str) -> Rgba {
    Rgba::from_css(css).unwrap_or(Rgba::BLACK)
}

/// The default dashboard colors: green means done (or not urgent), red means pending (or urgent)
pub static PALETTE: Lazy<Palette> = Lazy::new(|| Palette {
    complete: css_or_black("#4caf50"),
    incomplete: css_or_black("#f44336"),
    high_priority: css_or_black("#f44336"),
    medium_priority: css_or_black("#ff9800"),
    low_priority: css_or_black("#4caf50"),
    line: css_or_black("#42a5f5"),
    text: css_or_black("#000"),
});


/// A 2D drawing area of known pixel dimensions.
///
/// Text is always drawn horizontally centered on its anchor point.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// Erase everything that has been drawn
    fn clear(&mut self);
    /// Fill a circular sector. Angles are in radians, clockwise from the positive x axis (y grows downwards)
    fn fill_wedge(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, color: Rgba);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn fill_text(&mut self, text: &str, anchor: Point, font_px: f64, color: Rgba);
    /// Draw straight segments between consecutive points
    fn stroke_polyline(&mut self, points: &[Point], color: Rgba);
}


/// A drawing call recorded by a [`DrawList`]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Clear,
    Wedge { center: Point, radius: f64, start_angle: f64, end_angle: f64, color: Rgba },
    Rect { rect: Rect, color: Rgba },
    Text { text: String, anchor: Point, font_px: f64, color: Rgba },
    Polyline { points: Vec<Point>, color: Rgba },
}

/// A [`Surface`] that records the drawing calls issued since it has last been cleared
#[derive(Clone, Debug, PartialEq)]
pub struct DrawList {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, ops: Vec::new() }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn wedges(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Wedge { .. }))
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Rect { rect, .. } => Some(rect),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn width(&self) -> f64 { self.width }
    fn height(&self) -> f64 { self.height }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn fill_wedge(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64, color: Rgba) {
        self.ops.push(DrawOp::Wedge { center, radius, start_angle, end_angle, color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.ops.push(DrawOp::Rect { rect, color });
    }

    fn fill_text(&mut self, text: &str, anchor: Point, font_px: f64, color: Rgba) {
        self.ops.push(DrawOp::Text { text: text.to_string(), anchor, font_px, color });
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Rgba) {
        self.ops.push(DrawOp::Polyline { points: points.to_vec(), color });
    }
}
