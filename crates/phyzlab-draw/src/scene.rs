use crate::{CANVAS_HEIGHT, CANVAS_WIDTH, Vec2};

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    /// CSS color string (`rgb(..)` or `rgba(..)`).
    pub fn css(&self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                self.a as f64 / 255.0
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        from: Vec2,
        to: Vec2,
        stroke: Color,
        width: f64,
    },
    /// Open polyline through `points`.
    Polyline {
        points: Vec<Vec2>,
        stroke: Color,
        width: f64,
    },
    Circle {
        center: Vec2,
        diameter: f64,
        fill: Color,
        stroke: Option<Color>,
    },
    /// Axis-aligned rectangle; `origin` is the top-left corner.
    Rect {
        origin: Vec2,
        size: Vec2,
        fill: Option<Color>,
        stroke: Option<Color>,
        corner_radius: f64,
    },
    Text {
        at: Vec2,
        text: String,
        size: f64,
        fill: Color,
        align: TextAlign,
        /// Rotation about `at`, radians.
        rotation: f64,
    },
}

/// Everything drawn for one frame, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Color,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(width: f64, height: f64, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, stroke: Color, width: f64) {
        self.push(Shape::Line { from, to, stroke, width });
    }

    pub fn text(&mut self, at: Vec2, text: impl Into<String>, size: f64, fill: Color) {
        self.push(Shape::Text {
            at,
            text: text.into(),
            size,
            fill,
            align: TextAlign::Left,
            rotation: 0.0,
        });
    }

    /// All text labels, in paint order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Centers of every circle, in paint order.
    pub fn circle_centers(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Circle { center, .. } => Some(*center),
            _ => None,
        })
    }
}

/// Per-frame input handed to a module by the host loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Monotonic wall-clock time in milliseconds (the host's frame clock).
    pub now_ms: f64,
    pub width: f64,
    pub height: f64,
}

impl FrameContext {
    /// Frame on the default 700×350 surface.
    pub fn at(now_ms: f64) -> Self {
        Self {
            now_ms,
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }

    pub fn blank_scene(&self, background: Color) -> Scene {
        Scene::new(self.width, self.height, background)
    }
}
