use egui::{Color32, Pos2, Rect, Vec2};

use crate::tool::Tool;

/// A fill color as the user picked it, e.g. `#ff0000`.
///
/// The string is kept verbatim so that it survives a storage round-trip
/// unchanged. It is parsed once, when the value is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ColorValue {
    raw: String,
    /// `None` if `raw` is not a color we understand.
    fill: Option<Color32>,
}

impl ColorValue {
    /// Accepts `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn new(value: impl Into<String>) -> Self {
        let raw = value.into();
        let fill = match Color32::from_hex(raw.trim()) {
            Ok(color) => Some(color),
            Err(err) => {
                log::warn!("Unparseable color {:?} will paint as black: {:?}", raw, err);
                None
            }
        };
        Self { raw, fill }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Lowercase `#rrggbb`, the way a color input reports its value.
    pub fn from_color32(color: Color32) -> Self {
        Self {
            raw: format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b()),
            fill: Some(Color32::from_rgb(color.r(), color.g(), color.b())),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.fill.is_some()
    }

    /// The parsed color. Anything unparseable paints as opaque black.
    pub fn to_color32(&self) -> Color32 {
        self.fill.unwrap_or(Color32::BLACK)
    }
}

impl From<String> for ColorValue {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<ColorValue> for String {
    fn from(value: ColorValue) -> Self {
        value.raw
    }
}

impl Default for ColorValue {
    fn default() -> Self {
        Self::new("#FF0000")
    }
}

impl From<&str> for ColorValue {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for ColorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// A filled shape on the canvas. All coordinates are device pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        center: Pos2,
        /// Never negative: it is always a distance.
        radius: f32,
        color: ColorValue,
    },
    Rectangle {
        origin: Pos2,
        /// May be negative, in which case the rectangle extends left/up from `origin`.
        size: Vec2,
        color: ColorValue,
    },
}

impl Shape {
    /// The zero-sized shape a gesture starts with.
    pub fn begin(tool: Tool, color: ColorValue, at: Pos2) -> Self {
        match tool {
            Tool::Circle => Self::Circle {
                center: at,
                radius: 0.0,
                color,
            },
            Tool::Rectangle => Self::Rectangle {
                origin: at,
                size: Vec2::ZERO,
                color,
            },
        }
    }

    /// Recompute the geometry for a drag from `start` to `current`.
    ///
    /// Always relative to where the gesture began, never to the previous move.
    pub fn drag_to(&mut self, start: Pos2, current: Pos2) {
        match self {
            Self::Circle { radius, .. } => {
                *radius = start.distance(current);
            }
            Self::Rectangle { origin, size, .. } => {
                *size = current - *origin;
            }
        }
    }

    pub fn color(&self) -> &ColorValue {
        match self {
            Self::Circle { color, .. } | Self::Rectangle { color, .. } => color,
        }
    }

    /// The area the shape covers, with negative rectangle sizes normalized.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Circle { center, radius, .. } => {
                Rect::from_center_size(*center, Vec2::splat(radius.max(0.0) * 2.0))
            }
            Self::Rectangle { origin, size, .. } => Rect::from_two_pos(*origin, *origin + *size),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Circle { .. } => "circle",
            Self::Rectangle { .. } => "rectangle",
        }
    }
}
