use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width over height, or `None` if either side is not positive.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width > 0.0 && self.height > 0.0 {
            Some(self.width / self.height)
        } else {
            None
        }
    }
}

/// An axis-aligned box in client pixels, as returned by `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// A numbered point on the floor plan.
///
/// `x` and `y` are percentages (0..=100) of the image's own bounding box, so
/// they stay valid whatever zoom or pan is applied when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    pub id: u32,
    pub x: f64,
    pub y: f64,
}

impl Marker {
    /// Human-readable coordinate text, e.g. `(12.5%, 40.0%)`.
    pub fn coords_label(&self) -> String {
        format!("({:.1}%, {:.1}%)", self.x, self.y)
    }
}

/// Where the floor-plan bytes come from. The viewer only ever needs the
/// `src` string, so a plain URL and an inline data URI are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageSource {
    Url(String),
    DataUri(String),
}

impl ImageSource {
    pub fn src(&self) -> &str {
        match self {
            ImageSource::Url(url) => url,
            ImageSource::DataUri(uri) => uri,
        }
    }
}

impl From<&str> for ImageSource {
    fn from(value: &str) -> Self {
        if value.starts_with("data:") {
            ImageSource::DataUri(value.to_string())
        } else {
            ImageSource::Url(value.to_string())
        }
    }
}
