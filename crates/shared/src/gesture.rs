use crate::models::Point;

/// Pointer travel of a single press, from pointer-down to the last known
/// position (last move while dragging, or pointer-up).
///
/// The click that ends a press arrives after pointer-up, so the gesture is
/// kept until that click consumes it with [`Gesture::take`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Gesture {
    pub start: Option<Point>,
    pub end: Option<Point>,
}

impl Gesture {
    pub fn begin(&mut self, at: Point) {
        self.start = Some(at);
        self.end = None;
    }

    /// Record the latest pointer position. Ignored if no press is in progress.
    pub fn track(&mut self, at: Point) {
        if self.start.is_some() {
            self.end = Some(at);
        }
    }

    /// Total travel from start to end, if both are known.
    pub fn travel(&self) -> Option<Point> {
        Some(self.end? - self.start?)
    }

    /// True when either axis moved at least `slop` pixels.
    pub fn is_drag(&self, slop: f64) -> bool {
        match self.travel() {
            Some(d) => d.x.abs() >= slop || d.y.abs() >= slop,
            None => false,
        }
    }

    /// Hand the gesture over and start fresh.
    pub fn take(&mut self) -> Gesture {
        std::mem::take(self)
    }
}
