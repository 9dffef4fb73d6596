//! Zoom, pan and layout geometry for the floor-plan image.
//!
//! The viewer has exactly two zoom levels. Panning is only possible while
//! zoomed, and the pan offset is always measured from the container centre.

use crate::config::{ViewerConfig, FALLBACK_HEIGHT_PX};
use crate::gesture::Gesture;
use crate::models::{Marker, Point, Rect, Size};

/// Vertical pan budget multiplier when the image is wider (relative to its
/// height) than the container.
const WIDE_IMAGE_PAN_FACTOR: f64 = 1.5;

/// Vertical pan budget multiplier otherwise.
const TALL_IMAGE_PAN_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomLevel {
    Fit,
    Zoomed,
}

impl ZoomLevel {
    pub fn factor(self) -> f64 {
        match self {
            ZoomLevel::Fit => 1.0,
            ZoomLevel::Zoomed => 2.0,
        }
    }
}

/// Interaction state. Zoom level, pan offset and drag status are all read
/// off this one value so they can never disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewState {
    Fit,
    Zoomed { offset: Point },
    /// `anchor` is the pointer position minus the offset at press time.
    Dragging { offset: Point, anchor: Point },
}

/// Translation and scale to apply to the image layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageTransform {
    /// Image size as a percentage of the container (100 or 200).
    pub scale_percent: f64,
    /// Image centre, relative to the container's top-left corner.
    pub translate: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    state: ViewState,
    gesture: Gesture,
    image_size: Option<Size>,
    container_size: Size,
    fallback_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(FALLBACK_HEIGHT_PX)
    }
}

impl Viewport {
    pub fn new(fallback_height: f64) -> Self {
        Self {
            state: ViewState::Fit,
            gesture: Gesture::default(),
            image_size: None,
            container_size: Size::default(),
            fallback_height,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(config.fallback_height_px)
    }

    // --- derived state ---

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn zoom(&self) -> ZoomLevel {
        match self.state {
            ViewState::Fit => ZoomLevel::Fit,
            ViewState::Zoomed { .. } | ViewState::Dragging { .. } => ZoomLevel::Zoomed,
        }
    }

    pub fn pan_offset(&self) -> Point {
        match self.state {
            ViewState::Fit => Point::ORIGIN,
            ViewState::Zoomed { offset } | ViewState::Dragging { offset, .. } => offset,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ViewState::Dragging { .. })
    }

    /// The "+" button is offered only at fit; "-" only while zoomed.
    pub fn shows_zoom_in(&self) -> bool {
        self.zoom() == ZoomLevel::Fit
    }

    /// CSS cursor for the container.
    pub fn cursor(&self) -> &'static str {
        match self.state {
            ViewState::Fit => "default",
            ViewState::Zoomed { .. } => "grab",
            ViewState::Dragging { .. } => "grabbing",
        }
    }

    pub fn image_size(&self) -> Option<Size> {
        self.image_size
    }

    pub fn container_size(&self) -> Size {
        self.container_size
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    // --- zoom ---

    pub fn zoom_in(&mut self) {
        tracing::debug!(from = ?self.zoom(), "zoom in");
        self.state = ViewState::Zoomed {
            offset: Point::ORIGIN,
        };
    }

    pub fn zoom_out(&mut self) {
        tracing::debug!(from = ?self.zoom(), "zoom out");
        self.state = ViewState::Fit;
    }

    pub fn toggle_zoom(&mut self) {
        match self.zoom() {
            ZoomLevel::Fit => self.zoom_in(),
            ZoomLevel::Zoomed => self.zoom_out(),
        }
    }

    // --- pointer protocol ---

    pub fn pointer_down(&mut self, at: Point) {
        self.gesture.begin(at);
        if let ViewState::Zoomed { offset } | ViewState::Dragging { offset, .. } = self.state {
            self.state = ViewState::Dragging {
                offset,
                anchor: at - offset,
            };
        }
    }

    /// Returns true if the pan offset changed.
    pub fn pointer_move(&mut self, at: Point) -> bool {
        let ViewState::Dragging { offset, anchor } = self.state else {
            return false;
        };
        self.gesture.track(at);
        let next = self.clamp_pan(at - anchor);
        self.state = ViewState::Dragging {
            offset: next,
            anchor,
        };
        next != offset
    }

    pub fn pointer_up(&mut self, at: Point) {
        self.gesture.track(at);
        self.end_drag();
    }

    /// Leaving the container ends a drag but keeps the gesture as it was.
    pub fn pointer_leave(&mut self) {
        self.end_drag();
    }

    fn end_drag(&mut self) {
        if let ViewState::Dragging { offset, .. } = self.state {
            self.state = ViewState::Zoomed { offset };
        }
    }

    /// Hand the current press over to click handling.
    pub fn take_gesture(&mut self) -> Gesture {
        self.gesture.take()
    }

    // --- pan limits ---

    /// Largest absolute pan offset allowed on each axis at the current zoom.
    pub fn pan_limits(&self) -> Point {
        let extra = self.zoom().factor() - 1.0;
        let Size { width, height } = self.container_size;
        let max_x = width * extra / 2.0;
        let max_y = height * extra / 2.0;

        let container_ratio = width / height;
        let factor = if self.aspect_ratio() > container_ratio {
            WIDE_IMAGE_PAN_FACTOR
        } else {
            TALL_IMAGE_PAN_FACTOR
        };

        Point::new(max_x, max_y * factor)
    }

    pub fn clamp_pan(&self, candidate: Point) -> Point {
        let max = self.pan_limits();
        Point::new(
            candidate.x.clamp(-max.x, max.x),
            candidate.y.clamp(-max.y, max.y),
        )
    }

    // --- dimensions ---

    /// Record the container's measured size. Later calls simply overwrite.
    pub fn resize(&mut self, size: Size) {
        self.container_size = size;
    }

    /// Record the image's natural size. A zero size (failed decode) is
    /// ignored so the layout stays on its defaults. Returns true if stored.
    pub fn image_loaded(&mut self, size: Size) -> bool {
        if size.aspect_ratio().is_none() {
            tracing::debug!(?size, "ignoring empty image size");
            return false;
        }
        if self.image_size != Some(size) {
            tracing::info!(width = size.width, height = size.height, "floor plan image loaded");
            self.image_size = Some(size);
        }
        true
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.image_size
            .and_then(|s| s.aspect_ratio())
            .unwrap_or(1.0)
    }

    /// Container height for a given width: follows the image's proportions
    /// once known, otherwise a fixed fallback.
    pub fn container_height(&self, width: f64) -> f64 {
        match self.image_size {
            Some(_) => width / self.aspect_ratio(),
            None => self.fallback_height,
        }
    }

    // --- rendered surface ---

    pub fn image_transform(&self) -> ImageTransform {
        let Size { width, height } = self.container_size;
        let pan = self.pan_offset();
        ImageTransform {
            scale_percent: 100.0 * self.zoom().factor(),
            translate: Point::new(width / 2.0 + pan.x, height / 2.0 + pan.y),
        }
    }

    /// Where the transformed image sits on screen, given the container's box.
    pub fn image_bounds(&self, container: Rect) -> Rect {
        let zoom = self.zoom().factor();
        let width = container.width * zoom;
        let height = container.height * zoom;
        let center = container.center() + self.pan_offset();
        Rect::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    /// A marker's position relative to the container's top-left corner.
    pub fn marker_screen_position(&self, marker: &Marker) -> Point {
        let container = Rect::new(
            0.0,
            0.0,
            self.container_size.width,
            self.container_size.height,
        );
        let bounds = self.image_bounds(container);
        Point::new(
            bounds.left + marker.x / 100.0 * bounds.width,
            bounds.top + marker.y / 100.0 * bounds.height,
        )
    }
}
