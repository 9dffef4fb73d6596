//! Self-contained viewer: owns the viewport and the canonical marker list,
//! and tells a listener about every change to the list.

use crate::config::ViewerConfig;
use crate::markers::{self, Placement};
use crate::models::{Marker, Point, Rect, Size};
use crate::viewport::Viewport;

type MarkersListener = Box<dyn FnMut(&[Marker])>;

pub struct FloorPlan {
    viewport: Viewport,
    markers: Vec<Marker>,
    config: ViewerConfig,
    listener: Option<MarkersListener>,
}

impl Default for FloorPlan {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl std::fmt::Debug for FloorPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FloorPlan")
            .field("viewport", &self.viewport)
            .field("markers", &self.markers)
            .field("config", &self.config)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl FloorPlan {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            viewport: Viewport::from_config(&config),
            markers: Vec::new(),
            config,
            listener: None,
        }
    }

    /// Register the change listener. It receives the full list after every
    /// add and every removal request. Replaces any previous listener.
    pub fn on_markers_change(&mut self, listener: impl FnMut(&[Marker]) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    fn notify(&mut self) {
        debug_assert!(markers::is_dense(&self.markers));
        if let Some(listener) = self.listener.as_mut() {
            listener(&self.markers);
        }
    }

    // --- pointer input ---

    pub fn pointer_down(&mut self, at: Point) {
        self.viewport.pointer_down(at);
    }

    pub fn pointer_move(&mut self, at: Point) -> bool {
        self.viewport.pointer_move(at)
    }

    pub fn pointer_up(&mut self, at: Point) {
        self.viewport.pointer_up(at);
    }

    pub fn pointer_leave(&mut self) {
        self.viewport.pointer_leave();
    }

    /// A click on the image surface. `container` is the viewport's box in
    /// client pixels; the marker is placed against the transformed image.
    pub fn click(&mut self, at: Point, container: Rect) -> Placement {
        let gesture = self.viewport.take_gesture();
        let bounds = self.viewport.image_bounds(container);
        let placement = markers::place_marker(&mut self.markers, at, bounds, gesture, &self.config);
        if let Placement::Added(_) = placement {
            self.notify();
        }
        placement
    }

    /// Delete by id. The listener is told even if the id was unknown.
    pub fn remove_marker(&mut self, id: u32) -> bool {
        let removed = markers::remove_marker(&mut self.markers, id);
        self.notify();
        removed
    }

    // --- viewport pass-throughs ---

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn toggle_zoom(&mut self) {
        self.viewport.toggle_zoom();
    }

    pub fn resize(&mut self, size: Size) {
        self.viewport.resize(size);
    }

    pub fn image_loaded(&mut self, size: Size) -> bool {
        self.viewport.image_loaded(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const CONTAINER: Rect = Rect {
        left: 0.0,
        top: 0.0,
        width: 400.0,
        height: 300.0,
    };

    fn tap(plan: &mut FloorPlan, at: Point) -> Placement {
        plan.pointer_down(at);
        plan.pointer_up(at);
        plan.click(at, CONTAINER)
    }

    fn recording(plan: &mut FloorPlan) -> Rc<RefCell<Vec<Vec<Marker>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        plan.on_markers_change(move |markers| sink.borrow_mut().push(markers.to_vec()));
        log
    }

    #[test]
    fn test_add_notifies_with_full_list() {
        let mut plan = FloorPlan::default();
        plan.resize(CONTAINER.size());
        let log = recording(&mut plan);

        tap(&mut plan, Point::new(200.0, 150.0));
        tap(&mut plan, Point::new(0.0, 0.0));

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].len(), 2);
        assert_eq!(log[1][0].id, 1);
        assert_eq!(log[1][1].id, 2);
    }

    #[test]
    fn test_rejected_click_does_not_notify() {
        let mut plan = FloorPlan::default();
        plan.resize(CONTAINER.size());
        let log = recording(&mut plan);

        plan.pointer_down(Point::new(100.0, 100.0));
        plan.pointer_up(Point::new(130.0, 100.0));
        assert_eq!(plan.click(Point::new(130.0, 100.0), CONTAINER), Placement::Dragged);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_remove_notifies_even_when_unknown() {
        let mut plan = FloorPlan::default();
        tap(&mut plan, Point::new(10.0, 10.0));
        let log = recording(&mut plan);

        assert!(!plan.remove_marker(42));
        assert!(plan.remove_marker(1));
        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].len(), 1);
        assert!(log[1].is_empty());
    }

    #[test]
    fn test_click_uses_zoomed_image_bounds() {
        let mut plan = FloorPlan::default();
        plan.resize(CONTAINER.size());
        plan.image_loaded(Size::new(1600.0, 900.0));
        plan.zoom_in();

        // At 2x the image spans (-200,-150)..(600,450); the container centre
        // is still the image centre.
        let placed = tap(&mut plan, Point::new(200.0, 150.0));
        assert_eq!(
            placed,
            Placement::Added(Marker {
                id: 1,
                x: 50.0,
                y: 50.0
            })
        );
        // The container's top-left corner is a quarter of the way in.
        let placed = tap(&mut plan, Point::new(0.0, 0.0));
        assert_eq!(
            placed,
            Placement::Added(Marker {
                id: 2,
                x: 25.0,
                y: 25.0
            })
        );
    }

    #[test]
    fn test_each_click_consumes_the_gesture() {
        let mut plan = FloorPlan::default();
        plan.pointer_down(Point::new(0.0, 0.0));
        plan.pointer_up(Point::new(50.0, 0.0));
        assert_eq!(plan.click(Point::new(50.0, 0.0), CONTAINER), Placement::Dragged);
        // A click with no new press is treated as a plain click.
        assert!(matches!(
            plan.click(Point::new(50.0, 0.0), CONTAINER),
            Placement::Added(_)
        ));
    }

    #[test]
    fn test_debug_hides_listener() {
        let mut plan = FloorPlan::default();
        plan.on_markers_change(|_| {});
        let text = format!("{plan:?}");
        assert!(text.contains("listener: true"));
    }
}
