//! Marker placement and removal over a caller-owned marker list.
//!
//! Ids are always the dense run `1..=len` in insertion order. Removing a
//! marker renumbers everything after it, so ids are not stable across
//! deletions.

use crate::config::ViewerConfig;
use crate::gesture::Gesture;
use crate::models::{Marker, Point, Rect};

/// Result of a click on the image surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    Added(Marker),
    /// The list is already at capacity.
    Full,
    /// The press travelled far enough to count as a pan.
    Dragged,
    /// The target box has no area, so there is nothing to place against.
    OutOfBounds,
}

/// Convert a click in client pixels to percentages of `bounds`, clamped to
/// `0..=100`. Returns `None` if `bounds` has no area.
pub fn normalize_click(click: Point, bounds: Rect) -> Option<Point> {
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return None;
    }
    let x = (click.x - bounds.left) / bounds.width * 100.0;
    let y = (click.y - bounds.top) / bounds.height * 100.0;
    Some(Point::new(x.clamp(0.0, 100.0), y.clamp(0.0, 100.0)))
}

/// Handle a click: append a marker unless the list is full or the press was
/// really a drag.
pub fn place_marker(
    markers: &mut Vec<Marker>,
    click: Point,
    bounds: Rect,
    gesture: Gesture,
    config: &ViewerConfig,
) -> Placement {
    if markers.len() >= config.max_markers {
        tracing::debug!(count = markers.len(), "marker list full, click ignored");
        return Placement::Full;
    }

    if gesture.is_drag(config.click_slop_px) {
        tracing::debug!(travel = ?gesture.travel(), "press was a drag, no marker");
        return Placement::Dragged;
    }

    let Some(pos) = normalize_click(click, bounds) else {
        return Placement::OutOfBounds;
    };

    let marker = Marker {
        id: markers.len() as u32 + 1,
        x: pos.x,
        y: pos.y,
    };
    markers.push(marker);
    tracing::debug!(id = marker.id, x = marker.x, y = marker.y, "marker added");
    Placement::Added(marker)
}

/// Remove the marker with `id` and close the gap in the numbering.
/// Returns whether a marker was removed; an unknown id leaves the list as is.
pub fn remove_marker(markers: &mut Vec<Marker>, id: u32) -> bool {
    let before = markers.len();
    markers.retain(|m| m.id != id);
    renumber(markers);
    let removed = markers.len() != before;
    tracing::debug!(id, removed, remaining = markers.len(), "marker removal");
    removed
}

/// Reassign ids by position: the k-th marker gets id k.
pub fn renumber(markers: &mut [Marker]) {
    for (i, marker) in markers.iter_mut().enumerate() {
        marker.id = i as u32 + 1;
    }
}

/// Check that ids are exactly `1..=len` in order.
pub fn is_dense(markers: &[Marker]) -> bool {
    markers
        .iter()
        .enumerate()
        .all(|(i, m)| m.id == i as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: f64 = 400.0;
    const H: f64 = 300.0;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, W, H)
    }

    fn click_gesture(from: Point, to: Point) -> Gesture {
        let mut g = Gesture::default();
        g.begin(from);
        g.track(to);
        g
    }

    fn marker(id: u32, x: f64, y: f64) -> Marker {
        Marker { id, x, y }
    }

    // --- normalize_click ---

    #[test]
    fn test_normalize_corners_and_centre() {
        assert_eq!(
            normalize_click(Point::new(0.0, 0.0), bounds()),
            Some(Point::new(0.0, 0.0))
        );
        assert_eq!(
            normalize_click(Point::new(W, H), bounds()),
            Some(Point::new(100.0, 100.0))
        );
        assert_eq!(
            normalize_click(Point::new(W / 2.0, H / 2.0), bounds()),
            Some(Point::new(50.0, 50.0))
        );
    }

    #[test]
    fn test_normalize_offsets_by_box_origin() {
        let b = Rect::new(100.0, 50.0, 200.0, 100.0);
        assert_eq!(
            normalize_click(Point::new(150.0, 75.0), b),
            Some(Point::new(25.0, 25.0))
        );
    }

    #[test]
    fn test_normalize_clamps_outside_clicks() {
        assert_eq!(
            normalize_click(Point::new(-40.0, 900.0), bounds()),
            Some(Point::new(0.0, 100.0))
        );
    }

    #[test]
    fn test_normalize_rejects_empty_box() {
        assert_eq!(
            normalize_click(Point::new(1.0, 1.0), Rect::new(0.0, 0.0, 0.0, 100.0)),
            None
        );
    }

    // --- place_marker ---

    #[test]
    fn test_place_assigns_next_id() {
        let config = ViewerConfig::default();
        let mut markers = vec![];
        let p = Point::new(100.0, 150.0);
        let first = place_marker(&mut markers, p, bounds(), click_gesture(p, p), &config);
        assert_eq!(first, Placement::Added(marker(1, 25.0, 50.0)));
        let second = place_marker(&mut markers, p, bounds(), Gesture::default(), &config);
        assert!(matches!(second, Placement::Added(Marker { id: 2, .. })));
        assert_eq!(markers.len(), 2);
    }

    #[test]
    fn test_small_travel_still_places() {
        let config = ViewerConfig::default();
        let mut markers = vec![];
        let g = click_gesture(Point::new(100.0, 100.0), Point::new(105.0, 100.0));
        let result = place_marker(&mut markers, Point::new(105.0, 100.0), bounds(), g, &config);
        assert!(matches!(result, Placement::Added(_)));
    }

    #[test]
    fn test_drag_suppresses_marker() {
        let config = ViewerConfig::default();
        let mut markers = vec![];
        let g = click_gesture(Point::new(100.0, 100.0), Point::new(115.0, 100.0));
        let result = place_marker(&mut markers, Point::new(115.0, 100.0), bounds(), g, &config);
        assert_eq!(result, Placement::Dragged);
        assert!(markers.is_empty());
    }

    #[test]
    fn test_capacity_is_enforced() {
        let config = ViewerConfig::default();
        let mut markers = vec![];
        for i in 0..25 {
            let p = Point::new(i as f64 * 10.0, 10.0);
            place_marker(&mut markers, p, bounds(), Gesture::default(), &config);
        }
        assert_eq!(markers.len(), 20);
        let snapshot = markers.clone();
        let result = place_marker(
            &mut markers,
            Point::new(1.0, 1.0),
            bounds(),
            Gesture::default(),
            &config,
        );
        assert_eq!(result, Placement::Full);
        assert_eq!(markers, snapshot);
    }

    #[test]
    fn test_capacity_follows_config() {
        let config = ViewerConfig {
            max_markers: 2,
            ..ViewerConfig::default()
        };
        let mut markers = vec![marker(1, 0.0, 0.0), marker(2, 1.0, 1.0)];
        let result = place_marker(
            &mut markers,
            Point::new(5.0, 5.0),
            bounds(),
            Gesture::default(),
            &config,
        );
        assert_eq!(result, Placement::Full);
    }

    #[test]
    fn test_place_against_empty_box() {
        let config = ViewerConfig::default();
        let mut markers = vec![];
        let result = place_marker(
            &mut markers,
            Point::new(5.0, 5.0),
            Rect::default(),
            Gesture::default(),
            &config,
        );
        assert_eq!(result, Placement::OutOfBounds);
        assert!(markers.is_empty());
    }

    // --- remove_marker ---

    #[test]
    fn test_remove_middle_renumbers_and_keeps_coords() {
        let mut markers = vec![
            marker(1, 10.0, 10.0),
            marker(2, 20.0, 20.0),
            marker(3, 30.0, 30.0),
        ];
        assert!(remove_marker(&mut markers, 2));
        assert_eq!(markers, vec![marker(1, 10.0, 10.0), marker(2, 30.0, 30.0)]);
    }

    #[test]
    fn test_remove_first() {
        let mut markers = vec![marker(1, 10.0, 10.0), marker(2, 20.0, 20.0)];
        assert!(remove_marker(&mut markers, 1));
        assert_eq!(markers, vec![marker(1, 20.0, 20.0)]);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut markers = vec![marker(1, 10.0, 10.0), marker(2, 20.0, 20.0)];
        let before = markers.clone();
        assert!(!remove_marker(&mut markers, 7));
        assert_eq!(markers, before);
    }

    #[test]
    fn test_remove_from_empty() {
        let mut markers: Vec<Marker> = vec![];
        assert!(!remove_marker(&mut markers, 1));
        assert!(markers.is_empty());
    }

    #[test]
    fn test_renumber_closes_gaps() {
        let mut markers = vec![marker(4, 1.0, 1.0), marker(9, 2.0, 2.0)];
        assert!(!is_dense(&markers));
        renumber(&mut markers);
        assert!(is_dense(&markers));
        assert_eq!(markers[1], marker(2, 2.0, 2.0));
    }
}
