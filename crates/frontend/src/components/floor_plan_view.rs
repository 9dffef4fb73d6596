use std::rc::Rc;

use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use floorplan_shared::config::ViewerConfig;
use floorplan_shared::markers::{self, Placement};
use floorplan_shared::models::{ImageSource, Marker, Size};
use floorplan_shared::viewport::{Viewport, ZoomLevel};

use crate::dom;

const CONTAINER_ID: &str = "floor-plan-container";
const IMAGE_ID: &str = "floor-plan-image";

/// Re-measure the container. Its height is derived from the width so the
/// box keeps the image's proportions.
fn measure(mut viewport: Signal<Viewport>) {
    let Some(rect) = dom::element_rect(CONTAINER_ID) else {
        return;
    };
    let height = viewport.peek().container_height(rect.width);
    viewport.write().resize(Size::new(rect.width, height));
}

/// Pick up the image's natural size once it has decoded.
fn discover_image_size(mut viewport: Signal<Viewport>) {
    let Some(size) = dom::image_natural_size(IMAGE_ID) else {
        return;
    };
    if viewport.write().image_loaded(size) {
        measure(viewport);
    }
}

/// Zoom factor as shown in the size readout ("1x", "2x").
fn zoom_label(zoom: ZoomLevel) -> String {
    format!("{}x", zoom.factor())
}

#[component]
pub fn FloorPlanView(
    config: ViewerConfig,
    markers: Signal<Vec<Marker>>,
    on_markers_change: EventHandler<Vec<Marker>>,
) -> Element {
    let mut markers = markers;
    let fallback_height = config.fallback_height_px;
    let mut viewport = use_signal(move || Viewport::new(fallback_height));

    // Released with the component.
    let _resize = use_hook(move || Rc::new(dom::ResizeSubscription::attach(move || measure(viewport))));

    let image_src = ImageSource::from(config.image_url.as_str()).src().to_string();
    let click_config = config.clone();

    let vp = viewport.read();
    let transform = vp.image_transform();
    let container = vp.container_size();
    let height = if container.width > 0.0 {
        container.height
    } else {
        config.fallback_height_px
    };
    let cursor = vp.cursor();
    let transition = if vp.zoom() == ZoomLevel::Fit {
        "width 0.3s ease, height 0.3s ease"
    } else {
        "none"
    };
    let layer_style = format!(
        "position: absolute; left: {}px; top: {}px; width: {}%; height: {}%; transform: translate(-50%, -50%); transition: {transition};",
        transform.translate.x, transform.translate.y, transform.scale_percent, transform.scale_percent,
    );
    let pins: Vec<(u32, f64, f64)> = markers
        .read()
        .iter()
        .map(|m| {
            let p = vp.marker_screen_position(m);
            (m.id, p.x, p.y)
        })
        .collect();
    let shows_zoom_in = vp.shows_zoom_in();
    let readout = vp
        .image_size()
        .map(|s| (s.width, s.height, zoom_label(vp.zoom())));
    drop(vp);

    rsx! {
        div { class: "floor-plan",
            h2 { "{config.title}" }
            div {
                id: CONTAINER_ID,
                class: "floor-plan-container",
                style: "height: {height}px; cursor: {cursor};",
                onmounted: move |_| measure(viewport),
                onmousedown: move |evt: Event<MouseData>| {
                    if evt.trigger_button() != Some(MouseButton::Primary) {
                        return;
                    }
                    viewport.write().pointer_down(dom::client_point(evt.client_coordinates()));
                },
                onmousemove: move |evt: Event<MouseData>| {
                    if !viewport.peek().is_dragging() {
                        return;
                    }
                    viewport.write().pointer_move(dom::client_point(evt.client_coordinates()));
                },
                onmouseup: move |evt: Event<MouseData>| {
                    viewport.write().pointer_up(dom::client_point(evt.client_coordinates()));
                },
                onmouseleave: move |_| {
                    if viewport.peek().is_dragging() {
                        viewport.write().pointer_leave();
                    }
                },
                onclick: move |evt: Event<MouseData>| {
                    let at = dom::client_point(evt.client_coordinates());
                    let Some(container) = dom::element_rect(CONTAINER_ID) else {
                        return;
                    };
                    let gesture = viewport.write().take_gesture();
                    let bounds = viewport.peek().image_bounds(container);
                    let placement =
                        markers::place_marker(&mut markers.write(), at, bounds, gesture, &click_config);
                    if let Placement::Added(_) = placement {
                        on_markers_change.call(markers.peek().clone());
                    }
                },

                div { class: "floor-plan-layer", style: "{layer_style}",
                    img {
                        id: IMAGE_ID,
                        src: "{image_src}",
                        alt: "{config.title}",
                        draggable: "false",
                        onmounted: move |_| discover_image_size(viewport),
                        onload: move |_| discover_image_size(viewport),
                    }
                }

                for (id, x, y) in pins {
                    div {
                        key: "{id}",
                        class: "marker-pin",
                        style: "left: {x}px; top: {y}px;",
                        "{id}"
                    }
                }
            }

            div { class: "zoom-buttons",
                if shows_zoom_in {
                    button {
                        class: "zoom-in",
                        onclick: move |_| viewport.write().zoom_in(),
                        "+"
                    }
                } else {
                    button {
                        class: "zoom-out",
                        onclick: move |_| viewport.write().zoom_out(),
                        "-"
                    }
                }
            }

            if let Some((w, h, zoom)) = readout {
                p { class: "size-readout",
                    "画像サイズ: {w} × {h} ピクセル (ズーム: {zoom})"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_label() {
        assert_eq!(zoom_label(ZoomLevel::Fit), "1x");
        assert_eq!(zoom_label(ZoomLevel::Zoomed), "2x");
    }
}
