use dioxus::logger::tracing;
use dioxus::prelude::*;
use floorplan_shared::config::ViewerConfig;
use floorplan_shared::markers;
use floorplan_shared::models::Marker;

use crate::api;
use crate::components::floor_plan_view::FloorPlanView;
use crate::components::marker_list::MarkerList;

#[component]
pub fn Home() -> Element {
    let config_resource = use_resource(|| async {
        match api::fetch_viewer_config().await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("viewer config unavailable, using defaults: {e}");
                ViewerConfig::default()
            }
        }
    });

    // Shared by the viewer and the list
    let mut markers = use_signal(Vec::<Marker>::new);

    let Some(config) = config_resource.read().clone() else {
        return rsx! {
            div { class: "app-container",
                p { class: "loading", "読み込み中..." }
            }
        };
    };

    rsx! {
        div { class: "app-container",
            FloorPlanView {
                config,
                markers,
                on_markers_change: move |current: Vec<Marker>| {
                    tracing::info!(count = current.len(), "markers changed");
                },
            }
            MarkerList {
                markers: markers.read().clone(),
                on_remove: move |id: u32| {
                    markers::remove_marker(&mut markers.write(), id);
                    tracing::info!(count = markers.peek().len(), "marker {id} removed");
                },
            }
        }
    }
}
