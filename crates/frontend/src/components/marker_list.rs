use dioxus::prelude::*;
use floorplan_shared::models::Marker;

/// Pretty-printed JSON export of the current markers.
fn markers_json(markers: &[Marker]) -> String {
    serde_json::to_string_pretty(markers).unwrap_or_else(|_| "[]".to_string())
}

#[component]
pub fn MarkerList(markers: Vec<Marker>, on_remove: EventHandler<u32>) -> Element {
    if markers.is_empty() {
        return rsx! {};
    }
    let json = markers_json(&markers);
    let entries: Vec<(u32, String)> = markers.iter().map(|m| (m.id, m.coords_label())).collect();

    rsx! {
        div { class: "panel marker-list",
            h3 { "マーカー一覧" }
            ul {
                for (id, coords) in entries {
                    li { key: "{id}", class: "marker-entry",
                        span { class: "marker-name", "マーカー {id}" }
                        span { class: "marker-coords", "座標: {coords}" }
                        button {
                            class: "secondary",
                            onclick: move |_| on_remove.call(id),
                            "削除"
                        }
                    }
                }
            }
            button {
                class: "secondary",
                onclick: move |_| {
                    let json = json.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        if let Some(window) = web_sys::window() {
                            let clipboard = window.navigator().clipboard();
                            let _ = wasm_bindgen_futures::JsFuture::from(
                                clipboard.write_text(&json)
                            ).await;
                        }
                    });
                },
                "Copy JSON"
            }
        }
    }
}
