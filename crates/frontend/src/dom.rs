use floorplan_shared::models::{Point, Rect, Size};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Client coordinates from a Dioxus mouse event as a core `Point`.
pub fn client_point(client: dioxus::html::geometry::ClientPoint) -> Point {
    Point::new(client.x, client.y)
}

/// Bounding client rect of the element with `id`.
pub fn element_rect(id: &str) -> Option<Rect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(id)?;
    let rect = element.get_bounding_client_rect();
    Some(Rect::new(rect.left(), rect.top(), rect.width(), rect.height()))
}

/// Natural pixel size of the `<img>` with `id`, once it has finished loading.
pub fn image_natural_size(id: &str) -> Option<Size> {
    let document = web_sys::window()?.document()?;
    let img = document
        .get_element_by_id(id)?
        .dyn_into::<web_sys::HtmlImageElement>()
        .ok()?;
    if !img.complete() || img.natural_width() == 0 {
        return None;
    }
    Some(Size::new(
        img.natural_width() as f64,
        img.natural_height() as f64,
    ))
}

/// A window `resize` listener that is removed when dropped.
pub struct ResizeSubscription {
    window: web_sys::Window,
    callback: Closure<dyn FnMut()>,
}

impl ResizeSubscription {
    pub fn attach(on_resize: impl FnMut() + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let callback = Closure::<dyn FnMut()>::new(on_resize);
        window
            .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
            .ok()?;
        Some(ResizeSubscription { window, callback })
    }
}

impl Drop for ResizeSubscription {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref());
    }
}
