use crate::input;
use cellpaint_core::{Viewport, ViewportRect};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::debug!("[dom] no #{} element to wire", element_id);
    }
}

pub fn device_pixel_ratio() -> f32 {
    web::window().map_or(1.0, |w| w.device_pixel_ratio() as f32)
}

/// The canvas' bounding client rect as a viewport rect.
pub fn canvas_rect(canvas: &web::HtmlCanvasElement) -> ViewportRect {
    let rect = canvas.get_bounding_client_rect();
    input::viewport_rect(rect.left(), rect.top(), rect.width(), rect.height())
}

/// Size the canvas' backing store to the viewport in device pixels.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let (w_px, h_px) = viewport.backing_size();
    if canvas.width() != w_px || canvas.height() != h_px {
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
}

/// Toggle the active class so exactly one toolbar button shows as selected.
pub fn mark_active_button(document: &web::Document, ids: &[&str], active: &str, class: &str) {
    for id in ids {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force(class, *id == active);
        }
    }
}
