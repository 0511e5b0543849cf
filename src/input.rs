use crate::constants::{
    DOM_DELTA_LINE, DOM_DELTA_PAGE, DOM_DELTA_PIXEL, TOOL_BUTTON_PREFIX, WHEEL_LINE_PX,
};
use cellpaint_core::{Button, PointerInput, Tool, ViewportRect};

/// Pointer event in client (CSS pixel) coordinates.
#[inline]
pub fn pointer_input(client_x: f64, client_y: f64, dom_button: i16) -> PointerInput {
    PointerInput::new(client_x as f32, client_y as f32, Button::from_dom(dom_button))
}

/// Viewport rect from a bounding client rect.
#[inline]
pub fn viewport_rect(left: f64, top: f64, width: f64, height: f64) -> ViewportRect {
    ViewportRect::new(left as f32, top as f32, width as f32, height as f32)
}

/// Normalize a wheel delta to pixels.
pub fn wheel_delta_px(delta_y: f64, delta_mode: u32, page_height_px: f32) -> f32 {
    let dy = delta_y as f32;
    match delta_mode {
        DOM_DELTA_PIXEL => dy,
        DOM_DELTA_LINE => dy * WHEEL_LINE_PX,
        DOM_DELTA_PAGE => dy * page_height_px,
        _ => dy,
    }
}

/// Tool selected by a toolbar button id such as `tool-check`.
pub fn tool_for_button_id(id: &str) -> Option<Tool> {
    id.strip_prefix(TOOL_BUTTON_PREFIX)?.parse().ok()
}
