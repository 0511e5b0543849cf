use crate::constants::{ACTIVE_TOOL_CLASS, TOOL_BUTTON_IDS, TOOL_BUTTON_PREFIX};
use crate::dom;
use crate::input;
use cellpaint_core::{PaintSurface, Tool};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub paint: Rc<RefCell<PaintSurface>>,
    pub tool: Rc<Cell<Tool>>,
}

/// Keep the surface's viewport in step with the canvas' current client rect.
fn sync_viewport(canvas: &web::HtmlCanvasElement, paint: &mut PaintSurface) {
    paint.resize(dom::canvas_rect(canvas), dom::device_pixel_ratio());
}

pub fn wire_toolbar(document: &web::Document, tool: Rc<Cell<Tool>>) {
    for id in TOOL_BUTTON_IDS {
        let Some(selected) = input::tool_for_button_id(id) else {
            continue;
        };
        let tool_c = tool.clone();
        let doc = document.clone();
        dom::add_click_listener(document, id, move || {
            tool_c.set(selected);
            dom::mark_active_button(&doc, &TOOL_BUTTON_IDS, id, ACTIVE_TOOL_CLASS);
            log::info!("[tool] {}", selected);
        });
    }
    let current = format!("{}{}", TOOL_BUTTON_PREFIX, tool.get());
    dom::mark_active_button(document, &TOOL_BUTTON_IDS, &current, ACTIVE_TOOL_CLASS);
}

fn resize_canvas(canvas: &web::HtmlCanvasElement, paint: &RefCell<PaintSurface>) {
    if let Ok(mut p) = paint.try_borrow_mut() {
        sync_viewport(canvas, &mut p);
        dom::sync_canvas_backing_size(canvas, p.viewport());
    }
}

pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, paint: Rc<RefCell<PaintSurface>>) {
    resize_canvas(canvas, &paint);
    let canvas_resize = canvas.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
        resize_canvas(&canvas_resize, &paint);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

pub fn wire_input_handlers(w: InputWiring) {
    // pointerdown
    {
        let paint_m = w.paint.clone();
        let tool_m = w.tool.clone();
        let canvas_target = w.canvas.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let Ok(mut paint) = paint_m.try_borrow_mut() else {
                return;
            };
            // page may have scrolled since the last resize
            sync_viewport(&canvas_target, &mut paint);
            let event = input::pointer_input(
                f64::from(ev.client_x()),
                f64::from(ev.client_y()),
                ev.button(),
            );
            paint.on_pointer_down(event, tool_m.get().name());
            let _ = canvas_target.set_pointer_capture(ev.pointer_id());
            ev.prevent_default();
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // pointermove
    {
        let paint_m = w.paint.clone();
        let tool_m = w.tool.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let Ok(mut paint) = paint_m.try_borrow_mut() else {
                return;
            };
            let event = input::pointer_input(f64::from(ev.client_x()), f64::from(ev.client_y()), 0);
            paint.on_pointer_move(event, tool_m.get().name());
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ = wnd
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // pointerup
    {
        let paint_m = w.paint.clone();
        let tool_m = w.tool.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let Ok(mut paint) = paint_m.try_borrow_mut() else {
                return;
            };
            let event = input::pointer_input(
                f64::from(ev.client_x()),
                f64::from(ev.client_y()),
                ev.button(),
            );
            paint.on_pointer_up(event, tool_m.get().name());
        }) as Box<dyn FnMut(_)>);
        if let Some(wnd) = web::window() {
            let _ =
                wnd.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
        }
        closure.forget();
    }

    // wheel
    {
        let paint_m = w.paint.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
            let page_px = web::window()
                .and_then(|wnd| wnd.inner_height().ok())
                .and_then(|h| h.as_f64())
                .unwrap_or(800.0) as f32;
            let dy = input::wheel_delta_px(ev.delta_y(), ev.delta_mode(), page_px);
            if let Ok(mut paint) = paint_m.try_borrow_mut() {
                if paint.zoom(dy) {
                    ev.prevent_default();
                }
            }
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
