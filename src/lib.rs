#![cfg(target_arch = "wasm32")]
//! Browser front-end: mounts the paint surface on `#app-canvas`, routes
//! DOM pointer events into it and drives the WebGPU renderer.
use cellpaint_core::{border_unusable, GridModel, GridSpec, MeasureConfig, PaintSurface, Tool};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("cellpaint-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn build_surface(canvas: &web::HtmlCanvasElement) -> anyhow::Result<PaintSurface> {
    let config = MeasureConfig::default();
    let spec = GridSpec::default();
    let grid = GridModel::with_unusable(spec, &config, border_unusable(&spec))?;
    Ok(PaintSurface::new(
        grid,
        config,
        dom::canvas_rect(canvas),
        dom::device_pixel_ratio(),
    ))
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let paint = Rc::new(RefCell::new(build_surface(&canvas)?));
    let tool = Rc::new(Cell::new(Tool::default()));

    // canvas internal pixel size tracks CSS size * devicePixelRatio
    events::wire_canvas_resize(&canvas, paint.clone());
    events::wire_toolbar(&document, tool.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        paint: paint.clone(),
        tool,
    });

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(paint, canvas, gpu)));
    frame::start_loop(frame_ctx);
    Ok(())
}
