use crate::constants::FRAME_LOG_INTERVAL;
use crate::render;
use cellpaint_core::PaintSurface;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub paint: Rc<RefCell<PaintSurface>>,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,

    pub last_instant: Instant,
    pub frames: u64,
    pub frame_time: Duration,
}

impl FrameContext {
    pub fn new(
        paint: Rc<RefCell<PaintSurface>>,
        canvas: web::HtmlCanvasElement,
        gpu: Option<render::GpuState>,
    ) -> Self {
        Self {
            paint,
            canvas,
            gpu,
            last_instant: Instant::now(),
            frames: 0,
            frame_time: Duration::ZERO,
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        self.frame_time += now - self.last_instant;
        self.last_instant = now;
        self.frames += 1;
        if self.frames % FRAME_LOG_INTERVAL == 0 {
            let avg_ms = self.frame_time.as_secs_f64() * 1000.0 / FRAME_LOG_INTERVAL as f64;
            log::debug!("[frame] {} frames, avg {:.2} ms", self.frames, avg_ms);
            self.frame_time = Duration::ZERO;
        }

        let Some(gpu) = &mut self.gpu else {
            return;
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        // an event handler may still hold the surface
        let Ok(mut paint) = self.paint.try_borrow_mut() else {
            return;
        };
        match gpu.render(&mut paint) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
            Err(e) => log::warn!("[frame] skipped: {:?}", e),
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState> {
    match render::GpuState::new(canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
