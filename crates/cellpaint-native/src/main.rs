use cellpaint_core::render::GridRenderer;
use cellpaint_core::{
    border_unusable, Button, GridModel, GridSpec, MeasureConfig, PaintSurface, PointerInput, Tool,
    ViewportRect,
};
use glam::Vec2;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::Key;
use winit::window::WindowBuilder;

// Pixels per wheel "line" when the platform reports line deltas
const WHEEL_LINE_PX: f32 = 40.0;

struct GpuState<'w> {
    window: &'w winit::window::Window,
    surface: wgpu::Surface<'w>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: GridRenderer,
}

impl<'w> GpuState<'w> {
    async fn new(window: &'w winit::window::Window) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Surface reports no formats"))?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            desired_maximum_frame_latency: 2,
            view_formats: vec![],
        };
        surface.configure(&device, &config);
        let renderer = GridRenderer::new(&device, format);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
    }

    fn render(&mut self, paint: &mut PaintSurface) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let (camera, scene) = paint.render_parts();
        self.renderer
            .render(&self.device, &self.queue, &view, camera, scene);
        frame.present();
        Ok(())
    }
}

fn map_button(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Primary,
        MouseButton::Middle => Button::Middle,
        MouseButton::Right => Button::Secondary,
        MouseButton::Back => Button::Other(3),
        MouseButton::Forward => Button::Other(4),
        MouseButton::Other(code) => Button::Other(i16::try_from(code).unwrap_or(i16::MAX)),
    }
}

fn tool_for_key(key: &Key) -> Option<Tool> {
    match key {
        Key::Character(s) => match s.as_str() {
            "1" => Some(Tool::Pencil),
            "2" => Some(Tool::Fill),
            "3" => Some(Tool::Check),
            _ => None,
        },
        _ => None,
    }
}

fn viewport_rect(window: &winit::window::Window) -> ViewportRect {
    let logical = window.inner_size().to_logical::<f32>(window.scale_factor());
    ViewportRect::sized(logical.width, logical.height)
}

fn build_surface(window: &winit::window::Window) -> anyhow::Result<PaintSurface> {
    let config = MeasureConfig::default();
    let spec = GridSpec::default();
    let grid = GridModel::with_unusable(spec, &config, border_unusable(&spec))?;
    Ok(PaintSurface::new(
        grid,
        config,
        viewport_rect(window),
        window.scale_factor() as f32,
    ))
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("cellpaint (native) - 1 pencil, 2 fill, 3 check")
        .build(&event_loop)?;

    let mut paint = build_surface(&window)?;
    let mut state = pollster::block_on(GpuState::new(&window))?;
    let mut tool = Tool::default();
    let mut cursor = Vec2::ZERO;
    log::info!("cellpaint-native started with tool {}", tool);

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => {
                state.resize(size);
                paint.resize(viewport_rect(state.window), state.window.scale_factor() as f32);
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                paint.resize(viewport_rect(state.window), state.window.scale_factor() as f32);
            }
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(state.window.scale_factor());
                cursor = Vec2::new(logical.x, logical.y);
                paint.on_pointer_move(PointerInput::primary(cursor.x, cursor.y), tool.name());
            }
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => {
                let input = PointerInput::new(cursor.x, cursor.y, map_button(button));
                match button_state {
                    ElementState::Pressed => paint.on_pointer_down(input, tool.name()),
                    ElementState::Released if button == MouseButton::Left => {
                        paint.on_pointer_up(input, tool.name())
                    }
                    ElementState::Released => {}
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y * WHEEL_LINE_PX,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                paint.zoom(-dy);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if let Some(t) = tool_for_key(&logical_key) {
                    tool = t;
                    log::info!("[tool] {}", tool);
                }
            }
            _ => {}
        },
        Event::AboutToWait => match state.render(&mut paint) {
            Ok(_) => state.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
            Err(e) => log::warn!("frame skipped: {:?}", e),
        },
        _ => {}
    })?;
    Ok(())
}
