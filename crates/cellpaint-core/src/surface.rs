//! Composition root wiring the grid, scene, camera and gesture controller
//! behind the three pointer entry points a host shell calls.

use glam::Vec2;

use crate::camera::{Camera, OrbitControls};
use crate::constants::ENABLE_ORBIT_CONTROLS;
use crate::dimension::{real_from_pixel, MeasureConfig};
use crate::grid::GridModel;
use crate::interaction::{
    Effect, Effects, GestureEvent, InteractionController, InteractionState, Tool,
};
use crate::picker::{pick, pickable_layers, Intersection};
use crate::raycast::{RayCaster, TriangleRayCaster};
use crate::scene::{Layer, Scene};
use crate::viewport::{PointerInput, Viewport, ViewportRect};

/// Layers a pointer can hit, in priority order for equal distances.
const PICK_LAYERS: [Layer; 2] = [Layer::Base, Layer::Check];

pub struct PaintSurface<R: RayCaster = TriangleRayCaster> {
    config: MeasureConfig,
    grid: GridModel,
    scene: Scene,
    camera: Camera,
    orbit: OrbitControls,
    viewport: Viewport,
    controller: InteractionController,
    caster: R,
    last_pointer: Option<Vec2>,
}

impl PaintSurface<TriangleRayCaster> {
    pub fn new(
        grid: GridModel,
        config: MeasureConfig,
        rect: ViewportRect,
        device_pixel_ratio: f32,
    ) -> Self {
        Self::with_caster(grid, config, rect, device_pixel_ratio, TriangleRayCaster)
    }
}

impl<R: RayCaster> PaintSurface<R> {
    pub fn with_caster(
        grid: GridModel,
        config: MeasureConfig,
        rect: ViewportRect,
        device_pixel_ratio: f32,
        caster: R,
    ) -> Self {
        let scene = Scene::for_grid(&grid);
        let camera = Camera::for_grid(grid.field_size(), rect.aspect());
        let orbit = OrbitControls::from_camera(&camera);
        Self {
            config,
            grid,
            scene,
            camera,
            orbit,
            viewport: Viewport::new(rect, device_pixel_ratio),
            controller: InteractionController::new(),
            caster,
            last_pointer: None,
        }
    }

    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Camera and scene for a render pass; the renderer drains dirty instances.
    pub fn render_parts(&mut self) -> (&Camera, &mut Scene) {
        (&self.camera, &mut self.scene)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn interaction(&self) -> &InteractionState {
        self.controller.state()
    }

    pub fn orbit_enabled(&self) -> bool {
        self.orbit.enabled
    }

    pub fn on_pointer_down(&mut self, event: PointerInput, tool: &str) {
        self.dispatch(GestureEvent::PointerDown { button: event.button }, event, tool);
    }

    pub fn on_pointer_move(&mut self, event: PointerInput, tool: &str) {
        self.dispatch(GestureEvent::PointerMove, event, tool);
    }

    pub fn on_pointer_up(&mut self, event: PointerInput, tool: &str) {
        self.dispatch(GestureEvent::PointerUp, event, tool);
    }

    /// Nearest hit under a client-space position.
    pub fn pick_at(&self, pointer: Vec2) -> Option<Intersection> {
        let layers = pickable_layers(&self.scene, &PICK_LAYERS);
        pick(&self.caster, pointer, self.viewport.rect(), &self.camera, &layers)
    }

    pub fn resize(&mut self, rect: ViewportRect, device_pixel_ratio: f32) -> bool {
        self.viewport.resize(rect, device_pixel_ratio, &mut self.camera)
    }

    /// Dolly by a wheel delta in pixels. Ignored while a gesture owns the pointer.
    pub fn zoom(&mut self, delta_px: f32) -> bool {
        let delta = match real_from_pixel(&self.config, f64::from(delta_px)) {
            Ok(d) => d as f32,
            Err(e) => {
                log::warn!("[surface] zoom ignored: {}", e);
                return false;
            }
        };
        if self.orbit.dolly(delta) {
            self.orbit.apply(&mut self.camera);
            true
        } else {
            false
        }
    }

    /// Rotate the camera by a pointer drag in pixels. Ignored while an edit owns the pointer.
    pub fn orbit_drag(&mut self, delta_px: Vec2) -> bool {
        if self.orbit.rotate(delta_px) {
            self.orbit.apply(&mut self.camera);
            true
        } else {
            false
        }
    }

    fn dispatch(&mut self, event: GestureEvent, input: PointerInput, tool: &str) {
        let tool = match tool.parse::<Tool>() {
            Ok(t) => t,
            Err(e) if event == GestureEvent::PointerUp => {
                log::warn!("[surface] {}; finishing gesture anyway", e);
                self.controller.state().active_tool
            }
            Err(e) => {
                log::warn!("[surface] {}; event ignored", e);
                return;
            }
        };

        // layers borrows the scene; release it before applying effects
        let effects = {
            let layers = pickable_layers(&self.scene, &PICK_LAYERS);
            let caster = &self.caster;
            let rect = self.viewport.rect();
            let camera = &self.camera;
            self.controller.handle(event, tool, &self.grid, || {
                pick(caster, input.position, rect, camera, &layers)
            })
        };

        self.track_orbit_drag(event, input.position);
        self.apply(effects);
    }

    fn track_orbit_drag(&mut self, event: GestureEvent, position: Vec2) {
        let state = *self.controller.state();
        match event {
            GestureEvent::PointerDown { .. } if state.pointer_down => {
                self.last_pointer = Some(position);
            }
            GestureEvent::PointerMove if state.pointer_down => {
                if let Some(last) = self.last_pointer.replace(position) {
                    if !state.over_grid {
                        self.orbit_drag(position - last);
                    }
                }
            }
            GestureEvent::PointerUp => self.last_pointer = None,
            _ => {}
        }
    }

    fn apply(&mut self, effects: Effects) {
        for effect in effects {
            let result = match effect {
                Effect::Paint(index) => self.grid.set_painted(index).map(|_| ()),
                Effect::Check(index) => self.grid.set_checked(index).map(|_| ()),
                Effect::SetOrbitEnabled(enabled) => {
                    self.orbit.enabled = enabled && ENABLE_ORBIT_CONTROLS;
                    Ok(())
                }
            };
            if let Err(e) = result {
                log::warn!("[surface] {:?} failed: {}", effect, e);
            }
        }
        if self.grid.has_pending_deltas() {
            let deltas = self.grid.take_deltas();
            self.scene.apply_deltas(&deltas);
        }
    }
}
