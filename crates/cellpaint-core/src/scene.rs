//! Scene graph consumed by the renderer and the ray caster.
//!
//! Each layer of the grid is one instanced drawable whose instance `i` is
//! cell `i`. Instances track which of them changed so a renderer only has to
//! re-upload those.

use fnv::FnvHashSet;
use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

use crate::constants::*;
use crate::grid::{CellAttribute, CellDelta, CheckState, GridModel, PaintState};

/// Overlay planes stacked along +z.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Base,
    Check,
}

impl Layer {
    /// World-space z of the layer plane.
    pub fn z(self) -> f32 {
        match self {
            Layer::Base => MAP_LAYER_Z_INDEX * LAYER_Z_STEP,
            Layer::Check => CHECK_LAYER_Z_INDEX * LAYER_Z_STEP,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Layer::Base => "base",
            Layer::Check => "check",
        }
    }
}

/// One axis-aligned quad lying in a plane of constant z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
    pub offset: Vec3,
    pub size: Vec2,
    pub color: Vec4,
    pub visible: bool,
}

impl Instance {
    pub fn transform(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.size.extend(1.0), Quat::IDENTITY, self.offset)
    }

    /// Corners counter-clockwise from bottom-left.
    pub fn corners(&self) -> [Vec3; 4] {
        let h = self.size * 0.5;
        let o = self.offset;
        [
            Vec3::new(o.x - h.x, o.y - h.y, o.z),
            Vec3::new(o.x + h.x, o.y - h.y, o.z),
            Vec3::new(o.x + h.x, o.y + h.y, o.z),
            Vec3::new(o.x - h.x, o.y + h.y, o.z),
        ]
    }
}

/// What a renderer has to push to the GPU for one drawable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InstanceUpload {
    Nothing,
    Full,
    /// Sorted instance indices.
    Partial(Vec<usize>),
}

#[derive(Clone, Debug)]
pub struct InstancedMesh {
    layer: Layer,
    instances: Vec<Instance>,
    dirty: FnvHashSet<usize>,
    full_upload: bool,
}

impl InstancedMesh {
    pub fn new(layer: Layer, instances: Vec<Instance>) -> Self {
        Self {
            layer,
            instances,
            dirty: FnvHashSet::default(),
            full_upload: true,
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn instance(&self, index: usize) -> Option<&Instance> {
        self.instances.get(index)
    }

    pub fn set_color(&mut self, index: usize, color: Vec4) {
        if let Some(inst) = self.instances.get_mut(index) {
            if inst.color != color {
                inst.color = color;
                self.dirty.insert(index);
            }
        }
    }

    pub fn set_visible(&mut self, index: usize, visible: bool) {
        if let Some(inst) = self.instances.get_mut(index) {
            if inst.visible != visible {
                inst.visible = visible;
                self.dirty.insert(index);
            }
        }
    }

    pub fn mark_dirty(&mut self, index: usize) {
        if index < self.instances.len() {
            self.dirty.insert(index);
        } else {
            log::warn!("[scene] {} mesh: dirty index {} out of range", self.layer.name(), index);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.full_upload || !self.dirty.is_empty()
    }

    /// Drain pending changes.
    pub fn take_upload(&mut self) -> InstanceUpload {
        if self.full_upload {
            self.full_upload = false;
            self.dirty.clear();
            return InstanceUpload::Full;
        }
        if self.dirty.is_empty() {
            return InstanceUpload::Nothing;
        }
        let mut indices: Vec<usize> = self.dirty.drain().collect();
        indices.sort_unstable();
        InstanceUpload::Partial(indices)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn from_hex(hex: u32, intensity: f32) -> Self {
        Self {
            color: hex_to_rgba(hex).truncate(),
            intensity,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DrawableId(pub usize);

#[derive(Clone, Debug)]
pub struct Scene {
    drawables: Vec<InstancedMesh>,
    lights: Vec<Light>,
    pub background: Vec4,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            drawables: Vec::new(),
            lights: Vec::new(),
            background: hex_to_rgba(BACK_HEX),
        }
    }
}

impl Scene {
    /// Base layer plus (hidden until checked) check marks, lit by the default rig.
    pub fn for_grid(grid: &GridModel) -> Self {
        let cell_size = grid.cell_size();
        let mut base = Vec::with_capacity(grid.len());
        let mut marks = Vec::with_capacity(grid.len());
        for cell in grid.cells() {
            base.push(Instance {
                offset: cell.position_on(Layer::Base),
                size: cell_size,
                color: base_color(cell.usable, cell.paint),
                visible: true,
            });
            marks.push(Instance {
                offset: cell.position_on(Layer::Check),
                size: cell_size * CHECK_MARK_SCALE,
                color: hex_to_rgba(CHECK_HEX),
                visible: cell.is_checked(),
            });
        }

        let mut scene = Scene::default();
        scene.add_drawable(InstancedMesh::new(Layer::Base, base));
        scene.add_drawable(InstancedMesh::new(Layer::Check, marks));
        scene.add_light(Light::from_hex(LIGHT_A_HEX, 0.8));
        scene.add_light(Light::from_hex(LIGHT_B_HEX, 0.3));
        scene.add_light(Light::from_hex(LIGHT_C_HEX, 0.2));
        scene
    }

    pub fn add_drawable(&mut self, mesh: InstancedMesh) -> DrawableId {
        self.drawables.push(mesh);
        DrawableId(self.drawables.len() - 1)
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn drawables(&self) -> &[InstancedMesh] {
        &self.drawables
    }

    pub fn drawables_mut(&mut self) -> &mut [InstancedMesh] {
        &mut self.drawables
    }

    pub fn drawable(&self, id: DrawableId) -> Option<&InstancedMesh> {
        self.drawables.get(id.0)
    }

    pub fn layer(&self, layer: Layer) -> Option<&InstancedMesh> {
        self.drawables.iter().find(|d| d.layer() == layer)
    }

    pub fn layer_mut(&mut self, layer: Layer) -> Option<&mut InstancedMesh> {
        self.drawables.iter_mut().find(|d| d.layer() == layer)
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    /// Summed light contribution, clamped per channel.
    pub fn ambient(&self) -> Vec3 {
        self.lights
            .iter()
            .fold(Vec3::ZERO, |acc, l| acc + l.color * l.intensity)
            .min(Vec3::ONE)
    }

    /// Mirror grid state changes onto the affected instances only.
    pub fn apply_deltas(&mut self, deltas: &[CellDelta]) {
        for delta in deltas {
            match delta.attribute {
                CellAttribute::Paint(state) => {
                    if let Some(base) = self.layer_mut(Layer::Base) {
                        base.set_color(delta.index, base_color(true, state));
                    }
                }
                CellAttribute::Check(state) => {
                    if let Some(marks) = self.layer_mut(Layer::Check) {
                        marks.set_visible(delta.index, state == CheckState::Checked);
                    }
                }
            }
        }
    }
}

fn base_color(usable: bool, paint: PaintState) -> Vec4 {
    match (usable, paint) {
        (false, _) => hex_to_rgba(MAP_UNUSABLE_BACK_HEX),
        (true, PaintState::Painted) => hex_to_rgba(PAINT_HEX),
        (true, PaintState::Unpainted) => hex_to_rgba(MAP_BACK_HEX),
    }
}
