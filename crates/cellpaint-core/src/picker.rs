//! Pointer -> cell picking.

use glam::{Vec2, Vec3};
use smallvec::SmallVec;

use crate::camera::Camera;
use crate::raycast::RayCaster;
use crate::scene::{InstancedMesh, Layer, Scene};
use crate::viewport::{pointer_to_ndc, ViewportRect};

/// Nearest hit of a pick, valid for the pointer event that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Intersection {
    pub layer: Layer,
    pub instance_index: usize,
    pub world_point: Vec3,
}

/// Resolve the drawables for `layers` in the given order, skipping absent ones.
pub fn pickable_layers<'a>(scene: &'a Scene, layers: &[Layer]) -> SmallVec<[&'a InstancedMesh; 2]> {
    layers.iter().filter_map(|l| scene.layer(*l)).collect()
}

/// Cast the ray under `pointer` (client coordinates) and return the nearest
/// hit across `layers`, or `None` when the pointer is off every drawable.
pub fn pick<R: RayCaster + ?Sized>(
    caster: &R,
    pointer: Vec2,
    viewport: &ViewportRect,
    camera: &Camera,
    layers: &[&InstancedMesh],
) -> Option<Intersection> {
    if viewport.is_empty() || layers.is_empty() {
        return None;
    }
    let ndc = pointer_to_ndc(pointer, viewport);
    let hits = caster.intersect(camera, ndc, layers);
    let hit = hits.first()?;
    let mesh = layers.get(hit.drawable)?;
    Some(Intersection {
        layer: mesh.layer(),
        instance_index: hit.instance,
        world_point: hit.point,
    })
}
