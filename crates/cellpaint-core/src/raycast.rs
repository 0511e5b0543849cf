//! Ray queries against instanced drawables.

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::scene::InstancedMesh;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// One intersection between a ray and an instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Position of the drawable in the slice handed to the caster.
    pub drawable: usize,
    pub instance: usize,
    pub distance: f32,
    pub point: Vec3,
}

/// The ray-casting query the picker delegates to.
pub trait RayCaster {
    /// All hits of the ray through `ndc`, nearest first.
    fn intersect(&self, camera: &Camera, ndc: Vec2, drawables: &[&InstancedMesh]) -> Vec<RayHit>;
}

/// Tests both triangles of every visible instance.
#[derive(Clone, Copy, Debug, Default)]
pub struct TriangleRayCaster;

impl RayCaster for TriangleRayCaster {
    fn intersect(&self, camera: &Camera, ndc: Vec2, drawables: &[&InstancedMesh]) -> Vec<RayHit> {
        let ray = camera.ray_from_ndc(ndc);
        let mut hits = Vec::new();
        for (d, mesh) in drawables.iter().enumerate() {
            for (i, inst) in mesh.instances().iter().enumerate() {
                if !inst.visible {
                    continue;
                }
                let [a, b, c, e] = inst.corners();
                let t = ray_triangle(ray.origin, ray.direction, a, b, c)
                    .or_else(|| ray_triangle(ray.origin, ray.direction, a, c, e));
                if let Some(t) = t {
                    hits.push(RayHit {
                        drawable: d,
                        instance: i,
                        distance: t,
                        point: ray.at(t),
                    });
                }
            }
        }
        // stable: equal distances keep drawable/instance order
        hits.sort_by(|x, y| x.distance.total_cmp(&y.distance));
        hits
    }
}

/// Möller–Trumbore. Returns the ray parameter of the hit, if in front of the origin.
#[inline]
pub fn ray_triangle(ray_origin: Vec3, ray_dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    const EPS: f32 = 1e-9;
    let e1 = b - a;
    let e2 = c - a;
    let p = ray_dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < EPS {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray_origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray_dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}
