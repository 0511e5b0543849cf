// Host-side tests for ray casting and picking.

use cellpaint_core::*;
use glam::{Vec2, Vec3};

fn scene_and_camera() -> (GridModel, Scene, Camera) {
    let cfg = MeasureConfig::default().with_scale(1.0);
    let spec = GridSpec {
        columns: 16,
        rows: 8,
        field_width: 16.0,
        field_height: 8.0,
        gap_fraction: 0.1,
    };
    let grid = GridModel::new(spec, &cfg).unwrap();
    let scene = Scene::for_grid(&grid);
    let camera = Camera::for_grid(grid.field_size(), 2.0);
    (grid, scene, camera)
}

fn project(camera: &Camera, rect: &ViewportRect, world: Vec3) -> Vec2 {
    let clip = camera.view_proj() * world.extend(1.0);
    let ndc = clip.truncate() / clip.w;
    Vec2::new(
        rect.left + (ndc.x + 1.0) * 0.5 * rect.width,
        rect.top + (1.0 - ndc.y) * 0.5 * rect.height,
    )
}

#[test]
fn pointer_maps_to_ndc_corners() {
    let rect = ViewportRect::new(10.0, 20.0, 200.0, 100.0);
    assert_eq!(pointer_to_ndc(Vec2::new(10.0, 20.0), &rect), Vec2::new(-1.0, 1.0));
    assert_eq!(pointer_to_ndc(Vec2::new(210.0, 120.0), &rect), Vec2::new(1.0, -1.0));
    assert_eq!(pointer_to_ndc(Vec2::new(110.0, 70.0), &rect), Vec2::ZERO);
}

#[test]
fn center_ray_points_down_the_view_axis() {
    let (_, _, camera) = scene_and_camera();
    let ray = camera.ray_from_ndc(Vec2::ZERO);
    assert!((ray.direction - Vec3::NEG_Z).length() < 1e-5);
    assert!(ray.origin.z < camera.eye.z && ray.origin.z > 0.0);
}

#[test]
fn camera_frames_the_whole_field() {
    let cases = [
        (Vec2::new(100.0, 100.0), 1.0),
        (Vec2::new(16.0, 8.0), 2.0),
        (Vec2::new(100.0, 50.0), 0.5),
    ];
    for (field, aspect) in cases {
        let camera = Camera::for_grid(field, aspect);
        let half = field * 0.5;
        let corners = [
            Vec3::new(-half.x, -half.y, 0.0),
            Vec3::new(half.x, -half.y, 0.0),
            Vec3::new(half.x, half.y, 0.0),
            Vec3::new(-half.x, half.y, 0.0),
        ];
        for corner in corners {
            let clip = camera.view_proj() * corner.extend(1.0);
            let ndc = clip.truncate() / clip.w;
            assert!(
                ndc.x.abs() < 1.0 && ndc.y.abs() < 1.0,
                "{field:?} @ {aspect}: corner at {ndc:?}"
            );
            assert!(ndc.z > 0.0 && ndc.z < 1.0);
        }
    }
}

#[test]
fn ray_triangle_hits_inside_and_misses_outside() {
    let (a, b, c) = (
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
    );
    let t = ray_triangle(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, a, b, c).unwrap();
    assert!((t - 5.0).abs() < 1e-6);
    assert!(ray_triangle(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z, a, b, c).is_none());
    // triangle behind the origin
    assert!(ray_triangle(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z, a, b, c).is_none());
    // ray parallel to the plane
    assert!(ray_triangle(Vec3::new(0.0, 0.0, 5.0), Vec3::X, a, b, c).is_none());
}

#[test]
fn pick_returns_the_cell_under_the_pointer() {
    let (grid, scene, camera) = scene_and_camera();
    let rect = ViewportRect::sized(800.0, 400.0);
    let layers = pickable_layers(&scene, &[Layer::Base, Layer::Check]);
    for index in [36, 42, 54, 91] {
        let center = grid.cell_at(index).unwrap().position;
        let p = project(&camera, &rect, center);
        let hit = pick(&TriangleRayCaster, p, &rect, &camera, &layers).unwrap();
        assert_eq!(hit.layer, Layer::Base);
        assert_eq!(hit.instance_index, index);
        assert!((hit.world_point - center).length() < 1e-3);
    }
}

#[test]
fn picking_is_deterministic() {
    let (grid, scene, camera) = scene_and_camera();
    let rect = ViewportRect::sized(800.0, 400.0);
    let layers = pickable_layers(&scene, &[Layer::Base]);
    let p = project(&camera, &rect, grid.cell_at(42).unwrap().position);
    let first = pick(&TriangleRayCaster, p, &rect, &camera, &layers);
    for _ in 0..5 {
        assert_eq!(pick(&TriangleRayCaster, p, &rect, &camera, &layers), first);
    }
}

#[test]
fn gaps_and_background_are_misses() {
    let (_, scene, camera) = scene_and_camera();
    let rect = ViewportRect::sized(800.0, 400.0);
    let layers = pickable_layers(&scene, &[Layer::Base, Layer::Check]);
    // x = 0 runs between two columns
    let gap = project(&camera, &rect, Vec3::new(0.0, 0.5, 0.0));
    assert!(pick(&TriangleRayCaster, gap, &rect, &camera, &layers).is_none());
    let outside = project(&camera, &rect, Vec3::new(30.0, 0.0, 0.0));
    assert!(pick(&TriangleRayCaster, outside, &rect, &camera, &layers).is_none());
}

#[test]
fn empty_viewport_or_no_layers_pick_nothing() {
    let (_, scene, camera) = scene_and_camera();
    let layers = pickable_layers(&scene, &[Layer::Base]);
    let empty = ViewportRect::sized(0.0, 0.0);
    assert!(pick(&TriangleRayCaster, Vec2::ZERO, &empty, &camera, &layers).is_none());
    let rect = ViewportRect::sized(800.0, 400.0);
    assert!(pick(&TriangleRayCaster, Vec2::new(400.0, 200.0), &rect, &camera, &[]).is_none());
}

#[test]
fn hidden_check_marks_are_not_hit() {
    let (grid, mut scene, camera) = scene_and_camera();
    let rect = ViewportRect::sized(800.0, 400.0);
    let p = project(&camera, &rect, grid.cell_at(42).unwrap().position);
    {
        let layers = pickable_layers(&scene, &[Layer::Check]);
        assert!(pick(&TriangleRayCaster, p, &rect, &camera, &layers).is_none());
    }
    scene.apply_deltas(&[CellDelta {
        index: 42,
        attribute: CellAttribute::Check(CheckState::Checked),
    }]);
    let layers = pickable_layers(&scene, &[Layer::Base, Layer::Check]);
    let hit = pick(&TriangleRayCaster, p, &rect, &camera, &layers).unwrap();
    assert_eq!((hit.layer, hit.instance_index), (Layer::Check, 42));
}
