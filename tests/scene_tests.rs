// Host-side tests for the instanced scene and its upload tracking.

use cellpaint_core::*;
use glam::{Vec2, Vec3, Vec4};

fn grid() -> GridModel {
    let cfg = MeasureConfig::default().with_scale(1.0);
    let spec = GridSpec {
        columns: 4,
        rows: 4,
        field_width: 40.0,
        field_height: 40.0,
        gap_fraction: 0.1,
    };
    GridModel::with_unusable(spec, &cfg, |c| c.index == 15).unwrap()
}

#[test]
fn scene_mirrors_the_grid() {
    let g = grid();
    let scene = Scene::for_grid(&g);
    let base = scene.layer(Layer::Base).unwrap();
    let marks = scene.layer(Layer::Check).unwrap();
    assert_eq!(base.len(), g.len());
    assert_eq!(marks.len(), g.len());
    assert_eq!(scene.lights().len(), 3);

    let inst = base.instance(5).unwrap();
    assert_eq!(inst.offset, g.cell_at(5).unwrap().position);
    assert_eq!(inst.size, g.cell_size());
    assert_eq!(inst.color, hex_to_rgba(MAP_BACK_HEX));
    assert_eq!(base.instance(15).unwrap().color, hex_to_rgba(MAP_UNUSABLE_BACK_HEX));

    let mark = marks.instance(5).unwrap();
    assert!(!mark.visible);
    assert!(mark.offset.z > inst.offset.z);
    assert_eq!(mark.size, g.cell_size() * CHECK_MARK_SCALE);
}

#[test]
fn first_upload_is_full_then_only_changes() {
    let mut g = grid();
    let mut scene = Scene::for_grid(&g);
    for mesh in scene.drawables_mut() {
        assert_eq!(mesh.take_upload(), InstanceUpload::Full);
        assert_eq!(mesh.take_upload(), InstanceUpload::Nothing);
    }

    g.set_painted(9).unwrap();
    g.set_painted(2).unwrap();
    g.set_checked(4).unwrap();
    scene.apply_deltas(&g.take_deltas());

    let base = scene.layer_mut(Layer::Base).unwrap();
    assert_eq!(base.take_upload(), InstanceUpload::Partial(vec![2, 9]));
    assert!(!base.is_dirty());
    let marks = scene.layer_mut(Layer::Check).unwrap();
    assert_eq!(marks.take_upload(), InstanceUpload::Partial(vec![4]));
}

#[test]
fn unchanged_values_do_not_mark_dirty() {
    let g = grid();
    let mut scene = Scene::for_grid(&g);
    let base = scene.layer_mut(Layer::Base).unwrap();
    base.take_upload();
    let current = base.instance(1).unwrap().color;
    base.set_color(1, current);
    base.set_visible(1, true);
    assert!(!base.is_dirty());
    base.mark_dirty(1);
    base.mark_dirty(999);
    assert_eq!(base.take_upload(), InstanceUpload::Partial(vec![1]));
}

#[test]
fn corners_wind_counter_clockwise() {
    let inst = Instance {
        offset: Vec3::new(1.0, 2.0, 0.5),
        size: Vec2::new(2.0, 4.0),
        color: Vec4::ONE,
        visible: true,
    };
    let [a, b, c, d] = inst.corners();
    assert_eq!(a, Vec3::new(0.0, 0.0, 0.5));
    assert_eq!(b, Vec3::new(2.0, 0.0, 0.5));
    assert_eq!(c, Vec3::new(2.0, 4.0, 0.5));
    assert_eq!(d, Vec3::new(0.0, 4.0, 0.5));
    assert!((b - a).cross(c - a).z > 0.0);
}

#[test]
fn ambient_is_clamped_to_one() {
    let mut scene = Scene::default();
    assert_eq!(scene.ambient(), Vec3::ZERO);
    scene.add_light(Light::from_hex(0xffffff, 0.8));
    scene.add_light(Light::from_hex(0xffffff, 0.8));
    assert_eq!(scene.ambient(), Vec3::ONE);
    assert_eq!(scene.background, hex_to_rgba(BACK_HEX));
}

#[test]
fn drawables_are_addressable_by_id() {
    let mut scene = Scene::default();
    let id = scene.add_drawable(InstancedMesh::new(Layer::Check, Vec::new()));
    assert_eq!(id, DrawableId(0));
    assert!(scene.drawable(id).unwrap().is_empty());
    assert!(scene.layer(Layer::Base).is_none());
}
