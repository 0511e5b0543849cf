// Host-side tests for grid layout and cell state.

use cellpaint_core::*;
use glam::Vec2;

/// 10x10 cells over a 100x100 real field with a 10% gap.
fn small_grid() -> GridModel {
    let cfg = MeasureConfig::default().with_scale(1.0);
    let spec = GridSpec {
        columns: 10,
        rows: 10,
        field_width: 100.0,
        field_height: 100.0,
        gap_fraction: 0.1,
    };
    GridModel::new(spec, &cfg).unwrap()
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn corner_cells_sit_at_slot_centers() {
    let grid = small_grid();
    let first = grid.cell_at(0).unwrap();
    assert_eq!((first.column, first.row), (0, 0));
    assert!(approx(first.position.x, -45.0) && approx(first.position.y, 45.0));

    let last = grid.cell_at(99).unwrap();
    assert_eq!((last.column, last.row), (9, 9));
    assert!(approx(last.position.x, 45.0) && approx(last.position.y, -45.0));

    assert_eq!(grid.slot_size(), Vec2::new(10.0, 10.0));
    let cell = grid.cell_size();
    assert!(approx(cell.x, 9.0) && approx(cell.y, 9.0));
}

#[test]
fn index_maps_to_column_and_row() {
    let grid = small_grid();
    let c = grid.coord(42).unwrap();
    assert_eq!((c.column, c.row), (2, 4));
    assert_eq!(grid.index_of(2, 4), Some(42));
    assert_eq!(grid.index_of(10, 0), None);
    for cell in grid.cells() {
        assert_eq!(cell.index, cell.row * grid.columns() + cell.column);
    }
}

#[test]
fn default_grid_is_one_hundred_by_fifty() {
    let grid = GridModel::new(GridSpec::default(), &MeasureConfig::default()).unwrap();
    assert_eq!(grid.len(), 5000);
    assert_eq!(grid.field_size(), Vec2::new(100.0, 50.0));
    assert_eq!(grid.painted_count(), 0);
    assert_eq!(grid.checked_count(), 0);
}

#[test]
fn painting_is_idempotent() {
    let mut grid = small_grid();
    let first = grid.set_painted(7).unwrap();
    assert_eq!(
        first,
        Some(CellDelta {
            index: 7,
            attribute: CellAttribute::Paint(PaintState::Painted)
        })
    );
    assert_eq!(grid.set_painted(7).unwrap(), None);
    assert_eq!(grid.painted_count(), 1);
    assert_eq!(grid.take_deltas().len(), 1);
    assert!(!grid.has_pending_deltas());
}

#[test]
fn checking_is_idempotent() {
    let mut grid = small_grid();
    assert!(grid.set_checked(3).unwrap().is_some());
    assert!(grid.set_checked(3).unwrap().is_none());
    assert!(grid.cell_at(3).unwrap().is_checked());
    assert!(!grid.cell_at(3).unwrap().is_painted());
}

#[test]
fn unusable_cells_reject_every_tool() {
    let cfg = MeasureConfig::default().with_scale(1.0);
    let spec = GridSpec {
        columns: 4,
        rows: 3,
        field_width: 40.0,
        field_height: 30.0,
        gap_fraction: 0.0,
    };
    let mut grid = GridModel::with_unusable(spec, &cfg, border_unusable(&spec)).unwrap();
    // only the two middle cells of the middle row survive the border
    let usable: Vec<usize> = grid.cells().filter(|c| c.usable).map(|c| c.index).collect();
    assert_eq!(usable, vec![5, 6]);

    assert_eq!(grid.set_painted(0).unwrap(), None);
    assert_eq!(grid.set_checked(11).unwrap(), None);
    assert!(!grid.has_pending_deltas());
    assert!(grid.set_painted(5).unwrap().is_some());
}

#[test]
fn out_of_range_index_is_an_error() {
    let mut grid = small_grid();
    assert_eq!(
        grid.set_painted(100),
        Err(CellPaintError::IndexOutOfRange { index: 100, len: 100 })
    );
    assert!(grid.cell_at(100).is_err());
}

#[test]
fn invalid_specs_are_rejected() {
    let cfg = MeasureConfig::default();
    let zero_cols = GridSpec {
        columns: 0,
        ..GridSpec::default()
    };
    assert!(matches!(
        GridModel::new(zero_cols, &cfg),
        Err(CellPaintError::InvalidGrid(_))
    ));
    let full_gap = GridSpec {
        gap_fraction: 1.0,
        ..GridSpec::default()
    };
    assert!(GridModel::new(full_gap, &cfg).is_err());
    let flat = GridSpec {
        field_height: 0.0,
        ..GridSpec::default()
    };
    assert!(GridModel::new(flat, &cfg).is_err());
}

#[test]
fn check_layer_floats_above_base_layer() {
    let grid = small_grid();
    let cell = grid.cell_at(12).unwrap();
    let base = cell.position_on(Layer::Base);
    let check = cell.position_on(Layer::Check);
    assert_eq!(base.z, cell.position.z);
    assert!(check.z > base.z);
    assert_eq!((check.x, check.y), (base.x, base.y));
}
