//! The painting grid: cell layout, usability and paint/check state.
//!
//! Cells are addressed by a row-major index with the origin at the top-left
//! slot. World positions are computed once at construction with the whole
//! field centered on the origin, x growing rightward and y growing upward.
//! Every state change is queued as a [`CellDelta`] so the renderer can update
//! single instances instead of re-uploading the grid.

use glam::{Vec2, Vec3};

use crate::constants::{
    DEFAULT_FIELD_HEIGHT, DEFAULT_FIELD_WIDTH, MAP_GAP_PERCENT, MAP_X_NUM, MAP_Y_NUM,
};
use crate::dimension::{real_from_measure, MeasureConfig};
use crate::error::{CellPaintError, Result};
use crate::scene::Layer;

/// Construction parameters. Field dimensions are in measure units of the
/// configured display unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    pub columns: usize,
    pub rows: usize,
    pub field_width: f64,
    pub field_height: f64,
    pub gap_fraction: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            columns: MAP_X_NUM,
            rows: MAP_Y_NUM,
            field_width: DEFAULT_FIELD_WIDTH,
            field_height: DEFAULT_FIELD_HEIGHT,
            gap_fraction: MAP_GAP_PERCENT,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaintState {
    #[default]
    Unpainted,
    Painted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckState {
    #[default]
    Unchecked,
    Checked,
}

/// Index plus its derived column/row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellCoord {
    pub index: usize,
    pub column: usize,
    pub row: usize,
}

/// Snapshot of one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub index: usize,
    pub column: usize,
    pub row: usize,
    /// Center of the cell on the base layer.
    pub position: Vec3,
    pub usable: bool,
    pub paint: PaintState,
    pub check: CheckState,
}

impl Cell {
    /// Cell center lifted onto `layer`.
    pub fn position_on(&self, layer: Layer) -> Vec3 {
        Vec3::new(self.position.x, self.position.y, layer.z())
    }

    pub fn is_painted(&self) -> bool {
        self.paint == PaintState::Painted
    }

    pub fn is_checked(&self) -> bool {
        self.check == CheckState::Checked
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellAttribute {
    Paint(PaintState),
    Check(CheckState),
}

/// One mutated attribute of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellDelta {
    pub index: usize,
    pub attribute: CellAttribute,
}

/// Predicate marking the outermost ring of cells as unusable.
pub fn border_unusable(spec: &GridSpec) -> impl Fn(CellCoord) -> bool {
    let (columns, rows) = (spec.columns, spec.rows);
    move |c| c.column == 0 || c.row == 0 || c.column + 1 == columns || c.row + 1 == rows
}

#[derive(Debug)]
pub struct GridModel {
    spec: GridSpec,
    field_size: Vec2,
    slot_size: Vec2,
    cell_size: Vec2,
    positions: Vec<Vec3>,
    usable: Vec<bool>,
    paint: Vec<PaintState>,
    check: Vec<CheckState>,
    pending: Vec<CellDelta>,
}

impl GridModel {
    /// Build a grid where every cell is usable.
    pub fn new(spec: GridSpec, config: &MeasureConfig) -> Result<Self> {
        Self::with_unusable(spec, config, |_| false)
    }

    /// Build a grid; cells for which `unusable` returns true reject all tools.
    pub fn with_unusable(
        spec: GridSpec,
        config: &MeasureConfig,
        unusable: impl Fn(CellCoord) -> bool,
    ) -> Result<Self> {
        if spec.columns == 0 || spec.rows == 0 {
            return Err(CellPaintError::InvalidGrid(format!(
                "grid needs at least one column and row, got {}x{}",
                spec.columns, spec.rows
            )));
        }
        if !(0.0..1.0).contains(&spec.gap_fraction) {
            return Err(CellPaintError::InvalidGrid(format!(
                "gap fraction {} outside [0, 1)",
                spec.gap_fraction
            )));
        }
        let field_w = real_from_measure(config, spec.field_width, None)?;
        let field_h = real_from_measure(config, spec.field_height, None)?;
        if field_w <= 0.0 || field_h <= 0.0 {
            return Err(CellPaintError::InvalidGrid(format!(
                "field must be positive, got {field_w}x{field_h} real units"
            )));
        }

        let slot_w = field_w / spec.columns as f64;
        let slot_h = field_h / spec.rows as f64;
        let keep = 1.0 - spec.gap_fraction;
        let len = spec.columns * spec.rows;
        let base_z = Layer::Base.z();

        let mut positions = Vec::with_capacity(len);
        let mut usable = Vec::with_capacity(len);
        for index in 0..len {
            let column = index % spec.columns;
            let row = (index - column) / spec.columns;
            let x = -field_w / 2.0 + slot_w * (column as f64 + 0.5);
            let y = field_h / 2.0 - slot_h * (row as f64 + 0.5);
            positions.push(Vec3::new(x as f32, y as f32, base_z));
            usable.push(!unusable(CellCoord { index, column, row }));
        }

        let unusable_count = usable.iter().filter(|u| !**u).count();
        log::info!(
            "[grid] {}x{} cells, field {:.3}x{:.3} real, {} unusable",
            spec.columns,
            spec.rows,
            field_w,
            field_h,
            unusable_count
        );

        Ok(Self {
            spec,
            field_size: Vec2::new(field_w as f32, field_h as f32),
            slot_size: Vec2::new(slot_w as f32, slot_h as f32),
            cell_size: Vec2::new((slot_w * keep) as f32, (slot_h * keep) as f32),
            positions,
            usable,
            paint: vec![PaintState::Unpainted; len],
            check: vec![CheckState::Unchecked; len],
            pending: Vec::new(),
        })
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn columns(&self) -> usize {
        self.spec.columns
    }

    pub fn rows(&self) -> usize {
        self.spec.rows
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Whole field in real units.
    pub fn field_size(&self) -> Vec2 {
        self.field_size
    }

    /// Slot pitch (cell plus gap) in real units.
    pub fn slot_size(&self) -> Vec2 {
        self.slot_size
    }

    /// Drawn cell extent in real units.
    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    pub fn coord(&self, index: usize) -> Result<CellCoord> {
        self.check_index(index)?;
        let column = index % self.spec.columns;
        Ok(CellCoord {
            index,
            column,
            row: (index - column) / self.spec.columns,
        })
    }

    pub fn index_of(&self, column: usize, row: usize) -> Option<usize> {
        (column < self.spec.columns && row < self.spec.rows)
            .then(|| row * self.spec.columns + column)
    }

    pub fn cell_at(&self, index: usize) -> Result<Cell> {
        let coord = self.coord(index)?;
        Ok(Cell {
            index,
            column: coord.column,
            row: coord.row,
            position: self.positions[index],
            usable: self.usable[index],
            paint: self.paint[index],
            check: self.check[index],
        })
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len()).filter_map(move |i| self.cell_at(i).ok())
    }

    /// Paint a cell. Unusable or already painted cells are left alone and
    /// produce no delta.
    pub fn set_painted(&mut self, index: usize) -> Result<Option<CellDelta>> {
        self.check_index(index)?;
        if !self.usable[index] || self.paint[index] == PaintState::Painted {
            return Ok(None);
        }
        self.paint[index] = PaintState::Painted;
        Ok(Some(self.record(index, CellAttribute::Paint(PaintState::Painted))))
    }

    /// Check a cell. Unusable or already checked cells are left alone and
    /// produce no delta.
    pub fn set_checked(&mut self, index: usize) -> Result<Option<CellDelta>> {
        self.check_index(index)?;
        if !self.usable[index] || self.check[index] == CheckState::Checked {
            return Ok(None);
        }
        self.check[index] = CheckState::Checked;
        Ok(Some(self.record(index, CellAttribute::Check(CheckState::Checked))))
    }

    /// Deltas queued since the last call, oldest first.
    pub fn take_deltas(&mut self) -> Vec<CellDelta> {
        std::mem::take(&mut self.pending)
    }

    pub fn has_pending_deltas(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn painted_count(&self) -> usize {
        self.paint.iter().filter(|p| **p == PaintState::Painted).count()
    }

    pub fn checked_count(&self) -> usize {
        self.check.iter().filter(|c| **c == CheckState::Checked).count()
    }

    fn record(&mut self, index: usize, attribute: CellAttribute) -> CellDelta {
        log::debug!("[grid] cell {} -> {:?}", index, attribute);
        let delta = CellDelta { index, attribute };
        self.pending.push(delta);
        delta
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(CellPaintError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }
}
