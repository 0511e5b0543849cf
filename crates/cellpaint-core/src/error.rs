use thiserror::Error;

/// Failures surfaced by the core. A pointer missing the grid is not an error;
/// picking returns `None` for that.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CellPaintError {
    #[error("invalid number: {value}")]
    InvalidNumber { value: f64 },
    #[error("cell index {index} out of range for grid of {len} cells")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
    #[error("unknown setting: {0}")]
    UnknownSetting(String),
}

pub type Result<T> = std::result::Result<T, CellPaintError>;
