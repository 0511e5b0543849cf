//! Core of the cellpaint grid painter.
//!
//! Everything here is platform-free: the web and native frontends own the
//! window/canvas, GPU surface and raw input wiring, and drive a
//! [`PaintSurface`] with normalized pointer events. The optional `gpu`
//! feature adds the shared wgpu renderer.

pub mod camera;
pub mod constants;
pub mod dimension;
pub mod error;
pub mod grid;
pub mod interaction;
pub mod picker;
pub mod raycast;
#[cfg(feature = "gpu")]
pub mod render;
pub mod scene;
pub mod surface;
pub mod viewport;

// Shader bundled as a string constant
pub static GRID_WGSL: &str = include_str!("../shaders/grid.wgsl");

pub use camera::*;
pub use constants::*;
pub use dimension::*;
pub use error::*;
pub use grid::*;
pub use interaction::*;
pub use picker::*;
pub use raycast::*;
pub use scene::*;
pub use surface::*;
pub use viewport::*;
