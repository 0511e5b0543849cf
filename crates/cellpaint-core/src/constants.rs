use glam::Vec4;

// Shared layout/visual tuning constants used by both web and native frontends.

// Grid layout
pub const MAP_X_NUM: usize = 100; // default columns, max 1000
pub const MAP_Y_NUM: usize = 50; // default rows, max 500
pub const MAP_GAP_PERCENT: f64 = 0.01; // fraction of each slot left empty, range [0, 1)
pub const DEFAULT_FIELD_WIDTH: f64 = 10_000.0; // measure units (cm) -> 100 real units
pub const DEFAULT_FIELD_HEIGHT: f64 = 5_000.0; // measure units (cm) -> 50 real units

// Measurement
pub const DEFAULT_SCALE: f64 = 0.01; // real units per centimeter
pub const DEFAULT_PRECISION: u32 = 3; // decimal digits kept after conversion
pub const DEFAULT_PIXELS_PER_REAL: f64 = 10.0;
pub const FLOAT_DIGITS: u32 = 10; // precision used when trimming raw numeric input

// Layers: z index times LAYER_Z_STEP gives the world-space z of each layer
pub const MAP_LAYER_Z_INDEX: f32 = 0.0;
pub const CHECK_LAYER_Z_INDEX: f32 = 1.0;
pub const LAYER_Z_STEP: f32 = 0.01;
pub const CHECK_MARK_SCALE: f32 = 0.5; // check marks cover half the cell

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 45.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const VIEW_MARGIN: f32 = 1.1; // headroom around the framed field
pub const CAMERA_FAR_MULTIPLIER: f32 = 4.0; // far plane = view distance * 4 + field diagonal
pub const ORBIT_RADIANS_PER_PIXEL: f32 = 0.005;
pub const ORBIT_MIN_PITCH: f32 = -1.5;
pub const ORBIT_MAX_PITCH: f32 = 1.5;
pub const ORBIT_MIN_DISTANCE: f32 = 2.0;
pub const ENABLE_ORBIT_CONTROLS: bool = true;

// Colors (0xRRGGBB)
pub const MAP_BACK_HEX: u32 = 0x111111;
pub const MAP_UNUSABLE_BACK_HEX: u32 = 0xff0000;
pub const PAINT_HEX: u32 = 0x00ff00;
pub const CHECK_HEX: u32 = 0xffffff;
pub const BACK_HEX: u32 = 0x666666;
pub const LIGHT_A_HEX: u32 = 0xffffff;
pub const LIGHT_B_HEX: u32 = 0x002288;
pub const LIGHT_C_HEX: u32 = 0x222222;

/// Convert a packed `0xRRGGBB` value to an opaque linear RGBA color.
#[inline]
pub fn hex_to_rgba(hex: u32) -> Vec4 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec4::new(r, g, b, 1.0)
}
