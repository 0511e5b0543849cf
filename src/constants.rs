/// Host page wiring for the browser front-end.
///
/// Element ids are the contract with the page that embeds the wasm module.
pub const CANVAS_ID: &str = "app-canvas";

// Toolbar buttons; the part after the prefix is the tool name
pub const TOOL_BUTTON_PREFIX: &str = "tool-";
pub const TOOL_BUTTON_IDS: [&str; 3] = ["tool-pencil", "tool-fill", "tool-check"];
pub const ACTIVE_TOOL_CLASS: &str = "active";

// WheelEvent.deltaMode values
pub const DOM_DELTA_PIXEL: u32 = 0;
pub const DOM_DELTA_LINE: u32 = 1;
pub const DOM_DELTA_PAGE: u32 = 2;

// Pixels per wheel "line" when the browser reports line deltas
pub const WHEEL_LINE_PX: f32 = 40.0;

// Frames between frame-time log lines
pub const FRAME_LOG_INTERVAL: u64 = 600;
