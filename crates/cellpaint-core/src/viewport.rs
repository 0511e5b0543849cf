//! Translation between the host surface (client-space pointer positions,
//! element size, device pixel ratio) and the camera.

use glam::Vec2;

use crate::camera::Camera;

/// Surface rectangle in client (CSS/logical) pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ViewportRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Rect at the origin, as reported by native windows.
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }
}

/// Client position -> normalized device coordinates in [-1, 1]².
///
/// Screen y grows downward while NDC y grows upward, hence the sign flip.
#[inline]
pub fn pointer_to_ndc(pointer: Vec2, rect: &ViewportRect) -> Vec2 {
    let x = 2.0 * (pointer.x - rect.left) / rect.width - 1.0;
    let y = -2.0 * (pointer.y - rect.top) / rect.height + 1.0;
    Vec2::new(x, y)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    Primary,
    Middle,
    Secondary,
    Other(i16),
}

impl Button {
    /// Map a DOM `MouseEvent.button` code.
    pub fn from_dom(code: i16) -> Self {
        match code {
            0 => Button::Primary,
            1 => Button::Middle,
            2 => Button::Secondary,
            other => Button::Other(other),
        }
    }
}

/// A pointer event reduced to what the core needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    /// Client-space position.
    pub position: Vec2,
    pub button: Button,
}

impl PointerInput {
    pub fn new(x: f32, y: f32, button: Button) -> Self {
        Self {
            position: Vec2::new(x, y),
            button,
        }
    }

    pub fn primary(x: f32, y: f32) -> Self {
        Self::new(x, y, Button::Primary)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    rect: ViewportRect,
    device_pixel_ratio: f32,
}

impl Viewport {
    pub fn new(rect: ViewportRect, device_pixel_ratio: f32) -> Self {
        Self {
            rect,
            device_pixel_ratio: device_pixel_ratio.max(f32::EPSILON),
        }
    }

    pub fn rect(&self) -> &ViewportRect {
        &self.rect
    }

    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    /// Backing-store size in device pixels, never zero.
    pub fn backing_size(&self) -> (u32, u32) {
        let w = (self.rect.width * self.device_pixel_ratio) as u32;
        let h = (self.rect.height * self.device_pixel_ratio) as u32;
        (w.max(1), h.max(1))
    }

    /// Adopt a new surface size and update the camera aspect.
    ///
    /// Empty rects are ignored; repeating the current size is a no-op.
    /// Returns whether anything changed.
    pub fn resize(
        &mut self,
        rect: ViewportRect,
        device_pixel_ratio: f32,
        camera: &mut Camera,
    ) -> bool {
        if rect.is_empty() {
            return false;
        }
        let dpr = device_pixel_ratio.max(f32::EPSILON);
        if rect == self.rect && dpr == self.device_pixel_ratio {
            return false;
        }
        self.rect = rect;
        self.device_pixel_ratio = dpr;
        camera.set_aspect(rect.aspect());
        log::debug!(
            "[viewport] resized to {:.0}x{:.0} @{:.2}",
            rect.width,
            rect.height,
            dpr
        );
        true
    }
}
