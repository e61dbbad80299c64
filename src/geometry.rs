//! Axis-aligned boxes and the two helpers every entity update leans on.

use crate::error::SimError;

/// Axis-aligned box used both for drawing placement and collision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Build a box of the given size centred on `(cx, cy)`.
    pub fn with_center(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Rect { x: cx - w / 2.0, y: cy - h / 2.0, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Rect { x: self.x + dx, y: self.y + dy, ..*self }
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Returns `(horizontal_ok, vertical_ok)` for a box on a `screen_w` × `screen_h` screen.
pub fn in_bounds(rect: &Rect, screen_w: f32, screen_h: f32) -> (bool, bool) {
    let horizontal = !(rect.left() < 0.0 || rect.right() > screen_w);
    let vertical = !(rect.top() < 0.0 || rect.bottom() > screen_h);
    (horizontal, vertical)
}

/// Unit vector from the center of `from` to the center of `to`.
pub fn direction_vector(from: &Rect, to: &Rect) -> Result<(f32, f32), SimError> {
    let (fx, fy) = from.center();
    let (tx, ty) = to.center();
    let (dx, dy) = (tx - fx, ty - fy);
    let norm = dx.hypot(dy);
    if norm == 0.0 {
        return Err(SimError::CoincidentCenters { x: fx, y: fy });
    }
    Ok((dx / norm, dy / norm))
}
