use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhysicalBounds {
    pub position: PhysicalPosition,
    pub size: PhysicalSize,
}

impl PhysicalBounds {
    pub fn new(position: PhysicalPosition, size: PhysicalSize) -> Self {
        Self { position, size }
    }

    /// Build bounds from a left/top/right/bottom rectangle. Inverted edges
    /// collapse to an empty size rather than wrapping.
    pub fn from_ltrb(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            position: PhysicalPosition::new(left, top),
            size: PhysicalSize::new((right - left).max(0), (bottom - top).max(0)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: i32,
    pub height: i32,
}

impl PhysicalSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhysicalPosition {
    pub x: i32,
    pub y: i32,
}

impl PhysicalPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
