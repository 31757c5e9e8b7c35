//! Hover events delivered by the rendering surface.

use serde::{Deserialize, Serialize};

/// Screen-space box around a hovered marker, used to anchor the tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

/// The point under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverPoint {
    /// Point id in the index table
    pub id: usize,
    /// Plot-space x of the point
    pub x: f64,
    /// Plot-space y of the point
    pub y: f64,
    /// Marker box, when the surface reports one
    #[serde(default)]
    pub bbox: Option<BoundingBox>,
}

/// A pointer-position notification. `point` is `None` when the pointer is
/// over no point or has left the plot.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HoverEvent {
    #[serde(default)]
    pub point: Option<HoverPoint>,
}

impl HoverEvent {
    /// Pointer over point `id` at plot position (x, y).
    pub fn over(id: usize, x: f64, y: f64) -> Self {
        Self {
            point: Some(HoverPoint {
                id,
                x,
                y,
                bbox: None,
            }),
        }
    }

    /// Pointer over no point.
    pub fn leave() -> Self {
        Self { point: None }
    }
}
