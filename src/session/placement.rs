//! Tooltip placement relative to the hovered point.
//!
//! A single threshold on the point's plot-space y decides whether the tooltip
//! opens above or below it. Points near the top of a typical embedding plot
//! sit above the threshold, so their tooltips open downwards and stay inside
//! the plot. This is a heuristic, not a viewport collision check: plots with
//! a different y range may still clip the tooltip.

use serde::Serialize;

use crate::constants::TOOLTIP_FLIP_Y;

/// Which side of the point the tooltip opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TooltipDirection {
    Above,
    Below,
}

impl TooltipDirection {
    /// Direction for a point at plot-space `y`.
    pub fn for_y(y: f64) -> Self {
        if y > TOOLTIP_FLIP_Y {
            TooltipDirection::Below
        } else {
            TooltipDirection::Above
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_threshold() {
        assert_eq!(TooltipDirection::for_y(0.0), TooltipDirection::Above);
        assert_eq!(TooltipDirection::for_y(TOOLTIP_FLIP_Y), TooltipDirection::Above);
        assert_eq!(TooltipDirection::for_y(1.51), TooltipDirection::Below);
        assert_eq!(TooltipDirection::for_y(-20.0), TooltipDirection::Above);
    }

    #[test]
    fn test_points_near_top_open_downwards() {
        assert_eq!(TooltipDirection::for_y(2.5), TooltipDirection::Below);
        assert_eq!(TooltipDirection::for_y(1e6), TooltipDirection::Below);
    }
}
