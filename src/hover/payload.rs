//! Inputs and outputs of hover resolution.

use crate::constants::{DEFAULT_THUMBNAIL_HEIGHT, DEFAULT_THUMBNAIL_WIDTH};
use crate::table::{ClusterLabel, Point};
use crate::thumbnail::{RenderOptions, Thumbnail};

/// Session-wide display settings for tooltips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Default thumbnail size (width, height), unless a point overrides it
    pub thumbnail_size: (u32, u32),
    /// Show only this source channel, as grayscale
    pub channel: Option<usize>,
    /// Apply linear contrast gain
    pub enhance_contrast: bool,
    /// Include the point's cluster label in the payload
    pub show_cluster: bool,
}

impl DisplayConfig {
    /// Thumbnail size for a point: its own override, else the default.
    pub fn display_size(&self, point: &Point) -> (u32, u32) {
        point.display_size.unwrap_or(self.thumbnail_size)
    }

    /// Codec options for a point.
    pub fn render_options(&self, point: &Point) -> RenderOptions {
        let (width, height) = self.display_size(point);
        RenderOptions::new(width.max(height))
            .with_channel(self.channel)
            .with_contrast(self.enhance_contrast)
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            thumbnail_size: (DEFAULT_THUMBNAIL_WIDTH, DEFAULT_THUMBNAIL_HEIGHT),
            channel: None,
            enhance_contrast: false,
            show_cluster: true,
        }
    }
}

/// Everything a tooltip shows for one point.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipPayload {
    /// Hovered point id
    pub point_id: usize,
    /// Embedding position of the point
    pub coord: (f64, f64),
    /// Thumbnail, URL, or the unavailable marker
    pub thumbnail: Thumbnail,
    /// Size (width, height) at which the thumbnail is displayed
    pub display_size: (u32, u32),
    /// Metadata lines, in declared order
    pub fields: Vec<(String, String)>,
    /// Cluster label, when requested
    pub cluster: Option<ClusterLabel>,
}

/// Result of resolving a hover event.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The pointer is over no point; clear the tooltip
    NoSelection,
    /// Show this tooltip
    Tooltip(TooltipPayload),
}

impl Resolution {
    /// The payload, if a point was resolved.
    pub fn payload(&self) -> Option<&TooltipPayload> {
        match self {
            Resolution::Tooltip(payload) => Some(payload),
            Resolution::NoSelection => None,
        }
    }

    /// Consume into the payload, if a point was resolved.
    pub fn into_payload(self) -> Option<TooltipPayload> {
        match self {
            Resolution::Tooltip(payload) => Some(payload),
            Resolution::NoSelection => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{PointIndexTable, RowRecord};

    #[test]
    fn test_render_options_follow_point_override() {
        let table = PointIndexTable::build(vec![
            RowRecord::new(0.0, 0.0, "a.png"),
            RowRecord::new(1.0, 1.0, "b.png").with_display_size(64, 200),
        ])
        .unwrap();
        let config = DisplayConfig {
            channel: Some(1),
            ..DisplayConfig::default()
        };

        let default_point = table.lookup(0).unwrap();
        assert_eq!(config.display_size(default_point), (128, 128));
        assert_eq!(config.render_options(default_point).max_dimension, 128);

        let options = config.render_options(table.lookup(1).unwrap());
        assert_eq!(options.max_dimension, 200);
        assert_eq!(options.channel, Some(1));
    }
}
