//! Global constants for VizuMap

/// Default thumbnail width in pixels
pub const DEFAULT_THUMBNAIL_WIDTH: u32 = 128;

/// Default thumbnail height in pixels
pub const DEFAULT_THUMBNAIL_HEIGHT: u32 = 128;

/// A 3D array whose first axis is shorter than this is read as channel-first
pub const CHANNEL_FIRST_THRESHOLD: usize = 4;

/// Linear gain applied by contrast enhancement (zero offset)
pub const CONTRAST_GAIN: f32 = 1.5;

/// JPEG quality used for thumbnail encoding
pub const JPEG_QUALITY: u8 = 85;

/// Plot-space y above which the tooltip opens above the point
pub const TOOLTIP_FLIP_Y: f64 = 1.5;

/// Default number of encoded thumbnails kept for re-hovered points
pub const DEFAULT_CACHE_CAPACITY: usize = 64;

/// Scatter plot size in pixels
pub const PLOT_SIZE: u32 = 800;

/// Scatter marker size in pixels
pub const MARKER_SIZE: f32 = 5.0;
