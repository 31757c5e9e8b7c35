//! VizuMap - interactive embedding maps of image collections
//!
//! Lays out a collection of images as a 2-D scatter plot of their embeddings.
//! Hovering a point shows a tooltip with a downscaled thumbnail of its image
//! and the point's metadata.
//!
//! The pieces, bottom-up:
//! - [`data`]: decodes raster files (common image formats, `.npy` arrays)
//! - [`thumbnail`]: turns a raster into a small embeddable JPEG
//! - [`table`]: the read-only point table built from a CSV
//! - [`hover`]: resolves a hovered id into a tooltip payload
//! - [`session`]: the scatter figure and the live hover loop

pub mod color_utils;
pub mod config;
pub mod constants;
pub mod data;
pub mod hover;
pub mod session;
pub mod table;
pub mod thumbnail;

pub use config::{ConfigError, LogLevel, VizConfig};
pub use hover::{DisplayConfig, HoverResolver, Resolution, TooltipPayload};
pub use session::{HoverEvent, JsonLinesSurface, PlotSession, PlotSurface, SessionError};
pub use table::{PointIndexTable, RowRecord, TableError};
pub use thumbnail::{Thumbnail, ThumbnailArtifact, ThumbnailCodec, ThumbnailError};
