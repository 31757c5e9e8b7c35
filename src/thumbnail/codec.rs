//! Decode, normalize, resize and re-encode source images as thumbnails.

use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};

use super::{ThumbnailArtifact, ThumbnailError, ThumbnailFormat};
use crate::constants::{CONTRAST_GAIN, JPEG_QUALITY};
use crate::data::{LoaderRegistry, RasterData};

/// Per-render options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderOptions {
    /// Longest side of the output; larger images are downscaled to fit
    pub max_dimension: u32,
    /// Render only this source channel, as grayscale
    pub channel: Option<usize>,
    /// Apply the fixed linear contrast gain
    pub enhance_contrast: bool,
}

impl RenderOptions {
    /// Options for a plain thumbnail of at most `max_dimension` pixels.
    pub fn new(max_dimension: u32) -> Self {
        Self {
            max_dimension,
            channel: None,
            enhance_contrast: false,
        }
    }

    /// Select a single source channel.
    pub fn with_channel(mut self, channel: Option<usize>) -> Self {
        self.channel = channel;
        self
    }

    /// Enable or disable contrast enhancement.
    pub fn with_contrast(mut self, enhance_contrast: bool) -> Self {
        self.enhance_contrast = enhance_contrast;
        self
    }
}

/// Turns image references into small JPEG thumbnails.
pub struct ThumbnailCodec {
    registry: LoaderRegistry,
    jpeg_quality: u8,
}

impl ThumbnailCodec {
    /// Create a codec with all built-in loaders.
    pub fn new() -> Self {
        Self {
            registry: LoaderRegistry::new(),
            jpeg_quality: JPEG_QUALITY,
        }
    }

    /// Override the JPEG quality (1-100).
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Render the image at `image_ref` (a filesystem path).
    pub fn render(
        &self,
        image_ref: &str,
        options: &RenderOptions,
    ) -> Result<ThumbnailArtifact, ThumbnailError> {
        let path = Path::new(image_ref);
        let data = std::fs::read(path).map_err(|source| ThumbnailError::ImageNotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let raster = self
            .registry
            .load(&data, Some(image_ref))
            .map_err(|source| ThumbnailError::DecodeError {
                path: path.to_path_buf(),
                source,
            })?;

        self.render_raster(&raster, options)
    }

    /// Render an already decoded raster.
    pub fn render_raster(
        &self,
        raster: &RasterData,
        options: &RenderOptions,
    ) -> Result<ThumbnailArtifact, ThumbnailError> {
        let rgb = compose_rgb(raster, options.channel)?;

        let (src_w, src_h) = rgb.dimensions();
        let (width, height) = target_dimensions(src_w, src_h, options.max_dimension);
        let mut rgb = if (width, height) == (src_w, src_h) {
            rgb
        } else {
            // Triangle is the closest match to area averaging for downscaling
            imageops::resize(&rgb, width, height, FilterType::Triangle)
        };

        if options.enhance_contrast {
            apply_contrast(&mut rgb, CONTRAST_GAIN);
        }

        let mut bytes = Vec::new();
        rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut bytes, self.jpeg_quality))?;

        log::trace!(
            "Rendered {}x{} thumbnail from {}x{} source ({} bytes)",
            width,
            height,
            src_w,
            src_h,
            bytes.len()
        );

        Ok(ThumbnailArtifact {
            bytes,
            format: ThumbnailFormat::Jpeg,
            width,
            height,
        })
    }
}

impl Default for ThumbnailCodec {
    fn default() -> Self {
        Self::new()
    }
}

/// Output size for a source of `width` x `height` with a longest-side limit.
///
/// Never upscales. When downscaling, the longest side becomes exactly
/// `max_dimension` and the other side is scaled by the same factor and
/// truncated, with a floor of one pixel.
pub fn target_dimensions(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_dimension {
        return (width, height);
    }

    let scale = |side: u32| {
        let scaled = u64::from(side) * u64::from(max_dimension) / u64::from(longest);
        (scaled as u32).max(1)
    };
    (scale(width), scale(height))
}

/// Build a displayable RGB image from raster channel planes.
///
/// With a channel selected, that channel is broadcast to gray RGB. Otherwise
/// one- and two-channel sources (gray, gray+alpha) use their first channel as
/// gray, and sources with three or more channels keep the first three.
pub fn compose_rgb(raster: &RasterData, channel: Option<usize>) -> Result<RgbImage, ThumbnailError> {
    let available = raster.num_channels();
    let plane = |index: usize| {
        raster
            .channel(index)
            .ok_or(ThumbnailError::InvalidChannel { channel: index, available })
    };

    let (r, g, b) = match channel {
        Some(index) => {
            let p = plane(index)?;
            (p, p, p)
        }
        None if available >= 3 => (plane(0)?, plane(1)?, plane(2)?),
        None => {
            let p = plane(0)?;
            (p, p, p)
        }
    };

    let width = raster.width;
    Ok(RgbImage::from_fn(raster.width, raster.height, |x, y| {
        let i = y as usize * width as usize + x as usize;
        let sample = |plane: &[f32]| quantize(plane.get(i).copied().unwrap_or(0.0));
        Rgb([sample(r), sample(g), sample(b)])
    }))
}

/// Multiply every sample by `gain`, rounding and saturating at 255.
pub fn apply_contrast(image: &mut RgbImage, gain: f32) {
    for sample in image.iter_mut() {
        *sample = (f32::from(*sample) * gain).round().clamp(0.0, 255.0) as u8;
    }
}

fn quantize(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
