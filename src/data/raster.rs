//! Decoded raster data, stored as one plane per channel.

use image::DynamicImage;

/// CPU-side raster decoded from any supported source format.
///
/// Each channel is a row-major plane of `width * height` values normalized to
/// 0.0-1.0. Values outside that range (e.g. unscaled float arrays) are kept and
/// only clamped when quantizing to 8 bits.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterData {
    /// Channel planes, row-major (one per channel)
    pub channels: Vec<Vec<f32>>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl RasterData {
    /// Create a raster from channel planes.
    pub fn new(channels: Vec<Vec<f32>>, width: u32, height: u32) -> Self {
        Self {
            channels,
            width,
            height,
        }
    }

    /// Number of channels in the source.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Get a single channel plane.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(|v| v.as_slice())
    }

    /// Number of pixels in each plane.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Split a decoded image into channel planes, keeping its native channel count.
    ///
    /// Works for 8-bit, 16-bit and float images alike: `to_rgba32f` normalizes
    /// every sample type into 0.0-1.0 before the planes are extracted.
    pub fn from_dynamic_image(img: &DynamicImage) -> Self {
        let num_channels = usize::from(img.color().channel_count());
        let rgba = img.to_rgba32f();
        let (width, height) = rgba.dimensions();
        let pixel_count = width as usize * height as usize;

        // Gray and gray-alpha expand to (L, L, L, A) in RGBA, so the
        // alpha plane sits at index 3 for both.
        let source_index: &[usize] = match num_channels {
            1 => &[0],
            2 => &[0, 3],
            3 => &[0, 1, 2],
            _ => &[0, 1, 2, 3],
        };

        let mut channels = vec![Vec::with_capacity(pixel_count); source_index.len()];
        for pixel in rgba.pixels() {
            for (plane, &src) in channels.iter_mut().zip(source_index) {
                plane.push(pixel[src]);
            }
        }

        log::trace!(
            "RasterData: split {}x{} image into {} channel(s)",
            width,
            height,
            channels.len()
        );

        Self::new(channels, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn test_from_gray_image_has_one_channel() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 2, Luma([255])));
        let raster = RasterData::from_dynamic_image(&img);

        assert_eq!(raster.num_channels(), 1);
        assert_eq!((raster.width, raster.height), (4, 2));
        assert_eq!(raster.pixel_count(), 8);
        assert!(raster.channel(0).unwrap().iter().all(|&v| (v - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_from_rgb_image_keeps_channel_order() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 3, Rgb([255, 0, 51])));
        let raster = RasterData::from_dynamic_image(&img);

        assert_eq!(raster.num_channels(), 3);
        assert!((raster.channel(0).unwrap()[0] - 1.0).abs() < 1e-6);
        assert!(raster.channel(1).unwrap()[0].abs() < 1e-6);
        assert!((raster.channel(2).unwrap()[0] - 0.2).abs() < 1e-6);
        assert!(raster.channel(3).is_none());
    }
}
