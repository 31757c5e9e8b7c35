//! Loader for standard image formats (PNG, JPEG, BMP, GIF, TIFF, WebP).

use crate::data::RasterData;
use crate::data::loader::{LoaderError, RasterLoader};

/// Loader for standard image formats.
///
/// Keeps the native channel count (gray, gray+alpha, RGB, RGBA) so channel
/// selection addresses the channels actually stored in the file. Multi-page
/// TIFFs decode their first page.
pub struct ImageLoader;

impl RasterLoader for ImageLoader {
    fn id(&self) -> &'static str {
        "image"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "tif", "webp"]
    }

    fn can_load(&self, data: &[u8]) -> bool {
        if data.len() < 8 {
            return false;
        }

        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return true;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return true;
        }

        // BMP: 42 4D (BM)
        if data.starts_with(&[0x42, 0x4D]) {
            return true;
        }

        // GIF87a / GIF89a
        if data.starts_with(b"GIF8") {
            return true;
        }

        // TIFF: 49 49 2A 00 (little endian) or 4D 4D 00 2A (big endian)
        if data.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || data.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            return true;
        }

        // WebP: RIFF....WEBP
        data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP"
    }

    fn load(&self, data: &[u8]) -> Result<RasterData, LoaderError> {
        let img = image::load_from_memory(data).map_err(|e| {
            LoaderError::new(format!("Failed to decode image: {}", e)).with_loader(self.id())
        })?;

        Ok(RasterData::from_dynamic_image(&img))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(img: image::DynamicImage, format: image::ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn test_magic_detection_png() {
        let loader = ImageLoader;
        let png_magic = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(loader.can_load(&png_magic));
    }

    #[test]
    fn test_magic_detection_tiff() {
        let loader = ImageLoader;
        let tiff_magic = [0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00];
        assert!(loader.can_load(&tiff_magic));
    }

    #[test]
    fn test_magic_detection_invalid() {
        let loader = ImageLoader;
        let random_data = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        assert!(!loader.can_load(&random_data));
    }

    #[test]
    fn test_load_sixteen_bit_tiff() {
        let img = image::DynamicImage::ImageLuma16(image::ImageBuffer::from_pixel(
            5,
            3,
            image::Luma([u16::MAX]),
        ));
        let bytes = encode(img, image::ImageFormat::Tiff);

        let raster = ImageLoader.load(&bytes).unwrap();
        assert_eq!(raster.num_channels(), 1);
        assert_eq!((raster.width, raster.height), (5, 3));
        assert!((raster.channel(0).unwrap()[0] - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_load_truncated_data_fails() {
        let err = ImageLoader.load(&[0xFF, 0xD8, 0xFF, 0x00]).unwrap_err();
        assert_eq!(err.loader_id, Some("image"));
    }
}
