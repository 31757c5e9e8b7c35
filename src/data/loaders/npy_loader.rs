//! Loader for NumPy `.npy` files.
//!
//! Scientific image pipelines often store multi-channel microscopy or
//! spectral data as raw arrays. This loader accepts them directly.

use std::io::Cursor;

use ndarray::{ArrayD, Axis};
use ndarray_npy::ReadNpyExt;

use crate::constants::CHANNEL_FIRST_THRESHOLD;
use crate::data::RasterData;
use crate::data::loader::{LoaderError, RasterLoader};

/// Loader for NumPy `.npy` files.
///
/// **Accepted array shapes** (NumPy `(rows, cols)` convention):
/// - 2D `(H, W)`: single channel
/// - 3D `(C, H, W)`: channel-first, chosen when the first axis is shorter than
///   [`CHANNEL_FIRST_THRESHOLD`]
/// - 3D `(H, W, C)`: channel-last otherwise
///
/// The layout test only looks at the first axis, so an image whose height is
/// below the threshold is misread as channel-first. Such images are far below
/// thumbnail size and are not worth a stricter heuristic.
///
/// Supported data types: `f32`, `f64`, `u8`, `u16`, `i16`, `i32`.
pub struct NpyLoader;

impl NpyLoader {
    /// NumPy magic bytes: \x93NUMPY
    const MAGIC: &'static [u8] = &[0x93, b'N', b'U', b'M', b'P', b'Y'];

    fn array_to_raster<T>(array: ArrayD<T>) -> Result<RasterData, LoaderError>
    where
        T: NumericConvert + Copy,
    {
        let shape = array.shape().to_vec();
        log::debug!("NpyLoader: array shape = {:?}", shape);

        let (channels, height, width) = match shape[..] {
            [height, width] => {
                let plane: Vec<f32> = array.iter().map(|&v| v.to_normalized_f32()).collect();
                (vec![plane], height, width)
            }
            [first, second, third] => {
                let (channel_axis, height, width) = if first < CHANNEL_FIRST_THRESHOLD {
                    (Axis(0), second, third)
                } else {
                    (Axis(2), first, second)
                };

                let channels: Vec<Vec<f32>> = array
                    .axis_iter(channel_axis)
                    .map(|plane| plane.iter().map(|&v| v.to_normalized_f32()).collect())
                    .collect();
                (channels, height, width)
            }
            _ => {
                return Err(LoaderError::new(format!(
                    "Unsupported array dimensions: {} (expected 2 or 3)",
                    shape.len()
                ))
                .with_loader("npy"));
            }
        };

        if width == 0 || height == 0 || channels.is_empty() {
            return Err(LoaderError::new(format!("Empty array with shape {:?}", shape)).with_loader("npy"));
        }

        let to_u32 = |v: usize| {
            u32::try_from(v)
                .map_err(|_| LoaderError::new(format!("Array dimension {} too large", v)).with_loader("npy"))
        };
        let (width, height) = (to_u32(width)?, to_u32(height)?);

        log::debug!(
            "NpyLoader: loaded {}x{} with {} channel(s)",
            width,
            height,
            channels.len()
        );

        Ok(RasterData::new(channels, width, height))
    }
}

impl RasterLoader for NpyLoader {
    fn id(&self) -> &'static str {
        "npy"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["npy"]
    }

    fn can_load(&self, data: &[u8]) -> bool {
        data.starts_with(Self::MAGIC)
    }

    fn load(&self, data: &[u8]) -> Result<RasterData, LoaderError> {
        let mut cursor = Cursor::new(data);

        // f32 is most common for scientific data
        if let Ok(array) = ArrayD::<f32>::read_npy(&mut cursor) {
            return Self::array_to_raster(array);
        }

        cursor.set_position(0);
        if let Ok(array) = ArrayD::<f64>::read_npy(&mut cursor) {
            return Self::array_to_raster(array);
        }

        cursor.set_position(0);
        if let Ok(array) = ArrayD::<u8>::read_npy(&mut cursor) {
            return Self::array_to_raster(array);
        }

        cursor.set_position(0);
        if let Ok(array) = ArrayD::<u16>::read_npy(&mut cursor) {
            return Self::array_to_raster(array);
        }

        cursor.set_position(0);
        if let Ok(array) = ArrayD::<i16>::read_npy(&mut cursor) {
            return Self::array_to_raster(array);
        }

        cursor.set_position(0);
        if let Ok(array) = ArrayD::<i32>::read_npy(&mut cursor) {
            return Self::array_to_raster(array);
        }

        Err(LoaderError::new("Failed to read NumPy array: unsupported dtype or invalid format")
            .with_loader(self.id()))
    }

    fn priority(&self) -> i32 {
        // Checked before generic images since the magic is unambiguous
        10
    }
}

/// Conversion of array elements into normalized f32 samples.
trait NumericConvert {
    fn to_normalized_f32(self) -> f32;
}

impl NumericConvert for f32 {
    fn to_normalized_f32(self) -> f32 {
        // Assumed to be 0-1 already; clamped at quantization
        self
    }
}

impl NumericConvert for f64 {
    fn to_normalized_f32(self) -> f32 {
        self as f32
    }
}

impl NumericConvert for u8 {
    fn to_normalized_f32(self) -> f32 {
        f32::from(self) / 255.0
    }
}

impl NumericConvert for u16 {
    fn to_normalized_f32(self) -> f32 {
        f32::from(self) / 65535.0
    }
}

impl NumericConvert for i16 {
    fn to_normalized_f32(self) -> f32 {
        // Map -32768..32767 to 0..1
        (f32::from(self) + 32768.0) / 65535.0
    }
}

impl NumericConvert for i32 {
    fn to_normalized_f32(self) -> f32 {
        ((f64::from(self) + 2_147_483_648.0) / 4_294_967_295.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3};
    use ndarray_npy::WriteNpyExt;

    fn npy_bytes<A: WriteNpyExt>(array: &A) -> Vec<u8> {
        let mut bytes = Vec::new();
        array.write_npy(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_magic_detection() {
        let loader = NpyLoader;

        let valid_magic = [0x93, b'N', b'U', b'M', b'P', b'Y', 0x01, 0x00];
        assert!(loader.can_load(&valid_magic));

        let invalid = [0x89, 0x50, 0x4E, 0x47];
        assert!(!loader.can_load(&invalid));
    }

    #[test]
    fn test_numeric_convert_u8() {
        assert!((0u8.to_normalized_f32() - 0.0).abs() < f32::EPSILON);
        assert!((255u8.to_normalized_f32() - 1.0).abs() < f32::EPSILON);
        assert!((128u8.to_normalized_f32() - 0.502).abs() < 0.01);
    }

    #[test]
    fn test_numeric_convert_i16_midpoint() {
        assert!((i16::MIN.to_normalized_f32() - 0.0).abs() < 1e-6);
        assert!((i16::MAX.to_normalized_f32() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_grayscale_2d() {
        let array = Array2::<u8>::from_shape_fn((6, 10), |(r, _)| r as u8 * 40);
        let raster = NpyLoader.load(&npy_bytes(&array)).unwrap();

        assert_eq!(raster.num_channels(), 1);
        assert_eq!((raster.width, raster.height), (10, 6));
        // Row-major: second row starts at index 10
        assert!((raster.channel(0).unwrap()[10] - 40.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_channel_first() {
        // (C, H, W) = (3, 8, 5); channel c holds value c * 100
        let array = Array3::<u16>::from_shape_fn((3, 8, 5), |(c, _, _)| c as u16 * 100);
        let raster = NpyLoader.load(&npy_bytes(&array)).unwrap();

        assert_eq!(raster.num_channels(), 3);
        assert_eq!((raster.width, raster.height), (5, 8));
        assert!((raster.channel(2).unwrap()[7] - 200.0 / 65535.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_channel_last() {
        // (H, W, C) = (8, 5, 4); channel c holds value c as f32 / 4
        let array = Array3::<f32>::from_shape_fn((8, 5, 4), |(_, _, c)| c as f32 / 4.0);
        let raster = NpyLoader.load(&npy_bytes(&array)).unwrap();

        assert_eq!(raster.num_channels(), 4);
        assert_eq!((raster.width, raster.height), (5, 8));
        assert!((raster.channel(3).unwrap()[0] - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_first_axis_at_threshold_is_channel_last() {
        let array = Array3::<u8>::zeros((CHANNEL_FIRST_THRESHOLD, 6, 2));
        let raster = NpyLoader.load(&npy_bytes(&array)).unwrap();

        assert_eq!(raster.num_channels(), 2);
        assert_eq!((raster.width, raster.height), (6, CHANNEL_FIRST_THRESHOLD as u32));
    }

    #[test]
    fn test_rejects_four_dimensional_arrays() {
        let array = ndarray::Array4::<u8>::zeros((1, 2, 3, 4));
        let err = NpyLoader.load(&npy_bytes(&array)).unwrap_err();
        assert!(err.message.contains("dimensions"));
    }
}
