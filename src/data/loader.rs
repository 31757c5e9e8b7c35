//! Trait-based raster loading system.
//!
//! Source images referenced by a point table come in many formats, from plain
//! photographs to multi-channel scientific arrays. Each format implements
//! `RasterLoader`; the `LoaderRegistry` picks the right one for a file.
//!
//! ## Supported Formats
//!
//! - **Standard Images**: PNG, JPEG, BMP, GIF, TIFF, WebP
//! - **NumPy Arrays**: `.npy` files with 2D (grayscale) or 3D (channel-first or channel-last) arrays
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vizumap::data::LoaderRegistry;
//!
//! let registry = LoaderRegistry::new();
//! let raster = registry.load(&bytes, Some("cell_042.npy"))?;
//! ```

use crate::data::RasterData;

/// Error type for loader operations.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}{message}", loader_prefix(.loader_id))]
pub struct LoaderError {
    /// Human-readable error message.
    pub message: String,
    /// The loader that produced this error (if known).
    pub loader_id: Option<&'static str>,
}

fn loader_prefix(loader_id: &Option<&'static str>) -> String {
    loader_id.map(|id| format!("[{}] ", id)).unwrap_or_default()
}

impl LoaderError {
    /// Create a new loader error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            loader_id: None,
        }
    }

    /// Create an error with loader context.
    pub fn with_loader(mut self, loader_id: &'static str) -> Self {
        self.loader_id = Some(loader_id);
        self
    }
}

/// Trait for raster format loaders.
pub trait RasterLoader: Send + Sync {
    /// Unique identifier for this loader (e.g., "image", "npy").
    fn id(&self) -> &'static str;

    /// File extensions this loader handles (lowercase, without dots).
    fn extensions(&self) -> &'static [&'static str];

    /// Check magic bytes to see if this loader can likely handle the data.
    fn can_load(&self, data: &[u8]) -> bool;

    /// Decode raw file bytes into channel planes.
    fn load(&self, data: &[u8]) -> Result<RasterData, LoaderError>;

    /// Priority for format detection (higher = checked first).
    fn priority(&self) -> i32 {
        0
    }
}

/// Registry of available raster loaders.
pub struct LoaderRegistry {
    loaders: Vec<Box<dyn RasterLoader>>,
}

impl LoaderRegistry {
    /// Create a new registry with all built-in loaders.
    pub fn new() -> Self {
        let mut registry = Self {
            loaders: Vec::new(),
        };

        registry.register(Box::new(super::loaders::ImageLoader));
        registry.register(Box::new(super::loaders::NpyLoader));

        registry
    }

    /// Register a new loader.
    pub fn register(&mut self, loader: Box<dyn RasterLoader>) {
        self.loaders.push(loader);
        self.loaders.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Get all supported file extensions.
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        let mut extensions: Vec<&'static str> = self
            .loaders
            .iter()
            .flat_map(|l| l.extensions().iter().copied())
            .collect();
        extensions.sort();
        extensions.dedup();
        extensions
    }

    fn loaders_for_extension(&self, ext: &str) -> impl Iterator<Item = &dyn RasterLoader> {
        self.loaders
            .iter()
            .filter(move |l| l.extensions().iter().any(|e| *e == ext))
            .map(|l| l.as_ref())
    }

    /// Load data, auto-detecting the format.
    ///
    /// Tries loaders in this order:
    /// 1. By file extension (if a filename is provided)
    /// 2. By magic byte detection
    /// 3. All loaders as fallback
    pub fn load(&self, data: &[u8], filename: Option<&str>) -> Result<RasterData, LoaderError> {
        let extension = filename
            .and_then(|f| f.rsplit_once('.'))
            .map(|(_, ext)| ext.to_lowercase());

        if let Some(ext) = extension.as_deref() {
            for loader in self.loaders_for_extension(ext) {
                match loader.load(data) {
                    Ok(result) => {
                        log::debug!("Loaded with {} loader (by extension)", loader.id());
                        return Ok(result);
                    }
                    Err(e) => log::trace!("Loader {} failed: {}", loader.id(), e),
                }
            }
        }

        if let Some(loader) = self.loaders.iter().find(|l| l.can_load(data)) {
            match loader.load(data) {
                Ok(result) => {
                    log::debug!("Loaded with {} loader (by detection)", loader.id());
                    return Ok(result);
                }
                Err(e) => log::trace!("Detected loader {} failed: {}", loader.id(), e),
            }
        }

        for loader in &self.loaders {
            if let Ok(result) = loader.load(data) {
                log::debug!("Loaded with {} loader (fallback)", loader.id());
                return Ok(result);
            }
        }

        Err(LoaderError::new(format!(
            "No loader could handle the data{}",
            filename
                .map(|f| format!(" (file: {})", f))
                .unwrap_or_default()
        )))
    }

    /// Get all registered loaders.
    pub fn loaders(&self) -> &[Box<dyn RasterLoader>] {
        &self.loaders
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_loader() {
        let err = LoaderError::new("bad header");
        assert_eq!(err.to_string(), "bad header");
        assert_eq!(err.with_loader("npy").to_string(), "[npy] bad header");

        let boxed: Box<dyn std::error::Error> = Box::new(LoaderError::new("x"));
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_registry_orders_by_priority() {
        let registry = LoaderRegistry::new();
        let ids: Vec<_> = registry.loaders().iter().map(|l| l.id()).collect();
        assert_eq!(ids, vec!["npy", "image"]);
    }

    #[test]
    fn test_supported_extensions() {
        let registry = LoaderRegistry::new();
        let extensions = registry.supported_extensions();

        assert!(extensions.contains(&"png"));
        assert!(extensions.contains(&"tif"));
        assert!(extensions.contains(&"npy"));
    }

    #[test]
    fn test_garbage_is_rejected() {
        let registry = LoaderRegistry::new();
        let err = registry
            .load(b"definitely not an image", Some("notes.txt"))
            .unwrap_err();
        assert!(err.message.contains("notes.txt"));
    }

    #[test]
    fn test_extension_mismatch_falls_back_to_detection() {
        let mut bytes = Vec::new();
        image::DynamicImage::ImageLuma8(image::GrayImage::new(2, 2))
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let raster = LoaderRegistry::new()
            .load(&bytes, Some("mislabelled.npy"))
            .unwrap();
        assert_eq!((raster.width, raster.height), (2, 2));
    }
}
