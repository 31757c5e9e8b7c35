//! Raster data structures and loaders for thumbnail sources.
//!
//! This module provides:
//! - `RasterData`: channel planes decoded from any supported source
//! - `LoaderRegistry`: extensible format detection and loading
//! - Built-in loaders for images (PNG, JPEG, TIFF, etc.) and NumPy (.npy) arrays
//!
//! ## Adding New Formats
//!
//! 1. Create a new loader in `loaders/` implementing `RasterLoader`
//! 2. Register it in `LoaderRegistry::new()`

mod loader;
pub mod loaders;
mod raster;

pub use loader::{LoaderError, LoaderRegistry, RasterLoader};
pub use raster::RasterData;
