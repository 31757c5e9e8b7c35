//! Error types for thumbnail rendering.

use std::path::PathBuf;
use thiserror::Error;

use crate::data::LoaderError;

/// Errors that can occur while turning a source image into a thumbnail.
///
/// None of these are fatal to a session: the hover resolver replaces the
/// thumbnail with an "unavailable" marker and still shows the metadata.
#[derive(Error, Debug)]
pub enum ThumbnailError {
    /// The image reference could not be opened
    #[error("Image not found: {path:?}")]
    ImageNotFound {
        /// Path that failed to open
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not in any supported image format
    #[error("Failed to decode {path:?}: {source}")]
    DecodeError {
        /// Path of the undecodable file
        path: PathBuf,
        /// Loader failure details
        #[source]
        source: LoaderError,
    },

    /// A single-channel view was requested for a channel the image lacks
    #[error("Channel {channel} requested but image has {available} channel(s)")]
    InvalidChannel {
        /// Requested channel index
        channel: usize,
        /// Number of channels in the source
        available: usize,
    },

    /// Re-encoding the thumbnail failed
    #[error("Failed to encode thumbnail: {0}")]
    EncodeError(#[from] image::ImageError),
}
