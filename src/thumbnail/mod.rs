//! Thumbnail rendering: source image in, embeddable JPEG data URI out.
//!
//! The pipeline for a local reference is:
//! read bytes → detect format and decode (`data::LoaderRegistry`) → normalize
//! to 3-channel RGB → downscale to fit → optional contrast gain → JPEG encode.
//! Remote references (URLs, data URIs) skip all of it and are handed to the
//! renderer directly.

mod artifact;
mod cache;
mod codec;
mod error;

pub use artifact::{Thumbnail, ThumbnailArtifact, ThumbnailFormat, is_remote_ref};
pub use cache::{ThumbnailCache, ThumbnailKey};
pub use codec::{RenderOptions, ThumbnailCodec, apply_contrast, compose_rgb, target_dimensions};
pub use error::ThumbnailError;
