//! Hover resolution: point id in, tooltip payload out.
//!
//! `HoverResolver::resolve` is synchronous and side-effect free apart from the
//! thumbnail cache, so the same id and display settings always produce the
//! same payload. Image failures never escape: they turn into an
//! "unavailable" thumbnail next to the point's metadata.

mod payload;
mod resolver;

pub use payload::{DisplayConfig, Resolution, TooltipPayload};
pub use resolver::HoverResolver;
