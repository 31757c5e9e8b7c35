//! Encoded thumbnail artifacts and how a tooltip refers to them.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Encoding of a thumbnail artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThumbnailFormat {
    /// Baseline JPEG, displayable by any browser or webview
    Jpeg,
}

impl ThumbnailFormat {
    /// MIME type used in data URIs.
    pub fn mime(&self) -> &'static str {
        match self {
            ThumbnailFormat::Jpeg => "image/jpeg",
        }
    }
}

/// A re-encoded, display-ready rendition of a source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailArtifact {
    /// Encoded image bytes
    pub bytes: Vec<u8>,
    /// Encoding of `bytes`
    pub format: ThumbnailFormat,
    /// Width actually produced, in pixels
    pub width: u32,
    /// Height actually produced, in pixels
    pub height: u32,
}

impl ThumbnailArtifact {
    /// Self-describing `data:<mime>;base64,<payload>` string.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.format.mime(),
            STANDARD.encode(&self.bytes)
        )
    }
}

/// The image part of a tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Thumbnail {
    /// Locally decoded and re-encoded image
    Encoded(ThumbnailArtifact),
    /// Reference the rendering surface can fetch itself; passed through untouched
    Url(String),
    /// The image could not be rendered; metadata is still shown
    Unavailable,
}

impl Thumbnail {
    /// Source string for an image element, or `None` when unavailable.
    pub fn src(&self) -> Option<String> {
        match self {
            Thumbnail::Encoded(artifact) => Some(artifact.to_data_uri()),
            Thumbnail::Url(url) => Some(url.clone()),
            Thumbnail::Unavailable => None,
        }
    }

    /// Whether this is the "unavailable" marker.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Thumbnail::Unavailable)
    }

    /// The encoded artifact, if this thumbnail was rendered locally.
    pub fn artifact(&self) -> Option<&ThumbnailArtifact> {
        match self {
            Thumbnail::Encoded(artifact) => Some(artifact),
            _ => None,
        }
    }
}

/// Whether an image reference can be handed to the renderer as-is.
pub fn is_remote_ref(image_ref: &str) -> bool {
    let lower = image_ref.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("data:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_format() {
        let artifact = ThumbnailArtifact {
            bytes: vec![0xFF, 0xD8, 0xFF],
            format: ThumbnailFormat::Jpeg,
            width: 1,
            height: 1,
        };
        assert_eq!(artifact.to_data_uri(), "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn test_src_for_each_variant() {
        assert_eq!(
            Thumbnail::Url("https://example.org/a.png".into()).src().as_deref(),
            Some("https://example.org/a.png")
        );
        assert!(Thumbnail::Unavailable.src().is_none());
        assert!(Thumbnail::Unavailable.is_unavailable());
    }

    #[test]
    fn test_is_remote_ref() {
        assert!(is_remote_ref("https://example.org/cat.jpg"));
        assert!(is_remote_ref("HTTP://EXAMPLE.ORG/CAT.JPG"));
        assert!(is_remote_ref("data:image/png;base64,AAAA"));
        assert!(!is_remote_ref("/data/images/cat.jpg"));
        assert!(!is_remote_ref("images/http_dump.png"));
    }
}
