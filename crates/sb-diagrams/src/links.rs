//! Image links for the remote diagram rendering service.
//!
//! Diagram source is encoded as URL-safe base64 (RFC 4648 section 5, padded)
//! and substituted into URL templates at the `{diagram}` placeholder.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;

use crate::consts::{DEFAULT_PNG_URL, DEFAULT_SVG_URL, DIAGRAM_PLACEHOLDER};

/// Error returned when decoding an encoded diagram.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    /// Segment is not valid URL-safe base64.
    #[error("invalid diagram encoding: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Decoded bytes are not UTF-8.
    #[error("diagram is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Encode diagram source for use as a URL path segment.
#[must_use]
pub fn encode_diagram(source: &str) -> String {
    URL_SAFE.encode(source.as_bytes())
}

/// Decode a segment produced by [`encode_diagram`].
pub fn decode_diagram(encoded: &str) -> Result<String, LinkError> {
    let bytes = URL_SAFE.decode(encoded)?;
    Ok(String::from_utf8(bytes)?)
}

/// Image URLs for one diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DiagramLinks {
    /// SVG rendering URL.
    pub svg_url: String,
    /// PNG rendering URL.
    pub png_url: String,
}

/// URL templates for SVG and PNG renderings.
///
/// # Example
///
/// ```
/// use sb_diagrams::{LinkTemplates, decode_diagram};
///
/// let links = LinkTemplates::default().links("graph TD; A-->B");
/// let segment = links.svg_url.rsplit('/').next().unwrap();
/// assert_eq!(decode_diagram(segment).unwrap(), "graph TD; A-->B");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTemplates {
    svg: String,
    png: String,
}

impl Default for LinkTemplates {
    fn default() -> Self {
        Self::new(DEFAULT_SVG_URL, DEFAULT_PNG_URL)
    }
}

impl LinkTemplates {
    /// Create templates from SVG and PNG URL patterns containing `{diagram}`.
    #[must_use]
    pub fn new(svg: impl Into<String>, png: impl Into<String>) -> Self {
        Self {
            svg: svg.into(),
            png: png.into(),
        }
    }

    /// Build image URLs for diagram source.
    #[must_use]
    pub fn links(&self, source: &str) -> DiagramLinks {
        let encoded = encode_diagram(source);
        DiagramLinks {
            svg_url: self.svg.replace(DIAGRAM_PLACEHOLDER, &encoded),
            png_url: self.png.replace(DIAGRAM_PLACEHOLDER, &encoded),
        }
    }
}
