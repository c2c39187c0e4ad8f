//! Marker protocol shared by the extractor and the reinjector.
//!
//! A marker is an HTML comment `<!-- {TAG}_{index} -->`. Markdown converters
//! emit raw HTML comments verbatim, so markers survive conversion unchanged
//! wherever they sit (own line or inline).

use crate::consts::DEFAULT_MARKER_TAG;

/// Closing part of every marker.
const MARKER_SUFFIX: &str = " -->";

/// Marker format for one document.
///
/// Extraction picks a tag whose marker prefix does not occur anywhere in the
/// source, so text that merely looks like a marker is never mistaken for one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerFormat {
    tag: String,
}

impl Default for MarkerFormat {
    fn default() -> Self {
        Self {
            tag: DEFAULT_MARKER_TAG.to_owned(),
        }
    }
}

impl MarkerFormat {
    /// Create a marker format with an explicit tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// Choose a marker format that cannot collide with `source`.
    ///
    /// Returns the default format unless its prefix already occurs in the
    /// source, in which case the tag is salted with the smallest counter
    /// (`MERMAID_DIAGRAM_1`, `MERMAID_DIAGRAM_2`, ...) whose prefix is absent.
    #[must_use]
    pub fn for_source(source: &str) -> Self {
        let default = Self::default();
        if !source.contains(&default.prefix()) {
            return default;
        }

        (1usize..)
            .map(|salt| Self::new(format!("{DEFAULT_MARKER_TAG}_{salt}")))
            .find(|format| !source.contains(&format.prefix()))
            .unwrap_or(default)
    }

    /// Text shared by all markers of this format, up to the ordinal.
    #[must_use]
    pub fn prefix(&self) -> String {
        format!("<!-- {}_", self.tag)
    }

    /// Marker for the diagram with the given ordinal.
    #[must_use]
    pub fn marker(&self, index: usize) -> String {
        format!("<!-- {}_{index}{MARKER_SUFFIX}", self.tag)
    }

    /// Parse the text following a marker prefix.
    ///
    /// Returns the ordinal and the number of bytes it spans together with the
    /// closing ` -->`, or None if the text does not complete a marker.
    pub(crate) fn parse_suffix(text: &str) -> Option<(usize, usize)> {
        let digits = text.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return None;
        }
        let index = text[..digits].parse().ok()?;
        text[digits..]
            .starts_with(MARKER_SUFFIX)
            .then_some((index, digits + MARKER_SUFFIX.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_marker() {
        let format = MarkerFormat::default();

        assert_eq!(format, MarkerFormat::new("MERMAID_DIAGRAM"));
        assert_eq!(format.marker(0), "<!-- MERMAID_DIAGRAM_0 -->");
        assert_eq!(format.marker(12), "<!-- MERMAID_DIAGRAM_12 -->");
        assert!(format.marker(7).starts_with(&format.prefix()));
    }

    #[test]
    fn test_for_source_without_collision() {
        let format = MarkerFormat::for_source("# Notes\n\n```mermaid\ngraph TD\n```");

        assert_eq!(format, MarkerFormat::default());
    }

    #[test]
    fn test_for_source_with_collision() {
        let format = MarkerFormat::for_source("Literal <!-- MERMAID_DIAGRAM_0 --> text");

        assert_eq!(format, MarkerFormat::new("MERMAID_DIAGRAM_1"));
        assert_eq!(format.marker(0), "<!-- MERMAID_DIAGRAM_1_0 -->");
    }

    #[test]
    fn test_for_source_skips_every_colliding_salt() {
        let source = "<!-- MERMAID_DIAGRAM_0 --> <!-- MERMAID_DIAGRAM_1_0 --> <!-- MERMAID_DIAGRAM_2_5 -->";

        let format = MarkerFormat::for_source(source);

        assert_eq!(format, MarkerFormat::new("MERMAID_DIAGRAM_3"));
        assert!(!source.contains(&format.prefix()));
    }

    #[test]
    fn test_parse_suffix() {
        assert_eq!(MarkerFormat::parse_suffix("0 -->"), Some((0, 5)));
        assert_eq!(MarkerFormat::parse_suffix("42 --> tail"), Some((42, 6)));
    }

    #[test]
    fn test_parse_suffix_rejects_incomplete() {
        assert_eq!(MarkerFormat::parse_suffix(" -->"), None);
        assert_eq!(MarkerFormat::parse_suffix("3"), None);
        assert_eq!(MarkerFormat::parse_suffix("3-->"), None);
        assert_eq!(MarkerFormat::parse_suffix("x -->"), None);
    }
}
