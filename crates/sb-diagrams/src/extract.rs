//! Diagram extraction from raw markdown source.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::consts::DIAGRAM_LANGUAGE;
use crate::marker::MarkerFormat;

/// Diagram fence: ```` ```mermaid ```` followed by whitespace (or the closing
/// fence directly), lazily up to the first closing ```` ``` ````.
static DIAGRAM_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s)```{}(\s.*?)?```",
        regex::escape(DIAGRAM_LANGUAGE)
    ))
    .unwrap()
});

/// Diagrams extracted from one document, in discovery order.
///
/// Carries the [`MarkerFormat`] used during extraction so reinjection looks
/// for exactly the markers that were emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramSet {
    marker: MarkerFormat,
    sources: Vec<String>,
}

impl DiagramSet {
    /// Create a set from a marker format and ordered diagram sources.
    #[must_use]
    pub fn new(marker: MarkerFormat, sources: Vec<String>) -> Self {
        Self { marker, sources }
    }

    /// Marker format the diagrams were extracted with.
    #[must_use]
    pub fn marker(&self) -> &MarkerFormat {
        &self.marker
    }

    /// Number of diagrams.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no diagrams were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Diagram source for an ordinal.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.sources.get(index).map(String::as_str)
    }

    /// Diagram sources in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(String::as_str)
    }
}

/// Extract diagram blocks from markdown source.
///
/// Each ```` ```mermaid ```` block (fences included) is replaced by the marker
/// for its ordinal, and its whitespace-trimmed body is appended to the
/// returned [`DiagramSet`]. Ordinals follow a single left-to-right scan over
/// non-overlapping matches.
///
/// When the source holds no diagram block it is returned borrowed and the set
/// is empty. Unterminated fences never match and stay in the text as-is.
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
/// use sb_diagrams::extract;
///
/// let (rewritten, diagrams) = extract("# Plain text");
/// assert!(matches!(rewritten, Cow::Borrowed("# Plain text")));
/// assert!(diagrams.is_empty());
/// ```
pub fn extract(source: &str) -> (Cow<'_, str>, DiagramSet) {
    if !DIAGRAM_FENCE.is_match(source) {
        return (Cow::Borrowed(source), DiagramSet::default());
    }

    let marker = MarkerFormat::for_source(source);
    let mut sources = Vec::new();

    let rewritten = DIAGRAM_FENCE.replace_all(source, |caps: &Captures<'_>| {
        let body = caps.get(1).map_or("", |m| m.as_str().trim());
        let placeholder = marker.marker(sources.len());
        sources.push(body.to_owned());
        placeholder
    });

    (rewritten, DiagramSet::new(marker, sources))
}
