//! Diagram reinjection into converted HTML.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::consts::CONTAINER_CLASS;
use crate::extract::DiagramSet;
use crate::marker::MarkerFormat;

/// Code block emitted for a ```` ```mermaid ```` fence by CommonMark converters.
static LANGUAGE_CLASS_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<pre><code class="language-mermaid">(.*?)</code></pre>"#).unwrap()
});

/// Fence text that a converter left inside a plain code block.
static RAW_FENCE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<pre><code>```mermaid\s*(.*?)\s*```</code></pre>").unwrap()
});

/// Any other code block whose opening tag mentions the diagram language.
static TAGGED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<pre><code[^>]*mermaid[^>]*>(.*?)</code></pre>").unwrap());

/// Result of [`reinject`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reinjected {
    /// Final HTML.
    pub html: String,
    /// Ordinals whose marker never appeared in the converted HTML.
    ///
    /// These diagrams are absent from [`html`](Self::html).
    pub missing: Vec<usize>,
    /// Number of code blocks rewritten into containers by the fallback sweep.
    pub recovered: usize,
}

/// Wrap diagram source in the container the client-side renderer picks up.
///
/// The source is inserted as-is, without escaping.
#[must_use]
pub fn diagram_container(source: &str) -> String {
    format!(r#"<div class="{CONTAINER_CLASS}">{source}</div>"#)
}

/// Put extracted diagrams back into converted HTML.
///
/// Every marker produced by [`extract`](crate::extract) is replaced by the
/// container for its diagram in a single scan. Afterwards a fallback sweep
/// turns code blocks that still hold diagram source into containers, whether
/// or not any diagrams were extracted. Captured code block text is kept as the
/// converter emitted it.
///
/// Marker-shaped text with an ordinal outside the set is left untouched.
#[must_use]
pub fn reinject(html: &str, diagrams: &DiagramSet) -> Reinjected {
    let (html, missing) = if diagrams.is_empty() {
        (html.to_owned(), Vec::new())
    } else {
        replace_markers(html, diagrams)
    };

    let (html, recovered) = recover_code_blocks(html);

    Reinjected {
        html,
        missing,
        recovered,
    }
}

/// Replace markers with containers, returning the HTML and unseen ordinals.
fn replace_markers(html: &str, diagrams: &DiagramSet) -> (String, Vec<usize>) {
    let prefix = diagrams.marker().prefix();
    let mut seen = vec![false; diagrams.len()];
    let mut result = String::with_capacity(html.len() + diagrams.iter().map(str::len).sum::<usize>());
    let mut remaining = html;

    while let Some(start) = remaining.find(&prefix) {
        result.push_str(&remaining[..start]);
        let after_prefix = &remaining[start + prefix.len()..];

        match MarkerFormat::parse_suffix(after_prefix) {
            Some((index, consumed)) => {
                if let Some(source) = diagrams.get(index) {
                    result.push_str(&diagram_container(source));
                    seen[index] = true;
                } else {
                    // Out of range, keep original marker
                    result.push_str(&remaining[start..start + prefix.len() + consumed]);
                }
                remaining = &after_prefix[consumed..];
            }
            None => {
                result.push_str(&prefix);
                remaining = after_prefix;
            }
        }
    }
    result.push_str(remaining);

    let missing = seen
        .iter()
        .enumerate()
        .filter_map(|(index, found)| (!found).then_some(index))
        .collect();

    (result, missing)
}

/// Rewrite diagram code blocks left by the converter into containers.
fn recover_code_blocks(mut html: String) -> (String, usize) {
    let mut recovered = 0;

    for pattern in [&*LANGUAGE_CLASS_BLOCK, &*RAW_FENCE_BLOCK, &*TAGGED_BLOCK] {
        let replaced = pattern.replace_all(&html, |caps: &Captures<'_>| {
            recovered += 1;
            diagram_container(&caps[1])
        });
        if let Cow::Owned(updated) = replaced {
            html = updated;
        }
    }

    (html, recovered)
}
