//! Diagram-preserving conversion pipeline.
//!
//! extract diagrams → convert → reinject markers → fallback sweep.

use sb_diagrams::{extract, reinject};
use sb_renderer::{ConvertError, Converter};

/// Output of [`render_markdown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Final HTML.
    pub html: String,
    /// Number of diagrams extracted from the source.
    pub diagram_count: usize,
    /// Number of diagram code blocks repaired by the fallback sweep.
    pub recovered: usize,
    /// One entry per diagram whose marker did not survive conversion.
    pub warnings: Vec<String>,
}

/// Convert document text to HTML, keeping diagram source intact.
///
/// Only conversion can fail; extraction and reinjection are total. A diagram
/// whose marker the converter dropped is left out of the HTML and reported in
/// [`PipelineOutput::warnings`].
pub fn render_markdown(
    text: &str,
    converter: &dyn Converter,
) -> Result<PipelineOutput, ConvertError> {
    let (source, diagrams) = extract(text);
    if !diagrams.is_empty() {
        tracing::debug!(count = diagrams.len(), "Extracted diagrams");
    }

    let html = converter.convert(&source)?;
    let result = reinject(&html, &diagrams);

    if result.recovered > 0 {
        tracing::debug!(count = result.recovered, "Recovered diagram code blocks");
    }

    let warnings = result
        .missing
        .iter()
        .map(|index| {
            tracing::warn!(diagram = index, "Diagram marker lost during conversion");
            format!("diagram {index} was dropped during conversion")
        })
        .collect();

    Ok(PipelineOutput {
        html: result.html,
        diagram_count: diagrams.len(),
        recovered: result.recovered,
        warnings,
    })
}
