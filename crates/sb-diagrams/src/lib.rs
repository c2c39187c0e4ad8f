//! Mermaid diagram preservation for Study Buddy.
//!
//! Generic markdown conversion mangles diagram source (escaping, smart
//! punctuation, code highlighting). This crate keeps diagrams intact across
//! conversion in three steps:
//!
//! 1. [`extract`] pulls every ```` ```mermaid ```` block out of the raw source
//!    and leaves an HTML comment marker in its place.
//! 2. The caller converts the marker-bearing source with any converter that
//!    passes HTML comments through.
//! 3. [`reinject`] swaps each marker for a `<div class="mermaid">` container
//!    holding the original source, then repairs diagram code blocks that the
//!    converter rendered as ordinary `<pre><code>` markup.
//!
//! [`LinkTemplates`] builds image URLs for the remote rendering service.
//!
//! # Example
//!
//! ```
//! use sb_diagrams::{extract, reinject};
//!
//! let source = "before\n```mermaid\ngraph TD; A-->B\n```\nafter";
//! let (rewritten, diagrams) = extract(source);
//! assert_eq!(rewritten, "before\n<!-- MERMAID_DIAGRAM_0 -->\nafter");
//!
//! // Identity conversion for the example.
//! let result = reinject(&rewritten, &diagrams);
//! assert_eq!(
//!     result.html,
//!     "before\n<div class=\"mermaid\">graph TD; A-->B</div>\nafter"
//! );
//! ```

mod consts;
mod extract;
mod links;
mod marker;
mod reinject;

pub use consts::{CONTAINER_CLASS, DIAGRAM_LANGUAGE};
pub use extract::{DiagramSet, extract};
pub use links::{DiagramLinks, LinkError, LinkTemplates, decode_diagram, encode_diagram};
pub use marker::MarkerFormat;
pub use reinject::{Reinjected, diagram_container, reinject};
