//! Markdown to HTML conversion for Study Buddy.
//!
//! This crate provides the generic converter used by the document view
//! pipeline. The pipeline only depends on the [`Converter`] trait; the
//! pulldown-cmark backed [`MarkdownConverter`] is the default implementation.
//!
//! # Converter Contract
//!
//! Raw HTML comments in the input must reach the output byte-for-byte. The
//! diagram pipeline embeds its placeholders as HTML comments and relies on
//! this to find them again after conversion.
//!
//! # Example
//!
//! ```
//! use sb_renderer::{Converter, ConverterOptions, MarkdownConverter};
//!
//! let converter = MarkdownConverter::new(ConverterOptions::default());
//! let html = converter.convert("# Hello\n\n<!-- kept -->\n").unwrap();
//!
//! assert!(html.contains("<h1>Hello</h1>"));
//! assert!(html.contains("<!-- kept -->"));
//! ```

mod converter;
mod extension;
mod util;

pub use converter::{ConvertError, Converter, ConverterOptions, MarkdownConverter};
pub use extension::Extension;
pub use util::escape_html;
