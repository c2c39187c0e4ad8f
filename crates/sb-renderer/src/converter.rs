//! Converter trait and the pulldown-cmark implementation.

use pulldown_cmark::{Options, Parser, html};

use crate::extension::Extension;

/// Default maximum document size accepted by [`MarkdownConverter`] (16 MiB).
const DEFAULT_MAX_INPUT_BYTES: usize = 16 * 1024 * 1024;

/// Error returned when conversion fails.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Input exceeds the configured size limit.
    #[error("document is {size} bytes, limit is {limit} bytes")]
    InputTooLarge {
        /// Input size in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
    /// Failure reported by a converter backend.
    #[error("conversion failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Document-to-HTML converter.
///
/// Implementations must pass raw HTML comments through unchanged. Any other
/// output detail is up to the implementation.
pub trait Converter: Send + Sync {
    /// Convert document text to HTML.
    fn convert(&self, text: &str) -> Result<String, ConvertError>;
}

impl<F> Converter for F
where
    F: Fn(&str) -> Result<String, ConvertError> + Send + Sync,
{
    fn convert(&self, text: &str) -> Result<String, ConvertError> {
        self(text)
    }
}

/// Configuration for [`MarkdownConverter`].
#[derive(Clone, Debug)]
pub struct ConverterOptions {
    /// Enabled syntax extensions.
    pub extensions: Vec<Extension>,
    /// Documents larger than this are rejected.
    pub max_input_bytes: usize,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            extensions: Extension::DEFAULT_SET.to_vec(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl ConverterOptions {
    /// Replace the extension set.
    #[must_use]
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = Extension>) -> Self {
        self.extensions = extensions.into_iter().collect();
        self
    }

    /// Set the maximum accepted document size.
    #[must_use]
    pub fn with_max_input_bytes(mut self, limit: usize) -> Self {
        self.max_input_bytes = limit;
        self
    }

    fn parser_options(&self) -> Options {
        self.extensions
            .iter()
            .fold(Options::empty(), |acc, ext| acc | ext.parser_option())
    }
}

/// Markdown converter backed by pulldown-cmark's HTML writer.
///
/// # Example
///
/// ```
/// use sb_renderer::{Converter, ConverterOptions, Extension, MarkdownConverter};
///
/// let converter = MarkdownConverter::new(
///     ConverterOptions::default().with_extensions([Extension::Tables]),
/// );
/// let html = converter.convert("| a |\n|---|\n| 1 |").unwrap();
/// assert!(html.contains("<table>"));
/// ```
#[derive(Clone, Debug)]
pub struct MarkdownConverter {
    options: Options,
    max_input_bytes: usize,
}

impl MarkdownConverter {
    /// Create a converter with a fixed extension set.
    #[must_use]
    pub fn new(options: ConverterOptions) -> Self {
        Self {
            options: options.parser_options(),
            max_input_bytes: options.max_input_bytes,
        }
    }
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new(ConverterOptions::default())
    }
}

impl Converter for MarkdownConverter {
    fn convert(&self, text: &str) -> Result<String, ConvertError> {
        if text.len() > self.max_input_bytes {
            return Err(ConvertError::InputTooLarge {
                size: text.len(),
                limit: self.max_input_bytes,
            });
        }

        let parser = Parser::new_ext(text, self.options);
        let mut output = String::with_capacity(text.len() + text.len() / 2);
        html::push_html(&mut output, parser);
        Ok(output)
    }
}
