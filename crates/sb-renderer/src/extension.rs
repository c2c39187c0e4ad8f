//! Markdown syntax extensions.
//!
//! The extension set is chosen once, from configuration, when the converter is
//! built. Individual conversions never change it.

use pulldown_cmark::Options;

/// Markdown syntax extension supported by [`MarkdownConverter`](crate::MarkdownConverter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Extension {
    /// Pipe tables.
    Tables,
    /// Footnote references and definitions.
    Footnotes,
    /// `~~deleted~~` text.
    Strikethrough,
    /// `- [ ] item` checkboxes.
    Tasklists,
    /// `$inline$` and `$$display$$` math spans.
    Math,
    /// `# Heading {#id .class}` attributes.
    HeadingAttributes,
    /// Definition lists.
    DefinitionList,
    /// `^superscript^` text.
    Superscript,
    /// `~subscript~` text.
    Subscript,
    /// Typographic quotes and dashes.
    SmartPunctuation,
    /// GitHub blockquote alerts (`> [!NOTE]`).
    Gfm,
}

impl Extension {
    /// Extensions enabled when configuration does not name any.
    pub const DEFAULT_SET: &[Self] = &[
        Self::Tables,
        Self::Footnotes,
        Self::Strikethrough,
        Self::Tasklists,
        Self::Math,
        Self::HeadingAttributes,
        Self::DefinitionList,
        Self::Superscript,
        Self::Subscript,
    ];

    /// pulldown-cmark parser option enabling this extension.
    #[must_use]
    pub(crate) fn parser_option(self) -> Options {
        match self {
            Self::Tables => Options::ENABLE_TABLES,
            Self::Footnotes => Options::ENABLE_FOOTNOTES,
            Self::Strikethrough => Options::ENABLE_STRIKETHROUGH,
            Self::Tasklists => Options::ENABLE_TASKLISTS,
            Self::Math => Options::ENABLE_MATH,
            Self::HeadingAttributes => Options::ENABLE_HEADING_ATTRIBUTES,
            Self::DefinitionList => Options::ENABLE_DEFINITION_LIST,
            Self::Superscript => Options::ENABLE_SUPERSCRIPT,
            Self::Subscript => Options::ENABLE_SUBSCRIPT,
            Self::SmartPunctuation => Options::ENABLE_SMART_PUNCTUATION,
            Self::Gfm => Options::ENABLE_GFM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_excludes_smart_punctuation() {
        assert!(!Extension::DEFAULT_SET.contains(&Extension::SmartPunctuation));
        assert!(Extension::DEFAULT_SET.contains(&Extension::Tables));
        assert!(Extension::DEFAULT_SET.contains(&Extension::Footnotes));
    }
}
