//! Subject listing and document rendering for Study Buddy.
//!
//! This crate provides:
//! - [`Site`]: subject and document enumeration plus the document view pipeline
//! - [`render_markdown`]: the diagram-preserving conversion pipeline on its own
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use sb_renderer::MarkdownConverter;
//! use sb_site::{Site, SiteConfig};
//! use sb_storage::FsStorage;
//!
//! let storage = Arc::new(FsStorage::new(PathBuf::from("docs")));
//! let converter = Arc::new(MarkdownConverter::default());
//! let site = Site::new(storage, converter, SiteConfig::default());
//!
//! for subject in site.subjects()? {
//!     println!("{subject}: {:?}", site.documents(&subject)?);
//! }
//!
//! let page = site.render("biology/cells.md")?;
//! println!("{}", page.html);
//! # Ok(())
//! # }
//! ```

mod document;
mod pipeline;
mod site;

pub use document::{Document, RenderedDocument};
pub use pipeline::{PipelineOutput, render_markdown};
pub use site::{RenderError, Site, SiteConfig, SiteError};
