#![allow(clippy::too_many_arguments)]
#![cfg_attr(test, allow(dead_code))]

//! # PDF Forge
//!
//! Programmatic PDF assembly: builds a complete document — indirect
//! objects, a hierarchical page tree with attribute inheritance,
//! per-page content streams, a cross-reference table, and a trailer —
//! and serializes it so standard viewers and text-extraction tools can
//! parse it without error.
//!
//! ## Core pieces
//!
//! - **Object registry**: sequential object numbering in creation
//!   order, byte-offset tracking during the single serialization pass
//! - **Page tree**: owned children, lookup-only parent links, lazy
//!   attribute inheritance, format-exact leaf counting
//! - **Content streams**: append-only operator sequences with
//!   locale-independent numeric formatting
//! - **Text layout**: fixed glyph-width metrics for the standard fonts,
//!   alignment and underline geometry, a scoped multi-call text builder
//! - **Serializer**: header, body, cross-reference table, and trailer
//!   with byte-exact offsets
//!
//! ## Quick start
//!
//! ```
//! use pdf_forge::{Document, DocumentConfig, FontOptions, PageAttributes};
//!
//! # fn main() -> pdf_forge::Result<()> {
//! let mut doc = Document::new(DocumentConfig::new().with_title("Hello"));
//! let page = doc.new_page(None, PageAttributes::letter());
//! let font = doc.font(FontOptions::new());
//!
//! doc.page(page).stringc(font, 24.0, 306.0, 426.0, "Hello, world")?;
//!
//! let bytes = doc.close()?;
//! assert!(bytes.starts_with(b"%PDF-1.4"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Core object model
pub mod config;
pub mod object;
pub mod registry;

// Document structure
pub mod document;
pub mod pages;

// Fonts and metrics
pub mod fonts;

// Images
pub mod image;

// Content emission and serialization
pub mod writer;

// Re-exports
pub use config::{DocumentConfig, PageMode, PdfVersion};
pub use document::{Document, PageHandle};
pub use error::{Error, Result};
pub use fonts::{BaseFont, FontEncoding, FontId, FontOptions, FontSubtype};
pub use image::{Anchor, ColorSpace, ImageDescriptor, ImageFilter, ImageId, ImagePlacement};
pub use pages::{PageAttributes, PageId, PageTree, ResourceBinder};
pub use writer::text::{Align, PrintOptions, TextBlock, TextOptions};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
