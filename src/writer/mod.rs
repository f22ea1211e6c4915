//! Serialization-side machinery.
//!
//! ```text
//! Document API calls
//!     |
//! [ContentStreamBuilder] (per-page operator sequences)
//! [TextBlock]            (scoped text-object assembly)
//!     |
//! [write_document]       (header, body, xref table, trailer)
//!     |
//! [ObjectSerializer]     (object syntax)
//!     |
//! PDF bytes
//! ```

pub mod content_stream;
pub mod serializer;
pub mod text;
