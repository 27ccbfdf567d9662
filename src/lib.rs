//! Invoices and course certificates, laid out as plain data and rendered to PDF.
//!
//! Layouts ([invoice::layout], [certificate]) measure text through a [TextMeasure] and
//! produce [DrawInstruction]s without touching the file system. A [PdfSurface] measures
//! with real embedded fonts and replays those instructions into a single-page PDF.

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod draw;
pub use draw::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Utility functions and structures to lay out text on pages
pub mod layout;

mod page;
pub use page::*;

/// Standard page sizes
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

mod error;
pub use error::*;

pub mod money;

pub mod invoice;

pub mod certificate;

mod config;
pub use config::*;

mod surface;
pub use surface::*;

#[cfg(test)]
mod testing;

/// Re-export PDF-writer functionality
pub use pdf_writer;
