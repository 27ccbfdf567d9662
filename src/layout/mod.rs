//! Layout helpers shared by the document layouts and the PDF surface.
//!
//! Everything here is pure: text is measured through a [TextMeasure](crate::TextMeasure)
//! and nothing is drawn. Wrapping lives here so that a layout sizing a cell and the
//! surface filling it always agree on where lines break.
//!
//! ```
//! use invoice_gen::layout::Margins;
//! use invoice_gen::Pt;
//!
//! let margins = Margins::symmetric(Pt(36.0), Pt(40.0));
//! assert_eq!(margins.left, Pt(40.0));
//! ```

mod margins;
mod text;

pub use margins::*;
pub use text::*;
