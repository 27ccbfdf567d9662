//! Page sizes for the formats the generated documents use.
//!
//! Sizes are in portrait orientation (width ≤ height); use [PageOrientation] to turn a
//! certificate sideways.
//!
//! ```
//! use invoice_gen::pagesize::{A4, PageOrientation};
//!
//! let (w, h) = A4.landscape();
//! assert!(w > h);
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));
pub const A3: PageSize = (Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A5: PageSize = (Pt(148.0 * 72.0 / 25.4), Pt(210.0 * 72.0 / 25.4));

/// Look up a page size by its common name, case-insensitively
pub fn by_name(name: &str) -> Option<PageSize> {
    match name.to_ascii_lowercase().as_str() {
        "letter" => Some(LETTER),
        "legal" => Some(LEGAL),
        "a3" => Some(A3),
        "a4" => Some(A4),
        "a5" => Some(A5),
        _ => None,
    }
}

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn portrait(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }

    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orientation_swaps_only_when_needed() {
        assert_eq!(A4.portrait(), A4);
        assert_eq!(A4.landscape(), (A4.1, A4.0));
        assert_eq!(A4.landscape().landscape(), A4.landscape());
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(by_name("A4"), Some(A4));
        assert_eq!(by_name("letter"), Some(LETTER));
        assert_eq!(by_name("tabloid"), None);
    }
}
