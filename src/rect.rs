use crate::units::*;

/// A rectangle, specified by two opposite corners.
///
/// Layout code builds these in page space (origin top-left, `y1` is the top edge);
/// the PDF backend builds them in PDF space (origin bottom-left, `y1` is the bottom
/// edge). [Rect::flip_vertical] converts between the two.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first corner.
    pub x1: Pt,
    /// The y-coordinate of the first corner.
    pub y1: Pt,
    /// The x-coordinate of the second corner.
    pub x2: Pt,
    /// The y-coordinate of the second corner.
    pub y2: Pt,
}

impl Rect {
    /// Build a rectangle from its origin corner and its size
    pub fn from_xywh(x: Pt, y: Pt, width: Pt, height: Pt) -> Rect {
        Rect {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }

    /// Mirror the rectangle about the horizontal centre of a page `page_height` tall,
    /// keeping `y1 <= y2`
    pub fn flip_vertical(&self, page_height: Pt) -> Rect {
        Rect {
            x1: self.x1,
            y1: page_height - self.y2,
            x2: self.x2,
            y2: page_height - self.y1,
        }
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}
