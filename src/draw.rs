//! Draw instructions: the boundary between pure layout and a drawing backend.
//!
//! Layout functions produce a `Vec<DrawInstruction>` in page space (origin at the
//! top-left corner, y growing downwards). A [Surface] replays them; [crate::PdfSurface]
//! turns them into a PDF page, tests record them.

use crate::colour::Colour;
use crate::error::PDFError;
use crate::rect::Rect;
use crate::units::Pt;
use std::path::PathBuf;

/// The typefaces the generated documents are set in
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Face {
    Sans,
    SansBold,
    Serif,
    SerifItalic,
}

impl Face {
    pub const ALL: [Face; 4] = [Face::Sans, Face::SansBold, Face::Serif, Face::SerifItalic];
}

/// A face at a given size
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontSpec {
    pub face: Face,
    pub size: Pt,
}

impl FontSpec {
    pub const fn new(face: Face, size: f32) -> FontSpec {
        FontSpec {
            face,
            size: Pt(size),
        }
    }
}

/// Horizontal alignment of a run of text relative to its anchor. For single lines the
/// anchor x is the left edge, the centre or the right edge of the text; for blocks the
/// lines are aligned inside the block's width.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// One positioned drawing primitive. Text positions name the *top* of the line box;
/// the surface drops the baseline by the font's ascent.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawInstruction {
    /// A filled, closed polygon
    Polygon {
        points: Vec<(Pt, Pt)>,
        fill: Colour,
    },
    /// A filled rectangle
    Rect { rect: Rect, fill: Colour },
    /// A single line of text
    Text {
        position: (Pt, Pt),
        text: String,
        font: FontSpec,
        colour: Colour,
        align: Align,
    },
    /// Text wrapped to the width of `rect`, one line every `line_height`
    MultiLineText {
        rect: Rect,
        text: String,
        font: FontSpec,
        colour: Colour,
        align: Align,
        line_height: Pt,
    },
    /// A raster or SVG image stretched over `rect`
    Image { rect: Rect, path: PathBuf },
}

impl DrawInstruction {
    /// A single line of text whose line box starts at `(x, y)`
    pub fn text<S: Into<String>>(
        x: Pt,
        y: Pt,
        text: S,
        font: FontSpec,
        colour: Colour,
        align: Align,
    ) -> DrawInstruction {
        DrawInstruction::Text {
            position: (x, y),
            text: text.into(),
            font,
            colour,
            align,
        }
    }
}

/// An image file together with its natural size, so layouts can scale it without
/// touching the file system
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAsset {
    pub path: PathBuf,
    pub width: Pt,
    pub height: Pt,
}

impl ImageAsset {
    /// Height of the image when scaled to `width`, keeping its aspect ratio
    pub fn height_at_width(&self, width: Pt) -> Pt {
        if self.width.0 <= 0.0 {
            return Pt(0.0);
        }
        self.height * (width / self.width)
    }

    /// Place the image with its top-left corner at `(x, y)`, `width` wide
    pub fn placed(&self, x: Pt, y: Pt, width: Pt) -> DrawInstruction {
        DrawInstruction::Image {
            rect: Rect::from_xywh(x, y, width, self.height_at_width(width)),
            path: self.path.clone(),
        }
    }
}

/// Font metrics needed to lay text out without drawing it
pub trait TextMeasure {
    /// The advance width of `text` when set in `font`
    fn width_of_text(&self, text: &str, font: FontSpec) -> Result<Pt, PDFError>;

    /// How far apart successive lines of `font` sit
    fn line_height(&self, font: FontSpec) -> Result<Pt, PDFError>;

    /// Distance from the top of a line to its baseline
    fn ascent(&self, font: FontSpec) -> Result<Pt, PDFError>;
}

/// Anything draw instructions can be replayed against
pub trait Surface {
    fn draw(&mut self, instruction: &DrawInstruction) -> Result<(), PDFError>;
}

/// Replay every instruction in order, stopping at the first failure
pub fn replay<S: Surface + ?Sized>(
    surface: &mut S,
    instructions: &[DrawInstruction],
) -> Result<(), PDFError> {
    log::debug!("replaying {} draw instructions", instructions.len());
    for instruction in instructions {
        surface.draw(instruction)?;
    }
    Ok(())
}

/// A thin horizontal rule, as used for table separators and signature lines
pub fn rule(x: Pt, y: Pt, width: Pt, thickness: Pt, fill: Colour) -> DrawInstruction {
    DrawInstruction::Rect {
        rect: Rect::from_xywh(x, y, width, thickness),
        fill,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::testing::Recorder;

    #[test]
    fn replay_preserves_order() {
        let instructions = vec![
            rule(Pt(0.0), Pt(0.0), Pt(10.0), Pt(1.0), colours::BLACK),
            DrawInstruction::Image {
                rect: Rect::from_xywh(Pt(1.0), Pt(2.0), Pt(3.0), Pt(4.0)),
                path: PathBuf::from("logo.png"),
            },
        ];
        let mut recorder = Recorder::default();
        replay(&mut recorder, &instructions).expect("recorder never fails");
        assert_eq!(recorder.drawn, instructions);
    }

    #[test]
    fn images_keep_their_aspect_ratio() {
        let logo = ImageAsset {
            path: PathBuf::from("logo.png"),
            width: Pt(200.0),
            height: Pt(100.0),
        };
        assert_eq!(logo.height_at_width(Pt(50.0)), Pt(25.0));
        assert_eq!(
            logo.placed(Pt(10.0), Pt(20.0), Pt(100.0)),
            DrawInstruction::Image {
                rect: Rect::from_xywh(Pt(10.0), Pt(20.0), Pt(100.0), Pt(50.0)),
                path: PathBuf::from("logo.png"),
            }
        );
    }

    #[test]
    fn replay_stops_at_the_first_failure() {
        let instructions = vec![
            rule(Pt(0.0), Pt(0.0), Pt(10.0), Pt(1.0), colours::BLACK),
            rule(Pt(0.0), Pt(5.0), Pt(10.0), Pt(1.0), colours::BLACK),
        ];
        let mut recorder = Recorder {
            fail_after: Some(1),
            ..Recorder::default()
        };
        assert!(replay(&mut recorder, &instructions).is_err());
        assert_eq!(recorder.drawn.len(), 1);
    }
}
