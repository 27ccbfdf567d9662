//! Test doubles for the drawing boundary

use crate::draw::{DrawInstruction, FontSpec, Surface, TextMeasure};
use crate::error::PDFError;
use crate::units::Pt;

/// Every character advances half the font size; lines are 1.2× the size apart
pub(crate) struct FixedMeasure;

impl TextMeasure for FixedMeasure {
    fn width_of_text(&self, text: &str, font: FontSpec) -> Result<Pt, PDFError> {
        Ok(font.size * (0.5 * text.chars().count() as f32))
    }

    fn line_height(&self, font: FontSpec) -> Result<Pt, PDFError> {
        Ok(font.size * 1.2)
    }

    fn ascent(&self, font: FontSpec) -> Result<Pt, PDFError> {
        Ok(font.size * 0.8)
    }
}

/// Keeps whatever is drawn; optionally fails once `fail_after` instructions were drawn
#[derive(Default)]
pub(crate) struct Recorder {
    pub drawn: Vec<DrawInstruction>,
    pub fail_after: Option<usize>,
}

impl Surface for Recorder {
    fn draw(&mut self, instruction: &DrawInstruction) -> Result<(), PDFError> {
        if self.fail_after == Some(self.drawn.len()) {
            return Err(PDFError::PageMissing);
        }
        self.drawn.push(instruction.clone());
        Ok(())
    }
}
