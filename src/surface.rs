//! A single-page PDF drawing surface.
//!
//! [PdfSurface] owns a [Document] with one page and replays [DrawInstruction]s onto it,
//! flipping page-space coordinates (origin top-left) into PDF space (origin
//! bottom-left). It also measures text with the fonts it has loaded, so the same
//! object can drive a layout and then draw it.

use crate::colour::Colour;
use crate::document::Document;
use crate::draw::{Align, DrawInstruction, Face, FontSpec, ImageAsset, Surface, TextMeasure};
use crate::font::Font;
use crate::image::Image;
use crate::info::Info;
use crate::layout::wrap_text;
use crate::page::{ImageLayout, Page, PathLayout, SpanFont, SpanLayout};
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use crate::PDFError;
use id_arena::Id;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

pub struct PdfSurface {
    document: Document,
    page: Page,
    fonts: HashMap<Face, Id<Font>>,
    images: HashMap<PathBuf, Id<Image>>,
}

impl PdfSurface {
    pub fn new(size: PageSize) -> PdfSurface {
        PdfSurface {
            document: Document::default(),
            page: Page::new(size, None),
            fonts: HashMap::new(),
            images: HashMap::new(),
        }
    }

    pub fn page_size(&self) -> PageSize {
        (self.page.width(), self.page.height())
    }

    /// Use `font` wherever `face` is asked for
    pub fn add_font(&mut self, face: Face, font: Font) {
        let id = self.document.add_font(font);
        self.fonts.insert(face, id);
    }

    /// Load a font file and use it for `face`
    pub fn load_font<P: AsRef<Path>>(&mut self, face: Face, path: P) -> Result<(), PDFError> {
        let font = Font::load_file(path)?;
        self.add_font(face, font);
        Ok(())
    }

    pub fn set_info(&mut self, info: Info) {
        self.document.set_info(info);
    }

    /// Load the image at `path` (once) and describe it for layout
    pub fn image_asset<P: AsRef<Path>>(&mut self, path: P) -> Result<ImageAsset, PDFError> {
        let path = path.as_ref();
        let id = self.image_id(path)?;
        let image = &self.document.images[id];
        Ok(ImageAsset {
            path: path.to_path_buf(),
            width: image.width,
            height: image.height,
        })
    }

    fn image_id(&mut self, path: &Path) -> Result<Id<Image>, PDFError> {
        if let Some(id) = self.images.get(path) {
            return Ok(*id);
        }
        let id = self.document.add_image(Image::new_from_disk(path)?);
        self.images.insert(path.to_path_buf(), id);
        Ok(id)
    }

    fn font(&self, face: Face) -> Result<(Id<Font>, &Font), PDFError> {
        let id = *self.fonts.get(&face).ok_or(PDFError::FontMissing(face))?;
        Ok((id, &self.document.fonts[id]))
    }

    /// Places one line of text whose line box starts at `top`, anchored at `x`
    fn text_line(
        &mut self,
        x: Pt,
        top: Pt,
        text: &str,
        spec: FontSpec,
        colour: Colour,
        align: Align,
    ) -> Result<(), PDFError> {
        if text.is_empty() {
            return Ok(());
        }
        let (id, font) = self.font(spec.face)?;
        let width = font.width_of_text(text, spec.size);
        let left = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        let baseline = self.page.height() - (top + font.ascent(spec.size));
        self.page.add_span(SpanLayout {
            text: text.to_string(),
            font: SpanFont {
                id,
                size: spec.size,
            },
            colour,
            coords: (left, baseline),
        });
        Ok(())
    }

    /// Write the finished page out as a PDF file
    pub fn finish<W: Write>(self, w: W) -> Result<(), PDFError> {
        let PdfSurface {
            mut document, page, ..
        } = self;
        document.add_page(page);
        document.write(w)
    }
}

/// Where line `index` of a wrapped block is anchored: the alignment edge of `rect`
/// and the top of that line's box
fn block_line_origin(rect: &Rect, align: Align, line_height: Pt, index: usize) -> (Pt, Pt) {
    let x = match align {
        Align::Left => rect.x1,
        Align::Center => rect.x1 + rect.width() / 2.0,
        Align::Right => rect.x2,
    };
    (x, rect.y1 + line_height * index as f32)
}

impl TextMeasure for PdfSurface {
    fn width_of_text(&self, text: &str, font: FontSpec) -> Result<Pt, PDFError> {
        Ok(self.font(font.face)?.1.width_of_text(text, font.size))
    }

    fn line_height(&self, font: FontSpec) -> Result<Pt, PDFError> {
        Ok(self.font(font.face)?.1.line_height(font.size))
    }

    fn ascent(&self, font: FontSpec) -> Result<Pt, PDFError> {
        Ok(self.font(font.face)?.1.ascent(font.size))
    }
}

impl Surface for PdfSurface {
    fn draw(&mut self, instruction: &DrawInstruction) -> Result<(), PDFError> {
        let page_height = self.page.height();
        match instruction {
            DrawInstruction::Polygon { points, fill } => {
                self.page.add_path(PathLayout {
                    points: points.iter().map(|&(x, y)| (x, page_height - y)).collect(),
                    fill: *fill,
                });
            }
            DrawInstruction::Rect { rect, fill } => {
                let Rect { x1, y1, x2, y2 } = rect.flip_vertical(page_height);
                self.page.add_path(PathLayout {
                    points: vec![(x1, y1), (x2, y1), (x2, y2), (x1, y2)],
                    fill: *fill,
                });
            }
            DrawInstruction::Text {
                position,
                text,
                font,
                colour,
                align,
            } => {
                self.text_line(position.0, position.1, text, *font, *colour, *align)?;
            }
            DrawInstruction::MultiLineText {
                rect,
                text,
                font,
                colour,
                align,
                line_height,
            } => {
                let lines = wrap_text(self, *font, text, rect.width())?;
                for (i, line) in lines.iter().enumerate() {
                    let (x, top) = block_line_origin(rect, *align, *line_height, i);
                    self.text_line(x, top, line, *font, *colour, *align)?;
                }
            }
            DrawInstruction::Image { rect, path } => {
                let image_id = self.image_id(path)?;
                self.page.add_image(ImageLayout {
                    image_id,
                    position: rect.flip_vertical(page_height),
                });
            }
        }
        Ok(())
    }
}
