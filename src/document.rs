use crate::{
    font::Font,
    image::Image,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    PDFError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

/// Holds everything that goes into a PDF until it is rendered with [Document::write].
/// Fonts and images are shared by every page and referenced by their arena ids.
#[derive(Default)]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    pub images: Arena<Image>,
}

impl Document {
    /// Metadata for the info dictionary. Without it no info dictionary is written.
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Append a page to the end of the document
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Render the document and write it to `w`. The whole file is assembled in memory
    /// first; object references are only assigned here.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), PDFError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
            images,
        } = self;

        let mut refs = ObjectReferences::new();
        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }
        for (id, image) in images.iter() {
            image.write(&mut refs, id.index(), &mut writer)?;
        }
        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(PDFError::PageMissing)?;
            page.write(&mut refs, page_index, &fonts, &images, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        let bytes = writer.finish();
        log::info!(
            "writing PDF: {} page(s), {} font(s), {} image(s), {} bytes",
            page_order.len(),
            fonts.len(),
            images.len(),
            bytes.len()
        );
        w.write_all(bytes.as_slice()).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::A5;

    #[test]
    fn empty_documents_are_still_pdfs() {
        let mut out: Vec<u8> = Vec::new();
        Document::default().write(&mut out).unwrap();
        assert!(out.starts_with(b"%PDF-"));
    }

    #[test]
    fn pages_are_counted_in_the_page_tree() {
        let mut document = Document::default();
        document.set_info(Info::new().title("Two pages"));
        document.add_page(Page::new(A5, None));
        document.add_page(Page::new(A5, None));

        let mut out: Vec<u8> = Vec::new();
        document.write(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("/Count 2"));
        assert!(text.contains("(Two pages)"));
    }
}
