use crate::{
    refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{name_id, AsFaceRef, Face as TtfFace, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;
use std::path::Path;

/// A parsed TrueType / OpenType font. The whole file is embedded in the generated PDF
/// as a CID font with an Identity-H encoding, so text is written as glyph ids.
pub struct Font {
    pub face: OwnedFace,
}

/// Per-glyph data gathered once when the font is written: the character a glyph
/// stands for, its advance and its height in font units
struct GlyphInfo {
    ch: char,
    advance: u16,
    height: i16,
}

impl Font {
    /// Parse a font from raw bytes
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    /// Read and parse a font file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Font, PDFError> {
        let path = path.as_ref();
        log::debug!("loading font from {}", path.display());
        Font::load(std::fs::read(path)?)
    }

    fn ttf(&self) -> &TtfFace<'_> {
        self.face.as_face_ref()
    }

    fn scale(&self, size: Pt) -> Pt {
        size / self.ttf().units_per_em() as f32
    }

    fn lookup_name(&self, id: u16) -> Option<String> {
        self.ttf()
            .names()
            .into_iter()
            .find(|name| name.name_id == id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, if it carries one
    pub fn name(&self) -> Option<String> {
        self.lookup_name(name_id::FULL_NAME)
    }

    /// The family name of the font, if it carries one
    pub fn family(&self) -> Option<String> {
        self.lookup_name(name_id::FAMILY)
    }

    /// Distance from the baseline to the top of the font at `size`
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scale(size) * self.ttf().ascender() as f32
    }

    /// Distance from the baseline to the bottom of the font at `size`; usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scale(size) * self.ttf().descender() as f32
    }

    /// Extra space between lines at `size`
    pub fn leading(&self, size: Pt) -> Pt {
        self.scale(size) * self.ttf().line_gap() as f32
    }

    /// How far below one line of text the next one starts
    pub fn line_height(&self, size: Pt) -> Pt {
        self.leading(size) + self.ascent(size) - self.descent(size)
    }

    /// Advance width of `text` at `size`. Characters the font has no glyph for are
    /// measured as the glyph they will be replaced with.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Pt {
        let scaling = self.scale(size);
        text.chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| {
                self.ttf()
                    .glyph_hor_advance(GlyphId(self.glyph_or_replacement(ch)))
                    .unwrap_or_default() as f32
            })
            .map(|advance| scaling * advance)
            .sum()
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.ttf().glyph_index(ch).map(|i| i.0)
    }

    /// The glyph to draw for `ch`: its own, U+FFFD, `?`, or `.notdef` as a last resort
    pub fn glyph_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    /// Every glyph reachable from a unicode cmap subtable, keyed (and so sorted) by id
    fn glyphs(&self) -> BTreeMap<u16, GlyphInfo> {
        let face = self.ttf();
        let mut glyphs: BTreeMap<u16, GlyphInfo> = BTreeMap::new();
        let Some(cmap) = face.tables().cmap else {
            return glyphs;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let Ok(ch) = char::try_from(codepoint) else {
                    return;
                };
                let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) else {
                    return;
                };
                let Some(advance) = face.glyph_hor_advance(gid) else {
                    return;
                };
                let height = face
                    .glyph_bounding_box(gid)
                    .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                    .unwrap_or(1000);
                glyphs.entry(gid.0).or_insert(GlyphInfo {
                    ch,
                    advance,
                    height,
                });
            });
        }

        glyphs
    }

    fn write_font_data(&self, refs: &mut ObjectReferences, index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::FontData(index));
        writer
            .stream(id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);
        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        index: usize,
        glyphs: &BTreeMap<u16, GlyphInfo>,
        writer: &mut Pdf,
    ) -> Ref {
        let data_id = self.write_font_data(refs, index, writer);
        let face = self.ttf();
        let scaling = 1000.0 / face.units_per_em() as f32;

        let max_width = glyphs.values().map(|g| g.advance).max().unwrap_or_default();
        let max_height = glyphs.values().map(|g| g.height).max().unwrap_or_default();
        let sum_width: f32 = glyphs.values().map(|g| g.advance as f32).sum();
        let avg_width = if glyphs.is_empty() {
            0.0
        } else {
            sum_width / glyphs.len() as f32
        };

        let fallback = format!("F{index}");
        let name = self.name().unwrap_or_else(|| fallback.clone());
        let family = self.family().unwrap_or(fallback);

        let id = refs.gen(RefType::FontDescriptor(index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::empty();
        flags.set(FontFlags::FIXED_PITCH, face.is_monospaced());
        flags.set(FontFlags::ITALIC, face.is_italic());
        descriptor.flags(flags);

        descriptor.bbox(pdf_writer::Rect::new(
            0.0,
            0.0,
            sum_width * scaling,
            max_height as f32 * scaling,
        ));
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face.capital_height();
        descriptor.cap_height(cap_height.map(|h| h as f32 * scaling).unwrap_or(1000.0));
        descriptor.x_height(
            face.x_height().or(cap_height).unwrap_or_default() as f32 * scaling,
        );
        // truetype carries no stem widths
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);
        descriptor.font_file2(data_id);

        id
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        index: usize,
        glyphs: &BTreeMap<u16, GlyphInfo>,
        writer: &mut Pdf,
    ) -> Ref {
        let descriptor_id = self.write_descriptor(refs, index, glyphs, writer);
        let scaling = 1000.0 / self.ttf().units_per_em() as f32;

        let id = refs.gen(RefType::CidFont(index));
        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);

        // the most frequent advance becomes the default width
        let mut counts: BTreeMap<u16, usize> = BTreeMap::new();
        for glyph in glyphs.values() {
            *counts.entry(glyph.advance).or_default() += 1;
        }
        let default_width = counts
            .iter()
            .max_by_key(|&(_, count)| *count)
            .map(|(&advance, _)| advance as f32 * scaling)
            .unwrap_or(1000.0);

        // runs of consecutive glyph ids share a widths entry
        let mut widths = cid_font.widths();
        widths.consecutive(0, [1000.0]);
        let mut runs: Vec<(u16, Vec<f32>)> = Vec::new();
        for (&gid, glyph) in glyphs.iter() {
            let width = glyph.advance as f32 * scaling;
            match runs.last_mut() {
                Some((start, run)) if *start as usize + run.len() == gid as usize => run.push(width),
                _ => runs.push((gid, vec![width])),
            }
        }
        for (start, run) in runs {
            widths.consecutive(start, run);
        }
        widths.finish();

        cid_font.default_width(default_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        index: usize,
        glyphs: &BTreeMap<u16, GlyphInfo>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(index));
        let cmap = to_unicode_cmap(glyphs.iter().map(|(&gid, glyph)| (gid, glyph.ch)));
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);
        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let index = id.index();
        log::debug!("writing font F{index} ({})", self.name().unwrap_or_default());

        let glyphs = self.glyphs();
        let font_id = refs.gen(RefType::Font(index));
        let cid_font_id = self.write_cid(refs, index, &glyphs, writer);
        let to_unicode_id = self.write_to_unicode(refs, index, &glyphs, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

/// A ToUnicode CMap mapping glyph ids back to characters, so text in the PDF can be
/// copied and searched. `bfchar` blocks hold at most 100 entries sharing a high byte.
fn to_unicode_cmap<I: IntoIterator<Item = (u16, char)>>(glyphs: I) -> String {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo\n\
         << /Registry (Adobe)\n\
         /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    let mut blocks: Vec<Vec<(u16, char)>> = Vec::new();
    for (gid, ch) in glyphs {
        match blocks.last_mut() {
            Some(block) if block.len() < 100 && block[0].0 >> 8 == gid >> 8 => block.push((gid, ch)),
            _ => blocks.push(vec![(gid, ch)]),
        }
    }

    for block in blocks {
        cmap.push_str(&format!("{} beginbfchar\n", block.len()));
        for (gid, ch) in block {
            let mut units = [0u16; 2];
            let hex: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|unit| format!("{unit:04x}"))
                .collect();
            cmap.push_str(&format!("<{gid:04x}> <{hex}>\n"));
        }
        cmap.push_str("endbfchar\n");
    }

    cmap.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");
    cmap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmap_blocks_split_on_high_byte_and_size() {
        let glyphs = (1u16..=150)
            .map(|gid| (gid, 'a'))
            .chain([(0x0100, 'b'), (0x0101, '😀')]);
        let cmap = to_unicode_cmap(glyphs);
        assert!(cmap.contains("100 beginbfchar"));
        assert!(cmap.contains("50 beginbfchar"));
        assert!(cmap.contains("2 beginbfchar"));
        assert!(cmap.contains("<0001> <0061>"));
        // characters outside the BMP map to a surrogate pair
        assert!(cmap.contains("<0101> <d83dde00>"));
        assert!(cmap.ends_with("end end\n"));
    }

    #[test]
    fn garbage_is_not_a_font() {
        assert!(matches!(
            Font::load(b"definitely not a font".to_vec()),
            Err(PDFError::FaceParsingError(_))
        ));
    }

    #[test]
    fn missing_font_files_are_io_errors() {
        assert!(matches!(
            Font::load_file("no/such/font.ttf"),
            Err(PDFError::Io(_))
        ));
    }
}
