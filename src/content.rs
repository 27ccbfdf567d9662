//! Content stream generation for pages.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{ImageLayout, PageContents, PathLayout, SpanFont, SpanLayout};
use id_arena::Arena;
use std::io::Write;

/// Turns page contents into PDF content stream operators. Coordinates must already
/// be in PDF space.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => render_text_spans(&mut content, spans, fonts)?,
            PageContents::Image(image) => render_image(&mut content, image)?,
            PageContents::Path(path) => render_path(&mut content, path)?,
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;
    write_font(content, current_font)?;
    write_colour(content, current_colour)?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write_font(content, current_font)?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_colour(content, current_colour)?;
        }

        write!(content, "BT\n")?;
        write!(content, "{} {} Td\n", span.coords.0 .0, span.coords.1 .0)?;
        write!(content, "<")?;
        if let Some(font) = fonts.get(current_font.id) {
            for ch in span.text.chars().filter(|ch| !ch.is_control()) {
                write!(content, "{:04x}", font.glyph_or_replacement(ch))?;
            }
        }
        write!(content, "> Tj\n")?;
        write!(content, "ET\n")?;
    }

    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_image(content: &mut Vec<u8>, image: &ImageLayout) -> Result<(), std::io::Error> {
    let position = image.position;
    write!(content, "q\n")?;
    write!(
        content,
        "{} 0 0 {} {} {} cm\n",
        position.width().0,
        position.height().0,
        position.x1.0,
        position.y1.0
    )?;
    write!(content, "/I{} Do\n", image.image_id.index())?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_path(content: &mut Vec<u8>, path: &PathLayout) -> Result<(), std::io::Error> {
    let mut points = path.points.iter();
    let Some((x, y)) = points.next() else {
        return Ok(());
    };

    write!(content, "q\n")?;
    write_colour(content, path.fill)?;
    write!(content, "{} {} m\n", x.0, y.0)?;
    for (x, y) in points {
        write!(content, "{} {} l\n", x.0, y.0)?;
    }
    write!(content, "h f\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_font(content: &mut Vec<u8>, font: SpanFont) -> Result<(), std::io::Error> {
    write!(content, "/F{} {} Tf\n", font.id.index(), font.size.0)
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::CMYK { c, m, y, k } => write!(content, "{c} {m} {y} {k} k\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::image::Image;
    use crate::rect::Rect;
    use crate::units::Pt;

    fn render(contents: &[PageContents]) -> String {
        let fonts: Arena<Font> = Arena::new();
        String::from_utf8(render_contents(contents, &fonts).unwrap()).unwrap()
    }

    #[test]
    fn nothing_renders_nothing() {
        assert_eq!(render(&[]), "");
        assert_eq!(render(&[PageContents::Text(Vec::new())]), "");
    }

    #[test]
    fn paths_are_closed_and_filled() {
        let rendered = render(&[PageContents::Path(PathLayout {
            points: vec![(Pt(0.0), Pt(0.0)), (Pt(10.0), Pt(0.0)), (Pt(10.0), Pt(5.0))],
            fill: colours::WHITE,
        })]);
        assert_eq!(rendered, "q\n1 g\n0 0 m\n10 0 l\n10 5 l\nh f\nQ\n");
    }

    #[test]
    fn images_are_scaled_into_place() {
        let mut images: Arena<Image> = Arena::new();
        let image_id = images.alloc(Image::new_raster(image::DynamicImage::new_rgb8(1, 1)));
        let rendered = render(&[PageContents::Image(ImageLayout {
            image_id,
            position: Rect::from_xywh(Pt(5.0), Pt(6.0), Pt(100.0), Pt(50.0)),
        })]);
        assert_eq!(rendered, "q\n100 0 0 50 5 6 cm\n/I0 Do\nQ\n");
    }

    #[test]
    fn colours_use_their_own_operators() {
        let mut out = Vec::new();
        write_colour(&mut out, Colour::Grey { g: 0.5 }).unwrap();
        write_colour(&mut out, Colour::CMYK { c: 1.0, m: 0.0, y: 0.0, k: 0.0 }).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0.5 g\n1 0 0 0 k\n");
    }
}
