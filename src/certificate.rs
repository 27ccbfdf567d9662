//! Course-completion certificate layout

use crate::colour::{colours, Colour};
use crate::draw::{rule, Align, DrawInstruction, Face, FontSpec, ImageAsset, TextMeasure};
use crate::error::PDFError;
use crate::layout::line_count;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;
use chrono::NaiveDate;

/// What a certificate says
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateDetails {
    /// The person the certificate is awarded to
    pub name: String,
    pub date: NaiveDate,
    /// Printed under the name, wrapped and centered
    pub achievement: String,
    /// Caption under the signature line
    pub instructor: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CertificateStyle {
    pub primary: Colour,
    pub secondary: Colour,
    /// Horizontal margin the achievement text wraps within
    pub margin: Pt,
    /// Where the title's line box starts
    pub title_top: Pt,
    pub title_font: FontSpec,
    pub subtitle_font: FontSpec,
    pub name_font: FontSpec,
    pub body_font: FontSpec,
    pub caption_font: FontSpec,
    pub date_font: FontSpec,
    pub text_colour: Colour,
    pub caption_colour: Colour,
    /// Length of the two signature lines
    pub rule_length: Pt,
    /// Distance from the top of the logo to the signature lines
    pub logo_advance: Pt,
    pub logo_width: Pt,
    pub logo: Option<ImageAsset>,
    /// Drawn above the right-hand line at `signature_scale` of its natural size
    pub signature: Option<ImageAsset>,
    pub signature_scale: f32,
}

impl Default for CertificateStyle {
    fn default() -> Self {
        CertificateStyle {
            primary: colours::PURPLE,
            secondary: Colour::new_rgba_over_white(121, 50, 168, 220),
            margin: Pt(28.35),
            title_top: Pt(100.0),
            title_font: FontSpec::new(Face::SansBold, 50.0),
            subtitle_font: FontSpec::new(Face::Sans, 28.0),
            name_font: FontSpec::new(Face::SerifItalic, 42.0),
            body_font: FontSpec::new(Face::Sans, 22.0),
            caption_font: FontSpec::new(Face::Sans, 12.0),
            date_font: FontSpec::new(Face::SerifItalic, 22.0),
            text_colour: colours::CHARCOAL,
            caption_colour: colours::SLATE,
            rule_length: Pt(250.0),
            logo_advance: Pt(65.0),
            logo_width: Pt(100.0),
            logo: None,
            signature: None,
            signature_scale: 0.35,
        }
    }
}

/// Two overlapping triangles in each of the top and bottom bands, each band a ninth of
/// the page deep. The secondary colour is drawn first so the primary sits on top.
pub fn layout_certificate_banners(
    page_width: Pt,
    page_height: Pt,
    primary: Colour,
    secondary: Colour,
) -> Vec<DrawInstruction> {
    let (w, h) = (page_width, page_height);
    let band = h / 9.0;
    let zero = Pt(0.0);
    let triangle = |points: [(Pt, Pt); 3], fill: Colour| DrawInstruction::Polygon {
        points: points.to_vec(),
        fill,
    };
    vec![
        triangle([(zero, zero), (zero, band), (w, zero)], secondary),
        triangle([(w, zero), (zero, zero), (w, band)], primary),
        triangle([(w, h - band), (w, h), (zero, h)], secondary),
        triangle([(w, h), (zero, h - band), (zero, h)], primary),
    ]
}

/// Lay out a full certificate on a page of size `page`
pub fn layout_certificate<M: TextMeasure + ?Sized>(
    measure: &M,
    style: &CertificateStyle,
    page: PageSize,
    details: &CertificateDetails,
) -> Result<Vec<DrawInstruction>, PDFError> {
    let (w, h) = page;
    let centre = w / 2.0;
    let mut ops = layout_certificate_banners(w, h, style.primary, style.secondary);

    let centred = |y: Pt, text: &str, font: FontSpec| {
        DrawInstruction::text(centre, y, text, font, style.text_colour, Align::Center)
    };

    let mut y = style.title_top;
    ops.push(centred(y, "Certificate of Completion", style.title_font));
    y += measure.line_height(style.title_font)? * 2.0;

    ops.push(centred(y, "This certificate is awarded to", style.subtitle_font));
    y += measure.line_height(style.subtitle_font)? * 2.0;

    ops.push(centred(y, &details.name, style.name_font));
    y += measure.line_height(style.name_font)? * 1.75;

    let body_height = measure.line_height(style.body_font)?;
    let body_line = body_height * 1.5;
    let body_width = w - style.margin * 2.0;
    let lines = line_count(measure, style.body_font, &details.achievement, body_width)?;
    ops.push(DrawInstruction::MultiLineText {
        rect: Rect::from_xywh(style.margin, y, body_width, body_line * lines as f32),
        text: details.achievement.clone(),
        font: style.body_font,
        colour: style.text_colour,
        align: Align::Center,
        line_height: body_line,
    });
    y += body_line * lines as f32 + body_height * 0.75;

    if let Some(logo) = &style.logo {
        ops.push(logo.placed(centre - style.logo_width / 2.0, y, style.logo_width));
    }
    y += style.logo_advance;

    // signature lines at a quarter and three quarters of the page
    let left = w / 4.0;
    let right = w * 0.75;
    for x in [left, right] {
        ops.push(rule(
            x - style.rule_length / 2.0,
            y,
            style.rule_length,
            Pt(1.0),
            colours::SLATE,
        ));
    }

    let caption_top = y + Pt(6.0);
    for (x, caption) in [(left, "Date"), (right, details.instructor.as_str())] {
        ops.push(DrawInstruction::text(
            x,
            caption_top,
            caption,
            style.caption_font,
            style.caption_colour,
            Align::Center,
        ));
    }

    let date_height = measure.line_height(style.date_font)?;
    ops.push(DrawInstruction::text(
        left,
        y - date_height - Pt(4.0),
        details.date.format("%-d/%-m/%Y").to_string(),
        style.date_font,
        style.text_colour,
        Align::Center,
    ));

    if let Some(signature) = &style.signature {
        let width = signature.width * style.signature_scale;
        let height = signature.height_at_width(width);
        ops.push(DrawInstruction::Image {
            rect: Rect::from_xywh(right - width / 2.0, y - height, width, height),
            path: signature.path.clone(),
        });
    }

    Ok(ops)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::{PageOrientation, A4};
    use crate::testing::FixedMeasure;
    use std::path::PathBuf;

    fn details() -> CertificateDetails {
        CertificateDetails {
            name: "Ada Lovelace".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            achievement: "For successfully completing all twenty programming exercises".to_string(),
            instructor: "Instructor - Jon Calhoun".to_string(),
        }
    }

    #[test]
    fn banners_are_a_ninth_of_the_page() {
        let (w, h) = (Pt(900.0), Pt(90.0));
        let ops = layout_certificate_banners(w, h, colours::PURPLE, colours::PLUM);
        assert_eq!(ops.len(), 4);
        assert_eq!(
            ops[1],
            DrawInstruction::Polygon {
                points: vec![(w, Pt(0.0)), (Pt(0.0), Pt(0.0)), (w, Pt(10.0))],
                fill: colours::PURPLE,
            }
        );
        assert_eq!(
            ops[3],
            DrawInstruction::Polygon {
                points: vec![(w, h), (Pt(0.0), Pt(80.0)), (Pt(0.0), h)],
                fill: colours::PURPLE,
            }
        );
    }

    #[test]
    fn honoree_and_date_are_printed() {
        let ops = layout_certificate(
            &FixedMeasure,
            &CertificateStyle::default(),
            A4.landscape(),
            &details(),
        )
        .unwrap();
        let texts: Vec<&str> = ops
            .iter()
            .filter_map(|op| match op {
                DrawInstruction::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"Ada Lovelace"));
        assert!(texts.contains(&"9/3/2024"));
        assert!(texts.contains(&"Instructor - Jon Calhoun"));
    }

    #[test]
    fn headings_are_centred_and_descend() {
        let (w, _) = A4.landscape();
        let ops = layout_certificate(
            &FixedMeasure,
            &CertificateStyle::default(),
            A4.landscape(),
            &details(),
        )
        .unwrap();
        let headings: Vec<(Pt, Pt)> = ops
            .iter()
            .filter_map(|op| match op {
                DrawInstruction::Text {
                    position,
                    align: Align::Center,
                    ..
                } if position.0 == w / 2.0 => Some(*position),
                _ => None,
            })
            .collect();
        assert_eq!(headings.len(), 3);
        assert!(headings.windows(2).all(|pair| pair[0].1 < pair[1].1));
    }

    #[test]
    fn images_are_only_drawn_when_configured() {
        let plain = layout_certificate(
            &FixedMeasure,
            &CertificateStyle::default(),
            A4.landscape(),
            &details(),
        )
        .unwrap();
        assert!(!plain.iter().any(|op| matches!(op, DrawInstruction::Image { .. })));

        let style = CertificateStyle {
            logo: Some(ImageAsset {
                path: PathBuf::from("images/logo.png"),
                width: Pt(400.0),
                height: Pt(300.0),
            }),
            signature: Some(ImageAsset {
                path: PathBuf::from("images/sig.svg"),
                width: Pt(200.0),
                height: Pt(100.0),
            }),
            ..CertificateStyle::default()
        };
        let ops = layout_certificate(&FixedMeasure, &style, A4.landscape(), &details()).unwrap();
        let images: Vec<Rect> = ops
            .iter()
            .filter_map(|op| match op {
                DrawInstruction::Image { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(images.len(), 2);
        // logo is 100pt wide, centred
        assert!((images[0].width().0 - 100.0).abs() < 1e-3);
        // signature at 35%, sitting on the line
        assert!((images[1].width().0 - 70.0).abs() < 1e-3);
        assert!((images[1].height().0 - 35.0).abs() < 1e-3);
    }
}
