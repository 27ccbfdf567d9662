//! Invoice layout: turns an [Invoice] into positioned [DrawInstruction]s.
//!
//! Each step takes the vertical cursor it should start from and hands back the cursor
//! where the next step should continue, so the page is built top to bottom in a single
//! pass with no shared mutable position.

use super::{Company, Invoice, InvoiceTotals, LineItem};
use crate::colour::{colours, Colour};
use crate::draw::{rule, Align, DrawInstruction, Face, FontSpec, ImageAsset, TextMeasure};
use crate::error::PDFError;
use crate::layout::line_count;
use crate::money::Currency;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;

/// Width of the unit price and quantity columns
const NUMBER_COLUMN_WIDTH: Pt = Pt(80.0);
/// Width of the amount column, and of the value column in the totals block
const AMOUNT_COLUMN_WIDTH: Pt = Pt(119.5);
/// Width of the label column in the totals block
const TOTALS_LABEL_WIDTH: Pt = Pt(100.0);
/// Width of each contact / address block in the banner
const HEADER_BLOCK_WIDTH: Pt = Pt(124.0);
const RULE_THICKNESS: Pt = Pt(1.0);

/// Colours, typefaces and fixed distances of the invoice design
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceStyle {
    /// Height of the top banner; the bottom banner is scaled from it
    pub banner_height: Pt,
    /// Left and right page margin
    pub indent: Pt,
    pub banner_colour: Colour,
    /// "INVOICE" in the top banner
    pub title_font: FontSpec,
    /// Banner blocks, summary labels and table headings
    pub small_font: FontSpec,
    /// Summary values and line items
    pub body_font: FontSpec,
    /// The invoice total in the summary block
    pub total_font: FontSpec,
    /// Subtotal, tax and total figures
    pub totals_font: FontSpec,
    pub label_colour: Colour,
    pub text_colour: Colour,
    pub rule_colour: Colour,
    /// Drawn in the top banner next to the title when present
    pub logo: Option<ImageAsset>,
}

impl Default for InvoiceStyle {
    fn default() -> Self {
        InvoiceStyle {
            banner_height: Pt(94.0),
            indent: Pt(40.0),
            banner_colour: colours::PLUM,
            title_font: FontSpec::new(Face::SansBold, 40.0),
            small_font: FontSpec::new(Face::Sans, 12.0),
            body_font: FontSpec::new(Face::Serif, 14.0),
            total_font: FontSpec::new(Face::SansBold, 30.0),
            totals_font: FontSpec::new(Face::Sans, 14.0),
            label_colour: colours::SLATE,
            text_colour: colours::CHARCOAL,
            rule_colour: colours::SILVER,
            logo: None,
        }
    }
}

/// Top and bottom banners for a page `page_width` × `page_height`.
///
/// The top banner slants from `banner_height` deep on the right to 80% of that on
/// the left; the bottom banner rises 20% of `banner_height` on the left and 10% on
/// the right.
pub fn layout_banners(
    page_width: Pt,
    page_height: Pt,
    banner_height: Pt,
    fill: Colour,
) -> (DrawInstruction, DrawInstruction) {
    let (w, h, b) = (page_width, page_height, banner_height);
    let zero = Pt(0.0);
    let top = DrawInstruction::Polygon {
        points: vec![(zero, zero), (w, zero), (w, b), (zero, b * 0.8)],
        fill,
    };
    let bottom = DrawInstruction::Polygon {
        points: vec![(zero, h), (zero, h - b * 0.2), (w, h - b * 0.1), (w, h)],
        fill,
    };
    (top, bottom)
}

/// Horizontal placement of the line-item table
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Columns {
    /// Left edge of the description column
    pub description_x: Pt,
    /// Descriptions wrap at this width
    pub description_width: Pt,
    /// The remaining columns are right-aligned on these edges
    pub unit_price_right: Pt,
    pub quantity_right: Pt,
    pub amount_right: Pt,
    /// Width of the separator rules below each row
    pub rule_width: Pt,
}

impl Columns {
    /// Columns for a table starting at `start_x` on a page `page_width` wide, with a
    /// right margin equal to `start_x`
    pub fn new(start_x: Pt, page_width: Pt) -> Columns {
        let description_width = page_width / 2.65 + Pt(1.5);
        let unit_price_right = start_x + description_width + NUMBER_COLUMN_WIDTH;
        Columns {
            description_x: start_x,
            description_width,
            unit_price_right,
            quantity_right: unit_price_right + NUMBER_COLUMN_WIDTH,
            amount_right: page_width - start_x - Pt(2.0),
            rule_width: page_width - start_x * 2.0,
        }
    }
}

/// The laid out page together with the totals it shows
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDrawing {
    pub instructions: Vec<DrawInstruction>,
    pub totals: InvoiceTotals,
}

/// Lays invoices out against a set of font metrics. Holds only borrowed
/// configuration, so one engine can lay out any number of invoices.
pub struct InvoiceLayout<'a, M: TextMeasure + ?Sized> {
    measure: &'a M,
    style: &'a InvoiceStyle,
    currency: &'a Currency,
}

impl<'a, M: TextMeasure + ?Sized> InvoiceLayout<'a, M> {
    pub fn new(measure: &'a M, style: &'a InvoiceStyle, currency: &'a Currency) -> Self {
        InvoiceLayout {
            measure,
            style,
            currency,
        }
    }

    /// "INVOICE" and the optional logo on the left of the top banner, the company's
    /// contact details and address as two blocks on the right
    pub fn layout_header(
        &self,
        page_width: Pt,
        company: &Company,
    ) -> Result<Vec<DrawInstruction>, PDFError> {
        let style = self.style;
        let mut ops = Vec::new();

        // keep the title clear of the slanted lower edge
        let usable = style.banner_height * 0.8;
        let title_height = self.measure.line_height(style.title_font)?;
        ops.push(DrawInstruction::text(
            style.indent,
            (usable - title_height) / 2.0,
            "INVOICE",
            style.title_font,
            colours::WHITE,
            Align::Left,
        ));

        if let Some(logo) = &style.logo {
            let title_width = self.measure.width_of_text("INVOICE", style.title_font)?;
            let logo_height = usable * 0.6;
            let logo_width = if logo.height.0 > 0.0 {
                logo.width * (logo_height / logo.height)
            } else {
                Pt(0.0)
            };
            ops.push(DrawInstruction::Image {
                rect: Rect::from_xywh(
                    style.indent + title_width + Pt(16.0),
                    (usable - logo_height) / 2.0,
                    logo_width,
                    logo_height,
                ),
                path: logo.path.clone(),
            });
        }

        let line_height = self.measure.line_height(style.small_font)?;
        let blocks = [
            (
                page_width - style.indent - HEADER_BLOCK_WIDTH * 2.0,
                &company.contact,
            ),
            (page_width - style.indent - HEADER_BLOCK_WIDTH, &company.address),
        ];
        for (x, lines) in blocks {
            if lines.is_empty() {
                continue;
            }
            let y = (usable - line_height * lines.len() as f32) / 2.0;
            ops.push(DrawInstruction::MultiLineText {
                rect: Rect::from_xywh(
                    x,
                    y.max(Pt(0.0)),
                    HEADER_BLOCK_WIDTH,
                    line_height * lines.len() as f32,
                ),
                text: lines.join("\n"),
                font: style.small_font,
                colour: colours::WHITE,
                align: Align::Right,
                line_height,
            });
        }

        Ok(ops)
    }

    /// Who is billed, the invoice number and date, and the amount due, in three
    /// columns starting at `y`. Returns the cursor below the tallest column.
    pub fn layout_summary(
        &self,
        page_width: Pt,
        y: Pt,
        invoice: &Invoice,
        totals: &InvoiceTotals,
    ) -> Result<(Vec<DrawInstruction>, Pt), PDFError> {
        let style = self.style;
        let label_height = self.measure.line_height(style.small_font)?;
        let body_height = self.measure.line_height(style.body_font)?;
        let mut ops = Vec::new();

        let label = |x: Pt, y: Pt, text: &str, align: Align| {
            DrawInstruction::text(x, y, text, style.small_font, style.label_colour, align)
        };

        // billed to
        let left = style.indent;
        let middle = style.indent + (page_width - style.indent * 2.0) * 0.4;
        let right = page_width - style.indent;
        ops.push(label(left, y, "Billed To", Align::Left));
        let client_lines: Vec<&str> = std::iter::once(invoice.billed_to.name.as_str())
            .chain(invoice.billed_to.address.iter().map(String::as_str))
            .collect();
        let client_top = y + label_height;
        let client_width = middle - left - Pt(10.0);
        let client_text = client_lines.join("\n");
        let client_lines =
            line_count(self.measure, style.body_font, &client_text, client_width)?;
        ops.push(DrawInstruction::MultiLineText {
            rect: Rect::from_xywh(
                left,
                client_top,
                client_width,
                body_height * client_lines as f32,
            ),
            text: client_text,
            font: style.body_font,
            colour: style.text_colour,
            align: Align::Left,
            line_height: body_height,
        });
        let left_bottom = client_top + body_height * client_lines as f32;

        // number and date
        let mut middle_y = y;
        let issued = invoice.issued.format("%d/%m/%Y").to_string();
        let rows = [
            ("Invoice Number", invoice.number.as_str()),
            ("Date of Issue", issued.as_str()),
        ];
        for (caption, value) in rows {
            ops.push(label(middle, middle_y, caption, Align::Left));
            middle_y += label_height;
            ops.push(DrawInstruction::text(
                middle,
                middle_y,
                value,
                style.body_font,
                style.text_colour,
                Align::Left,
            ));
            middle_y += body_height * 1.5;
        }

        // amount due
        ops.push(label(right, y, "Invoice Total", Align::Right));
        let total_top = y + label_height;
        ops.push(DrawInstruction::text(
            right,
            total_top,
            self.currency.format(totals.total),
            style.total_font,
            style.banner_colour,
            Align::Right,
        ));
        let right_bottom = total_top + self.measure.line_height(style.total_font)?;

        let bottom = left_bottom.max(middle_y).max(right_bottom);
        Ok((ops, bottom + body_height))
    }

    /// Column headings of the line-item table at `y`, returning the cursor below them
    pub fn layout_table_header(
        &self,
        start_x: Pt,
        y: Pt,
        page_width: Pt,
    ) -> Result<(Vec<DrawInstruction>, Pt), PDFError> {
        let style = self.style;
        let columns = Columns::new(start_x, page_width);
        let heading = |x: Pt, text: &str, align: Align| {
            DrawInstruction::text(x, y, text, style.small_font, style.label_colour, align)
        };
        let ops = vec![
            heading(columns.description_x, "Description", Align::Left),
            heading(columns.unit_price_right, "Price Per Unit", Align::Right),
            heading(columns.quantity_right, "Quantity", Align::Right),
            heading(columns.amount_right, "Amount", Align::Right),
        ];
        Ok((ops, y + self.measure.line_height(style.small_font)?))
    }

    /// One row per item, in order: a wrapped description, the unit price, the quantity
    /// and the extended amount, followed by a separator rule. Each row is one and a
    /// half lines taller than its description: three quarters of a line above the text
    /// and three quarters below it to the rule. Returns the cursor below the last rule;
    /// an empty list draws nothing and returns `start_y`.
    pub fn layout_line_items(
        &self,
        items: &[LineItem],
        start_x: Pt,
        start_y: Pt,
        page_width: Pt,
    ) -> Result<(Vec<DrawInstruction>, Pt), PDFError> {
        let style = self.style;
        let columns = Columns::new(start_x, page_width);
        let line_height = self.measure.line_height(style.body_font)?;

        let mut ops = Vec::with_capacity(items.len() * 5);
        let mut y = start_y;
        for item in items {
            let top = y + line_height * 0.75;
            let lines = line_count(
                self.measure,
                style.body_font,
                item.description(),
                columns.description_width,
            )?;

            ops.push(DrawInstruction::MultiLineText {
                rect: Rect::from_xywh(
                    columns.description_x,
                    top,
                    columns.description_width,
                    line_height * lines as f32,
                ),
                text: item.description().to_string(),
                font: style.body_font,
                colour: style.text_colour,
                align: Align::Left,
                line_height,
            });
            let cell = |x: Pt, text: String| {
                DrawInstruction::text(x, top, text, style.body_font, style.text_colour, Align::Right)
            };
            ops.push(cell(
                columns.unit_price_right,
                self.currency.format(item.unit_price()),
            ));
            ops.push(cell(columns.quantity_right, item.quantity().to_string()));
            ops.push(cell(columns.amount_right, self.currency.format(item.amount()?)));

            y = top + line_height * (lines - 1) as f32 + line_height * 1.75;
            ops.push(rule(
                start_x,
                y,
                columns.rule_width,
                RULE_THICKNESS,
                style.rule_colour,
            ));
        }

        Ok((ops, y))
    }

    /// Subtotal, tax and total stacked from `y`. Labels are right-aligned on `x`,
    /// values on `x` plus the width of the amount column; a rule separates the tax line
    /// from the total.
    pub fn layout_totals(
        &self,
        x: Pt,
        y: Pt,
        totals: &InvoiceTotals,
    ) -> Result<Vec<DrawInstruction>, PDFError> {
        let style = self.style;
        let line_height = self.measure.line_height(style.totals_font)?;
        let spacing = line_height * 1.5;
        let value_x = x + AMOUNT_COLUMN_WIDTH;

        let pair = |y: Pt, label: &str, value: String, font: FontSpec| {
            [
                DrawInstruction::text(x, y, label, font, style.label_colour, Align::Right),
                DrawInstruction::text(value_x, y, value, font, style.text_colour, Align::Right),
            ]
        };
        let total_font = FontSpec {
            face: Face::SansBold,
            ..style.totals_font
        };

        let mut ops = Vec::with_capacity(7);
        ops.extend(pair(
            y,
            "Subtotal",
            self.currency.format(totals.subtotal),
            style.totals_font,
        ));
        ops.extend(pair(
            y + spacing,
            "Tax",
            self.currency.format(totals.tax),
            style.totals_font,
        ));
        let rule_y = y + spacing * 2.0;
        ops.push(rule(
            x - TOTALS_LABEL_WIDTH,
            rule_y,
            TOTALS_LABEL_WIDTH + AMOUNT_COLUMN_WIDTH,
            RULE_THICKNESS,
            style.rule_colour,
        ));
        ops.extend(pair(
            rule_y + line_height * 0.5,
            "Total",
            self.currency.format(totals.total),
            total_font,
        ));
        Ok(ops)
    }

    /// The whole invoice on one page, top to bottom
    pub fn layout(&self, page: PageSize, invoice: &Invoice) -> Result<InvoiceDrawing, PDFError> {
        let (page_width, page_height) = page;
        let style = self.style;
        let totals = invoice.totals()?;
        log::debug!(
            "invoice {}: {} items, subtotal {} tax {} total {}",
            invoice.number,
            invoice.items.len(),
            totals.subtotal,
            totals.tax,
            totals.total
        );

        let mut instructions = Vec::new();
        let (top, bottom) = layout_banners(
            page_width,
            page_height,
            style.banner_height,
            style.banner_colour,
        );
        instructions.push(top);
        instructions.push(bottom);
        instructions.extend(self.layout_header(page_width, &invoice.company)?);

        let y = style.banner_height + self.measure.line_height(style.body_font)?;
        let (ops, y) = self.layout_summary(page_width, y, invoice, &totals)?;
        instructions.extend(ops);
        let (ops, y) = self.layout_table_header(style.indent, y, page_width)?;
        instructions.extend(ops);
        let (ops, y) = self.layout_line_items(&invoice.items, style.indent, y, page_width)?;
        instructions.extend(ops);

        let columns = Columns::new(style.indent, page_width);
        let totals_y = y + self.measure.line_height(style.totals_font)?;
        instructions.extend(self.layout_totals(
            columns.amount_right - AMOUNT_COLUMN_WIDTH,
            totals_y,
            &totals,
        )?);

        Ok(InvoiceDrawing {
            instructions,
            totals,
        })
    }
}

/// Lay `invoice` out on a page of size `page`, formatting money in the invoice's own
/// currency
pub fn layout_invoice<M: TextMeasure + ?Sized>(
    measure: &M,
    style: &InvoiceStyle,
    page: PageSize,
    invoice: &Invoice,
) -> Result<InvoiceDrawing, PDFError> {
    InvoiceLayout::new(measure, style, &invoice.currency).layout(page, invoice)
}
