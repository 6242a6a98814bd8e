//! Invoice page layout.
//!
//! This is a deterministic geometry calculator: it turns one invoice
//! plus a company profile into positioned draw commands, computing every
//! text-width-dependent position (centering, right-alignment, dashed
//! underline extents) from font metrics. It performs no I/O and knows
//! nothing about PDF serialization; `render` executes the commands.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::group::Invoice;
use crate::pdf::{text_width, Color, Font};
use crate::profile::CompanyProfile;
use crate::words::{amount_in_words, Locale};

/// Points per millimetre. The layout works in the stationery's
/// millimetre grid, converted to PDF points.
pub const MM: f64 = 72.0 / 25.4;

/// A4 stationery.
pub const PAGE_WIDTH: f64 = 210.0 * MM;
pub const PAGE_HEIGHT: f64 = 297.0 * MM;
pub const MARGIN: f64 = 10.0 * MM;

/// Content reaching below this margin triggers a page break.
const BREAK_MARGIN: f64 = 15.0 * MM;

const DETAIL_LINE_H: f64 = 7.0 * MM;
const TABLE_ROW_H: f64 = 10.0 * MM;
const CLOSING_ROW_H: f64 = 14.0 * MM;
const DIGIT_BOX_W: f64 = 7.0 * MM;
/// Horizontal inset of cell text from the cell edge.
const CELL_PAD: f64 = 1.0 * MM;

pub const SN_COL_W: f64 = 10.0 * MM;
pub const CODE_COL_W: f64 = 30.0 * MM;
pub const AMOUNT_COL_W: f64 = 30.0 * MM;

/// Fixed footer baseline, measured from the page bottom. Deliberately
/// independent of table length: a very long item table can reach into
/// it. Known stationery limitation, kept as-is.
pub const FOOTER_BASELINE: f64 = 12.0 * MM;
pub const FOOTER_TEXT: &str = "Thank you for your business!";

pub const CURRENCY_PREFIX: &str = "NRs. ";
pub const CURRENCY_SUFFIX: &str = "Rupees Only";

fn header_fill() -> Color {
    Color::gray(211.0 / 255.0)
}

fn table_border() -> Color {
    Color::gray(169.0 / 255.0)
}

fn black() -> Color {
    Color::gray(0.0)
}

/// A positioned drawing primitive in final page coordinates
/// (points, bottom-left origin). `Text.y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Text {
        x: f64,
        y: f64,
        text: String,
        font: Font,
        size: f64,
    },
    DashedLine {
        x0: f64,
        x1: f64,
        y: f64,
    },
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
}

/// All draw commands for one physical page. Pages are self-contained:
/// no layout state crosses a page boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoicePage {
    pub commands: Vec<DrawCmd>,
}

#[derive(Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

/// Currency display: fixed prefix, exactly two decimals.
pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{:.2}", CURRENCY_PREFIX, rounded)
}

/// Lay out one invoice onto one or more pages.
pub fn lay_out_invoice(invoice: &Invoice, profile: &CompanyProfile) -> Vec<InvoicePage> {
    let mut builder = LayoutBuilder::new();

    draw_company_header(&mut builder, profile);
    draw_tax_id_boxes(&mut builder, &profile.tax_id);
    draw_metadata(&mut builder, invoice);
    draw_item_table(&mut builder, invoice);

    builder.finish()
}

struct LayoutBuilder {
    pages: Vec<InvoicePage>,
    commands: Vec<DrawCmd>,
    /// Cursor from the top edge of the current page, in points.
    y: f64,
}

impl LayoutBuilder {
    fn new() -> Self {
        LayoutBuilder {
            pages: Vec::new(),
            commands: Vec::new(),
            y: MARGIN,
        }
    }

    fn advance(&mut self, dy: f64) {
        self.y += dy;
    }

    /// True when a block of the given height would cross the bottom
    /// break margin.
    fn needs_break(&self, height: f64) -> bool {
        self.y + height > PAGE_HEIGHT - BREAK_MARGIN
    }

    /// Close the current page and start a fresh one. The continuation
    /// page carries no repeated header, an accepted simplification for
    /// tables longer than one page.
    fn break_page(&mut self) {
        self.close_page();
        self.y = MARGIN;
    }

    fn close_page(&mut self) {
        let mut commands = std::mem::take(&mut self.commands);
        // Footer at a fixed offset from the page bottom, every page.
        let footer_font = Font::HelveticaOblique;
        let footer_size = 10.0;
        let width = text_width(FOOTER_TEXT, footer_font, footer_size);
        commands.push(DrawCmd::Text {
            x: (PAGE_WIDTH - width) / 2.0,
            y: FOOTER_BASELINE,
            text: FOOTER_TEXT.to_string(),
            font: footer_font,
            size: footer_size,
        });
        self.pages.push(InvoicePage { commands });
    }

    fn finish(mut self) -> Vec<InvoicePage> {
        self.close_page();
        self.pages
    }

    /// Place text inside a cell-shaped slot at the current cursor.
    /// Baseline sits below the slot's vertical center, offset by a
    /// fraction of the font size.
    fn text_in_cell(
        &mut self,
        x: f64,
        width: f64,
        height: f64,
        text: &str,
        font: Font,
        size: f64,
        align: Align,
    ) {
        if text.is_empty() {
            return;
        }
        let measured = text_width(text, font, size);
        let text_x = match align {
            Align::Left => x + CELL_PAD,
            Align::Center => x + (width - measured) / 2.0,
            Align::Right => x + width - CELL_PAD - measured,
        };
        let baseline_from_top = self.y + 0.5 * height + 0.3 * size;
        self.commands.push(DrawCmd::Text {
            x: text_x,
            y: PAGE_HEIGHT - baseline_from_top,
            text: text.to_string(),
            font,
            size,
        });
    }

    /// Bordered, optionally filled cell with text. Fill first, then
    /// border, then text, so the border and text stay visible.
    #[allow(clippy::too_many_arguments)]
    fn cell(
        &mut self,
        x: f64,
        width: f64,
        height: f64,
        text: &str,
        font: Font,
        size: f64,
        align: Align,
        border: Option<Color>,
        fill: Option<Color>,
    ) {
        let rect_y = PAGE_HEIGHT - self.y - height;
        if let Some(color) = fill {
            self.commands.push(DrawCmd::FillRect {
                x,
                y: rect_y,
                width,
                height,
                color,
            });
        }
        if let Some(color) = border {
            self.commands.push(DrawCmd::StrokeRect {
                x,
                y: rect_y,
                width,
                height,
                color,
            });
        }
        self.text_in_cell(x, width, height, text, font, size, align);
    }

    /// Dashed underline at the current cursor height (drawn after the
    /// row above it has been advanced past).
    fn dashed_underline(&mut self, x0: f64, length: f64) {
        self.commands.push(DrawCmd::DashedLine {
            x0,
            x1: x0 + length,
            y: PAGE_HEIGHT - self.y,
        });
    }
}

/// Centered company block: bold name, then oblique address, phone and
/// email lines. Each line centered from its own measured width.
fn draw_company_header(builder: &mut LayoutBuilder, profile: &CompanyProfile) {
    let full = PAGE_WIDTH;
    builder.text_in_cell(
        0.0,
        full,
        10.0 * MM,
        &profile.name,
        Font::HelveticaBold,
        16.0,
        Align::Center,
    );
    builder.advance(10.0 * MM);

    for line in [&profile.address, &profile.phone, &profile.email] {
        builder.text_in_cell(
            0.0,
            full,
            DETAIL_LINE_H,
            line,
            Font::HelveticaOblique,
            12.0,
            Align::Center,
        );
        builder.advance(DETAIL_LINE_H);
    }
}

/// Tax-ID as a label plus one bordered box per character, the whole run
/// centered from the measured label width plus the fixed box widths.
fn draw_tax_id_boxes(builder: &mut LayoutBuilder, tax_id: &str) {
    builder.advance(5.0 * MM);

    let label = "PAN : ";
    let size = 12.0;
    let label_width = text_width(label, Font::Helvetica, size);
    let boxes_width = tax_id.chars().count() as f64 * DIGIT_BOX_W;
    let mut x = (PAGE_WIDTH - (label_width + boxes_width)) / 2.0;

    builder.text_in_cell(x, label_width, DETAIL_LINE_H, label, Font::Helvetica, size, Align::Left);
    x += label_width;
    for digit in tax_id.chars() {
        builder.cell(
            x,
            DIGIT_BOX_W,
            DETAIL_LINE_H,
            &digit.to_string(),
            Font::Helvetica,
            size,
            Align::Center,
            Some(black()),
            None,
        );
        x += DIGIT_BOX_W;
    }
    builder.advance(15.0 * MM);
}

/// Label/value metadata lines with dashed underlines under the exact
/// measured value widths. Left pair plus mirrored right-aligned pair on
/// the same line where applicable.
fn draw_metadata(builder: &mut LayoutBuilder, invoice: &Invoice) {
    let font = Font::Helvetica;
    let size = 12.0;
    let width = PAGE_WIDTH - 2.0 * MARGIN;
    let tracking = invoice.tracking_code.clone().unwrap_or_else(|| "N/A".to_string());
    let invoice_no = invoice.invoice_number.clone().unwrap_or_else(|| "N/A".to_string());

    // Order number left, date right.
    let order_label = "Order Number: ";
    let date_label = "Date: ";
    let order_text = format!("{}{}", order_label, invoice.order_number);
    let date_text = format!("{}{}", date_label, invoice.order_date);
    builder.text_in_cell(MARGIN, width, DETAIL_LINE_H, &order_text, font, size, Align::Left);
    builder.text_in_cell(MARGIN, width, DETAIL_LINE_H, &date_text, font, size, Align::Right);
    builder.advance(DETAIL_LINE_H);
    builder.dashed_underline(
        MARGIN + text_width(order_label, font, size),
        text_width(&invoice.order_number, font, size),
    );
    right_underline(builder, &date_text, date_label, &invoice.order_date, font, size);

    // Tracking code left, invoice number right.
    builder.advance(3.0 * MM);
    let tracking_label = "Tracking Code: ";
    let invoice_label = "Invoice No.: ";
    let tracking_text = format!("{}{}", tracking_label, tracking);
    let invoice_text = format!("{}{}", invoice_label, invoice_no);
    builder.text_in_cell(MARGIN, width, DETAIL_LINE_H, &tracking_text, font, size, Align::Left);
    builder.text_in_cell(MARGIN, width, DETAIL_LINE_H, &invoice_text, font, size, Align::Right);
    builder.advance(DETAIL_LINE_H);
    builder.dashed_underline(
        MARGIN + text_width(tracking_label, font, size),
        text_width(&tracking, font, size),
    );
    right_underline(builder, &invoice_text, invoice_label, &invoice_no, font, size);

    // Customer name, left only.
    builder.advance(5.0 * MM);
    let customer_label = "Customer's Name: ";
    let customer_text = format!("{}{}", customer_label, invoice.customer_name);
    builder.text_in_cell(MARGIN, width, DETAIL_LINE_H, &customer_text, font, size, Align::Left);
    builder.advance(DETAIL_LINE_H);
    builder.dashed_underline(
        MARGIN + text_width(customer_label, font, size),
        text_width(&invoice.customer_name, font, size),
    );

    // Fixed address value left, ruled blank contact slot right.
    builder.advance(3.0 * MM);
    let address_label = "Address: ";
    let address_value = "Nepal";
    let contact_label = "Contact No.: ";
    let contact_slot = " ".repeat(20);
    let address_text = format!("{}{}", address_label, address_value);
    let contact_text = format!("{}{}", contact_label, contact_slot);
    builder.text_in_cell(MARGIN, width, DETAIL_LINE_H, &address_text, font, size, Align::Left);
    builder.text_in_cell(MARGIN, width, DETAIL_LINE_H, &contact_text, font, size, Align::Right);
    builder.advance(DETAIL_LINE_H);
    builder.dashed_underline(
        MARGIN + text_width(address_label, font, size),
        text_width(address_value, font, size),
    );
    right_underline(builder, &contact_text, contact_label, &contact_slot, font, size);

    builder.advance(10.0 * MM);
}

/// Underline for the value of a right-aligned label/value pair: start
/// where the value starts (line right edge minus full text width plus
/// label width), extend by the value's measured width.
fn right_underline(
    builder: &mut LayoutBuilder,
    full_text: &str,
    label: &str,
    value: &str,
    font: Font,
    size: f64,
) {
    let x0 = PAGE_WIDTH - MARGIN - text_width(full_text, font, size)
        + text_width(label, font, size);
    builder.dashed_underline(x0, text_width(value, font, size));
}

/// The item table: shaded header, one row per line item, a blank spacer
/// row, and a closing row that merges the first two columns into the
/// amount-in-words cell.
fn draw_item_table(builder: &mut LayoutBuilder, invoice: &Invoice) {
    let particulars_w = PAGE_WIDTH - 2.0 * MARGIN - SN_COL_W - CODE_COL_W - AMOUNT_COL_W;
    let x_sn = MARGIN;
    let x_part = x_sn + SN_COL_W;
    let x_code = x_part + particulars_w;
    let x_amount = x_code + CODE_COL_W;
    let border = Some(table_border());

    // Header row.
    let header_font = Font::HelveticaBold;
    let fill = Some(header_fill());
    for (x, w, label) in [
        (x_sn, SN_COL_W, "SN"),
        (x_part, particulars_w, "Particulars"),
        (x_code, CODE_COL_W, "Inv Code"),
        (x_amount, AMOUNT_COL_W, "Amount"),
    ] {
        builder.cell(x, w, TABLE_ROW_H, label, header_font, 12.0, Align::Center, border, fill);
    }
    builder.advance(TABLE_ROW_H);

    // Line items plus the intentional blank spacer row.
    let body_font = Font::Helvetica;
    let blank = LineRow {
        serial: String::new(),
        particulars: String::new(),
        amount: String::new(),
    };
    let rows = invoice
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| LineRow {
            serial: (i + 1).to_string(),
            particulars: item.description.clone(),
            amount: format_money(item.total),
        })
        .chain(std::iter::once(blank));

    for row in rows {
        if builder.needs_break(TABLE_ROW_H) {
            builder.break_page();
        }
        builder.cell(x_sn, SN_COL_W, TABLE_ROW_H, &row.serial, body_font, 12.0, Align::Center, border, None);
        builder.cell(x_part, particulars_w, TABLE_ROW_H, &row.particulars, body_font, 12.0, Align::Left, border, None);
        builder.cell(x_code, CODE_COL_W, TABLE_ROW_H, "", body_font, 12.0, Align::Center, border, None);
        builder.cell(x_amount, AMOUNT_COL_W, TABLE_ROW_H, &row.amount, body_font, 12.0, Align::Right, border, None);
        builder.advance(TABLE_ROW_H);
    }

    // Closing row: SN and Particulars merge into the amount-in-words
    // cell; words come from the exact unrounded total.
    if builder.needs_break(CLOSING_ROW_H) {
        builder.break_page();
    }
    let total = invoice.total_amount();
    let words = format!(
        "{} {}",
        amount_in_words(total, Locale::EnglishIndia),
        CURRENCY_SUFFIX,
    );
    let closing_font = Font::HelveticaOblique;
    builder.cell(
        x_sn,
        SN_COL_W + particulars_w,
        CLOSING_ROW_H,
        &words,
        closing_font,
        12.0,
        Align::Left,
        border,
        None,
    );
    builder.cell(x_code, CODE_COL_W, CLOSING_ROW_H, "Total", closing_font, 12.0, Align::Center, border, None);
    builder.cell(
        x_amount,
        AMOUNT_COL_W,
        CLOSING_ROW_H,
        &format_money(total),
        closing_font,
        12.0,
        Align::Right,
        border,
        None,
    );
    builder.advance(CLOSING_ROW_H);
}

struct LineRow {
    serial: String,
    particulars: String,
    amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn money_formatting_two_decimals() {
        assert_eq!(format_money(Decimal::from_str("350.5").unwrap()), "NRs. 350.50");
        assert_eq!(format_money(Decimal::from_str("100").unwrap()), "NRs. 100.00");
        assert_eq!(format_money(Decimal::from_str("0.005").unwrap()), "NRs. 0.01");
    }

    #[test]
    fn column_widths_fill_printable_width() {
        let particulars = PAGE_WIDTH - 2.0 * MARGIN - SN_COL_W - CODE_COL_W - AMOUNT_COL_W;
        let total = SN_COL_W + particulars + CODE_COL_W + AMOUNT_COL_W;
        assert!((total - (PAGE_WIDTH - 2.0 * MARGIN)).abs() < 1e-9);
    }
}
