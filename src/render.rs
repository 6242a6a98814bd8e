//! Draw-command executor: translates positioned layout commands into
//! PDF content-stream operators. No measurement or layout decisions
//! happen here.

use std::io::{self, Write};

use crate::layout::{InvoicePage, MM, PAGE_HEIGHT, PAGE_WIDTH};
use crate::layout::DrawCmd;
use crate::pdf::writer::escape_pdf_string;
use crate::pdf::{format_coord, PdfDocument};

/// Stroke width for rules and cell borders (0.2 mm, stationery weight).
const LINE_WIDTH: f64 = 0.2 * MM;
/// Dash pattern for underlines: 1 mm on, 1 mm off.
const DASH: f64 = 1.0 * MM;

/// Render one laid-out page onto a new document page.
pub fn render_page<W: Write>(
    doc: &mut PdfDocument<W>,
    page: &InvoicePage,
) -> io::Result<()> {
    doc.begin_page(PAGE_WIDTH, PAGE_HEIGHT)?;
    let mut ops = Vec::new();
    for command in &page.commands {
        emit(command, &mut ops);
    }
    doc.push_ops(&ops)?;
    doc.end_page()
}

fn emit(command: &DrawCmd, ops: &mut Vec<u8>) {
    match command {
        DrawCmd::Text { x, y, text, font, size } => {
            ops.extend_from_slice(
                format!(
                    "BT\n0 0 0 rg\n/{} {} Tf\n{} {} Td\n({}) Tj\nET\n",
                    font.pdf_name(),
                    format_coord(*size),
                    format_coord(*x),
                    format_coord(*y),
                    escape_pdf_string(text),
                )
                .as_bytes(),
            );
        }
        DrawCmd::DashedLine { x0, x1, y } => {
            ops.extend_from_slice(
                format!(
                    "q\n0 0 0 RG\n{} w\n[{} {}] 0 d\n{} {} m\n{} {} l\nS\nQ\n",
                    format_coord(LINE_WIDTH),
                    format_coord(DASH),
                    format_coord(DASH),
                    format_coord(*x0),
                    format_coord(*y),
                    format_coord(*x1),
                    format_coord(*y),
                )
                .as_bytes(),
            );
        }
        DrawCmd::StrokeRect { x, y, width, height, color } => {
            ops.extend_from_slice(
                format!(
                    "q\n{} {} {} RG\n{} w\n{} {} {} {} re\nS\nQ\n",
                    format_coord(color.r),
                    format_coord(color.g),
                    format_coord(color.b),
                    format_coord(LINE_WIDTH),
                    format_coord(*x),
                    format_coord(*y),
                    format_coord(*width),
                    format_coord(*height),
                )
                .as_bytes(),
            );
        }
        DrawCmd::FillRect { x, y, width, height, color } => {
            ops.extend_from_slice(
                format!(
                    "q\n{} {} {} rg\n{} {} {} {} re\nf\nQ\n",
                    format_coord(color.r),
                    format_coord(color.g),
                    format_coord(color.b),
                    format_coord(*x),
                    format_coord(*y),
                    format_coord(*width),
                    format_coord(*height),
                )
                .as_bytes(),
            );
        }
    }
}
