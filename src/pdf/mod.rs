//! Minimal PDF serialization substrate: object model, binary writer,
//! incremental document builder, built-in font metrics.

pub mod document;
pub mod fonts;
pub mod graphics;
pub mod objects;
pub mod writer;

pub use document::{format_coord, PdfDocument};
pub use fonts::{text_width, Font};
pub use graphics::Color;
