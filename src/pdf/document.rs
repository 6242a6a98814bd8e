use std::io::{self, Write};

use flate2::write::ZlibEncoder;
use flate2::Compression;

use super::fonts::Font;
use super::objects::{ObjId, PdfObject};
use super::writer::PdfWriter;

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
// Objects 3..=5 are the shared font dictionaries (F1..F3).
const FIRST_PAGE_OBJ_NUM: u32 = 6;

/// High-level builder for multi-page PDF documents.
///
/// Generic over `Write`: the assembler renders into a `Vec<u8>` so a
/// failed run can never leave a partial file on disk, and tests assert
/// directly on the buffer.
///
/// Pages are written incrementally: `end_page()` flushes page objects
/// to the writer and frees the page's content from memory.
pub struct PdfDocument<W: Write> {
    writer: PdfWriter<W>,
    info: Vec<(String, String)>,
    page_obj_ids: Vec<ObjId>,
    current_page: Option<PageBuilder>,
    next_obj_num: u32,
    compress: bool,
}

struct PageBuilder {
    width: f64,
    height: f64,
    content_ops: Vec<u8>,
}

impl<W: Write> PdfDocument<W> {
    /// Create a document on the given writer. Writes the PDF header
    /// and the three shared font objects immediately.
    pub fn new(writer: W) -> io::Result<Self> {
        let mut pdf_writer = PdfWriter::new(writer);
        pdf_writer.write_header()?;

        for (i, font) in Font::all().iter().enumerate() {
            let obj = PdfObject::dict(vec![
                ("Type", PdfObject::name("Font")),
                ("Subtype", PdfObject::name("Type1")),
                ("BaseFont", PdfObject::name(font.base_name())),
            ]);
            pdf_writer.write_object(ObjId(3 + i as u32, 0), &obj)?;
        }

        Ok(PdfDocument {
            writer: pdf_writer,
            info: Vec::new(),
            page_obj_ids: Vec::new(),
            current_page: None,
            next_obj_num: FIRST_PAGE_OBJ_NUM,
            compress: false,
        })
    }

    /// Enable FlateDecode compression of page content streams.
    pub fn set_compression(&mut self, compress: bool) -> &mut Self {
        self.compress = compress;
        self
    }

    /// Set a document info entry (e.g. "Creator", "Title").
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// Begin a new page with the given dimensions in points.
    /// An open page is closed automatically first.
    pub fn begin_page(&mut self, width: f64, height: f64) -> io::Result<()> {
        if self.current_page.is_some() {
            self.end_page()?;
        }
        self.current_page = Some(PageBuilder {
            width,
            height,
            content_ops: Vec::new(),
        });
        Ok(())
    }

    /// Append raw content-stream operators to the current page.
    pub fn push_ops(&mut self, ops: &[u8]) -> io::Result<()> {
        let page = self.current_page.as_mut().ok_or_else(|| {
            io::Error::new(io::ErrorKind::Other, "no open page")
        })?;
        page.content_ops.extend_from_slice(ops);
        Ok(())
    }

    /// Number of pages flushed so far (excludes any open page).
    pub fn page_count(&self) -> usize {
        self.page_obj_ids.len()
    }

    /// Close the current page, writing its content stream and page
    /// dictionary and freeing the page content from memory.
    pub fn end_page(&mut self) -> io::Result<()> {
        let page = self.current_page.take().ok_or_else(|| {
            io::Error::new(io::ErrorKind::Other, "no open page")
        })?;

        let content_id = self.next_id();
        let page_id = self.next_id();

        let content = if self.compress {
            let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
            enc.write_all(&page.content_ops)?;
            PdfObject::stream(
                vec![("Filter", PdfObject::name("FlateDecode"))],
                enc.finish()?,
            )
        } else {
            PdfObject::stream(vec![], page.content_ops)
        };
        self.writer.write_object(content_id, &content)?;

        let font_resources: Vec<(&str, PdfObject)> = Font::all()
            .iter()
            .enumerate()
            .map(|(i, font)| (font.pdf_name(), PdfObject::Ref(ObjId(3 + i as u32, 0))))
            .collect();

        let page_dict = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", PdfObject::Ref(PAGES_OBJ)),
            (
                "MediaBox",
                PdfObject::Array(vec![
                    PdfObject::Integer(0),
                    PdfObject::Integer(0),
                    PdfObject::Real(page.width),
                    PdfObject::Real(page.height),
                ]),
            ),
            ("Contents", PdfObject::Ref(content_id)),
            (
                "Resources",
                PdfObject::dict(vec![("Font", PdfObject::dict(font_resources))]),
            ),
        ]);
        self.writer.write_object(page_id, &page_dict)?;
        self.page_obj_ids.push(page_id);
        Ok(())
    }

    /// Finish the document: pages tree, catalog, info dictionary, xref
    /// and trailer. A document with zero pages is still structurally
    /// valid (empty Kids array): an empty dataset must produce an
    /// openable artifact rather than an error.
    pub fn end_document(mut self) -> io::Result<W> {
        if self.current_page.is_some() {
            self.end_page()?;
        }

        let info_id = if self.info.is_empty() {
            None
        } else {
            let id = self.next_id();
            let entries: Vec<(&str, PdfObject)> = self
                .info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::string(v)))
                .collect();
            self.writer.write_object(id, &PdfObject::dict(entries))?;
            Some(id)
        };

        let kids: Vec<PdfObject> =
            self.page_obj_ids.iter().map(|&id| PdfObject::Ref(id)).collect();
        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            ("Kids", PdfObject::Array(kids)),
            ("Count", PdfObject::Integer(self.page_obj_ids.len() as i64)),
        ]);
        self.writer.write_object(PAGES_OBJ, &pages)?;

        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::Ref(PAGES_OBJ)),
        ]);
        self.writer.write_object(CATALOG_OBJ, &catalog)?;

        self.writer.write_xref_and_trailer(CATALOG_OBJ, info_id)?;
        Ok(self.writer.into_inner())
    }

    fn next_id(&mut self) -> ObjId {
        let id = ObjId(self.next_obj_num, 0);
        self.next_obj_num += 1;
        id
    }
}

/// Format a coordinate for content streams: integers without decimals,
/// fractional values trimmed to four places.
pub fn format_coord(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        let s = format!("{:.4}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_formatting() {
        assert_eq!(format_coord(20.0), "20");
        assert_eq!(format_coord(12.5), "12.5");
        assert_eq!(format_coord(28.34645), "28.3465");
    }
}
