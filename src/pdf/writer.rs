use std::collections::HashMap;
use std::io::{self, Write};

use super::objects::{ObjId, PdfObject};

/// Low-level PDF binary writer. Serializes objects to any `Write`
/// target while tracking byte offsets for the xref table.
pub struct PdfWriter<W: Write> {
    writer: W,
    offset: usize,
    xref: Vec<(u32, usize)>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        PdfWriter {
            writer,
            offset: 0,
            xref: Vec::new(),
        }
    }

    fn put(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.offset += data.len();
        Ok(())
    }

    fn put_str(&mut self, s: &str) -> io::Result<()> {
        self.put(s.as_bytes())
    }

    /// PDF 1.7 header plus the conventional binary-detection comment.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.put_str("%PDF-1.7\n")?;
        self.put(b"%\xe2\xe3\xcf\xd3\n")
    }

    /// Write an indirect object, recording its offset for the xref table.
    pub fn write_object(&mut self, id: ObjId, obj: &PdfObject) -> io::Result<()> {
        self.xref.push((id.0, self.offset));
        self.put_str(&format!("{} {} obj\n", id.0, id.1))?;
        self.serialize(obj)?;
        self.put_str("\nendobj\n")
    }

    fn serialize(&mut self, obj: &PdfObject) -> io::Result<()> {
        match obj {
            PdfObject::Integer(n) => self.put_str(&n.to_string()),
            PdfObject::Real(v) => self.put_str(&format_real(*v)),
            PdfObject::Name(name) => self.put_str(&format!("/{}", name)),
            PdfObject::Str(s) => {
                self.put_str(&format!("({})", escape_pdf_string(s)))
            }
            PdfObject::Array(items) => {
                self.put_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.put_str(" ")?;
                    }
                    self.serialize(item)?;
                }
                self.put_str("]")
            }
            PdfObject::Dict(entries) => {
                self.serialize_dict(entries)?;
                Ok(())
            }
            PdfObject::Stream { dict, data } => {
                self.put_str("<<")?;
                for (key, val) in dict {
                    self.put_str(&format!(" /{} ", key))?;
                    self.serialize(val)?;
                }
                self.put_str(&format!(" /Length {} >>\nstream\n", data.len()))?;
                self.put(data)?;
                self.put_str("\nendstream")
            }
            PdfObject::Ref(id) => self.put_str(&format!("{} {} R", id.0, id.1)),
        }
    }

    fn serialize_dict(&mut self, entries: &[(String, PdfObject)]) -> io::Result<()> {
        self.put_str("<<")?;
        for (key, val) in entries {
            self.put_str(&format!(" /{} ", key))?;
            self.serialize(val)?;
        }
        self.put_str(" >>")
    }

    /// Write xref table, trailer, startxref and %%EOF.
    pub fn write_xref_and_trailer(
        &mut self,
        root: ObjId,
        info: Option<ObjId>,
    ) -> io::Result<()> {
        let xref_offset = self.offset;

        self.xref.sort_by_key(|&(num, _)| num);
        let size = self.xref.last().map(|&(num, _)| num).unwrap_or(0) + 1;
        let offsets: HashMap<u32, usize> = self.xref.iter().copied().collect();

        self.put_str(&format!("xref\n0 {}\n", size))?;
        // Object 0: free entry head. Entries are exactly 20 bytes.
        self.put(b"0000000000 65535 f\r\n")?;
        for num in 1..size {
            match offsets.get(&num) {
                Some(&off) => self.put_str(&format!("{:010} 00000 n\r\n", off))?,
                None => self.put(b"0000000000 00000 f\r\n")?,
            }
        }

        self.put_str(&format!("trailer\n<< /Size {} /Root {} {} R", size, root.0, root.1))?;
        if let Some(info) = info {
            self.put_str(&format!(" /Info {} {} R", info.0, info.1))?;
        }
        self.put_str(" >>\n")?;
        self.put_str(&format!("startxref\n{}\n%%EOF\n", xref_offset))
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Escape the characters that terminate or nest PDF literal strings.
pub fn escape_pdf_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            _ => out.push(c),
        }
    }
    out
}

/// Format a float for PDF output: no trailing zeros, no scientific notation.
fn format_real(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        format!("{:.1}", v)
    } else {
        let s = format!("{:.6}", v);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
