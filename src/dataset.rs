use std::path::Path;

use calamine::{open_workbook_auto, DataType, Reader};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::error::Error;

/// One cell of a tabular dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(Decimal),
    Null,
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Display form of the cell: text as-is, numbers via Decimal
    /// formatting, null as the empty string.
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Null => String::new(),
        }
    }
}

/// An ordered table: named columns and rows of cells. Row and column
/// order always match the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Dataset { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at (row, column name). `Null` for short rows and unknown
    /// columns, so ragged source files read as sparse rather than panic.
    pub fn cell(&self, row: usize, column: &str) -> &CellValue {
        const NULL: &CellValue = &CellValue::Null;
        match self.column_index(column) {
            Some(col) => self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(NULL),
            None => NULL,
        }
    }

    pub(crate) fn set_cell(&mut self, row: usize, col: usize, value: CellValue) {
        if let Some(r) = self.rows.get_mut(row) {
            if let Some(c) = r.get_mut(col) {
                *c = value;
            }
        }
    }

    /// Parse CSV text. The delimiter is sniffed from the header line
    /// (`,`, `;` or tab), matching the permissive separator handling of
    /// marketplace exports.
    pub fn from_csv_str(text: &str) -> Result<Self, Error> {
        let delimiter = sniff_delimiter(text.lines().next().unwrap_or(""));
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let columns: Vec<String> =
            reader.headers()?.iter().map(|h| h.to_string()).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(
                record
                    .iter()
                    .map(|field| {
                        if field.is_empty() {
                            CellValue::Null
                        } else {
                            CellValue::Text(field.to_string())
                        }
                    })
                    .collect(),
            );
        }
        Ok(Dataset::new(columns, rows))
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::from_csv_str(&text)
    }

    /// Read the first worksheet of an `.xls`/`.xlsx` workbook. The first
    /// row is the header; remaining rows are data.
    pub fn from_excel_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut workbook = open_workbook_auto(path)?;
        let sheet = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| calamine::Error::Msg("workbook has no sheets"))?;
        let range = workbook.worksheet_range(&sheet)?;

        let mut row_iter = range.rows();
        let columns: Vec<String> = row_iter
            .next()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.as_string().unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();

        let rows: Vec<Vec<CellValue>> = row_iter
            .map(|row| row.iter().map(convert_excel_cell).collect())
            .collect();
        Ok(Dataset::new(columns, rows))
    }
}

fn convert_excel_cell<T: DataType>(cell: &T) -> CellValue {
    if cell.is_empty() {
        return CellValue::Null;
    }
    if let Some(i) = cell.get_int() {
        return CellValue::Number(Decimal::from(i));
    }
    if let Some(f) = cell.get_float() {
        return match Decimal::from_f64(f) {
            Some(d) => CellValue::Number(d.normalize()),
            None => CellValue::Text(f.to_string()),
        };
    }
    match cell.as_string() {
        Some(s) if !s.trim().is_empty() => CellValue::Text(s.trim().to_string()),
        _ => CellValue::Null,
    }
}

/// Pick the delimiter that appears most often in the header line.
/// Comma wins ties, as the default export format.
fn sniff_delimiter(header: &str) -> u8 {
    let commas = header.matches(',').count();
    let semis = header.matches(';').count();
    let tabs = header.matches('\t').count();
    if semis > commas && semis >= tabs {
        b';'
    } else if tabs > commas {
        b'\t'
    } else {
        b','
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_comma_parsing() {
        let ds = Dataset::from_csv_str("a,b\n1,x\n2,y\n").unwrap();
        assert_eq!(ds.columns(), &["a", "b"]);
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.cell(1, "b"), &CellValue::Text("y".to_string()));
    }

    #[test]
    fn csv_semicolon_sniffed() {
        let ds = Dataset::from_csv_str("a;b;c\n1;2;3\n").unwrap();
        assert_eq!(ds.columns(), &["a", "b", "c"]);
        assert_eq!(ds.cell(0, "c"), &CellValue::Text("3".to_string()));
    }

    #[test]
    fn empty_fields_are_null() {
        let ds = Dataset::from_csv_str("a,b\n1,\n").unwrap();
        assert!(ds.cell(0, "b").is_null());
    }

    #[test]
    fn missing_column_reads_null() {
        let ds = Dataset::from_csv_str("a\n1\n").unwrap();
        assert!(ds.cell(0, "nope").is_null());
        assert!(ds.cell(7, "a").is_null());
    }

    #[test]
    fn sniffer_prefers_majority_separator() {
        assert_eq!(sniff_delimiter("a,b,c"), b',');
        assert_eq!(sniff_delimiter("a;b;c"), b';');
        assert_eq!(sniff_delimiter("a\tb\tc"), b'\t');
        assert_eq!(sniff_delimiter("one"), b',');
    }
}
