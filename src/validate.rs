use std::str::FromStr;

use rust_decimal::Decimal;

use crate::dataset::{CellValue, Dataset};
use crate::error::ValidationError;
use crate::schema::SchemaKind;

/// A dataset that passed validation for a specific schema: required
/// columns present, monetary cells normalized to numbers, strict-schema
/// rows checked. Accessors lean on those invariants.
#[derive(Debug, Clone)]
pub struct ValidatedDataset {
    dataset: Dataset,
    schema: SchemaKind,
}

impl ValidatedDataset {
    pub fn schema(&self) -> SchemaKind {
        self.schema
    }

    pub fn row_count(&self) -> usize {
        self.dataset.row_count()
    }

    /// Text form of a cell; null renders as the empty string.
    pub fn text(&self, row: usize, column: &str) -> String {
        self.dataset.cell(row, column).display()
    }

    /// Numeric value of a normalized monetary/quantity cell. Validation
    /// guarantees these cells are numbers; anything else reads as zero.
    pub fn amount(&self, row: usize, column: &str) -> Decimal {
        match self.dataset.cell(row, column) {
            CellValue::Number(n) => *n,
            _ => Decimal::ZERO,
        }
    }
}

/// Validate a dataset against a schema.
///
/// Column presence is checked first and reported in aggregate; cell and
/// row checks run afterwards in row order and report the first failure.
/// The input is never mutated; a normalized copy is returned.
pub fn validate(
    dataset: &Dataset,
    schema: SchemaKind,
) -> Result<ValidatedDataset, ValidationError> {
    let missing: Vec<String> = schema
        .required_columns()
        .iter()
        .filter(|col| dataset.column_index(col).is_none())
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingColumns(missing));
    }

    let mut normalized = dataset.clone();

    for &column in schema.money_columns() {
        normalize_money_column(&mut normalized, column)?;
    }

    if schema.strict_rows() {
        check_strict_rows(&mut normalized, schema)?;
    }

    Ok(ValidatedDataset {
        dataset: normalized,
        schema,
    })
}

fn normalize_money_column(
    dataset: &mut Dataset,
    column: &str,
) -> Result<(), ValidationError> {
    // Presence was checked above.
    let col = match dataset.column_index(column) {
        Some(col) => col,
        None => return Ok(()),
    };
    for row in 0..dataset.row_count() {
        let value = match dataset.cell(row, column) {
            CellValue::Number(n) => *n,
            CellValue::Text(s) => parse_money(s).ok_or_else(|| {
                ValidationError::InvalidNumber {
                    column: column.to_string(),
                    row,
                }
            })?,
            CellValue::Null => {
                return Err(ValidationError::InvalidNumber {
                    column: column.to_string(),
                    row,
                })
            }
        };
        dataset.set_cell(row, col, CellValue::Number(value));
    }
    Ok(())
}

/// Parse a monetary cell: strips a currency prefix, `$` signs and
/// thousands separators before reading the decimal value.
fn parse_money(text: &str) -> Option<Decimal> {
    let mut cleaned: String = text
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect::<String>()
        .trim()
        .to_string();
    for prefix in ["NRs.", "Rs.", "NPR"] {
        if let Some(rest) = cleaned.strip_prefix(prefix) {
            cleaned = rest.trim_start().to_string();
            break;
        }
    }
    Decimal::from_str(&cleaned).ok()
}

/// Row-level checks for strict schemas, first failing row wins. Check
/// order within a row: null fields, quantity, price, email. Quantity
/// cells are normalized to numbers as a side effect.
fn check_strict_rows(
    dataset: &mut Dataset,
    schema: SchemaKind,
) -> Result<(), ValidationError> {
    let fields = schema.fields();
    let quantity_col = fields.quantity;

    for row in 0..dataset.row_count() {
        for &column in schema.required_columns() {
            if dataset.cell(row, column).is_null() {
                return Err(ValidationError::NullField {
                    row,
                    column: column.to_string(),
                });
            }
        }

        if let Some(column) = quantity_col {
            let quantity = match dataset.cell(row, column) {
                CellValue::Number(n) => Some(*n),
                CellValue::Text(s) => Decimal::from_str(s.trim()).ok(),
                CellValue::Null => None,
            };
            match quantity {
                Some(q) if q > Decimal::ZERO => {
                    let col = dataset.column_index(column).unwrap_or(0);
                    dataset.set_cell(row, col, CellValue::Number(q));
                }
                _ => return Err(ValidationError::InvalidQuantity { row }),
            }
        }

        let price = match dataset.cell(row, fields.unit_price) {
            CellValue::Number(n) => *n,
            _ => Decimal::ZERO,
        };
        if price <= Decimal::ZERO {
            return Err(ValidationError::InvalidPrice { row });
        }

        if let Some(column) = fields.email {
            let email = dataset.cell(row, column).display();
            if !email.contains('@') {
                return Err(ValidationError::InvalidEmail { row });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_parsing_strips_symbols() {
        assert_eq!(parse_money("1,250.50"), Decimal::from_str("1250.50").ok());
        assert_eq!(parse_money("$99"), Decimal::from_str("99").ok());
        assert_eq!(parse_money("NRs. 450.00"), Decimal::from_str("450.00").ok());
        assert_eq!(parse_money("Rs.75"), Decimal::from_str("75").ok());
        assert_eq!(parse_money("abc"), None);
        assert_eq!(parse_money(""), None);
    }
}
