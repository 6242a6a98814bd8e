use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::schema::{Grouping, SchemaKind};
use crate::validate::ValidatedDataset;

/// One logical invoice: a group key plus the source rows belonging to
/// it, in dataset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceGroup {
    pub key: String,
    pub row_indices: Vec<usize>,
}

/// Partition validated rows into invoice groups.
///
/// Grouping is stable: groups appear in order of the first occurrence
/// of each distinct key, rows keep their source order within a group,
/// and keys compare case-sensitively. Schemas without a grouping column
/// yield one singleton group per row, keyed by row index.
pub fn group_rows(dataset: &ValidatedDataset, schema: SchemaKind) -> Vec<InvoiceGroup> {
    match schema.grouping() {
        Grouping::ByColumn(column) => {
            let mut groups: Vec<InvoiceGroup> = Vec::new();
            let mut index: HashMap<String, usize> = HashMap::new();
            for row in 0..dataset.row_count() {
                let key = dataset.text(row, column);
                match index.get(&key) {
                    Some(&at) => groups[at].row_indices.push(row),
                    None => {
                        index.insert(key.clone(), groups.len());
                        groups.push(InvoiceGroup {
                            key,
                            row_indices: vec![row],
                        });
                    }
                }
            }
            groups
        }
        Grouping::RowPerInvoice => (0..dataset.row_count())
            .map(|row| InvoiceGroup {
                key: row.to_string(),
                row_indices: vec![row],
            })
            .collect(),
    }
}

/// One billable entry on an invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: Decimal,
    /// unit price × quantity, exact decimal arithmetic.
    pub total: Decimal,
}

/// The normalized view of one invoice group, ready for layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub key: String,
    pub order_number: String,
    pub order_date: String,
    pub customer_name: String,
    /// Renders as "N/A" when the export has no tracking code.
    pub tracking_code: Option<String>,
    pub invoice_number: Option<String>,
    pub items: Vec<LineItem>,
}

impl Invoice {
    /// Build the invoice view for one group. Header fields come from the
    /// group's first row via the schema's field mapping.
    pub fn from_group(
        dataset: &ValidatedDataset,
        group: &InvoiceGroup,
        schema: SchemaKind,
    ) -> Invoice {
        let fields = schema.fields();
        let first = group.row_indices.first().copied().unwrap_or(0);

        let optional = |column: Option<&str>, row: usize| -> Option<String> {
            column.and_then(|col| {
                let value = dataset.text(row, col);
                if value.is_empty() {
                    None
                } else {
                    Some(value)
                }
            })
        };

        let items = group
            .row_indices
            .iter()
            .map(|&row| {
                let unit_price = dataset.amount(row, fields.unit_price);
                let quantity = match fields.quantity {
                    Some(col) => dataset.amount(row, col),
                    None => Decimal::ONE,
                };
                LineItem {
                    description: dataset.text(row, fields.description),
                    unit_price,
                    quantity,
                    total: unit_price * quantity,
                }
            })
            .collect();

        Invoice {
            key: group.key.clone(),
            order_number: dataset.text(first, fields.order_number),
            order_date: dataset.text(first, fields.order_date),
            customer_name: dataset.text(first, fields.customer_name),
            tracking_code: optional(fields.tracking_code, first),
            invoice_number: optional(fields.invoice_number, first),
            items,
        }
    }

    /// Exact sum of line-item totals. Computed from the unrounded
    /// decimals, independent of any displayed rounding.
    pub fn total_amount(&self) -> Decimal {
        self.items.iter().map(|item| item.total).sum()
    }
}
