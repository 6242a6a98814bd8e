use std::str::FromStr;

use crate::error::Error;

/// The three supported input column layouts, one per marketplace/export
/// format. Each variant carries its own required-column set, grouping
/// rule and field mapping; validator, grouper and layout all dispatch
/// on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// Marketplace seller-center export: several line rows per order,
    /// grouped into one invoice per order number.
    Marketplace,
    /// Storefront order export: one row is one complete invoice.
    Storefront,
    /// Hand-kept order book: grouped by order number, with quantities
    /// and customer emails, validated strictly per row.
    OrderBook,
}

/// How rows combine into invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Rows sharing an equal, case-sensitive value in this column form
    /// one invoice, in first-seen order.
    ByColumn(&'static str),
    /// Every row is its own invoice.
    RowPerInvoice,
}

/// Column names supplying each semantic role of the invoice.
#[derive(Debug, Clone, Copy)]
pub struct FieldMap {
    pub order_number: &'static str,
    pub order_date: &'static str,
    pub customer_name: &'static str,
    pub description: &'static str,
    pub unit_price: &'static str,
    /// Absent means every line item has quantity 1.
    pub quantity: Option<&'static str>,
    pub tracking_code: Option<&'static str>,
    pub invoice_number: Option<&'static str>,
    pub email: Option<&'static str>,
}

impl SchemaKind {
    /// Resolve the request's schema selector.
    pub fn from_name(name: &str) -> Option<SchemaKind> {
        match name {
            "marketplace" => Some(SchemaKind::Marketplace),
            "storefront" => Some(SchemaKind::Storefront),
            "orderbook" => Some(SchemaKind::OrderBook),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SchemaKind::Marketplace => "marketplace",
            SchemaKind::Storefront => "storefront",
            SchemaKind::OrderBook => "orderbook",
        }
    }

    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            SchemaKind::Marketplace => &[
                "orderNumber",
                "sellerSku",
                "createTime",
                "invoiceNumber",
                "customerName",
                "trackingCode",
                "paidPrice",
            ],
            SchemaKind::Storefront => {
                &["orderId", "itemName", "price", "orderDate", "customerName"]
            }
            SchemaKind::OrderBook => &[
                "orderNo",
                "date",
                "customerName",
                "customerEmail",
                "item",
                "quantity",
                "unitPrice",
            ],
        }
    }

    pub fn grouping(&self) -> Grouping {
        match self {
            SchemaKind::Marketplace => Grouping::ByColumn("orderNumber"),
            SchemaKind::Storefront => Grouping::RowPerInvoice,
            SchemaKind::OrderBook => Grouping::ByColumn("orderNo"),
        }
    }

    pub fn fields(&self) -> FieldMap {
        match self {
            SchemaKind::Marketplace => FieldMap {
                order_number: "orderNumber",
                order_date: "createTime",
                customer_name: "customerName",
                description: "sellerSku",
                unit_price: "paidPrice",
                quantity: None,
                tracking_code: Some("trackingCode"),
                invoice_number: Some("invoiceNumber"),
                email: None,
            },
            SchemaKind::Storefront => FieldMap {
                order_number: "orderId",
                order_date: "orderDate",
                customer_name: "customerName",
                description: "itemName",
                unit_price: "price",
                quantity: None,
                tracking_code: None,
                invoice_number: None,
                email: None,
            },
            SchemaKind::OrderBook => FieldMap {
                order_number: "orderNo",
                order_date: "date",
                customer_name: "customerName",
                description: "item",
                unit_price: "unitPrice",
                quantity: Some("quantity"),
                tracking_code: None,
                invoice_number: None,
                email: Some("customerEmail"),
            },
        }
    }

    /// Monetary columns normalized to numbers during validation.
    pub fn money_columns(&self) -> &'static [&'static str] {
        match self {
            SchemaKind::Marketplace => &["paidPrice"],
            SchemaKind::Storefront => &["price"],
            SchemaKind::OrderBook => &["unitPrice"],
        }
    }

    /// Whether every row gets the strict null/quantity/price/email checks.
    pub fn strict_rows(&self) -> bool {
        matches!(self, SchemaKind::OrderBook)
    }
}

impl FromStr for SchemaKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaKind::from_name(s).ok_or_else(|| Error::UnknownSchema(s.to_string()))
    }
}
