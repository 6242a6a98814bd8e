//! invoice-press: tabular order exports (CSV/Excel) to printable PDF
//! invoices.
//!
//! The pipeline is strictly staged: a raw [`Dataset`] is validated
//! against a [`SchemaKind`], grouped into logical invoices, laid out as
//! positioned draw commands, and rendered into a multi-page PDF written
//! under a timestamped file name. [`assemble()`](assemble::assemble)
//! runs the whole pipeline; the stages are public so the layout can be
//! tested without a rendering backend.

pub mod assemble;
pub mod dataset;
pub mod error;
pub mod group;
pub mod layout;
pub mod pdf;
pub mod profile;
pub mod render;
pub mod schema;
pub mod validate;
pub mod words;

pub use assemble::{assemble, OutputConfig};
pub use dataset::{CellValue, Dataset};
pub use error::{Error, ValidationError};
pub use group::{group_rows, Invoice, InvoiceGroup, LineItem};
pub use layout::{lay_out_invoice, DrawCmd, InvoicePage};
pub use profile::{CompanyProfile, ProfileOverrides};
pub use schema::{Grouping, SchemaKind};
pub use validate::{validate, ValidatedDataset};
pub use words::{amount_in_words, Locale};
