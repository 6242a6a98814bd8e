//! Document assembly: validator, grouper, layout engine and renderer
//! orchestrated into a single on-disk PDF artifact.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, error, info};

use crate::dataset::Dataset;
use crate::error::Error;
use crate::group::{group_rows, Invoice};
use crate::layout::lay_out_invoice;
use crate::pdf::PdfDocument;
use crate::profile::CompanyProfile;
use crate::render::render_page;
use crate::schema::SchemaKind;
use crate::validate::validate;

/// Where generated documents land and how their files are named.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            output_dir: PathBuf::from("invoices"),
            file_prefix: "invoices".to_string(),
        }
    }
}

/// Generate one PDF containing an invoice per group and return the
/// path written.
///
/// Validation errors pass through with their kind intact. The document
/// is rendered fully in memory and written with a single filesystem
/// call, so a rendering failure never leaves a partial file behind. An
/// empty dataset produces a valid zero-page document.
pub fn assemble(
    dataset: &Dataset,
    schema: SchemaKind,
    profile: &CompanyProfile,
    config: &OutputConfig,
) -> Result<PathBuf, Error> {
    let validated = validate(dataset, schema)?;
    let groups = group_rows(&validated, schema);
    info!(
        schema = schema.name(),
        rows = validated.row_count(),
        groups = groups.len(),
        "generating invoice document"
    );

    let mut doc = PdfDocument::new(Vec::new())?;
    doc.set_compression(true);
    doc.set_info("Creator", "invoice-press");
    doc.set_info("Title", "Invoices");

    for group in &groups {
        let invoice = Invoice::from_group(&validated, group, schema);
        debug!(key = %group.key, items = invoice.items.len(), "laying out invoice");
        let pages = lay_out_invoice(&invoice, profile);
        for page in &pages {
            render_page(&mut doc, page).map_err(|e| {
                error!(key = %group.key, error = %e, "rendering failed");
                Error::Rendering {
                    group: group.key.clone(),
                    detail: e.to_string(),
                }
            })?;
        }
    }

    let bytes = doc.end_document()?;

    fs::create_dir_all(&config.output_dir)?;
    let path = unique_output_path(&config.output_dir, &config.file_prefix, Local::now());
    fs::write(&path, &bytes)?;
    info!(path = %path.display(), bytes = bytes.len(), "document written");
    Ok(path)
}

/// Timestamped output path, second precision. When two requests land in
/// the same second a numeric suffix disambiguates instead of silently
/// overwriting.
fn unique_output_path(dir: &Path, prefix: &str, now: DateTime<Local>) -> PathBuf {
    let stem = format!("{}_{}", prefix, now.format("%Y%m%d_%H%M%S"));
    let mut candidate = dir.join(format!("{}.pdf", stem));
    let mut n = 1;
    while candidate.exists() {
        candidate = dir.join(format!("{}_{}.pdf", stem, n));
        n += 1;
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn output_path_carries_timestamp() {
        let now = Local.with_ymd_and_hms(2026, 8, 23, 14, 30, 5).unwrap();
        let path = unique_output_path(Path::new("out"), "invoices", now);
        assert_eq!(
            path,
            Path::new("out").join("invoices_20260823_143005.pdf"),
        );
    }

    #[test]
    fn same_second_collision_gets_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let now = Local.with_ymd_and_hms(2026, 8, 23, 14, 30, 5).unwrap();
        let first = unique_output_path(dir.path(), "invoices", now);
        fs::write(&first, b"x").unwrap();
        let second = unique_output_path(dir.path(), "invoices", now);
        assert_ne!(first, second);
        assert!(second.to_string_lossy().ends_with("_143005_1.pdf"));
    }
}
