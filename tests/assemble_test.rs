use invoice_press::{
    assemble, Dataset, Error, OutputConfig, SchemaKind, ValidationError,
};
use std::fs;

fn init_logs() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn config_in(dir: &tempfile::TempDir) -> OutputConfig {
    OutputConfig {
        output_dir: dir.path().to_path_buf(),
        file_prefix: "invoices".to_string(),
    }
}

fn marketplace_dataset() -> Dataset {
    Dataset::from_csv_str(
        "orderNumber,sellerSku,createTime,invoiceNumber,customerName,trackingCode,paidPrice\n\
         A1,SKU-1,2024-01-15,INV-1,Sita Sharma,TRK9,100.00\n\
         A1,SKU-2,2024-01-15,INV-1,Sita Sharma,TRK9,250.50\n\
         B2,SKU-3,2024-01-16,INV-2,Hari Thapa,TRK10,75.00\n",
    )
    .unwrap()
}

#[test]
fn writes_a_complete_pdf_file() {
    init_logs();
    let dir = tempfile::tempdir().unwrap();
    let path = assemble(
        &marketplace_dataset(),
        SchemaKind::Marketplace,
        &Default::default(),
        &config_in(&dir),
    )
    .unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7"));
    let tail = String::from_utf8_lossy(&bytes[bytes.len().saturating_sub(32)..]).to_string();
    assert!(tail.trim_end().ends_with("%%EOF"));
    // Two groups, one page each.
    assert!(String::from_utf8_lossy(&bytes).contains("/Count 2"));
}

#[test]
fn output_lands_under_the_configured_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_in(&dir);
    config.file_prefix = "august".to_string();
    let path = assemble(
        &marketplace_dataset(),
        SchemaKind::Marketplace,
        &Default::default(),
        &config,
    )
    .unwrap();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("august_"));
    assert!(name.ends_with(".pdf"));
}

#[test]
fn repeated_runs_never_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir);
    let dataset = marketplace_dataset();
    let first = assemble(&dataset, SchemaKind::Marketplace, &Default::default(), &config).unwrap();
    let second =
        assemble(&dataset, SchemaKind::Marketplace, &Default::default(), &config).unwrap();
    assert_ne!(first, second);
    assert!(first.exists());
    assert!(second.exists());
}

#[test]
fn validation_failure_keeps_its_kind_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = Dataset::from_csv_str("orderNumber,sellerSku\nA1,SKU-1\n").unwrap();
    let err = assemble(
        &dataset,
        SchemaKind::Marketplace,
        &Default::default(),
        &config_in(&dir),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingColumns(_)),
    ));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn empty_dataset_produces_a_valid_zero_page_document() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = Dataset::from_csv_str(
        "orderNumber,sellerSku,createTime,invoiceNumber,customerName,trackingCode,paidPrice\n",
    )
    .unwrap();
    let path = assemble(
        &dataset,
        SchemaKind::Marketplace,
        &Default::default(),
        &config_in(&dir),
    )
    .unwrap();

    let bytes = fs::read(&path).unwrap();
    let text = String::from_utf8_lossy(&bytes);
    assert!(bytes.starts_with(b"%PDF-1.7"));
    assert!(text.contains("/Count 0"));
}

#[test]
fn compressed_content_streams_declare_flate() {
    let dir = tempfile::tempdir().unwrap();
    let path = assemble(
        &marketplace_dataset(),
        SchemaKind::Marketplace,
        &Default::default(),
        &config_in(&dir),
    )
    .unwrap();
    let bytes = fs::read(&path).unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("/Filter /FlateDecode"));
}
