use invoice_press::layout::{
    self, lay_out_invoice, DrawCmd, FOOTER_BASELINE, FOOTER_TEXT, MARGIN, MM, PAGE_WIDTH,
};
use invoice_press::pdf::{text_width, Font};
use invoice_press::{CompanyProfile, Invoice, LineItem};
use rust_decimal::Decimal;
use std::str::FromStr;

fn item(description: &str, price: &str) -> LineItem {
    let unit_price = Decimal::from_str(price).unwrap();
    LineItem {
        description: description.to_string(),
        unit_price,
        quantity: Decimal::ONE,
        total: unit_price,
    }
}

fn sample_invoice() -> Invoice {
    Invoice {
        key: "A1".to_string(),
        order_number: "A1".to_string(),
        order_date: "2024-01-15".to_string(),
        customer_name: "Sita Sharma".to_string(),
        tracking_code: Some("TRK9".to_string()),
        invoice_number: Some("INV-1".to_string()),
        items: vec![item("Woolen Scarf", "100.00"), item("Felt Bag", "250.50")],
    }
}

fn texts(page: &invoice_press::InvoicePage) -> Vec<(&str, f64, f64)> {
    page.commands
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCmd::Text { x, y, text, .. } => Some((text.as_str(), *x, *y)),
            _ => None,
        })
        .collect()
}

#[test]
fn company_name_is_centered_from_measured_width() {
    let profile = CompanyProfile::default();
    let pages = lay_out_invoice(&sample_invoice(), &profile);
    let width = text_width(&profile.name, Font::HelveticaBold, 16.0);
    let expected_x = (PAGE_WIDTH - width) / 2.0;

    let (_, x, _) = texts(&pages[0])
        .into_iter()
        .find(|(t, _, _)| *t == profile.name)
        .unwrap();
    assert!((x - expected_x).abs() < 1e-9);
}

#[test]
fn tax_id_gets_one_box_per_character() {
    let mut profile = CompanyProfile::default();
    profile.tax_id = "60123".to_string();
    let pages = lay_out_invoice(&sample_invoice(), &profile);

    let box_w = 7.0 * MM;
    let boxes = pages[0]
        .commands
        .iter()
        .filter(|cmd| {
            matches!(cmd, DrawCmd::StrokeRect { width, .. } if (width - box_w).abs() < 1e-9)
        })
        .count();
    assert_eq!(boxes, 5);
}

#[test]
fn underline_spans_exactly_the_value_width() {
    let invoice = sample_invoice();
    let pages = lay_out_invoice(&invoice, &CompanyProfile::default());

    let label_w = text_width("Order Number: ", Font::Helvetica, 12.0);
    let value_w = text_width(&invoice.order_number, Font::Helvetica, 12.0);
    let found = pages[0].commands.iter().any(|cmd| {
        matches!(cmd, DrawCmd::DashedLine { x0, x1, .. }
            if (x0 - (MARGIN + label_w)).abs() < 1e-9
                && ((x1 - x0) - value_w).abs() < 1e-9)
    });
    assert!(found, "no underline at the order-number value position");
}

#[test]
fn missing_tracking_code_prints_na() {
    let mut invoice = sample_invoice();
    invoice.tracking_code = None;
    let pages = lay_out_invoice(&invoice, &CompanyProfile::default());
    assert!(texts(&pages[0])
        .iter()
        .any(|(t, _, _)| *t == "Tracking Code: N/A"));
}

#[test]
fn closing_row_shows_merged_total() {
    let pages = lay_out_invoice(&sample_invoice(), &CompanyProfile::default());
    let all = texts(&pages[0]);

    assert!(all.iter().any(|(t, _, _)| *t == "NRs. 350.50"));
    assert!(all.iter().any(|(t, _, _)| *t == "Total"));
    assert!(all.iter().any(|(t, _, _)| t.ends_with("Rupees Only")));
}

#[test]
fn amount_in_words_matches_the_total() {
    let pages = lay_out_invoice(&sample_invoice(), &CompanyProfile::default());
    let words = texts(&pages[0])
        .into_iter()
        .find(|(t, _, _)| t.ends_with("Rupees Only"))
        .unwrap()
        .0
        .to_string();
    assert_eq!(words, "Three hundred and fifty point five Rupees Only");
}

#[test]
fn layout_is_deterministic() {
    let invoice = sample_invoice();
    let profile = CompanyProfile::default();
    assert_eq!(
        lay_out_invoice(&invoice, &profile),
        lay_out_invoice(&invoice, &profile),
    );
}

#[test]
fn single_invoice_fits_one_page() {
    let pages = lay_out_invoice(&sample_invoice(), &CompanyProfile::default());
    assert_eq!(pages.len(), 1);
}

#[test]
fn long_item_table_breaks_across_pages() {
    let mut invoice = sample_invoice();
    invoice.items = (0..40)
        .map(|i| item(&format!("Item {i}"), "10.00"))
        .collect();
    let pages = lay_out_invoice(&invoice, &CompanyProfile::default());
    assert!(pages.len() > 1, "40 rows must not fit a single page");

    // Every page carries the footer at its fixed baseline.
    for page in &pages {
        let footer = texts(page)
            .into_iter()
            .find(|(t, _, _)| *t == FOOTER_TEXT)
            .unwrap();
        assert!((footer.2 - FOOTER_BASELINE).abs() < 1e-9);
    }
}

#[test]
fn table_rows_follow_source_order() {
    let pages = lay_out_invoice(&sample_invoice(), &CompanyProfile::default());
    let all = texts(&pages[0]);
    let scarf_y = all.iter().find(|(t, _, _)| *t == "Woolen Scarf").unwrap().2;
    let bag_y = all.iter().find(|(t, _, _)| *t == "Felt Bag").unwrap().2;
    // Bottom-left origin: later rows sit lower on the page.
    assert!(bag_y < scarf_y);
}

#[test]
fn money_is_rounded_for_display_only() {
    assert_eq!(
        layout::format_money(Decimal::from_str("99.995").unwrap()),
        "NRs. 100.00",
    );
}
