//! Document composition: merges a calculated invoice, its customer, and the
//! company settings into an ordered sequence of renderable blocks.

use crate::models::{CompanySettings, Customer, Invoice};
use base64::Engine;
use rust_decimal::Decimal;

/// One renderable unit of the invoice document, in display order.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Decoded issuer logo image bytes (PNG or JPEG, undecoded-as-image).
    Logo { bytes: Vec<u8> },
    /// Issuer identity: name first, then address and contact lines.
    IssuerIdentity { lines: Vec<String> },
    Title(String),
    /// Parallel two-column metadata: invoice details beside bill-to lines.
    /// Both sides are padded with blank rows to the longer side's length.
    InfoColumns { rows: Vec<InfoRow> },
    ItemsTable {
        header: [String; 5],
        rows: Vec<[String; 5]>,
    },
    TotalsTable { rows: Vec<TotalsRow> },
    Paragraph { label: String, body: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfoRow {
    pub left_label: String,
    pub left_value: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalsRow {
    pub label: String,
    pub value: String,
    pub emphasized: bool,
}

/// Currency values always render as `$` with exactly two decimals; the
/// configured currency code is accepted in settings but not applied here.
pub fn format_currency(value: Decimal) -> String {
    format!("${:.2}", value)
}

fn format_quantity(value: Decimal) -> String {
    value.normalize().to_string()
}

fn format_tax_rate(rate: Option<Decimal>) -> String {
    format!("{}%", rate.unwrap_or(Decimal::ZERO).normalize())
}

/// Extracts the logo bytes from a base64 data URL. A value without a
/// data-URL prefix or with an undecodable payload is skipped silently; logo
/// problems never fail document generation.
fn decode_logo(logo: &str) -> Option<Vec<u8>> {
    let (_, payload) = logo.split_once(',')?;
    match base64::engine::general_purpose::STANDARD.decode(payload.trim()) {
        Ok(bytes) if !bytes.is_empty() => Some(bytes),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Skipping undecodable logo: {}", e);
            None
        }
    }
}

/// Builds the ordered block sequence for one invoice document. Expects the
/// invoice's derived totals to be populated already; absent optional fields
/// render as blanks.
pub fn compose_invoice(
    invoice: &Invoice,
    customer: &Customer,
    company: &CompanySettings,
) -> Vec<Block> {
    let mut blocks = Vec::new();

    if let Some(bytes) = company.logo.as_deref().and_then(decode_logo) {
        blocks.push(Block::Logo { bytes });
    }

    blocks.push(Block::IssuerIdentity {
        lines: vec![
            company.company_name.clone(),
            company.address.clone(),
            format!(
                "{}, {} {}",
                company.city, company.state, company.zip_code
            ),
            company.country.clone(),
            format!("Phone: {}", company.phone.as_deref().unwrap_or("")),
            format!("Email: {}", company.email.as_deref().unwrap_or("")),
        ],
    });

    blocks.push(Block::Title("INVOICE".to_string()));

    let left: Vec<(String, String)> = vec![
        ("Invoice Number:".to_string(), invoice.invoice_number.clone()),
        ("Invoice Date:".to_string(), invoice.issue_date.to_string()),
        ("Due Date:".to_string(), invoice.due_date.to_string()),
        (
            "Status:".to_string(),
            invoice.status.as_str().to_uppercase(),
        ),
    ];
    let right: Vec<String> = vec![
        "Bill To:".to_string(),
        customer.name.clone(),
        customer.company.clone().unwrap_or_default(),
        customer.address.clone().unwrap_or_default(),
        format!(
            "{}, {} {}",
            customer.city.as_deref().unwrap_or(""),
            customer.state.as_deref().unwrap_or(""),
            customer.zip_code.as_deref().unwrap_or("")
        ),
        customer.email.clone(),
    ];

    let rows = (0..left.len().max(right.len()))
        .map(|i| {
            let (left_label, left_value) = left.get(i).cloned().unwrap_or_default();
            InfoRow {
                left_label,
                left_value,
                right: right.get(i).cloned().unwrap_or_default(),
            }
        })
        .collect();
    blocks.push(Block::InfoColumns { rows });

    let item_rows = invoice
        .line_items
        .iter()
        .map(|item| {
            [
                item.description.clone(),
                format_quantity(item.quantity),
                format_currency(item.unit_price),
                format_tax_rate(item.tax_rate),
                format_currency(item.total.unwrap_or(Decimal::ZERO)),
            ]
        })
        .collect();
    blocks.push(Block::ItemsTable {
        header: [
            "Description".to_string(),
            "Quantity".to_string(),
            "Unit Price".to_string(),
            "Tax Rate".to_string(),
            "Total".to_string(),
        ],
        rows: item_rows,
    });

    blocks.push(Block::TotalsTable {
        rows: vec![
            TotalsRow {
                label: "Subtotal:".to_string(),
                value: format_currency(invoice.subtotal.unwrap_or(Decimal::ZERO)),
                emphasized: false,
            },
            TotalsRow {
                label: "Tax Amount:".to_string(),
                value: format_currency(invoice.tax_amount.unwrap_or(Decimal::ZERO)),
                emphasized: false,
            },
            TotalsRow {
                label: "Total Amount:".to_string(),
                value: format_currency(invoice.total_amount.unwrap_or(Decimal::ZERO)),
                emphasized: true,
            },
        ],
    });

    if let Some(notes) = invoice.notes.as_deref().filter(|n| !n.trim().is_empty()) {
        blocks.push(Block::Paragraph {
            label: "Notes:".to_string(),
            body: notes.to_string(),
        });
    }
    if let Some(terms) = invoice.terms.as_deref().filter(|t| !t.trim().is_empty()) {
        blocks.push(Block::Paragraph {
            label: "Terms:".to_string(),
            body: terms.to_string(),
        });
    }

    blocks
}
