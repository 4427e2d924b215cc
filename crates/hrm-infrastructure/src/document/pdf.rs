// ============================================================================
// HRM Infrastructure - Invoice PDF Renderer
// File: crates/hrm-infrastructure/src/document/pdf.rs
// Description: A4 invoice layout written with lopdf, paginated on overflow
// ============================================================================

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use rust_decimal::Decimal;
use tracing::{debug, error};

use hrm_core::domain::Invoice;
use hrm_core::error::DomainError;
use hrm_core::gateways::InvoiceRenderer;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;
const LINE: f32 = 16.0;
/// Lowest baseline for body content; the footer sits below it.
const BOTTOM: f32 = 90.0;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

// Table columns
const COL_DESCRIPTION: f32 = MARGIN;
const COL_QUANTITY: f32 = 330.0;
const COL_RATE: f32 = 400.0;
const COL_AMOUNT: f32 = 480.0;
const DESCRIPTION_CHARS: usize = 48;

pub struct LopdfInvoiceRenderer;

impl LopdfInvoiceRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LopdfInvoiceRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceRenderer for LopdfInvoiceRenderer {
    fn render(&self, invoice: &Invoice) -> Result<Vec<u8>, DomainError> {
        let pages = layout(invoice)?;
        debug!("Rendering invoice {} on {} page(s)", invoice.invoice_no, pages.len());

        build_document(pages).map_err(|e| {
            error!("Failed to render invoice {}: {}", invoice.invoice_no, e);
            DomainError::RenderFailed(e.to_string())
        })
    }
}

/// Accumulates drawing operations page by page.
struct PageWriter {
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    y: f32,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            ops: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn text(&mut self, font: &str, size: f32, x: f32, text: &str) {
        self.ops.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), size.into()]),
            Operation::new("Td", vec![x.into(), self.y.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn line(&mut self, text: &str) {
        self.text(REGULAR, 10.0, MARGIN, text);
        self.advance(LINE);
    }

    fn rule(&mut self) {
        let y = self.y + LINE / 2.0;
        self.ops.extend([
            Operation::new("w", vec![0.5f32.into()]),
            Operation::new("m", vec![MARGIN.into(), y.into()]),
            Operation::new("l", vec![(PAGE_WIDTH - MARGIN).into(), y.into()]),
            Operation::new("S", vec![]),
        ]);
    }

    fn advance(&mut self, by: f32) {
        self.y -= by;
    }

    /// Starts a new page when fewer than `needed` points remain. Returns
    /// whether a break happened.
    fn ensure_room(&mut self, needed: f32) -> bool {
        if self.y - needed >= BOTTOM {
            return false;
        }
        self.pages.push(std::mem::take(&mut self.ops));
        self.y = PAGE_HEIGHT - MARGIN;
        true
    }

    fn finish(mut self, footer: &str) -> Vec<Vec<Operation>> {
        self.pages.push(self.ops);
        let count = self.pages.len();
        for (index, ops) in self.pages.iter_mut().enumerate() {
            let label = format!("{}  |  Page {} of {}", footer, index + 1, count);
            ops.extend([
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec![Object::Name(REGULAR.as_bytes().to_vec()), 8.0f32.into()]),
                Operation::new("Td", vec![MARGIN.into(), (MARGIN - 10.0).into()]),
                Operation::new("Tj", vec![Object::string_literal(label)]),
                Operation::new("ET", vec![]),
            ]);
        }
        self.pages
    }
}

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn percent(value: Decimal) -> String {
    value.normalize().to_string()
}

fn clip(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    clipped.push_str("...");
    clipped
}

fn table_header(writer: &mut PageWriter) {
    writer.text(BOLD, 10.0, COL_DESCRIPTION, "Description");
    writer.text(BOLD, 10.0, COL_QUANTITY, "Qty");
    writer.text(BOLD, 10.0, COL_RATE, "Rate");
    writer.text(BOLD, 10.0, COL_AMOUNT, "Amount");
    writer.advance(LINE);
    writer.rule();
}

fn layout(invoice: &Invoice) -> Result<Vec<Vec<Operation>>, DomainError> {
    let mut w = PageWriter::new();

    // Header
    w.text(BOLD, 22.0, MARGIN, "INVOICE");
    w.advance(LINE * 2.0);
    w.line(&format!("Invoice #: {}", invoice.invoice_no));
    w.line(&format!("Date: {}", invoice.created_at.format("%-m/%-d/%Y")));
    if let Some(due) = invoice.due_date {
        w.line(&format!("Due Date: {}", due.format("%-m/%-d/%Y")));
    }
    w.line(&format!("Status: {}", invoice.status));
    w.advance(LINE);

    // Bill-to block
    w.text(BOLD, 11.0, MARGIN, "Bill To:");
    w.advance(LINE);
    w.line(&invoice.client.name);
    w.line(&invoice.client.email);
    if let Some(phone) = invoice.client.phone.as_deref().filter(|p| !p.is_empty()) {
        w.line(phone);
    }
    for address_line in invoice.client.address.lines() {
        w.line(&address_line);
    }
    w.advance(LINE);

    // Line items
    table_header(&mut w);
    for item in &invoice.items {
        if w.ensure_room(LINE) {
            table_header(&mut w);
        }
        w.text(REGULAR, 10.0, COL_DESCRIPTION, &clip(&item.description, DESCRIPTION_CHARS));
        w.text(REGULAR, 10.0, COL_QUANTITY, &item.quantity.to_string());
        w.text(REGULAR, 10.0, COL_RATE, &money(item.rate));
        w.text(REGULAR, 10.0, COL_AMOUNT, &money(item.amount));
        w.advance(LINE);
    }
    w.rule();

    // Totals
    let totals = invoice.totals()?;
    w.ensure_room(LINE * 5.0);
    let total_row = |w: &mut PageWriter, font: &str, label: String, value: Decimal| {
        w.text(font, 10.0, COL_RATE - 40.0, &label);
        w.text(font, 10.0, COL_AMOUNT, &money(value));
        w.advance(LINE);
    };
    total_row(&mut w, REGULAR, "Subtotal:".to_string(), totals.total_amount);
    if invoice.tax > Decimal::ZERO {
        total_row(&mut w, REGULAR, format!("Tax ({}%):", percent(invoice.tax)), totals.tax_amount);
    }
    if invoice.discount > Decimal::ZERO {
        total_row(
            &mut w,
            REGULAR,
            format!("Discount ({}%):", percent(invoice.discount)),
            -totals.discount_amount,
        );
    }
    total_row(&mut w, BOLD, "Total:".to_string(), totals.grand_total);

    // Notes and terms
    for (title, text) in [("Notes", &invoice.notes), ("Terms & Conditions", &invoice.terms)] {
        let Some(text) = text.as_deref().filter(|t| !t.trim().is_empty()) else {
            continue;
        };
        w.advance(LINE);
        w.ensure_room(LINE * 2.0);
        w.text(BOLD, 11.0, MARGIN, title);
        w.advance(LINE);
        for paragraph in text.lines() {
            w.ensure_room(LINE);
            w.line(&clip(paragraph, 90));
        }
    }

    Ok(w.finish(&format!("Invoice {}", invoice.invoice_no)))
}

fn build_document(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>, lopdf::Error> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            REGULAR => regular_id,
            BOLD => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use hrm_core::domain::{Address, ClientInfo, LineItem, NewInvoice};
    use uuid::Uuid;

    fn invoice(items: Vec<LineItem>, tax: i64, discount: i64) -> Invoice {
        Invoice::new(
            Uuid::new_v4(),
            NewInvoice {
                client: ClientInfo {
                    name: "Globex Ltd".to_string(),
                    email: "billing@globex.test".to_string(),
                    phone: Some("+1 555 0100".to_string()),
                    address: Address {
                        street: Some("1 Main St".to_string()),
                        city: Some("Springfield".to_string()),
                        ..Default::default()
                    },
                },
                invoice_no: "INV-2001".to_string(),
                items,
                tax: Decimal::from(tax),
                discount: Decimal::from(discount),
                due_date: NaiveDate::from_ymd_opt(2025, 3, 1),
                notes: Some("Thank you for your business".to_string()),
                terms: None,
            },
            Uuid::new_v4(),
        )
        .unwrap()
    }

    fn text_of(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn test_renders_single_page_invoice() {
        let inv = invoice(vec![LineItem::new("Consulting", 2, Decimal::from(50))], 10, 0);
        let bytes = LopdfInvoiceRenderer::new().render(&inv).unwrap();

        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);

        let text = text_of(&bytes);
        assert!(text.contains("Invoice #: INV-2001"));
        assert!(text.contains("Due Date: 3/1/2025"));
        assert!(text.contains("Tax \\(10%\\):") || text.contains("Tax (10%):"));
        assert!(!text.contains("Discount"));
        assert!(text.contains("110.00"));
        assert!(text.contains("Thank you for your business"));
    }

    #[test]
    fn test_overflowing_items_span_pages() {
        let items = (1..=80)
            .map(|i| LineItem::new(format!("Line item {}", i), 1, Decimal::from(i)))
            .collect();
        let inv = invoice(items, 0, 5);
        let bytes = LopdfInvoiceRenderer::new().render(&inv).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages().len();
        assert!(pages > 1, "expected several pages, got {}", pages);
        assert!(text_of(&bytes).contains(&format!("Page {} of {}", pages, pages)));
    }

    #[test]
    fn test_render_is_keyed_by_content() {
        let mut inv = invoice(vec![LineItem::new("Audit", 1, Decimal::from(300))], 0, 0);
        inv.created_at = Utc::now();
        let renderer = LopdfInvoiceRenderer::new();
        assert_eq!(renderer.render(&inv).unwrap(), renderer.render(&inv).unwrap());
    }

    #[test]
    fn test_clip_long_descriptions() {
        assert_eq!(clip("short", 10), "short");
        assert_eq!(clip("abcdefghijklmnop", 10), "abcdefg...");
    }
}
