//! Invoice DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use hrm_core::{Address, ClientInfo, InvoiceChanges, InvoiceStatus, LineItem, NewInvoice};

use super::common::{flexible_date, lenient_percent, lenient_percent_opt, percentage, tax_percent, unit_rate};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfoDto {
    #[validate(length(min = 1, max = 200, message = "Client name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid client email"))]
    pub email: String,

    pub phone: Option<String>,

    #[serde(default)]
    pub address: Address,
}

impl From<ClientInfoDto> for ClientInfo {
    fn from(dto: ClientInfoDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            email: dto.email.trim().to_string(),
            phone: dto.phone,
            address: dto.address,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct LineItemDto {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,

    #[validate(custom(function = "unit_rate"))]
    pub rate: Decimal,
}

impl From<LineItemDto> for LineItem {
    fn from(dto: LineItemDto) -> Self {
        LineItem::new(dto.description, dto.quantity, dto.rate)
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    #[validate(nested)]
    pub client: ClientInfoDto,

    #[validate(length(min = 1, max = 50, message = "Invoice number must be between 1 and 50 characters"))]
    pub invoice_no: String,

    #[validate(length(min = 1, message = "At least one line item is required"), nested)]
    pub items: Vec<LineItemDto>,

    #[serde(default, deserialize_with = "lenient_percent")]
    #[validate(custom(function = "tax_percent"))]
    pub tax: Decimal,

    #[serde(default, deserialize_with = "lenient_percent")]
    #[validate(custom(function = "percentage"))]
    pub discount: Decimal,

    #[serde(default, deserialize_with = "flexible_date")]
    pub due_date: Option<NaiveDate>,

    pub notes: Option<String>,
    pub terms: Option<String>,
}

impl From<CreateInvoiceRequest> for NewInvoice {
    fn from(req: CreateInvoiceRequest) -> Self {
        Self {
            client: req.client.into(),
            invoice_no: req.invoice_no.trim().to_string(),
            items: req.items.into_iter().map(LineItem::from).collect(),
            tax: req.tax,
            discount: req.discount,
            due_date: req.due_date,
            notes: req.notes,
            terms: req.terms,
        }
    }
}

/// Partial update. Omitted fields keep their stored values.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceRequest {
    #[validate(nested)]
    pub client: Option<ClientInfoDto>,

    #[validate(length(min = 1, max = 50, message = "Invoice number must be between 1 and 50 characters"))]
    pub invoice_no: Option<String>,

    #[validate(length(min = 1, message = "At least one line item is required"), nested)]
    pub items: Option<Vec<LineItemDto>>,

    #[serde(default, deserialize_with = "lenient_percent_opt")]
    #[validate(custom(function = "tax_percent"))]
    pub tax: Option<Decimal>,

    #[serde(default, deserialize_with = "lenient_percent_opt")]
    #[validate(custom(function = "percentage"))]
    pub discount: Option<Decimal>,

    #[serde(default, deserialize_with = "flexible_date")]
    pub due_date: Option<NaiveDate>,

    pub notes: Option<String>,
    pub terms: Option<String>,
}

impl From<UpdateInvoiceRequest> for InvoiceChanges {
    fn from(req: UpdateInvoiceRequest) -> Self {
        Self {
            client: req.client.map(ClientInfo::from),
            invoice_no: req.invoice_no.map(|no| no.trim().to_string()),
            items: req
                .items
                .map(|items| items.into_iter().map(LineItem::from).collect()),
            tax: req.tax,
            discount: req.discount,
            due_date: req.due_date,
            notes: req.notes,
            terms: req.terms,
        }
    }
}

fn settlement_status(status: &InvoiceStatus) -> Result<(), ValidationError> {
    match status {
        InvoiceStatus::Paid | InvoiceStatus::Overdue | InvoiceStatus::Cancelled => Ok(()),
        _ => {
            let mut err = ValidationError::new("status");
            err.message = Some("Status must be one of Paid, Overdue, Cancelled".into());
            Err(err)
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStatusRequest {
    #[validate(custom(function = "settlement_status"))]
    pub status: InvoiceStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendInvoiceRequest {
    pub template_id: Option<Uuid>,
}

/// `?status=&page=&limit=`
#[derive(Debug, Default, Deserialize)]
pub struct ListInvoicesQuery {
    pub status: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}
