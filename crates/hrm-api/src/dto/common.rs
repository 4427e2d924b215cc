//! Shared request helpers: paging, lenient numbers, and dates

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::ValidationError;

use hrm_shared::Pagination;

/// `?page=&limit=`. Missing or malformed values fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PaginationQuery {
    pub fn pagination(&self) -> Pagination {
        let parse = |v: &Option<String>| v.as_deref().and_then(|s| s.trim().parse::<u32>().ok());
        Pagination::new(parse(&self.page), parse(&self.limit))
    }
}

fn lenient_decimal(value: Option<Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .unwrap_or(Decimal::ZERO),
        Some(Value::String(s)) => Decimal::from_str(s.trim()).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Percentages read as 0 when absent, null, or not numeric.
pub fn lenient_percent<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_decimal(Option::<Value>::deserialize(deserializer)?))
}

/// Like [`lenient_percent`] for partial updates; an absent field stays
/// `None` through `#[serde(default)]`.
pub fn lenient_percent_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(lenient_decimal(Option::<Value>::deserialize(deserializer)?)))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp.
pub fn flexible_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date '{}'", raw))),
    }
}

pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("Must not be negative".into());
        return Err(err);
    }
    Ok(())
}

/// Largest accepted line-item rate.
pub const MAX_RATE: i64 = 1_000_000_000;
/// Largest accepted tax percentage.
pub const MAX_TAX_PERCENT: i64 = 1_000;

fn at_most(value: &Decimal, max: i64, code: &'static str, message: String) -> Result<(), ValidationError> {
    non_negative(value)?;
    if *value > Decimal::from(max) {
        let mut err = ValidationError::new(code);
        err.message = Some(message.into());
        return Err(err);
    }
    Ok(())
}

pub fn unit_rate(value: &Decimal) -> Result<(), ValidationError> {
    at_most(value, MAX_RATE, "rate", format!("Rate must be between 0 and {}", MAX_RATE))
}

pub fn tax_percent(value: &Decimal) -> Result<(), ValidationError> {
    at_most(value, MAX_TAX_PERCENT, "tax", format!("Tax must be between 0 and {}", MAX_TAX_PERCENT))
}

pub fn percentage(value: &Decimal) -> Result<(), ValidationError> {
    non_negative(value)?;
    if *value > Decimal::ONE_HUNDRED {
        let mut err = ValidationError::new("percentage");
        err.message = Some("Must be between 0 and 100".into());
        return Err(err);
    }
    Ok(())
}
