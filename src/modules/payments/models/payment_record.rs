// PaymentRecord value object
//
// A payment recorded against an invoice or receipt. Raw request data
// arrives as PaymentInput and is validated into a PaymentRecord; dates are
// normalized to a calendar date (serialized as YYYY-MM-DD) and method
// codes to upper case.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// Maximum length of a payment method code (e.g. "CK", "CC")
pub const MAX_METHOD_LEN: usize = 2;

/// Unvalidated payment data as supplied by a caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentInput {
    pub amount: Decimal,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
}

impl PaymentInput {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            ..Self::default()
        }
    }

    pub fn dated(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }
}

/// A validated payment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaymentInput")]
pub struct PaymentRecord {
    amount: Decimal,
    date: Option<NaiveDate>,
    method: Option<String>,
    reference: Option<String>,
}

impl PaymentRecord {
    /// Validate and normalize raw payment data
    pub fn new(input: PaymentInput) -> Result<Self> {
        if input.amount <= Decimal::ZERO {
            return Err(AppError::invalid_payment(format!(
                "Payment amount must be positive, got: {}",
                input.amount
            )));
        }

        let date = match non_blank(input.date) {
            Some(raw) => Some(parse_payment_date(&raw)?),
            None => None,
        };

        let method = match non_blank(input.method) {
            Some(code) if code.chars().count() > MAX_METHOD_LEN => {
                return Err(AppError::invalid_payment(format!(
                    "Payment method must be at most {} characters, got: {}",
                    MAX_METHOD_LEN, code
                )));
            }
            Some(code) => Some(code.to_uppercase()),
            None => None,
        };

        Ok(Self {
            amount: input.amount,
            date,
            method,
            reference: non_blank(input.reference),
        })
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }
}

impl TryFrom<PaymentInput> for PaymentRecord {
    type Error = AppError;

    fn try_from(input: PaymentInput) -> Result<Self> {
        Self::new(input)
    }
}

/// Parse a payment date in ISO-8601 (date or date-time) or MM/DD/YYYY form
pub fn parse_payment_date(raw: &str) -> Result<NaiveDate> {
    let value = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(timestamp.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%m/%d/%Y") {
        return Ok(date);
    }

    Err(AppError::invalid_payment(format!(
        "Payment date must be YYYY-MM-DD or MM/DD/YYYY, got: {}",
        raw
    )))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
