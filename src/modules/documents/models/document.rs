// Document model
//
// Estimates, invoices and receipts share one totals policy. A Document owns
// its items, configuration and payments and keeps `totals` in step with them:
// every change recomputes totals from scratch, and a failed change leaves the
// document as it was.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{AppError, Result};
use crate::modules::payments::models::{PaymentInput, PaymentRecord};
use crate::modules::payments::services::PaymentLedger;
use crate::modules::totals::models::{LineItem, Totals, TotalsConfig};
use crate::modules::totals::services::TotalsEngine;

/// Kind of billing document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Estimate,
    Invoice,
    Receipt,
}

impl DocumentKind {
    /// Whether payments can be recorded against this kind
    pub fn accepts_payments(&self) -> bool {
        !matches!(self, DocumentKind::Estimate)
    }

    /// Heading used on rendered documents
    pub fn title(&self) -> &'static str {
        match self {
            DocumentKind::Estimate => "Estimate",
            DocumentKind::Invoice => "Invoice",
            DocumentKind::Receipt => "Receipt",
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Estimate => write!(f, "estimate"),
            DocumentKind::Invoice => write!(f, "invoice"),
            DocumentKind::Receipt => write!(f, "receipt"),
        }
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "estimate" => Ok(DocumentKind::Estimate),
            "invoice" => Ok(DocumentKind::Invoice),
            "receipt" => Ok(DocumentKind::Receipt),
            _ => Err(format!("Invalid document kind: {}", s)),
        }
    }
}

/// Settlement state derived from a document's totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing paid yet
    Unpaid,
    /// Some payment recorded, balance still positive
    PartiallyPaid,
    /// Balance is exactly zero
    Paid,
    /// Payments exceed the total; the balance is a credit
    Overpaid,
}

impl PaymentStatus {
    pub fn from_totals(totals: &Totals) -> Self {
        if totals.paid_amount.is_zero() {
            return PaymentStatus::Unpaid;
        }

        match totals.balance_due.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => PaymentStatus::PartiallyPaid,
            std::cmp::Ordering::Equal => PaymentStatus::Paid,
            std::cmp::Ordering::Less => PaymentStatus::Overpaid,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Unpaid => write!(f, "unpaid"),
            PaymentStatus::PartiallyPaid => write!(f, "partially_paid"),
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::Overpaid => write!(f, "overpaid"),
        }
    }
}

/// Unvalidated document data as supplied by a caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentPayload {
    pub kind: DocumentKind,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub config: TotalsConfig,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
}

/// An estimate, invoice or receipt with its current totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    kind: DocumentKind,
    items: Vec<LineItem>,
    config: TotalsConfig,
    payments: Vec<PaymentRecord>,
    totals: Totals,
}

impl Document {
    /// Create a document without payments
    pub fn new(kind: DocumentKind, items: Vec<LineItem>, config: TotalsConfig) -> Result<Self> {
        Self::with_payments(kind, items, config, Vec::new())
    }

    /// Create a document with previously recorded payments
    pub fn with_payments(
        kind: DocumentKind,
        items: Vec<LineItem>,
        config: TotalsConfig,
        payments: Vec<PaymentRecord>,
    ) -> Result<Self> {
        if !payments.is_empty() {
            Self::ensure_accepts_payments(kind)?;
        }

        let totals = TotalsEngine::compute_with_payments(&items, &config, &payments)?;
        debug!(
            kind = %kind,
            items = items.len(),
            payments = payments.len(),
            total = %totals.total_amount,
            "Computed document totals"
        );

        Ok(Self {
            kind,
            items,
            config,
            payments,
            totals,
        })
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn config(&self) -> &TotalsConfig {
        &self.config
    }

    pub fn payments(&self) -> &[PaymentRecord] {
        &self.payments
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }

    pub fn payment_status(&self) -> PaymentStatus {
        PaymentStatus::from_totals(&self.totals)
    }

    /// Replace all line items and recompute
    pub fn replace_items(&mut self, items: Vec<LineItem>) -> Result<&Totals> {
        let totals = TotalsEngine::compute_with_payments(&items, &self.config, &self.payments)?;
        self.items = items;
        self.commit(totals, "items replaced")
    }

    /// Replace the totals configuration and recompute
    pub fn replace_config(&mut self, config: TotalsConfig) -> Result<&Totals> {
        let totals = TotalsEngine::compute_with_payments(&self.items, &config, &self.payments)?;
        self.config = config;
        self.commit(totals, "config replaced")
    }

    /// Record a payment and recompute
    pub fn add_payment(&mut self, payment: PaymentInput) -> Result<&Totals> {
        Self::ensure_accepts_payments(self.kind)?;

        let update = PaymentLedger::new(&self.items, &self.config).apply(&self.payments, payment)?;
        self.payments = update.payments;
        self.commit(update.totals, "payment added")
    }

    /// Remove the payment at `index` and recompute
    pub fn remove_payment(&mut self, index: usize) -> Result<&Totals> {
        let update = PaymentLedger::new(&self.items, &self.config).remove(&self.payments, index)?;
        self.payments = update.payments;
        self.commit(update.totals, "payment removed")
    }

    fn commit(&mut self, totals: Totals, change: &str) -> Result<&Totals> {
        debug!(
            kind = %self.kind,
            change,
            previous_total = %self.totals.total_amount,
            total = %totals.total_amount,
            balance_due = %totals.balance_due,
            "Recomputed document totals"
        );
        self.totals = totals;
        Ok(&self.totals)
    }

    fn ensure_accepts_payments(kind: DocumentKind) -> Result<()> {
        if kind.accepts_payments() {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "Payments cannot be recorded on an {}",
                kind
            )))
        }
    }
}

impl TryFrom<DocumentPayload> for Document {
    type Error = AppError;

    fn try_from(payload: DocumentPayload) -> Result<Self> {
        Self::with_payments(payload.kind, payload.items, payload.config, payload.payments)
    }
}
