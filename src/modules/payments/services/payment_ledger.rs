use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};
use crate::modules::payments::models::{PaymentInput, PaymentRecord};
use crate::modules::totals::models::{LineItem, Totals, TotalsConfig};
use crate::modules::totals::services::TotalsEngine;

/// Result of a ledger operation: the new payment list and fresh totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerUpdate {
    pub payments: Vec<PaymentRecord>,
    pub totals: Totals,
}

/// Applies and removes payments for one document.
///
/// The ledger borrows the document's items and configuration and never
/// mutates the caller's payment list: each operation returns a new list
/// together with totals recomputed from scratch, or an error and nothing
/// else.
pub struct PaymentLedger<'a> {
    items: &'a [LineItem],
    config: &'a TotalsConfig,
}

impl<'a> PaymentLedger<'a> {
    pub fn new(items: &'a [LineItem], config: &'a TotalsConfig) -> Self {
        Self { items, config }
    }

    /// Validate `payment` and append it to `existing`
    ///
    /// # Errors
    /// `AppError::InvalidPaymentRecord` for a non-positive amount, an
    /// unparseable date, an oversized method code or a payment total beyond
    /// the decimal range;
    /// `AppError::InvalidTotalsInput` if the document itself is invalid.
    pub fn apply(&self, existing: &[PaymentRecord], payment: PaymentInput) -> Result<LedgerUpdate> {
        let record = PaymentRecord::new(payment)?;

        let mut payments = existing.to_vec();
        payments.push(record);

        self.settle(payments)
    }

    /// Remove the payment at `index` from `existing`
    pub fn remove(&self, existing: &[PaymentRecord], index: usize) -> Result<LedgerUpdate> {
        if index >= existing.len() {
            return Err(AppError::invalid_payment(format!(
                "Payment index {} out of range ({} payments recorded)",
                index,
                existing.len()
            )));
        }

        let mut payments = existing.to_vec();
        payments.remove(index);

        self.settle(payments)
    }

    /// Totals for `payments` against this document without changing them
    pub fn totals(&self, payments: &[PaymentRecord]) -> Result<Totals> {
        TotalsEngine::compute_with_payments(self.items, self.config, payments)
    }

    fn settle(&self, payments: Vec<PaymentRecord>) -> Result<LedgerUpdate> {
        let totals = self.totals(&payments)?;
        Ok(LedgerUpdate { payments, totals })
    }
}
