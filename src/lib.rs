//! claimdesk billing totals library
//!
//! Computes estimate, invoice and receipt totals: item subtotal, overhead &
//! profit, proportional tax, discount, shipping, payments and balance due.
//! The calculation core ([`TotalsEngine`]) is pure; the HTTP layer in
//! [`modules`] is a thin stateless wrapper around it.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::documents;
pub use modules::payments;
pub use modules::totals;

pub use crate::core::{AppError, Result};
pub use modules::documents::{Document, DocumentKind, PaymentStatus, TotalsRenderer};
pub use modules::payments::{LedgerUpdate, PaymentInput, PaymentLedger, PaymentRecord};
pub use modules::totals::{LineItem, TaxBreakdown, TaxMethod, Totals, TotalsConfig, TotalsEngine};
