use serde::{Deserialize, Serialize};

use crate::core::format_currency;
use crate::modules::documents::models::{Document, DocumentKind, PaymentStatus};
use crate::modules::totals::models::Totals;

/// Currency-formatted totals for templates.
///
/// The O&P, discount and shipping lines are `None` when zero so templates can
/// drop them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedTotals {
    pub items_subtotal: String,
    pub op_amount: Option<String>,
    pub subtotal_with_op: String,
    pub tax_amount: String,
    pub discount_amount: Option<String>,
    pub shipping: Option<String>,
    pub total_amount: String,
    pub paid_amount: String,
    pub balance_due: String,
}

/// Render-ready view of a whole document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    pub title: String,
    pub totals: Totals,
    pub formatted: RenderedTotals,
    pub payment_status: PaymentStatus,
}

/// Formats already-computed totals; never recomputes them
#[derive(Debug, Clone)]
pub struct TotalsRenderer {
    currency_symbol: String,
}

impl TotalsRenderer {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn render(&self, totals: &Totals) -> RenderedTotals {
        let money = |amount| format_currency(amount, &self.currency_symbol);
        let optional = |amount: rust_decimal::Decimal| {
            if amount.is_zero() {
                None
            } else {
                Some(money(amount))
            }
        };

        RenderedTotals {
            items_subtotal: money(totals.items_subtotal),
            op_amount: optional(totals.op_amount),
            subtotal_with_op: money(totals.subtotal_with_op),
            tax_amount: money(totals.tax_amount),
            discount_amount: optional(totals.discount_amount),
            shipping: optional(totals.shipping),
            total_amount: money(totals.total_amount),
            paid_amount: money(totals.paid_amount),
            balance_due: money(totals.balance_due),
        }
    }

    pub fn render_document(&self, document: &Document) -> RenderedDocument {
        RenderedDocument {
            kind: document.kind(),
            title: document.kind().title().to_string(),
            totals: document.totals().clone(),
            formatted: self.render(document.totals()),
            payment_status: document.payment_status(),
        }
    }
}

impl Default for TotalsRenderer {
    fn default() -> Self {
        Self::new("$")
    }
}
