use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Computed document totals, every field rounded to 2 decimal places
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Σ quantity × rate
    pub items_subtotal: Decimal,
    /// Overhead & profit on the full items subtotal
    pub op_amount: Decimal,
    pub subtotal_with_op: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub shipping: Decimal,
    /// subtotal_with_op + tax − discount + shipping
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    /// total − paid; negative means the customer holds a credit
    pub balance_due: Decimal,
}

/// Unrounded intermediate values of the proportional tax base.
///
/// Under `TaxMethod::Specific` these values are still reported but do not
/// feed the tax line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Σ quantity × rate over taxable items
    pub taxable_amount: Decimal,
    /// O&P attributable to taxable items
    pub taxable_op_amount: Decimal,
    /// taxable_amount / items_subtotal, 0 when the subtotal is 0
    pub taxable_ratio: Decimal,
    /// Share of the discount allocated to the taxable base
    pub taxable_discount: Decimal,
    /// Base the tax rate applies to, never negative
    pub taxable_base: Decimal,
}
