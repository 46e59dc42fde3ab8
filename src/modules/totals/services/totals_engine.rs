use rust_decimal::Decimal;

use crate::core::{round_money, AppError, Result};
use crate::modules::payments::models::PaymentRecord;
use crate::modules::totals::models::{LineItem, TaxBreakdown, TaxMethod, Totals, TotalsConfig};

/// Calculator for document totals shared by estimates, invoices and receipts.
///
/// Tax under `TaxMethod::Percentage` is charged on a proportional base: the
/// taxable items, plus the O&P attributable to them, minus the share of the
/// discount attributable to them. Intermediate values stay unrounded; each
/// output field is rounded independently to 2 decimal places.
///
/// All arithmetic is checked. A value that leaves the decimal range is an
/// input error, never a panic.
///
/// The engine holds no state and performs no I/O or logging.
pub struct TotalsEngine;

/// Unrounded sums over the line items
struct ItemSums {
    items_subtotal: Decimal,
    taxable_amount: Decimal,
}

impl ItemSums {
    fn collect(items: &[LineItem]) -> Result<Self> {
        let mut sums = Self {
            items_subtotal: Decimal::ZERO,
            taxable_amount: Decimal::ZERO,
        };

        for item in items {
            let line_total = item.line_total()?;
            sums.items_subtotal = sums
                .items_subtotal
                .checked_add(line_total)
                .ok_or_else(|| overflow("Items subtotal"))?;
            if item.taxable {
                sums.taxable_amount = sums
                    .taxable_amount
                    .checked_add(line_total)
                    .ok_or_else(|| overflow("Taxable amount"))?;
            }
        }

        Ok(sums)
    }
}

impl TotalsEngine {
    /// Compute totals for a document without payments
    pub fn compute(items: &[LineItem], config: &TotalsConfig) -> Result<Totals> {
        Self::compute_with_payments(items, config, &[])
    }

    /// Compute totals for a document, folding payments into paid/balance.
    ///
    /// # Errors
    /// `AppError::InvalidTotalsInput` when a quantity is not positive, a
    /// configuration value is out of range or an amount overflows.
    /// `AppError::InvalidPaymentRecord` when the payments overflow.
    /// Nothing is computed in either case.
    pub fn compute_with_payments(
        items: &[LineItem],
        config: &TotalsConfig,
        payments: &[PaymentRecord],
    ) -> Result<Totals> {
        Self::validate(items, config)?;

        let sums = ItemSums::collect(items)?;

        let op_amount = percent_of(sums.items_subtotal, config.op_percent)
            .ok_or_else(|| overflow("O&P amount"))?;
        let tax_amount = match config.tax_method {
            TaxMethod::Specific => config.fixed_tax_amount,
            TaxMethod::Percentage if config.tax_rate > Decimal::ZERO => {
                let breakdown = Self::allocate(&sums, config)?;
                percent_of(breakdown.taxable_base, config.tax_rate)
                    .ok_or_else(|| overflow("Tax amount"))?
            }
            TaxMethod::Percentage => Decimal::ZERO,
        };

        let subtotal_with_op = sums
            .items_subtotal
            .checked_add(op_amount)
            .ok_or_else(|| overflow("Subtotal with O&P"))?;
        // Discount is deducted once here; taxable_discount only shapes the tax base.
        let total_amount = subtotal_with_op
            .checked_add(tax_amount)
            .and_then(|total| total.checked_sub(config.discount_amount))
            .and_then(|total| total.checked_add(config.shipping))
            .ok_or_else(|| overflow("Total amount"))?;

        let paid_amount = payments
            .iter()
            .try_fold(Decimal::ZERO, |paid, payment| paid.checked_add(payment.amount()))
            .ok_or_else(|| {
                AppError::invalid_payment("Sum of payments overflows the supported decimal range")
            })?;
        let balance_due = total_amount.checked_sub(paid_amount).ok_or_else(|| {
            AppError::invalid_payment("Balance due overflows the supported decimal range")
        })?;

        Ok(Totals {
            items_subtotal: round_money(sums.items_subtotal),
            op_amount: round_money(op_amount),
            subtotal_with_op: round_money(subtotal_with_op),
            tax_amount: round_money(tax_amount),
            discount_amount: round_money(config.discount_amount),
            shipping: round_money(config.shipping),
            total_amount: round_money(total_amount),
            paid_amount: round_money(paid_amount),
            balance_due: round_money(balance_due),
        })
    }

    /// Unrounded tax-base allocation for the given document
    ///
    /// Reported whatever the tax method, so it can fail on inputs whose
    /// totals compute fine under `TaxMethod::Specific`.
    pub fn breakdown(items: &[LineItem], config: &TotalsConfig) -> Result<TaxBreakdown> {
        Self::validate(items, config)?;
        Self::allocate(&ItemSums::collect(items)?, config)
    }

    /// Validate items and configuration before any arithmetic
    pub fn validate(items: &[LineItem], config: &TotalsConfig) -> Result<()> {
        config.validate()?;
        for item in items {
            item.validate()?;
        }
        Ok(())
    }

    fn allocate(sums: &ItemSums, config: &TotalsConfig) -> Result<TaxBreakdown> {
        let taxable_op_amount = percent_of(sums.taxable_amount, config.op_percent)
            .ok_or_else(|| overflow("Taxable O&P amount"))?;

        let taxable_ratio = if sums.items_subtotal.is_zero() {
            Decimal::ZERO
        } else {
            sums.taxable_amount
                .checked_div(sums.items_subtotal)
                .ok_or_else(|| overflow("Taxable ratio"))?
        };

        let taxable_discount = config
            .discount_amount
            .checked_mul(taxable_ratio)
            .ok_or_else(|| overflow("Taxable discount"))?;
        let taxable_base = sums
            .taxable_amount
            .checked_add(taxable_op_amount)
            .and_then(|base| base.checked_sub(taxable_discount))
            .ok_or_else(|| overflow("Taxable base"))?
            .max(Decimal::ZERO);

        Ok(TaxBreakdown {
            taxable_amount: sums.taxable_amount,
            taxable_op_amount,
            taxable_ratio,
            taxable_discount,
            taxable_base,
        })
    }
}

fn percent_of(amount: Decimal, percent: Decimal) -> Option<Decimal> {
    amount
        .checked_mul(percent)
        .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
}

fn overflow(quantity: &str) -> AppError {
    AppError::invalid_totals(format!(
        "{} overflows the supported decimal range",
        quantity
    ))
}
