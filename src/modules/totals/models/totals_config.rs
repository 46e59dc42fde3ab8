// Document-level totals configuration
//
// Holds the tax policy, O&P markup, discount and shipping of one document.
// `tax_rate` is only read under TaxMethod::Percentage and
// `fixed_tax_amount` only under TaxMethod::Specific.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

/// How the document's tax line is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum TaxMethod {
    /// tax_rate percent of the proportional taxable base
    #[default]
    Percentage,

    /// A fixed tax amount, independent of item taxability
    Specific,
}

impl std::fmt::Display for TaxMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxMethod::Percentage => write!(f, "PERCENTAGE"),
            TaxMethod::Specific => write!(f, "SPECIFIC"),
        }
    }
}

impl std::str::FromStr for TaxMethod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "PERCENTAGE" => Ok(TaxMethod::Percentage),
            "SPECIFIC" => Ok(TaxMethod::Specific),
            _ => Err(AppError::invalid_totals(format!(
                "Tax method must be PERCENTAGE or SPECIFIC, got: {}",
                s
            ))),
        }
    }
}

impl TryFrom<String> for TaxMethod {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

/// Tax, markup and adjustment settings of a single document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TotalsConfig {
    pub tax_method: TaxMethod,

    /// Percent in [0, 100]
    pub tax_rate: Decimal,

    pub fixed_tax_amount: Decimal,

    /// Overhead & profit percent, may exceed 100
    pub op_percent: Decimal,

    pub discount_amount: Decimal,

    pub shipping: Decimal,
}

impl TotalsConfig {
    /// Percentage tax at `tax_rate` with no markup or adjustments
    pub fn percentage(tax_rate: Decimal) -> Self {
        Self {
            tax_method: TaxMethod::Percentage,
            tax_rate,
            ..Self::default()
        }
    }

    /// Fixed tax amount with no markup or adjustments
    pub fn specific(fixed_tax_amount: Decimal) -> Self {
        Self {
            tax_method: TaxMethod::Specific,
            fixed_tax_amount,
            ..Self::default()
        }
    }

    pub fn with_op_percent(mut self, op_percent: Decimal) -> Self {
        self.op_percent = op_percent;
        self
    }

    pub fn with_discount(mut self, discount_amount: Decimal) -> Self {
        self.discount_amount = discount_amount;
        self
    }

    pub fn with_shipping(mut self, shipping: Decimal) -> Self {
        self.shipping = shipping;
        self
    }

    /// Check every numeric field against its allowed range
    pub fn validate(&self) -> Result<()> {
        if self.tax_rate < Decimal::ZERO || self.tax_rate > Decimal::ONE_HUNDRED {
            return Err(AppError::invalid_totals(format!(
                "Tax rate must be between 0 and 100, got: {}",
                self.tax_rate
            )));
        }

        Self::non_negative("Fixed tax amount", self.fixed_tax_amount)?;
        Self::non_negative("O&P percent", self.op_percent)?;
        Self::non_negative("Discount amount", self.discount_amount)?;
        Self::non_negative("Shipping", self.shipping)?;

        Ok(())
    }

    fn non_negative(field: &str, value: Decimal) -> Result<()> {
        if value < Decimal::ZERO {
            return Err(AppError::invalid_totals(format!(
                "{} cannot be negative, got: {}",
                field, value
            )));
        }
        Ok(())
    }
}
