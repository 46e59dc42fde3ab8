// LineItem value object
//
// A line item is one priced row of an estimate, invoice or receipt.
// Its line total is quantity × rate, kept unrounded; only the document
// totals are rounded. A negative rate represents a credit line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

const MAX_DESCRIPTION_LEN: usize = 255;

fn default_taxable() -> bool {
    true
}

/// Represents a single priced row of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Free text shown on rendered documents, never used in arithmetic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Quantity, must be strictly positive
    pub quantity: Decimal,

    /// Price per unit, may be negative for credits
    pub rate: Decimal,

    /// Whether the line contributes to the tax base
    #[serde(default = "default_taxable")]
    pub taxable: bool,

    /// Per-line tax rate in percent, carried for display
    #[serde(default)]
    pub item_tax_rate: Decimal,
}

impl LineItem {
    /// Create a taxable line item with validation
    ///
    /// # Arguments
    /// * `quantity` - Must be positive
    /// * `rate` - Any value, negative for credits
    pub fn new(quantity: Decimal, rate: Decimal) -> Result<Self> {
        let item = Self {
            description: None,
            quantity,
            rate,
            taxable: true,
            item_tax_rate: Decimal::ZERO,
        };
        item.validate()?;
        Ok(item)
    }

    /// Create a line item excluded from the tax base
    pub fn non_taxable(quantity: Decimal, rate: Decimal) -> Result<Self> {
        let mut item = Self::new(quantity, rate)?;
        item.taxable = false;
        Ok(item)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Result<Self> {
        self.description = Some(description.into());
        self.validate()?;
        Ok(self)
    }

    pub fn with_item_tax_rate(mut self, item_tax_rate: Decimal) -> Result<Self> {
        self.item_tax_rate = item_tax_rate;
        self.validate()?;
        Ok(self)
    }

    /// Unrounded quantity × rate
    ///
    /// # Errors
    /// `AppError::InvalidTotalsInput` when the product leaves the decimal range
    pub fn line_total(&self) -> Result<Decimal> {
        self.quantity.checked_mul(self.rate).ok_or_else(|| {
            AppError::invalid_totals(format!(
                "Line total {} x {} overflows the supported decimal range",
                self.quantity, self.rate
            ))
        })
    }

    /// Unrounded per-line tax at `item_tax_rate`, zero for non-taxable lines
    pub fn line_tax(&self) -> Result<Decimal> {
        if !self.taxable {
            return Ok(Decimal::ZERO);
        }
        self.line_total()?
            .checked_mul(self.item_tax_rate)
            .map(|tax| tax / Decimal::ONE_HUNDRED)
            .ok_or_else(|| AppError::invalid_totals("Line tax overflows the supported decimal range"))
    }

    /// Check the value ranges of every field
    pub fn validate(&self) -> Result<()> {
        if self.quantity <= Decimal::ZERO {
            return Err(AppError::invalid_totals(format!(
                "Quantity must be positive, got: {}",
                self.quantity
            )));
        }

        if self.item_tax_rate < Decimal::ZERO {
            return Err(AppError::invalid_totals(format!(
                "Item tax rate cannot be negative, got: {}",
                self.item_tax_rate
            )));
        }

        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(AppError::invalid_totals(format!(
                    "Line item description cannot exceed {} characters",
                    MAX_DESCRIPTION_LEN
                )));
            }
        }

        Ok(())
    }
}
