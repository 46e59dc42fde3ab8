// Test Data Factory
//
// Canonical documents used across the test suites, both as typed values
// and as JSON request payloads.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use claimdesk::{LineItem, TotalsConfig};

/// Test data factory for documents and payloads
pub struct TestDataFactory;

impl TestDataFactory {
    /// Two units at 150, O&P 10%, discount 20, tax 8%.
    /// Total is 334.80.
    pub fn roofing_items() -> Vec<LineItem> {
        vec![LineItem::new(dec!(2), dec!(150)).unwrap()]
    }

    pub fn roofing_config() -> TotalsConfig {
        TotalsConfig::percentage(dec!(8))
            .with_op_percent(dec!(10))
            .with_discount(dec!(20))
    }

    /// One taxable and one non-taxable line of 100 each
    pub fn mixed_items() -> Vec<LineItem> {
        vec![
            LineItem::new(dec!(1), dec!(100)).unwrap(),
            LineItem::non_taxable(dec!(1), dec!(100)).unwrap(),
        ]
    }

    /// Build a line item, panicking on invalid input
    pub fn item(quantity: Decimal, rate: Decimal, taxable: bool) -> LineItem {
        if taxable {
            LineItem::new(quantity, rate).unwrap()
        } else {
            LineItem::non_taxable(quantity, rate).unwrap()
        }
    }

    /// JSON body for /totals/compute matching roofing_items/roofing_config
    pub fn roofing_payload() -> Value {
        json!({
            "items": [
                { "description": "Tear-off and reshingle", "quantity": "2", "rate": "150" }
            ],
            "config": {
                "tax_method": "PERCENTAGE",
                "tax_rate": "8",
                "op_percent": "10",
                "discount_amount": "20"
            }
        })
    }

    /// JSON body with one taxable and one non-taxable line
    pub fn mixed_payload(config: Value) -> Value {
        json!({
            "items": [
                { "quantity": "1", "rate": "100", "taxable": true },
                { "quantity": "1", "rate": "100", "taxable": false }
            ],
            "config": config
        })
    }
}
