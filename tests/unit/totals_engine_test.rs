// Property-based and scenario tests for the totals engine
//
// Properties tested:
// 1. compute is deterministic for identical inputs
// 2. op_amount scales linearly with op_percent (0, <100, >100)
// 3. zero subtotal never produces tax under PERCENTAGE
// 4. SPECIFIC tax ignores item taxability
// 5. total = subtotal_with_op + tax − discount + shipping, within rounding
// 6. tax base never goes negative, whatever the discount
// 7. magnitudes up to the decimal limit give totals or a typed error, never a panic

#[path = "../helpers/mod.rs"]
mod helpers;

use claimdesk::{AppError, LineItem, TaxMethod, TotalsConfig, TotalsEngine};
use helpers::TestDataFactory;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

fn one_cent() -> Decimal {
    dec!(0.01)
}

fn power_of_ten(exp: u32) -> Decimal {
    Decimal::from_i128_with_scale(10i128.pow(exp), 0)
}

prop_compose! {
    fn arb_item()(
        quantity in 1i64..=500,
        rate_cents in -50_000i64..=500_000,
        taxable in any::<bool>(),
    ) -> LineItem {
        TestDataFactory::item(Decimal::from(quantity), cents(rate_cents), taxable)
    }
}

prop_compose! {
    fn arb_config()(
        specific in any::<bool>(),
        tax_rate_bp in 0i64..=10_000,
        fixed_tax_cents in 0i64..=100_000,
        op_percent in 0i64..=250,
        discount_cents in 0i64..=200_000,
        shipping_cents in 0i64..=20_000,
    ) -> TotalsConfig {
        TotalsConfig {
            tax_method: if specific { TaxMethod::Specific } else { TaxMethod::Percentage },
            tax_rate: cents(tax_rate_bp),
            fixed_tax_amount: cents(fixed_tax_cents),
            op_percent: Decimal::from(op_percent),
            discount_amount: cents(discount_cents),
            shipping: cents(shipping_cents),
        }
    }
}

proptest! {
    #[test]
    fn test_compute_is_deterministic(
        items in prop::collection::vec(arb_item(), 0..12),
        config in arb_config(),
    ) {
        let first = TotalsEngine::compute(&items, &config).unwrap();
        let second = TotalsEngine::compute(&items, &config).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap(),
            "Serialized totals must be byte-identical"
        );
    }

    #[test]
    fn test_op_amount_is_linear(
        items in prop::collection::vec(arb_item(), 1..8),
        op_percent in 0i64..=400,
    ) {
        let config = TotalsConfig::default().with_op_percent(Decimal::from(op_percent));
        let totals = TotalsEngine::compute(&items, &config).unwrap();

        let raw_subtotal: Decimal = items.iter().map(|item| item.line_total().unwrap()).sum();
        let expected = claimdesk::core::round_money(
            raw_subtotal * Decimal::from(op_percent) / Decimal::ONE_HUNDRED,
        );

        prop_assert_eq!(totals.op_amount, expected);
        if op_percent == 0 {
            prop_assert_eq!(totals.op_amount, Decimal::ZERO);
        }
    }

    #[test]
    fn test_zero_subtotal_has_no_percentage_tax(
        quantities in prop::collection::vec(1i64..100, 0..6),
        tax_rate in 0i64..=100,
        op_percent in 0i64..=50,
        discount_cents in 0i64..=10_000,
    ) {
        let items: Vec<LineItem> = quantities
            .into_iter()
            .map(|q| TestDataFactory::item(Decimal::from(q), Decimal::ZERO, true))
            .collect();
        let config = TotalsConfig::percentage(Decimal::from(tax_rate))
            .with_op_percent(Decimal::from(op_percent))
            .with_discount(cents(discount_cents));

        let totals = TotalsEngine::compute(&items, &config).unwrap();
        prop_assert_eq!(totals.items_subtotal, Decimal::ZERO);
        prop_assert_eq!(totals.tax_amount, Decimal::ZERO);
    }

    #[test]
    fn test_specific_tax_ignores_taxability(
        items in prop::collection::vec(arb_item(), 0..10),
        fixed_tax_cents in 0i64..=100_000,
    ) {
        let config = TotalsConfig::specific(cents(fixed_tax_cents));
        let flipped: Vec<LineItem> = items
            .iter()
            .cloned()
            .map(|mut item| {
                item.taxable = !item.taxable;
                item
            })
            .collect();

        let original = TotalsEngine::compute(&items, &config).unwrap();
        let inverted = TotalsEngine::compute(&flipped, &config).unwrap();

        prop_assert_eq!(original.tax_amount, cents(fixed_tax_cents));
        prop_assert_eq!(original, inverted);
    }

    #[test]
    fn test_total_matches_components(
        items in prop::collection::vec(arb_item(), 0..10),
        config in arb_config(),
    ) {
        let totals = TotalsEngine::compute(&items, &config).unwrap();
        let recomposed = totals.subtotal_with_op + totals.tax_amount
            - totals.discount_amount + totals.shipping;

        // Each field is rounded on its own, so the recomposed sum may drift
        // by at most a cent per rounded component.
        prop_assert!(
            (totals.total_amount - recomposed).abs() <= one_cent() * Decimal::from(3),
            "total {} vs recomposed {}", totals.total_amount, recomposed
        );
        prop_assert_eq!(totals.balance_due, totals.total_amount);
    }

    #[test]
    fn test_tax_is_never_negative(
        items in prop::collection::vec(arb_item(), 0..10),
        config in arb_config(),
    ) {
        let totals = TotalsEngine::compute(&items, &config).unwrap();
        let breakdown = TotalsEngine::breakdown(&items, &config).unwrap();

        prop_assert!(totals.tax_amount >= Decimal::ZERO);
        prop_assert!(breakdown.taxable_base >= Decimal::ZERO);
    }

    #[test]
    fn test_out_of_range_tax_rate_rejected(
        over in 1i64..=100_000,
    ) {
        let items = TestDataFactory::roofing_items();
        let too_high = TotalsConfig::percentage(Decimal::ONE_HUNDRED + cents(over));
        let negative = TotalsConfig::percentage(-cents(over));

        prop_assert!(matches!(
            TotalsEngine::compute(&items, &too_high),
            Err(AppError::InvalidTotalsInput(_))
        ));
        prop_assert!(matches!(
            TotalsEngine::compute(&items, &negative),
            Err(AppError::InvalidTotalsInput(_))
        ));
    }
}

proptest! {
    #[test]
    fn test_large_magnitudes_never_panic(
        quantity_exp in 0u32..=28,
        rate_exp in 0u32..=28,
        credit in any::<bool>(),
        config in arb_config(),
    ) {
        let rate = if credit { -power_of_ten(rate_exp) } else { power_of_ten(rate_exp) };
        let items = vec![
            TestDataFactory::item(power_of_ten(quantity_exp), rate, true),
            TestDataFactory::item(dec!(1), dec!(100), false),
        ];

        match TotalsEngine::compute(&items, &config) {
            Ok(totals) => prop_assert!(quantity_exp + rate_exp <= 28, "{:?}", totals),
            Err(err) => prop_assert!(
                matches!(err, AppError::InvalidTotalsInput(_)),
                "unexpected error {:?}", err
            ),
        }
    }
}

#[test]
fn test_huge_quantity_and_rate_rejected() {
    let items = vec![TestDataFactory::item(power_of_ten(20), power_of_ten(20), true)];

    let err = TotalsEngine::compute(&items, &TotalsConfig::default()).unwrap_err();
    assert!(matches!(err, AppError::InvalidTotalsInput(_)));
    assert!(err.to_string().contains("overflows"));

    assert!(TotalsEngine::breakdown(&items, &TotalsConfig::default()).is_err());
}

#[test]
fn test_near_zero_subtotal_from_cancelling_credits() {
    // 1,000,000 taxable against a 999,999.99 exempt credit: subtotal 0.01,
    // taxable ratio 1e8. The allocated discount swamps the base, which
    // floors at zero.
    let items = vec![
        TestDataFactory::item(dec!(1), dec!(1000000), true),
        TestDataFactory::item(dec!(1), dec!(-999999.99), false),
    ];
    let config = TotalsConfig::percentage(dec!(8)).with_discount(dec!(10));

    let breakdown = TotalsEngine::breakdown(&items, &config).unwrap();
    assert_eq!(breakdown.taxable_ratio, dec!(100000000));
    assert_eq!(breakdown.taxable_discount, dec!(1000000000));
    assert_eq!(breakdown.taxable_base, Decimal::ZERO);

    let totals = TotalsEngine::compute(&items, &config).unwrap();
    assert_eq!(totals.items_subtotal, dec!(0.01));
    assert_eq!(totals.tax_amount, Decimal::ZERO);
    assert_eq!(totals.total_amount, dec!(-9.99));
}

#[test]
fn test_cancelling_credits_beyond_decimal_range() {
    let taxable = power_of_ten(25);
    let items = vec![
        TestDataFactory::item(dec!(1), taxable, true),
        TestDataFactory::item(dec!(1), -(taxable - dec!(0.01)), false),
    ];

    // SPECIFIC tax never allocates, so the huge ratio is harmless
    let specific = TotalsConfig::specific(dec!(5)).with_discount(dec!(1000));
    let totals = TotalsEngine::compute(&items, &specific).unwrap();
    assert_eq!(totals.total_amount, dec!(-994.99));

    // PERCENTAGE needs taxable_discount = 1000 × 1e27, which cannot exist
    let percentage = TotalsConfig::percentage(dec!(5)).with_discount(dec!(1000));
    let err = TotalsEngine::compute(&items, &percentage).unwrap_err();
    assert!(matches!(err, AppError::InvalidTotalsInput(_)));
}

#[test]
fn test_end_to_end_roofing_scenario() {
    let items = TestDataFactory::roofing_items();
    let config = TestDataFactory::roofing_config();

    let totals = TotalsEngine::compute(&items, &config).unwrap();
    assert_eq!(totals.items_subtotal, dec!(300));
    assert_eq!(totals.op_amount, dec!(30));
    assert_eq!(totals.subtotal_with_op, dec!(330));
    assert_eq!(totals.tax_amount, dec!(24.80));
    assert_eq!(totals.total_amount, dec!(334.80));

    let breakdown = TotalsEngine::breakdown(&items, &config).unwrap();
    assert_eq!(breakdown.taxable_ratio, dec!(1));
    assert_eq!(breakdown.taxable_discount, dec!(20));
    assert_eq!(breakdown.taxable_base, dec!(310));
}

#[test]
fn test_mixed_taxability_allocation() {
    let items = TestDataFactory::mixed_items();

    let percentage = TotalsEngine::compute(&items, &TotalsConfig::percentage(dec!(10))).unwrap();
    assert_eq!(percentage.tax_amount, dec!(10.00));

    let specific = TotalsEngine::compute(&items, &TotalsConfig::specific(dec!(25))).unwrap();
    assert_eq!(specific.tax_amount, dec!(25));
}

#[test]
fn test_discount_is_allocated_to_taxable_share() {
    // Taxable 1200, exempt 800: ratio 0.6, so 120 of the 200 discount
    // comes off the tax base.
    let items = vec![
        TestDataFactory::item(dec!(1), dec!(1200), true),
        TestDataFactory::item(dec!(1), dec!(800), false),
    ];
    let config = TotalsConfig::percentage(dec!(5)).with_discount(dec!(200));

    let breakdown = TotalsEngine::breakdown(&items, &config).unwrap();
    assert_eq!(breakdown.taxable_ratio, dec!(0.6));
    assert_eq!(breakdown.taxable_discount, dec!(120));
    assert_eq!(breakdown.taxable_base, dec!(1080));

    let totals = TotalsEngine::compute(&items, &config).unwrap();
    assert_eq!(totals.tax_amount, dec!(54));
    assert_eq!(totals.total_amount, dec!(1854));
}

#[test]
fn test_op_is_included_in_taxable_base_proportionally() {
    // O&P 20% on a 500 subtotal of which 300 is taxable: 60 of the 100 O&P
    // is taxable.
    let items = vec![
        TestDataFactory::item(dec!(3), dec!(100), true),
        TestDataFactory::item(dec!(2), dec!(100), false),
    ];
    let config = TotalsConfig::percentage(dec!(10)).with_op_percent(dec!(20));

    let breakdown = TotalsEngine::breakdown(&items, &config).unwrap();
    assert_eq!(breakdown.taxable_op_amount, dec!(60));
    assert_eq!(breakdown.taxable_base, dec!(360));

    let totals = TotalsEngine::compute(&items, &config).unwrap();
    assert_eq!(totals.op_amount, dec!(100));
    assert_eq!(totals.tax_amount, dec!(36));
    assert_eq!(totals.total_amount, dec!(636));
}

#[test]
fn test_tax_rate_150_rejected() {
    let err = TotalsEngine::compute(
        &TestDataFactory::roofing_items(),
        &TotalsConfig::percentage(dec!(150)),
    )
    .unwrap_err();

    assert!(matches!(err, AppError::InvalidTotalsInput(_)));
    assert!(err.to_string().contains("150"));
}

#[test]
fn test_unknown_tax_method_rejected() {
    let result: Result<TotalsConfig, _> =
        serde_json::from_str(r#"{"tax_method": "FLAT", "tax_rate": "5"}"#);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Tax method must be PERCENTAGE or SPECIFIC"));
}
