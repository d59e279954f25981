//! Integration tests for money arithmetic

use core_kernel::{Currency, Money, MoneyError, Rate};
use rust_decimal_macros::dec;

#[test]
fn money_rounds_half_up_to_cents() {
    // 208.333... style results must land exactly on cents
    let monthly = Money::new(dec!(10000.00), Currency::USD)
        .divide(dec!(48))
        .unwrap();
    assert_eq!(monthly.amount(), dec!(208.33));
}

#[test]
fn money_subtraction_can_go_negative() {
    let proceeds = Money::new(dec!(7000.00), Currency::USD);
    let book_value = Money::new(dec!(8200.00), Currency::USD);

    let gain_loss = proceeds - book_value;
    assert!(gain_loss.is_negative());
    assert_eq!(gain_loss.amount(), dec!(-1200.00));
}

#[test]
fn checked_ops_reject_mixed_currencies() {
    let usd = Money::new(dec!(10.00), Currency::USD);
    let gbp = Money::new(dec!(10.00), Currency::GBP);

    assert!(matches!(
        usd.checked_sub(&gbp),
        Err(MoneyError::CurrencyMismatch(_, _))
    ));
}

#[test]
fn divide_by_zero_is_an_error() {
    let m = Money::new(dec!(100.00), Currency::USD);
    assert_eq!(m.divide(dec!(0)), Err(MoneyError::DivisionByZero));
}

#[test]
fn rate_from_percentage_round_trips() {
    let rate = Rate::from_percentage(dec!(20));
    assert_eq!(rate.as_decimal(), dec!(0.20));
    assert_eq!(rate.as_percentage(), dec!(20.00));
}

#[test]
fn display_formats_with_symbol_and_cents() {
    let m = Money::new(dec!(1234.5), Currency::USD);
    assert_eq!(m.to_string(), "$ 1234.50");
}
