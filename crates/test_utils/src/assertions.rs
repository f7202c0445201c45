//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful failure
//! messages than bare `assert_eq!` on nested fields.

use core_kernel::Money;
use domain_billing::{Account, BillingError};
use rust_decimal::Decimal;

/// Asserts that a Money value has the expected amount and currency
pub fn assert_money_eq(actual: &Money, expected: &Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "Amount mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts the account balance equals `expected` in the account currency
pub fn assert_balance(account: &Account, expected: Decimal) {
    assert_eq!(
        account.balance().amount(),
        expected,
        "Unexpected balance on account {}: got {}, expected {}",
        account.id(),
        account.balance(),
        expected
    );
}

/// Asserts that a result failed with an input validation error
pub fn assert_invalid_argument<T: std::fmt::Debug>(result: Result<T, BillingError>) {
    match result {
        Err(e) if e.is_invalid_argument() => {}
        other => panic!("Expected an invalid argument error, got {:?}", other),
    }
}
