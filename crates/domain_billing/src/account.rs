//! Customer accounts
//!
//! The account is the only mutable aggregate in the domain. It owns its
//! reading history and balance outright; both are private so the invariants
//! below cannot be bypassed.
//!
//! # Invariants
//!
//! - Readings are append-only and stay in insertion order
//! - Every reading belongs to the account's customer
//! - The balance only decreases through [`apply_payment`](crate::payment::apply_payment) and only increases
//!   through [`Account::issue_bill`]
//! - The balance is always in the tariff's currency

use serde::Serialize;
use tracing::debug;

use core_kernel::{AccountId, Currency, Money};

use crate::billing::{calculate_bill, Bill, BillingPeriod};
use crate::customer::{update_customer_status, Customer, CustomerStatus};
use crate::error::BillingError;
use crate::reading::MeterReading;
use crate::tariff::Tariff;

/// A customer's billing account
#[derive(Debug, Clone, Serialize)]
pub struct Account {
    id: AccountId,
    customer: Customer,
    tariff: Tariff,
    readings: Vec<MeterReading>,
    balance: Money,
}

impl Account {
    /// Opens an account with no readings
    ///
    /// # Errors
    ///
    /// Returns a currency mismatch if `opening_balance` is not in the
    /// tariff's currency.
    pub fn new(customer: Customer, tariff: Tariff, opening_balance: Money) -> Result<Self, BillingError> {
        if opening_balance.currency() != tariff.currency() {
            return Err(core_kernel::MoneyError::CurrencyMismatch(
                opening_balance.currency().to_string(),
                tariff.currency().to_string(),
            )
            .into());
        }

        Ok(Self {
            id: AccountId::new_v7(),
            customer,
            tariff,
            readings: Vec::new(),
            balance: opening_balance,
        })
    }

    /// Opens an account and records `readings` in order
    pub fn with_readings<I>(
        customer: Customer,
        tariff: Tariff,
        readings: I,
        opening_balance: Money,
    ) -> Result<Self, BillingError>
    where
        I: IntoIterator<Item = MeterReading>,
    {
        let mut account = Self::new(customer, tariff, opening_balance)?;
        for reading in readings {
            account.add_reading(reading)?;
        }
        Ok(account)
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Moves the account holder to a new status
    pub fn update_customer_status(&mut self, new_status: CustomerStatus) -> Result<(), BillingError> {
        update_customer_status(&mut self.customer, new_status)
    }

    pub fn tariff(&self) -> &Tariff {
        &self.tariff
    }

    /// Readings in insertion order
    pub fn readings(&self) -> &[MeterReading] {
        &self.readings
    }

    /// Amount owed; negative when the account is in credit
    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn currency(&self) -> Currency {
        self.tariff.currency()
    }

    /// Appends a reading
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the reading belongs to another customer.
    pub fn add_reading(&mut self, reading: MeterReading) -> Result<(), BillingError> {
        if reading.customer_id() != self.customer.id {
            return Err(BillingError::invalid(format!(
                "reading from meter {} belongs to {}, not {}",
                reading.meter_id(),
                reading.customer_id(),
                self.customer.id
            )));
        }

        self.readings.push(reading);
        Ok(())
    }

    /// Computes the bill for `period` without touching the balance
    pub fn calculate_bill(&self, period: &BillingPeriod) -> Bill {
        calculate_bill(self, period)
    }

    /// Computes the bill for `period` and charges it to the balance
    pub fn issue_bill(&mut self, period: &BillingPeriod) -> Result<Bill, BillingError> {
        let bill = calculate_bill(self, period);
        self.balance = self.balance.checked_add(&bill.amount)?;

        debug!(
            account_id = %self.id,
            bill_id = %bill.id,
            amount = %bill.amount,
            balance = %self.balance,
            "Bill issued"
        );
        Ok(bill)
    }

    pub(crate) fn debit_payment(&mut self, amount: &Money) -> Result<(), BillingError> {
        self.balance = self.balance.checked_sub(amount)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::create_customer;
    use crate::reading::ReadingType;
    use crate::tariff::{create_tariff, TariffType};
    use chrono::Utc;
    use core_kernel::{CustomerId, MeterId, TariffId};
    use rust_decimal_macros::dec;

    fn account() -> Account {
        let customer = create_customer("Alice", "alice@example.com", CustomerStatus::Active).unwrap();
        let tariff = create_tariff(
            TariffId::new("TAR-001").unwrap(),
            TariffType::Fixed,
            Money::new(dec!(0.15), Currency::GBP),
            Money::new(dec!(25.0), Currency::GBP),
        )
        .unwrap();
        Account::new(customer, tariff, Money::new(dec!(150.0), Currency::GBP)).unwrap()
    }

    #[test]
    fn test_opening_balance_currency_must_match() {
        let a = account();
        let result = Account::new(
            a.customer().clone(),
            a.tariff().clone(),
            Money::new(dec!(1), Currency::EUR),
        );
        assert!(matches!(result, Err(BillingError::Money(_))));
    }

    #[test]
    fn test_foreign_reading_rejected() {
        let mut a = account();
        let foreign = MeterReading::new(
            MeterId::new("MTR-009").unwrap(),
            ReadingType::Gas,
            dec!(10),
            Utc::now(),
            CustomerId::from_email("mallory@example.com"),
        )
        .unwrap();

        assert!(a.add_reading(foreign).is_err());
        assert!(a.readings().is_empty());
    }

    #[test]
    fn test_issue_bill_increases_balance() {
        let mut a = account();
        let period = BillingPeriod::parse("2024-01-01", "2024-01-31", dec!(100)).unwrap();

        let bill = a.issue_bill(&period).unwrap();

        assert_eq!(bill.amount.amount(), dec!(40.0));
        assert_eq!(a.balance().amount(), dec!(190.0));
    }
}
