//! Test Data Builders
//!
//! Builder for accounts so tests only spell out the fields they care about.

use core_kernel::Money;
use domain_billing::{Account, Customer, MeterReading, ReadingType, Tariff};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::{CustomerFixtures, MoneyFixtures, ReadingFixtures, TariffFixtures};

/// Builder for constructing test accounts
pub struct TestAccountBuilder {
    customer: Customer,
    tariff: Tariff,
    balance: Money,
    readings: Vec<(ReadingType, Decimal)>,
}

impl Default for TestAccountBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAccountBuilder {
    /// Alice on the fixed tariff with a £150.00 balance and no readings
    pub fn new() -> Self {
        Self {
            customer: CustomerFixtures::alice(),
            tariff: TariffFixtures::fixed(),
            balance: MoneyFixtures::gbp(dec!(150.0)),
            readings: Vec::new(),
        }
    }

    /// Sets the account holder
    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = customer;
        self
    }

    /// Sets the tariff
    pub fn with_tariff(mut self, tariff: Tariff) -> Self {
        self.tariff = tariff;
        self
    }

    /// Sets the opening balance in pounds
    pub fn with_balance(mut self, amount: Decimal) -> Self {
        self.balance = MoneyFixtures::gbp(amount);
        self
    }

    /// Adds a reading on meter `MTR-TEST`
    pub fn with_reading(mut self, reading_type: ReadingType, value: Decimal) -> Self {
        self.readings.push((reading_type, value));
        self
    }

    /// Builds the account
    pub fn build(self) -> Account {
        let customer = self.customer;
        let readings: Vec<MeterReading> = self
            .readings
            .into_iter()
            .map(|(reading_type, value)| ReadingFixtures::reading(&customer, "MTR-TEST", reading_type, value))
            .collect();

        Account::with_readings(customer, self.tariff, readings, self.balance).unwrap()
    }
}
