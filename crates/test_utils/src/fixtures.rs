//! Pre-built Test Fixtures
//!
//! Records matching the usage walkthrough: Alice on a fixed tariff, Bob on a
//! variable one, and three readings from January 2024.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{Currency, Money, MeterId, TariffId};
use domain_billing::{
    create_customer, create_tariff, Customer, CustomerStatus, MeterReading, ReadingType, Tariff,
    TariffType,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn gbp(amount: Decimal) -> Money {
        Money::new(amount, Currency::GBP)
    }

    pub fn gbp_zero() -> Money {
        Money::zero(Currency::GBP)
    }
}

/// Fixture for customers
pub struct CustomerFixtures;

impl CustomerFixtures {
    pub fn alice() -> Customer {
        create_customer("Alice", "alice@example.com", CustomerStatus::Active).unwrap()
    }

    pub fn bob() -> Customer {
        create_customer("Bob", "bob@example.com", CustomerStatus::Suspended).unwrap()
    }

    pub fn carol() -> Customer {
        create_customer("Carol", "carol@example.com", CustomerStatus::Active).unwrap()
    }
}

/// Fixture for tariffs
pub struct TariffFixtures;

impl TariffFixtures {
    /// TAR-001: fixed, £0.15/kWh, £25.00 standing charge
    pub fn fixed() -> Tariff {
        Self::tariff("TAR-001", TariffType::Fixed, dec!(0.15), dec!(25.0))
    }

    /// TAR-002: variable, £0.12/kWh, £30.00 standing charge
    pub fn variable() -> Tariff {
        Self::tariff("TAR-002", TariffType::Variable, dec!(0.12), dec!(30.0))
    }

    /// TAR-003: green, £0.18/kWh, £20.00 standing charge
    pub fn green() -> Tariff {
        Self::tariff("TAR-003", TariffType::Green, dec!(0.18), dec!(20.0))
    }

    pub fn tariff(code: &str, tariff_type: TariffType, rate: Decimal, standing: Decimal) -> Tariff {
        create_tariff(
            TariffId::new(code).unwrap(),
            tariff_type,
            MoneyFixtures::gbp(rate),
            MoneyFixtures::gbp(standing),
        )
        .unwrap()
    }
}

/// Fixture for meter readings
pub struct ReadingFixtures;

impl ReadingFixtures {
    /// Noon on 15 January 2024
    pub fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    pub fn reading(customer: &Customer, meter: &str, reading_type: ReadingType, value: Decimal) -> MeterReading {
        MeterReading::new(
            MeterId::new(meter).unwrap(),
            reading_type,
            value,
            Self::timestamp(),
            customer.id,
        )
        .unwrap()
    }

    /// Alice's electricity and gas readings
    pub fn alice_readings(alice: &Customer) -> Vec<MeterReading> {
        vec![
            Self::reading(alice, "MTR-001", ReadingType::Electricity, dec!(450.5)),
            Self::reading(alice, "MTR-001", ReadingType::Gas, dec!(320.8)),
        ]
    }

    /// Bob's electricity reading
    pub fn bob_readings(bob: &Customer) -> Vec<MeterReading> {
        vec![Self::reading(bob, "MTR-002", ReadingType::Electricity, dec!(890.2))]
    }
}
