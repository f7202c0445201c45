//! Billing Ledger Walkthrough
//!
//! Runs the standard scenario against the billing domain: two customers on
//! different tariffs, a direct debit on Alice's account, a January bill, and
//! the usual consumption analytics. The binary prints the outcome; tests
//! assert on it.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;

use core_kernel::{MeterId, Money, TariffId};
use domain_billing::{
    aggregate_by_type, apply_payment, average_consumption, batch, cheapest, create_customer,
    create_tariff, filter_active, filter_by_type, generate_report, high_usage_customers, Account,
    BalanceLine, Bill, BillingConfig, BillingError, BillingPeriod, CustomerId, CustomerLine,
    CustomerStatus, MeterReading, PaymentMethod, PaymentProcessor, ReadingType, ReportFormatter,
    Tariff, TariffLine, TariffType, TotalConsumption, UsageLine,
};

/// What the walkthrough produced
#[derive(Debug, Clone)]
pub struct DemoSummary {
    /// Alice's balance after her direct debit
    pub alice_balance: Money,
    /// Bob's balance, untouched
    pub bob_balance: Money,
    /// Alice's January bill
    pub bill: Bill,
    /// Mean of all three readings
    pub average_consumption: Decimal,
    pub active_customers: usize,
    pub electricity_readings: usize,
    /// Readings per type, electricity first
    pub readings_by_type: Vec<(ReadingType, usize)>,
    pub reading_batches: usize,
    /// Customers above the configured usage threshold
    pub high_usage: Vec<CustomerId>,
    /// Tariff with the lowest unit rate
    pub cheapest_tariff: TariffId,
    /// Alice's account report
    pub report: Vec<String>,
}

fn reading_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 31, 23, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn tariff(code: &str, tariff_type: TariffType, rate: Decimal, standing: Decimal, config: &BillingConfig) -> Result<Tariff, BillingError> {
    create_tariff(
        TariffId::new(code)?,
        tariff_type,
        Money::new(rate, config.currency),
        Money::new(standing, config.currency),
    )
}

fn reading(meter: &str, reading_type: ReadingType, value: Decimal, customer_id: CustomerId) -> Result<MeterReading, BillingError> {
    MeterReading::new(MeterId::new(meter)?, reading_type, value, reading_time(), customer_id)
}

/// Runs the walkthrough with the given configuration
///
/// # Errors
///
/// Returns the first domain error hit, e.g. when a configured direct debit
/// limit makes Alice's payment fail.
pub fn run_demo(config: &BillingConfig) -> Result<DemoSummary, BillingError> {
    let alice = create_customer("Alice", "alice@example.com", CustomerStatus::Active)?;
    let bob = create_customer("Bob", "bob@example.com", CustomerStatus::Suspended)?;

    let fixed = tariff("TAR-001", TariffType::Fixed, dec!(0.15), dec!(25.0), config)?;
    let variable = tariff("TAR-002", TariffType::Variable, dec!(0.12), dec!(30.0), config)?;
    let cheapest_tariff = cheapest([&fixed, &variable])
        .map(|t| t.id().clone())
        .ok_or_else(|| BillingError::invalid("no tariffs to compare"))?;

    let readings = vec![
        reading("MTR-001", ReadingType::Electricity, dec!(450.5), alice.id)?,
        reading("MTR-001", ReadingType::Gas, dec!(320.8), alice.id)?,
        reading("MTR-002", ReadingType::Electricity, dec!(890.2), bob.id)?,
    ];

    let customers = vec![alice.clone(), bob.clone()];

    let mut alice_account = Account::with_readings(
        alice,
        fixed,
        readings[..2].iter().cloned(),
        Money::new(dec!(150.0), config.currency),
    )?;
    let bob_account = Account::with_readings(
        bob,
        variable,
        readings[2..].iter().cloned(),
        Money::new(dec!(-50.0), config.currency),
    )?;

    let processor = PaymentProcessor::from_config(config);
    let payment = processor.process(alice_account.customer().id, "100.50", PaymentMethod::DirectDebit)?;
    apply_payment(&mut alice_account, &payment)?;
    info!(balance = %alice_account.balance(), "Alice paid by direct debit");

    let period = BillingPeriod::parse("2024-01-01", "2024-01-31", dec!(450.5))?;
    let bill = alice_account.calculate_bill(&period);
    info!(bill_id = %bill.id, amount = %bill.amount, "January bill calculated");

    let readings_by_type = aggregate_by_type(&readings)
        .into_iter()
        .map(|(reading_type, bucket)| (reading_type, bucket.len()))
        .collect();
    let reading_batches = batch(&readings, config.batch_size)?.count();

    let accounts = [alice_account, bob_account];
    let high_usage = high_usage_customers(&accounts, config.high_usage_threshold, &TotalConsumption);

    let formatters: [&dyn ReportFormatter; 4] = [&CustomerLine, &TariffLine, &UsageLine, &BalanceLine];
    let report = generate_report(&accounts[0], &formatters);

    Ok(DemoSummary {
        alice_balance: accounts[0].balance(),
        bob_balance: accounts[1].balance(),
        bill,
        average_consumption: average_consumption(&readings),
        active_customers: filter_active(&customers).len(),
        electricity_readings: filter_by_type(&readings, ReadingType::Electricity).len(),
        readings_by_type,
        reading_batches,
        high_usage,
        cheapest_tariff,
        report,
    })
}
