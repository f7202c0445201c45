//! Consumption analytics and account reports
//!
//! Each entry point takes a caller-supplied capability (analyzer or
//! formatter), so new statistics and report lines need no change here.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::account::Account;
use crate::reading::{average_consumption, total_consumption, MeterReading, ReadingType};

/// Derives a result from a series of reading values
pub trait TrendAnalyzer {
    type Output;

    fn analyze(&self, values: &[Decimal]) -> Self::Output;
}

impl<F, T> TrendAnalyzer for F
where
    F: Fn(&[Decimal]) -> T,
{
    type Output = T;

    fn analyze(&self, values: &[Decimal]) -> T {
        self(values)
    }
}

/// Runs `analyzer` over the reading values in arrival order
pub fn analyze_trends<A>(readings: &[MeterReading], analyzer: &A) -> A::Output
where
    A: TrendAnalyzer + ?Sized,
{
    let values: Vec<Decimal> = readings.iter().map(MeterReading::value).collect();
    analyzer.analyze(&values)
}

/// Summary statistics of a reading series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendSummary {
    pub count: usize,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub mean: Decimal,
    /// Last value minus first value
    pub net_change: Decimal,
}

/// Built-in analyzer producing a [`TrendSummary`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsumptionTrend;

impl TrendAnalyzer for ConsumptionTrend {
    type Output = TrendSummary;

    fn analyze(&self, values: &[Decimal]) -> TrendSummary {
        let count = values.len();
        let sum: Decimal = values.iter().copied().sum();
        let mean = if count == 0 {
            Decimal::ZERO
        } else {
            sum / Decimal::from(count as u64)
        };
        let net_change = match (values.first(), values.last()) {
            (Some(first), Some(last)) => last - first,
            _ => Decimal::ZERO,
        };

        TrendSummary {
            count,
            min: values.iter().copied().min(),
            max: values.iter().copied().max(),
            mean,
            net_change,
        }
    }
}

/// Renders one line of an account report
pub trait ReportFormatter {
    fn format(&self, account: &Account) -> String;
}

impl<F> ReportFormatter for F
where
    F: Fn(&Account) -> String,
{
    fn format(&self, account: &Account) -> String {
        self(account)
    }
}

/// `Customer: <name> <email> (<status>)`
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerLine;

impl ReportFormatter for CustomerLine {
    fn format(&self, account: &Account) -> String {
        let customer = account.customer();
        format!("Customer: {} <{}> ({})", customer.name, customer.email, customer.status())
    }
}

/// `Tariff: <id> <type> @ <rate>/kWh + <standing>`
#[derive(Debug, Clone, Copy, Default)]
pub struct TariffLine;

impl ReportFormatter for TariffLine {
    fn format(&self, account: &Account) -> String {
        let tariff = account.tariff();
        format!(
            "Tariff: {} {} @ {}/kWh + {} standing",
            tariff.id(),
            tariff.tariff_type(),
            tariff.rate_per_unit(),
            tariff.standing_charge()
        )
    }
}

/// `Balance: <amount>`, marked as credit when negative
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceLine;

impl ReportFormatter for BalanceLine {
    fn format(&self, account: &Account) -> String {
        let balance = account.balance();
        if balance.is_negative() {
            format!("Balance: {} in credit", balance.abs())
        } else {
            format!("Balance: {}", balance)
        }
    }
}

/// `Usage: <n> readings, <total> kWh total, <avg> kWh average`
#[derive(Debug, Clone, Copy, Default)]
pub struct UsageLine;

impl ReportFormatter for UsageLine {
    fn format(&self, account: &Account) -> String {
        let readings = account.readings();
        format!(
            "Usage: {} readings, {} kWh total, {} kWh average",
            readings.len(),
            total_consumption(readings),
            average_consumption(readings).round_dp(2)
        )
    }
}

/// One report line per formatter, in formatter order
pub fn generate_report(account: &Account, formatters: &[&dyn ReportFormatter]) -> Vec<String> {
    formatters.iter().map(|f| f.format(account)).collect()
}

/// Groups readings by utility
///
/// Every [`ReadingType`] has a bucket, empty or not, and each bucket keeps
/// arrival order.
pub fn aggregate_by_type<'a, I>(readings: I) -> BTreeMap<ReadingType, Vec<MeterReading>>
where
    I: IntoIterator<Item = &'a MeterReading>,
{
    let mut buckets: BTreeMap<ReadingType, Vec<MeterReading>> =
        ReadingType::ALL.iter().map(|t| (*t, Vec::new())).collect();

    for reading in readings {
        buckets
            .entry(reading.reading_type())
            .or_default()
            .push(reading.clone());
    }
    buckets
}
