//! Meter readings and reading queries
//!
//! Readings are append-only observations. Every query here is pure: it
//! borrows its input, keeps arrival order, and never mutates a reading.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{CustomerId, MeterId};

use crate::account::Account;
use crate::error::BillingError;

/// Largest consumption in kWh accepted for a reading or billing period
pub const MAX_CONSUMPTION: Decimal = dec!(1000000000);

/// Checks that a consumption figure is non-negative and within [`MAX_CONSUMPTION`]
pub(crate) fn validate_consumption(value: Decimal, what: &str) -> Result<(), BillingError> {
    if value < Decimal::ZERO {
        return Err(BillingError::invalid(format!("{} must not be negative, got {}", what, value)));
    }
    if value > MAX_CONSUMPTION {
        return Err(BillingError::invalid(format!(
            "{} {} exceeds the maximum of {} kWh",
            what, value, MAX_CONSUMPTION
        )));
    }
    Ok(())
}

/// Utility measured by a meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingType {
    Electricity,
    Gas,
}

impl ReadingType {
    /// Every reading type, in bucket order
    pub const ALL: [ReadingType; 2] = [ReadingType::Electricity, ReadingType::Gas];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingType::Electricity => "electricity",
            ReadingType::Gas => "gas",
        }
    }
}

impl fmt::Display for ReadingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReadingType {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "electricity" => Ok(ReadingType::Electricity),
            "gas" => Ok(ReadingType::Gas),
            other => Err(BillingError::invalid(format!("unknown reading type '{}'", other))),
        }
    }
}

/// A single timestamped usage observation
///
/// Deserialization goes through [`MeterReading::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MeterReadingRecord")]
pub struct MeterReading {
    meter_id: MeterId,
    reading_type: ReadingType,
    value: Decimal,
    timestamp: DateTime<Utc>,
    customer_id: CustomerId,
}

impl MeterReading {
    /// Records a reading
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `value` is negative or above
    /// [`MAX_CONSUMPTION`].
    pub fn new(
        meter_id: MeterId,
        reading_type: ReadingType,
        value: Decimal,
        timestamp: DateTime<Utc>,
        customer_id: CustomerId,
    ) -> Result<Self, BillingError> {
        validate_consumption(value, &format!("reading on meter {}", meter_id))?;

        Ok(Self {
            meter_id,
            reading_type,
            value,
            timestamp,
            customer_id,
        })
    }

    pub fn meter_id(&self) -> &MeterId {
        &self.meter_id
    }

    pub fn reading_type(&self) -> ReadingType {
        self.reading_type
    }

    /// Consumption in kWh
    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }
}

#[derive(Deserialize)]
struct MeterReadingRecord {
    meter_id: MeterId,
    reading_type: ReadingType,
    value: Decimal,
    timestamp: DateTime<Utc>,
    customer_id: CustomerId,
}

impl TryFrom<MeterReadingRecord> for MeterReading {
    type Error = BillingError;

    fn try_from(record: MeterReadingRecord) -> Result<Self, Self::Error> {
        MeterReading::new(
            record.meter_id,
            record.reading_type,
            record.value,
            record.timestamp,
            record.customer_id,
        )
    }
}

/// Lazily groups items into fixed-size chunks
///
/// Produced by [`batch`]. Chunks come out in arrival order; the final chunk
/// may be shorter.
#[derive(Debug, Clone)]
pub struct Batches<I> {
    source: I,
    size: usize,
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk: Vec<_> = self.source.by_ref().take(self.size).collect();
        if chunk.is_empty() {
            None
        } else {
            Some(chunk)
        }
    }
}

/// Splits `readings` into chunks of `batch_size`
///
/// Nothing is pulled from the source until the first chunk is requested.
///
/// # Errors
///
/// Returns `InvalidArgument` if `batch_size` is zero.
pub fn batch<I>(readings: I, batch_size: usize) -> Result<Batches<I::IntoIter>, BillingError>
where
    I: IntoIterator,
{
    if batch_size == 0 {
        return Err(BillingError::invalid("batch size must be positive"));
    }
    Ok(Batches {
        source: readings.into_iter(),
        size: batch_size,
    })
}

/// Readings of one utility, in original order
pub fn filter_by_type(readings: &[MeterReading], reading_type: ReadingType) -> Vec<&MeterReading> {
    readings
        .iter()
        .filter(|r| r.reading_type == reading_type)
        .collect()
}

/// Sum of all reading values
pub fn total_consumption<'a, I>(readings: I) -> Decimal
where
    I: IntoIterator<Item = &'a MeterReading>,
{
    readings.into_iter().map(MeterReading::value).sum()
}

/// Mean reading value, or zero when there are no readings
pub fn average_consumption<'a, I>(readings: I) -> Decimal
where
    I: IntoIterator<Item = &'a MeterReading>,
{
    let (total, count) = readings
        .into_iter()
        .fold((Decimal::ZERO, 0u64), |(total, count), r| (total + r.value, count + 1));

    if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    }
}

/// Readings strictly above `threshold`, in original order
pub fn high_consumption_readings(readings: &[MeterReading], threshold: Decimal) -> Vec<&MeterReading> {
    readings.iter().filter(|r| r.value > threshold).collect()
}

/// Meter identifiers starting with `prefix`, one per reading, in order
pub fn meter_ids_with_prefix<'a>(readings: &'a [MeterReading], prefix: &str) -> Vec<&'a MeterId> {
    readings
        .iter()
        .map(MeterReading::meter_id)
        .filter(|id| id.starts_with(prefix))
        .collect()
}

/// First item of any iterable, or `None` if it is empty
pub fn first_reading<I: IntoIterator>(readings: I) -> Option<I::Item> {
    readings.into_iter().next()
}

/// Reduces a reading history to a single figure
///
/// Any `Fn(&[MeterReading]) -> Decimal` closure is a calculator.
pub trait ConsumptionCalculator {
    fn calculate(&self, readings: &[MeterReading]) -> Decimal;
}

impl<F> ConsumptionCalculator for F
where
    F: Fn(&[MeterReading]) -> Decimal,
{
    fn calculate(&self, readings: &[MeterReading]) -> Decimal {
        self(readings)
    }
}

/// Calculator yielding the mean reading
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageConsumption;

impl ConsumptionCalculator for AverageConsumption {
    fn calculate(&self, readings: &[MeterReading]) -> Decimal {
        average_consumption(readings)
    }
}

/// Calculator yielding the summed readings
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalConsumption;

impl ConsumptionCalculator for TotalConsumption {
    fn calculate(&self, readings: &[MeterReading]) -> Decimal {
        total_consumption(readings)
    }
}

/// Customers whose calculated usage is strictly above `threshold`
pub fn high_usage_customers<C>(accounts: &[Account], threshold: Decimal, calculator: &C) -> Vec<CustomerId>
where
    C: ConsumptionCalculator + ?Sized,
{
    accounts
        .iter()
        .filter(|account| calculator.calculate(account.readings()) > threshold)
        .map(|account| account.customer().id)
        .collect()
}

/// Simulated daily readings for one meter
///
/// Yields one reading per day at midnight UTC, starting at `start`, with
/// consumption `base + day × step`.
#[derive(Debug, Clone)]
pub struct DailyReadings {
    meter_id: MeterId,
    reading_type: ReadingType,
    customer_id: CustomerId,
    start: DateTime<Utc>,
    base: Decimal,
    step: Decimal,
    day: u32,
    days: u32,
}

impl DailyReadings {
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `base` or `step` is negative, if the last
    /// reading would exceed [`MAX_CONSUMPTION`], or if the last day falls
    /// outside the supported calendar.
    pub fn new(
        meter_id: MeterId,
        reading_type: ReadingType,
        customer_id: CustomerId,
        start: NaiveDate,
        days: u32,
        base: Decimal,
        step: Decimal,
    ) -> Result<Self, BillingError> {
        if step < Decimal::ZERO {
            return Err(BillingError::invalid("simulated consumption step must not be negative"));
        }
        validate_consumption(base, "simulated base consumption")?;

        let start = start.and_time(NaiveTime::MIN).and_utc();
        if let Some(last_day) = days.checked_sub(1) {
            let last_value = step
                .checked_mul(Decimal::from(last_day))
                .and_then(|growth| base.checked_add(growth))
                .ok_or_else(|| BillingError::invalid("simulated consumption is out of range"))?;
            validate_consumption(last_value, "simulated consumption")?;

            start
                .checked_add_signed(Duration::days(i64::from(last_day)))
                .ok_or_else(|| BillingError::invalid(format!("{} days from {} is out of range", days, start)))?;
        }

        Ok(Self {
            meter_id,
            reading_type,
            customer_id,
            start,
            base,
            step,
            day: 0,
            days,
        })
    }
}

impl Iterator for DailyReadings {
    type Item = MeterReading;

    fn next(&mut self) -> Option<Self::Item> {
        if self.day >= self.days {
            return None;
        }

        let day = self.day;
        self.day += 1;

        Some(MeterReading {
            meter_id: self.meter_id.clone(),
            reading_type: self.reading_type,
            value: self.base + self.step * Decimal::from(day),
            timestamp: self.start + Duration::days(i64::from(day)),
            customer_id: self.customer_id,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.days - self.day) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DailyReadings {}
