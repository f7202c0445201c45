//! Billing periods and bills

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{AccountId, BillId, CustomerId, DateRange, Money, TariffId};

use crate::account::Account;
use crate::error::BillingError;
use crate::reading::validate_consumption;

/// A span of days with its metered consumption
///
/// `total_cost` stays `None` until a bill is computed for the period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillingPeriod {
    dates: DateRange,
    total_consumption: Decimal,
    total_cost: Option<Money>,
}

impl BillingPeriod {
    pub fn dates(&self) -> DateRange {
        self.dates
    }

    /// Metered kWh for the period
    pub fn total_consumption(&self) -> Decimal {
        self.total_consumption
    }

    /// Cost of the period, once a bill has priced it
    pub fn total_cost(&self) -> Option<Money> {
        self.total_cost
    }

    pub fn start(&self) -> NaiveDate {
        self.dates.start
    }

    pub fn end(&self) -> NaiveDate {
        self.dates.end
    }

    /// Builds a period from `YYYY-MM-DD` strings
    pub fn parse(start: &str, end: &str, consumption: Decimal) -> Result<Self, BillingError> {
        let dates = DateRange::parse(start, end)?;
        generate_billing_period(dates.start, dates.end, consumption)
    }
}

/// Creates an unpriced billing period
///
/// # Errors
///
/// Returns an error if `end` precedes `start`, or `consumption` is negative
/// or above [`crate::MAX_CONSUMPTION`].
pub fn generate_billing_period(
    start: NaiveDate,
    end: NaiveDate,
    consumption: Decimal,
) -> Result<BillingPeriod, BillingError> {
    validate_consumption(consumption, "period consumption")?;

    Ok(BillingPeriod {
        dates: DateRange::new(start, end)?,
        total_consumption: consumption,
        total_cost: None,
    })
}

/// An immutable cost statement for one account and period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bill {
    pub id: BillId,
    pub customer_id: CustomerId,
    /// Account the bill was computed from
    pub account_id: AccountId,
    /// Tariff in force when the bill was computed
    pub tariff_id: TariffId,
    /// The period, with `total_cost` filled in
    pub period: BillingPeriod,
    pub amount: Money,
    pub issued_at: DateTime<Utc>,
}

/// Prices `period` under the account's tariff
///
/// `amount = consumption × rate_per_unit + standing_charge`, held exactly
pub fn calculate_bill(account: &Account, period: &BillingPeriod) -> Bill {
    let amount = account.tariff().price(period.total_consumption);

    Bill {
        id: BillId::new_v7(),
        customer_id: account.customer().id,
        account_id: account.id(),
        tariff_id: account.tariff().id().clone(),
        period: BillingPeriod {
            total_cost: Some(amount),
            ..period.clone()
        },
        amount,
        issued_at: Utc::now(),
    }
}

/// Receives each generated bill and reports whether it was handled
///
/// Any `FnMut(&Bill) -> bool` closure is a processor.
pub trait BillProcessor {
    fn process(&mut self, bill: &Bill) -> bool;
}

impl<F> BillProcessor for F
where
    F: FnMut(&Bill) -> bool,
{
    fn process(&mut self, bill: &Bill) -> bool {
        self(bill)
    }
}

/// Computes a bill for every account and hands each to `processor`
///
/// Returns how many bills the processor reported as handled.
pub fn bulk_generate_bills<P>(accounts: &[Account], period: &BillingPeriod, processor: &mut P) -> usize
where
    P: BillProcessor + ?Sized,
{
    accounts
        .iter()
        .map(|account| calculate_bill(account, period))
        .filter(|bill| processor.process(bill))
        .count()
}
