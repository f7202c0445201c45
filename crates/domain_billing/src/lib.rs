//! Billing Domain - Energy Customer Accounts
//!
//! This crate models an energy supplier's billing ledger: customers, tariffs,
//! meter readings, payments and bills. Everything is plain in-memory data and
//! synchronous functions; the [`Account`] is the only mutable aggregate.
//!
//! # Money Flow
//!
//! An account balance is what the customer owes:
//! - Issuing a bill adds `consumption × unit rate + standing charge`
//! - Applying a payment subtracts its amount
//! - A negative balance is credit held for the customer
//!
//! # Extension Points
//!
//! Statistics, reports, bill sinks and settlement rules are capability
//! traits ([`ConsumptionCalculator`], [`TrendAnalyzer`], [`ReportFormatter`],
//! [`BillProcessor`], [`SettlementPolicy`], [`AmountValidator`]). Each is
//! implemented for matching closures.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::*;
//!
//! let mut account = Account::new(customer, tariff, Money::new(dec!(150), Currency::GBP))?;
//!
//! let payment = process_payment(account.customer().id, "100.50", PaymentMethod::DirectDebit)?;
//! apply_payment(&mut account, &payment)?;
//!
//! let period = BillingPeriod::parse("2024-01-01", "2024-01-31", dec!(450.5))?;
//! let bill = account.issue_bill(&period)?;
//! ```

pub mod account;
pub mod analytics;
pub mod billing;
pub mod config;
pub mod customer;
pub mod error;
pub mod payment;
pub mod reading;
pub mod tariff;

pub use account::Account;
pub use analytics::{
    aggregate_by_type, analyze_trends, generate_report, BalanceLine, ConsumptionTrend,
    CustomerLine, ReportFormatter, TariffLine, TrendAnalyzer, TrendSummary, UsageLine,
};
pub use billing::{
    bulk_generate_bills, calculate_bill, generate_billing_period, Bill, BillProcessor,
    BillingPeriod,
};
pub use config::BillingConfig;
pub use customer::{create_customer, filter_active, search, update_customer_status, Customer, CustomerStatus};
pub use error::BillingError;
pub use payment::{
    apply_payment, failed_payments, process_payment, total_amount, validate_payment_amount,
    AmountInput, AmountValidator, MaxAmount, Payment, PaymentMethod, PaymentProcessor,
    PaymentStatus, SettlementPolicy, StandardSettlement,
};
pub use reading::{
    average_consumption, batch, filter_by_type, first_reading, high_consumption_readings,
    high_usage_customers, meter_ids_with_prefix, total_consumption, AverageConsumption, Batches,
    ConsumptionCalculator, DailyReadings, MeterReading, ReadingType, TotalConsumption,
    MAX_CONSUMPTION,
};
pub use tariff::{apply_discount, cheapest, create_tariff, Tariff, TariffType};

pub use core_kernel::{
    AccountId, BillId, Currency, CustomerId, DateRange, MeterId, Money, PaymentId, TariffId,
};
