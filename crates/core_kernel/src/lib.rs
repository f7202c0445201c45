//! Core Kernel - Foundational types for the energy billing ledger
//!
//! This crate provides the building blocks shared by the billing domain:
//! - Money types with precise decimal arithmetic
//! - Inclusive calendar date ranges for billing periods
//! - Strongly-typed identifiers for customers, tariffs, meters and payments

pub mod money;
pub mod temporal;
pub mod identifiers;

pub use money::{Money, Currency, MoneyError, Rate, MAX_AMOUNT};
pub use temporal::{DateRange, TemporalError, parse_date};
pub use identifiers::{
    CustomerId, AccountId, PaymentId, BillId,
    TariffId, MeterId, IdentifierError,
};
