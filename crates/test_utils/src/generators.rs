//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Duration, TimeZone, Utc};
use core_kernel::{CustomerId, MeterId};
use domain_billing::{MeterReading, ReadingType};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for reading types
pub fn reading_type_strategy() -> impl Strategy<Value = ReadingType> {
    prop_oneof![Just(ReadingType::Electricity), Just(ReadingType::Gas)]
}

/// Non-negative consumption in kWh with up to 3 decimal places
pub fn consumption_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000_000i64, 0u32..=3u32).prop_map(|(m, s)| Decimal::new(m, s))
}

/// Unit rates between £0.0000 and £0.9999 per kWh
pub fn unit_rate_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// Standing charges between £0.00 and £99.99
pub fn standing_charge_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..10_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Payment amounts between £0.00 and £9,999.99
pub fn payment_amount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Discount fractions in [0, 1]
pub fn discount_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|n| Decimal::new(n, 4))
}

/// Readings for one customer, hourly from 1 January 2024
pub fn readings_strategy(customer_id: CustomerId, max_len: usize) -> impl Strategy<Value = Vec<MeterReading>> {
    prop::collection::vec((reading_type_strategy(), consumption_strategy()), 0..=max_len).prop_map(
        move |items| {
            let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            items
                .into_iter()
                .enumerate()
                .map(|(i, (reading_type, value))| {
                    MeterReading::new(
                        MeterId::new(format!("MTR-{:03}", i % 3)).unwrap(),
                        reading_type,
                        value,
                        start + Duration::hours(i as i64),
                        customer_id,
                    )
                    .unwrap()
                })
                .collect()
        },
    )
}
