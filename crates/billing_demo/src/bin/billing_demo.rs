//! Billing Ledger - Walkthrough Binary
//!
//! Runs the standard billing scenario and prints the results.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin billing-demo
//!
//! # Cap direct debits and log every domain event
//! BILLING_DIRECT_DEBIT_LIMIT=50 RUST_LOG=debug cargo run --bin billing-demo
//! ```
//!
//! # Environment Variables
//!
//! * `BILLING_CURRENCY` - Currency for tariffs and payments (default: GBP)
//! * `BILLING_DIRECT_DEBIT_LIMIT` - Direct debits above this fail (default: none)
//! * `BILLING_BATCH_SIZE` - Reading batch size (default: 100)
//! * `BILLING_HIGH_USAGE_THRESHOLD` - High usage cut-off in kWh (default: 500)
//! * `BILLING_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)

use anyhow::Context;
use billing_demo::run_demo;
use domain_billing::BillingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = BillingConfig::from_env().context("failed to load billing configuration")?;
    init_tracing(&config.log_level);

    tracing::info!(currency = %config.currency, batch_size = config.batch_size, "Starting billing walkthrough");

    let summary = run_demo(&config).context("billing walkthrough failed")?;

    for line in &summary.report {
        println!("{}", line);
    }
    println!("Bill {}: {}", summary.bill.id, summary.bill.amount.round_to_currency());
    println!("Bob's balance: {}", summary.bob_balance);
    println!("Average consumption: {}", summary.average_consumption.round_dp(2));
    println!("Active customers: {}", summary.active_customers);
    println!("Electricity readings: {}", summary.electricity_readings);
    for (reading_type, count) in &summary.readings_by_type {
        println!("  {}: {}", reading_type, count);
    }
    println!("Reading batches: {}", summary.reading_batches);
    println!("High usage customers: {}", summary.high_usage.len());
    println!("Cheapest tariff: {}", summary.cheapest_tariff);

    Ok(())
}

/// Initializes the tracing subscriber
///
/// `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}
