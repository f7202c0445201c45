//! Billing configuration

use core_kernel::Currency;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

use crate::error::BillingError;

/// Tunables for payment processing and reading analysis
///
/// Library functions never read the environment; a host loads this once and
/// passes the values where they are needed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// Currency new payments are recorded in
    pub currency: Currency,
    /// Direct debits above this amount fail instead of settling
    pub direct_debit_limit: Option<Decimal>,
    /// Chunk size for reading batches
    pub batch_size: usize,
    /// Consumption above which a customer counts as a high user
    pub high_usage_threshold: Decimal,
    /// Log level
    pub log_level: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            currency: Currency::GBP,
            direct_debit_limit: None,
            batch_size: 100,
            high_usage_threshold: dec!(500),
            log_level: "info".to_string(),
        }
    }
}

impl BillingConfig {
    /// Loads configuration from `BILLING_*` environment variables
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, BillingError> {
        let config: Self = config::Config::builder()
            .add_source(config::Environment::with_prefix("BILLING"))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde alone cannot
    pub fn validate(&self) -> Result<(), BillingError> {
        if self.batch_size == 0 {
            return Err(BillingError::Configuration("batch_size must be positive".to_string()));
        }
        if let Some(limit) = self.direct_debit_limit {
            if limit < Decimal::ZERO {
                return Err(BillingError::Configuration(format!(
                    "direct_debit_limit must not be negative, got {}",
                    limit
                )));
            }
        }
        Ok(())
    }
}
