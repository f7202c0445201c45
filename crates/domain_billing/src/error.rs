//! Billing domain errors

use core_kernel::{IdentifierError, MoneyError, PaymentId, TemporalError};
use thiserror::Error;

use crate::customer::CustomerStatus;

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// Malformed or out-of-domain input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Customer status change not permitted
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStateTransition {
        from: CustomerStatus,
        to: CustomerStatus,
    },

    /// Payment cannot be applied to a balance
    #[error("Payment {payment_id} rejected: {reason}")]
    PaymentRejected {
        payment_id: PaymentId,
        reason: String,
    },

    /// Money arithmetic failed
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// Date handling failed
    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    /// Identifier could not be built
    #[error("Identifier error: {0}")]
    Identifier(#[from] IdentifierError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl BillingError {
    pub fn invalid(message: impl Into<String>) -> Self {
        BillingError::InvalidArgument(message.into())
    }

    /// True for any input validation failure, whichever layer raised it
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            BillingError::InvalidArgument(_)
                | BillingError::Money(MoneyError::InvalidAmount(_))
                | BillingError::Temporal(_)
                | BillingError::Identifier(_)
        )
    }
}

impl From<config::ConfigError> for BillingError {
    fn from(err: config::ConfigError) -> Self {
        BillingError::Configuration(err.to_string())
    }
}
