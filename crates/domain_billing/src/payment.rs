//! Payment processing
//!
//! A payment attempt is validated before any record exists, so a [`Payment`]
//! always carries a real, non-negative amount. Every method reports its
//! outcome through the same [`PaymentStatus`] type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use core_kernel::{Currency, CustomerId, Money, PaymentId};

use crate::account::Account;
use crate::config::BillingConfig;
use crate::error::BillingError;

/// How the customer pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Collected by the supplier under a mandate
    DirectDebit,
    /// Debit or credit card
    Card,
    /// Customer-initiated bank transfer
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::DirectDebit => "direct_debit",
            PaymentMethod::Card => "card",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "direct_debit" => Ok(PaymentMethod::DirectDebit),
            "card" => Ok(PaymentMethod::Card),
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            other => Err(BillingError::invalid(format!("unknown payment method '{}'", other))),
        }
    }
}

/// Outcome of a payment attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Funds received
    Settled,
    /// Submitted, awaiting confirmation
    Pending,
    /// Declined
    Failed { reason: String },
}

impl PaymentStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, PaymentStatus::Failed { .. })
    }
}

/// Amount as supplied by a caller: a number or its textual form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountInput {
    Numeric(Decimal),
    Text(String),
}

impl AmountInput {
    fn into_decimal(self, currency: Currency) -> Result<Decimal, BillingError> {
        let value = match self {
            AmountInput::Numeric(value) => value,
            AmountInput::Text(text) => Money::parse(&text, currency)?.amount(),
        };
        Ok(value)
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        AmountInput::Numeric(value)
    }
}

impl From<i32> for AmountInput {
    fn from(value: i32) -> Self {
        AmountInput::Numeric(Decimal::from(value))
    }
}

impl From<i64> for AmountInput {
    fn from(value: i64) -> Self {
        AmountInput::Numeric(Decimal::from(value))
    }
}

impl From<&str> for AmountInput {
    fn from(text: &str) -> Self {
        AmountInput::Text(text.to_string())
    }
}

impl From<String> for AmountInput {
    fn from(text: String) -> Self {
        AmountInput::Text(text)
    }
}

/// A recorded payment attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payment {
    id: PaymentId,
    customer_id: CustomerId,
    amount: Money,
    method: PaymentMethod,
    status: PaymentStatus,
    created_at: DateTime<Utc>,
}

impl Payment {
    pub fn id(&self) -> PaymentId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn status(&self) -> &PaymentStatus {
        &self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Decides the outcome of a payment for a given method
///
/// Any `Fn(PaymentMethod, &Money) -> PaymentStatus` closure is a policy.
pub trait SettlementPolicy {
    fn settle(&self, method: PaymentMethod, amount: &Money) -> PaymentStatus;
}

impl<F> SettlementPolicy for F
where
    F: Fn(PaymentMethod, &Money) -> PaymentStatus,
{
    fn settle(&self, method: PaymentMethod, amount: &Money) -> PaymentStatus {
        self(method, amount)
    }
}

/// Default settlement rules
///
/// Direct debits settle immediately, or fail when above the mandate limit.
/// Cards and bank transfers stay pending until confirmed elsewhere.
#[derive(Debug, Clone, Default)]
pub struct StandardSettlement {
    pub direct_debit_limit: Option<Decimal>,
}

impl SettlementPolicy for StandardSettlement {
    fn settle(&self, method: PaymentMethod, amount: &Money) -> PaymentStatus {
        match method {
            PaymentMethod::DirectDebit => match self.direct_debit_limit {
                Some(limit) if amount.amount() > limit => PaymentStatus::Failed {
                    reason: format!("amount {} exceeds direct debit limit {}", amount, limit),
                },
                _ => PaymentStatus::Settled,
            },
            PaymentMethod::Card | PaymentMethod::BankTransfer => PaymentStatus::Pending,
        }
    }
}

/// Extra acceptance rule for payment amounts
///
/// Any `Fn(&Money) -> Result<(), String>` closure is a validator; the error
/// string explains the rejection.
pub trait AmountValidator {
    fn validate(&self, amount: &Money) -> Result<(), String>;
}

impl<F> AmountValidator for F
where
    F: Fn(&Money) -> Result<(), String>,
{
    fn validate(&self, amount: &Money) -> Result<(), String> {
        self(amount)
    }
}

/// Rejects amounts above a ceiling
#[derive(Debug, Clone, Copy)]
pub struct MaxAmount(pub Decimal);

impl AmountValidator for MaxAmount {
    fn validate(&self, amount: &Money) -> Result<(), String> {
        if amount.amount() > self.0 {
            Err(format!("{} exceeds the maximum of {}", amount, self.0))
        } else {
            Ok(())
        }
    }
}

/// Runs a single validator against an amount
pub fn validate_payment_amount<V>(amount: &Money, validator: &V) -> Result<(), BillingError>
where
    V: AmountValidator + ?Sized,
{
    validator.validate(amount).map_err(BillingError::InvalidArgument)
}

/// Turns payment requests into [`Payment`] records
pub struct PaymentProcessor {
    currency: Currency,
    policy: Box<dyn SettlementPolicy>,
    validators: Vec<Box<dyn AmountValidator>>,
}

impl Default for PaymentProcessor {
    fn default() -> Self {
        Self::new(Currency::GBP)
    }
}

impl PaymentProcessor {
    /// Creates a processor using [`StandardSettlement`] with no limit
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            policy: Box::new(StandardSettlement::default()),
            validators: Vec::new(),
        }
    }

    /// Creates a processor from configured currency and direct debit limit
    pub fn from_config(config: &BillingConfig) -> Self {
        Self::new(config.currency).with_policy(StandardSettlement {
            direct_debit_limit: config.direct_debit_limit,
        })
    }

    /// Replaces the settlement policy
    pub fn with_policy(mut self, policy: impl SettlementPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Adds an amount validator; validators run in insertion order
    pub fn with_validator(mut self, validator: impl AmountValidator + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Validates a payment request and records its outcome
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the amount cannot be parsed, is
    /// negative, has more places than the currency's minor unit, exceeds
    /// [`core_kernel::MAX_AMOUNT`], or fails a validator. No payment is
    /// created in that case.
    pub fn process(
        &self,
        customer_id: CustomerId,
        amount: impl Into<AmountInput>,
        method: PaymentMethod,
    ) -> Result<Payment, BillingError> {
        let value = amount.into().into_decimal(self.currency).map_err(|e| {
            warn!(%customer_id, %method, error = %e, "Unparseable payment amount");
            e
        })?;

        if value < Decimal::ZERO {
            warn!(%customer_id, %method, %value, "Negative payment amount");
            return Err(BillingError::invalid(format!("payment amount must not be negative, got {}", value)));
        }

        let amount = Money::checked_new(value, self.currency, self.currency.decimal_places()).map_err(|e| {
            warn!(%customer_id, %method, %value, error = %e, "Payment amount out of bounds");
            BillingError::invalid(format!("payment amount rejected: {}", e))
        })?;

        for validator in &self.validators {
            validate_payment_amount(&amount, validator.as_ref())?;
        }

        let status = self.policy.settle(method, &amount);
        let payment = Payment {
            id: PaymentId::new_v7(),
            customer_id,
            amount,
            method,
            status,
            created_at: Utc::now(),
        };

        debug!(
            payment_id = %payment.id,
            %customer_id,
            %method,
            %amount,
            status = ?payment.status,
            "Payment processed"
        );
        Ok(payment)
    }
}

/// Processes a payment with the default processor (GBP, standard settlement)
pub fn process_payment(
    customer_id: CustomerId,
    amount: impl Into<AmountInput>,
    method: PaymentMethod,
) -> Result<Payment, BillingError> {
    PaymentProcessor::default().process(customer_id, amount, method)
}

/// Credits a payment against the account balance
///
/// Settled and pending payments reduce the balance by their full amount.
/// Failed payments are rejected and leave the balance untouched.
///
/// # Errors
///
/// - `PaymentRejected` for a failed payment
/// - `InvalidArgument` if the payment belongs to another customer
/// - a currency mismatch if the payment is not in the account's currency
pub fn apply_payment(account: &mut Account, payment: &Payment) -> Result<(), BillingError> {
    if payment.customer_id != account.customer().id {
        return Err(BillingError::invalid(format!(
            "payment {} is for {}, not {}",
            payment.id,
            payment.customer_id,
            account.customer().id
        )));
    }

    if let PaymentStatus::Failed { reason } = &payment.status {
        warn!(payment_id = %payment.id, account_id = %account.id(), %reason, "Refusing failed payment");
        return Err(BillingError::PaymentRejected {
            payment_id: payment.id,
            reason: reason.clone(),
        });
    }

    account.debit_payment(&payment.amount)?;
    debug!(
        payment_id = %payment.id,
        account_id = %account.id(),
        balance = %account.balance(),
        "Payment applied"
    );
    Ok(())
}

/// Failed payments, in original order
pub fn failed_payments(payments: &[Payment]) -> Vec<&Payment> {
    payments.iter().filter(|p| p.status.is_failed()).collect()
}

/// Sum of payment amounts
///
/// Returns `None` for no payments or when currencies differ.
pub fn total_amount<'a, I>(payments: I) -> Option<Money>
where
    I: IntoIterator<Item = &'a Payment>,
{
    let mut payments = payments.into_iter();
    let first = payments.next()?.amount;
    payments.try_fold(first, |total, p| total.checked_add(&p.amount).ok())
}
