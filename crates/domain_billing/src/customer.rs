//! Customer records and status lifecycle
//!
//! Customers are never deleted. `Closed` is the terminal status; an account
//! may move between `Active` and `Suspended` any number of times before that.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use core_kernel::CustomerId;

use crate::error::BillingError;

/// Customer account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    /// Supplied and billed normally
    Active,
    /// Supply or billing temporarily on hold
    Suspended,
    /// Relationship ended; terminal
    Closed,
}

impl CustomerStatus {
    /// Returns true if moving from `self` to `next` is allowed
    ///
    /// Staying in the same status is always allowed.
    pub fn can_transition_to(&self, next: CustomerStatus) -> bool {
        use CustomerStatus::*;

        match (self, next) {
            (current, next) if *current == next => true,
            (Active, Suspended) | (Suspended, Active) => true,
            (Active, Closed) | (Suspended, Closed) => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Suspended => "suspended",
            CustomerStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerStatus {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(CustomerStatus::Active),
            "suspended" => Ok(CustomerStatus::Suspended),
            "closed" => Ok(CustomerStatus::Closed),
            other => Err(BillingError::invalid(format!("unknown customer status '{}'", other))),
        }
    }
}

/// A customer of the supplier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    /// Identifier derived from the email address
    pub id: CustomerId,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Current status, changed only through [`update_customer_status`]
    status: CustomerStatus,
    /// Signup timestamp
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Returns the current status
    pub fn status(&self) -> CustomerStatus {
        self.status
    }

    /// Returns true if the customer is active
    pub fn is_active(&self) -> bool {
        self.status == CustomerStatus::Active
    }
}

/// Creates a new customer
///
/// The identifier is derived from the email, so signing up the same address
/// twice yields the same [`CustomerId`].
///
/// # Errors
///
/// Returns `InvalidArgument` for a blank name or a malformed email.
pub fn create_customer(
    name: &str,
    email: &str,
    initial_status: CustomerStatus,
) -> Result<Customer, BillingError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BillingError::invalid("customer name must not be blank"));
    }

    let email = email.trim();
    validate_email(email)?;

    Ok(Customer {
        id: CustomerId::from_email(email),
        name: name.to_string(),
        email: email.to_string(),
        status: initial_status,
        created_at: Utc::now(),
    })
}

/// Moves a customer to a new status in place
///
/// # Errors
///
/// Returns `InvalidStateTransition` when leaving `Closed`.
pub fn update_customer_status(
    customer: &mut Customer,
    new_status: CustomerStatus,
) -> Result<(), BillingError> {
    let current = customer.status;
    if !current.can_transition_to(new_status) {
        warn!(customer_id = %customer.id, %current, %new_status, "Rejected status transition");
        return Err(BillingError::InvalidStateTransition {
            from: current,
            to: new_status,
        });
    }

    customer.status = new_status;
    debug!(customer_id = %customer.id, from = %current, to = %new_status, "Customer status updated");
    Ok(())
}

/// Returns the active customers in their original order
pub fn filter_active(customers: &[Customer]) -> Vec<&Customer> {
    search(customers, Customer::is_active)
}

/// Returns the customers matching `predicate` in their original order
pub fn search<P>(customers: &[Customer], predicate: P) -> Vec<&Customer>
where
    P: Fn(&Customer) -> bool,
{
    customers.iter().filter(|c| predicate(c)).collect()
}

fn validate_email(email: &str) -> Result<(), BillingError> {
    let malformed = || BillingError::invalid(format!("malformed email address '{}'", email));

    if email.chars().any(char::is_whitespace) {
        return Err(malformed());
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(()),
        _ => Err(malformed()),
    }
}
