//! Strongly-typed identifiers for domain entities
//!
//! Two families live here. Generated identifiers wrap a UUID; reference
//! codes such as tariff and meter numbers are issued outside the system and
//! wrap a validated string.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Namespace for deriving customer identifiers from email addresses
const CUSTOMER_NAMESPACE: Uuid = Uuid::from_u128(0x6f0c_5d3e_8a41_4b7e_9c2d_1e5a_7b30_c914);

/// Errors raised while building or parsing identifiers
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierError {
    #[error("Invalid identifier: {0}")]
    Invalid(String),

    #[error("Identifier must not be empty")]
    Empty,
}

macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Creates a new random identifier
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Creates a new time-ordered identifier (v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let uuid_str = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                Uuid::parse_str(uuid_str)
                    .map(Self)
                    .map_err(|e| IdentifierError::Invalid(format!("{}: {}", s, e)))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }
    };
}

macro_rules! define_code {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a code, rejecting blank input
            pub fn new(code: impl Into<String>) -> Result<Self, IdentifierError> {
                let code = code.into();
                let trimmed = code.trim();
                if trimmed.is_empty() {
                    return Err(IdentifierError::Empty);
                }
                Ok(Self(trimmed.to_string()))
            }

            /// Returns the code as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns true if the code begins with `prefix`
            pub fn starts_with(&self, prefix: &str) -> bool {
                self.0.starts_with(prefix)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(code: $name) -> String {
                code.0
            }
        }
    };
}

// Generated identifiers
define_id!(CustomerId, "CUST");
define_id!(AccountId, "ACC");
define_id!(PaymentId, "PAY");
define_id!(BillId, "BILL");

// Externally issued reference codes
define_code!(TariffId);
define_code!(MeterId);

impl CustomerId {
    /// Derives a stable identifier from an email address
    ///
    /// The address is trimmed and lowercased first, so the same mailbox
    /// always maps to the same customer.
    pub fn from_email(email: &str) -> Self {
        let normalized = email.trim().to_lowercase();
        Self(Uuid::new_v5(&CUSTOMER_NAMESPACE, normalized.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_id_display() {
        let id = CustomerId::new();
        assert!(id.to_string().starts_with("CUST-"));
    }

    #[test]
    fn test_id_parsing() {
        let original = PaymentId::new_v7();
        let parsed: PaymentId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn test_customer_id_is_deterministic() {
        let a = CustomerId::from_email("alice@example.com");
        let b = CustomerId::from_email("  Alice@Example.COM ");
        assert_eq!(a, b);
        assert_ne!(a, CustomerId::from_email("bob@example.com"));
    }

    #[test]
    fn test_code_rejects_blank() {
        assert_eq!(TariffId::new("   "), Err(IdentifierError::Empty));
        assert_eq!(MeterId::new(" MTR-001 ").unwrap().as_str(), "MTR-001");
    }
}
