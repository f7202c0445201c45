//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! billing ledger test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built records matching the usage walkthrough
//! - `builders`: Builder for accounts with sensible defaults
//! - `assertions`: Assertion helpers for money and balances
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
