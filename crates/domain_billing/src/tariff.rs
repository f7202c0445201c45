//! Tariffs
//!
//! A tariff prices consumption as a unit rate plus a flat standing charge.
//! Tariffs are immutable values: a discount produces a new tariff, so an
//! instance shared between several accounts can never change under them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use core_kernel::{Currency, Money, Rate, TariffId, MAX_AMOUNT};

use crate::error::BillingError;
use crate::reading::validate_consumption;

/// Kind of tariff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TariffType {
    /// Rate fixed for the contract term
    Fixed,
    /// Rate tracks the wholesale market
    Variable,
    /// Renewable-backed supply
    Green,
}

impl TariffType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TariffType::Fixed => "fixed",
            TariffType::Variable => "variable",
            TariffType::Green => "green",
        }
    }
}

impl fmt::Display for TariffType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TariffType {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "fixed" => Ok(TariffType::Fixed),
            "variable" => Ok(TariffType::Variable),
            "green" => Ok(TariffType::Green),
            other => Err(BillingError::invalid(format!("unknown tariff type '{}'", other))),
        }
    }
}

/// A pricing rule mapping consumption to cost
///
/// # Invariants
///
/// - Rate and standing charge are non-negative and at most [`MAX_AMOUNT`]
/// - Rate and standing charge share one currency
///
/// Deserialization goes through [`create_tariff`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TariffRecord")]
pub struct Tariff {
    id: TariffId,
    tariff_type: TariffType,
    rate_per_unit: Money,
    standing_charge: Money,
}

impl Tariff {
    pub fn id(&self) -> &TariffId {
        &self.id
    }

    pub fn tariff_type(&self) -> TariffType {
        self.tariff_type
    }

    /// Price of one kWh
    pub fn rate_per_unit(&self) -> Money {
        self.rate_per_unit
    }

    /// Flat charge added to every bill
    pub fn standing_charge(&self) -> Money {
        self.standing_charge
    }

    pub fn currency(&self) -> Currency {
        self.rate_per_unit.currency()
    }

    /// Exact cost of `consumption` kWh under this tariff
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `consumption` is negative or above
    /// [`crate::MAX_CONSUMPTION`].
    pub fn cost_of(&self, consumption: Decimal) -> Result<Money, BillingError> {
        validate_consumption(consumption, "consumption")?;
        Ok(self.price(consumption))
    }

    /// Prices a consumption that has already been validated
    ///
    /// Both amounts and the consumption are capped at 10^9, so the product
    /// stays far inside the `Decimal` range.
    pub(crate) fn price(&self, consumption: Decimal) -> Money {
        Money::new(
            self.rate_per_unit.amount() * consumption + self.standing_charge.amount(),
            self.currency(),
        )
    }
}

#[derive(Deserialize)]
struct TariffRecord {
    id: TariffId,
    tariff_type: TariffType,
    rate_per_unit: Money,
    standing_charge: Money,
}

impl TryFrom<TariffRecord> for Tariff {
    type Error = BillingError;

    fn try_from(record: TariffRecord) -> Result<Self, Self::Error> {
        create_tariff(record.id, record.tariff_type, record.rate_per_unit, record.standing_charge)
    }
}

fn validate_charge(what: &str, amount: &Money) -> Result<(), BillingError> {
    if amount.is_negative() {
        return Err(BillingError::invalid(format!("{} must not be negative, got {}", what, amount)));
    }
    if amount.amount() > MAX_AMOUNT {
        return Err(BillingError::invalid(format!("{} {} exceeds the maximum of {}", what, amount, MAX_AMOUNT)));
    }
    Ok(())
}

/// Creates a tariff
///
/// # Errors
///
/// Returns `InvalidArgument` if either amount is negative or above
/// [`MAX_AMOUNT`], and a currency mismatch if the two amounts are in
/// different currencies.
pub fn create_tariff(
    id: TariffId,
    tariff_type: TariffType,
    rate_per_unit: Money,
    standing_charge: Money,
) -> Result<Tariff, BillingError> {
    validate_charge("tariff rate", &rate_per_unit)?;
    validate_charge("standing charge", &standing_charge)?;
    // Surfaces a currency mismatch before the record exists.
    rate_per_unit.checked_add(&standing_charge)?;

    Ok(Tariff {
        id,
        tariff_type,
        rate_per_unit,
        standing_charge,
    })
}

/// Returns a copy of `tariff` with its unit rate reduced by `pct`
///
/// `pct` is a fraction: `0.1` takes 10% off the rate. The standing charge is
/// unchanged and the original tariff is left as it was.
///
/// # Errors
///
/// Returns `InvalidArgument` when `pct` is outside `[0, 1]`.
pub fn apply_discount(tariff: &Tariff, pct: Decimal) -> Result<Tariff, BillingError> {
    let rate = Rate::new(pct)
        .map_err(|_| BillingError::invalid(format!("discount {} is outside [0, 1]", pct)))?;

    Ok(Tariff {
        rate_per_unit: rate.discount(&tariff.rate_per_unit),
        ..tariff.clone()
    })
}

/// Returns the tariff with the lowest unit rate
///
/// Ties go to the tariff seen first. Returns `None` for no tariffs.
pub fn cheapest<'a, I>(tariffs: I) -> Option<&'a Tariff>
where
    I: IntoIterator<Item = &'a Tariff>,
{
    tariffs.into_iter().fold(None, |best, tariff| match best {
        Some(current) if current.rate_per_unit.amount() <= tariff.rate_per_unit.amount() => Some(current),
        _ => Some(tariff),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tariff(code: &str, rate: Decimal) -> Tariff {
        create_tariff(
            TariffId::new(code).unwrap(),
            TariffType::Fixed,
            Money::new(rate, Currency::GBP),
            Money::new(dec!(25), Currency::GBP),
        )
        .unwrap()
    }

    #[test]
    fn test_cost_of() {
        let t = tariff("TAR-001", dec!(0.15));
        assert_eq!(t.cost_of(dec!(450.5)).unwrap().amount(), dec!(92.575));
    }

    #[test]
    fn test_cost_of_keeps_sub_penny_precision() {
        let t = create_tariff(
            TariffId::new("TAR-001").unwrap(),
            TariffType::Fixed,
            Money::new(dec!(0.1234), Currency::GBP),
            Money::zero(Currency::GBP),
        )
        .unwrap();

        assert_eq!(t.cost_of(dec!(0.001)).unwrap().amount(), dec!(0.0001234));
    }

    #[test]
    fn test_cost_of_rejects_out_of_range_consumption() {
        let t = tariff("TAR-001", dec!(0.15));
        assert!(t.cost_of(dec!(-1)).is_err());
        assert!(t.cost_of(crate::MAX_CONSUMPTION + dec!(1)).is_err());
    }

    #[test]
    fn test_rate_above_ceiling_rejected() {
        let result = create_tariff(
            TariffId::new("TAR-001").unwrap(),
            TariffType::Fixed,
            Money::new(Decimal::MAX, Currency::GBP),
            Money::zero(Currency::GBP),
        );
        assert!(matches!(result, Err(BillingError::InvalidArgument(_))));
    }

    #[test]
    fn test_deserialize_checks_invariants() {
        let t = tariff("TAR-001", dec!(0.15));
        let mut value = serde_json::to_value(&t).unwrap();
        assert_eq!(serde_json::from_value::<Tariff>(value.clone()).unwrap(), t);

        value["standing_charge"]["currency"] = serde_json::json!("EUR");
        assert!(serde_json::from_value::<Tariff>(value.clone()).is_err());

        value["standing_charge"]["currency"] = serde_json::json!("GBP");
        value["rate_per_unit"]["amount"] = serde_json::json!("-0.15");
        assert!(serde_json::from_value::<Tariff>(value).is_err());
    }

    #[test]
    fn test_cheapest_prefers_first_on_tie() {
        let a = tariff("A", dec!(0.12));
        let b = tariff("B", dec!(0.12));
        let c = tariff("C", dec!(0.20));

        let best = cheapest([&c, &a, &b]).unwrap();
        assert_eq!(best.id().as_str(), "A");
    }

    #[test]
    fn test_discount_leaves_original() {
        let t = tariff("TAR-001", dec!(0.20));
        let discounted = apply_discount(&t, dec!(0.5)).unwrap();

        assert_eq!(discounted.rate_per_unit().amount(), dec!(0.10));
        assert_eq!(t.rate_per_unit().amount(), dec!(0.20));
    }
}
