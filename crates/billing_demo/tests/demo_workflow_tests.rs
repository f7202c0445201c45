//! Integration tests for the billing walkthrough
//!
//! These tests run the full scenario across the core kernel and billing
//! domain and check every figure it reports.

use billing_demo::run_demo;
use core_kernel::Currency;
use domain_billing::{BillingConfig, BillingError, ReadingType};
use rust_decimal_macros::dec;
use test_utils::{assert_money_eq, CustomerFixtures, MoneyFixtures};

mod default_walkthrough {
    use super::*;

    /// Tests that the direct debit is applied to Alice's balance
    #[test]
    fn test_alice_pays_down_balance() {
        let summary = run_demo(&BillingConfig::default()).unwrap();

        assert_money_eq(&summary.alice_balance, &MoneyFixtures::gbp(dec!(49.50)));
        assert_eq!(summary.alice_balance.to_string(), "£49.50");
        assert_money_eq(&summary.bob_balance, &MoneyFixtures::gbp(dec!(-50)));
    }

    /// Tests the January bill for 450.5 kWh on the fixed tariff
    #[test]
    fn test_january_bill() {
        let summary = run_demo(&BillingConfig::default()).unwrap();

        assert_eq!(summary.bill.amount.amount(), dec!(92.575));
        assert_eq!(summary.bill.period.total_cost(), Some(summary.bill.amount));
        assert_eq!(summary.bill.tariff_id.as_str(), "TAR-001");
        assert_eq!(summary.bill.customer_id, CustomerFixtures::alice().id);
    }

    /// Tests the reading analytics
    #[test]
    fn test_analytics() {
        let summary = run_demo(&BillingConfig::default()).unwrap();

        assert_eq!(summary.average_consumption.round_dp(2), dec!(553.83));
        assert_eq!(summary.active_customers, 1);
        assert_eq!(summary.electricity_readings, 2);
        assert_eq!(
            summary.readings_by_type,
            vec![(ReadingType::Electricity, 2), (ReadingType::Gas, 1)]
        );
        assert_eq!(summary.reading_batches, 1);
        assert_eq!(summary.cheapest_tariff.as_str(), "TAR-002");
    }

    /// Tests that both customers exceed the default usage threshold
    #[test]
    fn test_high_usage() {
        let summary = run_demo(&BillingConfig::default()).unwrap();

        assert_eq!(
            summary.high_usage,
            vec![CustomerFixtures::alice().id, CustomerFixtures::bob().id]
        );
    }

    /// Tests Alice's account report
    #[test]
    fn test_report() {
        let summary = run_demo(&BillingConfig::default()).unwrap();

        assert_eq!(
            summary.report,
            vec![
                "Customer: Alice <alice@example.com> (active)".to_string(),
                "Tariff: TAR-001 fixed @ £0.15/kWh + £25.00 standing".to_string(),
                "Usage: 2 readings, 771.3 kWh total, 385.65 kWh average".to_string(),
                "Balance: £49.50".to_string(),
            ]
        );
    }
}

mod configured_walkthrough {
    use super::*;

    /// Tests that the configured thresholds change the analytics
    #[test]
    fn test_custom_thresholds() {
        let config = BillingConfig {
            batch_size: 2,
            high_usage_threshold: dec!(800),
            ..BillingConfig::default()
        };

        let summary = run_demo(&config).unwrap();

        assert_eq!(summary.reading_batches, 2);
        assert_eq!(summary.high_usage, vec![CustomerFixtures::bob().id]);
    }

    /// Tests that the walkthrough runs in another currency
    #[test]
    fn test_euro_walkthrough() {
        let config = BillingConfig {
            currency: Currency::EUR,
            ..BillingConfig::default()
        };

        let summary = run_demo(&config).unwrap();

        assert_eq!(summary.alice_balance.currency(), Currency::EUR);
        assert_eq!(summary.alice_balance.amount(), dec!(49.50));
    }

    /// Tests that a direct debit over the limit stops the walkthrough
    #[test]
    fn test_direct_debit_limit_rejects_payment() {
        let config = BillingConfig {
            direct_debit_limit: Some(dec!(50)),
            ..BillingConfig::default()
        };

        let result = run_demo(&config);

        assert!(matches!(result, Err(BillingError::PaymentRejected { .. })));
    }

    /// Tests that a zero batch size is reported as invalid input
    #[test]
    fn test_zero_batch_size() {
        let config = BillingConfig {
            batch_size: 0,
            ..BillingConfig::default()
        };

        let result = run_demo(&config);

        assert!(matches!(result, Err(BillingError::InvalidArgument(_))));
    }
}
