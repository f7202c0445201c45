//! Unit tests for the Identifiers module
//!
//! Tests cover generated identifiers, email-derived customer identifiers
//! and externally issued reference codes.

use core_kernel::{
    CustomerId, AccountId, PaymentId, BillId,
    TariffId, MeterId, IdentifierError,
};
use uuid::Uuid;

mod generated_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(AccountId::new(), AccountId::new());
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = PaymentId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = PaymentId::new_v7();
        assert!(id1 < id2);
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(CustomerId::prefix(), "CUST");
        assert_eq!(AccountId::prefix(), "ACC");
        assert_eq!(PaymentId::prefix(), "PAY");
        assert_eq!(BillId::prefix(), "BILL");
    }

    #[test]
    fn test_from_str_with_and_without_prefix() {
        let uuid = Uuid::new_v4();
        let with_prefix: BillId = format!("BILL-{}", uuid).parse().unwrap();
        let without_prefix: BillId = uuid.to_string().parse().unwrap();
        assert_eq!(with_prefix, without_prefix);
    }

    #[test]
    fn test_from_str_rejects_garbage() {
        let result = "PAY-not-a-uuid".parse::<PaymentId>();
        assert!(matches!(result, Err(IdentifierError::Invalid(_))));
    }

    #[test]
    fn test_serde_is_transparent() {
        let uuid = Uuid::new_v4();
        let id = AccountId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }
}

mod customer_id_tests {
    use super::*;

    #[test]
    fn test_from_email_is_stable_across_calls() {
        assert_eq!(
            CustomerId::from_email("alice@example.com"),
            CustomerId::from_email("alice@example.com")
        );
    }

    #[test]
    fn test_from_email_normalizes_case_and_whitespace() {
        assert_eq!(
            CustomerId::from_email("alice@example.com"),
            CustomerId::from_email("\tALICE@example.com ")
        );
    }

    #[test]
    fn test_from_email_distinguishes_addresses() {
        assert_ne!(
            CustomerId::from_email("alice@example.com"),
            CustomerId::from_email("alice@example.org")
        );
    }

    #[test]
    fn test_from_email_produces_v5_uuid() {
        let id = CustomerId::from_email("bob@example.com");
        assert_eq!(id.as_uuid().get_version_num(), 5);
    }
}

mod code_tests {
    use super::*;

    #[test]
    fn test_code_is_trimmed() {
        let code = TariffId::new("  TAR-001 ").unwrap();
        assert_eq!(code.as_str(), "TAR-001");
        assert_eq!(code.to_string(), "TAR-001");
    }

    #[test]
    fn test_blank_code_rejected() {
        assert_eq!(MeterId::new(""), Err(IdentifierError::Empty));
    }

    #[test]
    fn test_starts_with() {
        let meter: MeterId = "ELEC001".parse().unwrap();
        assert!(meter.starts_with("ELEC"));
        assert!(!meter.starts_with("GAS"));
    }

    #[test]
    fn test_code_deserialization_validates() {
        let ok: TariffId = serde_json::from_str("\"TAR-002\"").unwrap();
        assert_eq!(ok.as_str(), "TAR-002");
        assert!(serde_json::from_str::<TariffId>("\"  \"").is_err());
    }
}
