//! Unit tests for calendar date ranges

use chrono::NaiveDate;
use core_kernel::{DateRange, TemporalError, parse_date};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod construction {
    use super::*;

    #[test]
    fn test_new_accepts_ordered_bounds() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert_eq!(range.start, date(2024, 1, 1));
        assert_eq!(range.end, date(2024, 1, 31));
    }

    #[test]
    fn test_new_rejects_reversed_bounds() {
        let err = DateRange::new(date(2024, 3, 1), date(2024, 2, 1)).unwrap_err();
        assert_eq!(
            err,
            TemporalError::InvalidPeriod {
                start: "2024-03-01".to_string(),
                end: "2024-02-01".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_strings() {
        let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
        assert_eq!(range.days(), 31);
    }
}

mod queries {
    use super::*;

    #[test]
    fn test_leap_february() {
        let range = DateRange::parse("2024-02-01", "2024-02-29").unwrap();
        assert_eq!(range.days(), 29);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }
}

mod parsing {
    use super::*;

    #[test]
    fn test_parse_date_trims() {
        assert_eq!(parse_date(" 2024-06-30 ").unwrap(), date(2024, 6, 30));
    }

    #[test]
    fn test_parse_date_rejects_impossible_day() {
        assert!(matches!(
            parse_date("2023-02-29"),
            Err(TemporalError::InvalidDate(_))
        ));
    }
}
