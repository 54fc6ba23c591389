//! Month Index Tests
//!
//! Ordering and successor semantics of the integer month index.

use arrears_shares_core_rs::Month;

#[test]
fn test_successor_semantics() {
    let m = Month::new(660);
    assert_eq!(m.next(), Month::new(661));
    assert_eq!(m.next().next(), Month::new(662));
}

#[test]
fn test_negative_indexes_are_ordered() {
    // The month origin is the data source's choice; negative indexes are valid
    assert!(Month::new(-12) < Month::new(-11));
    assert_eq!(Month::new(-1).next(), Month::new(0));
}

#[test]
fn test_serializes_as_plain_integer() {
    let json = serde_json::to_string(&Month::new(684)).unwrap();
    assert_eq!(json, "684");

    let back: Month = serde_json::from_str("684").unwrap();
    assert_eq!(back, Month::new(684));
}
