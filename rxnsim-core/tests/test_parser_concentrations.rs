//! Parser tests for concentration strings

use rxnsim_core::{parse_concentrations, ParseError};

#[test]
fn test_concentrations_basic() {
    let map = parse_concentrations("A: 100, B: 20").unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map["A"], 100.0);
    assert_eq!(map["B"], 20.0);
}

#[test]
fn test_concentrations_fractional_and_exponent() {
    let map = parse_concentrations("A:0.5, B: 1e-3, C: 2.").unwrap();
    assert_eq!(map["A"], 0.5);
    assert_eq!(map["B"], 1e-3);
    assert_eq!(map["C"], 2.0);
}

#[test]
fn test_concentrations_skip_empty_clauses() {
    let map = parse_concentrations(", A: 1,, ,B: 2,").unwrap();
    assert_eq!(map.len(), 2);
}

#[test]
fn test_concentrations_empty_string() {
    assert!(parse_concentrations("").unwrap().is_empty());
    assert!(parse_concentrations("   ").unwrap().is_empty());
}

#[test]
fn test_concentrations_last_value_wins() {
    let map = parse_concentrations("A: 1, B: 2, A: 3").unwrap();
    assert_eq!(map["A"], 3.0);
    assert_eq!(map["B"], 2.0);
}

#[test]
fn test_concentrations_unmentioned_species_absent() {
    let map = parse_concentrations("A: 1").unwrap();
    assert!(!map.contains_key("B"));
}

#[test]
fn test_concentrations_malformed_clauses() {
    for (text, offending) in [
        ("A 1", "A 1"),
        ("A: 1, B = 2", "B = 2"),
        ("A: -1", "A: -1"),
        ("2A: 1", "2A: 1"),
        ("A: abc", "A: abc"),
        ("A:", "A:"),
        (": 4", ": 4"),
    ] {
        assert_eq!(
            parse_concentrations(text),
            Err(ParseError::MalformedConcentrationClause {
                clause: offending.to_string()
            }),
            "input '{}'",
            text
        );
    }
}
