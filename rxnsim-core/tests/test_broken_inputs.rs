//! Tests for broken/invalid task files

use rxnsim_core::tests::test_helpers::fixture_path;
use rxnsim_core::{run_task_source, ParseError, SimulationError, TaskError};

fn broken_source(filename: &str) -> String {
    let path = fixture_path(&["integration", "broken", filename]);
    std::fs::read_to_string(path).unwrap()
}

fn parse_error_of(filename: &str) -> ParseError {
    let err = run_task_source(&broken_source(filename)).unwrap_err();
    err.downcast_ref::<ParseError>()
        .unwrap_or_else(|| panic!("{}: expected a parse error, got '{}'", filename, err))
        .clone()
}

#[test]
fn test_bad_token_produces_malformed_species_token() {
    assert_eq!(
        parse_error_of("bad_token.rxn"),
        ParseError::MalformedSpeciesToken {
            token: "2".to_string()
        }
    );
}

#[test]
fn test_missing_rate_produces_missing_rate_constant() {
    assert!(matches!(
        parse_error_of("missing_rate.rxn"),
        ParseError::MissingRateConstant { .. }
    ));
}

#[test]
fn test_single_rate_on_reversible_reaction() {
    assert!(matches!(
        parse_error_of("reversible_single_rate.rxn"),
        ParseError::MalformedReversibleRate { .. }
    ));
}

#[test]
fn test_clause_without_arrow() {
    assert!(matches!(
        parse_error_of("no_arrow.rxn"),
        ParseError::InvalidReactionClause { .. }
    ));
}

#[test]
fn test_bad_concentration_clause() {
    assert_eq!(
        parse_error_of("bad_concentration.rxn"),
        ParseError::MalformedConcentrationClause {
            clause: "A = 1".to_string()
        }
    );
}

#[test]
fn test_missing_simulate_produces_task_error() {
    let err = run_task_source(&broken_source("missing_simulate.rxn")).unwrap_err();
    assert!(err.downcast_ref::<TaskError>().is_some());
}

#[test]
fn test_unknown_directive_produces_task_error() {
    let err = run_task_source(&broken_source("unknown_directive.rxn")).unwrap_err();
    let task_error = err.downcast_ref::<TaskError>().expect("task error");
    assert!(task_error.span().is_some());
}

#[test]
fn test_degenerate_horizon_is_rejected_before_simulation() {
    let err = run_task_source(&broken_source("degenerate_horizon.rxn")).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<SimulationError>(),
        Some(SimulationError::InvalidHorizon { .. })
    ));
}

#[test]
fn test_broken_inputs_do_not_panic() {
    let broken_files = [
        "bad_token.rxn",
        "missing_rate.rxn",
        "reversible_single_rate.rxn",
        "no_arrow.rxn",
        "bad_concentration.rxn",
        "missing_simulate.rxn",
        "degenerate_horizon.rxn",
        "unknown_directive.rxn",
    ];

    for filename in &broken_files {
        let result = run_task_source(&broken_source(filename));
        match result {
            Err(e) => assert!(!e.to_string().is_empty(), "{}: empty message", filename),
            Ok(_) => panic!("{} should have failed", filename),
        }
    }
}

#[test]
fn test_error_messages_are_consistent() {
    let source = broken_source("bad_token.rxn");
    let msg1 = run_task_source(&source).unwrap_err().to_string();
    let msg2 = run_task_source(&source).unwrap_err().to_string();
    assert_eq!(msg1, msg2);
    assert!(msg1.contains("malformed species token"));
}
