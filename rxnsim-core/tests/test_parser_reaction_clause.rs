//! Parser tests for reaction clauses

use rxnsim_core::{
    parse_reaction_clause, ArrowKind, ParseError, RateSpec, ReactionClause, SpeciesTerm,
};

#[test]
fn test_forward_clause() {
    let clause = parse_reaction_clause("A + 2B -> C : 0.5").unwrap();
    assert_eq!(clause.arrow(), ArrowKind::Forward);
    assert_eq!(
        clause.lhs,
        vec![SpeciesTerm::new("A", 1), SpeciesTerm::new("B", 2)]
    );
    assert_eq!(clause.rhs, vec![SpeciesTerm::new("C", 1)]);
    assert_eq!(clause.rate, RateSpec::Forward(0.5));
}

#[test]
fn test_reverse_clause() {
    let clause = parse_reaction_clause("A <- B : 3").unwrap();
    assert_eq!(clause.arrow(), ArrowKind::Reverse);
    assert_eq!(clause.lhs, vec![SpeciesTerm::new("A", 1)]);
    assert_eq!(clause.rhs, vec![SpeciesTerm::new("B", 1)]);
    assert_eq!(clause.rate, RateSpec::Reverse(3.0));
}

#[test]
fn test_reversible_clause_is_not_split_as_reverse() {
    let clause = parse_reaction_clause("A <-> B : 0.1//0.2").unwrap();
    assert_eq!(clause.arrow(), ArrowKind::Reversible);
    assert_eq!(clause.rhs, vec![SpeciesTerm::new("B", 1)]);
    assert_eq!(
        clause.rate,
        RateSpec::Reversible {
            forward: 0.1,
            reverse: 0.2
        }
    );
}

#[test]
fn test_clause_without_spaces() {
    let clause = parse_reaction_clause("2A<->A2:1//0.5").unwrap();
    assert_eq!(clause.lhs, vec![SpeciesTerm::new("A", 2)]);
    assert_eq!(clause.rhs, vec![SpeciesTerm::new("A2", 1)]);
}

#[test]
fn test_empty_product_side() {
    let clause = parse_reaction_clause("A -> : 1").unwrap();
    assert_eq!(clause.lhs, vec![SpeciesTerm::new("A", 1)]);
    assert!(clause.rhs.is_empty());
}

#[test]
fn test_empty_reactant_side() {
    let clause = parse_reaction_clause("-> A : 2").unwrap();
    assert!(clause.lhs.is_empty());
    assert_eq!(clause.rhs, vec![SpeciesTerm::new("A", 1)]);
}

#[test]
fn test_zero_rate_is_allowed() {
    let clause = parse_reaction_clause("A -> B : 0").unwrap();
    assert_eq!(clause.rate, RateSpec::Forward(0.0));
}

#[test]
fn test_bad_token_in_clause() {
    assert_eq!(
        parse_reaction_clause("A+2 -> B : 1"),
        Err(ParseError::MalformedSpeciesToken {
            token: "2".to_string()
        })
    );
}

#[test]
fn test_empty_token_between_plus_signs() {
    assert!(matches!(
        parse_reaction_clause("A + -> B : 1"),
        Err(ParseError::MalformedSpeciesToken { .. })
    ));
}

#[test]
fn test_missing_arrow() {
    assert_eq!(
        parse_reaction_clause("A = B : 1"),
        Err(ParseError::InvalidReactionClause {
            clause: "A = B : 1".to_string()
        })
    );
}

#[test]
fn test_missing_rate_constant() {
    for text in ["A -> B", "A -> B :", "A <- B :  "] {
        assert!(
            matches!(
                parse_reaction_clause(text),
                Err(ParseError::MissingRateConstant { .. })
            ),
            "'{}'",
            text
        );
    }
}

#[test]
fn test_malformed_reversible_rate() {
    for text in ["A <-> B : 0.1", "A <-> B", "A <-> B : //0.1", "A <-> B : 0.1//"] {
        assert!(
            matches!(
                parse_reaction_clause(text),
                Err(ParseError::MalformedReversibleRate { .. })
            ),
            "'{}'",
            text
        );
    }
}

#[test]
fn test_invalid_rate_values() {
    assert_eq!(
        parse_reaction_clause("A -> B : fast"),
        Err(ParseError::InvalidRateConstant {
            clause: "A -> B : fast".to_string(),
            value: "fast".to_string()
        })
    );
    assert!(matches!(
        parse_reaction_clause("A -> B : 0.1//0.2"),
        Err(ParseError::InvalidRateConstant { .. })
    ));
    assert!(matches!(
        parse_reaction_clause("A <-> B : 0.1//-2"),
        Err(ParseError::InvalidRateConstant { .. })
    ));
}

#[test]
fn test_error_names_offending_text() {
    let err = parse_reaction_clause("A + 3 -> B : 1").unwrap_err();
    assert_eq!(err.offending_text(), "3");
    assert!(err.to_string().contains("'3'"));
}

#[test]
fn test_arrow_follows_rate_shape() {
    let clause = parse_reaction_clause("A <-> B : 0.1//0.2").unwrap();
    assert_eq!(clause.arrow(), ArrowKind::Reversible);
    let steps = clause.directed_steps();
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[1].2, 0.2);

    let clause = ReactionClause {
        lhs: vec![SpeciesTerm::new("A", 1)],
        rhs: vec![SpeciesTerm::new("B", 1)],
        rate: RateSpec::Reverse(4.0),
    };
    assert_eq!(clause.arrow(), ArrowKind::Reverse);
    let steps = clause.directed_steps();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].0, clause.rhs.as_slice());
    assert_eq!(steps[0].1, clause.lhs.as_slice());
    assert_eq!(steps[0].2, 4.0);
}

#[test]
fn test_repeated_species_overflowing_coefficient() {
    assert_eq!(
        parse_reaction_clause("4294967295A + A -> B : 1"),
        Err(ParseError::MalformedSpeciesToken {
            token: "A".to_string()
        })
    );
    let clause = parse_reaction_clause("4294967294A + A -> B : 1").unwrap();
    assert_eq!(clause.lhs, vec![SpeciesTerm::new("A", u32::MAX)]);
}
