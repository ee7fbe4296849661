//! Parsers for the compact reaction notation
//!
//! Three small grammars live here:
//! - species tokens: `[coefficient] identifier`, e.g. `2A`, `H2O`, `_x`
//! - concentration strings: `A: 100, B: 20`
//! - reaction clauses: `A + 2B <-> C : 0.1//0.05`
//!
//! Each parser is a pure function of its input and reports the first problem
//! it finds. Nothing here builds rate laws or assigns reaction ids; that is
//! the assembler's job.

use crate::ast::{ArrowKind, RateSpec, ReactionClause, SpeciesTerm};
use log::{debug, warn};
use std::collections::HashMap;
use thiserror::Error;

/// Error raised while parsing reaction or concentration notation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("malformed species token '{token}'")]
    MalformedSpeciesToken { token: String },

    #[error("malformed concentration clause '{clause}' (expected 'name: value')")]
    MalformedConcentrationClause { clause: String },

    #[error("invalid reaction clause '{clause}': no '->', '<-' or '<->' found")]
    InvalidReactionClause { clause: String },

    #[error("missing rate constant for reaction '{clause}'")]
    MissingRateConstant { clause: String },

    #[error("malformed rate for reversible reaction '{clause}' (expected 'forward//reverse')")]
    MalformedReversibleRate { clause: String },

    #[error("invalid rate constant '{value}' in reaction '{clause}'")]
    InvalidRateConstant { clause: String, value: String },
}

impl ParseError {
    /// The piece of input the error refers to
    pub fn offending_text(&self) -> &str {
        match self {
            Self::MalformedSpeciesToken { token } => token,
            Self::MalformedConcentrationClause { clause }
            | Self::InvalidReactionClause { clause }
            | Self::MissingRateConstant { clause }
            | Self::MalformedReversibleRate { clause } => clause,
            Self::InvalidRateConstant { value, .. } => value,
        }
    }
}

/// Parse a species token: `[integer] identifier`
///
/// The coefficient defaults to 1 and must be positive. Whitespace between
/// the coefficient and the identifier is tolerated (`2 A`).
pub fn parse_species_token(token: &str) -> Result<SpeciesTerm, ParseError> {
    let token = token.trim();
    let malformed = || ParseError::MalformedSpeciesToken {
        token: token.to_string(),
    };

    let digits_end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let (digits, rest) = token.split_at(digits_end);
    let name = rest.trim_start();

    if !is_identifier(name) {
        return Err(malformed());
    }

    let coefficient = if digits.is_empty() {
        1
    } else {
        match digits.parse::<u32>() {
            Ok(n) if n > 0 => n,
            _ => return Err(malformed()),
        }
    };

    Ok(SpeciesTerm::new(name, coefficient))
}

/// Parse a comma-separated `name: value` string into initial concentrations
///
/// Empty clauses are skipped. When a name repeats, the last value wins.
/// Species that are not mentioned are simply absent from the result.
pub fn parse_concentrations(text: &str) -> Result<HashMap<String, f64>, ParseError> {
    let mut concentrations = HashMap::new();

    for clause in text.split(',') {
        let clause = clause.trim();
        if clause.is_empty() {
            continue;
        }

        let malformed = || ParseError::MalformedConcentrationClause {
            clause: clause.to_string(),
        };

        let (name, value) = clause.split_once(':').ok_or_else(malformed)?;
        let name = name.trim();
        if !is_identifier(name) {
            return Err(malformed());
        }
        let value = parse_non_negative_real(value).ok_or_else(malformed)?;

        if let Some(previous) = concentrations.insert(name.to_string(), value) {
            warn!(
                "concentration of '{}' given more than once; using {} instead of {}",
                name, value, previous
            );
        }
    }

    Ok(concentrations)
}

/// Split a reaction string into its non-empty, trimmed clauses
pub fn split_reaction_clauses(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|c| !c.is_empty())
}

/// Parse a single reaction clause: `LHS <arrow> RHS [: rate]`
pub fn parse_reaction_clause(clause: &str) -> Result<ReactionClause, ParseError> {
    let clause = clause.trim();

    let (equation, rate_text) = match clause.split_once(':') {
        Some((equation, rate)) => (equation, Some(rate.trim())),
        None => (clause, None),
    };

    let (arrow_pos, arrow) =
        find_arrow(equation).ok_or_else(|| ParseError::InvalidReactionClause {
            clause: clause.to_string(),
        })?;

    let lhs = parse_side(&equation[..arrow_pos])?;
    let rhs = parse_side(&equation[arrow_pos + arrow.token().len()..])?;
    let rate = parse_rate_spec(clause, arrow, rate_text)?;

    debug!(
        "parsed clause '{}': {} reactant term(s), {} product term(s), {:?}",
        clause,
        lhs.len(),
        rhs.len(),
        rate
    );

    Ok(ReactionClause { lhs, rhs, rate })
}

/// Locate the first arrow token, preferring `<->` over `<-` at the same position
fn find_arrow(equation: &str) -> Option<(usize, ArrowKind)> {
    equation.char_indices().find_map(|(i, _)| {
        let rest = &equation[i..];
        if rest.starts_with("<->") {
            Some((i, ArrowKind::Reversible))
        } else if rest.starts_with("->") {
            Some((i, ArrowKind::Forward))
        } else if rest.starts_with("<-") {
            Some((i, ArrowKind::Reverse))
        } else {
            None
        }
    })
}

/// Parse one side of a reaction. An empty side is a source or a sink.
/// Repeated species are merged into a single term at the first position.
fn parse_side(side: &str) -> Result<Vec<SpeciesTerm>, ParseError> {
    let side = side.trim();
    if side.is_empty() {
        return Ok(Vec::new());
    }

    let mut terms: Vec<SpeciesTerm> = Vec::new();
    for token in side.split('+') {
        let term = parse_species_token(token)?;
        match terms.iter_mut().find(|t| t.species == term.species) {
            Some(existing) => {
                warn!(
                    "species '{}' repeated on one side of '{}'; merging coefficients",
                    term.species, side
                );
                existing.coefficient = existing
                    .coefficient
                    .checked_add(term.coefficient)
                    .ok_or_else(|| ParseError::MalformedSpeciesToken {
                        token: token.trim().to_string(),
                    })?;
            }
            None => terms.push(term),
        }
    }
    Ok(terms)
}

fn parse_rate_spec(
    clause: &str,
    arrow: ArrowKind,
    rate_text: Option<&str>,
) -> Result<RateSpec, ParseError> {
    let rate_text = rate_text.filter(|r| !r.is_empty());
    let invalid = |value: &str| ParseError::InvalidRateConstant {
        clause: clause.to_string(),
        value: value.to_string(),
    };

    match arrow {
        ArrowKind::Forward | ArrowKind::Reverse => {
            let text = rate_text.ok_or_else(|| ParseError::MissingRateConstant {
                clause: clause.to_string(),
            })?;
            let k = parse_non_negative_real(text).ok_or_else(|| invalid(text))?;
            Ok(if arrow == ArrowKind::Forward {
                RateSpec::Forward(k)
            } else {
                RateSpec::Reverse(k)
            })
        }
        ArrowKind::Reversible => {
            let malformed = || ParseError::MalformedReversibleRate {
                clause: clause.to_string(),
            };
            let (forward, reverse) = rate_text
                .and_then(|text| text.split_once("//"))
                .ok_or_else(malformed)?;
            let (forward, reverse) = (forward.trim(), reverse.trim());
            if forward.is_empty() || reverse.is_empty() {
                return Err(malformed());
            }
            Ok(RateSpec::Reversible {
                forward: parse_non_negative_real(forward).ok_or_else(|| invalid(forward))?,
                reverse: parse_non_negative_real(reverse).ok_or_else(|| invalid(reverse))?,
            })
        }
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Unsigned decimal with optional fraction and exponent; finite only
pub(crate) fn parse_non_negative_real(text: &str) -> Option<f64> {
    let text = text.trim();
    let starts_numeric = text
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_digit() || c == '.');
    let only_numeric = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !starts_numeric || !only_numeric {
        return None;
    }
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}
