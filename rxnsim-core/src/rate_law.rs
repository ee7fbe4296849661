//! Mass-action rate laws for directed reaction steps

use crate::ast::SpeciesTerm;
use crate::model::{Reaction, StoichEntry};
use std::collections::BTreeMap;

/// Name of the rate constant of reaction `index`: `k1`, `k2`, ...
pub fn rate_constant_name(index: usize) -> String {
    format!("k{}", index)
}

/// `kN` for a source step, otherwise `kN * [A] * [B]**2 ...` in reactant order
pub fn rate_law_expression(index: usize, reactants: &[SpeciesTerm]) -> String {
    let k = rate_constant_name(index);
    if reactants.is_empty() {
        return k;
    }
    let factors: Vec<String> = reactants
        .iter()
        .map(|term| match term.coefficient {
            1 => format!("[{}]", term.species),
            n => format!("[{}]**{}", term.species, n),
        })
        .collect();
    format!("{} * {}", k, factors.join(" * "))
}

/// Shortest round-trip form of a rate constant, with a signed two-digit
/// exponent when one is needed: `0.1`, `100.0`, `1e-05`, `2.5e+20`
pub fn format_rate_constant(k: f64) -> String {
    let text = format!("{:?}", k);
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => text,
    }
}

/// `2A`, or just `A` for a unit coefficient
pub fn render_term(term: &SpeciesTerm) -> String {
    match term.coefficient {
        1 => term.species.clone(),
        n => format!("{}{}", n, term.species),
    }
}

pub fn render_side(terms: &[SpeciesTerm]) -> String {
    terms.iter().map(render_term).collect::<Vec<_>>().join(" + ")
}

/// Build reaction `R<index>` from one directed step.
///
/// Returns the reaction entry and its one-line human-readable description:
/// `R1: A -> B    (rate = k1 * [A], k1 = 0.1)`
pub fn build_reaction(
    index: usize,
    reactants: &[SpeciesTerm],
    products: &[SpeciesTerm],
    rate_constant: f64,
) -> (Reaction, String) {
    let id = format!("R{}", index);
    let k = rate_constant_name(index);
    let rate_law = rate_law_expression(index, reactants);

    let line = format!(
        "{}: {} -> {}    (rate = {}, {} = {})",
        id,
        render_side(reactants),
        render_side(products),
        rate_law,
        k,
        format_rate_constant(rate_constant)
    );

    let reaction = Reaction {
        id,
        reactants: reactants.iter().map(stoich_entry).collect(),
        products: products.iter().map(stoich_entry).collect(),
        rate_law,
        parameters: BTreeMap::from([(k, rate_constant)]),
    };

    (reaction, line)
}

fn stoich_entry(term: &SpeciesTerm) -> StoichEntry {
    StoichEntry {
        species: term.species.clone(),
        stoichiometry: term.coefficient,
    }
}
