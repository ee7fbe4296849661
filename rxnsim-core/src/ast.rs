// ============================================================================
// Reaction notation
// ============================================================================

/// Arrow token separating the two sides of a reaction clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKind {
    /// `->`: left side reacts to the right side
    Forward,
    /// `<-`: right side reacts to the left side
    Reverse,
    /// `<->`: both directions, each with its own rate constant
    Reversible,
}

impl ArrowKind {
    pub fn token(self) -> &'static str {
        match self {
            ArrowKind::Forward => "->",
            ArrowKind::Reverse => "<-",
            ArrowKind::Reversible => "<->",
        }
    }
}

/// One `[coefficient]species` term on a side of a reaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeciesTerm {
    pub species: String,
    pub coefficient: u32,
}

impl SpeciesTerm {
    pub fn new(species: impl Into<String>, coefficient: u32) -> Self {
        Self {
            species: species.into(),
            coefficient,
        }
    }
}

/// Direction of a clause together with its rate constants
///
/// The arrow and the rate shape travel together, so a `->` clause always has
/// exactly one constant and a `<->` clause always has two.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateSpec {
    /// `->` with a single constant
    Forward(f64),
    /// `<-` with a single constant
    Reverse(f64),
    /// `<->` with `forward // reverse`
    Reversible { forward: f64, reverse: f64 },
}

impl RateSpec {
    pub fn arrow(&self) -> ArrowKind {
        match self {
            RateSpec::Forward(_) => ArrowKind::Forward,
            RateSpec::Reverse(_) => ArrowKind::Reverse,
            RateSpec::Reversible { .. } => ArrowKind::Reversible,
        }
    }
}

/// A reaction clause as written: `LHS <arrow> RHS : rate`
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionClause {
    pub lhs: Vec<SpeciesTerm>,
    pub rhs: Vec<SpeciesTerm>,
    pub rate: RateSpec,
}

impl ReactionClause {
    pub fn arrow(&self) -> ArrowKind {
        self.rate.arrow()
    }

    /// Directed steps implied by the clause, in emission order:
    /// `(reactants, products, rate_constant)`.
    pub fn directed_steps(&self) -> Vec<(&[SpeciesTerm], &[SpeciesTerm], f64)> {
        let (lhs, rhs) = (self.lhs.as_slice(), self.rhs.as_slice());
        match self.rate {
            RateSpec::Forward(k) => vec![(lhs, rhs, k)],
            RateSpec::Reverse(k) => vec![(rhs, lhs, k)],
            RateSpec::Reversible { forward, reverse } => {
                vec![(lhs, rhs, forward), (rhs, lhs, reverse)]
            }
        }
    }
}

// ============================================================================
// Task files
// ============================================================================

/// Simulation declaration: `simulate dt = 0.01 t_max = 100`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulateDecl {
    pub dt: f64,
    pub t_max: f64,
}

/// Units declaration: `units time = s concentration = mM`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitsDecl {
    pub time: String,
    pub concentration: String,
}

impl Default for UnitsDecl {
    fn default() -> Self {
        Self {
            time: "s".to_string(),
            concentration: "mM".to_string(),
        }
    }
}

/// A parsed task file
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Reaction clauses from every `reaction` line, comma-joined in file order
    pub reactions: String,
    /// Concentration clauses from every `concentrations` line, comma-joined
    pub concentrations: String,
    pub simulate: SimulateDecl,
    pub units: UnitsDecl,
}
