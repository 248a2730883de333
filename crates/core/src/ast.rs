//! Draft types produced by the parser.
//!
//! Names are kept exactly as written; no resolution or case folding happens
//! here. The model builder consumes a [`RawDocument`] and interns it into a
//! [`crate::model::FaultTree`].

use crate::model::Operator;

// ──────────────────────────────────────────────
// Provenance
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub file: String,
    pub line: u32,
}

// ──────────────────────────────────────────────
// Formulas
// ──────────────────────────────────────────────

/// An argument reference inside a formula.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArg {
    pub name: String,
    pub complement: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawFormula {
    pub operator: Operator,
    pub args: Vec<RawArg>,
}

// ──────────────────────────────────────────────
// Statements
// ──────────────────────────────────────────────

/// `name := formula`
#[derive(Debug, Clone)]
pub struct RawGate {
    pub name: String,
    pub formula: RawFormula,
    pub prov: Provenance,
}

/// `p(name) = value`
#[derive(Debug, Clone)]
pub struct RawProbability {
    pub name: String,
    pub value: f64,
    pub prov: Provenance,
}

/// `s(name) = true|false`
#[derive(Debug, Clone)]
pub struct RawState {
    pub name: String,
    pub value: bool,
    pub prov: Provenance,
}

/// The structural draft of one fault-tree description.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub name: String,
    pub name_prov: Provenance,
    pub gates: Vec<RawGate>,
    pub probabilities: Vec<RawProbability>,
    pub states: Vec<RawState>,
}
