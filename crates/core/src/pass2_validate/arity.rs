//! Operator arity checks.

use crate::error::TranslateError;
use crate::model::{FaultTree, Gate, Operator};

fn arity_violation(gate: &Gate) -> Option<String> {
    let n = gate.arguments.len();
    match gate.operator {
        Operator::Null | Operator::Not if n != 1 => Some(format!(
            "{} gate '{}' takes exactly one argument, got {}",
            gate.operator, gate.name, n
        )),
        Operator::Xor if n != 2 => Some(format!(
            "xor gate '{}' takes exactly two arguments, got {}",
            gate.name, n
        )),
        Operator::And | Operator::Or if n < 2 => Some(format!(
            "{} gate '{}' takes at least two arguments, got {}",
            gate.operator, gate.name, n
        )),
        Operator::AtLeast(k) if k < 1 || k as usize >= n => Some(format!(
            "vote gate '{}' requires 1 <= K < N, got K = {} and N = {}",
            gate.name, k, n
        )),
        _ => None,
    }
}

pub(super) fn check_arity(ft: &FaultTree) -> Result<(), TranslateError> {
    for gate in &ft.gates {
        if let Some(message) = arity_violation(gate) {
            return Err(TranslateError::fault_tree(&ft.file, gate.line, message));
        }
    }
    Ok(())
}
