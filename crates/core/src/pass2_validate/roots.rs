//! Top-event resolution.

use crate::error::TranslateError;
use crate::model::FaultTree;
use std::collections::HashSet;
use tracing::debug;

const NO_UNREFERENCED_GATE: &str = "no top event: every gate is an argument of another gate";

/// Gates no other gate references, in declaration order. Needs resolved
/// arguments.
fn top_candidates(ft: &FaultTree) -> Vec<usize> {
    let referenced: HashSet<usize> = ft.gates.iter().flat_map(|g| g.gate_targets()).collect();
    (0..ft.gates.len())
        .filter(|i| !referenced.contains(i))
        .collect()
}

/// A tree whose gates are all referenced always contains a cycle, so cycle
/// detection sees it first. Its error is restated as a missing top event.
pub(super) fn note_missing_top(ft: &FaultTree, mut err: TranslateError) -> TranslateError {
    if !ft.gates.is_empty() && top_candidates(ft).is_empty() {
        err.message = format!("{} ({})", NO_UNREFERENCED_GATE, err.message);
    }
    err
}

/// A gate no other gate references is a top candidate. Exactly one is
/// required unless `multi_top` allows a forest.
pub(super) fn resolve_roots(ft: &mut FaultTree, multi_top: bool) -> Result<(), TranslateError> {
    if ft.gates.is_empty() {
        return Err(TranslateError::fault_tree(
            &ft.file,
            0,
            "no top event: the fault tree defines no gates",
        ));
    }

    let candidates = top_candidates(ft);
    match candidates.as_slice() {
        // Only reachable when cycle detection was skipped.
        [] => {
            return Err(TranslateError::fault_tree(&ft.file, 0, NO_UNREFERENCED_GATE))
        }
        [_] => {}
        [_, second, ..] if !multi_top => {
            let names: Vec<&str> = candidates
                .iter()
                .map(|&i| ft.gates[i].name.as_str())
                .collect();
            return Err(TranslateError::fault_tree(
                &ft.file,
                ft.gates[*second].line,
                format!(
                    "multiple top events: {} (allow multiple roots to translate a forest)",
                    names.join(", ")
                ),
            ));
        }
        _ => {}
    }

    debug!(
        tree = %ft.name,
        roots = ?candidates.iter().map(|&i| ft.gates[i].name.as_str()).collect::<Vec<_>>(),
        "resolved top events"
    );
    ft.roots = candidates;
    Ok(())
}
