//! Gate reference cycle detection.
//!
//! Every declared gate is a DFS start point, not only the top candidates: a
//! cycle detached from the rest of the tree still invalidates the document.

use crate::error::TranslateError;
use crate::model::FaultTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InPath,
    Done,
}

pub(super) fn detect_cycles(ft: &FaultTree) -> Result<(), TranslateError> {
    let edges: Vec<Vec<usize>> = ft.gates.iter().map(|g| g.gate_targets().collect()).collect();
    let mut marks = vec![Mark::Unvisited; ft.gates.len()];

    for start in 0..ft.gates.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }
        // (gate, index of the next edge to follow)
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        marks[start] = Mark::InPath;

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let Some(&child) = edges[node].get(next) else {
                marks[node] = Mark::Done;
                stack.pop();
                continue;
            };
            frame.1 += 1;
            match marks[child] {
                Mark::Unvisited => {
                    marks[child] = Mark::InPath;
                    stack.push((child, 0));
                }
                Mark::InPath => {
                    let cycle_start = stack
                        .iter()
                        .position(|&(n, _)| n == child)
                        .unwrap_or(0);
                    let mut cycle: Vec<&str> = stack[cycle_start..]
                        .iter()
                        .map(|&(n, _)| ft.gates[n].name.as_str())
                        .collect();
                    cycle.push(ft.gates[child].name.as_str());
                    return Err(TranslateError::fault_tree(
                        &ft.file,
                        ft.gates[node].line,
                        format!("cycle detected: {}", cycle.join(" \u{2192} ")),
                    ));
                }
                Mark::Done => {}
            }
        }
    }
    Ok(())
}
