//! Reference resolution: bind every formula argument to its entity.

use crate::model::FaultTree;
use crate::pass1_build::intern_undefined;

/// Names the builder already interned resolve directly; anything else
/// becomes an undefined basic event, so resolution never fails.
pub(super) fn resolve_references(ft: &mut FaultTree) {
    for gi in 0..ft.gates.len() {
        let line = ft.gates[gi].line;
        for ai in 0..ft.gates[gi].arguments.len() {
            let name = ft.gates[gi].arguments[ai].name.clone();
            let id = intern_undefined(ft, &name, line);
            ft.gates[gi].arguments[ai].target = Some(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Argument, EventId, Gate, Operator};

    #[test]
    fn unknown_names_are_interned_once() {
        let mut ft = FaultTree::new("FT", "test.txt");
        let args = |names: &[&str]| {
            names
                .iter()
                .map(|n| Argument {
                    name: n.to_string(),
                    complement: false,
                    target: None,
                })
                .collect::<Vec<_>>()
        };
        ft.gates.push(Gate {
            name: "g1".into(),
            operator: Operator::And,
            arguments: args(&["x", "g2"]),
            line: 2,
        });
        ft.gates.push(Gate {
            name: "g2".into(),
            operator: Operator::Or,
            arguments: args(&["X", "y"]),
            line: 3,
        });
        ft.names.insert("g1".into(), EventId::Gate(0));
        ft.names.insert("g2".into(), EventId::Gate(1));

        resolve_references(&mut ft);

        assert_eq!(ft.gates[0].arguments[1].target, Some(EventId::Gate(1)));
        assert_eq!(ft.gates[0].arguments[0].target, Some(EventId::Basic(0)));
        assert_eq!(ft.gates[1].arguments[0].target, Some(EventId::Basic(0)));
        assert_eq!(ft.undefined_events().count(), 2);
        assert_eq!(ft.basic_events[1].line, 3);
    }
}
