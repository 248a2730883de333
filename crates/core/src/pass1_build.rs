//! Pass 1: Model building -- intern every name of the draft into the
//! fault-tree namespace and materialize gate and event records.
//!
//! Declarations are collected first so that formulas may reference gates
//! defined later in the document; argument names that match no declaration
//! become undefined basic events. Arguments stay unresolved until the
//! validator runs.

use crate::ast::*;
use crate::error::TranslateError;
use crate::model::*;
use std::collections::HashSet;
use tracing::debug;

pub fn build(doc: &RawDocument) -> Result<FaultTree, TranslateError> {
    let mut ft = FaultTree::new(&doc.name, &doc.name_prov.file);
    ft.name_line = doc.name_prov.line;

    // Phase 1: declarations. The first declaration of a name owns its slot;
    // later collisions are reported by the validator.
    for g in &doc.gates {
        check_repeated_arguments(g)?;
        let id = EventId::Gate(ft.gates.len());
        ft.gates.push(Gate {
            name: g.name.clone(),
            operator: g.formula.operator,
            arguments: g
                .formula
                .args
                .iter()
                .map(|a| Argument {
                    name: a.name.clone(),
                    complement: a.complement,
                    target: None,
                })
                .collect(),
            line: g.prov.line,
        });
        ft.names.entry(normalize(&g.name)).or_insert(id);
    }
    for p in &doc.probabilities {
        let id = EventId::Basic(ft.basic_events.len());
        ft.basic_events.push(BasicEvent {
            name: p.name.clone(),
            probability: Some(p.value),
            origin: EventOrigin::Declared,
            line: p.prov.line,
        });
        ft.names.entry(normalize(&p.name)).or_insert(id);
    }
    for s in &doc.states {
        let id = EventId::House(ft.house_events.len());
        ft.house_events.push(HouseEvent {
            name: s.name.clone(),
            state: s.value,
            line: s.prov.line,
        });
        ft.names.entry(normalize(&s.name)).or_insert(id);
    }

    // Phase 2: argument names nobody declared.
    for g in &doc.gates {
        for a in &g.formula.args {
            intern_undefined(&mut ft, &a.name, g.prov.line);
        }
    }

    debug!(
        tree = %ft.name,
        gates = ft.gates.len(),
        basic_events = ft.basic_events().count(),
        house_events = ft.house_events.len(),
        undefined_events = ft.undefined_events().count(),
        "built fault tree model"
    );
    Ok(ft)
}

/// Intern `name` as an undefined basic event unless it is already known.
pub(crate) fn intern_undefined(ft: &mut FaultTree, name: &str, line: u32) -> EventId {
    let key = normalize(name);
    if let Some(&id) = ft.names.get(&key) {
        return id;
    }
    let id = EventId::Basic(ft.basic_events.len());
    ft.basic_events.push(BasicEvent {
        name: name.to_owned(),
        probability: None,
        origin: EventOrigin::Undefined,
        line,
    });
    ft.names.insert(key, id);
    id
}

/// The same name may appear at most once per polarity in one formula.
fn check_repeated_arguments(g: &RawGate) -> Result<(), TranslateError> {
    let mut seen: HashSet<(String, bool)> = HashSet::new();
    for a in &g.formula.args {
        if !seen.insert((normalize(&a.name), a.complement)) {
            return Err(TranslateError::fault_tree(
                &g.prov.file,
                g.prov.line,
                format!(
                    "repeated argument '{}' in the formula of gate '{}'",
                    if a.complement {
                        format!("~{}", a.name)
                    } else {
                        a.name.clone()
                    },
                    g.name
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::parser::parse_document;

    fn build_src(src: &str) -> Result<FaultTree, TranslateError> {
        build(&parse_document(src, "test.txt")?)
    }

    #[test]
    fn repeated_argument_is_case_insensitive() {
        let err = build_src("FT\ng1 := g2 & e1\ng2 := E1 & e1\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::FaultTree);
        assert_eq!(err.line, 3);
        assert!(err.message.contains("repeated argument"));
    }

    #[test]
    fn opposite_polarity_is_not_a_repeat() {
        let ft = build_src("FT\ng1 := ~e2 & e2\n").unwrap();
        assert_eq!(ft.gates()[0].arguments.len(), 2);
        assert_eq!(ft.undefined_events().count(), 1);
    }

    #[test]
    fn repeated_complement_is_rejected() {
        let err = build_src("FT\ng1 := @(2, [~a, b, ~A])\n").unwrap_err();
        assert_eq!(err.kind, ErrorKind::FaultTree);
        assert!(err.message.contains("~A"));
    }

    #[test]
    fn forward_references_are_not_undefined() {
        let ft = build_src("FT\ng1 := g2 | e1\ng2 := e1 & e3\np(e1) = 0.1\n").unwrap();
        let undefined: Vec<_> = ft.undefined_events().map(|b| b.name.as_str()).collect();
        assert_eq!(undefined, vec!["e3"]);
        assert_eq!(ft.names.get("g2"), Some(&EventId::Gate(1)));
    }

    #[test]
    fn declared_event_is_shared_by_every_reference() {
        let ft = build_src("FT\np(e2) = 0.2\ng1 := e2 & E2x\ng2 := g1 | e2\n").unwrap();
        assert_eq!(ft.basic_events().count(), 1);
        assert_eq!(ft.names.get("e2"), Some(&EventId::Basic(0)));
    }

    #[test]
    fn arguments_start_unresolved() {
        let ft = build_src("FT\ng1 := a | b\n").unwrap();
        assert!(ft.gates()[0].arguments.iter().all(|a| a.target.is_none()));
    }
}
