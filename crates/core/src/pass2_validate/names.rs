//! Redefinition and identifier-format checks.

use crate::error::TranslateError;
use crate::model::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeclKind {
    Gate,
    Basic,
    House,
}

impl DeclKind {
    fn label(self) -> &'static str {
        match self {
            DeclKind::Gate => "gate",
            DeclKind::Basic => "basic event",
            DeclKind::House => "house event",
        }
    }
}

/// Every declared name must be declared exactly once, whatever its kind.
pub(super) fn check_redefinitions(ft: &FaultTree) -> Result<(), TranslateError> {
    let mut decls: Vec<(u32, DeclKind, &str)> = Vec::new();
    decls.extend(ft.gates.iter().map(|g| (g.line, DeclKind::Gate, g.name.as_str())));
    decls.extend(
        ft.basic_events()
            .map(|b| (b.line, DeclKind::Basic, b.name.as_str())),
    );
    decls.extend(
        ft.house_events
            .iter()
            .map(|h| (h.line, DeclKind::House, h.name.as_str())),
    );
    decls.sort_by_key(|(line, _, _)| *line);

    let mut first: HashMap<String, (u32, DeclKind)> = HashMap::new();
    for (line, kind, name) in decls {
        let Some(&(first_line, first_kind)) = first.get(&normalize(name)) else {
            first.insert(normalize(name), (line, kind));
            continue;
        };
        let message = match (first_kind, kind) {
            (DeclKind::Gate, DeclKind::Gate) => format!(
                "redefinition of gate '{}': first defined at line {}",
                name, first_line
            ),
            (DeclKind::Basic, DeclKind::Basic) => format!(
                "redefinition of the probability of '{}': first assigned at line {}",
                name, first_line
            ),
            (DeclKind::House, DeclKind::House) => format!(
                "redefinition of the state of '{}': first assigned at line {}",
                name, first_line
            ),
            _ => format!(
                "redefinition of '{}': declared as a {} at line {} and as a {} here",
                name,
                first_kind.label(),
                first_line,
                kind.label()
            ),
        };
        return Err(TranslateError::fault_tree(&ft.file, line, message));
    }
    Ok(())
}

/// Identifier rule shared by the fault-tree name and every gate and event
/// name: starts with a letter or `_`, continues with letters, digits, `_` or
/// single `-`, and does not end with `-`.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    if !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return false;
    }
    !name.ends_with('-') && !name.contains("--")
}

fn describe_violation(name: &str) -> &'static str {
    match name.chars().next() {
        None => "name is empty",
        Some(c) if c.is_ascii_digit() => "name must not start with a digit",
        Some(c) if !(c.is_alphabetic() || c == '_') => {
            "name must start with a letter or '_'"
        }
        _ if name.chars().any(char::is_whitespace) => "name must not contain whitespace",
        _ if name.contains('.') => "name must not contain '.'",
        _ if name.contains("--") => "name must not contain '--'",
        _ if name.ends_with('-') => "name must not end with '-'",
        _ => "name contains characters outside letters, digits, '_' and '-'",
    }
}

pub(super) fn check_name_format(ft: &FaultTree) -> Result<(), TranslateError> {
    if !is_valid_name(&ft.name) {
        return Err(TranslateError::parsing(
            &ft.file,
            ft.name_line,
            format!(
                "invalid fault tree name '{}': {}",
                ft.name,
                describe_violation(&ft.name)
            ),
        ));
    }

    let entities = ft
        .gates
        .iter()
        .map(|g| (g.name.as_str(), g.line, "gate"))
        .chain(ft.basic_events.iter().map(|b| (b.name.as_str(), b.line, "event")))
        .chain(ft.house_events.iter().map(|h| (h.name.as_str(), h.line, "house event")));
    for (name, line, what) in entities {
        if !is_valid_name(name) {
            return Err(TranslateError::parsing(
                &ft.file,
                line,
                format!(
                    "invalid {} name '{}': {}",
                    what,
                    name,
                    describe_violation(name)
                ),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_rule() {
        for ok in ["Correct-Name_42", "_x", "FT", "g1", "e-1-a", "Événement"] {
            assert!(is_valid_name(ok), "{}", ok);
        }
        for bad in [
            "Contains Whitespace Characters",
            "Peri.od",
            "EndWithDash-",
            "Double--Dash",
            "42StartWithNumbers",
            "",
            "-lead",
            "semi;colon",
        ] {
            assert!(!is_valid_name(bad), "{}", bad);
        }
    }

    #[test]
    fn violations_are_described() {
        assert_eq!(describe_violation("42x"), "name must not start with a digit");
        assert_eq!(describe_violation("a b"), "name must not contain whitespace");
        assert_eq!(describe_violation("a.b"), "name must not contain '.'");
        assert_eq!(describe_violation("a--b"), "name must not contain '--'");
        assert_eq!(describe_violation("ab-"), "name must not end with '-'");
    }
}
