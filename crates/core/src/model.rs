//! In-memory fault-tree model.
//!
//! Entities live in per-kind arenas owned by [`FaultTree`] and refer to each
//! other through [`EventId`] indices, never through shared pointers. One
//! case-insensitive namespace table maps every name to its entity.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Namespace key for a name. Identity is case-insensitive; display keeps the
/// spelling of the first declaration.
pub fn normalize(name: &str) -> String {
    name.to_lowercase()
}

// ──────────────────────────────────────────────
// Operators
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Pass-through of a single argument.
    Null,
    Not,
    And,
    Or,
    Xor,
    /// K-of-N vote; holds K.
    AtLeast(u32),
}

impl Operator {
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Null => "null",
            Operator::Not => "not",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Xor => "xor",
            Operator::AtLeast(_) => "atleast",
        }
    }

    /// MEF formula element, or `None` when the argument is emitted bare.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Operator::Null => None,
            Operator::Not => Some("not"),
            Operator::And => Some("and"),
            Operator::Or => Some("or"),
            Operator::Xor => Some("xor"),
            Operator::AtLeast(_) => Some("atleast"),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ──────────────────────────────────────────────
// Entities
// ──────────────────────────────────────────────

/// Common capability of everything that lives in the namespace.
pub trait Named {
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventId {
    Gate(usize),
    Basic(usize),
    House(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// Name as written at the point of use.
    pub name: String,
    pub complement: bool,
    /// Filled in by reference resolution during validation.
    pub target: Option<EventId>,
}

impl Argument {
    pub fn display(&self) -> String {
        if self.complement {
            format!("~{}", self.name)
        } else {
            self.name.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    pub name: String,
    pub operator: Operator,
    pub arguments: Vec<Argument>,
    pub line: u32,
}

impl Gate {
    /// Argument names, complemented ones prefixed with `~`.
    pub fn event_arguments(&self) -> Vec<String> {
        self.arguments.iter().map(Argument::display).collect()
    }

    pub fn gate_targets(&self) -> impl Iterator<Item = usize> + '_ {
        self.arguments.iter().filter_map(|a| match a.target {
            Some(EventId::Gate(i)) => Some(i),
            _ => None,
        })
    }
}

impl Named for Gate {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOrigin {
    /// Declared with `p(name) = value`.
    Declared,
    /// Referenced by a formula but never declared.
    Undefined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BasicEvent {
    pub name: String,
    pub probability: Option<f64>,
    pub origin: EventOrigin,
    /// Declaration line, or the line of the first referencing gate.
    pub line: u32,
}

impl Named for BasicEvent {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HouseEvent {
    pub name: String,
    pub state: bool,
    pub line: u32,
}

impl Named for HouseEvent {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Borrowed view of any namespace entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventRef<'a> {
    Gate(&'a Gate),
    Basic(&'a BasicEvent),
    House(&'a HouseEvent),
}

impl Named for EventRef<'_> {
    fn name(&self) -> &str {
        match self {
            EventRef::Gate(g) => g.name(),
            EventRef::Basic(b) => b.name(),
            EventRef::House(h) => h.name(),
        }
    }
}

// ──────────────────────────────────────────────
// Fault tree
// ──────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct FaultTree {
    pub(crate) name: String,
    pub(crate) name_line: u32,
    pub(crate) file: String,
    pub(crate) gates: Vec<Gate>,
    pub(crate) basic_events: Vec<BasicEvent>,
    pub(crate) house_events: Vec<HouseEvent>,
    pub(crate) names: HashMap<String, EventId>,
    pub(crate) roots: Vec<usize>,
}

/// Entity counts reported by the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub name: String,
    pub gates: usize,
    pub basic_events: usize,
    pub house_events: usize,
    pub undefined_events: usize,
    pub roots: Vec<String>,
}

impl FaultTree {
    pub(crate) fn new(name: &str, file: &str) -> Self {
        FaultTree {
            name: name.to_owned(),
            name_line: 0,
            file: file.to_owned(),
            gates: Vec::new(),
            basic_events: Vec::new(),
            house_events: Vec::new(),
            names: HashMap::new(),
            roots: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The source the tree was translated from.
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Basic events declared with `p()`.
    pub fn basic_events(&self) -> impl Iterator<Item = &BasicEvent> + '_ {
        self.basic_events
            .iter()
            .filter(|b| b.origin == EventOrigin::Declared)
    }

    /// Formula arguments that name no gate and were never declared. They are
    /// basic events without a probability until a caller assigns one.
    pub fn undefined_events(&self) -> impl Iterator<Item = &BasicEvent> + '_ {
        self.basic_events
            .iter()
            .filter(|b| b.origin == EventOrigin::Undefined)
    }

    pub fn house_events(&self) -> &[HouseEvent] {
        &self.house_events
    }

    /// Empty until the tree has been validated.
    pub fn roots(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.roots.iter().map(move |&i| &self.gates[i])
    }

    /// The single root of a non-forest tree.
    pub fn root(&self) -> Option<&Gate> {
        match self.roots.as_slice() {
            [only] => Some(&self.gates[*only]),
            _ => None,
        }
    }

    /// Case-insensitive lookup across gates and events.
    pub fn lookup(&self, name: &str) -> Option<EventRef<'_>> {
        self.names.get(&normalize(name)).map(|&id| self.event(id))
    }

    pub fn event(&self, id: EventId) -> EventRef<'_> {
        match id {
            EventId::Gate(i) => EventRef::Gate(&self.gates[i]),
            EventId::Basic(i) => EventRef::Basic(&self.basic_events[i]),
            EventId::House(i) => EventRef::House(&self.house_events[i]),
        }
    }

    /// Resolved entities of the gate's complemented arguments.
    pub fn complement_arguments<'a>(&'a self, gate: &'a Gate) -> Vec<EventRef<'a>> {
        gate.arguments
            .iter()
            .filter(|a| a.complement)
            .filter_map(|a| a.target.map(|id| self.event(id)))
            .collect()
    }

    /// Declared basic and house events that no gate references.
    pub fn orphan_events(&self) -> Vec<EventRef<'_>> {
        let referenced: HashSet<EventId> = self
            .gates
            .iter()
            .flat_map(|g| g.arguments.iter().filter_map(|a| a.target))
            .collect();
        let basic = self
            .basic_events
            .iter()
            .enumerate()
            .filter(|(i, b)| {
                b.origin == EventOrigin::Declared && !referenced.contains(&EventId::Basic(*i))
            })
            .map(|(_, b)| EventRef::Basic(b));
        let house = self
            .house_events
            .iter()
            .enumerate()
            .filter(|(i, _)| !referenced.contains(&EventId::House(*i)))
            .map(|(_, h)| EventRef::House(h));
        basic.chain(house).collect()
    }

    /// Give every undefined event the probability `p`. Returns how many
    /// events were updated. The translator never does this on its own.
    pub fn set_undefined_probability(&mut self, p: f64) -> usize {
        let mut updated = 0;
        for event in self
            .basic_events
            .iter_mut()
            .filter(|b| b.origin == EventOrigin::Undefined)
        {
            event.probability = Some(p);
            updated += 1;
        }
        updated
    }

    pub fn summary(&self) -> Summary {
        Summary {
            name: self.name.clone(),
            gates: self.gates.len(),
            basic_events: self.basic_events().count(),
            house_events: self.house_events.len(),
            undefined_events: self.undefined_events().count(),
            roots: self.roots().map(|g| g.name.clone()).collect(),
        }
    }

    /// Render the tree as an Open-PSA MEF document.
    pub fn to_xml(&self) -> Result<String, crate::error::SerializeError> {
        crate::pass3_serialize::serialize(self)
    }
}
