//! Pass 3: MEF serialization -- render a validated fault tree as an
//! Open-PSA Model Exchange Format document.
//!
//! Element names, nesting and cardinality follow the MEF schema:
//!
//! ```text
//! opsa-mef
//!   define-fault-tree @name
//!     define-gate @name            (one per gate, declaration order)
//!       formula                    (and | or | xor | not | atleast @min | bare reference)
//!   model-data                     (omitted when empty)
//!     define-basic-event @name     (float @value when a probability is known)
//!     define-house-event @name     (constant @value)
//! ```

use crate::error::SerializeError;
use crate::model::*;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

type XmlWriter = Writer<Vec<u8>>;

fn emit(w: &mut XmlWriter, event: Event<'_>) -> Result<(), SerializeError> {
    w.write_event(event)
        .map_err(|e| SerializeError::Write(e.to_string()))
}

fn start(w: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> Result<(), SerializeError> {
    emit(
        w,
        Event::Start(BytesStart::new(tag).with_attributes(attrs.iter().copied())),
    )
}

fn end(w: &mut XmlWriter, tag: &str) -> Result<(), SerializeError> {
    emit(w, Event::End(BytesEnd::new(tag)))
}

fn empty(w: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> Result<(), SerializeError> {
    emit(
        w,
        Event::Empty(BytesStart::new(tag).with_attributes(attrs.iter().copied())),
    )
}

pub fn serialize(ft: &FaultTree) -> Result<String, SerializeError> {
    let mut w = Writer::new_with_indent(Vec::new(), b' ', 2);
    emit(
        &mut w,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    start(&mut w, "opsa-mef", &[])?;

    start(&mut w, "define-fault-tree", &[("name", ft.name())])?;
    for gate in ft.gates() {
        start(&mut w, "define-gate", &[("name", gate.name.as_str())])?;
        write_formula(&mut w, ft, gate)?;
        end(&mut w, "define-gate")?;
    }
    end(&mut w, "define-fault-tree")?;

    if !ft.basic_events.is_empty() || !ft.house_events().is_empty() {
        start(&mut w, "model-data", &[])?;
        // Declared events first, then undefined ones in first-reference order.
        for event in ft.basic_events().chain(ft.undefined_events()) {
            write_basic_event(&mut w, event)?;
        }
        for event in ft.house_events() {
            start(&mut w, "define-house-event", &[("name", event.name.as_str())])?;
            empty(
                &mut w,
                "constant",
                &[("value", if event.state { "true" } else { "false" })],
            )?;
            end(&mut w, "define-house-event")?;
        }
        end(&mut w, "model-data")?;
    }

    end(&mut w, "opsa-mef")?;
    let mut xml = String::from_utf8(w.into_inner())?;
    xml.push('\n');
    Ok(xml)
}

fn write_formula(w: &mut XmlWriter, ft: &FaultTree, gate: &Gate) -> Result<(), SerializeError> {
    let min;
    let attrs: Vec<(&str, &str)> = match gate.operator {
        Operator::AtLeast(k) => {
            min = k.to_string();
            vec![("min", min.as_str())]
        }
        _ => Vec::new(),
    };
    match gate.operator.tag() {
        Some(tag) => {
            start(w, tag, &attrs)?;
            for arg in &gate.arguments {
                write_argument(w, ft, arg)?;
            }
            end(w, tag)
        }
        None => {
            for arg in &gate.arguments {
                write_argument(w, ft, arg)?;
            }
            Ok(())
        }
    }
}

/// Reference to a gate or event, wrapped in `<not>` when complemented. The
/// canonical spelling is used so case-insensitive references resolve in the
/// case-sensitive XML.
fn write_argument(w: &mut XmlWriter, ft: &FaultTree, arg: &Argument) -> Result<(), SerializeError> {
    let (tag, name) = match arg.target.map(|id| ft.event(id)) {
        Some(EventRef::Gate(g)) => ("gate", g.name.as_str()),
        Some(EventRef::Basic(b)) => ("basic-event", b.name.as_str()),
        Some(EventRef::House(h)) => ("house-event", h.name.as_str()),
        // Unvalidated trees have no targets; MEF's generic reference fits.
        None => ("event", arg.name.as_str()),
    };
    if arg.complement {
        start(w, "not", &[])?;
        empty(w, tag, &[("name", name)])?;
        end(w, "not")
    } else {
        empty(w, tag, &[("name", name)])
    }
}

fn write_basic_event(w: &mut XmlWriter, event: &BasicEvent) -> Result<(), SerializeError> {
    match event.probability {
        Some(p) => {
            let value = p.to_string();
            start(w, "define-basic-event", &[("name", event.name.as_str())])?;
            empty(w, "float", &[("value", value.as_str())])?;
            end(w, "define-basic-event")
        }
        None => empty(w, "define-basic-event", &[("name", event.name.as_str())]),
    }
}
