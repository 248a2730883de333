//! Pass 2: Semantic validation -- redefinitions, name format, operator
//! arity, reference resolution, cycles, and top-event resolution.
//!
//! Passes run in order and the first failure aborts. Validation is
//! idempotent: running it again on a validated tree changes nothing.

mod arity;
mod cycles;
mod names;
mod resolve;
mod roots;

use crate::error::TranslateError;
use crate::model::{FaultTree, Named};
use crate::translate::TranslateOptions;
use tracing::debug;

pub use names::is_valid_name;

pub fn validate(ft: &mut FaultTree, options: &TranslateOptions) -> Result<(), TranslateError> {
    names::check_redefinitions(ft)?;
    names::check_name_format(ft)?;
    arity::check_arity(ft)?;
    resolve::resolve_references(ft);
    cycles::detect_cycles(ft).map_err(|e| roots::note_missing_top(ft, e))?;
    roots::resolve_roots(ft, options.multi_top)?;

    let orphans: Vec<String> = ft
        .orphan_events()
        .iter()
        .map(|e| e.name().to_owned())
        .collect();
    if !orphans.is_empty() {
        debug!(tree = %ft.name, orphans = ?orphans, "declared events not used by any gate");
    }
    let undefined: Vec<&str> = ft.undefined_events().map(|b| b.name.as_str()).collect();
    if !undefined.is_empty() {
        debug!(tree = %ft.name, undefined = ?undefined, "events without declaration");
    }
    Ok(())
}
