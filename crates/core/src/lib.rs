#![allow(clippy::result_large_err)]
//! aralia-core: Aralia fault-tree translator core library.
//!
//! Provides the pipeline from Aralia fault-tree text to a validated
//! in-memory model and on to Open-PSA MEF XML.
//!
//! # Public API
//!
//! - [`translate()`] / [`translate_file()`] -- parse, build and validate
//! - [`FaultTree`] -- the validated model; [`FaultTree::to_xml`] renders MEF
//! - [`TranslateError`] -- format, parsing and fault-tree errors
//! - [`SourceProvider`] -- pluggable document reading; [`InMemoryProvider`]
//!   serves embedders that hold sources in memory
//!
//! Individual pass entry functions are also re-exported for selective
//! pipeline execution.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod pass1_build;
pub mod pass2_validate;
pub mod pass3_serialize;
pub mod source;
pub mod translate;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{Provenance, RawDocument};
pub use error::{ErrorKind, FileError, SerializeError, TranslateError};
pub use model::{
    Argument, BasicEvent, EventId, EventOrigin, EventRef, FaultTree, Gate, HouseEvent, Named,
    Operator, Summary,
};
pub use source::{FileSystemProvider, InMemoryProvider, SourceProvider};
pub use translate::TranslateOptions;

// ── Convenience re-exports: pipeline entry points ────────────────────

pub use parser::parse_document;
pub use pass1_build::build;
pub use pass2_validate::{is_valid_name, validate};
pub use pass3_serialize::serialize;
pub use translate::{translate, translate_file};
