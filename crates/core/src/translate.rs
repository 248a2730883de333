//! Three-pass translator: Aralia text -> validated fault tree.
//!
//! Thin orchestrator over the pass modules. Serialization is left to the
//! caller through [`FaultTree::to_xml`] so the model can be inspected or
//! adjusted first.

use crate::error::{FileError, TranslateError};
use crate::model::FaultTree;
use crate::parser;
use crate::pass1_build;
use crate::pass2_validate;
use crate::source::SourceProvider;
use std::path::Path;
use tracing::{debug, info_span};

#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    /// Accept more than one top gate (a forest of trees).
    pub multi_top: bool,
}

/// Translate one document. `filename` is only used in error locations.
pub fn translate(
    src: &str,
    filename: &str,
    options: &TranslateOptions,
) -> Result<FaultTree, TranslateError> {
    let _span = info_span!("translate", file = filename).entered();

    // Pass 0: lex + parse every statement
    let doc = parser::parse_document(src, filename)?;
    debug!(
        name = %doc.name,
        gates = doc.gates.len(),
        probabilities = doc.probabilities.len(),
        states = doc.states.len(),
        "parsed document"
    );

    // Pass 1: model building
    let mut ft = pass1_build::build(&doc)?;

    // Pass 2: validation
    pass2_validate::validate(&mut ft, options)?;
    debug!(tree = %ft.name(), "validated fault tree");
    Ok(ft)
}

/// Read `path` through `provider` and translate it.
pub fn translate_file(
    path: &Path,
    provider: &dyn SourceProvider,
    options: &TranslateOptions,
) -> Result<FaultTree, FileError> {
    let filename = path.display().to_string();
    let src = provider.read_source(path).map_err(|source| FileError::Io {
        path: filename.clone(),
        source,
    })?;
    Ok(translate(&src, &filename, options)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::source::InMemoryProvider;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn translate_runs_all_passes() {
        let ft = translate(
            "FT\ng1 := g2 | e1\ng2 := e2 & e3\np(e1) = 0.1\n",
            "ft.txt",
            &TranslateOptions::default(),
        )
        .unwrap();
        assert_eq!(ft.root().map(|g| g.name.as_str()), Some("g1"));
        assert!(ft.gates()[0].arguments.iter().all(|a| a.target.is_some()));
    }

    #[test]
    fn errors_carry_the_filename() {
        let err = translate("FT\ng1 := a + b\n", "bad.txt", &TranslateOptions::default())
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parsing);
        assert_eq!(err.file, "bad.txt");
        assert_eq!(err.line, 2);
    }

    #[test]
    fn translate_file_reads_through_provider() {
        let mut files = HashMap::new();
        files.insert(PathBuf::from("/trees/ft.txt"), "FT\ng1 := a & b\n".to_string());
        let provider = InMemoryProvider::new(files);
        let ft = translate_file(
            Path::new("/trees/ft.txt"),
            &provider,
            &TranslateOptions::default(),
        )
        .unwrap();
        assert_eq!(ft.file(), "/trees/ft.txt");

        let err = translate_file(
            Path::new("/trees/missing.txt"),
            &provider,
            &TranslateOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, FileError::Io { .. }));
    }
}
