//! Source provider abstraction for filesystem-independent translation.
//!
//! [`SourceProvider`] abstracts reading a document so the translator can be
//! driven from memory as well as from disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub trait SourceProvider {
    /// Read the source text for a given path.
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error>;
}

/// Default filesystem-backed source provider.
pub struct FileSystemProvider;

impl SourceProvider for FileSystemProvider {
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        std::fs::read_to_string(path)
    }
}

/// In-memory source provider: the entry point for hosts that keep fault
/// trees outside the filesystem (editors, services, generated models).
///
/// ```
/// use aralia_core::{translate_file, InMemoryProvider, TranslateOptions};
/// use std::collections::HashMap;
/// use std::path::{Path, PathBuf};
///
/// let mut files = HashMap::new();
/// files.insert(PathBuf::from("pump.txt"), "Pump\ng1 := a & b\n".to_string());
/// let provider = InMemoryProvider::new(files);
/// let ft = translate_file(Path::new("pump.txt"), &provider, &TranslateOptions::default())?;
/// assert_eq!(ft.name(), "Pump");
/// # Ok::<(), aralia_core::FileError>(())
/// ```
///
/// Maps paths to source text. Lookups normalize `.` and `..` without
/// touching the filesystem.
pub struct InMemoryProvider {
    files: HashMap<PathBuf, String>,
}

impl InMemoryProvider {
    pub fn new(files: HashMap<PathBuf, String>) -> Self {
        Self {
            files: files
                .into_iter()
                .map(|(path, src)| (Self::normalize_path(&path), src))
                .collect(),
        }
    }

    fn normalize_path(path: &Path) -> PathBuf {
        let mut components = Vec::new();
        for component in path.components() {
            match component {
                std::path::Component::CurDir => {}
                std::path::Component::ParentDir => {
                    components.pop();
                }
                other => components.push(other),
            }
        }
        components.iter().collect()
    }
}

impl SourceProvider for InMemoryProvider {
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        let normalized = Self::normalize_path(path);
        self.files.get(&normalized).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("file not found in memory: {}", normalized.display()),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_path_resolves_dot_and_dotdot() {
        let p = Path::new("/a/b/../c/./d");
        let normalized = InMemoryProvider::normalize_path(p);
        assert_eq!(normalized, PathBuf::from("/a/c/d"));
    }

    #[test]
    fn in_memory_read_source_found() {
        let mut files = HashMap::new();
        files.insert(PathBuf::from("/trees/pump.txt"), "Pump\ng1 := a & b".to_string());
        let provider = InMemoryProvider::new(files);
        let content = provider
            .read_source(Path::new("/trees/./sub/../pump.txt"))
            .unwrap();
        assert_eq!(content, "Pump\ng1 := a & b");
    }

    #[test]
    fn in_memory_read_source_not_found() {
        let provider = InMemoryProvider::new(HashMap::new());
        let err = provider
            .read_source(Path::new("/missing.txt"))
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn filesystem_provider_reports_missing_files() {
        let err = FileSystemProvider
            .read_source(Path::new("/nonexistent/aralia/input.txt"))
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
