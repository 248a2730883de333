use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use aralia_core::{translate_file, FileSystemProvider, TranslateOptions};
use tracing::{debug, info};

use crate::{report_error, report_file_error, OutputFormat};

pub(crate) enum Destination {
    Stdout,
    /// `<dir>/<input stem>.xml`; an empty path means the current directory.
    Dir(PathBuf),
}

fn output_path(dir: &Path, input: &Path) -> Option<PathBuf> {
    let stem = input.file_stem()?;
    let mut name = stem.to_os_string();
    name.push(".xml");
    Some(dir.join(name))
}

/// Translate every file independently. Returns false if any file failed.
pub(crate) fn cmd_translate(
    files: &[PathBuf],
    options: &TranslateOptions,
    destination: &Destination,
    default_probability: Option<f64>,
    output: OutputFormat,
    quiet: bool,
) -> bool {
    if matches!(destination, Destination::Stdout) && files.len() > 1 {
        report_error(
            &format!(
                "--stdout writes a single XML document; got {} input files (use --out-dir)",
                files.len()
            ),
            output,
            quiet,
        );
        return false;
    }

    let mut ok = true;
    let mut written = Vec::new();
    // output path -> input that claimed it
    let mut claimed: HashMap<PathBuf, &Path> = HashMap::new();

    for file in files {
        let target = match destination {
            Destination::Stdout => None,
            Destination::Dir(dir) => {
                let Some(path) = output_path(dir, file) else {
                    report_error(
                        &format!("{}: cannot derive an output file name", file.display()),
                        output,
                        quiet,
                    );
                    ok = false;
                    continue;
                };
                if let Some(first) = claimed.get(&path) {
                    report_error(
                        &format!(
                            "{}: output {} is already taken by {}",
                            file.display(),
                            path.display(),
                            first.display()
                        ),
                        output,
                        quiet,
                    );
                    ok = false;
                    continue;
                }
                claimed.insert(path.clone(), file.as_path());
                Some((dir, path))
            }
        };

        let mut ft = match translate_file(file, &FileSystemProvider, options) {
            Ok(ft) => ft,
            Err(e) => {
                report_file_error(&e, output, quiet);
                ok = false;
                continue;
            }
        };

        if let Some(p) = default_probability {
            let updated = ft.set_undefined_probability(p);
            debug!(file = %file.display(), updated, probability = p, "applied default probability");
        }

        let xml = match ft.to_xml() {
            Ok(xml) => xml,
            Err(e) => {
                report_error(&format!("{}: {}", file.display(), e), output, quiet);
                ok = false;
                continue;
            }
        };

        match target {
            None => print!("{}", xml),
            Some((dir, path)) => {
                let result = if dir.as_os_str().is_empty() {
                    fs::write(&path, &xml)
                } else {
                    fs::create_dir_all(dir).and_then(|_| fs::write(&path, &xml))
                };
                if let Err(e) = result {
                    report_error(
                        &format!("cannot write {}: {}", path.display(), e),
                        output,
                        quiet,
                    );
                    ok = false;
                    continue;
                }
                info!(input = %file.display(), output = %path.display(), "wrote MEF document");
                written.push((file.display().to_string(), path.display().to_string()));
            }
        }
    }

    if !quiet && !written.is_empty() {
        match output {
            OutputFormat::Json => {
                let entries: Vec<_> = written
                    .iter()
                    .map(|(input, out)| serde_json::json!({ "file": input, "output": out }))
                    .collect();
                let json = serde_json::to_string_pretty(&entries)
                    .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
                println!("{}", json);
            }
            OutputFormat::Text => {
                for (input, out) in &written {
                    println!("{} -> {}", input, out);
                }
            }
        }
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_uses_the_input_stem() {
        let path = output_path(Path::new("out"), Path::new("trees/pump.txt")).unwrap();
        assert_eq!(path, PathBuf::from("out/pump.xml"));
        let path = output_path(Path::new(""), Path::new("pump")).unwrap();
        assert_eq!(path, PathBuf::from("pump.xml"));
    }
}
