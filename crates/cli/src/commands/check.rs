use std::path::PathBuf;

use aralia_core::{translate_file, FileSystemProvider, Summary, TranslateOptions};

use crate::{report_file_error, OutputFormat};

fn format_summary(s: &Summary) -> String {
    format!(
        "tree '{}': {} gates, {} basic events, {} house events, {} undefined events; top: {}",
        s.name,
        s.gates,
        s.basic_events,
        s.house_events,
        s.undefined_events,
        s.roots.join(", ")
    )
}

/// Validate every file without writing output. Returns false if any failed.
pub(crate) fn cmd_check(
    files: &[PathBuf],
    options: &TranslateOptions,
    output: OutputFormat,
    quiet: bool,
) -> bool {
    let mut ok = true;
    let mut reports = Vec::new();

    for file in files {
        match translate_file(file, &FileSystemProvider, options) {
            Ok(ft) => reports.push((file.display().to_string(), ft.summary())),
            Err(e) => {
                report_file_error(&e, output, quiet);
                ok = false;
            }
        }
    }

    if !quiet {
        match output {
            OutputFormat::Json => {
                let entries: Vec<_> = reports
                    .iter()
                    .map(|(file, summary)| serde_json::json!({ "file": file, "summary": summary }))
                    .collect();
                let json = serde_json::to_string_pretty(&entries)
                    .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
                println!("{}", json);
            }
            OutputFormat::Text => {
                for (file, summary) in &reports {
                    println!("{}: ok: {}", file, format_summary(summary));
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
    fn summary_line_lists_counts_and_roots() {
        let s = Summary {
            name: "FT".into(),
            gates: 2,
            basic_events: 1,
            house_events: 0,
            undefined_events: 3,
            roots: vec!["g1".into(), "g2".into()],
        };
        assert_eq!(
            format_summary(&s),
            "tree 'FT': 2 gates, 1 basic events, 0 house events, 3 undefined events; top: g1, g2"
        );
    }
}
